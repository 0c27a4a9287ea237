pub mod recording;

#[cfg(feature = "cairo")]
pub mod cairo;
