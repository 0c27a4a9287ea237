#![cfg(feature = "cairo")]

use plotspace::api::CanvasImageData;
use plotspace::backends::cairo::CairoCanvas;
use plotspace::{Host, Plot, PlotConfig, StyleOverride};

fn raster_plot() -> Plot<CairoCanvas> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut host: Host<CairoCanvas> = Host::new().with_container("canvas");
    let config = PlotConfig::new("canvas")
        .with_pixels(64.0, 48.0)
        .with_x_range(0.0, 8.0)
        .with_y_range(0.0, 6.0)
        .with_background_color("#ffffff");
    Plot::create(&config, &mut host).unwrap()
}

fn pixels(plot: &Plot<CairoCanvas>) -> Vec<u8> {
    plot.surface().get_image_data(0, 0, 64, 48).unwrap().data
}

#[test]
fn background_is_painted_on_creation() {
    let plot = raster_plot();
    let data = plot.surface().get_image_data(0, 0, 64, 48).unwrap();
    assert_eq!(data.pixel(0, 0), Some([255, 255, 255, 255]));
    assert_eq!(data.pixel(63, 47), Some([255, 255, 255, 255]));
}

#[test]
fn restore_after_drawing_is_pixel_identical() {
    let mut plot = raster_plot();
    plot.draw_rect(1.0, 1.0, 2.0, 2.0, Some(&StyleOverride::new().color("#00ff00")))
        .unwrap();
    plot.push_background().unwrap();
    let snapshot = pixels(&plot);

    let thick = StyleOverride::new().color("red").line_width(0.5);
    plot.draw_line(0.0, 0.0, 8.0, 6.0, Some(&thick)).unwrap();
    plot.draw_circle(4.0, 3.0, 1.0, Some(&thick)).unwrap();
    plot.draw_point(6.0, 1.0, Some(&StyleOverride::new().point_radius(0.5)))
        .unwrap();
    assert_ne!(pixels(&plot), snapshot);

    plot.restore_to_background().unwrap();
    assert_eq!(pixels(&plot), snapshot);
    assert_eq!(plot.background_depth(), 2);

    plot.draw_line(0.0, 6.0, 8.0, 0.0, Some(&thick)).unwrap();
    plot.pop_background().unwrap();
    assert_eq!(pixels(&plot), snapshot);
    assert_eq!(plot.background_depth(), 1);
}

#[test]
fn rect_fills_the_mapped_device_region() {
    let mut plot = raster_plot();
    // Plot (2, 2)..(4, 4) is device x 16..32, y 16..32.
    plot.draw_rect(2.0, 2.0, 2.0, 2.0, Some(&StyleOverride::new().color("#0000ff")))
        .unwrap();
    let data = plot.surface().get_image_data(0, 0, 64, 48).unwrap();
    assert_eq!(data.pixel(20, 20), Some([0, 0, 255, 255]));
    assert_eq!(data.pixel(20, 12), Some([255, 255, 255, 255]));
    assert_eq!(data.pixel(40, 20), Some([255, 255, 255, 255]));
}
