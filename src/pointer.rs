//! Bridges raw device-pixel pointer input to plot-space callbacks.

use std::fmt;

use crate::mapper::CoordinateMapper;

/// Raw pointer input, offsets in device pixels relative to the mounted surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { offset_x: f64, offset_y: f64 },
    Up { offset_x: f64, offset_y: f64 },
    Move { offset_x: f64, offset_y: f64 },
    Leave,
}

type PositionHandler = Box<dyn FnMut(f64, f64)>;
type LeaveHandler = Box<dyn FnMut()>;

/// One handler slot per event kind; registering again replaces the old one.
#[derive(Default)]
pub struct PointerEventAdapter {
    down: Option<PositionHandler>,
    up: Option<PositionHandler>,
    moved: Option<PositionHandler>,
    leave: Option<LeaveHandler>,
}

impl fmt::Debug for PointerEventAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerEventAdapter")
            .field("down", &self.down.is_some())
            .field("up", &self.up.is_some())
            .field("moved", &self.moved.is_some())
            .field("leave", &self.leave.is_some())
            .finish()
    }
}

impl PointerEventAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pointer_down(&mut self, handler: impl FnMut(f64, f64) + 'static) {
        self.down = Some(Box::new(handler));
    }

    pub fn on_pointer_up(&mut self, handler: impl FnMut(f64, f64) + 'static) {
        self.up = Some(Box::new(handler));
    }

    pub fn on_pointer_move(&mut self, handler: impl FnMut(f64, f64) + 'static) {
        self.moved = Some(Box::new(handler));
    }

    pub fn on_pointer_leave(&mut self, handler: impl FnMut() + 'static) {
        self.leave = Some(Box::new(handler));
    }

    /// Invokes the handler registered for the event's kind. Returns `false`
    /// when no handler is registered.
    pub fn dispatch(&mut self, mapper: &CoordinateMapper, event: PointerEvent) -> bool {
        let (slot, offset) = match event {
            PointerEvent::Down { offset_x, offset_y } => (&mut self.down, (offset_x, offset_y)),
            PointerEvent::Up { offset_x, offset_y } => (&mut self.up, (offset_x, offset_y)),
            PointerEvent::Move { offset_x, offset_y } => (&mut self.moved, (offset_x, offset_y)),
            PointerEvent::Leave => {
                return match self.leave.as_mut() {
                    Some(handler) => {
                        handler();
                        true
                    }
                    None => false,
                };
            }
        };

        let Some(handler) = slot.as_mut() else {
            return false;
        };
        let (x, y) = mapper.device_to_plot(offset.0, offset.1);
        log::trace!("pointer {:?} -> plot ({x}, {y})", event);
        handler(x, y);
        true
    }
}
