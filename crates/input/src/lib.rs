#![warn(missing_docs)]
//! Input unification for mouse, touch, and tracked XR controllers.
//!
//! Window and XR events only update latest-value flags here. The frame loop
//! calls [`InputState::snapshot`] once per frame and hands the resulting
//! [`FrameInput`] to the interaction pipeline.

mod device;
mod sample;
mod xr;

pub use device::DevicePointer;
pub use sample::{PointerSample, PointerSource};
pub use xr::XrControllers;

use glam::Vec2;
use spatial_pointer_core::Ray;
use tracing::trace;
use winit::event::{ElementState, TouchPhase, WindowEvent};

/// Accumulated pointer state, updated asynchronously by input events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    device: DevicePointer,
    xr: XrControllers,
    /// Engagement signal shared by every pointer source.
    engaged: bool,
}

impl InputState {
    /// Create a new input state for a viewport of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            device: DevicePointer::new(width, height),
            ..Default::default()
        }
    }

    /// Process a window event to update input state.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, .. } => match state {
                ElementState::Pressed => self.pointer_pressed(),
                ElementState::Released => self.pointer_released(),
            },
            WindowEvent::Touch(touch) => {
                let (x, y) = (touch.location.x, touch.location.y);
                match touch.phase {
                    TouchPhase::Started => self.touch_started(touch.id, x, y),
                    TouchPhase::Moved => self.touch_moved(touch.id, x, y),
                    TouchPhase::Ended | TouchPhase::Cancelled => self.touch_ended(touch.id),
                }
            }
            WindowEvent::Resized(size) => self.resized(size.width, size.height),
            _ => {}
        }
    }

    /// Mouse moved to a pixel position.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        self.device.move_to(x, y);
    }

    /// Any mouse button went down.
    pub fn pointer_pressed(&mut self) {
        self.engaged = true;
    }

    /// A mouse button was released.
    pub fn pointer_released(&mut self) {
        self.engaged = false;
    }

    /// A finger touched the screen.
    pub fn touch_started(&mut self, id: u64, x: f64, y: f64) {
        if self.device.touch_start(id, x, y) {
            self.engaged = true;
        }
    }

    /// A finger moved.
    pub fn touch_moved(&mut self, id: u64, x: f64, y: f64) {
        self.device.touch_move(id, x, y);
    }

    /// A finger lifted or the touch was cancelled.
    pub fn touch_ended(&mut self, id: u64) {
        if self.device.touch_end(id) {
            self.engaged = false;
        }
    }

    /// The viewport changed size.
    pub fn resized(&mut self, width: u32, height: u32) {
        self.device.resize(width, height);
    }

    /// Controller `index` pressed its trigger.
    pub fn select_start(&mut self, index: usize) {
        self.xr.set_selecting(index, true);
        self.engaged = true;
    }

    /// Controller `index` released its trigger.
    pub fn select_end(&mut self, index: usize) {
        self.xr.set_selecting(index, false);
        self.engaged = false;
    }

    /// Mutable access to the XR controller state (session status and poses).
    pub fn xr_mut(&mut self) -> &mut XrControllers {
        &mut self.xr
    }

    /// XR controller state.
    pub fn xr(&self) -> &XrControllers {
        &self.xr
    }

    /// Device pointer state.
    pub fn device(&self) -> &DevicePointer {
        &self.device
    }

    /// Current engagement signal.
    pub fn engaged(&self) -> bool {
        self.engaged
    }

    /// Read every flag at once for the coming frame.
    pub fn snapshot(&self) -> FrameInput {
        let frame = FrameInput {
            device: self.device.position(),
            presenting: self.xr.presenting(),
            controllers: self.xr.rays().to_vec(),
            engaged: self.engaged,
        };
        trace!(?frame, "input snapshot");
        frame
    }
}

/// Frame-scoped, immutable view of the pointer inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    /// Device pointer position in NDC, if known.
    pub device: Option<Vec2>,
    /// Whether an XR session is presenting.
    pub presenting: bool,
    /// Controller rays by controller index.
    pub controllers: Vec<Option<Ray>>,
    /// Whether the active pointer is pressed or the trigger held.
    pub engaged: bool,
}

impl FrameInput {
    /// Pick the one pointer that drives this frame.
    ///
    /// While presenting, the `primary` controller is authoritative and the
    /// device pointer is ignored even if its ray is missing.
    pub fn pointer_sample(&self, primary: usize) -> PointerSample {
        if self.presenting {
            return match self.controllers.get(primary).copied().flatten() {
                Some(ray) => PointerSample::WorldRay {
                    ray,
                    controller: primary,
                },
                None => PointerSample::None,
            };
        }
        match self.device {
            Some(ndc) => PointerSample::DeviceCoords(ndc),
            None => PointerSample::None,
        }
    }
}
