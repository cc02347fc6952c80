//! 2D pointing device (mouse or touch) tracking.

use glam::Vec2;

/// Last known position of the 2D pointer, in normalized device coordinates.
#[derive(Debug, Clone, Default)]
pub struct DevicePointer {
    /// Viewport size in physical pixels.
    viewport: (u32, u32),
    /// Pointer position in NDC, `None` until the mouse moves or a touch starts.
    position: Option<Vec2>,
    /// Touch currently driving the pointer; other fingers are ignored.
    active_touch: Option<u64>,
}

impl DevicePointer {
    /// Create a pointer tracker for a viewport of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            ..Default::default()
        }
    }

    /// Viewport size in physical pixels.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Update the viewport size. The stored NDC position is kept as-is.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }

    /// Pointer position in NDC, if known.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Whether a touch is currently driving the pointer.
    pub fn touch_active(&self) -> bool {
        self.active_touch.is_some()
    }

    /// Mouse moved to the given pixel position.
    pub fn move_to(&mut self, x: f64, y: f64) {
        if let Some(ndc) = self.to_ndc(x, y) {
            self.position = Some(ndc);
        }
    }

    /// A touch started. Returns `true` if this touch now drives the pointer.
    pub fn touch_start(&mut self, id: u64, x: f64, y: f64) -> bool {
        if self.active_touch.is_some() {
            return false;
        }
        self.active_touch = Some(id);
        self.move_to(x, y);
        true
    }

    /// The driving touch moved.
    pub fn touch_move(&mut self, id: u64, x: f64, y: f64) {
        if self.active_touch == Some(id) {
            self.move_to(x, y);
        }
    }

    /// A touch ended or was cancelled. Returns `true` if it was the driving
    /// touch, in which case the pointer position is forgotten.
    pub fn touch_end(&mut self, id: u64) -> bool {
        if self.active_touch != Some(id) {
            return false;
        }
        self.active_touch = None;
        self.position = None;
        true
    }

    /// Convert a pixel position into `[-1, 1]` NDC with +Y up.
    pub fn to_ndc(&self, x: f64, y: f64) -> Option<Vec2> {
        let (width, height) = self.viewport;
        if width == 0 || height == 0 {
            return None;
        }
        let nx = (x / width as f64) * 2.0 - 1.0;
        let ny = -((y / height as f64) * 2.0 - 1.0);
        Some(Vec2::new(nx as f32, ny as f32).clamp(Vec2::NEG_ONE, Vec2::ONE))
    }
}
