//! Tracked XR controllers.
//!
//! Poses come from the XR runtime once per frame; this module only keeps the
//! latest world-space ray of every controller and whether a session is
//! presenting.

use spatial_pointer_core::Ray;
use tracing::{info, warn};

/// Latest controller rays and session status.
#[derive(Debug, Clone, Default)]
pub struct XrControllers {
    presenting: bool,
    rays: Vec<Option<Ray>>,
    selecting: Vec<bool>,
}

impl XrControllers {
    /// Whether an immersive session is currently presenting.
    pub fn presenting(&self) -> bool {
        self.presenting
    }

    /// Mark the session as presenting.
    pub fn session_started(&mut self) {
        if !self.presenting {
            info!("XR session started, controller rays are now authoritative");
        }
        self.presenting = true;
    }

    /// Mark the session as ended and drop all poses.
    pub fn session_ended(&mut self) {
        if self.presenting {
            info!("XR session ended, falling back to device pointer");
        }
        self.presenting = false;
        self.rays.clear();
        self.selecting.clear();
    }

    /// The runtime refused or does not support immersive sessions.
    pub fn session_unavailable(&mut self, reason: &str) {
        warn!(reason, "XR session unavailable, using device pointer only");
        self.presenting = false;
    }

    /// Store the ray of controller `index` for this frame (`None` when the
    /// runtime lost tracking).
    pub fn set_ray(&mut self, index: usize, ray: Option<Ray>) {
        if self.rays.len() <= index {
            self.rays.resize(index + 1, None);
        }
        self.rays[index] = ray;
    }

    /// Latest ray of controller `index`.
    pub fn ray(&self, index: usize) -> Option<Ray> {
        self.rays.get(index).copied().flatten()
    }

    /// Rays of every known controller, by index.
    pub fn rays(&self) -> &[Option<Ray>] {
        &self.rays
    }

    /// Record the trigger state of controller `index`.
    pub fn set_selecting(&mut self, index: usize, selecting: bool) {
        if self.selecting.len() <= index {
            self.selecting.resize(index + 1, false);
        }
        self.selecting[index] = selecting;
    }

    /// Whether controller `index` currently holds its trigger.
    pub fn selecting(&self, index: usize) -> bool {
        self.selecting.get(index).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn rays_grow_on_demand() {
        let mut xr = XrControllers::default();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        xr.set_ray(2, Some(ray));
        assert_eq!(xr.rays().len(), 3);
        assert_eq!(xr.ray(0), None);
        assert_eq!(xr.ray(2), Some(ray));
        assert_eq!(xr.ray(7), None);
    }

    #[test]
    fn session_end_drops_poses() {
        let mut xr = XrControllers::default();
        xr.session_started();
        xr.set_ray(0, Some(Ray::new(Vec3::ZERO, Vec3::X).unwrap()));
        xr.set_selecting(0, true);
        xr.session_ended();
        assert!(!xr.presenting());
        assert_eq!(xr.ray(0), None);
        assert!(!xr.selecting(0));
    }

    #[test]
    fn unavailable_session_stays_in_device_mode() {
        let mut xr = XrControllers::default();
        xr.session_unavailable("not supported");
        assert!(!xr.presenting());
    }
}
