//! Unified pointer samples and ray resolution.

use glam::Vec2;
use serde::Serialize;
use spatial_pointer_camera::Camera;
use spatial_pointer_core::{InteractionError, Ray};

/// The single pointer that drives hit testing for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerSample {
    /// No pointer this frame; every interactive object falls back to idle.
    None,
    /// 2D device position in normalized device coordinates.
    DeviceCoords(Vec2),
    /// World-space ray of a tracked controller.
    WorldRay {
        /// The controller ray.
        ray: Ray,
        /// Controller index reported by the XR runtime.
        controller: usize,
    },
}

/// Where a frame's ray came from, for traces and the pointer indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerSource {
    /// No ray was cast.
    None,
    /// Mouse or touch projected through the camera.
    Device,
    /// Tracked controller with the given index.
    Controller(usize),
}

impl PointerSample {
    /// Source tag of this sample.
    pub fn source(&self) -> PointerSource {
        match self {
            PointerSample::None => PointerSource::None,
            PointerSample::DeviceCoords(_) => PointerSource::Device,
            PointerSample::WorldRay { controller, .. } => PointerSource::Controller(*controller),
        }
    }

    /// Turn the sample into a world-space ray.
    ///
    /// Device coordinates are projected through `camera`; controller rays
    /// pass through unchanged.
    pub fn resolve_ray(&self, camera: &Camera) -> Result<Option<Ray>, InteractionError> {
        match self {
            PointerSample::None => Ok(None),
            PointerSample::DeviceCoords(ndc) => camera.ray_from_ndc(*ndc).map(Some),
            PointerSample::WorldRay { ray, .. } => Ok(Some(*ray)),
        }
    }
}
