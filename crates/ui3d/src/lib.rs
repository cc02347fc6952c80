//! 3D pointer interaction for spatial UIs
//!
//! This crate resolves which registered object a pointer ray targets and
//! drives every interactive object through the idle / hovered / selected
//! state machine once per frame.
//!
//! # Features
//!
//! - **Hit proxies**: boxes, spheres, quads, triangles, and compounds of them
//! - **Closest-hit resolution**: deterministic, first-registered wins ties
//! - **State machine**: per-state attributes and on-entry callbacks
//! - **Buttons**: ready-made idle / hovered / selected styling
//!
//! # Example
//!
//! ```rust,no_run
//! use spatial_pointer_camera::Camera;
//! use spatial_pointer_input::InputState;
//! use spatial_pointer_ui3d::{Button3D, InteractionManager};
//! use glam::Vec3;
//!
//! let mut manager = InteractionManager::new();
//! manager.add_button(
//!     Button3D::new(Vec3::new(0.0, 1.0, -1.2), "next").on_selected(|| println!("next")),
//! );
//!
//! let camera = Camera::default();
//! let input = InputState::new(1280, 720);
//!
//! // In your frame loop:
//! let report = manager.update(&input.snapshot(), &camera).unwrap();
//! ```

pub mod components;
pub mod interaction;
pub mod manager;

// Re-export commonly used types
pub use components::{
    AppliedAttributes, Attributes, Button3D, ButtonStyle, InteractiveObject, Material, OnEnter,
    StateChange, StateSetup, Transform3D,
};
pub use interaction::{
    drive_frame, resolve, target_state, Aabb, CandidateSet, HitCandidate, HitProxy, HitShape,
    Intersection, Quad, Sphere, Transition, Triangle,
};
pub use manager::{FrameReport, InteractionManager};

/// Version of the UI3D crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
