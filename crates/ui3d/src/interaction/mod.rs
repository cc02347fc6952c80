//! 3D UI Interaction System
//!
//! Ray tests against hit proxies, closest-hit resolution, and the per-frame
//! state machine that turns the resolved hit into idle / hovered / selected
//! states.

pub mod raycaster;
pub mod resolver;
pub mod state_machine;

pub use raycaster::{Aabb, HitProxy, HitShape, Quad, Sphere, Triangle};
pub use resolver::{resolve, CandidateSet, HitCandidate, Intersection};
pub use state_machine::{drive_frame, target_state, Transition};
