//! 3D UI Components
//!
//! Interactive objects, their visual attributes, and the button builder.

pub mod attributes;
pub mod button;
pub mod interactive;

pub use attributes::{AppliedAttributes, Attributes, Material};
pub use button::{Button3D, ButtonStyle};
pub use interactive::{InteractiveObject, OnEnter, StateChange, StateSetup};

use glam::{Quat, Vec3};

/// Transform in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Transform3D {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform3D {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }
}
