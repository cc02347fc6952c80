#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod error;
pub mod ray;
pub mod state;

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use error::InteractionError;
pub use ray::Ray;
pub use state::{StateName, StateNameError};

/// Rendering frame counter used to stamp interaction traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// First frame of any interaction session.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` frames.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Stable identity of a registered hit-test candidate.
///
/// Handles are allocated monotonically and never reused, so ordering by
/// handle is the same as ordering by registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectHandle(pub u64);

impl fmt::Display for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
