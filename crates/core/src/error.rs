//! Usage errors raised by the interaction core.

use crate::{ObjectHandle, StateName};
use thiserror::Error;

/// Programmer errors surfaced by the interaction pipeline.
///
/// None of these are recoverable runtime conditions: they indicate a scene
/// that was constructed incorrectly and are meant to abort the frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InteractionError {
    /// A state was activated before it was registered with `setup_state`.
    #[error("state `{state}` was never registered for object {object}")]
    UnknownState {
        /// Object the state was requested on.
        object: ObjectHandle,
        /// The unregistered state name.
        state: StateName,
    },
    /// A state was activated before it was registered, reported by a lone
    /// `InteractiveObject::set_state`.
    ///
    /// The object does not know its own handle. The manager and the frame
    /// drive attach it and report [`InteractionError::UnknownState`] instead,
    /// so callers of the pipeline only ever see that variant.
    #[error("state `{0}` was never registered for this object")]
    UnregisteredState(StateName),
    /// A hit-test candidate was registered without any geometry.
    #[error("hit-test candidate has no geometry")]
    EmptyProxy,
    /// A handle does not refer to a registered object.
    #[error("object {0} is not registered")]
    UnknownObject(ObjectHandle),
    /// A ray was built from a zero-length or non-finite direction.
    #[error("ray direction must be finite and non-zero")]
    DegenerateRay,
}
