//! Per-frame idle / hovered / selected transitions.

use crate::components::InteractiveObject;
use serde::Serialize;
use spatial_pointer_core::{InteractionError, ObjectHandle, StateName};
use tracing::error;

/// One state entry performed during a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    /// Object that entered a state.
    pub handle: ObjectHandle,
    /// State before this frame.
    pub from: StateName,
    /// State entered this frame.
    pub to: StateName,
}

impl Transition {
    /// Whether the object actually moved to a different state.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// State an interactive object should be in for this frame.
pub fn target_state(is_winner: bool, engaged: bool) -> StateName {
    match (is_winner, engaged) {
        (true, true) => StateName::SELECTED,
        (true, false) => StateName::HOVERED,
        (false, _) => StateName::IDLE,
    }
}

/// Drive every interactive object one frame forward.
///
/// The winner (if any) is updated first, then every other interactive object
/// is forced to idle. Each interactive object enters exactly one state, so
/// its callback fires at most once per frame. Non-interactive objects are
/// skipped.
pub fn drive_frame<'a, I>(
    objects: I,
    winner: Option<ObjectHandle>,
    engaged: bool,
) -> Result<Vec<Transition>, InteractionError>
where
    I: IntoIterator<Item = (ObjectHandle, &'a mut InteractiveObject)>,
{
    let mut objects: Vec<_> = objects
        .into_iter()
        .filter(|(_, object)| object.is_interactive())
        .collect();

    if let Some(winner) = winner {
        if let Some(index) = objects.iter().position(|(handle, _)| *handle == winner) {
            let entry = objects.remove(index);
            objects.insert(0, entry);
        }
    }

    let mut transitions = Vec::with_capacity(objects.len());
    for (handle, object) in objects {
        let target = target_state(Some(handle) == winner, engaged);
        let change = object.set_state(&target).map_err(|err| {
            error!(object = %handle, label = object.label(), state = %target, %err, "state activation failed");
            InteractionError::UnknownState {
                object: handle,
                state: target.clone(),
            }
        })?;
        transitions.push(Transition {
            handle,
            from: change.from,
            to: change.to,
        });
    }
    Ok(transitions)
}
