//! Interaction manager - runs the pointer pipeline once per frame

use crate::components::{Button3D, InteractiveObject};
use crate::interaction::{drive_frame, CandidateSet, HitProxy, Intersection, Transition};
use glam::Vec3;
use spatial_pointer_camera::Camera;
use spatial_pointer_core::{FrameIndex, InteractionError, ObjectHandle, Ray, StateName};
use spatial_pointer_input::{FrameInput, PointerSource};
use std::collections::BTreeMap;
use tracing::{debug, error, trace};

/// Everything that happened during one [`InteractionManager::update`].
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// Frame that was processed.
    pub frame: FrameIndex,
    /// Which pointer produced the ray.
    pub source: PointerSource,
    /// Ray cast this frame, if any.
    pub ray: Option<Ray>,
    /// Closest hit, interactive or not.
    pub hit: Option<Intersection>,
    /// Interactive object that won the hit test.
    pub winner: Option<ObjectHandle>,
    /// State entries performed, winner first.
    pub transitions: Vec<Transition>,
    /// Pointer indicator position (controller rays only).
    pub indicator: Option<Vec3>,
}

impl FrameReport {
    /// Transitions that moved an object to a different state.
    pub fn changes(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(|t| t.changed())
    }
}

/// Owns the hit-test candidates and interactive objects of a scene
pub struct InteractionManager {
    candidates: CandidateSet,
    /// Keyed by handle, so iteration follows registration order.
    objects: BTreeMap<ObjectHandle, InteractiveObject>,
    primary_controller: usize,
    max_distance: Option<f32>,
    frame: FrameIndex,
    indicator: Option<Vec3>,
}

impl Default for InteractionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionManager {
    /// Create an empty manager driven by controller 0.
    pub fn new() -> Self {
        Self {
            candidates: CandidateSet::new(),
            objects: BTreeMap::new(),
            primary_controller: 0,
            max_distance: None,
            frame: FrameIndex::ZERO,
            indicator: None,
        }
    }

    /// Builder: controller whose ray drives hit testing while presenting.
    pub fn with_primary_controller(mut self, index: usize) -> Self {
        self.primary_controller = index;
        self
    }

    /// Builder: ignore hits farther than `distance`.
    pub fn with_max_distance(mut self, distance: Option<f32>) -> Self {
        self.max_distance = distance;
        self
    }

    /// Register an interactive object with its hit-test geometry.
    pub fn add_interactive(&mut self, object: InteractiveObject, proxy: HitProxy) -> ObjectHandle {
        let handle = self.candidates.register(proxy);
        debug!(%handle, label = object.label(), "registered interactive object");
        self.objects.insert(handle, object);
        handle
    }

    /// Register a button.
    pub fn add_button(&mut self, button: Button3D) -> ObjectHandle {
        let (object, proxy) = button.into_parts();
        self.add_interactive(object, proxy)
    }

    /// Register geometry that blocks rays but has no states.
    pub fn add_occluder(&mut self, proxy: HitProxy) -> ObjectHandle {
        let handle = self.candidates.register(proxy);
        debug!(%handle, "registered occluder");
        handle
    }

    /// Unregister a candidate (interactive or occluder).
    pub fn remove(&mut self, handle: ObjectHandle) -> Result<(), InteractionError> {
        self.candidates
            .unregister(handle)
            .ok_or(InteractionError::UnknownObject(handle))?;
        self.objects.remove(&handle);
        Ok(())
    }

    /// Replace the hit-test geometry of a candidate.
    pub fn set_proxy(&mut self, handle: ObjectHandle, proxy: HitProxy) -> Result<(), InteractionError> {
        if self.candidates.update_proxy(handle, proxy) {
            Ok(())
        } else {
            Err(InteractionError::UnknownObject(handle))
        }
    }

    /// Enable or disable pointer interaction for an object.
    ///
    /// Disabling an object that is not idle enters `idle` once, since the
    /// per-frame drive skips non-interactive objects.
    pub fn set_interactive(&mut self, handle: ObjectHandle, interactive: bool) -> Result<(), InteractionError> {
        let object = self
            .objects
            .get_mut(&handle)
            .ok_or(InteractionError::UnknownObject(handle))?;
        object.set_interactive(interactive);
        if !interactive && object.current_state() != &StateName::IDLE {
            object.set_state(&StateName::IDLE).map_err(|err| {
                error!(object = %handle, %err, "failed to idle disabled object");
                InteractionError::UnknownState {
                    object: handle,
                    state: StateName::IDLE,
                }
            })?;
            debug!(object = %handle, "disabled object returned to idle");
        }
        Ok(())
    }

    /// Force an object into a state, outside of the per-frame rule.
    pub fn set_state(&mut self, handle: ObjectHandle, state: &StateName) -> Result<Transition, InteractionError> {
        let object = self
            .objects
            .get_mut(&handle)
            .ok_or(InteractionError::UnknownObject(handle))?;
        let change = object.set_state(state).map_err(|_| InteractionError::UnknownState {
            object: handle,
            state: state.clone(),
        })?;
        Ok(Transition {
            handle,
            from: change.from,
            to: change.to,
        })
    }

    /// Look up an interactive object.
    pub fn object(&self, handle: ObjectHandle) -> Option<&InteractiveObject> {
        self.objects.get(&handle)
    }

    /// Current state of an interactive object.
    pub fn state_of(&self, handle: ObjectHandle) -> Option<&StateName> {
        self.objects.get(&handle).map(InteractiveObject::current_state)
    }

    /// Where the controller pointer dot should be drawn, if anywhere.
    pub fn pointer_indicator(&self) -> Option<Vec3> {
        self.indicator
    }

    /// Number of frames processed so far.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Number of registered candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Run one frame: pick the pointer, cast its ray, resolve the closest
    /// hit, and drive every interactive object.
    pub fn update(&mut self, input: &FrameInput, camera: &Camera) -> Result<FrameReport, InteractionError> {
        let frame = self.frame;
        let sample = input.pointer_sample(self.primary_controller);
        let source = sample.source();
        let ray = sample.resolve_ray(camera).map_err(|err| {
            error!(%err, ?source, "failed to build pointer ray");
            err
        })?;

        let hit = ray.and_then(|ray| self.candidates.resolve(&ray, self.max_distance));
        let winner = hit
            .map(|hit| hit.handle)
            .filter(|handle| self.objects.get(handle).is_some_and(InteractiveObject::is_interactive));

        self.indicator = match source {
            PointerSource::Controller(_) => hit.map(|hit| hit.point),
            _ => None,
        };

        trace!(frame = frame.0, ?source, ?hit, ?winner, engaged = input.engaged, "resolved pointer");

        let transitions = drive_frame(
            self.objects.iter_mut().map(|(handle, object)| (*handle, object)),
            winner,
            input.engaged,
        )?;

        for transition in transitions.iter().filter(|t| t.changed()) {
            debug!(
                frame = frame.0,
                object = %transition.handle,
                from = %transition.from,
                to = %transition.to,
                "state changed"
            );
        }

        self.frame = frame.advance(1);
        Ok(FrameReport {
            frame,
            source,
            ray,
            hit,
            winner,
            transitions,
            indicator: self.indicator,
        })
    }
}
