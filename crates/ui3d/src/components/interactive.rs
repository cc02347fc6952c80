//! Interactive objects with named states.
//!
//! An object starts in [`StateName::IDLE`]. States are registered with
//! [`InteractiveObject::setup_state`] and activated with
//! [`InteractiveObject::set_state`], which applies the state's attributes
//! and runs its on-entry callback every time it is called, including when
//! the object is already in that state.

use super::attributes::{AppliedAttributes, Attributes};
use spatial_pointer_core::{InteractionError, StateName};
use std::collections::HashMap;
use std::fmt;
use tracing::debug;

/// Side effect run when an object enters a state.
pub type OnEnter = Box<dyn FnMut()>;

/// Options for registering one state.
pub struct StateSetup {
    name: StateName,
    attributes: Attributes,
    on_enter: Option<OnEnter>,
}

impl StateSetup {
    /// Start describing the state `name`.
    pub fn new(name: StateName) -> Self {
        Self {
            name,
            attributes: Attributes::default(),
            on_enter: None,
        }
    }

    /// Builder: attributes applied on entry.
    pub fn attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Builder: callback run on entry.
    pub fn on_enter(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_enter = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for StateSetup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateSetup")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("on_enter", &self.on_enter.is_some())
            .finish()
    }
}

struct RegisteredState {
    attributes: Attributes,
    on_enter: Option<OnEnter>,
}

/// Outcome of a [`InteractiveObject::set_state`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChange {
    /// State before the call.
    pub from: StateName,
    /// State after the call.
    pub to: StateName,
}

impl StateChange {
    /// Whether the call moved the object to a different state.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// UI element driven by the pointer state machine.
pub struct InteractiveObject {
    label: String,
    interactive: bool,
    current: StateName,
    applied: AppliedAttributes,
    states: HashMap<StateName, RegisteredState>,
}

impl InteractiveObject {
    /// Create an interactive object in the `idle` state with no registered states.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            interactive: true,
            current: StateName::IDLE,
            applied: AppliedAttributes::default(),
            states: HashMap::new(),
        }
    }

    /// Builder: initial attribute values shown before any state is entered.
    pub fn with_attributes(mut self, applied: AppliedAttributes) -> Self {
        self.applied = applied;
        self
    }

    /// Builder: whether the pointer pipeline drives this object.
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Builder form of [`InteractiveObject::setup_state`].
    pub fn with_state(mut self, setup: StateSetup) -> Self {
        self.setup_state(setup);
        self
    }

    /// Register (or replace) a state.
    pub fn setup_state(&mut self, setup: StateSetup) -> &mut Self {
        let StateSetup {
            name,
            attributes,
            on_enter,
        } = setup;
        let replaced = self
            .states
            .insert(
                name.clone(),
                RegisteredState {
                    attributes,
                    on_enter,
                },
            )
            .is_some();
        if replaced {
            debug!(label = %self.label, state = %name, "replaced state registration");
        }
        self
    }

    /// Enter `name`: apply its attributes and run its callback.
    ///
    /// Entering the current state again re-applies and re-runs; callers that
    /// only care about changes can check [`StateChange::changed`].
    pub fn set_state(&mut self, name: &StateName) -> Result<StateChange, InteractionError> {
        let state = self
            .states
            .get_mut(name)
            .ok_or_else(|| InteractionError::UnregisteredState(name.clone()))?;
        state.attributes.apply_to(&mut self.applied);
        let from = std::mem::replace(&mut self.current, name.clone());
        if let Some(on_enter) = state.on_enter.as_mut() {
            on_enter();
        }
        Ok(StateChange {
            from,
            to: name.clone(),
        })
    }

    /// Current state.
    pub fn current_state(&self) -> &StateName {
        &self.current
    }

    /// Whether `name` has been registered.
    pub fn has_state(&self, name: &StateName) -> bool {
        self.states.contains_key(name)
    }

    /// Attribute values currently shown.
    pub fn attributes(&self) -> &AppliedAttributes {
        &self.applied
    }

    /// Whether the pointer pipeline drives this object.
    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Enable or disable pointer interaction.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Human-readable label used in logs.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for InteractiveObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut states: Vec<&str> = self.states.keys().map(StateName::as_str).collect();
        states.sort_unstable();
        f.debug_struct("InteractiveObject")
            .field("label", &self.label)
            .field("interactive", &self.interactive)
            .field("current", &self.current)
            .field("applied", &self.applied)
            .field("states", &states)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting(counter: &Rc<Cell<u32>>) -> impl FnMut() + 'static {
        let counter = Rc::clone(counter);
        move || counter.set(counter.get() + 1)
    }

    #[test]
    fn starts_idle() {
        let object = InteractiveObject::new("button");
        assert_eq!(object.current_state(), &StateName::IDLE);
        assert!(object.is_interactive());
    }

    #[test]
    fn unregistered_state_is_an_error() {
        let mut object = InteractiveObject::new("button");
        let err = object.set_state(&StateName::HOVERED).unwrap_err();
        assert_eq!(err, InteractionError::UnregisteredState(StateName::HOVERED));
        assert_eq!(object.current_state(), &StateName::IDLE);
    }

    #[test]
    fn entering_applies_attributes_and_runs_callback() {
        let fired = Rc::new(Cell::new(0));
        let mut object = InteractiveObject::new("button").with_state(
            StateSetup::new(StateName::HOVERED)
                .attributes(Attributes::new().with_offset(0.05))
                .on_enter(counting(&fired)),
        );

        let change = object.set_state(&StateName::HOVERED).unwrap();
        assert!(change.changed());
        assert_eq!(change.from, StateName::IDLE);
        assert_eq!(object.current_state(), &StateName::HOVERED);
        assert_eq!(object.attributes().offset, 0.05);
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn reentering_current_state_fires_again() {
        let fired = Rc::new(Cell::new(0));
        let mut object = InteractiveObject::new("button").with_state(
            StateSetup::new(StateName::SELECTED)
                .attributes(Attributes::new().with_offset(0.02))
                .on_enter(counting(&fired)),
        );

        object.set_state(&StateName::SELECTED).unwrap();
        let before = *object.attributes();
        let change = object.set_state(&StateName::SELECTED).unwrap();

        assert!(!change.changed());
        assert_eq!(*object.attributes(), before);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn setup_replaces_existing_state() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut object = InteractiveObject::new("button");
        object.setup_state(StateSetup::new(StateName::IDLE).on_enter(counting(&first)));
        object.setup_state(StateSetup::new(StateName::IDLE).on_enter(counting(&second)));

        object.set_state(&StateName::IDLE).unwrap();
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn custom_states_can_be_registered() {
        let disabled = StateName::parse("disabled").unwrap();
        let mut object = InteractiveObject::new("button")
            .with_state(StateSetup::new(disabled.clone()).attributes(Attributes::new().with_visible(false)));
        assert!(object.has_state(&disabled));
        object.set_state(&disabled).unwrap();
        assert!(!object.attributes().visible);
    }
}
