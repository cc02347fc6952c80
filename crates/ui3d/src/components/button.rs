//! Interactive 3D Button Component

use super::attributes::{Attributes, Material};
use super::interactive::{InteractiveObject, StateSetup};
use super::Transform3D;
use crate::interaction::{HitProxy, Quad};
use glam::{Quat, Vec2, Vec3};
use spatial_pointer_core::StateName;

/// Attribute sets for the three pointer states
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyle {
    /// Nothing points at the button
    pub idle: Attributes,
    /// Pointer is over the button
    pub hovered: Attributes,
    /// Pointer is over the button and engaged
    pub selected: Attributes,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        let glass = Material::translucent([1.0, 1.0, 1.0, 1.0], 0.5);
        let solid = Material::solid([1.0, 1.0, 1.0, 1.0]);
        Self {
            idle: Attributes::new().with_offset(0.05).with_background(glass),
            hovered: Attributes::new().with_offset(0.05).with_background(solid),
            selected: Attributes::new().with_offset(0.02).with_background(solid),
        }
    }
}

/// Interactive 3D button with text label
pub struct Button3D {
    /// Button transform (position, rotation, scale)
    pub transform: Transform3D,

    /// Button label text
    pub text: String,

    /// Attribute sets per state
    pub style: ButtonStyle,

    /// Button size (width, height)
    pub size: (f32, f32),

    /// Disabled buttons still block rays but never change state
    pub disabled: bool,

    on_idle: Option<Box<dyn FnMut()>>,
    on_hovered: Option<Box<dyn FnMut()>>,
    on_selected: Option<Box<dyn FnMut()>>,
}

impl Default for Button3D {
    fn default() -> Self {
        Self {
            transform: Transform3D::default(),
            text: String::new(),
            style: ButtonStyle::default(),
            size: (0.5, 0.2),
            disabled: false,
            on_idle: None,
            on_hovered: None,
            on_selected: None,
        }
    }
}

impl Button3D {
    /// Create a new 3D button
    pub fn new(position: Vec3, text: impl Into<String>) -> Self {
        Self {
            transform: Transform3D::new(position),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Builder: Set button size
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = (width, height);
        self
    }

    /// Builder: Set orientation
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.transform = self.transform.with_rotation(rotation);
        self
    }

    /// Builder: Set scale. The hit proxy grows with it.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.transform = self.transform.with_scale(scale);
        self
    }

    /// Builder: Set state style
    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: Disable pointer interaction
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Builder: Callback run every frame the button is idle
    pub fn on_idle(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_idle = Some(Box::new(callback));
        self
    }

    /// Builder: Callback run every frame the button is hovered
    pub fn on_hovered(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_hovered = Some(Box::new(callback));
        self
    }

    /// Builder: Callback run every frame the button is selected
    pub fn on_selected(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_selected = Some(Box::new(callback));
        self
    }

    /// Hit-test geometry: a double-sided quad the size of the button.
    pub fn hit_proxy(&self) -> HitProxy {
        let scale = self.transform.scale;
        let size = Vec2::new(self.size.0 * scale.x, self.size.1 * scale.y);
        HitProxy::single(Quad::new(
            self.transform.position,
            self.transform.rotation,
            size,
        ))
    }

    /// Split into the state-machine object and its hit proxy.
    pub fn into_parts(self) -> (InteractiveObject, HitProxy) {
        let proxy = self.hit_proxy();
        let Button3D {
            text,
            style,
            disabled,
            on_idle,
            on_hovered,
            on_selected,
            ..
        } = self;

        let mut object = InteractiveObject::new(text).with_interactive(!disabled);
        for (name, attributes, callback) in [
            (StateName::IDLE, style.idle, on_idle),
            (StateName::HOVERED, style.hovered, on_hovered),
            (StateName::SELECTED, style.selected, on_selected),
        ] {
            let mut setup = StateSetup::new(name).attributes(attributes);
            if let Some(callback) = callback {
                setup = setup.on_enter(callback);
            }
            object.setup_state(setup);
        }
        (object, proxy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spatial_pointer_core::Ray;

    #[test]
    fn test_button_creation() {
        let button = Button3D::new(Vec3::ZERO, "next");
        assert_eq!(button.text, "next");
        assert!(!button.disabled);

        let (object, _) = button.into_parts();
        assert_eq!(object.label(), "next");
        assert_eq!(object.current_state(), &StateName::IDLE);
        assert!(object.is_interactive());
        for state in [StateName::IDLE, StateName::HOVERED, StateName::SELECTED] {
            assert!(object.has_state(&state));
        }
    }

    #[test]
    fn test_button_states_apply_style() {
        let (mut object, _) = Button3D::new(Vec3::ZERO, "Test").into_parts();

        object.set_state(&StateName::SELECTED).unwrap();
        assert_eq!(object.attributes().offset, 0.02);
        assert_eq!(object.attributes().background.opacity, 1.0);

        object.set_state(&StateName::IDLE).unwrap();
        assert_eq!(object.attributes().offset, 0.05);
        assert_eq!(object.attributes().background.opacity, 0.5);
    }

    #[test]
    fn test_button_builder() {
        let button = Button3D::new(Vec3::ZERO, "Test")
            .with_size(3.0, 1.0)
            .with_disabled(true);

        assert_eq!(button.size, (3.0, 1.0));
        let (object, _) = button.into_parts();
        assert!(!object.is_interactive());
    }

    #[test]
    fn test_button_callbacks_are_wired() {
        use std::cell::Cell;
        use std::rc::Rc;

        let presses = Rc::new(Cell::new(0));
        let counter = Rc::clone(&presses);
        let (mut object, _) = Button3D::new(Vec3::ZERO, "next")
            .on_selected(move || counter.set(counter.get() + 1))
            .into_parts();

        object.set_state(&StateName::HOVERED).unwrap();
        assert_eq!(presses.get(), 0);
        object.set_state(&StateName::SELECTED).unwrap();
        assert_eq!(presses.get(), 1);
    }

    #[test]
    fn test_button_hit_proxy_matches_size() {
        let button = Button3D::new(Vec3::new(0.0, 0.0, -2.0), "Test").with_size(1.0, 0.5);
        let proxy = button.hit_proxy();
        let center = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let edge = Ray::new(Vec3::new(0.6, 0.0, 0.0), Vec3::NEG_Z).unwrap();
        assert!((proxy.ray_intersection(&center).unwrap() - 2.0).abs() < 1e-4);
        assert!(proxy.ray_intersection(&edge).is_none());
    }

    #[test]
    fn test_button_scale_grows_hit_proxy() {
        let edge = Ray::new(Vec3::new(0.6, 0.0, 0.0), Vec3::NEG_Z).unwrap();
        let plain = Button3D::new(Vec3::new(0.0, 0.0, -2.0), "Test").with_size(1.0, 0.5);
        assert!(plain.hit_proxy().ray_intersection(&edge).is_none());

        let scaled = Button3D::new(Vec3::new(0.0, 0.0, -2.0), "Test")
            .with_size(1.0, 0.5)
            .with_scale(Vec3::new(1.5, 1.0, 1.0));
        assert_eq!(scaled.transform.scale, Vec3::new(1.5, 1.0, 1.0));
        let distance = scaled.hit_proxy().ray_intersection(&edge).unwrap();
        assert!((distance - 2.0).abs() < 1e-4);

        // Height is unscaled, so the quad still ends at 0.25.
        let above = Ray::new(Vec3::new(0.0, 0.3, 0.0), Vec3::NEG_Z).unwrap();
        assert!(scaled.hit_proxy().ray_intersection(&above).is_none());
    }
}
