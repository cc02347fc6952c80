//! Reference scene: a room, three primitives, and a two-button panel.

use crate::config::InteractionConfig;
use glam::{Quat, Vec3};
use spatial_pointer_core::ObjectHandle;
use spatial_pointer_ui3d::{Aabb, Button3D, HitProxy, InteractionManager};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::info;

/// Primitive shapes shown one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Sphere,
    Box,
    Cone,
}

impl Primitive {
    pub const ALL: [Primitive; 3] = [Primitive::Sphere, Primitive::Box, Primitive::Cone];

    pub fn name(self) -> &'static str {
        match self {
            Primitive::Sphere => "sphere",
            Primitive::Box => "box",
            Primitive::Cone => "cone",
        }
    }
}

/// Which primitive is visible. Exactly one is shown at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrimitiveCarousel {
    current: usize,
}

impl PrimitiveCarousel {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_primitive(&self) -> Primitive {
        Primitive::ALL[self.current]
    }

    pub fn is_visible(&self, index: usize) -> bool {
        index == self.current
    }

    pub fn next(&mut self) {
        self.current = (self.current + 1) % Primitive::ALL.len();
    }

    pub fn previous(&mut self) {
        self.current = self
            .current
            .checked_sub(1)
            .unwrap_or(Primitive::ALL.len() - 1);
    }
}

// Panel placement, in world space.
const PANEL_CENTER: Vec3 = Vec3::new(0.0, 0.6, -1.2);
const PANEL_TILT: f32 = -0.55;
const BUTTON_SIZE: (f32, f32) = (0.5, 0.2);
const BUTTON_MARGIN: f32 = 0.05;

/// Named pointer targets that scripts can aim at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Next,
    Previous,
}

impl Target {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "next" => Some(Target::Next),
            "previous" => Some(Target::Previous),
            _ => None,
        }
    }
}

/// The assembled scene and the shared state its callbacks mutate.
pub struct Showcase {
    pub manager: InteractionManager,
    pub carousel: Rc<RefCell<PrimitiveCarousel>>,
    pub room: ObjectHandle,
    pub next: ObjectHandle,
    pub previous: ObjectHandle,
}

impl Showcase {
    pub fn build(config: &InteractionConfig) -> Self {
        let mut manager = InteractionManager::new()
            .with_primary_controller(config.primary_controller)
            .with_max_distance(config.max_distance);
        let carousel = Rc::new(RefCell::new(PrimitiveCarousel::default()));

        // The camera stands inside the room, so rays hit its far walls.
        let room = manager.add_occluder(HitProxy::single(Aabb::from_center_size(
            Vec3::new(0.0, 3.0, 0.0),
            Vec3::splat(6.0),
        )));

        let tilt = Quat::from_rotation_x(PANEL_TILT);
        let next = {
            let carousel = Rc::clone(&carousel);
            manager.add_button(
                Button3D::new(button_center(Target::Next), "next")
                    .with_size(BUTTON_SIZE.0, BUTTON_SIZE.1)
                    .with_rotation(tilt)
                    .on_selected(move || carousel.borrow_mut().next()),
            )
        };
        let previous = {
            let carousel = Rc::clone(&carousel);
            manager.add_button(
                Button3D::new(button_center(Target::Previous), "previous")
                    .with_size(BUTTON_SIZE.0, BUTTON_SIZE.1)
                    .with_rotation(tilt)
                    .on_selected(move || carousel.borrow_mut().previous()),
            )
        };

        info!(objects = manager.len(), "showcase scene built");
        Self {
            manager,
            carousel,
            room,
            next,
            previous,
        }
    }

    pub fn current_primitive(&self) -> Primitive {
        self.carousel.borrow().current_primitive()
    }

    pub fn target_center(&self, target: Target) -> Vec3 {
        button_center(target)
    }
}

/// World-space center of a panel button. Buttons are laid out right to left.
fn button_center(target: Target) -> Vec3 {
    let step = BUTTON_SIZE.0 * 0.5 + BUTTON_MARGIN;
    let local_x = match target {
        Target::Next => step,
        Target::Previous => -step,
    };
    PANEL_CENTER + Quat::from_rotation_x(PANEL_TILT) * Vec3::new(local_x, 0.0, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spatial_pointer_camera::Camera;
    use spatial_pointer_core::{Ray, StateName};
    use spatial_pointer_input::FrameInput;

    fn aim_at(showcase: &Showcase, camera: &Camera, target: Target, engaged: bool) -> FrameInput {
        FrameInput {
            device: Some(camera.world_to_ndc(showcase.target_center(target))),
            engaged,
            ..Default::default()
        }
    }

    fn camera() -> Camera {
        Camera::default().looking_at(Vec3::new(0.0, 1.0, -1.8))
    }

    #[test]
    fn carousel_shows_exactly_one() {
        let mut carousel = PrimitiveCarousel::default();
        for _ in 0..5 {
            assert_eq!((0..3).filter(|i| carousel.is_visible(*i)).count(), 1);
            assert!(carousel.is_visible(carousel.current()));
            carousel.next();
        }
    }

    #[test]
    fn next_wraps_after_three() {
        let mut carousel = PrimitiveCarousel::default();
        carousel.next();
        assert_eq!(carousel.current(), 1);
        carousel.next();
        carousel.next();
        assert_eq!(carousel.current(), 0);
    }

    #[test]
    fn previous_from_first_goes_to_last() {
        let mut carousel = PrimitiveCarousel::default();
        carousel.previous();
        assert_eq!(carousel.current(), 2);
        assert_eq!(carousel.current_primitive(), Primitive::Cone);
    }

    #[test]
    fn clicking_next_advances_once() {
        let mut showcase = Showcase::build(&InteractionConfig::default());
        let camera = camera();

        let hover = aim_at(&showcase, &camera, Target::Next, false);
        let report = showcase.manager.update(&hover, &camera).unwrap();
        assert_eq!(report.winner, Some(showcase.next));
        assert_eq!(showcase.carousel.borrow().current(), 0);

        let press = aim_at(&showcase, &camera, Target::Next, true);
        showcase.manager.update(&press, &camera).unwrap();
        assert_eq!(showcase.manager.state_of(showcase.next), Some(&StateName::SELECTED));
        assert_eq!(showcase.current_primitive(), Primitive::Box);
        assert_eq!(showcase.manager.state_of(showcase.previous), Some(&StateName::IDLE));
    }

    #[test]
    fn clicking_previous_rewinds() {
        let mut showcase = Showcase::build(&InteractionConfig::default());
        let camera = camera();
        let press = aim_at(&showcase, &camera, Target::Previous, true);
        let report = showcase.manager.update(&press, &camera).unwrap();
        assert_eq!(report.winner, Some(showcase.previous));
        assert_eq!(showcase.current_primitive(), Primitive::Cone);
    }

    #[test]
    fn looking_away_hits_the_room() {
        let mut showcase = Showcase::build(&InteractionConfig::default());
        let ray = Ray::new(Vec3::new(0.0, 1.6, 0.0), Vec3::Y).unwrap();
        let input = FrameInput {
            presenting: true,
            controllers: vec![Some(ray)],
            engaged: true,
            ..Default::default()
        };
        let report = showcase.manager.update(&input, &camera()).unwrap();
        assert_eq!(report.hit.map(|hit| hit.handle), Some(showcase.room));
        assert_eq!(report.winner, None);
        // The ceiling is 4.4 m above the controller.
        assert!((report.hit.unwrap().distance - 4.4).abs() < 1e-4);
        assert!(showcase.manager.pointer_indicator().is_some());
    }

    #[test]
    fn target_names_parse() {
        assert_eq!(Target::parse("next"), Some(Target::Next));
        assert_eq!(Target::parse("previous"), Some(Target::Previous));
        assert_eq!(Target::parse("sphere"), None);
    }
}
