//! Property-based tests for closest-hit resolution and idle forcing
//!
//! Validates resolver invariants:
//! - The reported candidate has the minimum distance of all hit candidates
//! - Exact ties always go to the first registered candidate
//! - Distances are never negative
//! - Every interactive object that is not the winner ends the frame idle

use glam::{Vec2, Vec3};
use proptest::prelude::*;
use spatial_pointer_core::{ObjectHandle, Ray, StateName};
use spatial_pointer_input::FrameInput;
use spatial_pointer_camera::Camera;
use spatial_pointer_ui3d::{Aabb, Button3D, CandidateSet, HitProxy, InteractionManager, Sphere};

fn sphere_strategy() -> impl Strategy<Value = (f32, f32, f32, f32)> {
    (-5.0f32..5.0, -5.0f32..5.0, -30.0f32..30.0, 0.1f32..3.0)
}

proptest! {
    /// Property: the winner is the candidate with the smallest distance
    #[test]
    fn resolve_returns_minimum_distance(
        spheres in prop::collection::vec(sphere_strategy(), 1..40),
        dir in (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..-0.1),
    ) {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(dir.0, dir.1, dir.2)).unwrap();
        let mut set = CandidateSet::new();
        let mut proxies = Vec::new();
        for (x, y, z, r) in spheres {
            let proxy = HitProxy::single(Sphere::new(Vec3::new(x, y, z), r));
            let handle = set.register(proxy.clone());
            proxies.push((handle, proxy));
        }

        let best = proxies
            .iter()
            .filter_map(|(handle, proxy)| proxy.ray_intersection(&ray).map(|d| (*handle, d)))
            .fold(None, |acc: Option<(ObjectHandle, f32)>, (h, d)| match acc {
                Some((_, best)) if best <= d => acc,
                _ => Some((h, d)),
            });

        match (set.resolve(&ray, None), best) {
            (None, None) => {}
            (Some(hit), Some((handle, distance))) => {
                prop_assert_eq!(hit.handle, handle);
                prop_assert!(hit.distance >= 0.0);
                prop_assert!((hit.distance - distance).abs() < 1e-5);
                for (_, proxy) in &proxies {
                    if let Some(d) = proxy.ray_intersection(&ray) {
                        prop_assert!(hit.distance <= d);
                    }
                }
            }
            (got, expected) => prop_assert!(false, "resolve {:?} vs brute force {:?}", got, expected),
        }
    }

    /// Property: identical candidates resolve to the first registered one
    #[test]
    fn exact_ties_are_first_registered(
        copies in 2usize..10,
        z in -20.0f32..-2.0,
        size in 0.5f32..2.0,
    ) {
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z).unwrap();
        let mut set = CandidateSet::new();
        let handles: Vec<_> = (0..copies)
            .map(|_| set.register(HitProxy::single(Aabb::from_center_size(Vec3::new(0.0, 0.0, z), Vec3::splat(size)))))
            .collect();
        let hit = set.resolve(&ray, None).unwrap();
        prop_assert_eq!(hit.handle, handles[0]);
    }

    /// Property: only the winner can leave idle; everyone else is idle
    #[test]
    fn non_winners_end_idle(
        xs in prop::collection::vec(-4.0f32..4.0, 1..8),
        pointer in (-1.0f32..1.0, -1.0f32..1.0),
        engaged in any::<bool>(),
        frames in 1usize..4,
    ) {
        let mut manager = InteractionManager::new();
        let handles: Vec<_> = xs
            .iter()
            .enumerate()
            .map(|(i, x)| manager.add_button(
                Button3D::new(Vec3::new(*x, 0.0, -3.0 - i as f32 * 0.01), format!("b{i}")).with_size(0.8, 0.8),
            ))
            .collect();
        let camera = Camera::new(Vec3::ZERO);
        let input = FrameInput {
            device: Some(Vec2::new(pointer.0, pointer.1)),
            engaged,
            ..Default::default()
        };

        let mut report = manager.update(&input, &camera).unwrap();
        for _ in 1..frames {
            report = manager.update(&input, &camera).unwrap();
        }

        for handle in handles {
            let state = manager.state_of(handle).unwrap();
            if Some(handle) == report.winner {
                let expected = if engaged { StateName::SELECTED } else { StateName::HOVERED };
                prop_assert_eq!(state, &expected);
            } else {
                prop_assert_eq!(state, &StateName::IDLE);
            }
        }
        prop_assert_eq!(report.transitions.len(), xs.len());
    }
}
