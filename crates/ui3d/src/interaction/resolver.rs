//! Closest-hit resolution over the registered candidate set.

use super::raycaster::HitProxy;
use glam::Vec3;
use serde::Serialize;
use spatial_pointer_core::{ObjectHandle, Ray};

/// A registered hit-testable object.
#[derive(Debug, Clone, PartialEq)]
pub struct HitCandidate {
    /// Identity handed out at registration.
    pub handle: ObjectHandle,
    /// World-space hit-test geometry.
    pub proxy: HitProxy,
}

/// The nearest hit of a ray against the candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Intersection {
    /// Winning candidate.
    pub handle: ObjectHandle,
    /// Distance from the ray origin, never negative.
    pub distance: f32,
    /// World-space hit point.
    #[serde(serialize_with = "serialize_vec3")]
    pub point: Vec3,
}

fn serialize_vec3<S: serde::Serializer>(v: &Vec3, s: S) -> Result<S::Ok, S::Error> {
    v.to_array().serialize(s)
}

/// Find the globally closest hit among `candidates`.
///
/// Candidates are visited in the order given; an exact distance tie keeps the
/// earlier candidate. Hits farther than `max_distance` are ignored.
pub fn resolve<'a, I>(ray: &Ray, candidates: I, max_distance: Option<f32>) -> Option<Intersection>
where
    I: IntoIterator<Item = &'a HitCandidate>,
{
    let limit = max_distance.unwrap_or(f32::INFINITY);
    candidates
        .into_iter()
        .filter_map(|candidate| {
            candidate
                .proxy
                .ray_intersection(ray)
                .filter(|distance| *distance <= limit)
                .map(|distance| (candidate.handle, distance))
        })
        .fold(None, |closest: Option<(ObjectHandle, f32)>, (handle, distance)| match closest {
            Some((_, best)) if best <= distance => closest,
            _ => Some((handle, distance)),
        })
        .map(|(handle, distance)| Intersection {
            handle,
            distance,
            point: ray.at(distance),
        })
}

/// Flat, registration-ordered set of hit-test candidates.
#[derive(Debug)]
pub struct CandidateSet {
    candidates: Vec<HitCandidate>,
    next_handle: u64,
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            candidates: Vec::new(),
            next_handle: 1,
        }
    }

    /// Register a candidate and return its handle.
    pub fn register(&mut self, proxy: HitProxy) -> ObjectHandle {
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        self.candidates.push(HitCandidate { handle, proxy });
        handle
    }

    /// Remove a candidate, keeping the relative order of the rest.
    pub fn unregister(&mut self, handle: ObjectHandle) -> Option<HitCandidate> {
        let index = self.candidates.iter().position(|c| c.handle == handle)?;
        Some(self.candidates.remove(index))
    }

    /// Replace the geometry of a registered candidate (e.g. after it moved).
    /// Returns `false` if the handle is unknown.
    pub fn update_proxy(&mut self, handle: ObjectHandle, proxy: HitProxy) -> bool {
        match self.candidates.iter_mut().find(|c| c.handle == handle) {
            Some(candidate) => {
                candidate.proxy = proxy;
                true
            }
            None => false,
        }
    }

    /// Look up a candidate.
    pub fn get(&self, handle: ObjectHandle) -> Option<&HitCandidate> {
        self.candidates.iter().find(|c| c.handle == handle)
    }

    /// Candidates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &HitCandidate> {
        self.candidates.iter()
    }

    /// Number of registered candidates.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether no candidate is registered.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Closest hit of `ray` against every registered candidate.
    pub fn resolve(&self, ray: &Ray, max_distance: Option<f32>) -> Option<Intersection> {
        resolve(ray, &self.candidates, max_distance)
    }
}
