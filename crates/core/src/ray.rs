//! World-space rays.

use crate::InteractionError;
use glam::Vec3;

/// A ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`.
    pub fn new(origin: Vec3, direction: Vec3) -> Result<Self, InteractionError> {
        let direction = direction
            .try_normalize()
            .ok_or(InteractionError::DegenerateRay)?;
        if !origin.is_finite() {
            return Err(InteractionError::DegenerateRay);
        }
        Ok(Self { origin, direction })
    }

    /// Ray start point.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Unit direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_is_normalized() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -4.0)).unwrap();
        assert_eq!(ray.direction(), Vec3::NEG_Z);
        assert_eq!(ray.at(2.5), Vec3::new(0.0, 0.0, -2.5));
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert_eq!(
            Ray::new(Vec3::ONE, Vec3::ZERO),
            Err(InteractionError::DegenerateRay)
        );
        assert!(Ray::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::X).is_err());
    }
}
