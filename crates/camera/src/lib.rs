#![warn(missing_docs)]
//! Perspective camera used to project device pointer coordinates into the scene.

use glam::{Mat4, Vec2, Vec3};
use spatial_pointer_core::{InteractionError, Ray};

/// Perspective camera with position, orientation, and projection.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Horizontal rotation in radians (around Y axis).
    pub yaw: f32,
    /// Vertical rotation in radians (around local X axis).
    pub pitch: f32,

    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect: f32,
    /// Near clipping plane distance.
    pub near: f32,
    /// Far clipping plane distance.
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.6, 0.0),
            yaw: -std::f32::consts::FRAC_PI_2, // looking down -Z
            pitch: 0.0,
            fov: 75f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl Camera {
    /// Create a new camera with the given position.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Builder: orient the camera towards `target`.
    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.look_at(target);
        self
    }

    /// Builder: set the vertical field of view in degrees.
    pub fn with_fov_degrees(mut self, degrees: f32) -> Self {
        self.fov = degrees.to_radians();
        self
    }

    /// Builder: set the clipping planes.
    pub fn with_clip(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Orient the camera towards `target`. Does nothing if the target is the
    /// camera position.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(dir) = (target - self.position).try_normalize() else {
            return;
        };
        const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
        self.pitch = dir.y.asin().clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = dir.z.atan2(dir.x);
    }

    /// Get the forward direction vector (where camera is looking).
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    /// Get the right direction vector (camera's local X axis).
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Get the up direction vector (camera's local Y axis).
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    /// Compute the projection matrix (camera space -> clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio (call when window resizes).
    ///
    /// A zero-sized viewport (minimized window) keeps the previous ratio.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    /// Cast a world-space ray through normalized device coordinates.
    ///
    /// `ndc` is in `[-1, 1]` on both axes with +Y up. The ray starts at the
    /// camera position and passes through the matching far-plane point.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Result<Ray, InteractionError> {
        let inv_view_proj = self.view_projection_matrix().inverse();
        let far_point = inv_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far_point - self.position)
    }

    /// Project a world-space point to normalized device coordinates.
    pub fn world_to_ndc(&self, point: Vec3) -> Vec2 {
        self.view_projection_matrix().project_point3(point).truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_default_initialization() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 1.6, 0.0));
        assert_eq!(camera.pitch, 0.0);
        assert!((camera.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn look_at_points_forward_at_target() {
        let target = Vec3::new(0.0, 1.0, -1.8);
        let camera = Camera::new(Vec3::new(0.0, 1.6, 0.0)).looking_at(target);
        let expected = (target - camera.position).normalize();
        assert!((camera.forward() - expected).length() < 1e-4);
    }

    #[test]
    fn center_ray_follows_forward() {
        let camera = Camera::new(Vec3::new(1.0, 2.0, 3.0)).looking_at(Vec3::new(4.0, 0.0, -2.0));
        let ray = camera.ray_from_ndc(Vec2::ZERO).unwrap();
        assert_eq!(ray.origin(), camera.position);
        assert!((ray.direction() - camera.forward()).length() < 1e-3);
    }

    #[test]
    fn edge_rays_spread_along_camera_axes() {
        let camera = Camera::default();
        let right = camera.ray_from_ndc(Vec2::new(1.0, 0.0)).unwrap();
        let up = camera.ray_from_ndc(Vec2::new(0.0, 1.0)).unwrap();
        assert!(right.direction().dot(camera.right()) > 0.1);
        assert!(up.direction().dot(camera.up()) > 0.1);

        // The top edge sits half the vertical FOV above the forward axis.
        let angle = up.direction().angle_between(camera.forward());
        assert!((angle - camera.fov * 0.5).abs() < 1e-3);
    }

    #[test]
    fn projected_point_lies_on_its_ray() {
        let camera = Camera::default().looking_at(Vec3::new(0.0, 1.0, -1.8));
        let point = Vec3::new(0.3, 0.7, -1.4);
        let ray = camera.ray_from_ndc(camera.world_to_ndc(point)).unwrap();
        let expected = (point - camera.position).normalize();
        assert!((ray.direction() - expected).length() < 1e-3);
    }

    #[test]
    fn set_aspect_ignores_zero_sized_viewport() {
        let mut camera = Camera::default();
        camera.set_aspect(800, 400);
        assert_eq!(camera.aspect, 2.0);
        camera.set_aspect(0, 400);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn camera_matrices_are_valid() {
        let camera = Camera::default();

        let view = camera.view_matrix();
        let proj = camera.projection_matrix();
        let view_proj = camera.view_projection_matrix();

        assert!(!view.to_cols_array().iter().all(|&x| x == 0.0));
        assert!(!proj.to_cols_array().iter().all(|&x| x == 0.0));
        assert!(view.to_cols_array().iter().all(|x| x.is_finite()));
        assert!(proj.to_cols_array().iter().all(|x| x.is_finite()));
        assert!(view_proj.to_cols_array().iter().all(|x| x.is_finite()));
    }
}
