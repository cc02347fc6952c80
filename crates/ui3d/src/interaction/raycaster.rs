//! Ray intersection against hit-test primitives.
//!
//! Every test returns the nearest ray parameter `t >= 0`. Hits behind the ray
//! origin are never reported.

use glam::{Quat, Vec2, Vec3};
use spatial_pointer_core::{InteractionError, Ray};

/// Parallel-ray threshold for plane and triangle tests.
const EPSILON: f32 = 1e-6;

/// Axis-aligned bounding box in 3D space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Create an AABB from center position and size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size.abs() * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Slab test. A ray starting inside the box reports the exit distance.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let origin = ray.origin();
        let inv_dir = ray.direction().recip();

        let t1 = (self.min - origin) * inv_dir;
        let t2 = (self.max - origin) * inv_dir;

        let tmin = t1.min(t2).max_element();
        let tmax = t1.max(t2).min_element();

        // Entire box is behind the origin
        if tmax < 0.0 {
            return None;
        }

        if tmin > tmax {
            return None;
        }

        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

/// Sphere hit proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center in world space.
    pub center: Vec3,
    /// Radius in world units.
    pub radius: f32,
}

impl Sphere {
    /// Create a sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// Nearest non-negative hit distance, exit distance when starting inside.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin() - self.center;
        // Direction is unit length, so the quadratic's `a` term is 1.
        let b = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        let far = -b + sqrt_d;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// Oriented, double-sided rectangle (panel and button surfaces).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Center of the rectangle.
    pub center: Vec3,
    /// Orientation; the unrotated quad lies in the XY plane facing +Z.
    pub rotation: Quat,
    /// Width and height.
    pub size: Vec2,
}

impl Quad {
    /// Create a quad facing +Z after `rotation` is applied.
    pub fn new(center: Vec3, rotation: Quat, size: Vec2) -> Self {
        Self {
            center,
            rotation,
            size: size.abs(),
        }
    }

    /// Unit normal of the quad's front face.
    pub fn normal(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// Ray-plane intersection clipped to the rectangle. Returns the distance
    /// and the UV coordinate (0-1 range, origin bottom-left).
    pub fn ray_intersection_uv(&self, ray: &Ray) -> Option<(f32, Vec2)> {
        let plane_normal = self.normal();
        let denom = ray.direction().dot(plane_normal);

        // Ray parallel to plane
        if denom.abs() < EPSILON {
            return None;
        }

        let t = (self.center - ray.origin()).dot(plane_normal) / denom;

        // Intersection behind ray origin
        if t < 0.0 {
            return None;
        }

        let to_hit = ray.at(t) - self.center;
        let right = self.rotation * Vec3::X;
        let up = self.rotation * Vec3::Y;
        let u = to_hit.dot(right);
        let v = to_hit.dot(up);

        let half = self.size * 0.5;
        if u.abs() <= half.x && v.abs() <= half.y {
            let uv = Vec2::new((u + half.x) / self.size.x, (v + half.y) / self.size.y);
            Some((t, uv))
        } else {
            None
        }
    }

    /// Distance to the quad, if hit.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        self.ray_intersection_uv(ray).map(|(t, _)| t)
    }
}

/// Double-sided triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Corners in world space.
    pub vertices: [Vec3; 3],
}

impl Triangle {
    /// Create a triangle from three corners.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Möller–Trumbore intersection.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        let [a, b, c] = self.vertices;
        let edge1 = b - a;
        let edge2 = c - a;
        let p = ray.direction().cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;
        let s = ray.origin() - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(edge1);
        let v = ray.direction().dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }
        let t = edge2.dot(q) * inv_det;
        (t >= 0.0).then_some(t)
    }
}

/// One hit-test primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HitShape {
    /// Axis-aligned box.
    Box(Aabb),
    /// Sphere.
    Sphere(Sphere),
    /// Oriented rectangle.
    Quad(Quad),
    /// Single triangle.
    Triangle(Triangle),
}

impl HitShape {
    /// Nearest non-negative hit distance along `ray`.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        match self {
            HitShape::Box(shape) => shape.ray_intersection(ray),
            HitShape::Sphere(shape) => shape.ray_intersection(ray),
            HitShape::Quad(shape) => shape.ray_intersection(ray),
            HitShape::Triangle(shape) => shape.ray_intersection(ray),
        }
        .filter(|t| t.is_finite() && *t >= 0.0)
    }
}

impl From<Aabb> for HitShape {
    fn from(shape: Aabb) -> Self {
        HitShape::Box(shape)
    }
}

impl From<Sphere> for HitShape {
    fn from(shape: Sphere) -> Self {
        HitShape::Sphere(shape)
    }
}

impl From<Quad> for HitShape {
    fn from(shape: Quad) -> Self {
        HitShape::Quad(shape)
    }
}

impl From<Triangle> for HitShape {
    fn from(shape: Triangle) -> Self {
        HitShape::Triangle(shape)
    }
}

/// World-space hit-test geometry of a candidate: one or more primitives.
///
/// A proxy is never empty, so every registered candidate can be tested.
#[derive(Debug, Clone, PartialEq)]
pub struct HitProxy {
    shapes: Vec<HitShape>,
}

impl HitProxy {
    /// Build a compound proxy. Fails with [`InteractionError::EmptyProxy`]
    /// when `shapes` is empty.
    pub fn new(shapes: Vec<HitShape>) -> Result<Self, InteractionError> {
        if shapes.is_empty() {
            return Err(InteractionError::EmptyProxy);
        }
        Ok(Self { shapes })
    }

    /// Proxy made of a single primitive.
    pub fn single(shape: impl Into<HitShape>) -> Self {
        Self {
            shapes: vec![shape.into()],
        }
    }

    /// Add another primitive.
    pub fn push(&mut self, shape: impl Into<HitShape>) {
        self.shapes.push(shape.into());
    }

    /// Primitives making up this proxy.
    pub fn shapes(&self) -> &[HitShape] {
        &self.shapes
    }

    /// Nearest hit over all primitives.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        self.shapes
            .iter()
            .filter_map(|shape| shape.ray_intersection(ray))
            .min_by(f32::total_cmp)
    }
}

impl From<HitShape> for HitProxy {
    fn from(shape: HitShape) -> Self {
        HitProxy::single(shape)
    }
}
