//! Scene geometry: spheres, triangles, and the primitive wrapper the BVH
//! and scene operate on.

use glint_math::{Aabb, Interval, Ray, Vec3};

use crate::material::Material;

/// Information about a ray-surface intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    pub point: Vec3,
    pub normal: Vec3,
    pub t: f32,
    pub front_face: bool,
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal, storing the normal
    /// oriented against the ray and remembering which side was hit.
    fn new(ray: &Ray, t: f32, outward_normal: Vec3, material: &'a Material) -> Self {
        let front_face = ray.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            point: ray.at(t),
            normal,
            t,
            front_face,
            material,
        }
    }
}

/// A sphere defined by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    /// Nearest intersection within `ray_t`, as (t, outward normal).
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, Vec3)> {
        // Degenerate spheres have no surface; bail before the division
        // below can produce NaN normals.
        if self.radius <= 0.0 {
            return None;
        }

        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let half_b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();

        // Try the near root first, then the far one.
        let mut root = (-half_b - sqrt_d) / a;
        if !ray_t.contains(root) {
            root = (-half_b + sqrt_d) / a;
            if !ray_t.contains(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some((root, outward_normal))
    }

    fn bounds(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::from_points(self.center - r, self.center + r)
    }
}

/// A triangle with a precomputed geometric normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
    pub normal: Vec3,
}

impl Triangle {
    /// Create a triangle; the normal follows the winding of (v0, v1, v2).
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        let normal = (v1 - v0).cross(v2 - v0).normalize();
        Self { v0, v1, v2, normal }
    }

    /// Moller-Trumbore intersection, as (t, outward normal).
    fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<(f32, Vec3)> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(edge2);
        let det = edge1.dot(h);
        // Near-zero determinant: parallel ray or degenerate triangle.
        if det.abs() < 1e-7 {
            return None;
        }

        let inv_det = 1.0 / det;
        let s = ray.origin - self.v0;
        let u = inv_det * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = inv_det * ray.direction.dot(q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = inv_det * edge2.dot(q);
        if !ray_t.contains(t) {
            return None;
        }

        Some((t, self.normal))
    }

    fn bounds(&self) -> Aabb {
        let pad = Vec3::splat(0.0001);
        let min = self.v0.min(self.v1).min(self.v2) - pad;
        let max = self.v0.max(self.v1).max(self.v2) + pad;
        Aabb::from_points(min, max)
    }
}

/// The closed set of geometry kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Triangle(Triangle),
}

/// A shape paired with its material, with bounds cached at construction.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub shape: Shape,
    pub material: Material,
    bounds: Aabb,
}

impl Primitive {
    pub fn sphere(center: Vec3, radius: f32, material: Material) -> Self {
        let sphere = Sphere { center, radius };
        Self {
            bounds: sphere.bounds(),
            shape: Shape::Sphere(sphere),
            material,
        }
    }

    pub fn triangle(v0: Vec3, v1: Vec3, v2: Vec3, material: Material) -> Self {
        let triangle = Triangle::new(v0, v1, v2);
        Self {
            bounds: triangle.bounds(),
            shape: Shape::Triangle(triangle),
            material,
        }
    }

    /// Cached world-space bounds.
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Test the ray against this primitive within `ray_t`.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let (t, outward_normal) = match &self.shape {
            Shape::Sphere(sphere) => sphere.intersect(ray, ray_t)?,
            Shape::Triangle(triangle) => triangle.intersect(ray, ray_t)?,
        };
        Some(HitRecord::new(ray, t, outward_normal, &self.material))
    }
}
