//! Scene container: a primitive arena, an optional accelerator, and the
//! ambient color rays escape to.

use std::time::Instant;

use glint_math::{Interval, Ray, Vec3};

use crate::bvh::Bvh;
use crate::material::{Color, Material};
use crate::primitive::{HitRecord, Primitive};

/// A renderable scene.
///
/// Primitives live in one flat arena the BVH indexes into. Adding geometry
/// drops a previously built BVH, since its leaf ranges would go stale.
#[derive(Debug, Clone)]
pub struct Scene {
    primitives: Vec<Primitive>,
    bvh: Option<Bvh>,
    /// Color returned for rays that leave the scene.
    pub ambient: Color,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            primitives: Vec::new(),
            bvh: None,
            ambient: Color::new(0.1, 0.1, 0.1),
        }
    }

    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: Material) {
        self.primitives
            .push(Primitive::sphere(center, radius, material));
        self.bvh = None;
    }

    pub fn add_triangle(&mut self, v0: Vec3, v1: Vec3, v2: Vec3, material: Material) {
        self.primitives
            .push(Primitive::triangle(v0, v1, v2, material));
        self.bvh = None;
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn has_bvh(&self) -> bool {
        self.bvh.is_some()
    }

    /// Build the acceleration structure over the current geometry.
    pub fn build_bvh(&mut self) {
        let start = Instant::now();
        let bvh = Bvh::build(&mut self.primitives);
        log::info!(
            "Built BVH: {} primitives, {} nodes in {:.2?}",
            self.primitives.len(),
            bvh.node_count(),
            start.elapsed()
        );
        self.bvh = Some(bvh);
    }

    /// Closest hit within `ray_t`, accelerated when a BVH is present.
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        match &self.bvh {
            Some(bvh) => bvh.hit(&self.primitives, ray, ray_t),
            None => self.hit_linear(ray, ray_t),
        }
    }

    /// Brute-force closest hit over every primitive.
    ///
    /// This is the reference the BVH path is validated against; it is also
    /// the live path for scenes that never built one.
    pub fn hit_linear(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest = ray_t.max;
        let mut record = None;
        for prim in &self.primitives {
            if let Some(hit) = prim.hit(ray, Interval::new(ray_t.min, closest)) {
                closest = hit.t;
                record = Some(hit);
            }
        }
        record
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
