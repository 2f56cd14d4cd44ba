use crate::interval::Interval;
use crate::vec3::axis_component;
use crate::Vec3;

/// An axis-aligned bounding box stored as one [`Interval`] per axis.
///
/// Degenerate axes are padded to a minimum thickness so that flat geometry
/// (axis-aligned triangles, zero-extent unions) still has a hittable box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// A box containing nothing.
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// Create a new AABB from three intervals, padding degenerate axes.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB spanning two corner points (in any order).
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create the smallest AABB containing both input boxes.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&a.x, &b.x),
            y: Interval::surrounding(&a.y, &b.y),
            z: Interval::surrounding(&a.z, &b.z),
        }
    }

    /// Get the interval for the given axis (0 = x, 1 = y, 2 = z).
    pub fn axis_interval(&self, axis: usize) -> Interval {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Returns the index of the longest axis of the box.
    pub fn longest_axis(&self) -> usize {
        if self.x.size() > self.y.size() && self.x.size() > self.z.size() {
            0
        } else if self.y.size() > self.z.size() {
            1
        } else {
            2
        }
    }

    /// Center point of the box.
    pub fn centroid(&self) -> Vec3 {
        Vec3::new(
            (self.x.min + self.x.max) * 0.5,
            (self.y.min + self.y.max) * 0.5,
            (self.z.min + self.z.max) * 0.5,
        )
    }

    /// Total surface area of the six faces.
    pub fn surface_area(&self) -> f32 {
        let dx = self.x.size();
        let dy = self.y.size();
        let dz = self.z.size();
        2.0 * (dx * dy + dy * dz + dz * dx)
    }

    /// Slab test against a ray given by its origin and reciprocal direction.
    ///
    /// The caller precomputes `inv_dir = ray.direction.recip()` once per ray;
    /// infinite components from axis-parallel directions are well defined
    /// here. The test is conservative: a NaN slab distance (origin exactly on
    /// a slab plane of a parallel ray) never rejects the box.
    pub fn hit(&self, origin: Vec3, inv_dir: Vec3, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let inv = axis_component(inv_dir, axis);
            let orig = axis_component(origin, axis);

            let mut t0 = (slab.min - orig) * inv;
            let mut t1 = (slab.max - orig) * inv;
            if inv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            // f32::max/min ignore a NaN argument, keeping the test conservative.
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Pad any axis thinner than a small delta so no box is flat.
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_from_points_orders_coordinates() {
        let aabb = Aabb::from_points(Vec3::new(1.0, 5.0, -2.0), Vec3::new(-1.0, 2.0, 4.0));

        assert_eq!(aabb.x.min, -1.0);
        assert_eq!(aabb.x.max, 1.0);
        assert_eq!(aabb.y.min, 2.0);
        assert_eq!(aabb.y.max, 5.0);
        assert_eq!(aabb.z.min, -2.0);
        assert_eq!(aabb.z.max, 4.0);
    }

    #[test]
    fn test_flat_box_is_padded() {
        // Both corners share y = 0; the y axis must get a minimum thickness.
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));

        assert!(aabb.y.size() > 0.0);
        assert!(aabb.y.contains(0.0));
    }

    #[test]
    fn test_surrounding() {
        let a = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let b = Aabb::from_points(Vec3::new(2.0, 2.0, 2.0), Vec3::new(3.0, 3.0, 3.0));
        let union = Aabb::surrounding(&a, &b);

        assert_eq!(union.x.min, 0.0);
        assert_eq!(union.x.max, 3.0);

        // Union with EMPTY is the identity
        let with_empty = Aabb::surrounding(&a, &Aabb::EMPTY);
        assert_eq!(with_empty.x, a.x);
        assert_eq!(with_empty.y, a.y);
        assert_eq!(with_empty.z, a.z);
    }

    #[test]
    fn test_longest_axis() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 5.0, 2.0));
        assert_eq!(aabb.longest_axis(), 1);

        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(9.0, 5.0, 2.0));
        assert_eq!(aabb.longest_axis(), 0);
    }

    #[test]
    fn test_centroid() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.centroid(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_surface_area() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(2.0, 3.0, 4.0));
        // 2 * (2*3 + 3*4 + 4*2) = 52
        assert_eq!(aabb.surface_area(), 52.0);
    }

    #[test]
    fn test_hit_straight_on() {
        let aabb = unit_box();
        let origin = Vec3::new(0.5, 0.5, -2.0);
        let inv_dir = Vec3::new(0.0, 0.0, 1.0).recip();

        assert!(aabb.hit(origin, inv_dir, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_hit_miss() {
        let aabb = unit_box();
        let origin = Vec3::new(5.0, 5.0, -2.0);
        let inv_dir = Vec3::new(0.0, 0.0, 1.0).recip();

        assert!(!aabb.hit(origin, inv_dir, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_hit_behind_origin() {
        // Box entirely behind the ray start is rejected by the t interval.
        let aabb = unit_box();
        let origin = Vec3::new(0.5, 0.5, 2.0);
        let inv_dir = Vec3::new(0.0, 0.0, 1.0).recip();

        assert!(!aabb.hit(origin, inv_dir, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_hit_axis_parallel_ray_inside_slab() {
        // Direction has zero x and y; reciprocals are infinite.
        let aabb = unit_box();
        let origin = Vec3::new(0.5, 0.5, -1.0);
        let inv_dir = Vec3::Z.recip();

        assert!(aabb.hit(origin, inv_dir, Interval::new(0.001, f32::INFINITY)));

        // Same direction but origin outside the x slab: infinite slab
        // distances of matching sign reject it.
        let outside = Vec3::new(2.0, 0.5, -1.0);
        assert!(!aabb.hit(outside, inv_dir, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_hit_diagonal() {
        let aabb = unit_box();
        let origin = Vec3::new(-1.0, -1.0, -1.0);
        let inv_dir = Vec3::ONE.normalize().recip();

        assert!(aabb.hit(origin, inv_dir, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_empty_box_hits_nothing() {
        let aabb = Aabb::EMPTY;
        let inv_dir = Vec3::Z.recip();

        assert!(!aabb.hit(Vec3::ZERO, inv_dir, Interval::new(0.001, f32::INFINITY)));
    }
}
