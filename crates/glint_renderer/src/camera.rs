//! Thin-lens perspective camera.

use glint_math::{Ray, Vec3};
use rand::Rng;

use crate::sampling::random_in_unit_disk;

/// A positionable thin-lens camera mapping normalized screen coordinates
/// to world-space rays.
///
/// Defaults look down -Z from the origin with a 90 degree vertical field of
/// view. Every builder call recomputes the derived basis, so the camera is
/// ready to use after any chain of `with_*` calls.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
    vfov: f32,
    aspect_ratio: f32,
    aperture: f32,
    focus_distance: f32,

    // Derived by update()
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    lens_radius: f32,
}

impl Camera {
    pub fn new() -> Self {
        let mut camera = Self {
            look_from: Vec3::ZERO,
            look_at: Vec3::NEG_Z,
            vup: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: 4.0 / 3.0,
            aperture: 0.0,
            focus_distance: 10.0,
            origin: Vec3::ZERO,
            lower_left: Vec3::ZERO,
            horizontal: Vec3::ZERO,
            vertical: Vec3::ZERO,
            u: Vec3::ZERO,
            v: Vec3::ZERO,
            lens_radius: 0.0,
        };
        camera.update();
        camera
    }

    /// Place the camera at `look_from`, aimed at `look_at`, with `vup`
    /// fixing the roll.
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_from = look_from;
        self.look_at = look_at;
        self.vup = vup;
        self.update();
        self
    }

    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self.update();
        self
    }

    /// Set the vertical field of view (degrees), the lens aperture
    /// (diameter; 0 disables defocus blur), and the focus distance.
    pub fn with_lens(mut self, vfov: f32, aperture: f32, focus_distance: f32) -> Self {
        self.vfov = vfov;
        self.aperture = aperture;
        self.focus_distance = focus_distance;
        self.update();
        self
    }

    /// Recompute the viewport basis from the positioning parameters.
    fn update(&mut self) {
        let theta = self.vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = self.aspect_ratio * half_height;

        let w = (self.look_from - self.look_at).normalize();
        let u = self.vup.cross(w).normalize();
        let v = w.cross(u);

        self.origin = self.look_from;
        self.u = u;
        self.v = v;
        self.lower_left = self.origin
            - u * half_width * self.focus_distance
            - v * half_height * self.focus_distance
            - w * self.focus_distance;
        self.horizontal = u * 2.0 * half_width * self.focus_distance;
        self.vertical = v * 2.0 * half_height * self.focus_distance;
        self.lens_radius = self.aperture / 2.0;
    }

    /// Ray through normalized screen coordinates (s, t) in [0, 1], where
    /// (0, 0) is the lower-left corner of the image plane.
    ///
    /// With a non-zero aperture the ray origin wanders over the lens disk,
    /// producing defocus blur away from the focus plane.
    pub fn get_ray<R: Rng + ?Sized>(&self, s: f32, t: f32, rng: &mut R) -> Ray {
        let rd = self.lens_radius * random_in_unit_disk(rng);
        let offset = self.u * rd.x + self.v * rd.y;

        let origin = self.origin + offset;
        let direction =
            self.lower_left + s * self.horizontal + t * self.vertical - self.origin - offset;
        Ray::new(origin, direction)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
