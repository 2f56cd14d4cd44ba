//! The path tracing integrator.

use glint_math::{Interval, Ray};
use rand::Rng;

use crate::material::Color;
use crate::scene::Scene;

/// Bounce depth at which Russian roulette starts.
const ROULETTE_DEPTH: u32 = 5;
/// Survival probability once roulette is active.
const SURVIVAL_PROBABILITY: f32 = 0.8;
/// Self-intersection guard for secondary rays.
const T_MIN: f32 = 0.001;

/// Radiance arriving along `ray`, estimated with a single sample path.
///
/// `depth` counts bounces taken so far and increments on each recursion;
/// the recursion is bounded by `max_depth` and, past [`ROULETTE_DEPTH`],
/// by the roulette draw. Surviving paths are not reweighted, so deep
/// bounces lose a little energy instead of gaining variance.
pub fn trace<R: Rng + ?Sized>(
    scene: &Scene,
    ray: &Ray,
    rng: &mut R,
    depth: u32,
    max_depth: u32,
) -> Color {
    if depth >= max_depth {
        return Color::ZERO;
    }

    if depth >= ROULETTE_DEPTH && rng.gen::<f32>() > SURVIVAL_PROBABILITY {
        return Color::ZERO;
    }

    let hit = match scene.hit(ray, Interval::new(T_MIN, f32::INFINITY)) {
        Some(hit) => hit,
        None => return scene.ambient,
    };

    if hit.material.is_emissive() {
        return hit.material.emitted();
    }

    match hit.material.scatter(ray, &hit, rng) {
        Some(scatter) => {
            scatter.attenuation * trace(scene, &scatter.scattered, rng, depth + 1, max_depth)
        }
        None => Color::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use glint_math::Vec3;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_depth_cap_returns_black() {
        let scene = Scene::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(trace(&scene, &ray, &mut rng, 50, 50), Color::ZERO);
        assert_eq!(trace(&scene, &ray, &mut rng, 51, 50), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_ambient() {
        let mut scene = Scene::new();
        scene.ambient = Color::new(0.25, 0.5, 0.75);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(
            trace(&scene, &ray, &mut rng, 0, 50),
            Color::new(0.25, 0.5, 0.75)
        );
    }

    #[test]
    fn test_emissive_hit_returns_emission() {
        let mut scene = Scene::new();
        scene.add_sphere(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Material::emissive(Color::new(5.0, 4.0, 3.0)),
        );
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rng = StdRng::seed_from_u64(42);

        // Emission is returned as-is, not scaled or scattered.
        assert_eq!(
            trace(&scene, &ray, &mut rng, 0, 50),
            Color::new(5.0, 4.0, 3.0)
        );
    }

    #[test]
    fn test_single_bounce_attenuates_ambient() {
        // A lone floor triangle: the diffuse bounce leaves upward, misses
        // everything, and picks up the ambient color exactly once.
        let mut scene = Scene::new();
        scene.ambient = Color::ONE;
        scene.add_triangle(
            Vec3::new(-100.0, 0.0, -100.0),
            Vec3::new(100.0, 0.0, -100.0),
            Vec3::new(0.0, 0.0, 100.0),
            Material::lambertian(Color::new(0.5, 0.5, 0.5)),
        );
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            assert_eq!(
                trace(&scene, &ray, &mut rng, 0, 50),
                Color::new(0.5, 0.5, 0.5)
            );
        }
    }

    #[test]
    fn test_roulette_terminates_on_high_draw() {
        let mut scene = Scene::new();
        scene.ambient = Color::ONE;
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        // A draw near 1.0 exceeds the survival probability: black, even
        // though the ray would have returned the ambient color.
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(trace(&scene, &ray, &mut high, 5, 50), Color::ZERO);

        // A low draw survives and reaches the ambient miss.
        let mut low = StepRng::new(0, 0);
        assert_eq!(trace(&scene, &ray, &mut low, 5, 50), Color::ONE);
    }

    #[test]
    fn test_roulette_inactive_below_threshold() {
        let mut scene = Scene::new();
        scene.ambient = Color::ONE;
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        // Depth 4 never draws, so even an all-high RNG cannot terminate it.
        let mut high = StepRng::new(u64::MAX, 0);
        assert_eq!(trace(&scene, &ray, &mut high, 4, 50), Color::ONE);
    }
}
