//! Material models and their scattering rules.
//!
//! Materials form a closed set: a plain enum rather than trait objects, so
//! primitives stay POD-like and the scatter dispatch is a match. The three
//! non-emissive behaviors (diffuse, rough-reflective, dielectric) are free
//! functions shared between the plain variants and blend layers.

use glint_math::{reflect, refract, Ray, Vec3};
use rand::Rng;

use crate::primitive::HitRecord;
use crate::sampling::{random_in_unit_sphere, random_unit_vector};

/// RGB color in linear space.
pub type Color = Vec3;

/// The behavior a blend layer falls back to once selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendKind {
    Lambertian,
    Metal,
    Dielectric,
}

/// Spatial coordinate driving a blend factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    /// Blend along world-space y.
    Vertical,
    /// Blend along world-space x.
    Horizontal,
    /// Blend by distance from the y axis.
    Radial,
}

/// One endpoint of a blend material, with every parameter flattened so the
/// pair can be interpolated component-wise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlendLayer {
    pub kind: BlendKind,
    pub albedo: Color,
    pub roughness: f32,
    pub ior: f32,
}

impl BlendLayer {
    pub fn lambertian(albedo: Color) -> Self {
        Self {
            kind: BlendKind::Lambertian,
            albedo,
            roughness: 0.0,
            ior: 1.0,
        }
    }

    pub fn metal(albedo: Color, roughness: f32) -> Self {
        Self {
            kind: BlendKind::Metal,
            albedo,
            roughness: roughness.clamp(0.0, 1.0),
            ior: 1.0,
        }
    }

    pub fn dielectric(ior: f32) -> Self {
        Self {
            kind: BlendKind::Dielectric,
            albedo: Color::ONE,
            roughness: 0.0,
            ior,
        }
    }
}

/// Result of a successful scatter: the surviving ray and its color filter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// The closed set of material models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Diffuse surface scattering around the normal.
    Lambertian { albedo: Color },
    /// Mirror reflection perturbed by a roughness term.
    Metal { albedo: Color, roughness: f32 },
    /// Clear refractive surface (glass, water).
    Dielectric { ior: f32 },
    /// Pure emitter; never scatters.
    Emissive { emission: Color },
    /// Two layers mixed by a spatial factor.
    Blend {
        from: BlendLayer,
        to: BlendLayer,
        mode: BlendMode,
        min: f32,
        max: f32,
    },
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal with roughness clamped to [0, 1].
    pub fn metal(albedo: Color, roughness: f32) -> Self {
        Material::Metal {
            albedo,
            roughness: roughness.clamp(0.0, 1.0),
        }
    }

    pub fn dielectric(ior: f32) -> Self {
        Material::Dielectric { ior }
    }

    pub fn emissive(emission: Color) -> Self {
        Material::Emissive { emission }
    }

    /// Blend between `from` and `to` as the blend coordinate moves across
    /// `[min, max]`.
    pub fn blend(from: BlendLayer, to: BlendLayer, mode: BlendMode, min: f32, max: f32) -> Self {
        Material::Blend {
            from,
            to,
            mode,
            min,
            max,
        }
    }

    /// Light emitted by this material.
    pub fn emitted(&self) -> Color {
        match self {
            Material::Emissive { emission } => *emission,
            _ => Color::ZERO,
        }
    }

    pub fn is_emissive(&self) -> bool {
        matches!(self, Material::Emissive { .. })
    }

    /// Scatter `ray_in` at `hit`. `None` means the ray was absorbed.
    pub fn scatter<R: Rng + ?Sized>(
        &self,
        ray_in: &Ray,
        hit: &HitRecord,
        rng: &mut R,
    ) -> Option<ScatterResult> {
        match self {
            Material::Lambertian { albedo } => scatter_lambertian(*albedo, hit, rng),
            Material::Metal { albedo, roughness } => {
                scatter_metal(*albedo, *roughness, ray_in, hit, rng)
            }
            Material::Dielectric { ior } => scatter_dielectric(*ior, ray_in, hit, rng),
            Material::Emissive { .. } => None,
            Material::Blend {
                from,
                to,
                mode,
                min,
                max,
            } => {
                let factor = blend_factor(hit.point, *mode, *min, *max);
                let albedo = from.albedo.lerp(to.albedo, factor);
                let roughness = from.roughness + (to.roughness - from.roughness) * factor;
                let ior = from.ior + (to.ior - from.ior) * factor;

                // Parameters vary continuously across the band; the
                // behavioral kind switches once, halfway through.
                let kind = if factor < 0.5 { from.kind } else { to.kind };
                match kind {
                    BlendKind::Lambertian => scatter_lambertian(albedo, hit, rng),
                    BlendKind::Metal => scatter_metal(albedo, roughness, ray_in, hit, rng),
                    BlendKind::Dielectric => scatter_dielectric(ior, ray_in, hit, rng),
                }
            }
        }
    }
}

fn scatter_lambertian<R: Rng + ?Sized>(
    albedo: Color,
    hit: &HitRecord,
    rng: &mut R,
) -> Option<ScatterResult> {
    let mut direction = hit.normal + random_unit_vector(rng);
    // A sample nearly opposite the normal cancels it out; fall back to the
    // normal itself rather than shoot a degenerate ray.
    if direction.length_squared() < 1e-3 {
        direction = hit.normal;
    }
    Some(ScatterResult {
        attenuation: albedo,
        scattered: Ray::new(hit.point, direction),
    })
}

fn scatter_metal<R: Rng + ?Sized>(
    albedo: Color,
    roughness: f32,
    ray_in: &Ray,
    hit: &HitRecord,
    rng: &mut R,
) -> Option<ScatterResult> {
    let reflected = reflect(ray_in.direction.normalize(), hit.normal);
    let scattered = Ray::new(hit.point, reflected + roughness * random_in_unit_sphere(rng));

    // Fuzz can push the reflection under the surface; those rays are absorbed.
    if scattered.direction.dot(hit.normal) > 0.0 {
        Some(ScatterResult {
            attenuation: albedo,
            scattered,
        })
    } else {
        None
    }
}

fn scatter_dielectric<R: Rng + ?Sized>(
    ior: f32,
    ray_in: &Ray,
    hit: &HitRecord,
    rng: &mut R,
) -> Option<ScatterResult> {
    let ratio = if hit.front_face { 1.0 / ior } else { ior };
    let unit_direction = ray_in.direction.normalize();

    let cos_theta = (-unit_direction).dot(hit.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    // Total internal reflection forces a mirror bounce; otherwise Schlick's
    // approximation decides probabilistically. The draw is short-circuited
    // away on the TIR path.
    let cannot_refract = ratio * sin_theta > 1.0;
    let direction = if cannot_refract || schlick(cos_theta, ratio) > rng.gen::<f32>() {
        reflect(unit_direction, hit.normal)
    } else {
        // The closed-form check above can disagree with refract right at the
        // FP boundary; treat that as reflection as well.
        refract(unit_direction, hit.normal, ratio)
            .unwrap_or_else(|| reflect(unit_direction, hit.normal))
    };

    Some(ScatterResult {
        attenuation: Color::ONE,
        scattered: Ray::new(hit.point, direction),
    })
}

/// Schlick's reflectance approximation.
fn schlick(cosine: f32, ref_idx: f32) -> f32 {
    let r0 = (1.0 - ref_idx) / (1.0 + ref_idx);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}

/// Normalized position of `point` inside the blend band, clamped to [0, 1].
fn blend_factor(point: Vec3, mode: BlendMode, min: f32, max: f32) -> f32 {
    let coord = match mode {
        BlendMode::Vertical => point.y,
        BlendMode::Horizontal => point.x,
        BlendMode::Radial => (point.x * point.x + point.z * point.z).sqrt(),
    };
    // max(0).min(1) rather than clamp: a degenerate band (min == max)
    // divides 0 by 0, and this nesting maps the resulting NaN to 0.
    ((coord - min) / (max - min)).max(0.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn surface_hit(material: &Material) -> HitRecord<'_> {
        HitRecord {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            t: 1.0,
            front_face: true,
            material,
        }
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let mat = Material::lambertian(Color::new(0.8, 0.2, 0.1));
        let hit = surface_hit(&mat);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let result = mat.scatter(&ray, &hit, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.8, 0.2, 0.1));
            assert_eq!(result.scattered.origin, hit.point);
            // Scattered direction stays in the normal's hemisphere or on it.
            assert!(result.scattered.direction.dot(hit.normal) > -1e-6);
        }
    }

    #[test]
    fn test_metal_roughness_zero_is_exact_mirror() {
        let mat = Material::metal(Color::ONE, 0.0);
        let hit = surface_hit(&mat);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        let result = mat.scatter(&ray, &hit, &mut rng).unwrap();
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction - expected).length() < 1e-6);
    }

    #[test]
    fn test_metal_grazing_reflection_is_absorbed() {
        // Reflection exactly along the surface never leaves it.
        let mat = Material::metal(Color::ONE, 0.0);
        let hit = surface_hit(&mat);
        let ray = Ray::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::X);
        let mut rng = StdRng::seed_from_u64(42);

        assert!(mat.scatter(&ray, &hit, &mut rng).is_none());
    }

    #[test]
    fn test_metal_roughness_is_clamped() {
        match Material::metal(Color::ONE, 7.5) {
            Material::Metal { roughness, .. } => assert_eq!(roughness, 1.0),
            _ => unreachable!(),
        }
        match Material::metal(Color::ONE, -0.5) {
            Material::Metal { roughness, .. } => assert_eq!(roughness, 0.0),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_dielectric_mostly_refracts_at_normal_incidence() {
        // Schlick at normal incidence for ior 1.5 is about 4 percent.
        let mat = Material::dielectric(1.5);
        let hit = surface_hit(&mat);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(42);

        let mut refracted = 0;
        for _ in 0..1000 {
            let result = mat.scatter(&ray, &hit, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::ONE);
            if result.scattered.direction.y < 0.0 {
                refracted += 1;
            }
        }
        assert!(refracted > 900, "only {refracted} of 1000 refracted");
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Grazing exit from inside the dense medium: no refraction solution,
        // and no RNG draw either.
        let mat = Material::dielectric(1.5);
        let mut hit = surface_hit(&mat);
        hit.front_face = false;
        hit.normal = Vec3::NEG_Y;

        let ray = Ray::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(1.0, 0.1, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        let result = mat.scatter(&ray, &hit, &mut rng).unwrap();
        // Bounced back down into the medium.
        assert!(result.scattered.direction.y < 0.0);
        assert!(result.scattered.direction.x > 0.0);
    }

    #[test]
    fn test_emissive_emits_and_never_scatters() {
        let mat = Material::emissive(Color::new(5.0, 4.0, 3.0));
        let hit = surface_hit(&mat);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(42);

        assert!(mat.is_emissive());
        assert_eq!(mat.emitted(), Color::new(5.0, 4.0, 3.0));
        assert!(mat.scatter(&ray, &hit, &mut rng).is_none());
    }

    #[test]
    fn test_non_emissive_materials_emit_nothing() {
        assert_eq!(Material::lambertian(Color::ONE).emitted(), Color::ZERO);
        assert_eq!(Material::metal(Color::ONE, 0.1).emitted(), Color::ZERO);
        assert_eq!(Material::dielectric(1.5).emitted(), Color::ZERO);
        assert!(!Material::lambertian(Color::ONE).is_emissive());
    }

    #[test]
    fn test_blend_factor_modes_and_clamping() {
        let p = |x, y, z| Vec3::new(x, y, z);

        assert_eq!(blend_factor(p(0.0, 0.0, 0.0), BlendMode::Vertical, 0.0, 2.0), 0.0);
        assert_eq!(blend_factor(p(0.0, 2.0, 0.0), BlendMode::Vertical, 0.0, 2.0), 1.0);
        assert_eq!(blend_factor(p(0.0, 1.0, 0.0), BlendMode::Vertical, 0.0, 2.0), 0.5);

        // Clamped outside the band.
        assert_eq!(blend_factor(p(0.0, -5.0, 0.0), BlendMode::Vertical, 0.0, 2.0), 0.0);
        assert_eq!(blend_factor(p(0.0, 9.0, 0.0), BlendMode::Vertical, 0.0, 2.0), 1.0);

        assert_eq!(blend_factor(p(1.0, 0.0, 0.0), BlendMode::Horizontal, 0.0, 4.0), 0.25);

        // Radial measures distance from the y axis: (3, _, 4) is 5 away.
        assert_eq!(blend_factor(p(3.0, 7.0, 4.0), BlendMode::Radial, 0.0, 10.0), 0.5);
    }

    #[test]
    fn test_blend_factor_degenerate_band_is_zero() {
        // min == max divides zero by zero; the factor must still be 0, not NaN.
        let f = blend_factor(Vec3::new(0.0, 1.0, 0.0), BlendMode::Vertical, 1.0, 1.0);
        assert_eq!(f, 0.0);
    }

    #[test]
    fn test_blend_endpoints_use_pure_layer_colors() {
        let mat = Material::blend(
            BlendLayer::lambertian(Color::new(1.0, 0.0, 0.0)),
            BlendLayer::lambertian(Color::new(0.0, 0.0, 1.0)),
            BlendMode::Vertical,
            0.0,
            2.0,
        );
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(42);

        let mut bottom = surface_hit(&mat);
        bottom.point = Vec3::ZERO;
        let result = mat.scatter(&ray, &bottom, &mut rng).unwrap();
        assert_eq!(result.attenuation, Color::new(1.0, 0.0, 0.0));

        let mut top = surface_hit(&mat);
        top.point = Vec3::new(0.0, 2.0, 0.0);
        let result = mat.scatter(&ray, &top, &mut rng).unwrap();
        assert_eq!(result.attenuation, Color::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_blend_kind_switches_at_midpoint() {
        // Lambertian below, mirror metal above. At the exact midpoint the
        // factor is 0.5, which already selects the `to` kind, so the scatter
        // must be a deterministic mirror reflection in the blended color.
        let mat = Material::blend(
            BlendLayer::lambertian(Color::new(1.0, 0.0, 0.0)),
            BlendLayer::metal(Color::new(0.0, 0.0, 1.0), 0.0),
            BlendMode::Vertical,
            0.0,
            2.0,
        );
        let mut hit = surface_hit(&mat);
        hit.point = Vec3::new(0.0, 1.0, 0.0);

        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        let result = mat.scatter(&ray, &hit, &mut rng).unwrap();
        let mirror = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction - mirror).length() < 1e-6);
        // Color is still the 50/50 mix even though the behavior switched.
        assert_eq!(result.attenuation, Color::new(0.5, 0.0, 0.5));
    }
}
