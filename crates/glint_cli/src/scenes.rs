//! Built-in demo scenes.
//!
//! Each preset returns a populated [`Scene`] and a matching [`Camera`];
//! the caller picks the aspect ratio so presets work at any resolution.

use glint_math::Vec3;
use glint_renderer::{BlendLayer, BlendMode, Camera, Color, Material, Scene};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Scene names with a one-line description for `--list-scenes`.
pub const SCENES: [(&str, &str); 6] = [
    ("cornell-box", "Classic Cornell box with a glass and a metal sphere"),
    ("random-spheres", "Field of random small spheres around three heroes"),
    ("glass-spheres", "7x7 glass grid with a gold center under area lights"),
    ("metal-spheres", "Roughness lineup of tinted metals"),
    ("studio-lighting", "Glass, gold, and chrome under lights of rising power"),
    ("material-blend", "Gradient-blended materials in all three blend modes"),
];

/// Look up a preset by name.
pub fn create(name: &str, aspect_ratio: f32) -> Option<(Scene, Camera)> {
    match name {
        "cornell-box" => Some(cornell_box(aspect_ratio)),
        "random-spheres" => Some(random_spheres(aspect_ratio)),
        "glass-spheres" => Some(glass_spheres(aspect_ratio)),
        "metal-spheres" => Some(metal_spheres(aspect_ratio)),
        "studio-lighting" => Some(studio_lighting(aspect_ratio)),
        "material-blend" => Some(material_blend(aspect_ratio)),
        _ => None,
    }
}

fn cornell_box(aspect_ratio: f32) -> (Scene, Camera) {
    let mut scene = Scene::new();

    let white = Material::lambertian(Color::new(0.73, 0.73, 0.73));
    let red = Material::lambertian(Color::new(0.65, 0.05, 0.05));
    let green = Material::lambertian(Color::new(0.12, 0.45, 0.15));
    let light = Material::emissive(Color::new(1.0, 1.0, 1.0) * 15.0);
    let glass = Material::dielectric(1.5);
    let metal = Material::metal(Color::new(0.7, 0.6, 0.5), 0.0);

    let size = 555.0;

    // Walls as two triangles each
    // Floor
    scene.add_triangle(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(size, 0.0, 0.0),
        Vec3::new(size, 0.0, size),
        white,
    );
    scene.add_triangle(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(size, 0.0, size),
        Vec3::new(0.0, 0.0, size),
        white,
    );

    // Ceiling
    scene.add_triangle(
        Vec3::new(0.0, size, 0.0),
        Vec3::new(size, size, size),
        Vec3::new(size, size, 0.0),
        white,
    );
    scene.add_triangle(
        Vec3::new(0.0, size, 0.0),
        Vec3::new(0.0, size, size),
        Vec3::new(size, size, size),
        white,
    );

    // Back wall
    scene.add_triangle(
        Vec3::new(0.0, 0.0, size),
        Vec3::new(size, 0.0, size),
        Vec3::new(size, size, size),
        white,
    );
    scene.add_triangle(
        Vec3::new(0.0, 0.0, size),
        Vec3::new(size, size, size),
        Vec3::new(0.0, size, size),
        white,
    );

    // Left wall (green)
    scene.add_triangle(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, size),
        Vec3::new(0.0, size, size),
        green,
    );
    scene.add_triangle(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, size, size),
        Vec3::new(0.0, size, 0.0),
        green,
    );

    // Right wall (red)
    scene.add_triangle(
        Vec3::new(size, 0.0, 0.0),
        Vec3::new(size, size, 0.0),
        Vec3::new(size, size, size),
        red,
    );
    scene.add_triangle(
        Vec3::new(size, 0.0, 0.0),
        Vec3::new(size, size, size),
        Vec3::new(size, 0.0, size),
        red,
    );

    // Light quad just under the ceiling
    let light_size = 130.0;
    let light_x0 = (size - light_size) / 2.0;
    let light_x1 = light_x0 + light_size;
    let light_z0 = (size - light_size) / 2.0;
    let light_z1 = light_z0 + light_size;
    let light_y = size - 0.01;

    scene.add_triangle(
        Vec3::new(light_x0, light_y, light_z0),
        Vec3::new(light_x1, light_y, light_z0),
        Vec3::new(light_x1, light_y, light_z1),
        light,
    );
    scene.add_triangle(
        Vec3::new(light_x0, light_y, light_z0),
        Vec3::new(light_x1, light_y, light_z1),
        Vec3::new(light_x0, light_y, light_z1),
        light,
    );

    scene.add_sphere(Vec3::new(185.0, 100.0, 185.0), 100.0, glass);
    scene.add_sphere(Vec3::new(370.0, 80.0, 370.0), 80.0, metal);

    // The box is lit by the quad alone
    scene.ambient = Color::ZERO;

    let camera = Camera::new()
        .with_position(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_aspect_ratio(aspect_ratio)
        .with_lens(40.0, 0.0, 10.0);

    (scene, camera)
}

fn random_spheres(aspect_ratio: f32) -> (Scene, Camera) {
    let mut scene = Scene::new();
    let mut rng = SmallRng::seed_from_u64(42);

    scene.add_sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::new(0.5, 0.5, 0.5)),
    );

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            // Keep the area around the hero spheres clear
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() > 0.9 {
                let material = if choose_mat < 0.8 {
                    let albedo = Color::new(rng.gen(), rng.gen(), rng.gen())
                        * Color::new(rng.gen(), rng.gen(), rng.gen());
                    Material::lambertian(albedo)
                } else if choose_mat < 0.95 {
                    let albedo = Color::new(
                        0.5 * (1.0 + rng.gen::<f32>()),
                        0.5 * (1.0 + rng.gen::<f32>()),
                        0.5 * (1.0 + rng.gen::<f32>()),
                    );
                    let roughness = 0.5 * rng.gen::<f32>();
                    Material::metal(albedo, roughness)
                } else {
                    Material::dielectric(1.5)
                };

                scene.add_sphere(center, 0.2, material);
            }
        }
    }

    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, Material::dielectric(1.5));
    scene.add_sphere(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Material::lambertian(Color::new(0.4, 0.2, 0.1)),
    );
    scene.add_sphere(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.7, 0.6, 0.5), 0.0),
    );

    // Sky light
    scene.ambient = Color::new(0.7, 0.8, 1.0);

    let camera = Camera::new()
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::new(0.0, 0.5, 0.0), Vec3::Y)
        .with_aspect_ratio(aspect_ratio)
        .with_lens(20.0, 0.1, 10.0);

    (scene, camera)
}

fn glass_spheres(aspect_ratio: f32) -> (Scene, Camera) {
    let mut scene = Scene::new();

    // Dark ground so the glass reads clearly
    scene.add_sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::new(0.2, 0.2, 0.25)),
    );

    // Large colored spheres far behind the grid, seen through the glass
    scene.add_sphere(
        Vec3::new(0.0, 3.0, -15.0),
        3.0,
        Material::lambertian(Color::new(0.9, 0.2, 0.2)),
    );
    scene.add_sphere(
        Vec3::new(10.0, 3.0, -15.0),
        3.0,
        Material::lambertian(Color::new(0.2, 0.9, 0.2)),
    );
    scene.add_sphere(
        Vec3::new(10.0, 3.0, -5.0),
        3.0,
        Material::lambertian(Color::new(0.2, 0.4, 0.9)),
    );

    for i in -3..=3 {
        for j in -3..=3 {
            let center = Vec3::new(i as f32 * 2.0, 1.0, j as f32 * 2.0);
            if i == 0 && j == 0 {
                // Gold center for contrast
                scene.add_sphere(center, 1.0, Material::metal(Color::new(1.0, 0.85, 0.3), 0.1));
            } else {
                scene.add_sphere(center, 1.0, Material::dielectric(1.5));
            }
        }
    }

    scene.add_sphere(
        Vec3::new(-8.0, 10.0, 0.0),
        2.5,
        Material::emissive(Color::new(1.0, 0.95, 0.9) * 15.0),
    );
    scene.add_sphere(
        Vec3::new(8.0, 10.0, 0.0),
        2.5,
        Material::emissive(Color::new(0.9, 0.95, 1.0) * 15.0),
    );

    scene.ambient = Color::new(0.3, 0.35, 0.4);

    // Elevated view onto the grid
    let camera = Camera::new()
        .with_position(Vec3::new(-8.0, 6.0, 8.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y)
        .with_aspect_ratio(aspect_ratio)
        .with_lens(45.0, 0.0, 15.0);

    (scene, camera)
}

fn metal_spheres(aspect_ratio: f32) -> (Scene, Camera) {
    let mut scene = Scene::new();

    scene.add_sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::new(0.3, 0.3, 0.35)),
    );

    // Lineup from chrome through gold to brushed copper
    scene.add_sphere(
        Vec3::new(-5.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.95, 0.95, 0.95), 0.0),
    );
    scene.add_sphere(
        Vec3::new(-2.5, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.9, 0.9, 0.95), 0.05),
    );
    scene.add_sphere(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(1.0, 0.86, 0.57), 0.0),
    );
    scene.add_sphere(
        Vec3::new(2.5, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.95, 0.64, 0.54), 0.05),
    );
    scene.add_sphere(
        Vec3::new(5.0, 1.0, 0.0),
        1.0,
        Material::metal(Color::new(0.9, 0.7, 0.6), 0.1),
    );

    // Colored spheres behind, visible in the reflections
    scene.add_sphere(
        Vec3::new(-3.0, 0.6, -4.0),
        0.6,
        Material::lambertian(Color::new(0.9, 0.2, 0.2)),
    );
    scene.add_sphere(
        Vec3::new(0.0, 0.6, -4.0),
        0.6,
        Material::lambertian(Color::new(0.2, 0.9, 0.2)),
    );
    scene.add_sphere(
        Vec3::new(3.0, 0.6, -4.0),
        0.6,
        Material::lambertian(Color::new(0.2, 0.2, 0.9)),
    );

    scene.add_sphere(
        Vec3::new(-5.0, 8.0, -3.0),
        2.0,
        Material::emissive(Color::new(1.0, 1.0, 1.0) * 12.0),
    );
    scene.add_sphere(
        Vec3::new(5.0, 8.0, -3.0),
        2.0,
        Material::emissive(Color::new(1.0, 1.0, 1.0) * 12.0),
    );

    scene.ambient = Color::new(0.5, 0.55, 0.6);

    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 2.5, -10.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y)
        .with_aspect_ratio(aspect_ratio)
        .with_lens(50.0, 0.0, 10.0);

    (scene, camera)
}

fn studio_lighting(aspect_ratio: f32) -> (Scene, Camera) {
    let mut scene = Scene::new();

    let ground = Material::lambertian(Color::new(0.5, 0.5, 0.5));
    let glass = Material::dielectric(1.5);
    let metal_gold = Material::metal(Color::new(1.0, 0.85, 0.57), 0.1);
    let metal_chrome = Material::metal(Color::new(0.9, 0.9, 0.9), 0.0);

    // Three key lights of rising power, from a warm fill to a hard white
    let light_dim = Material::emissive(Color::new(1.0, 0.9, 0.8) * 3.0);
    let light_bright = Material::emissive(Color::new(1.0, 0.7, 0.3) * 10.0);
    let light_very_bright = Material::emissive(Color::new(1.0, 1.0, 1.0) * 30.0);

    scene.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground);
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, glass);
    scene.add_sphere(Vec3::new(-3.0, 1.0, 0.0), 1.0, metal_gold);
    scene.add_sphere(Vec3::new(3.0, 1.0, 0.0), 1.0, metal_chrome);

    scene.add_sphere(Vec3::new(-3.0, 1.5, -5.0), 1.0, light_dim);
    scene.add_sphere(Vec3::new(0.0, 2.0, -5.0), 1.2, light_bright);
    scene.add_sphere(Vec3::new(3.0, 1.5, -5.0), 1.0, light_very_bright);

    // Small accent lights in front of the subjects
    scene.add_sphere(Vec3::new(-1.5, 0.3, 2.0), 0.3, light_bright);
    scene.add_sphere(Vec3::new(1.5, 0.3, 2.0), 0.3, light_very_bright);

    // Near-black ambient so the emitters dominate
    scene.ambient = Color::new(0.02, 0.02, 0.03);

    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 2.0, 8.0), Vec3::new(0.0, 1.0, -2.0), Vec3::Y)
        .with_aspect_ratio(aspect_ratio)
        .with_lens(40.0, 0.05, 10.0);

    (scene, camera)
}

fn material_blend(aspect_ratio: f32) -> (Scene, Camera) {
    let mut scene = Scene::new();

    scene.add_sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Material::lambertian(Color::new(0.5, 0.5, 0.5)),
    );

    // Center: red diffuse at the base fading into gold metal at the top
    let center_blend = Material::blend(
        BlendLayer::lambertian(Color::new(0.8, 0.2, 0.2)),
        BlendLayer::metal(Color::new(1.0, 0.85, 0.3), 0.1),
        BlendMode::Vertical,
        0.0,
        2.0,
    );
    scene.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, center_blend);

    // Left: green diffuse into chrome
    let left_blend = Material::blend(
        BlendLayer::lambertian(Color::new(0.2, 0.8, 0.2)),
        BlendLayer::metal(Color::new(0.9, 0.9, 0.9), 0.0),
        BlendMode::Vertical,
        0.0,
        2.0,
    );
    scene.add_sphere(Vec3::new(-2.5, 1.0, 0.0), 1.0, left_blend);

    // Right: blue diffuse into copper
    let right_blend = Material::blend(
        BlendLayer::lambertian(Color::new(0.2, 0.4, 0.8)),
        BlendLayer::metal(Color::new(0.95, 0.64, 0.54), 0.2),
        BlendMode::Vertical,
        0.0,
        2.0,
    );
    scene.add_sphere(Vec3::new(2.5, 1.0, 0.0), 1.0, right_blend);

    // Back left: magenta diffuse into silver-blue metal across x
    let horizontal_blend = Material::blend(
        BlendLayer::lambertian(Color::new(0.9, 0.3, 0.9)),
        BlendLayer::metal(Color::new(0.7, 0.7, 0.9), 0.1),
        BlendMode::Horizontal,
        -4.0,
        -2.0,
    );
    scene.add_sphere(Vec3::new(-3.0, 0.7, -2.0), 0.7, horizontal_blend);

    // Back right: bright metal core fading into dark diffuse with distance
    let radial_blend = Material::blend(
        BlendLayer::metal(Color::new(1.0, 0.95, 0.8), 0.0),
        BlendLayer::lambertian(Color::new(0.3, 0.2, 0.1)),
        BlendMode::Radial,
        0.0,
        4.0,
    );
    scene.add_sphere(Vec3::new(3.0, 0.7, -2.0), 0.7, radial_blend);

    // Small glass sphere in front for reference
    scene.add_sphere(Vec3::new(0.0, 0.5, 2.0), 0.5, Material::dielectric(1.5));

    let light = Material::emissive(Color::new(1.0, 1.0, 1.0) * 8.0);
    scene.add_sphere(Vec3::new(-2.0, 5.0, -1.0), 1.5, light);
    scene.add_sphere(Vec3::new(2.0, 5.0, -1.0), 1.5, light);

    scene.ambient = Color::new(0.3, 0.35, 0.4);

    let camera = Camera::new()
        .with_position(Vec3::new(0.0, 2.0, 10.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y)
        .with_aspect_ratio(aspect_ratio)
        .with_lens(45.0, 0.1, 12.0);

    (scene, camera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_scene_resolves() {
        for (name, _) in SCENES {
            assert!(create(name, 4.0 / 3.0).is_some(), "missing scene: {}", name);
        }
        assert!(create("no-such-scene", 4.0 / 3.0).is_none());
    }

    #[test]
    fn test_cornell_box_contents() {
        let (scene, _) = cornell_box(4.0 / 3.0);
        // 10 wall triangles, 2 light triangles, 2 spheres
        assert_eq!(scene.len(), 14);
        assert_eq!(scene.ambient, Color::ZERO);
    }

    #[test]
    fn test_glass_spheres_contents() {
        let (scene, _) = glass_spheres(4.0 / 3.0);
        // Ground + 3 backdrop + 49 grid + 2 lights
        assert_eq!(scene.len(), 55);
    }

    #[test]
    fn test_random_spheres_is_deterministic() {
        let (first, _) = random_spheres(4.0 / 3.0);
        let (second, _) = random_spheres(4.0 / 3.0);

        assert_eq!(first.len(), second.len());
        // Ground, three heroes, and most of the 484 grid cells
        assert!(first.len() > 400);
        for (a, b) in first.primitives().iter().zip(second.primitives()) {
            assert_eq!(a.bounds(), b.bounds());
        }
    }
}
