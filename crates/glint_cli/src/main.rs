//! Glint command line renderer.
//!
//! Renders a built-in scene to an image file:
//!   glint --scene cornell-box --width 800 --height 600 --spp 200

use std::env;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use glint_renderer::{render, RenderContext, RenderSettings};

mod scenes;

fn print_usage() {
    println!("Usage: glint [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --scene <name>     Scene to render (default: cornell-box)");
    println!("  --width <pixels>   Image width (default: 800)");
    println!("  --height <pixels>  Image height (default: 600)");
    println!("  --spp <count>      Samples per pixel (default: 100)");
    println!("  --max-depth <n>    Maximum ray bounces (default: 50)");
    println!("  --threads <n>      Worker threads, 0 = all cores (default: 0)");
    println!("  --seed <n>         Base RNG seed (default: 42)");
    println!("  --no-bvh           Intersect with a linear scan instead of a BVH");
    println!("  --output <path>    Output image, format from extension (default: render.png)");
    println!("  --list-scenes      List built-in scenes and exit");
    println!("  --help             Show this help");
}

/// Consume the value following a flag, advancing the cursor past it.
fn flag_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str> {
    *i += 1;
    match args.get(*i) {
        Some(value) => Ok(value),
        None => bail!("{} expects a value", flag),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut scene_name = String::from("cornell-box");
    let mut output = String::from("render.png");
    let mut settings = RenderSettings::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scene" => scene_name = flag_value(&args, &mut i, "--scene")?.to_string(),
            "--width" => {
                settings.width = flag_value(&args, &mut i, "--width")?
                    .parse()
                    .context("--width expects a pixel count")?;
            }
            "--height" => {
                settings.height = flag_value(&args, &mut i, "--height")?
                    .parse()
                    .context("--height expects a pixel count")?;
            }
            "--spp" => {
                settings.samples_per_pixel = flag_value(&args, &mut i, "--spp")?
                    .parse()
                    .context("--spp expects a sample count")?;
            }
            "--max-depth" => {
                settings.max_depth = flag_value(&args, &mut i, "--max-depth")?
                    .parse()
                    .context("--max-depth expects a bounce count")?;
            }
            "--threads" => {
                settings.threads = flag_value(&args, &mut i, "--threads")?
                    .parse()
                    .context("--threads expects a thread count")?;
            }
            "--seed" => {
                settings.seed = flag_value(&args, &mut i, "--seed")?
                    .parse()
                    .context("--seed expects an integer")?;
            }
            "--no-bvh" => settings.use_bvh = false,
            "--output" => output = flag_value(&args, &mut i, "--output")?.to_string(),
            "--list-scenes" => {
                println!("Available scenes:");
                for (name, description) in scenes::SCENES {
                    println!("  {:<16} {}", name, description);
                }
                return Ok(());
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                print_usage();
                bail!("Unknown option: {}", other);
            }
        }
        i += 1;
    }

    let aspect_ratio = settings.width as f32 / settings.height as f32;
    let (mut scene, camera) = match scenes::create(&scene_name, aspect_ratio) {
        Some(pair) => pair,
        None => {
            let names: Vec<&str> = scenes::SCENES.iter().map(|(name, _)| *name).collect();
            bail!(
                "Unknown scene '{}'. Available: {}",
                scene_name,
                names.join(", ")
            );
        }
    };

    log::info!("Scene '{}': {} primitives", scene_name, scene.len());
    if settings.use_bvh {
        scene.build_bvh();
    }

    let progress = |fraction: f32| {
        log::info!("Progress: {:.0}%", fraction * 100.0);
    };
    let context = RenderContext::new().with_progress(&progress);

    let start = Instant::now();
    let image = render(&scene, &camera, &settings, &context)?;
    let elapsed = start.elapsed().as_secs_f64();

    let rays = settings.width as f64 * settings.height as f64 * settings.samples_per_pixel as f64;
    log::info!(
        "Render complete: {:.2} seconds ({:.2} Mrays/s)",
        elapsed,
        rays / (elapsed * 1e6)
    );

    image
        .save(&output)
        .with_context(|| format!("Failed to save {}", output))?;
    log::info!("Wrote {}", output);

    Ok(())
}
