//! Multithreaded render scheduler.
//!
//! Workers claim chunks of the flat pixel index space from a shared atomic
//! cursor, trace every pixel in the chunk, and write results through a
//! raw-pointer view of the output buffer. Chunk claiming keeps the writes
//! disjoint; no pixel is ever touched by two workers.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::camera::Camera;
use crate::image::ImageBuffer;
use crate::integrator::trace;
use crate::material::Color;
use crate::scene::Scene;

/// Pixels claimed per scheduling step.
const CHUNK_SIZE: usize = 16;
/// The progress sink fires once per this many finished pixels.
const PROGRESS_INTERVAL: usize = 1000;
/// Seed stride between worker RNG streams.
const WORKER_SEED_STRIDE: u64 = 1000;

/// Errors that can occur during rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Image dimensions must be non-zero: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    #[error("Sample count must be non-zero")]
    NoSamples,

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Image size and sampling quality settings.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub use_bvh: bool,
    /// Worker thread count; 0 uses all available cores.
    pub threads: usize,
    /// Base seed for the per-worker sample streams.
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            samples_per_pixel: 100,
            max_depth: 50,
            use_bvh: true,
            threads: 0,
            seed: 42,
        }
    }
}

/// Progress callback, invoked with the finished fraction in [0, 1].
pub type ProgressFn<'a> = dyn Fn(f32) + Sync + 'a;

/// Cross-cutting signals threaded through a render call.
///
/// Both signals are optional; a default context renders to completion
/// silently.
#[derive(Default, Clone, Copy)]
pub struct RenderContext<'a> {
    cancel: Option<&'a AtomicBool>,
    progress: Option<&'a ProgressFn<'a>>,
}

impl<'a> RenderContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cooperative cancellation: workers poll the flag between pixels and
    /// between samples, and stop early when it is set.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn with_progress(mut self, sink: &'a ProgressFn<'a>) -> Self {
        self.progress = Some(sink);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.map_or(false, |flag| flag.load(Ordering::Relaxed))
    }
}

/// Pixel buffer view shared across worker threads.
///
/// Soundness rests on the chunk cursor: each flat index is claimed by
/// exactly one worker, so writes never alias.
struct SharedPixels {
    ptr: *mut Color,
    len: usize,
}

unsafe impl Send for SharedPixels {}
unsafe impl Sync for SharedPixels {}

impl SharedPixels {
    fn new(pixels: &mut [Color]) -> Self {
        Self {
            ptr: pixels.as_mut_ptr(),
            len: pixels.len(),
        }
    }

    /// Callers must hold the exclusive claim on `index`.
    unsafe fn write(&self, index: usize, color: Color) {
        debug_assert!(index < self.len);
        *self.ptr.add(index) = color;
    }
}

/// Render `scene` through `camera` into a new [`ImageBuffer`].
///
/// Pixels hold linear radiance; tonemapping happens on save. On
/// cancellation the buffer is returned at its configured size with
/// unreached pixels still black.
///
/// Single-thread runs with a fixed seed are reproducible. Multi-thread
/// runs are not: chunk claiming is dynamic, so the pixel-to-worker
/// assignment varies between runs.
pub fn render(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    context: &RenderContext<'_>,
) -> Result<ImageBuffer, RenderError> {
    if settings.width == 0 || settings.height == 0 {
        return Err(RenderError::EmptyImage {
            width: settings.width,
            height: settings.height,
        });
    }
    if settings.samples_per_pixel == 0 {
        return Err(RenderError::NoSamples);
    }

    if settings.use_bvh && !scene.has_bvh() {
        log::warn!("BVH requested but not built; falling back to linear intersection");
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(settings.threads)
        .build()?;

    let mut image = ImageBuffer::new(settings.width, settings.height);
    let shared = SharedPixels::new(image.pixels_mut());

    let width = settings.width as usize;
    let total = width * settings.height as usize;
    let cursor = AtomicUsize::new(0);
    let done = AtomicUsize::new(0);

    log::info!(
        "Rendering {}x{} at {} spp on {} threads",
        settings.width,
        settings.height,
        settings.samples_per_pixel,
        pool.current_num_threads()
    );

    pool.broadcast(|worker| {
        let seed = settings.seed + worker.index() as u64 * WORKER_SEED_STRIDE;
        let mut rng = SmallRng::seed_from_u64(seed);

        loop {
            let start = cursor.fetch_add(CHUNK_SIZE, Ordering::Relaxed);
            if start >= total {
                break;
            }
            let end = (start + CHUNK_SIZE).min(total);

            for index in start..end {
                if context.cancelled() {
                    return;
                }

                let x = (index % width) as u32;
                let y = (index / width) as u32;
                let color = render_pixel(scene, camera, settings, context, x, y, &mut rng);
                unsafe { shared.write(index, color) };

                let finished = done.fetch_add(1, Ordering::Relaxed) + 1;
                if finished % PROGRESS_INTERVAL == 0 {
                    if let Some(sink) = context.progress {
                        sink(finished as f32 / total as f32);
                    }
                }
            }
        }
    });

    Ok(image)
}

/// Average `samples_per_pixel` jittered camera rays through pixel (x, y).
///
/// A cancelled pixel keeps its partial sum, still divided by the full
/// sample count, so it darkens rather than blowing out.
fn render_pixel<R: Rng + ?Sized>(
    scene: &Scene,
    camera: &Camera,
    settings: &RenderSettings,
    context: &RenderContext<'_>,
    x: u32,
    y: u32,
    rng: &mut R,
) -> Color {
    // One-pixel images would otherwise divide by zero.
    let u_scale = (settings.width - 1).max(1) as f32;
    let v_scale = (settings.height - 1).max(1) as f32;

    let mut color = Color::ZERO;
    for _ in 0..settings.samples_per_pixel {
        if context.cancelled() {
            break;
        }
        let u = (x as f32 + rng.gen::<f32>()) / u_scale;
        let v = 1.0 - (y as f32 + rng.gen::<f32>()) / v_scale;
        let ray = camera.get_ray(u, v, rng);
        color += trace(scene, &ray, rng, 0, settings.max_depth);
    }
    color / settings.samples_per_pixel as f32
}
