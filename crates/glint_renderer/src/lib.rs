//! Glint - CPU Path Tracing
//!
//! A Monte Carlo path tracer for physically-based rendering: spheres and
//! triangles, five material models, a binned-SAH BVH, a thin-lens camera,
//! and a chunk-stealing parallel sampler with ACES tonemapped output.

mod bvh;
mod camera;
mod image;
mod integrator;
mod material;
mod primitive;
mod renderer;
mod sampling;
mod scene;

pub use bvh::Bvh;
pub use camera::Camera;
pub use integrator::trace;
pub use material::{BlendKind, BlendLayer, BlendMode, Color, Material, ScatterResult};
pub use primitive::{HitRecord, Primitive, Shape, Sphere, Triangle};
pub use renderer::{render, ProgressFn, RenderContext, RenderError, RenderSettings};
pub use sampling::{random_in_unit_disk, random_in_unit_sphere, random_unit_vector};
pub use scene::Scene;
pub use self::image::{aces_tonemap, ImageBuffer};

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Aabb, Interval, Ray, Vec3};
