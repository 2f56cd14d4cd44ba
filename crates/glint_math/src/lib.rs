// Re-export glam for convenience
pub use glam::*;

// Glint math types
mod aabb;
mod interval;
mod ray;
mod vec3;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use vec3::{axis_component, reflect, refract};
