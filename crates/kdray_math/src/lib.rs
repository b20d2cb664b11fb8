//! Math primitives shared by the kdray crates.
//!
//! Vectors come from glam; this crate adds the ray, interval and
//! bounding-box types the renderer is built on.

// Vec3 and friends
pub use glam::*;

mod aabb;
mod interval;
mod ray;

pub use aabb::{Aabb, Axis};
pub use interval::Interval;
pub use ray::Ray;

/// A point in 3D space.
pub type Point3 = Vec3;

/// Linear RGB color, one float per channel.
pub type Color = Vec3;
