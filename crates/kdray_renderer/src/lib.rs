//! kdray renderer - CPU path tracing over a kd-tree.
//!
//! A Monte Carlo path tracer for scenes of spheres. Rays are intersected
//! against either a flat [`SurfaceList`] or a [`KdTree`] that partitions the
//! scene by bounding-box centroids.

mod camera;
mod hittable;
mod kdtree;
mod material;
mod output;
mod renderer;
mod sphere;
mod stats;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, Surface, SurfaceList, SurfaceRef};
pub use kdtree::{KdNode, KdTree, MAX_DEPTH, MIN_OBJECTS};
pub use material::{near_zero, random_unit_vector, Lambertian, Material, Scatter, ScatterResult};
pub use output::{save_image, write_ppm, OutputError};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render, render_pixel, sky_gradient, ImageBuffer,
    RenderConfig,
};
pub use sphere::Sphere;
pub use stats::RenderStats;

/// Re-export Vec3 and common math types from kdray_math
pub use kdray_math::{Aabb, Axis, Color, Interval, Point3, Ray, Vec3};

use rand::{Rng, RngCore};

/// Draw a uniform sample in `[0, 1)`.
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}
