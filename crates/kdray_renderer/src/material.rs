//! Materials describing how light scatters off a surface.

use std::f32::consts::PI;

use crate::{gen_f32, hittable::HitRecord, Color, Ray};
use kdray_math::Vec3;
use rand::RngCore;

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel fraction of the incoming light that survives
    pub attenuation: Color,
    /// Continuation of the light path
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Scatter: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult>;
}

/// Every material a surface can carry.
#[derive(Debug, Clone)]
pub enum Material {
    Diffuse(Lambertian),
}

impl Material {
    /// Shorthand for a Lambertian material.
    pub fn diffuse(albedo: Color) -> Self {
        Material::Diffuse(Lambertian::new(albedo))
    }
}

impl Scatter for Material {
    #[inline]
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        match self {
            Material::Diffuse(lambertian) => lambertian.scatter(ray_in, rec, rng),
        }
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }
}

impl Scatter for Lambertian {
    fn scatter(&self, _ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Uniformly distributed direction on the unit sphere.
///
/// Picks an azimuth in `[0, 2pi)` and a height `z` in `[-1, 1)`; the
/// remaining radius is `sqrt(1 - z^2)`.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let a = gen_f32(rng) * 2.0 * PI;
    let z = gen_f32(rng) * 2.0 - 1.0;
    let r = (1.0 - z * z).sqrt();
    Vec3::new(r * a.cos(), r * a.sin(), z)
}

/// True if every component of `v` is within 1e-8 of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    const S: f32 = 1e-8;
    v.x.abs() < S && v.y.abs() < S && v.z.abs() < S
}
