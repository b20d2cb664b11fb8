//! Radiance estimator and the per-pixel sampling loop.
//!
//! Each pixel sums jittered camera-ray estimates; averaging and gamma
//! correction happen when the sums are converted to bytes.

use crate::{gen_f32, Camera, Color, Hittable, Ray, Scatter};
use kdray_math::Interval;
use rand::RngCore;

/// Smallest accepted hit distance; keeps scattered rays off their own surface.
const SHADOW_EPSILON: f32 = 0.001;

/// Image size, sample count and bounce budget for one render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Jittered camera rays per pixel
    pub samples_per_pixel: u32,
    /// Scatter events allowed per camera ray
    pub max_depth: i32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
        }
    }
}

/// Monte Carlo estimate of the light arriving along `ray`.
///
/// Follows the path through `depth` scatter events at most. Paths that run
/// out of bounces or get absorbed contribute black; paths that escape pick
/// up the sky gradient.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: i32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded the ray bounce limit, no more light is gathered
    if depth <= 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_EPSILON, f32::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        // Componentwise product attenuates each channel separately
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Vertical blend from white (looking down) to sky blue (looking up).
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    Color::ONE.lerp(Color::new(0.5, 0.7, 1.0), a)
}

/// Gamma 2: square root, with non-positive values mapped to zero.
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a sum of `samples` radiance estimates to 8-bit RGB.
pub fn color_to_rgb(sum: Color, samples: u32) -> [u8; 3] {
    let scale = 1.0 / samples.max(1) as f32;
    let intensity = Interval::new(0.0, 0.999);
    let to_byte = |c: f32| (256.0 * intensity.clamp(linear_to_gamma(scale * c))) as u8;
    [to_byte(sum.x), to_byte(sum.y), to_byte(sum.z)]
}

/// Sum of `samples_per_pixel` jittered estimates for pixel `(i, j)`.
///
/// `j` counts scanlines from the bottom of the image. The result is not
/// averaged; [`color_to_rgb`] divides by the sample count.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let width_span = config.image_width.saturating_sub(1).max(1) as f32;
    let height_span = config.image_height.saturating_sub(1).max(1) as f32;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let u = (i as f32 + gen_f32(rng)) / width_span;
        let v = (j as f32 + gen_f32(rng)) / height_span;
        let ray = camera.get_ray(u, v);
        pixel_color += ray_color(&ray, world, config.max_depth, rng);
    }
    pixel_color
}

/// Summed pixel colors, stored top scanline first.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Number of estimates summed into every pixel
    pub samples_per_pixel: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// All-black buffer.
    pub fn new(width: u32, height: u32, samples_per_pixel: u32) -> Self {
        Self {
            width,
            height,
            samples_per_pixel,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at column `x`, row `y` (row 0 is the top).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at column `x`, row `y` (row 0 is the top).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Gamma-corrected 8-bit RGB triples in storage order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| color_to_rgb(*c, self.samples_per_pixel))
            .collect()
    }
}

/// Trace every pixel of the image.
///
/// Scanlines are traced from `image_height - 1` down to `0`; the first one
/// traced becomes row 0 of the buffer, so the buffer reads top to bottom.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.image_width, config.image_height, config.samples_per_pixel);

    for j in (0..config.image_height).rev() {
        log::debug!("Scanlines remaining: {}", j);
        let row = config.image_height - 1 - j;
        for i in 0..config.image_width {
            let color = render_pixel(camera, world, i, j, config, rng);
            image.set(i, row, color);
        }
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KdTree, Material, Sphere, SurfaceList, SurfaceRef, Vec3};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn two_sphere_world() -> Vec<SurfaceRef> {
        let ground = Arc::new(Material::diffuse(Color::new(0.8, 0.8, 0.0)));
        let center = Arc::new(Material::diffuse(Color::new(0.7, 0.3, 0.3)));
        vec![
            Arc::new(Sphere::new(Vec3::new(0.0, -100.5, -1.0), 100.0, ground).into()),
            Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, center).into()),
        ]
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        let down = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0)));
        let level = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::X));

        assert!((up - Color::new(0.5, 0.7, 1.0)).length() < 1e-6);
        assert!((down - Color::ONE).length() < 1e-6);
        assert!((level - Color::new(0.75, 0.85, 1.0)).length() < 1e-6);

        // Zero direction does not produce NaN
        let zero = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::ZERO));
        assert!(!zero.is_nan());
    }

    #[test]
    fn test_ray_color_depth_zero_is_black() {
        let world = KdTree::from_objects(two_sphere_world());
        let mut rng = StdRng::seed_from_u64(1);

        let rays = [
            Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0)),
            Ray::new(Vec3::ZERO, Vec3::Y),
            Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(-1.0, 0.3, 0.2)),
        ];
        for ray in rays {
            assert_eq!(ray_color(&ray, &world, 0, &mut rng), Color::ZERO);
            assert_eq!(ray_color(&ray, &world, -3, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_ray_color_miss_returns_sky() {
        let world = KdTree::from_objects(two_sphere_world());
        let mut rng = StdRng::seed_from_u64(1);

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(ray_color(&ray, &world, 5, &mut rng), sky_gradient(&ray));

        // An empty world is all sky
        let empty = SurfaceList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&ray, &empty, 1, &mut rng), sky_gradient(&ray));
    }

    #[test]
    fn test_ray_color_last_bounce_is_black() {
        let world = KdTree::from_objects(two_sphere_world());
        let mut rng = StdRng::seed_from_u64(1);

        // Hits the small sphere; the single remaining bounce is spent on scattering
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&ray, &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_ray_color_attenuates_componentwise() {
        let world = KdTree::from_objects(two_sphere_world());
        let mut rng = StdRng::seed_from_u64(9);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        for _ in 0..50 {
            let c = ray_color(&ray, &world, 2, &mut rng);
            // Either black (second hit) or albedo * sky, which keeps the red tint
            assert!(c.x <= 0.7 + 1e-6 && c.y <= 0.3 + 1e-6 && c.z <= 0.3 + 1e-6);
            if c != Color::ZERO {
                assert!(c.x > c.y);
            }
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgb() {
        assert_eq!(color_to_rgb(Color::ZERO, 1), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::ONE, 1), [255, 255, 255]);
        // Sum of four samples averaging 0.25 -> gamma 0.5 -> 128
        assert_eq!(color_to_rgb(Color::splat(1.0), 4), [128, 128, 128]);
        // Out-of-range values are clamped
        assert_eq!(color_to_rgb(Color::new(9.0, -1.0, 0.0), 1), [255, 0, 0]);
    }

    #[test]
    fn test_render_pixel_sums_samples() {
        // No geometry: every sample is sky, so the sum grows with the count
        let world = SurfaceList::new();
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, 90.0, 1.0);
        let mut rng = StdRng::seed_from_u64(42);

        let config = RenderConfig {
            image_width: 10,
            image_height: 10,
            samples_per_pixel: 8,
            max_depth: 5,
        };
        let sum = render_pixel(&camera, &world, 5, 5, &config, &mut rng);
        let avg = sum / 8.0;
        assert!(sum.z > 7.9 && sum.z < 8.1);
        assert!(avg.x >= 0.5 && avg.x <= 1.0);
    }

    #[test]
    fn test_render_is_reproducible_with_seed() {
        let world = KdTree::from_objects(two_sphere_world());
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, 90.0, 1.0);
        let config = RenderConfig {
            image_width: 6,
            image_height: 6,
            samples_per_pixel: 4,
            max_depth: 10,
        };

        let a = render(&camera, &world, &config, &mut StdRng::seed_from_u64(5));
        let b = render(&camera, &world, &config, &mut StdRng::seed_from_u64(5));
        assert_eq!(a.pixels, b.pixels);
        assert_eq!(a.to_rgb8().len(), 6 * 6 * 3);
    }

    #[test]
    fn test_render_rows_top_to_bottom() {
        // Sky only: the top row looks up, so it is bluer (less red) than the bottom row
        let world = SurfaceList::new();
        let camera = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y, 90.0, 1.0);
        let config = RenderConfig {
            image_width: 4,
            image_height: 4,
            samples_per_pixel: 1,
            max_depth: 1,
        };
        let image = render(&camera, &world, &config, &mut StdRng::seed_from_u64(0));
        assert!(image.get(0, 0).x < image.get(0, 3).x);
    }
}
