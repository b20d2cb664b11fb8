//! Built-in scenes.

use std::sync::Arc;

use kdray_renderer::{gen_f32, Color, Material, Point3, Sphere, SurfaceRef};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::{Scene, SceneConfig};

fn sphere(center: Point3, radius: f32, material: Arc<Material>) -> SurfaceRef {
    Arc::new(Sphere::new(center, radius, material).into())
}

/// Ground plus three spheres in a row in front of the camera.
pub struct SimpleScene;

impl Scene for SimpleScene {
    fn name(&self) -> &str {
        "Simple Scene (4 spheres)"
    }

    fn config(&self) -> SceneConfig {
        SceneConfig::default()
    }

    fn create_objects(&self, _rng: &mut dyn RngCore) -> Vec<SurfaceRef> {
        let ground = Arc::new(Material::diffuse(Color::new(0.8, 0.8, 0.0)));
        let center = Arc::new(Material::diffuse(Color::new(0.7, 0.3, 0.3)));
        let left = Arc::new(Material::diffuse(Color::new(0.0, 0.0, 1.0)));
        let right = Arc::new(Material::diffuse(Color::new(0.8, 0.6, 0.2)));

        vec![
            sphere(Point3::new(0.0, -100.5, -1.0), 100.0, ground),
            sphere(Point3::new(0.0, 0.0, -1.0), 0.5, center),
            sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, left),
            sphere(Point3::new(1.0, 0.0, -1.0), 0.5, right),
        ]
    }
}

/// A field of several hundred small spheres around three large ones.
///
/// Sphere positions and material classes come from a generator seeded with
/// `layout_seed`, so the layout is the same on every run. Albedos are drawn
/// from the caller's generator.
pub struct ComplexScene {
    layout_seed: u64,
}

impl ComplexScene {
    pub const DEFAULT_SEED: u64 = 42;

    /// Radius of the small spheres.
    const SMALL_RADIUS: f32 = 0.2;

    pub fn new() -> Self {
        Self::with_seed(Self::DEFAULT_SEED)
    }

    pub fn with_seed(layout_seed: u64) -> Self {
        Self { layout_seed }
    }

    fn random_color(rng: &mut dyn RngCore) -> Color {
        Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng))
    }
}

impl Default for ComplexScene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for ComplexScene {
    fn name(&self) -> &str {
        "Complex Scene (500+ spheres)"
    }

    fn config(&self) -> SceneConfig {
        SceneConfig {
            aspect_ratio: 3.0 / 2.0,
            image_width: 600,
            samples_per_pixel: 50,
            max_depth: 50,
            camera_position: Point3::new(13.0, 3.0, 3.0),
            camera_target: Point3::new(0.0, 1.0, 0.0),
            camera_up: Point3::Y,
            camera_vfov: 25.0,
        }
    }

    fn create_objects(&self, rng: &mut dyn RngCore) -> Vec<SurfaceRef> {
        let mut layout = StdRng::seed_from_u64(self.layout_seed);
        let mut objects = Vec::with_capacity(22 * 22 + 4);

        let ground = Arc::new(Material::diffuse(Color::splat(0.5)));
        objects.push(sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, ground));

        let keep_clear = Point3::new(4.0, 0.2, 0.0);
        for a in -11..11 {
            for b in -11..11 {
                let choose_mat = gen_f32(&mut layout);
                let center = Point3::new(
                    a as f32 + 0.9 * gen_f32(&mut layout),
                    Self::SMALL_RADIUS,
                    b as f32 + 0.9 * gen_f32(&mut layout),
                );

                if (center - keep_clear).length() <= 0.9 {
                    continue;
                }

                let albedo = if choose_mat < 0.8 {
                    Self::random_color(rng)
                } else {
                    // darker
                    Self::random_color(rng) * 0.5
                };
                objects.push(sphere(center, Self::SMALL_RADIUS, Arc::new(Material::diffuse(albedo))));
            }
        }

        let big = [
            (Point3::new(-4.0, 1.0, 0.0), Color::new(0.4, 0.2, 0.1)),
            (Point3::new(0.0, 1.0, 0.0), Color::new(0.7, 0.6, 0.5)),
            (Point3::new(4.0, 1.0, 0.0), Color::new(0.7, 0.3, 0.3)),
        ];
        for (center, albedo) in big {
            objects.push(sphere(center, 1.0, Arc::new(Material::diffuse(albedo))));
        }

        log::debug!("Complex scene generated {} spheres", objects.len());
        objects
    }
}

/// The built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneKind {
    #[default]
    Simple,
    Complex,
}

impl SceneKind {
    pub fn build(self) -> Box<dyn Scene> {
        match self {
            SceneKind::Simple => Box::new(SimpleScene),
            SceneKind::Complex => Box::new(ComplexScene::new()),
        }
    }
}
