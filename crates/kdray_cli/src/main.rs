//! kdray - render a sphere scene to PPM (or any format the `image` crate writes).
//!
//! The image goes to stdout unless `--output` is given; logs go to stderr.

use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use kdray_renderer::{
    render, save_image, write_ppm, Hittable, KdTree, RenderStats, SurfaceList, SurfaceRef,
};
use kdray_scene::{load_scene_file, Scene, SceneConfig, SceneKind};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum SceneArg {
    /// Ground and three spheres
    Simple,
    /// Several hundred random spheres
    Complex,
}

impl From<SceneArg> for SceneKind {
    fn from(arg: SceneArg) -> Self {
        match arg {
            SceneArg::Simple => SceneKind::Simple,
            SceneArg::Complex => SceneKind::Complex,
        }
    }
}

/// CPU path tracer with a kd-tree spatial index.
#[derive(Parser, Debug)]
#[command(name = "kdray", version)]
#[command(about = "Renders sphere scenes with a Monte Carlo path tracer")]
struct Cli {
    /// Built-in scene to render.
    #[arg(value_enum, default_value_t = SceneArg::Simple)]
    scene: SceneArg,

    /// Intersect against a flat object list.
    #[arg(long, conflicts_with = "kdtree")]
    list: bool,

    /// Intersect through the kd-tree (default).
    #[arg(long)]
    kdtree: bool,

    /// Load the scene from a JSON file instead of a built-in one.
    #[arg(long, value_name = "PATH")]
    scene_file: Option<PathBuf>,

    /// Output image; the format follows the extension. Defaults to PPM on stdout.
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Seed for the sampling generator.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the image width.
    #[arg(long)]
    width: Option<u32>,

    /// Override the samples per pixel.
    #[arg(long)]
    samples: Option<u32>,

    /// Override the maximum bounce depth.
    #[arg(long)]
    max_depth: Option<i32>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Acceleration {
    List,
    KdTree,
}

impl Cli {
    fn acceleration(&self) -> Acceleration {
        if self.list {
            Acceleration::List
        } else {
            Acceleration::KdTree
        }
    }

    fn load_scene(&self) -> Result<Box<dyn Scene>> {
        match &self.scene_file {
            Some(path) => {
                let scene = load_scene_file(path)
                    .with_context(|| format!("Failed to load scene file: {}", path.display()))?;
                Ok(Box::new(scene))
            }
            None => Ok(SceneKind::from(self.scene).build()),
        }
    }

    /// Command-line values take precedence over the scene's own settings.
    fn apply_overrides(&self, mut config: SceneConfig) -> SceneConfig {
        if let Some(width) = self.width {
            config.image_width = width;
        }
        if let Some(samples) = self.samples {
            config.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        config
    }
}

fn build_world(acceleration: Acceleration, objects: Vec<SurfaceRef>) -> Box<dyn Hittable> {
    match acceleration {
        Acceleration::List => Box::new(SurfaceList::from_objects(objects)),
        Acceleration::KdTree => Box::new(KdTree::from_objects(objects)),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let scene = cli.load_scene()?;
    let config = cli.apply_overrides(scene.config());
    config.validate().context("Invalid render settings")?;

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let render_config = config.render_config();
    log::info!("Scene: {}", scene.name());
    log::info!(
        "Resolution: {}x{}, {} samples per pixel, max depth {}",
        render_config.image_width,
        render_config.image_height,
        render_config.samples_per_pixel,
        render_config.max_depth
    );

    let objects = scene.create_objects(&mut rng);
    let acceleration = cli.acceleration();
    log::info!("Acceleration: {:?}, {} objects", acceleration, objects.len());
    let world = build_world(acceleration, objects);

    let camera = config.camera();
    let start = Instant::now();
    let image = render(&camera, world.as_ref(), &render_config, &mut rng);
    let stats = RenderStats::new(
        start.elapsed(),
        render_config.image_width,
        render_config.image_height,
        render_config.samples_per_pixel,
    );

    match &cli.output {
        Some(path) => save_image(path, &image)
            .with_context(|| format!("Failed to save image: {}", path.display()))?,
        None => write_ppm(BufWriter::new(io::stdout().lock()), &image)
            .context("Failed to write PPM to stdout")?,
    }

    stats.log();
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    run(&cli)
}
