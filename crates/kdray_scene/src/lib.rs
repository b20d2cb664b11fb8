//! Scene descriptions for kdray.
//!
//! A [`Scene`] supplies a name, a [`SceneConfig`] (resolution, sampling and
//! camera) and the list of surfaces to render. Two scenes are built in; more
//! can be loaded from JSON files.

mod builtin;
mod config;
mod file;

pub use builtin::{ComplexScene, SceneKind, SimpleScene};
pub use config::SceneConfig;
pub use file::{load_scene_file, parse_scene_str, FileScene};

use kdray_renderer::SurfaceRef;
use rand::RngCore;
use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Invalid scene config: {0}")]
    InvalidConfig(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A renderable scene.
pub trait Scene {
    /// Human-readable name, used in logs.
    fn name(&self) -> &str;

    fn config(&self) -> SceneConfig;

    /// Build the scene's surfaces. Scenes with random content draw from `rng`.
    fn create_objects(&self, rng: &mut dyn RngCore) -> Vec<SurfaceRef>;
}
