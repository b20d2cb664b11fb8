//! JSON scene files.
//!
//! ```json
//! {
//!   "name": "two spheres",
//!   "config": { "image_width": 200, "samples_per_pixel": 16 },
//!   "materials": { "red": { "type": "diffuse", "albedo": [0.7, 0.3, 0.3] } },
//!   "spheres": [ { "center": [0, 0, -1], "radius": 0.5, "material": "red" } ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use kdray_renderer::{Color, Material, Point3, Sphere, SurfaceRef};
use rand::RngCore;
use serde::Deserialize;

use crate::{Scene, SceneConfig, SceneError, SceneResult};

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum MaterialData {
    Diffuse { albedo: Color },
}

impl MaterialData {
    fn build(&self) -> Material {
        match self {
            MaterialData::Diffuse { albedo } => Material::diffuse(*albedo),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SphereData {
    center: Point3,
    radius: f32,
    material: String,
}

#[derive(Debug, Deserialize)]
struct SceneData {
    #[serde(default = "default_name")]
    name: String,
    #[serde(default)]
    config: SceneConfig,
    #[serde(default)]
    materials: HashMap<String, MaterialData>,
    #[serde(default)]
    spheres: Vec<SphereData>,
}

fn default_name() -> String {
    "Scene file".to_string()
}

/// A scene read from JSON, with material references resolved.
#[derive(Debug)]
pub struct FileScene {
    name: String,
    config: SceneConfig,
    spheres: Vec<(Point3, f32, Arc<Material>)>,
}

impl FileScene {
    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}

impl Scene for FileScene {
    fn name(&self) -> &str {
        &self.name
    }

    fn config(&self) -> SceneConfig {
        self.config
    }

    fn create_objects(&self, _rng: &mut dyn RngCore) -> Vec<SurfaceRef> {
        self.spheres
            .iter()
            .map(|(center, radius, material)| {
                Arc::new(Sphere::new(*center, *radius, material.clone()).into())
            })
            .collect()
    }
}

/// Parse a scene from JSON text.
pub fn parse_scene_str(text: &str) -> SceneResult<FileScene> {
    let data: SceneData = serde_json::from_str(text)?;
    data.config.validate()?;

    let materials: HashMap<&str, Arc<Material>> = data
        .materials
        .iter()
        .map(|(name, material)| (name.as_str(), Arc::new(material.build())))
        .collect();

    let spheres = data
        .spheres
        .iter()
        .map(|s| {
            let material = materials
                .get(s.material.as_str())
                .ok_or_else(|| SceneError::UnknownMaterial(s.material.clone()))?;
            Ok((s.center, s.radius, material.clone()))
        })
        .collect::<SceneResult<Vec<_>>>()?;

    Ok(FileScene {
        name: data.name,
        config: data.config,
        spheres,
    })
}

/// Load a scene from a JSON file.
pub fn load_scene_file(path: impl AsRef<Path>) -> SceneResult<FileScene> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scene = parse_scene_str(&text)?;
    log::info!(
        "Loaded scene '{}' from {} ({} spheres)",
        scene.name,
        path.display(),
        scene.len()
    );
    Ok(scene)
}
