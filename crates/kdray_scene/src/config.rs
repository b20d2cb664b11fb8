//! Scene configuration: output resolution, sampling and camera.

use kdray_renderer::{Camera, Point3, RenderConfig, Vec3};
use serde::{Deserialize, Serialize};

use crate::{SceneError, SceneResult};

/// Configuration shared by every scene.
///
/// Missing fields in a JSON scene file take the values of
/// [`SceneConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Width / height
    pub aspect_ratio: f32,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    /// Bounce budget per camera ray
    pub max_depth: i32,

    pub camera_position: Point3,
    pub camera_target: Point3,
    pub camera_up: Vec3,
    /// Vertical field of view in degrees
    pub camera_vfov: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 400,
            samples_per_pixel: 100,
            max_depth: 50,
            camera_position: Point3::ZERO,
            camera_target: Point3::new(0.0, 0.0, -1.0),
            camera_up: Vec3::Y,
            camera_vfov: 90.0,
        }
    }
}

impl SceneConfig {
    /// Image height derived from the width and aspect ratio (truncated).
    pub fn image_height(&self) -> u32 {
        (self.image_width as f32 / self.aspect_ratio) as u32
    }

    /// Check that the configuration can produce an image.
    pub fn validate(&self) -> SceneResult<()> {
        let invalid = |msg: String| Err(SceneError::InvalidConfig(msg));

        if self.aspect_ratio.is_nan() || self.aspect_ratio <= 0.0 {
            return invalid(format!("aspect ratio must be positive, got {}", self.aspect_ratio));
        }
        if self.image_width < 2 {
            return invalid(format!("image width must be at least 2, got {}", self.image_width));
        }
        if self.image_height() < 2 {
            return invalid(format!(
                "image height must be at least 2, got {} (width {} / aspect {})",
                self.image_height(),
                self.image_width,
                self.aspect_ratio
            ));
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples per pixel must be at least 1".to_string());
        }
        if self.camera_vfov.is_nan() || self.camera_vfov <= 0.0 || self.camera_vfov >= 180.0 {
            return invalid(format!(
                "vertical field of view must be in (0, 180) degrees, got {}",
                self.camera_vfov
            ));
        }
        if self.camera_position == self.camera_target {
            return invalid("camera position and target coincide".to_string());
        }
        Ok(())
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            image_width: self.image_width,
            image_height: self.image_height(),
            samples_per_pixel: self.samples_per_pixel,
            max_depth: self.max_depth,
        }
    }

    pub fn camera(&self) -> Camera {
        Camera::new(
            self.camera_position,
            self.camera_target,
            self.camera_up,
            self.camera_vfov,
            self.aspect_ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.image_width, 400);
        assert_eq!(config.image_height(), 225);
        assert_eq!(config.samples_per_pixel, 100);
        assert_eq!(config.max_depth, 50);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_image_height_truncates() {
        let config = SceneConfig {
            aspect_ratio: 3.0 / 2.0,
            image_width: 601,
            ..Default::default()
        };
        assert_eq!(config.image_height(), 400);
    }

    #[test]
    fn test_render_config() {
        let config = SceneConfig {
            image_width: 600,
            aspect_ratio: 1.5,
            samples_per_pixel: 50,
            max_depth: 7,
            ..Default::default()
        };
        let render = config.render_config();
        assert_eq!(render.image_width, 600);
        assert_eq!(render.image_height, 400);
        assert_eq!(render.samples_per_pixel, 50);
        assert_eq!(render.max_depth, 7);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad = [
            SceneConfig { image_width: 1, ..Default::default() },
            SceneConfig { image_width: 3, ..Default::default() },
            SceneConfig { samples_per_pixel: 0, ..Default::default() },
            SceneConfig { aspect_ratio: 0.0, ..Default::default() },
            SceneConfig { aspect_ratio: -1.0, ..Default::default() },
            SceneConfig { aspect_ratio: f32::NAN, ..Default::default() },
            SceneConfig { camera_vfov: 0.0, ..Default::default() },
            SceneConfig { camera_vfov: 180.0, ..Default::default() },
            SceneConfig { camera_target: Point3::ZERO, ..Default::default() },
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(SceneError::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SceneConfig =
            serde_json::from_str(r#"{ "image_width": 200, "camera_position": [1, 2, 3] }"#).unwrap();
        assert_eq!(config.image_width, 200);
        assert_eq!(config.camera_position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(config.samples_per_pixel, 100);
        assert_eq!(config.camera_vfov, 90.0);
    }
}
