use anyhow::Result;
use serde::{Deserialize, Serialize};
use spatial_pointer_camera::Camera;
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/showcase.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    pub camera: CameraConfig,
    pub viewport: ViewportConfig,
    pub interaction: InteractionConfig,
    pub headless: HeadlessConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Point the camera looks at on startup.
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 1.6, 0.0],
            target: [0.0, 1.0, -1.8],
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    pub fn build(&self, viewport: &ViewportConfig) -> Camera {
        let mut camera = Camera::new(self.position.into())
            .looking_at(self.target.into())
            .with_fov_degrees(self.fov_degrees)
            .with_clip(self.near, self.far);
        camera.set_aspect(viewport.width, viewport.height);
        camera
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Controller whose ray drives hit testing while an XR session presents.
    pub primary_controller: usize,
    /// Hits farther than this are ignored. Unlimited when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HeadlessConfig {
    /// Frames to simulate when no script end is reached first.
    pub frames: u64,
    /// Fixed timestep in seconds.
    pub timestep: f32,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            timestep: 1.0 / 60.0,
        }
    }
}

impl ShowcaseConfig {
    /// Load configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ShowcaseConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ShowcaseConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Showcase config not found at {}. Using defaults",
                        path.display()
                    );
                }
                ShowcaseConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("spatial-pointer-{name}-{nanos}.toml"))
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let path = temp_path("partial");
        fs::write(&path, "[interaction]\nprimary_controller = 1\n").unwrap();
        let cfg = ShowcaseConfig::load_from_path(&path);
        assert_eq!(cfg.interaction.primary_controller, 1);
        assert_eq!(cfg.interaction.max_distance, None);
        assert_eq!(cfg.viewport.width, 1280);
        assert_eq!(cfg.camera.fov_degrees, 75.0);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let path = temp_path("broken");
        fs::write(&path, "this is = = not toml").unwrap();
        let cfg = ShowcaseConfig::load_from_path(&path);
        assert_eq!(cfg.headless.frames, 600);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = temp_path("saved");
        let mut cfg = ShowcaseConfig::default();
        cfg.interaction.max_distance = Some(12.5);
        cfg.viewport.width = 640;
        cfg.save_to_path(&path).unwrap();

        let loaded = ShowcaseConfig::load_from_path(&path);
        assert_eq!(loaded.interaction.max_distance, Some(12.5));
        assert_eq!(loaded.viewport.width, 640);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn camera_builds_from_config() {
        let cfg = ShowcaseConfig::default();
        let camera = cfg.camera.build(&cfg.viewport);
        assert!((camera.aspect - 1280.0 / 720.0).abs() < 1e-6);
        assert!(camera.forward().z < 0.0);
    }
}
