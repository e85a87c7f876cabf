//! Project Configuration
//!
//! [`ProjectConfig`] holds every constant the scene is built from. The default
//! value reproduces the shipped "shapeshifting" loop; a JSON file may override
//! any subset of fields.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use shapeshifter::config::ProjectConfig;
//!
//! // Defaults
//! let config = ProjectConfig::default();
//!
//! // Partial override from disk, e.g. {"riders": {"count": 20}}
//! let config = ProjectConfig::load("loop.json")?;
//! ```

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShapeshiftError};
use crate::procedural::{DeformParams, SpawnParams};
use crate::scene::{
    Container, OutputSettings, RenderDevice, RenderEngine, RenderSettings, VideoCodec,
};
use crate::utils::hex_color_to_rgb;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub location: Vec3,
    /// Focal length in millimetres.
    pub lens: f32,
    pub passepartout_alpha: f32,
    pub clip_start: f32,
    pub clip_end: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            location: Vec3::new(8.0, 0.0, 2.5),
            lens: 14.0,
            passepartout_alpha: 0.9,
            clip_start: 0.1,
            clip_end: 100.0,
        }
    }
}

/// A disk area light.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub name: String,
    pub location: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    /// Radiant power in watts.
    pub energy: f32,
    /// sRGB hex string such as `#F2E7DC`.
    pub color: String,
    /// Disk diameter.
    pub size: f32,
}

impl LightConfig {
    #[must_use]
    pub fn key() -> Self {
        Self {
            name: "KeyLight".to_string(),
            location: Vec3::new(0.0, 0.0, 4.0),
            rotation: Vec3::ZERO,
            energy: 800.0,
            color: "#F2E7DC".to_string(),
            size: 10.0,
        }
    }

    #[must_use]
    pub fn fill() -> Self {
        Self {
            name: "FillLight".to_string(),
            location: Vec3::new(0.0, 0.0, -4.0),
            rotation: Vec3::new(0.0, PI, 0.0),
            energy: 600.0,
            color: "#F29F05".to_string(),
            size: 10.0,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self::key()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub radius: f32,
    /// Points inserted into each segment of the base circle.
    pub cuts: usize,
    pub resolution_u: u32,
    pub path_duration: f32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            cuts: 18,
            resolution_u: crate::curve::DEFAULT_RESOLUTION_U,
            path_duration: crate::curve::DEFAULT_PATH_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiderConfig {
    pub count: usize,
    pub step: f32,
    pub marker_radius: f32,
    pub use_curve_follow: bool,
}

impl Default for RiderConfig {
    fn default() -> Self {
        let spawn = SpawnParams::default();
        Self {
            count: spawn.count,
            step: spawn.step,
            marker_radius: spawn.marker_radius,
            use_curve_follow: spawn.use_curve_follow,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub engine: RenderEngine,
    pub device: RenderDevice,
    pub samples: u32,
    pub view_look: String,
    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,
    pub container: Container,
    pub codec: VideoCodec,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            engine: RenderEngine::Cycles,
            device: RenderDevice::Gpu,
            samples: 96,
            view_look: "Very High Contrast".to_string(),
            resolution_x: 1080,
            resolution_y: 1080,
            resolution_percentage: 100,
            container: Container::Mpeg4,
            codec: VideoCodec::H264,
        }
    }
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

/// Top-level configuration of one looping scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub project_name: String,
    /// Prefix of every output file name.
    pub variant_label: String,
    /// Directory that receives `project_<name>/`.
    pub output_root: PathBuf,

    pub fps: u32,
    pub loop_seconds: f32,

    pub camera: CameraConfig,
    pub key_light: LightConfig,
    pub fill_light: LightConfig,
    pub curve: CurveConfig,
    pub deform: DeformParams,
    pub riders: RiderConfig,
    pub render: RenderConfig,

    /// Include per-frame rider transforms in the manifest.
    pub bake: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project_name: "shapeshifting".to_string(),
            variant_label: "omar".to_string(),
            output_root: PathBuf::from("/tmp"),
            fps: 30,
            loop_seconds: 4.0,
            camera: CameraConfig::default(),
            key_light: LightConfig::key(),
            fill_light: LightConfig::fill(),
            curve: CurveConfig::default(),
            deform: DeformParams::default(),
            riders: RiderConfig::default(),
            render: RenderConfig::default(),
            bake: true,
        }
    }
}

impl ProjectConfig {
    /// Reads a JSON config; missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fps == 0 {
            return Err(invalid("fps must be greater than zero"));
        }
        if self.frame_count() == 0 {
            return Err(invalid("loop must last at least one frame"));
        }
        if self.riders.count == 0 {
            return Err(invalid("rider count must be greater than zero"));
        }
        if self.curve.resolution_u == 0 {
            return Err(invalid("curve resolution must be greater than zero"));
        }
        if self.curve.path_duration <= 0.0 {
            return Err(invalid("path duration must be positive"));
        }
        if self.camera.lens <= 0.0 {
            return Err(invalid("camera lens must be positive"));
        }
        if self.render.resolution_x == 0 || self.render.resolution_y == 0 {
            return Err(invalid("render resolution must be non-zero"));
        }
        hex_color_to_rgb(&self.key_light.color)?;
        hex_color_to_rgb(&self.fill_light.color)?;
        Ok(())
    }

    /// Frames in one loop (`fps * loop_seconds`, rounded).
    #[must_use]
    pub fn frame_count(&self) -> u32 {
        let frames = (self.fps as f32 * self.loop_seconds).round();
        if frames <= 0.0 { 0 } else { frames as u32 }
    }

    #[must_use]
    pub fn project_dir(&self) -> PathBuf {
        self.output_root.join(format!("project_{}", self.project_name))
    }

    /// Video path for a scene variant, e.g. `/tmp/project_shapeshifting/omar_0.mp4`.
    #[must_use]
    pub fn output_path(&self, variant: usize) -> PathBuf {
        self.project_dir()
            .join(format!("{}_{variant}.mp4", self.variant_label))
    }

    #[must_use]
    pub fn render_settings(&self, variant: usize) -> RenderSettings {
        let r = &self.render;
        RenderSettings {
            frame_start: 1,
            frame_end: self.frame_count(),
            fps: self.fps,
            engine: r.engine,
            device: r.device,
            samples: r.samples,
            view_look: r.view_look.clone(),
            resolution_x: r.resolution_x,
            resolution_y: r.resolution_y,
            resolution_percentage: r.resolution_percentage,
            output: OutputSettings {
                container: r.container,
                codec: r.codec,
                filepath: self.output_path(variant),
            },
        }
    }

    /// Rider parameters; keys span the loop from the first frame to one past the last.
    #[must_use]
    pub fn spawn_params(&self) -> SpawnParams {
        SpawnParams {
            count: self.riders.count,
            step: self.riders.step,
            start_frame: 1.0,
            loop_length: self.frame_count() as f32,
            marker_radius: self.riders.marker_radius,
            use_curve_follow: self.riders.use_curve_follow,
        }
    }
}

fn invalid(msg: &str) -> ShapeshiftError {
    ShapeshiftError::InvalidConfig(msg.to_string())
}
