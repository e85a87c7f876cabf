use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderEngine {
    Cycles,
    Eevee,
    Workbench,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RenderDevice {
    Cpu,
    Gpu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Container {
    Mpeg4,
    Matroska,
    Quicktime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoCodec {
    H264,
    Av1,
}

/// Encoded video output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub container: Container,
    pub codec: VideoCodec,
    pub filepath: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            container: Container::Mpeg4,
            codec: VideoCodec::H264,
            filepath: PathBuf::from("/tmp/render.mp4"),
        }
    }
}

/// Scene-level timing and render configuration handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub frame_start: u32,
    pub frame_end: u32,
    pub fps: u32,

    pub engine: RenderEngine,
    pub device: RenderDevice,
    pub samples: u32,
    /// Colour-management look applied on top of the view transform.
    pub view_look: String,

    pub resolution_x: u32,
    pub resolution_y: u32,
    pub resolution_percentage: u32,

    pub output: OutputSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            frame_start: 1,
            frame_end: 250,
            fps: 24,
            engine: RenderEngine::Eevee,
            device: RenderDevice::Cpu,
            samples: 64,
            view_look: "None".to_string(),
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100,
            output: OutputSettings::default(),
        }
    }
}

impl RenderSettings {
    /// Number of frames in the inclusive range `frame_start..=frame_end`.
    #[must_use]
    pub fn frame_count(&self) -> u32 {
        (self.frame_end + 1).saturating_sub(self.frame_start)
    }

    /// Final output size after the percentage scale.
    #[must_use]
    pub fn output_resolution(&self) -> (u32, u32) {
        let scale = |v: u32| v * self.resolution_percentage / 100;
        (scale(self.resolution_x), scale(self.resolution_y))
    }

    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.resolution_x as f32 / self.resolution_y.max(1) as f32
    }

    /// Playback length in seconds.
    #[must_use]
    pub fn duration_seconds(&self) -> f32 {
        self.frame_count() as f32 / self.fps.max(1) as f32
    }
}
