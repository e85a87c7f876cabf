use serde::{Deserialize, Serialize};

/// UV sphere parameters. Tessellation is left to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereOptions {
    pub radius: f32,
    pub segments: u32,
    pub ring_count: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: 32,
            ring_count: 16,
        }
    }
}

impl SphereOptions {
    #[must_use]
    pub fn with_radius(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }
}
