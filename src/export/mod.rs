//! Scene export
//!
//! The built scene leaves the crate as a JSON manifest that an external
//! renderer turns into frames.

pub mod manifest;

pub use manifest::{
    CameraEntry, CurveEntry, FrameEntry, LightEntry, MarkerEntry, RiderEntry, RiderPose,
    SceneManifest, manifest_path, write_manifest,
};
