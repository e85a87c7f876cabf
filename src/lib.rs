#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod animation;
pub mod config;
pub mod curve;
pub mod errors;
pub mod export;
pub mod procedural;
pub mod project;
pub mod resources;
pub mod scene;
pub mod utils;

pub use animation::{AnimationAction, AnimationClip, AnimationMixer, Binder, KeyframeTrack};
pub use config::ProjectConfig;
pub use curve::{BezierSpline, ControlPoint, Curve, CurvePath};
pub use errors::{Result, ShapeshiftError};
pub use export::SceneManifest;
pub use project::Project;
pub use scene::{Camera, Light, Node, NodeHandle, Scene};
