//! Keyframe animation
//!
//! - [`KeyframeTrack`]: times + values with interpolation and extrapolation
//! - [`AnimationClip`]: named set of tracks addressed by node name
//! - [`Binder`]: resolves track node names to scene handles
//! - [`AnimationMixer`] / [`AnimationSystem`]: evaluate actions at a scene frame

pub mod action;
pub mod binder;
pub mod binding;
pub mod clip;
pub mod mixer;
pub mod system;
pub mod tracks;
pub mod values;

pub use action::{AnimationAction, TrackValue};
pub use binder::Binder;
pub use binding::{PropertyBinding, TargetPath};
pub use clip::{AnimationClip, Track, TrackData, TrackMeta};
pub use mixer::AnimationMixer;
pub use system::AnimationSystem;
pub use tracks::{Extrapolation, InterpolationMode, KeyframeCursor, KeyframeTrack};
pub use values::Interpolatable;
