//! Path riders
//!
//! Riders are spaced `step` path frames apart and each one advances by exactly
//! one step per loop, so at the last frame every rider stands where the next one
//! started and the animation repeats without a seam.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::animation::{
    AnimationAction, AnimationClip, Binder, Extrapolation, InterpolationMode, KeyframeTrack,
    TargetPath, Track,
};
use crate::errors::Result;
use crate::resources::Mesh;
use crate::resources::primitives::SphereOptions;
use crate::scene::{Constraint, FollowPath, NodeHandle, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnParams {
    pub count: usize,
    /// Offset distance between neighbouring riders, in path frames.
    pub step: f32,
    pub start_frame: f32,
    /// Frames between the two keys of every rider.
    pub loop_length: f32,
    pub marker_radius: f32,
    pub use_curve_follow: bool,
}

impl Default for SpawnParams {
    fn default() -> Self {
        Self {
            count: 40,
            step: 2.5,
            start_frame: 1.0,
            loop_length: 120.0,
            marker_radius: 0.2,
            use_curve_follow: true,
        }
    }
}

impl SpawnParams {
    #[must_use]
    pub fn specs(&self) -> Vec<RiderSpec> {
        spawn_riders(self.count, self.step, self.start_frame, self.loop_length)
    }
}

/// Animation plan of one rider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiderSpec {
    pub index: usize,
    pub start_value: f32,
    pub mid_value: f32,
    pub start_frame: f32,
    pub end_frame: f32,
}

impl RiderSpec {
    /// Offset at any frame, including before the first and after the last key.
    #[must_use]
    pub fn offset_at(&self, frame: f32) -> f32 {
        let slope = (self.mid_value - self.start_value) / (self.end_frame - self.start_frame);
        self.start_value + slope * (frame - self.start_frame)
    }

    /// The two `(frame, value)` keys.
    #[must_use]
    pub fn keyframes(&self) -> [(f32, f32); 2] {
        [
            (self.start_frame, self.start_value),
            (self.end_frame, self.mid_value),
        ]
    }

    #[must_use]
    pub fn rider_name(&self) -> String {
        format!("Rider.{:03}", self.index)
    }

    #[must_use]
    pub fn marker_name(&self) -> String {
        format!("Marker.{:03}", self.index)
    }
}

#[must_use]
pub fn spawn_riders(count: usize, step: f32, start_frame: f32, loop_length: f32) -> Vec<RiderSpec> {
    (0..count)
        .map(|index| {
            let start_value = index as f32 * step;
            RiderSpec {
                index,
                start_value,
                mid_value: step + start_value,
                start_frame,
                end_frame: start_frame + loop_length,
            }
        })
        .collect()
}

/// Two-key path-offset clip for the node named `node_name`.
#[must_use]
pub fn rider_clip(spec: &RiderSpec, node_name: &str) -> AnimationClip {
    let [(t0, v0), (t1, v1)] = spec.keyframes();
    let track = KeyframeTrack::new(vec![t0, t1], vec![v0, v1], InterpolationMode::Linear)
        .with_extrapolation(Extrapolation::Linear);
    AnimationClip::new(
        format!("{node_name}Action"),
        vec![Track::scalar(node_name, TargetPath::PathOffset, track)],
    )
}

/// Handles of one spawned rider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiderHandles {
    pub rider: NodeHandle,
    pub marker: NodeHandle,
}

/// Creates a rider node, its marker child and its action for every spec.
pub fn populate_riders(
    scene: &mut Scene,
    curve: NodeHandle,
    specs: &[RiderSpec],
    params: &SpawnParams,
) -> Result<Vec<RiderHandles>> {
    // Fails early when the target is not a curve.
    scene.curve(curve)?;

    let mut handles = Vec::with_capacity(specs.len());
    for spec in specs {
        let name = spec.rider_name();
        let rider = scene.create_empty(&name, glam::Vec3::ZERO);

        let mut follow = FollowPath::new(curve).with_curve_follow(params.use_curve_follow);
        follow.offset = spec.start_value;
        scene.add_constraint(rider, Constraint::FollowPath(follow))?;

        let marker = scene.add_mesh_to_parent(
            Mesh::new_sphere(spec.marker_name(), SphereOptions::with_radius(params.marker_radius)),
            rider,
        );

        let clip = Arc::new(rider_clip(spec, &name));
        let bindings = Binder::bind(scene, rider, &clip);
        scene
            .animation_mixer
            .add_action(AnimationAction::new(clip).with_bindings(bindings));

        handles.push(RiderHandles { rider, marker });
    }

    log::info!("Spawned {} riders on the path", handles.len());
    Ok(handles)
}
