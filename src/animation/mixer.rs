use glam::Vec3;

use crate::animation::action::{AnimationAction, TrackValue};
use crate::animation::binding::TargetPath;
use crate::scene::Scene;

#[derive(Debug, Default)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
}

impl AnimationMixer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
        }
    }

    pub fn add_action(&mut self, action: AnimationAction) {
        self.actions.push(action);
    }

    #[must_use]
    pub fn actions(&self) -> &[AnimationAction] {
        &self.actions
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
    }

    /// Evaluates every enabled action at `frame` and writes the results into
    /// the bound scene properties. Weights below 1 blend with the current value.
    pub fn evaluate(&mut self, frame: f32, scene: &mut Scene) {
        for action in &mut self.actions {
            if !action.enabled || action.weight <= 0.0 {
                continue;
            }
            action.set_time(frame);
            let weight = action.weight.min(1.0);

            for b in 0..action.bindings.len() {
                let (track_index, node_handle, target) = {
                    let binding = &action.bindings[b];
                    (binding.track_index, binding.node_handle, binding.target)
                };
                let Some(value) = action.sample_track(track_index) else {
                    continue;
                };
                let Some(node) = scene.get_node_mut(node_handle) else {
                    continue;
                };

                match (value, target) {
                    (TrackValue::Vector3(v), TargetPath::Translation) => {
                        node.transform.position = blend_vec3(node.transform.position, v, weight);
                    }
                    (TrackValue::Vector3(v), TargetPath::Scale) => {
                        node.transform.scale = blend_vec3(node.transform.scale, v, weight);
                    }
                    (TrackValue::Quaternion(q), TargetPath::Rotation) => {
                        node.transform.rotation = if weight >= 1.0 {
                            q
                        } else {
                            node.transform.rotation.slerp(q, weight)
                        };
                    }
                    (TrackValue::Scalar(offset), TargetPath::PathOffset) => {
                        if let Some(follow) = node.follow_path_mut() {
                            follow.offset = if weight >= 1.0 {
                                offset
                            } else {
                                follow.offset + (offset - follow.offset) * weight
                            };
                        }
                    }
                    (value, target) => {
                        log::warn!("Track value {value:?} cannot drive {target:?}; ignored");
                    }
                }
            }
        }
    }
}

#[inline]
fn blend_vec3(current: Vec3, sampled: Vec3, weight: f32) -> Vec3 {
    if weight >= 1.0 {
        sampled
    } else {
        current.lerp(sampled, weight)
    }
}
