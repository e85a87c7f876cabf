use crate::animation::binding::PropertyBinding;
use crate::animation::clip::AnimationClip;
use crate::scene::{NodeHandle, Scene};

pub struct Binder;

impl Binder {
    /// 解析动画片段，将轨道绑定到场景中的实际 NodeHandle
    ///
    /// Track node names are resolved inside the subtree rooted at `root_node`.
    /// Tracks whose node cannot be found, or whose data type does not fit the
    /// target property, are skipped with a warning.
    pub fn bind(scene: &Scene, root_node: NodeHandle, clip: &AnimationClip) -> Vec<PropertyBinding> {
        let mut bindings = Vec::with_capacity(clip.tracks.len());

        for (track_idx, track) in clip.tracks.iter().enumerate() {
            let node_name = &track.meta.node_name;
            let target = track.meta.target;

            if !target.accepts(&track.data) {
                log::warn!(
                    "Clip '{}': track {} cannot drive {:?}; skipped",
                    clip.name,
                    track_idx,
                    target
                );
                continue;
            }

            if let Some(node_handle) = find_node_by_name(scene, root_node, node_name) {
                bindings.push(PropertyBinding {
                    track_index: track_idx,
                    node_handle,
                    target,
                });
            } else {
                log::warn!(
                    "Clip '{}': no node named '{}' under binding root; track {} left unbound",
                    clip.name,
                    node_name,
                    track_idx
                );
            }
        }

        bindings
    }
}

fn find_node_by_name(scene: &Scene, current: NodeHandle, name: &str) -> Option<NodeHandle> {
    let node = scene.get_node(current)?;
    if node.name == name {
        return Some(current);
    }
    node.children()
        .iter()
        .find_map(|&child| find_node_by_name(scene, child, name))
}
