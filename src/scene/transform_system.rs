//! 变换系统 (Transform System)
//!
//! 负责场景图的矩阵层级更新，与 Scene 解耦以避免借用冲突。
//! 只需要借用 nodes SlotMap、相机池和根节点列表。
//!
//! Constraints are solved right after a node's hierarchical world matrix is
//! known and before its children are visited, so children inherit the
//! constrained result (a rider's marker follows the rider).

use glam::Affine3A;
use slotmap::{SecondaryMap, SlotMap};

use crate::scene::camera::Camera;
use crate::scene::constraint::{Constraint, PathTarget};
use crate::scene::node::Node;
use crate::scene::{CameraKey, NodeHandle};

/// Orders roots so that subtrees without constraints are evaluated first.
///
/// Constraint targets are then up to date when constrained nodes read them.
/// Relative order inside each group is preserved.
#[must_use]
pub fn dependency_ordered_roots(nodes: &SlotMap<NodeHandle, Node>, roots: &[NodeHandle]) -> Vec<NodeHandle> {
    let (mut free, constrained): (Vec<NodeHandle>, Vec<NodeHandle>) = roots
        .iter()
        .copied()
        .partition(|&root| !subtree_has_constraints(nodes, root));
    free.extend(constrained);
    free
}

fn subtree_has_constraints(nodes: &SlotMap<NodeHandle, Node>, root: NodeHandle) -> bool {
    let mut stack = vec![root];
    while let Some(handle) = stack.pop() {
        let Some(node) = nodes.get(handle) else {
            continue;
        };
        if !node.constraints.is_empty() {
            return true;
        }
        stack.extend_from_slice(&node.children);
    }
    false
}

/// 更新整个场景层级的世界矩阵（迭代版本）
///
/// 使用显式栈替代递归调用，避免深层级场景的栈溢出风险。
///
/// # 参数
/// * `nodes` - 节点 SlotMap 的可变引用
/// * `cameras` - 相机 SlotMap（同步更新相机的视图投影矩阵）
/// * `roots` - 根节点句柄列表（应已按依赖排序）
/// * `path_targets` - resolved paths of every curve node targeted by a follow-path constraint
pub fn update_hierarchy_iterative(
    nodes: &mut SlotMap<NodeHandle, Node>,
    cameras: &mut SlotMap<CameraKey, Camera>,
    roots: &[NodeHandle],
    path_targets: &SecondaryMap<NodeHandle, PathTarget>,
) {
    // 工作栈：(节点句柄, 父世界矩阵, 父是否变化)
    let mut stack: Vec<(NodeHandle, Affine3A, bool)> = Vec::with_capacity(64);

    for &root_handle in roots.iter().rev() {
        stack.push((root_handle, Affine3A::IDENTITY, false));
    }

    while let Some((node_handle, parent_world_matrix, parent_changed)) = stack.pop() {
        // 1. 更新局部矩阵
        let (mut world, world_needs_update, constraints) = {
            let Some(node) = nodes.get_mut(node_handle) else {
                continue;
            };
            let local_changed = node.transform.update_local_matrix();
            let constrained = !node.constraints.is_empty();
            let world_needs_update = local_changed || parent_changed || constrained;
            let world = if world_needs_update {
                parent_world_matrix * *node.transform.local_matrix()
            } else {
                node.transform.world_matrix
            };
            let constraints = if constrained {
                node.constraints.clone()
            } else {
                Vec::new()
            };
            (world, world_needs_update, constraints)
        };

        // 2. 约束求解
        for constraint in &constraints {
            world = solve_constraint(constraint, world, nodes, path_targets);
        }

        // 3. 写回世界矩阵并同步相机
        let Some(node) = nodes.get_mut(node_handle) else {
            continue;
        };
        if world_needs_update {
            node.transform.set_world_matrix(world);
            if let Some(camera) = node.camera.and_then(|key| cameras.get_mut(key)) {
                camera.update_view_projection(&world);
            }
        }

        // 4. 将子节点压入栈（逆序以保持处理顺序）
        for &child_handle in node.children.iter().rev() {
            stack.push((child_handle, world, world_needs_update));
        }
    }
}

fn solve_constraint(
    constraint: &Constraint,
    world: Affine3A,
    nodes: &SlotMap<NodeHandle, Node>,
    path_targets: &SecondaryMap<NodeHandle, PathTarget>,
) -> Affine3A {
    let target = constraint.target();
    let Some(target_world) = nodes.get(target).map(|n| n.transform.world_matrix) else {
        log::warn!("Constraint target {target:?} no longer exists; constraint skipped");
        return world;
    };

    match constraint {
        Constraint::FollowPath(follow) => match path_targets.get(target) {
            Some(path_target) => follow.solve(world, target_world, path_target),
            None => {
                log::warn!("Follow-path target {target:?} has no resolved path; constraint skipped");
                world
            }
        },
        Constraint::TrackTo(track) => track.solve(world, target_world),
    }
}
