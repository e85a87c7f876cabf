use glam::{Affine3A, Vec3, Vec4};
use slotmap::{SecondaryMap, SlotMap};

use crate::animation::{AnimationMixer, AnimationSystem};
use crate::curve::Curve;
use crate::errors::{Result, ShapeshiftError};
use crate::resources::mesh::Mesh;
use crate::scene::camera::Camera;
use crate::scene::constraint::{Constraint, FollowPath, PathTarget};
use crate::scene::light::Light;
use crate::scene::node::Node;
use crate::scene::render_settings::RenderSettings;
use crate::scene::transform::Transform;
use crate::scene::transform_system;
use crate::scene::{CameraKey, CurveKey, LightKey, MeshKey, NodeHandle};

/// 场景图结构
///
/// Scene 是纯数据层，存储场景图逻辑和组件数据。
/// Frame evaluation runs animation first, then the transform pass with
/// constraints, so world matrices always reflect `frame_current`.
#[derive(Debug)]
pub struct Scene {
    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ====组件/资源池====
    pub meshes: SlotMap<MeshKey, Mesh>,
    pub cameras: SlotMap<CameraKey, Camera>,
    pub lights: SlotMap<LightKey, Light>,
    pub curves: SlotMap<CurveKey, Curve>,

    pub active_camera: Option<NodeHandle>,

    /// World background colour (linear RGBA).
    pub background: Vec4,

    pub render: RenderSettings,
    pub frame_current: f32,

    pub animation_mixer: AnimationMixer,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            curves: SlotMap::with_key(),

            active_camera: None,
            background: Vec4::new(0.0, 0.0, 0.0, 1.0),

            render: RenderSettings::default(),
            frame_current: 1.0,

            animation_mixer: AnimationMixer::new(),
        }
    }

    /// Removes every node, component and action. Render settings are kept.
    pub fn clear(&mut self) {
        let count = self.nodes.len();
        self.nodes.clear();
        self.root_nodes.clear();
        self.meshes.clear();
        self.cameras.clear();
        self.lights.clear();
        self.curves.clear();
        self.active_camera = None;
        self.animation_mixer.clear();
        log::debug!("Scene cleared ({count} nodes removed)");
    }

    /// 添加一个节点到场景 (默认放在根节点)
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    pub fn add_to_parent(&mut self, mut child: Node, parent: NodeHandle) -> NodeHandle {
        if !self.nodes.contains_key(parent) {
            log::error!("Parent node not found; '{}' added as root", child.name);
            return self.add_node(child);
        }
        child.parent = Some(parent);
        let handle = self.nodes.insert(child);
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        handle
    }

    /// 核心逻辑：建立父子关系 (Attach)
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        if child == parent {
            log::warn!("Cannot attach node to itself!");
            return;
        }
        if !self.nodes.contains_key(child) || !self.nodes.contains_key(parent) {
            log::error!("Attach skipped: child or parent node not found");
            return;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("Cannot attach a node below its own descendant");
            return;
        }

        // 1. Detach from old
        self.detach_from_parent(child);

        // 2. Attach to new
        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }

        // 3. Update child
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
            c.transform.mark_dirty(); // 强制标记脏，确保矩阵更新
        }
    }

    /// 移除节点 (递归移除所有子节点)
    pub fn remove_node(&mut self, handle: NodeHandle) {
        let Some(children) = self.nodes.get(handle).map(|n| n.children.clone()) else {
            return;
        };

        for child in children {
            self.remove_node(child);
        }

        self.detach_from_parent(handle);

        if let Some(node) = self.nodes.remove(handle) {
            if let Some(key) = node.mesh {
                self.meshes.remove(key);
            }
            if let Some(key) = node.camera {
                self.cameras.remove(key);
            }
            if let Some(key) = node.light {
                self.lights.remove(key);
            }
            if let Some(key) = node.curve {
                self.curves.remove(key);
            }
        }

        if self.active_camera == Some(handle) {
            self.active_camera = None;
        }
    }

    fn detach_from_parent(&mut self, handle: NodeHandle) {
        let parent = self.nodes.get(handle).and_then(|n| n.parent);
        if let Some(p) = parent {
            if let Some(n) = self.nodes.get_mut(p)
                && let Some(i) = n.children.iter().position(|&x| x == handle)
            {
                n.children.remove(i);
            }
        } else if let Some(i) = self.root_nodes.iter().position(|&x| x == handle) {
            self.root_nodes.remove(i);
        }
    }

    fn is_ancestor(&self, ancestor: NodeHandle, mut node: NodeHandle) -> bool {
        while let Some(parent) = self.nodes.get(node).and_then(|n| n.parent) {
            if parent == ancestor {
                return true;
            }
            node = parent;
        }
        false
    }

    /// 获取只读引用
    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    /// 获取可变引用 (用于修改 TRS)
    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    /// Like [`get_node`](Self::get_node) but reports a stale handle as an error.
    pub fn node(&self, handle: NodeHandle) -> Result<&Node> {
        self.nodes
            .get(handle)
            .ok_or_else(|| ShapeshiftError::NodeNotFound(format!("{handle:?}")))
    }

    /// First node with the given name, in insertion order.
    #[must_use]
    pub fn find_node_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find_map(|(handle, node)| (node.name == name).then_some(handle))
    }

    // ========================================================================
    // 资源管理 API
    // ========================================================================

    /// Adds an empty (transform-only) root node.
    pub fn create_empty(&mut self, name: &str, position: Vec3) -> NodeHandle {
        let mut node = Node::new(name);
        node.transform = Transform::from_position(position);
        self.add_node(node)
    }

    pub fn add_camera(&mut self, name: &str, camera: Camera) -> NodeHandle {
        let mut node = Node::new(name);
        node.camera = Some(self.cameras.insert(camera));
        self.add_node(node)
    }

    pub fn add_light(&mut self, name: &str, light: Light) -> NodeHandle {
        let mut node = Node::new(name);
        node.light = Some(self.lights.insert(light));
        self.add_node(node)
    }

    pub fn add_curve(&mut self, name: &str, curve: Curve) -> NodeHandle {
        let mut node = Node::new(name);
        node.curve = Some(self.curves.insert(curve));
        self.add_node(node)
    }

    pub fn add_mesh_to_parent(&mut self, mesh: Mesh, parent: NodeHandle) -> NodeHandle {
        let mut node = Node::new(mesh.name.clone());
        node.mesh = Some(self.meshes.insert(mesh));
        self.add_to_parent(node, parent)
    }

    pub fn add_constraint(&mut self, handle: NodeHandle, constraint: Constraint) -> Result<()> {
        if !self.nodes.contains_key(constraint.target()) {
            return Err(ShapeshiftError::NodeNotFound(format!(
                "constraint target {:?}",
                constraint.target()
            )));
        }
        let node = self
            .nodes
            .get_mut(handle)
            .ok_or_else(|| ShapeshiftError::NodeNotFound(format!("{handle:?}")))?;
        node.constraints.push(constraint);
        Ok(())
    }

    // ========================================================================
    // 组件查询 API (Component Query)
    // ========================================================================

    /// Curve component of a curve node.
    pub fn curve(&self, handle: NodeHandle) -> Result<&Curve> {
        let node = self.node(handle)?;
        node.curve
            .and_then(|key| self.curves.get(key))
            .ok_or_else(|| missing(node, "curve"))
    }

    pub fn curve_mut(&mut self, handle: NodeHandle) -> Result<&mut Curve> {
        let node = self
            .nodes
            .get(handle)
            .ok_or_else(|| ShapeshiftError::NodeNotFound(format!("{handle:?}")))?;
        let Some(key) = node.curve else {
            return Err(missing(node, "curve"));
        };
        let err = missing(node, "curve");
        self.curves.get_mut(key).ok_or(err)
    }

    pub fn follow_path_mut(&mut self, handle: NodeHandle) -> Result<&mut FollowPath> {
        let node = self
            .nodes
            .get_mut(handle)
            .ok_or_else(|| ShapeshiftError::NodeNotFound(format!("{handle:?}")))?;
        let name = node.name.clone();
        node.follow_path_mut()
            .ok_or(ShapeshiftError::MissingComponent {
                node: name,
                component: "follow-path constraint",
            })
    }

    /// Camera component of the active camera node.
    #[must_use]
    pub fn active_camera_bundle(&self) -> Option<(&Node, &Camera)> {
        let node = self.nodes.get(self.active_camera?)?;
        let camera = self.cameras.get(node.camera?)?;
        Some((node, camera))
    }

    /// 迭代场景中所有灯光及其世界矩阵
    pub fn iter_lights(&self) -> impl Iterator<Item = (&Node, &Light, &Affine3A)> {
        self.nodes.values().filter_map(|node| {
            let light = self.lights.get(node.light?)?;
            Some((node, light, &node.transform.world_matrix))
        })
    }

    // ========================================================================
    // 矩阵更新流水线
    // ========================================================================

    /// 更新整个场景的世界矩阵
    ///
    /// Resolves the path of every curve targeted by a follow-path constraint,
    /// then runs the hierarchy pass with constrained subtrees last.
    pub fn update_matrix_world(&mut self) -> Result<()> {
        let path_targets = self.resolve_path_targets()?;
        let roots = transform_system::dependency_ordered_roots(&self.nodes, &self.root_nodes);
        transform_system::update_hierarchy_iterative(
            &mut self.nodes,
            &mut self.cameras,
            &roots,
            &path_targets,
        );
        Ok(())
    }

    fn resolve_path_targets(&self) -> Result<SecondaryMap<NodeHandle, PathTarget>> {
        let mut targets = SecondaryMap::new();
        for node in self.nodes.values() {
            for constraint in &node.constraints {
                let Constraint::FollowPath(follow) = constraint else {
                    continue;
                };
                if targets.contains_key(follow.target) {
                    continue;
                }
                let curve = self.curve(follow.target)?;
                let target = PathTarget {
                    path: curve.build_path()?,
                    duration: curve.path_duration,
                };
                targets.insert(follow.target, target);
            }
        }
        Ok(targets)
    }

    /// Sets the current frame, applies animation and updates world matrices.
    pub fn evaluate_frame(&mut self, frame: f32) -> Result<()> {
        self.frame_current = frame;
        AnimationSystem::evaluate(self, frame);
        self.update_matrix_world()
    }
}

fn missing(node: &Node, component: &'static str) -> ShapeshiftError {
    ShapeshiftError::MissingComponent {
        node: node.name.clone(),
        component,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{BezierSpline, ControlPoint};

    #[test]
    fn remove_node_drops_subtree_and_components() {
        let mut scene = Scene::new();
        let parent = scene.create_empty("Parent", Vec3::ZERO);
        let light = scene.add_light("Light", Light::new_point(Vec3::ONE, 10.0, 0.1));
        scene.attach(light, parent);

        scene.remove_node(parent);

        assert!(scene.nodes.is_empty());
        assert!(scene.lights.is_empty());
        assert!(scene.root_nodes.is_empty());
    }

    #[test]
    fn attach_rejects_cycles() {
        let mut scene = Scene::new();
        let a = scene.create_empty("A", Vec3::ZERO);
        let b = scene.create_empty("B", Vec3::ZERO);
        scene.attach(b, a);
        scene.attach(a, b);
        assert_eq!(scene.get_node(a).unwrap().parent(), None);
        assert_eq!(scene.get_node(b).unwrap().parent(), Some(a));
    }

    #[test]
    fn follow_path_on_non_curve_is_an_error() {
        let mut scene = Scene::new();
        let not_a_curve = scene.create_empty("Empty", Vec3::ZERO);
        let rider = scene.create_empty("Rider", Vec3::ZERO);
        scene
            .add_constraint(rider, Constraint::FollowPath(FollowPath::new(not_a_curve)))
            .unwrap();

        let err = scene.update_matrix_world().unwrap_err();
        assert!(matches!(err, ShapeshiftError::MissingComponent { component: "curve", .. }));
    }

    #[test]
    fn constrained_root_reads_updated_target() {
        let mut scene = Scene::new();
        let third = Vec3::new(1.0, 0.0, 0.0);
        let spline = BezierSpline::new(
            vec![
                ControlPoint::new(Vec3::ZERO, -third, third),
                ControlPoint::new(Vec3::new(3.0, 0.0, 0.0), -third, third),
            ],
            false,
        );
        // Rider is added before its target on purpose.
        let rider = scene.create_empty("Rider", Vec3::ZERO);
        let curve = scene.add_curve("Path", Curve::new(spline));
        scene.get_node_mut(curve).unwrap().transform.position = Vec3::new(0.0, 0.0, 2.0);
        scene
            .add_constraint(rider, Constraint::FollowPath(FollowPath::new(curve)))
            .unwrap();

        scene.update_matrix_world().unwrap();

        let pos = scene.get_node(rider).unwrap().transform.world_position();
        assert!(pos.abs_diff_eq(Vec3::new(0.0, 0.0, 2.0), 1e-5), "pos = {pos}");
    }
}
