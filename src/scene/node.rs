use crate::scene::constraint::{Constraint, FollowPath};
use crate::scene::transform::Transform;
use crate::scene::{CameraKey, CurveKey, LightKey, MeshKey, NodeHandle};
use glam::Affine3A;

/// A scene node: hierarchy, transform, component keys and constraints.
///
/// # Hierarchy
///
/// Nodes form a tree structure through parent-child relationships:
/// - `parent`: Optional handle to parent node (None for root nodes)
/// - `children`: List of child node handles
///
/// # Components
///
/// Camera, light, mesh and curve data live in the [`Scene`](crate::scene::Scene)
/// component pools; the node only stores keys into them.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,

    // === Core Hierarchy ===
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    // === Core Spatial Data ===
    pub transform: Transform,

    // === Core State ===
    pub visible: bool,

    // === Components ===
    pub camera: Option<CameraKey>,
    pub light: Option<LightKey>,
    pub mesh: Option<MeshKey>,
    pub curve: Option<CurveKey>,

    /// Evaluated in order after the node's own world matrix is known.
    pub constraints: Vec<Constraint>,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            visible: true,
            camera: None,
            light: None,
            mesh: None,
            curve: None,
            constraints: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.transform.world_matrix
    }

    /// First follow-path constraint on this node, if any.
    #[must_use]
    pub fn follow_path(&self) -> Option<&FollowPath> {
        self.constraints.iter().find_map(|c| match c {
            Constraint::FollowPath(fp) => Some(fp),
            Constraint::TrackTo(_) => None,
        })
    }

    pub fn follow_path_mut(&mut self) -> Option<&mut FollowPath> {
        self.constraints.iter_mut().find_map(|c| match c {
            Constraint::FollowPath(fp) => Some(fp),
            Constraint::TrackTo(_) => None,
        })
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new("Node")
    }
}
