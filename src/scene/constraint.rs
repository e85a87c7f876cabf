//! Object constraints
//!
//! Constraints override a node's world matrix after the hierarchy pass:
//! - [`FollowPath`]: places the node on a curve at an animatable offset
//! - [`TrackTo`]: turns the node so its -Z axis looks at a target

use glam::{Affine3A, Quat, Vec3};

use crate::curve::CurvePath;
use crate::scene::NodeHandle;
use crate::scene::transform::look_rotation;

#[derive(Debug, Clone)]
pub enum Constraint {
    FollowPath(FollowPath),
    TrackTo(TrackTo),
}

impl Constraint {
    #[must_use]
    pub fn target(&self) -> NodeHandle {
        match self {
            Constraint::FollowPath(fp) => fp.target,
            Constraint::TrackTo(tt) => tt.target,
        }
    }
}

/// Resolved curve data a follow-path constraint needs from its target.
#[derive(Debug, Clone)]
pub struct PathTarget {
    pub path: CurvePath,
    pub duration: f32,
}

/// Binds a node to a position along a curve.
///
/// `offset` is measured in path frames: the follower sits at
/// `-offset / duration` of the path length, so an offset equal to the path
/// duration is one full lap.
#[derive(Debug, Clone)]
pub struct FollowPath {
    pub target: NodeHandle,
    pub offset: f32,
    /// Align `forward_axis` with the path tangent.
    pub use_curve_follow: bool,
    pub forward_axis: Vec3,
}

impl FollowPath {
    #[must_use]
    pub fn new(target: NodeHandle) -> Self {
        Self {
            target,
            offset: 0.0,
            use_curve_follow: false,
            forward_axis: Vec3::Y,
        }
    }

    #[must_use]
    pub fn with_curve_follow(mut self, enabled: bool) -> Self {
        self.use_curve_follow = enabled;
        self
    }

    /// Normalised path position for the current offset (not yet wrapped).
    #[inline]
    #[must_use]
    pub fn path_fraction(&self, duration: f32) -> f32 {
        -self.offset / duration
    }

    /// Places `own_world` on the target path.
    #[must_use]
    pub fn solve(&self, own_world: Affine3A, target_world: Affine3A, target: &PathTarget) -> Affine3A {
        let sample = target.path.sample(self.path_fraction(target.duration));
        let position = target_world.transform_point3(sample.position);

        let rotation = if self.use_curve_follow {
            let tangent = target_world.transform_vector3(sample.tangent).normalize_or_zero();
            if tangent == Vec3::ZERO {
                Quat::IDENTITY
            } else {
                Quat::from_rotation_arc(self.forward_axis.normalize(), tangent)
            }
        } else {
            Quat::IDENTITY
        };

        Affine3A::from_rotation_translation(rotation, position) * own_world
    }
}

/// Keeps the node's -Z axis pointed at a target node.
#[derive(Debug, Clone)]
pub struct TrackTo {
    pub target: NodeHandle,
    pub up: Vec3,
}

impl TrackTo {
    #[must_use]
    pub fn new(target: NodeHandle) -> Self {
        Self {
            target,
            up: Vec3::Z,
        }
    }

    #[must_use]
    pub fn solve(&self, own_world: Affine3A, target_world: Affine3A) -> Affine3A {
        let (scale, rotation, translation) = own_world.to_scale_rotation_translation();
        let direction = Vec3::from(target_world.translation) - translation;
        let rotation = look_rotation(direction, self.up).unwrap_or(rotation);
        Affine3A::from_scale_rotation_translation(scale, rotation, translation)
    }
}
