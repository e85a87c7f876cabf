use crate::animation::clip::TrackData;
use crate::scene::NodeHandle;

/// Scene property a track writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetPath {
    /// `transform.position`
    Translation,
    /// `transform.rotation`
    Rotation,
    /// `transform.scale`
    Scale,
    /// `offset` of the node's first follow-path constraint
    PathOffset,
}

impl TargetPath {
    /// Whether a track holding `data` can drive this property.
    #[must_use]
    pub fn accepts(self, data: &TrackData) -> bool {
        matches!(
            (self, data),
            (TargetPath::Translation | TargetPath::Scale, TrackData::Vector3(_))
                | (TargetPath::Rotation, TrackData::Quaternion(_))
                | (TargetPath::PathOffset, TrackData::Scalar(_))
        )
    }
}

/// Resolved track: clip track `track_index` drives `target` on `node_handle`.
#[derive(Debug, Clone)]
pub struct PropertyBinding {
    pub track_index: usize,
    pub node_handle: NodeHandle,
    pub target: TargetPath,
}
