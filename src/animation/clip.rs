use glam::{Quat, Vec3};

use crate::animation::binding::TargetPath;
use crate::animation::tracks::KeyframeTrack;

#[derive(Debug, Clone)]
pub struct TrackMeta {
    pub node_name: String,
    pub target: TargetPath,
}

#[derive(Debug, Clone)]
pub enum TrackData {
    Vector3(KeyframeTrack<Vec3>),
    Quaternion(KeyframeTrack<Quat>),
    Scalar(KeyframeTrack<f32>),
}

impl TrackData {
    fn times(&self) -> &[f32] {
        match self {
            TrackData::Vector3(track) => &track.times,
            TrackData::Quaternion(track) => &track.times,
            TrackData::Scalar(track) => &track.times,
        }
    }
}

/// 完整的轨道定义：包含元数据和关键帧数据
#[derive(Debug, Clone)]
pub struct Track {
    pub meta: TrackMeta,
    pub data: TrackData,
}

impl Track {
    #[must_use]
    pub fn scalar(node_name: impl Into<String>, target: TargetPath, track: KeyframeTrack<f32>) -> Self {
        Self {
            meta: TrackMeta {
                node_name: node_name.into(),
                target,
            },
            data: TrackData::Scalar(track),
        }
    }
}

/// A named set of tracks. Times are scene frames.
#[derive(Debug, Clone)]
pub struct AnimationClip {
    pub name: String,
    /// Earliest keyframe across all tracks.
    pub start: f32,
    /// Latest keyframe across all tracks.
    pub end: f32,
    pub tracks: Vec<Track>,
}

impl AnimationClip {
    #[must_use]
    pub fn new(name: impl Into<String>, tracks: Vec<Track>) -> Self {
        let (start, end) = tracks
            .iter()
            .filter_map(|t| {
                let times = t.data.times();
                Some((*times.first()?, *times.last()?))
            })
            .fold(None, |acc: Option<(f32, f32)>, (s, e)| match acc {
                Some((a, b)) => Some((a.min(s), b.max(e))),
                None => Some((s, e)),
            })
            .unwrap_or((0.0, 0.0));

        Self {
            name: name.into(),
            start,
            end,
            tracks,
        }
    }

    #[inline]
    #[must_use]
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }
}
