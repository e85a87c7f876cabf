//! Bezier curve data
//!
//! - [`ControlPoint`]: anchor plus two handle offsets
//! - [`BezierSpline`]: ordered, optionally cyclic list of control points
//! - [`Curve`]: the curve component stored on a scene node
//! - [`CurvePath`]: arc-length lookup used by follow-path constraints

pub mod bezier;
pub mod path;

pub use bezier::CubicSegment;
pub use path::{CurvePath, PathSample};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ShapeshiftError};

/// Default number of evaluated steps per segment when building a path.
pub const DEFAULT_RESOLUTION_U: u32 = 12;
/// Default number of frames a follow-path offset needs to traverse the whole path.
pub const DEFAULT_PATH_DURATION: f32 = 100.0;

/// One vertex of a Bezier spline.
///
/// Handles are stored as offsets relative to `co`, so moving or scaling the
/// anchor carries its handles along.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub co: Vec3,
    pub handle_left: Vec3,
    pub handle_right: Vec3,
}

impl ControlPoint {
    #[must_use]
    pub const fn new(co: Vec3, handle_left: Vec3, handle_right: Vec3) -> Self {
        Self {
            co,
            handle_left,
            handle_right,
        }
    }

    /// Absolute position of the left handle.
    #[inline]
    #[must_use]
    pub fn left_handle_position(&self) -> Vec3 {
        self.co + self.handle_left
    }

    /// Absolute position of the right handle.
    #[inline]
    #[must_use]
    pub fn right_handle_position(&self) -> Vec3 {
        self.co + self.handle_right
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BezierSpline {
    pub points: Vec<ControlPoint>,
    pub cyclic: bool,
}

impl BezierSpline {
    #[must_use]
    pub fn new(points: Vec<ControlPoint>, cyclic: bool) -> Self {
        Self { points, cyclic }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of drawable segments. A cyclic spline closes back onto point 0.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            n if self.cyclic => n,
            n => n - 1,
        }
    }

    /// Segment `i` runs from point `i` to point `i + 1` (wrapping when cyclic).
    #[must_use]
    pub fn segment(&self, i: usize) -> Option<CubicSegment> {
        if i >= self.segment_count() {
            return None;
        }
        let a = &self.points[i];
        let b = &self.points[(i + 1) % self.points.len()];
        Some(CubicSegment::new(
            a.co,
            a.right_handle_position(),
            b.left_handle_position(),
            b.co,
        ))
    }

    /// Inserts `cuts` evenly spaced points into every segment without
    /// changing the curve shape.
    ///
    /// Original point `k` ends up at index `k * (cuts + 1)`.
    #[must_use]
    pub fn subdivided(&self, cuts: usize) -> Self {
        let n = self.points.len();
        let segment_count = self.segment_count();
        if cuts == 0 || segment_count == 0 {
            return self.clone();
        }

        let pieces: Vec<Vec<CubicSegment>> = (0..segment_count)
            .filter_map(|i| self.segment(i))
            .map(|seg| seg.split_uniform(cuts + 1))
            .collect();

        let mut points = Vec::with_capacity(n + segment_count * cuts);
        for (k, original) in self.points.iter().enumerate() {
            let co = original.co;

            let incoming = if k > 0 {
                Some(k - 1)
            } else if self.cyclic {
                Some(segment_count - 1)
            } else {
                None
            };
            let handle_left = incoming
                .and_then(|s| pieces[s].last())
                .map_or(original.handle_left, |piece| piece.p2 - co);
            let handle_right = pieces
                .get(k)
                .and_then(|p| p.first())
                .map_or(original.handle_right, |piece| piece.p1 - co);

            points.push(ControlPoint::new(co, handle_left, handle_right));

            if let Some(segment_pieces) = pieces.get(k) {
                for j in 1..segment_pieces.len() {
                    let co = segment_pieces[j].p0;
                    points.push(ControlPoint::new(
                        co,
                        segment_pieces[j - 1].p2 - co,
                        segment_pieces[j].p1 - co,
                    ));
                }
            }
        }

        Self::new(points, self.cyclic)
    }
}

/// Curve component: the spline plus path evaluation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    pub spline: BezierSpline,
    /// Evaluation steps per segment.
    pub resolution_u: u32,
    /// Frames needed for a follow-path offset to cover the whole path.
    pub path_duration: f32,
}

impl Curve {
    #[must_use]
    pub fn new(spline: BezierSpline) -> Self {
        Self {
            spline,
            resolution_u: DEFAULT_RESOLUTION_U,
            path_duration: DEFAULT_PATH_DURATION,
        }
    }

    #[inline]
    #[must_use]
    pub fn points(&self) -> &[ControlPoint] {
        &self.spline.points
    }

    #[inline]
    pub fn points_mut(&mut self) -> &mut [ControlPoint] {
        &mut self.spline.points
    }

    /// Builds the arc-length table used to place followers on the curve.
    pub fn build_path(&self) -> Result<CurvePath> {
        if self.path_duration <= 0.0 {
            return Err(ShapeshiftError::DegenerateCurve(format!(
                "path duration must be positive, got {}",
                self.path_duration
            )));
        }
        CurvePath::from_spline(&self.spline, self.resolution_u)
    }
}
