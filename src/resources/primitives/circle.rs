use glam::Vec3;

use crate::curve::{BezierSpline, ControlPoint};

/// Handle length (relative to radius) that makes four cubic segments
/// approximate a circle.
pub const CIRCLE_KAPPA: f32 = 0.552_284_75;

pub struct CircleOptions {
    pub radius: f32,
    /// Points inserted into each of the four quarter arcs.
    pub cuts: usize,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            cuts: 0,
        }
    }
}

/// Creates a closed Bezier circle in the XY plane.
///
/// The four anchors start at `(-r, 0, 0)` and run through `(0, r, 0)`,
/// `(r, 0, 0)` and `(0, -r, 0)`; after subdivision anchor `k` sits at index
/// `k * (cuts + 1)`.
#[must_use]
pub fn create_bezier_circle(options: &CircleOptions) -> BezierSpline {
    let r = options.radius;
    let h = r * CIRCLE_KAPPA;

    let anchors = [
        (Vec3::new(-r, 0.0, 0.0), Vec3::new(0.0, h, 0.0)),
        (Vec3::new(0.0, r, 0.0), Vec3::new(h, 0.0, 0.0)),
        (Vec3::new(r, 0.0, 0.0), Vec3::new(0.0, -h, 0.0)),
        (Vec3::new(0.0, -r, 0.0), Vec3::new(-h, 0.0, 0.0)),
    ];

    // `forward` is the travel direction at the anchor; handles are symmetric.
    let points = anchors
        .iter()
        .map(|&(co, forward)| ControlPoint::new(co, -forward, forward))
        .collect();

    BezierSpline::new(points, true).subdivided(options.cuts)
}
