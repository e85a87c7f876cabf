//! Curve deformation
//!
//! Reshapes a cyclic list of control points into the "breathing" outline: every
//! sixth point is lifted, handles alternate between sharpened and pulled-in
//! points, and a cosine envelope swells and collapses the radius once around
//! the loop. A final resize flattens the whole curve in Z relative to XY.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::curve::ControlPoint;

/// Constants of the deformation.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DeformParams {
    /// Z assigned to every sixth point.
    pub peak_z: f32,
    pub right_handle_scale: f32,
    pub left_handle_scale: f32,
    /// Z shift applied to both handles by the tilt rule.
    pub handle_z_shift: f32,
    /// Scale applied to the anchor of odd points.
    pub pull: f32,
    pub breathing_base: f32,
    pub breathing_amplitude: f32,
    /// Applied to every anchor and handle after the per-point pass.
    pub resize: Vec3,
}

impl Default for DeformParams {
    fn default() -> Self {
        Self {
            peak_z: 0.5,
            right_handle_scale: 2.0,
            left_handle_scale: 0.5,
            handle_z_shift: 5.0,
            pull: 0.5,
            breathing_base: 2.0,
            breathing_amplitude: 2.0,
            resize: Vec3::new(3.0, 3.0, 1.0),
        }
    }
}

impl DeformParams {
    /// Envelope factor for point `index` of `count`.
    #[must_use]
    pub fn breathing_scalar(&self, index: usize, count: usize) -> f32 {
        let angle = index as f32 * TAU / count as f32;
        self.breathing_base + self.breathing_amplitude * angle.cos()
    }
}

/// Which handle rule applies to a point. Exactly one applies to every index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleRule {
    /// Even index: right handle lengthened, left handle shortened.
    Sharpen,
    /// Divisible by four but not by two. No index satisfies this.
    Tilt,
    /// Everything else: the anchor is pulled toward the origin.
    Pull,
}

#[must_use]
pub fn handle_rule(index: usize) -> HandleRule {
    if index.is_multiple_of(2) {
        HandleRule::Sharpen
    } else if index.is_multiple_of(4) {
        HandleRule::Tilt
    } else {
        HandleRule::Pull
    }
}

/// `2 + 2cos(index * 2π / count)` with the default envelope.
#[must_use]
pub fn breathing_scalar(index: usize, count: usize) -> f32 {
    DeformParams::default().breathing_scalar(index, count)
}

/// Elevation and handle rule for one point, before the envelope.
pub fn shape_point(point: &mut ControlPoint, index: usize, params: &DeformParams) {
    if index.is_multiple_of(6) {
        point.co.z = params.peak_z;
    }

    match handle_rule(index) {
        HandleRule::Sharpen => {
            point.handle_right *= params.right_handle_scale;
            point.handle_left *= params.left_handle_scale;
        }
        HandleRule::Tilt => {
            point.handle_right.z -= params.handle_z_shift;
            point.handle_left.z += params.handle_z_shift;
        }
        HandleRule::Pull => {
            point.co *= params.pull;
        }
    }
}

/// Full per-point step: shape, then scale the anchor by the envelope.
pub fn deform_point(point: &mut ControlPoint, index: usize, count: usize, params: &DeformParams) {
    shape_point(point, index, params);
    point.co *= params.breathing_scalar(index, count);
}

/// Scales anchors and handle offsets about the origin.
pub fn resize(points: &mut [ControlPoint], factor: Vec3) {
    for point in points {
        point.co *= factor;
        point.handle_left *= factor;
        point.handle_right *= factor;
    }
}

/// Deforms `points` in place with explicit constants.
pub fn deform_with(points: &mut [ControlPoint], params: &DeformParams) {
    let count = points.len();
    for (index, point) in points.iter_mut().enumerate() {
        deform_point(point, index, count, params);
    }
    resize(points, params.resize);
    log::debug!("Deformed {count} control points");
}

pub fn deform_in_place(points: &mut [ControlPoint]) {
    deform_with(points, &DeformParams::default());
}

/// Returns a deformed copy of `points`.
#[must_use]
pub fn deform(points: &[ControlPoint]) -> Vec<ControlPoint> {
    let mut out = points.to_vec();
    deform_in_place(&mut out);
    out
}
