//! Curve deformation tests
//!
//! Tests for:
//! - Bezier circle subdivision (point count, anchors, radius)
//! - Per-point elevation, handle rules and envelope
//! - Global resize

use std::f32::consts::TAU;

use glam::Vec3;
use shapeshifter::curve::ControlPoint;
use shapeshifter::procedural::deformer::{DeformParams, deform_point, resize, shape_point};
use shapeshifter::procedural::{HandleRule, breathing_scalar, deform, deform_in_place, handle_rule};
use shapeshifter::resources::{CircleOptions, create_bezier_circle};

const EPSILON: f32 = 1e-4;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn base_points() -> Vec<ControlPoint> {
    create_bezier_circle(&CircleOptions { radius: 1.0, cuts: 18 }).points
}

// ============================================================================
// Base primitive
// ============================================================================

#[test]
fn subdivided_circle_has_76_points_on_the_circle() {
    let points = base_points();
    assert_eq!(points.len(), 76);
    for (i, p) in points.iter().enumerate() {
        assert!((p.co.length() - 1.0).abs() < 1e-3, "point {i} at radius {}", p.co.length());
        assert!(approx(p.co.z, 0.0));
    }
}

#[test]
fn original_anchors_keep_their_positions() {
    let points = base_points();
    assert!(points[0].co.abs_diff_eq(Vec3::new(-1.0, 0.0, 0.0), EPSILON));
    assert!(points[19].co.abs_diff_eq(Vec3::new(0.0, 1.0, 0.0), EPSILON));
    assert!(points[38].co.abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), EPSILON));
    assert!(points[57].co.abs_diff_eq(Vec3::new(0.0, -1.0, 0.0), EPSILON));
}

// ============================================================================
// Handle rules
// ============================================================================

#[test]
fn handle_rules_split_even_and_odd() {
    let rules: Vec<_> = (0..76).map(handle_rule).collect();
    assert_eq!(rules.iter().filter(|r| **r == HandleRule::Sharpen).count(), 38);
    assert_eq!(rules.iter().filter(|r| **r == HandleRule::Pull).count(), 38);
}

#[test]
fn tilt_rule_is_never_selected() {
    // Every multiple of four is even, so the sharpen rule always wins.
    assert!((0..10_000).all(|i| handle_rule(i) != HandleRule::Tilt));
}

#[test]
fn sharpen_scales_handles_and_keeps_anchor() {
    let params = DeformParams::default();
    let original = ControlPoint::new(Vec3::new(1.0, 1.0, 0.0), Vec3::new(-0.4, 0.0, 0.0), Vec3::new(0.4, 0.0, 0.0));
    let mut p = original;
    shape_point(&mut p, 2, &params);

    assert_eq!(p.co, original.co);
    assert!(p.handle_right.abs_diff_eq(Vec3::new(0.8, 0.0, 0.0), EPSILON));
    assert!(p.handle_left.abs_diff_eq(Vec3::new(-0.2, 0.0, 0.0), EPSILON));
}

// ============================================================================
// Elevation and envelope
// ============================================================================

#[test]
fn every_sixth_point_is_lifted_before_breathing() {
    let params = DeformParams::default();
    for (i, mut p) in base_points().into_iter().enumerate() {
        shape_point(&mut p, i, &params);
        if i % 6 == 0 {
            assert!(approx(p.co.z, 0.5), "point {i}: z = {}", p.co.z);
        } else {
            assert!(approx(p.co.z, 0.0), "point {i}: z = {}", p.co.z);
        }
    }
}

#[test]
fn envelope_is_periodic_over_the_loop() {
    for i in 0..76 {
        assert!(approx(breathing_scalar(i, 76), breathing_scalar(i + 76, 76)));
        let expected = 2.0 + 2.0 * (i as f32 * TAU / 76.0).cos();
        assert!(approx(breathing_scalar(i, 76), expected));
    }
}

#[test]
fn deform_point_scales_anchor_by_envelope() {
    let params = DeformParams::default();
    let mut p = ControlPoint::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO, Vec3::ZERO);
    deform_point(&mut p, 1, 76, &params);
    let expected = 0.5 * breathing_scalar(1, 76);
    assert!(approx(p.co.x, expected), "x = {}", p.co.x);
}

// ============================================================================
// Full pass
// ============================================================================

#[test]
fn full_deform_matches_closed_form() {
    let base = base_points();
    let out = deform(&base);
    let n = base.len();
    let resize_factor = Vec3::new(3.0, 3.0, 1.0);

    for i in 0..n {
        let s = breathing_scalar(i, n);
        let pull = if i % 2 == 0 { 1.0 } else { 0.5 };
        let z = if i % 6 == 0 { 0.5 } else { 0.0 };

        let expected_co = Vec3::new(base[i].co.x * pull, base[i].co.y * pull, z) * s * resize_factor;
        assert!(out[i].co.abs_diff_eq(expected_co, EPSILON), "point {i}: {} vs {expected_co}", out[i].co);

        let (right, left) = if i % 2 == 0 { (2.0, 0.5) } else { (1.0, 1.0) };
        assert!(out[i].handle_right.abs_diff_eq(base[i].handle_right * right * resize_factor, EPSILON));
        assert!(out[i].handle_left.abs_diff_eq(base[i].handle_left * left * resize_factor, EPSILON));
    }
}

#[test]
fn deform_copy_leaves_input_alone() {
    let base = base_points();
    let out = deform(&base);
    assert_eq!(base, base_points());
    assert_ne!(out, base);

    let mut in_place = base.clone();
    deform_in_place(&mut in_place);
    assert_eq!(in_place, out);
}

#[test]
fn resize_is_about_the_origin() {
    let mut points = vec![ControlPoint::new(Vec3::new(1.0, -2.0, 0.7), Vec3::new(0.1, 0.1, 0.1), Vec3::ZERO)];
    resize(&mut points, Vec3::new(3.0, 3.0, 1.0));
    assert!(points[0].co.abs_diff_eq(Vec3::new(3.0, -6.0, 0.7), EPSILON));
    assert!(points[0].handle_left.abs_diff_eq(Vec3::new(0.3, 0.3, 0.1), EPSILON));
}

#[test]
fn opposite_point_collapses_to_origin() {
    let out = deform(&base_points());
    assert!(out[38].co.length() < 1e-4, "co = {}", out[38].co);
}
