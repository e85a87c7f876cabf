//! Rider spawning tests
//!
//! Tests for:
//! - RiderSpec values and keys
//! - Affine offset continuation outside the keyed range
//! - Scene population: nodes, markers, constraints, actions

use glam::Vec3;
use shapeshifter::ShapeshiftError;
use shapeshifter::animation::{Extrapolation, InterpolationMode, TrackData};
use shapeshifter::curve::Curve;
use shapeshifter::procedural::{SpawnParams, populate_riders, rider_clip, spawn_riders};
use shapeshifter::resources::{CircleOptions, create_bezier_circle};
use shapeshifter::scene::Scene;

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn scene_with_path() -> (Scene, shapeshifter::NodeHandle) {
    let mut scene = Scene::new();
    let spline = create_bezier_circle(&CircleOptions { radius: 1.0, cuts: 18 });
    let curve = scene.add_curve("Path", Curve::new(spline));
    (scene, curve)
}

// ============================================================================
// RiderSpec
// ============================================================================

#[test]
fn first_and_last_rider_keys() {
    let specs = SpawnParams::default().specs();
    assert_eq!(specs.len(), 40);
    assert_eq!(specs[0].keyframes(), [(1.0, 0.0), (121.0, 2.5)]);
    assert_eq!(specs[39].keyframes(), [(1.0, 97.5), (121.0, 100.0)]);
}

#[test]
fn every_rider_advances_exactly_one_step() {
    let specs = spawn_riders(40, 2.5, 1.0, 120.0);
    for pair in specs.windows(2) {
        assert!(approx(pair[0].mid_value - pair[0].start_value, 2.5));
        assert!(approx(pair[0].mid_value, pair[1].start_value));
    }
}

#[test]
fn offset_matches_affine_formula_everywhere() {
    for spec in spawn_riders(40, 2.5, 1.0, 120.0) {
        for frame in [-240.0_f32, 0.0, 1.0, 60.0, 121.0, 122.0, 361.0] {
            let expected = spec.start_value + 2.5 / 120.0 * (frame - 1.0);
            assert!((spec.offset_at(frame) - expected).abs() < 1e-4);
        }
    }
}

#[test]
fn clip_track_samples_like_spec() {
    let spec = spawn_riders(5, 2.5, 1.0, 120.0)[4];
    let clip = rider_clip(&spec, "Rider.004");
    let TrackData::Scalar(track) = &clip.tracks[0].data else {
        panic!("expected a scalar track");
    };
    assert_eq!(track.interpolation, InterpolationMode::Linear);
    assert_eq!(track.extrapolation, Extrapolation::Linear);
    for frame in [-50.0_f32, 1.0, 33.0, 121.0, 300.0] {
        assert!((track.sample(frame).unwrap() - spec.offset_at(frame)).abs() < 1e-4);
    }
    assert_eq!(clip.tracks[0].meta.node_name, "Rider.004");
}

// ============================================================================
// Scene population
// ============================================================================

#[test]
fn populate_creates_riders_with_markers() {
    let (mut scene, curve) = scene_with_path();
    let params = SpawnParams::default();
    let handles = populate_riders(&mut scene, curve, &params.specs(), &params).unwrap();

    assert_eq!(handles.len(), 40);
    assert_eq!(scene.animation_mixer.len(), 40);

    let first = scene.get_node(handles[0].rider).unwrap();
    assert_eq!(first.name, "Rider.000");
    let follow = first.follow_path().unwrap();
    assert!(follow.use_curve_follow);
    assert_eq!(follow.target, curve);

    let last = scene.get_node(handles[39].rider).unwrap();
    assert!(approx(last.follow_path().unwrap().offset, 97.5));

    let marker = scene.get_node(handles[7].marker).unwrap();
    assert_eq!(marker.name, "Marker.007");
    assert_eq!(marker.parent(), Some(handles[7].rider));
    assert!(approx(scene.meshes[marker.mesh.unwrap()].bounding_radius(), 0.2));

    for action in scene.animation_mixer.actions() {
        assert_eq!(action.bindings.len(), 1);
    }
}

#[test]
fn offsets_extrapolate_after_the_last_key() {
    let (mut scene, curve) = scene_with_path();
    let params = SpawnParams::default();
    let handles = populate_riders(&mut scene, curve, &params.specs(), &params).unwrap();

    scene.evaluate_frame(241.0).unwrap();
    let offset = scene.get_node(handles[3].rider).unwrap().follow_path().unwrap().offset;
    assert!((offset - (7.5 + 5.0)).abs() < 1e-4, "offset = {offset}");

    scene.evaluate_frame(-119.0).unwrap();
    let offset = scene.get_node(handles[0].rider).unwrap().follow_path().unwrap().offset;
    assert!((offset + 2.5).abs() < 1e-4, "offset = {offset}");
}

#[test]
fn populate_requires_a_curve_target() {
    let mut scene = Scene::new();
    let not_a_curve = scene.create_empty("Empty", Vec3::ZERO);
    let params = SpawnParams::default();
    let result = populate_riders(&mut scene, not_a_curve, &params.specs(), &params);
    assert!(matches!(result, Err(ShapeshiftError::MissingComponent { .. })));
    assert_eq!(scene.nodes.len(), 1);
}
