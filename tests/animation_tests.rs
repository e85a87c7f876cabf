//! Animation System Tests
//!
//! Tests for:
//! - KeyframeTrack linear/step/cubic interpolation
//! - Constant and linear extrapolation outside the key range
//! - KeyframeCursor sequential scanning and binary search fallback
//! - AnimationClip range computation
//! - Binder + AnimationMixer writing into scene nodes

use std::f32::consts::PI;
use std::sync::Arc;

use glam::{Quat, Vec3};

use shapeshifter::animation::{
    AnimationAction, AnimationClip, AnimationSystem, Binder, Extrapolation, Interpolatable,
    InterpolationMode, KeyframeCursor, KeyframeTrack, TargetPath, Track, TrackData, TrackMeta,
};
use shapeshifter::scene::{Constraint, FollowPath, Scene};

const EPSILON: f32 = 1e-5;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn ramp() -> KeyframeTrack<f32> {
    KeyframeTrack::new(vec![1.0, 121.0], vec![0.0_f32, 2.5], InterpolationMode::Linear)
}

// ============================================================================
// KeyframeTrack: Interpolation
// ============================================================================

#[test]
fn track_linear_f32_midpoint() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![0.0_f32, 10.0], InterpolationMode::Linear);

    let mut cursor = KeyframeCursor::default();
    let val = track.sample_with_cursor(0.5, &mut cursor).unwrap();
    assert!(approx(val, 5.0), "Expected 5.0, got {val}");
}

#[test]
fn track_linear_f32_exact_keyframe() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 10.0, 20.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(0.0, &mut cursor).unwrap(), 0.0));
    assert!(approx(track.sample_with_cursor(1.0, &mut cursor).unwrap(), 10.0));
    assert!(approx(track.sample_with_cursor(2.0, &mut cursor).unwrap(), 20.0));
}

#[test]
fn track_step_holds_value() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0],
        vec![0.0_f32, 100.0, 200.0],
        InterpolationMode::Step,
    );

    assert!(approx(track.sample(0.5).unwrap(), 0.0));
    assert!(approx(track.sample(0.99).unwrap(), 0.0));
    assert!(approx(track.sample(1.0).unwrap(), 100.0));
    assert!(approx(track.sample(1.5).unwrap(), 100.0));
}

#[test]
fn track_linear_vec3() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0)],
        InterpolationMode::Linear,
    );

    let val = track.sample(0.5).unwrap();
    assert!(val.abs_diff_eq(Vec3::new(5.0, 10.0, 15.0), EPSILON));
}

#[test]
fn track_linear_quat_slerp() {
    let q0 = Quat::IDENTITY;
    let q1 = Quat::from_rotation_y(PI * 0.5);

    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![q0, q1], InterpolationMode::Linear);

    let val = track.sample(0.5).unwrap();
    let angle = val.angle_between(q0.slerp(q1, 0.5));
    assert!(angle < 0.01, "Quaternion slerp mismatch: angle={angle}");
}

#[test]
fn track_cubic_f32_endpoints() {
    // CubicSpline: values = [in_tangent0, value0, out_tangent0, in_tangent1, value1, out_tangent1]
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![
            0.0_f32, 0.0, 1.0, // frame 0: in_tangent=0, value=0, out_tangent=1
            1.0, 10.0, 0.0, // frame 1: in_tangent=1, value=10, out_tangent=0
        ],
        InterpolationMode::CubicSpline,
    );

    assert!(approx(track.sample(0.0).unwrap(), 0.0));
    assert!(approx(track.sample(1.0).unwrap(), 10.0));
}

#[test]
fn track_cubic_zero_tangents_is_symmetric() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![0.0_f32, 0.0, 0.0, 0.0, 10.0, 0.0],
        InterpolationMode::CubicSpline,
    );

    assert!(approx(track.sample(0.5).unwrap(), 5.0));
}

#[test]
fn empty_track_samples_nothing() {
    let track: KeyframeTrack<f32> = KeyframeTrack::new(vec![], vec![], InterpolationMode::Linear);
    assert!(track.is_empty());
    assert_eq!(track.sample(3.0), None);
}

// ============================================================================
// Extrapolation
// ============================================================================

#[test]
fn constant_extrapolation_holds_boundaries() {
    let track = ramp();
    assert!(approx(track.sample(-50.0).unwrap(), 0.0));
    assert!(approx(track.sample(500.0).unwrap(), 2.5));
}

#[test]
fn linear_extrapolation_continues_the_slope() {
    let track = ramp().with_extrapolation(Extrapolation::Linear);
    let slope = 2.5 / 120.0;

    for frame in [-119.0_f32, 0.0, 122.0, 241.0, 1000.0] {
        let expected = slope * (frame - 1.0);
        let got = track.sample(frame).unwrap();
        assert!((got - expected).abs() < 1e-4, "frame {frame}: expected {expected}, got {got}");
    }
}

#[test]
fn linear_extrapolation_on_step_track_holds() {
    let track = KeyframeTrack::new(vec![0.0, 1.0], vec![1.0_f32, 2.0], InterpolationMode::Step)
        .with_extrapolation(Extrapolation::Linear);
    assert!(approx(track.sample(5.0).unwrap(), 2.0));
    assert!(approx(track.sample(-5.0).unwrap(), 1.0));
}

#[test]
fn keyframes_iterate_values_not_tangents() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0],
        vec![9.0_f32, 1.0, 9.0, 9.0, 2.0, 9.0],
        InterpolationMode::CubicSpline,
    );
    let keys: Vec<_> = track.keyframes().collect();
    assert_eq!(keys, vec![(0.0, 1.0), (1.0, 2.0)]);
}

// ============================================================================
// KeyframeCursor
// ============================================================================

#[test]
fn sample_matches_cursor_across_all_times() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0, 4.0],
        vec![0.0_f32, 10.0, 5.0, 20.0, 15.0],
        InterpolationMode::Linear,
    );
    let mut cursor = KeyframeCursor::default();
    for i in 0..=40 {
        let t = i as f32 * 0.1;
        let val_cursor = track.sample_with_cursor(t, &mut cursor).unwrap();
        let val_sample = track.sample(t).unwrap();
        assert!(
            approx(val_sample, val_cursor),
            "t={t}: sample()={val_sample} != sample_with_cursor()={val_cursor}"
        );
    }
}

#[test]
fn cursor_forward_then_jump_back() {
    let track = KeyframeTrack::new(
        vec![0.0, 1.0, 2.0, 3.0],
        vec![0.0_f32, 10.0, 20.0, 30.0],
        InterpolationMode::Linear,
    );

    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(2.5, &mut cursor).unwrap(), 25.0));

    // Jump back to t=0.5 (large jump → binary search fallback)
    assert!(approx(track.sample_with_cursor(0.5, &mut cursor).unwrap(), 5.0));
}

#[test]
fn cursor_single_keyframe() {
    let track = KeyframeTrack::new(vec![0.0], vec![42.0_f32], InterpolationMode::Linear);
    let mut cursor = KeyframeCursor::default();
    assert!(approx(track.sample_with_cursor(5.0, &mut cursor).unwrap(), 42.0));
}

// ============================================================================
// Interpolatable Implementations
// ============================================================================

#[test]
fn interpolatable_f32_linear_extrapolates() {
    assert!(approx(f32::interpolate_linear(0.0, 10.0, 0.25), 2.5));
    assert!(approx(f32::interpolate_linear(0.0, 10.0, 2.0), 20.0));
}

#[test]
fn interpolatable_vec3_linear() {
    let result = Vec3::interpolate_linear(Vec3::ZERO, Vec3::new(10.0, 20.0, 30.0), 0.5);
    assert!(result.abs_diff_eq(Vec3::new(5.0, 10.0, 15.0), EPSILON));
}

// ============================================================================
// AnimationClip
// ============================================================================

#[test]
fn clip_range_spans_all_tracks() {
    let clip = AnimationClip::new(
        "Test",
        vec![
            Track::scalar("A", TargetPath::PathOffset, ramp()),
            Track {
                meta: TrackMeta {
                    node_name: "B".to_string(),
                    target: TargetPath::Translation,
                },
                data: TrackData::Vector3(KeyframeTrack::new(
                    vec![-5.0, 3.0],
                    vec![Vec3::ZERO, Vec3::ONE],
                    InterpolationMode::Linear,
                )),
            },
        ],
    );
    assert!(approx(clip.start, -5.0));
    assert!(approx(clip.end, 121.0));
    assert!(approx(clip.duration(), 126.0));
}

#[test]
fn clip_empty_tracks_zero_duration() {
    let clip = AnimationClip::new("Empty", vec![]);
    assert!(approx(clip.duration(), 0.0));
}

// ============================================================================
// Binder / Mixer
// ============================================================================

#[test]
fn mixer_writes_translation_into_bound_node() {
    let mut scene = Scene::new();
    let root = scene.create_empty("Root", Vec3::ZERO);
    let mover = scene.create_empty("Mover", Vec3::ZERO);
    scene.attach(mover, root);

    let clip = Arc::new(AnimationClip::new(
        "Slide",
        vec![Track {
            meta: TrackMeta {
                node_name: "Mover".to_string(),
                target: TargetPath::Translation,
            },
            data: TrackData::Vector3(KeyframeTrack::new(
                vec![0.0, 10.0],
                vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
                InterpolationMode::Linear,
            )),
        }],
    ));
    let bindings = Binder::bind(&scene, root, &clip);
    assert_eq!(bindings.len(), 1);
    scene
        .animation_mixer
        .add_action(AnimationAction::new(clip).with_bindings(bindings));

    scene.evaluate_frame(4.0).unwrap();

    let pos = scene.get_node(mover).unwrap().transform.world_position();
    assert!(pos.abs_diff_eq(Vec3::new(4.0, 0.0, 0.0), EPSILON), "pos = {pos}");
}

#[test]
fn binder_skips_unknown_nodes() {
    let mut scene = Scene::new();
    let root = scene.create_empty("Root", Vec3::ZERO);
    let clip = AnimationClip::new("Lost", vec![Track::scalar("Nobody", TargetPath::PathOffset, ramp())]);
    assert!(Binder::bind(&scene, root, &clip).is_empty());
}

#[test]
fn path_offset_track_drives_follow_path() {
    let mut scene = Scene::new();
    let target = scene.create_empty("Target", Vec3::ZERO);
    let rider = scene.create_empty("Rider", Vec3::ZERO);
    scene
        .add_constraint(rider, Constraint::FollowPath(FollowPath::new(target)))
        .unwrap();

    let clip = Arc::new(AnimationClip::new(
        "Offset",
        vec![Track::scalar(
            "Rider",
            TargetPath::PathOffset,
            ramp().with_extrapolation(Extrapolation::Linear),
        )],
    ));
    let bindings = Binder::bind(&scene, rider, &clip);
    scene
        .animation_mixer
        .add_action(AnimationAction::new(clip).with_bindings(bindings));

    AnimationSystem::evaluate(&mut scene, 241.0);

    let offset = scene.get_node(rider).unwrap().follow_path().unwrap().offset;
    assert!((offset - 5.0).abs() < 1e-4, "offset = {offset}");
}

#[test]
fn disabled_action_leaves_scene_untouched() {
    let mut scene = Scene::new();
    let mover = scene.create_empty("Mover", Vec3::ZERO);
    let clip = Arc::new(AnimationClip::new(
        "Slide",
        vec![Track {
            meta: TrackMeta {
                node_name: "Mover".to_string(),
                target: TargetPath::Scale,
            },
            data: TrackData::Vector3(KeyframeTrack::new(
                vec![0.0, 1.0],
                vec![Vec3::ONE, Vec3::splat(3.0)],
                InterpolationMode::Linear,
            )),
        }],
    ));
    let bindings = Binder::bind(&scene, mover, &clip);
    let mut action = AnimationAction::new(clip).with_bindings(bindings);
    action.enabled = false;
    scene.animation_mixer.add_action(action);

    AnimationSystem::evaluate(&mut scene, 1.0);
    assert_eq!(scene.get_node(mover).unwrap().transform.scale, Vec3::ONE);
}

#[test]
fn binder_skips_tracks_of_the_wrong_kind() {
    let mut scene = Scene::new();
    let root = scene.create_empty("Root", Vec3::ZERO);
    // A scalar track cannot drive a translation.
    let clip = AnimationClip::new("Mismatch", vec![Track::scalar("Root", TargetPath::Translation, ramp())]);
    assert!(Binder::bind(&scene, root, &clip).is_empty());
}
