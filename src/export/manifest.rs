use std::path::{Path, PathBuf};

use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::animation::{Extrapolation, InterpolationMode, TargetPath, TrackData};
use crate::curve::ControlPoint;
use crate::errors::{Result, ShapeshiftError};
use crate::scene::{AreaShape, Constraint, LightKind, NodeHandle, RenderSettings, Scene};

/// Bumped whenever the layout changes incompatibly.
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraEntry {
    pub name: String,
    pub location: Vec3,
    pub rotation: Quat,
    pub lens: f32,
    pub sensor_width: f32,
    pub clip_start: f32,
    pub clip_end: f32,
    pub passepartout_alpha: f32,
    /// Name of the node a track-to constraint aims at.
    pub track_target: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub light_type: String,
    pub shape: Option<AreaShape>,
    pub size: f32,
    /// Linear RGB.
    pub color: Vec3,
    pub energy: f32,
    pub location: Vec3,
    pub rotation: Quat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveEntry {
    pub name: String,
    pub location: Vec3,
    pub cyclic: bool,
    pub resolution_u: u32,
    pub path_duration: f32,
    pub points: Vec<ControlPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerEntry {
    pub name: String,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiderEntry {
    pub name: String,
    pub path: String,
    pub use_curve_follow: bool,
    pub marker: Option<MarkerEntry>,
    /// `[frame, offset]` pairs of the path-offset animation.
    pub keyframes: Vec<[f32; 2]>,
    pub interpolation: Option<InterpolationMode>,
    pub extrapolation: Option<Extrapolation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiderPose {
    pub position: Vec3,
    pub rotation: Quat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEntry {
    pub frame: u32,
    /// Same order as [`SceneManifest::riders`].
    pub riders: Vec<RiderPose>,
}

/// Everything an external renderer needs to reproduce the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneManifest {
    pub version: u32,
    pub render: RenderSettings,
    pub background: Vec4,
    pub camera: Option<CameraEntry>,
    pub lights: Vec<LightEntry>,
    pub curves: Vec<CurveEntry>,
    pub riders: Vec<RiderEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<FrameEntry>,
}

impl SceneManifest {
    /// Describes the scene as evaluated at its current frame.
    pub fn from_scene(scene: &Scene) -> Result<Self> {
        let riders = rider_handles(scene);
        let rider_entries = riders
            .iter()
            .map(|&h| rider_entry(scene, h))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            version: MANIFEST_VERSION,
            render: scene.render.clone(),
            background: scene.background,
            camera: camera_entry(scene),
            lights: light_entries(scene),
            curves: curve_entries(scene),
            riders: rider_entries,
            frames: Vec::new(),
        })
    }

    /// Evaluates every frame of the render range and records rider poses.
    ///
    /// The scene is left evaluated at the frame it was on before baking.
    pub fn bake(&mut self, scene: &mut Scene) -> Result<()> {
        let riders = rider_handles(scene);
        let restore = scene.frame_current;
        let (start, end) = (scene.render.frame_start, scene.render.frame_end);

        let mut frames = Vec::with_capacity(scene.render.frame_count() as usize);
        for frame in start..=end {
            scene.evaluate_frame(frame as f32)?;
            let poses = riders
                .iter()
                .map(|&h| -> Result<RiderPose> {
                    let transform = &scene.node(h)?.transform;
                    Ok(RiderPose {
                        position: transform.world_position(),
                        rotation: transform.world_rotation(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            frames.push(FrameEntry { frame, riders: poses });
        }
        scene.evaluate_frame(restore)?;

        log::debug!("Baked {} frames for {} riders", frames.len(), riders.len());
        self.frames = frames;
        Ok(())
    }
}

/// `<video>.json` next to the rendered video.
#[must_use]
pub fn manifest_path(video_path: &Path) -> PathBuf {
    video_path.with_extension("json")
}

/// Writes pretty JSON, creating parent directories.
pub fn write_manifest(manifest: &SceneManifest, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(path, json)?;
    log::info!("Manifest written to {}", path.display());
    Ok(())
}

/// Nodes carrying a follow-path constraint, in scene-graph order.
fn rider_handles(scene: &Scene) -> Vec<NodeHandle> {
    let mut out = Vec::new();
    let mut stack: Vec<NodeHandle> = scene.root_nodes.iter().rev().copied().collect();
    while let Some(handle) = stack.pop() {
        let Some(node) = scene.get_node(handle) else {
            continue;
        };
        if node.follow_path().is_some() {
            out.push(handle);
        }
        stack.extend(node.children().iter().rev());
    }
    out
}

fn camera_entry(scene: &Scene) -> Option<CameraEntry> {
    let (node, camera) = scene.active_camera_bundle()?;
    let track_target = node.constraints.iter().find_map(|c| match c {
        Constraint::TrackTo(tt) => scene.get_node(tt.target).map(|t| t.name.clone()),
        Constraint::FollowPath(_) => None,
    });
    Some(CameraEntry {
        name: node.name.clone(),
        location: node.transform.world_position(),
        rotation: node.transform.world_rotation(),
        lens: camera.lens,
        sensor_width: camera.sensor_width,
        clip_start: camera.near,
        clip_end: camera.far,
        passepartout_alpha: camera.passepartout_alpha,
        track_target,
    })
}

fn light_entries(scene: &Scene) -> Vec<LightEntry> {
    scene
        .iter_lights()
        .map(|(node, light, world)| {
            let (shape, size) = match &light.kind {
                LightKind::Area(area) => (Some(area.shape), area.size),
                LightKind::Point(point) => (None, point.radius),
            };
            let (_, rotation, translation) = world.to_scale_rotation_translation();
            LightEntry {
                name: node.name.clone(),
                light_type: light.type_name().to_string(),
                shape,
                size,
                color: light.color,
                energy: light.energy,
                location: translation,
                rotation,
            }
        })
        .collect()
}

fn curve_entries(scene: &Scene) -> Vec<CurveEntry> {
    scene
        .nodes
        .values()
        .filter_map(|node| {
            let curve = scene.curves.get(node.curve?)?;
            Some(CurveEntry {
                name: node.name.clone(),
                location: node.transform.world_position(),
                cyclic: curve.spline.cyclic,
                resolution_u: curve.resolution_u,
                path_duration: curve.path_duration,
                points: curve.points().to_vec(),
            })
        })
        .collect()
}

fn rider_entry(scene: &Scene, handle: NodeHandle) -> Result<RiderEntry> {
    let node = scene.node(handle)?;
    let follow = node.follow_path().ok_or_else(|| ShapeshiftError::MissingComponent {
        node: node.name.clone(),
        component: "follow-path constraint",
    })?;
    let path = scene.node(follow.target)?.name.clone();

    let marker = node.children().iter().find_map(|&child| {
        let child = scene.get_node(child)?;
        let mesh = scene.meshes.get(child.mesh?)?;
        Some(MarkerEntry {
            name: child.name.clone(),
            radius: mesh.bounding_radius(),
        })
    });

    let offset_track = scene.animation_mixer.actions().iter().find_map(|action| {
        let binding = action
            .bindings
            .iter()
            .find(|b| b.node_handle == handle && b.target == TargetPath::PathOffset)?;
        match &action.clip().tracks.get(binding.track_index)?.data {
            TrackData::Scalar(track) => Some(track.clone()),
            TrackData::Vector3(_) | TrackData::Quaternion(_) => None,
        }
    });

    Ok(RiderEntry {
        name: node.name.clone(),
        path,
        use_curve_follow: follow.use_curve_follow,
        marker,
        keyframes: offset_track
            .as_ref()
            .map(|t| t.keyframes().map(|(time, value)| [time, value]).collect())
            .unwrap_or_default(),
        interpolation: offset_track.as_ref().map(|t| t.interpolation),
        extrapolation: offset_track.as_ref().map(|t| t.extrapolation),
    })
}
