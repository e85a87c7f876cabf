//! Project Assembly
//!
//! This module contains [`Project`], which builds the complete looping scene
//! from a [`ProjectConfig`] and hands it to the exporter.
//!
//! # Pipeline
//!
//! Stages run strictly in this order:
//!
//! 1. Clear the scene and apply render settings
//! 2. Camera with a track-to constraint aimed at an empty at the origin
//! 3. Key and fill area lights
//! 4. Subdivided Bezier circle, deformed, added as the path curve
//! 5. Riders following the path, each with a marker and an offset action
//!
//! # Example
//!
//! ```rust,ignore
//! use shapeshifter::{Project, ProjectConfig};
//!
//! let mut project = Project::build(&ProjectConfig::default(), 0)?;
//! let path = project.export()?;
//! ```

use std::path::PathBuf;

use glam::{Vec3, Vec4};

use crate::config::{LightConfig, ProjectConfig};
use crate::curve::Curve;
use crate::errors::Result;
use crate::export::{SceneManifest, manifest_path, write_manifest};
use crate::procedural::deformer::deform_with;
use crate::procedural::{RiderHandles, populate_riders};
use crate::resources::{CircleOptions, create_bezier_circle};
use crate::scene::{AreaShape, Camera, Constraint, Light, NodeHandle, Scene, TrackTo};
use crate::utils::hex_color_to_rgb;

/// A fully built scene together with handles to its notable nodes.
pub struct Project {
    pub config: ProjectConfig,
    pub variant: usize,
    pub scene: Scene,

    pub camera: NodeHandle,
    pub track_target: NodeHandle,
    pub lights: Vec<NodeHandle>,
    pub curve: NodeHandle,
    pub riders: Vec<RiderHandles>,
}

impl Project {
    /// Builds the scene for scene variant `variant` into a fresh [`Scene`].
    pub fn build(config: &ProjectConfig, variant: usize) -> Result<Self> {
        Self::build_into(Scene::new(), config, variant)
    }

    /// Clears `scene` and builds into it.
    ///
    /// The scene is left evaluated at the first frame of the render range.
    pub fn build_into(mut scene: Scene, config: &ProjectConfig, variant: usize) -> Result<Self> {
        config.validate()?;
        log::info!(
            "Building '{}' variant {variant} ({} riders)",
            config.project_name,
            config.riders.count
        );

        scene.clear();
        scene.render = config.render_settings(variant);
        scene.background = Vec4::new(0.0, 0.0, 0.0, 1.0);

        let (camera, track_target) = add_camera(&mut scene, config)?;

        let lights = [&config.key_light, &config.fill_light]
            .into_iter()
            .map(|light| add_area_light(&mut scene, light))
            .collect::<Result<Vec<_>>>()?;

        let curve = add_path_curve(&mut scene, config);

        let specs = config.spawn_params().specs();
        let riders = populate_riders(&mut scene, curve, &specs, &config.spawn_params())?;

        let first = scene.render.frame_start as f32;
        scene.evaluate_frame(first)?;

        Ok(Self {
            config: config.clone(),
            variant,
            scene,
            camera,
            track_target,
            lights,
            curve,
            riders,
        })
    }

    /// Evaluates animation and constraints at `frame`.
    pub fn frame_set(&mut self, frame: f32) -> Result<()> {
        self.scene.evaluate_frame(frame)
    }

    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.scene.render.output.filepath.clone()
    }

    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        manifest_path(&self.scene.render.output.filepath)
    }

    /// Manifest of the scene, baked over the render range when configured.
    pub fn manifest(&mut self) -> Result<SceneManifest> {
        let mut manifest = SceneManifest::from_scene(&self.scene)?;
        if self.config.bake {
            manifest.bake(&mut self.scene)?;
        }
        Ok(manifest)
    }

    /// Writes the manifest next to the video output path and returns its path.
    pub fn export(&mut self) -> Result<PathBuf> {
        let manifest = self.manifest()?;
        let path = self.manifest_path();
        write_manifest(&manifest, &path)?;
        Ok(path)
    }
}

fn add_camera(scene: &mut Scene, config: &ProjectConfig) -> Result<(NodeHandle, NodeHandle)> {
    let cam_cfg = &config.camera;
    let mut camera = Camera::new_perspective(
        cam_cfg.lens,
        scene.render.aspect(),
        cam_cfg.clip_start,
        cam_cfg.clip_end,
    );
    camera.passepartout_alpha = cam_cfg.passepartout_alpha;

    let node = scene.add_camera("Camera", camera);
    if let Some(n) = scene.get_node_mut(node) {
        n.transform.position = cam_cfg.location;
    }

    let target = scene.create_empty("TrackTarget", Vec3::ZERO);
    scene.add_constraint(node, Constraint::TrackTo(TrackTo::new(target)))?;
    scene.active_camera = Some(node);

    log::debug!("Camera at {} tracking the origin", cam_cfg.location);
    Ok((node, target))
}

fn add_area_light(scene: &mut Scene, config: &LightConfig) -> Result<NodeHandle> {
    let color = hex_color_to_rgb(&config.color)?;
    let light = Light::new_area(color, config.energy, AreaShape::Disk, config.size);

    let node = scene.add_light(&config.name, light);
    if let Some(n) = scene.get_node_mut(node) {
        n.transform.position = config.location;
        n.transform
            .set_rotation_euler(config.rotation.x, config.rotation.y, config.rotation.z);
    }
    Ok(node)
}

fn add_path_curve(scene: &mut Scene, config: &ProjectConfig) -> NodeHandle {
    let mut spline = create_bezier_circle(&CircleOptions {
        radius: config.curve.radius,
        cuts: config.curve.cuts,
    });
    deform_with(&mut spline.points, &config.deform);

    let curve = Curve {
        spline,
        resolution_u: config.curve.resolution_u,
        path_duration: config.curve.path_duration,
    };
    log::debug!("Path curve with {} control points", curve.points().len());
    scene.add_curve("Path", curve)
}
