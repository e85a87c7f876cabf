use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outline of an area light's emitting surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AreaShape {
    Square,
    Rectangle,
    Disk,
    Ellipse,
}

#[derive(Debug, Clone)]
pub struct AreaLight {
    pub shape: AreaShape,
    /// Edge length or diameter of the emitting surface.
    pub size: f32,
}

#[derive(Debug, Clone)]
pub struct PointLight {
    pub radius: f32,
}

// High-level abstraction: light component in the scene
#[derive(Debug, Clone)]
pub enum LightKind {
    Point(PointLight),
    Area(AreaLight),
}

#[derive(Debug, Clone)]
pub struct Light {
    pub uuid: Uuid,
    /// Linear RGB.
    pub color: Vec3,
    /// Radiant power in watts.
    pub energy: f32,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_point(color: Vec3, energy: f32, radius: f32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            color,
            energy,
            kind: LightKind::Point(PointLight { radius }),
        }
    }

    #[must_use]
    pub fn new_area(color: Vec3, energy: f32, shape: AreaShape, size: f32) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            color,
            energy,
            kind: LightKind::Area(AreaLight { shape, size }),
        }
    }

    /// Short type label used in exported manifests.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            LightKind::Point(_) => "point",
            LightKind::Area(_) => "area",
        }
    }
}
