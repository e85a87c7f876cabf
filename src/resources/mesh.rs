use serde::{Deserialize, Serialize};

use crate::resources::primitives::SphereOptions;

/// Shape a mesh component describes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MeshPrimitive {
    UvSphere(SphereOptions),
}

#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub primitive: MeshPrimitive,

    // === 实例特定的渲染设置 ===
    pub visible: bool,
}

impl Mesh {
    pub fn new(name: impl Into<String>, primitive: MeshPrimitive) -> Self {
        Self {
            name: name.into(),
            primitive,
            visible: true,
        }
    }

    pub fn new_sphere(name: impl Into<String>, options: SphereOptions) -> Self {
        Self::new(name, MeshPrimitive::UvSphere(options))
    }

    /// Radius of a sphere enclosing the mesh in its local space.
    #[must_use]
    pub fn bounding_radius(&self) -> f32 {
        match self.primitive {
            MeshPrimitive::UvSphere(options) => options.radius,
        }
    }
}
