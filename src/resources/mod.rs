//! 核心资源定义模块
//!
//! Component data attached to scene nodes that does not depend on a renderer:
//! - Mesh: renderable shape descriptor
//! - primitives: procedural shape builders (Bezier circle, UV sphere)

pub mod mesh;
pub mod primitives;

pub use mesh::{Mesh, MeshPrimitive};
pub use primitives::{create_bezier_circle, CircleOptions, SphereOptions};
