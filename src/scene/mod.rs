//! 场景图系统模块
//!
//! 管理场景层级结构和组件：
//! - Node: 场景节点（支持父子关系和变换）
//! - Transform: 变换组件（位置、旋转、缩放）
//! - Scene: 场景容器
//! - Camera / Light: 相机与光源组件
//! - Constraint: follow-path and track-to constraints solved during the transform pass
//! - RenderSettings: frame range and output configuration consumed by the renderer
//! - TransformSystem: 解耦的变换更新系统

pub mod camera;
pub mod constraint;
pub mod light;
pub mod node;
pub mod render_settings;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;
pub mod transform_system;

// 重新导出常用类型
pub use camera::Camera;
pub use constraint::{Constraint, FollowPath, PathTarget, TrackTo};
pub use light::{AreaLight, AreaShape, Light, LightKind};
pub use node::Node;
pub use render_settings::{
    Container, OutputSettings, RenderDevice, RenderEngine, RenderSettings, VideoCodec,
};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
    pub struct CameraKey;
    pub struct LightKey;
    pub struct CurveKey;
}
