pub mod circle;
pub mod sphere;

pub use circle::{create_bezier_circle, CircleOptions, CIRCLE_KAPPA};
pub use sphere::SphereOptions;
