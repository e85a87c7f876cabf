//! Utility Module
//!
//! - [`color`]: hex swatch parsing into linear RGB

pub mod color;

pub use color::{hex_color_to_rgb, hex_color_to_rgba};
