//! Colour helpers.

use glam::{Vec3, Vec4};

use crate::errors::{Result, ShapeshiftError};

/// Converts one sRGB-encoded channel in `[0, 1]` to linear light.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Parses `#RRGGBB` (leading `#` optional) into linear RGB.
///
/// Light colours are authored as hex swatches in sRGB, while the scene stores
/// linear values.
pub fn hex_color_to_rgb(hex: &str) -> Result<Vec3> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(ShapeshiftError::InvalidColor(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| -> Result<f32> {
        let byte = u8::from_str_radix(&digits[range], 16)
            .map_err(|_| ShapeshiftError::InvalidColor(hex.to_string()))?;
        Ok(srgb_to_linear(f32::from(byte) / 255.0))
    };

    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Same as [`hex_color_to_rgb`] with an opaque alpha channel.
pub fn hex_color_to_rgba(hex: &str) -> Result<Vec4> {
    Ok(hex_color_to_rgb(hex)?.extend(1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        let a = hex_color_to_rgb("#FFFFFF").unwrap();
        let b = hex_color_to_rgb("ffffff").unwrap();
        assert_eq!(a, b);
        assert!((a.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn applies_srgb_transfer() {
        // 0x80 = 128 -> 0.50196 encoded -> ~0.2158 linear
        let c = hex_color_to_rgb("#808080").unwrap();
        assert!((c.x - 0.215_861).abs() < 1e-4, "got {}", c.x);
        assert_eq!(c.x, c.y);
        assert_eq!(c.y, c.z);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(hex_color_to_rgb("#F2E7D").is_err());
        assert!(hex_color_to_rgb("#GGGGGG").is_err());
        assert!(hex_color_to_rgb("").is_err());
    }

    #[test]
    fn rgba_is_opaque() {
        let c = hex_color_to_rgba("#F29F05").unwrap();
        assert!((c.w - 1.0).abs() < f32::EPSILON);
    }
}
