use glam::Vec3;

use crate::curve::BezierSpline;
use crate::errors::{Result, ShapeshiftError};

/// A point on the evaluated path.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PathSample {
    /// Distance from the path start.
    pub arc: f32,
    pub position: Vec3,
    /// Unit tangent in the direction of increasing arc.
    pub tangent: Vec3,
}

/// Polyline approximation of a spline with cumulative arc lengths.
///
/// Lookups are by normalised distance, so followers move at constant speed
/// regardless of how control points are spaced.
#[derive(Debug, Clone)]
pub struct CurvePath {
    samples: Vec<PathSample>,
    length: f32,
    cyclic: bool,
}

impl CurvePath {
    pub fn from_spline(spline: &BezierSpline, resolution_u: u32) -> Result<Self> {
        let segment_count = spline.segment_count();
        if segment_count == 0 {
            return Err(ShapeshiftError::DegenerateCurve(format!(
                "need at least 2 control points, got {}",
                spline.len()
            )));
        }

        let steps = resolution_u.max(1);
        let mut raw: Vec<(Vec3, Vec3)> = Vec::with_capacity(segment_count * steps as usize + 1);
        for i in 0..segment_count {
            let Some(segment) = spline.segment(i) else {
                continue;
            };
            for s in 0..steps {
                let t = s as f32 / steps as f32;
                raw.push((segment.point(t), segment.derivative(t)));
            }
        }

        // Close the polyline: a cyclic path returns to its first sample, an
        // open one ends on the last anchor.
        if spline.cyclic {
            let (first, first_d) = raw[0];
            raw.push((first, first_d));
        } else if let Some(last) = spline.segment(segment_count - 1) {
            raw.push((last.point(1.0), last.derivative(1.0)));
        }

        let mut samples = Vec::with_capacity(raw.len());
        let mut arc = 0.0;
        for (i, &(position, derivative)) in raw.iter().enumerate() {
            if i > 0 {
                arc += position.distance(raw[i - 1].0);
            }

            // Zero-length handles leave the derivative undefined at anchors;
            // fall back to the chord direction.
            let mut tangent = derivative.normalize_or_zero();
            if tangent == Vec3::ZERO {
                let next = raw.get(i + 1).map_or(position, |n| n.0);
                let prev = if i > 0 { raw[i - 1].0 } else { position };
                tangent = (next - prev).normalize_or_zero();
            }

            samples.push(PathSample {
                arc,
                position,
                tangent,
            });
        }

        if arc <= f32::EPSILON {
            return Err(ShapeshiftError::DegenerateCurve(
                "path has zero length".to_string(),
            ));
        }

        log::debug!(
            "Built curve path: {} samples, length {:.3}",
            samples.len(),
            arc
        );

        Ok(Self {
            samples,
            length: arc,
            cyclic: spline.cyclic,
        })
    }

    #[inline]
    #[must_use]
    pub fn length(&self) -> f32 {
        self.length
    }

    #[inline]
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    #[inline]
    #[must_use]
    pub fn samples(&self) -> &[PathSample] {
        &self.samples
    }

    /// Samples the path at normalised distance `fraction`.
    ///
    /// Cyclic paths wrap `fraction` into `[0, 1)`; open paths clamp it.
    #[must_use]
    pub fn sample(&self, fraction: f32) -> PathSample {
        let fraction = if self.cyclic {
            fraction.rem_euclid(1.0)
        } else {
            fraction.clamp(0.0, 1.0)
        };
        self.sample_at_arc(fraction * self.length)
    }

    /// Samples the path at an absolute arc distance, clamped to the path.
    #[must_use]
    pub fn sample_at_arc(&self, arc: f32) -> PathSample {
        let last = self.samples.len() - 1;
        if arc <= self.samples[0].arc {
            return self.samples[0];
        }
        if arc >= self.samples[last].arc {
            return self.samples[last];
        }

        // partition_point yields the first sample strictly beyond `arc`.
        let hi = self.samples.partition_point(|s| s.arc <= arc);
        let a = &self.samples[hi - 1];
        let b = &self.samples[hi];

        let seg_len = b.arc - a.arc;
        let t = if seg_len > 0.0 {
            (arc - a.arc) / seg_len
        } else {
            0.0
        };

        let tangent = a.tangent.lerp(b.tangent, t).normalize_or_zero();
        PathSample {
            arc,
            position: a.position.lerp(b.position, t),
            tangent: if tangent == Vec3::ZERO { a.tangent } else { tangent },
        }
    }
}
