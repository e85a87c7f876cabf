use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    Linear,
    Step,
    CubicSpline,
}

/// How a track is evaluated before its first and after its last keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolation {
    /// Hold the boundary keyframe value.
    #[default]
    Constant,
    /// Continue the slope of the boundary segment indefinitely.
    Linear,
}

const MAX_SCAN_OFFSET: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct KeyframeCursor {
    pub last_index: usize,
}

#[derive(Debug, Clone)]
pub struct KeyframeTrack<T: Interpolatable> {
    pub times: Vec<f32>,
    pub values: Vec<T>, // For CubicSpline, length is times.len() * 3
    pub interpolation: InterpolationMode,
    pub extrapolation: Extrapolation,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
            extrapolation: Extrapolation::Constant,
        }
    }

    #[must_use]
    pub fn with_extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `(time, value)` pairs of the keyframes themselves.
    pub fn keyframes(&self) -> impl Iterator<Item = (f32, T)> + '_ {
        self.times
            .iter()
            .enumerate()
            .map(|(i, &t)| (t, *self.get_value_at(i)))
    }

    /// Samples the track. Returns `None` for an empty track.
    #[must_use]
    pub fn sample(&self, time: f32) -> Option<T> {
        let mut cursor = KeyframeCursor::default();
        self.sample_with_cursor(time, &mut cursor)
    }

    /// Sampling with cursor.
    ///
    /// Sequential playback only scans a few keys forward or backward from the
    /// cursor; large jumps fall back to a binary search.
    pub fn sample_with_cursor(&self, time: f32, cursor: &mut KeyframeCursor) -> Option<T> {
        let len = self.times.len();
        if len == 0 {
            return None;
        }
        // Fast path: static data (single keyframe)
        if len == 1 {
            return Some(*self.get_value_at(0));
        }

        if time < self.times[0] {
            cursor.last_index = 0;
            return Some(self.extrapolate(0, time));
        }
        if time > self.times[len - 1] {
            cursor.last_index = len - 1;
            return Some(self.extrapolate(len - 2, time));
        }

        let i = cursor.last_index.min(len - 1);
        let t_curr = self.times[i];

        let found_index = if time >= t_curr {
            // Forward scan: check intervals [i, i+1), [i+1, i+2) ...
            let mut res = None;
            for offset in 0..=MAX_SCAN_OFFSET {
                let idx = i + offset;
                if idx >= len - 1 {
                    res = Some(len - 1);
                    break;
                }
                if time < self.times[idx + 1] {
                    res = Some(idx);
                    break;
                }
            }
            res
        } else {
            // Backward scan: time < times[i], so look for the first key at or before it
            let mut res = None;
            for offset in 1..=MAX_SCAN_OFFSET {
                if i < offset {
                    break;
                }
                let idx = i - offset;
                if time >= self.times[idx] {
                    res = Some(idx);
                    break;
                }
            }
            res
        };

        let final_index = found_index.unwrap_or_else(|| {
            // Large jump: fall back to binary search
            let next_idx = self.times.partition_point(|&t| t <= time);
            next_idx.saturating_sub(1)
        });
        cursor.last_index = final_index;

        Some(self.sample_at_frame(final_index, time))
    }

    /// For Linear/Step, the index is used directly.
    /// For CubicSpline, the value is at index * 3 + 1.
    fn get_value_at(&self, index: usize) -> &T {
        match self.interpolation {
            InterpolationMode::CubicSpline => &self.values[index * 3 + 1],
            _ => &self.values[index],
        }
    }

    /// Evaluates outside the key range using segment `[seg, seg + 1]`.
    ///
    /// Cubic tracks extrapolate along the chord of the boundary segment.
    fn extrapolate(&self, seg: usize, time: f32) -> T {
        let before = seg == 0 && time < self.times[0];
        let boundary = if before { seg } else { seg + 1 };

        match (self.extrapolation, self.interpolation) {
            (Extrapolation::Constant, _) | (_, InterpolationMode::Step) => {
                *self.get_value_at(boundary)
            }
            (Extrapolation::Linear, _) => {
                let t0 = self.times[seg];
                let t1 = self.times[seg + 1];
                let dt = t1 - t0;
                if dt <= 1e-6 {
                    return *self.get_value_at(boundary);
                }
                let t = (time - t0) / dt;
                T::interpolate_linear(*self.get_value_at(seg), *self.get_value_at(seg + 1), t)
            }
        }
    }

    fn sample_at_frame(&self, index: usize, time: f32) -> T {
        let len = self.times.len();

        if index >= len - 1 {
            return *self.get_value_at(len - 1);
        }

        let next_idx = index + 1;
        let t0 = self.times[index];
        let t1 = self.times[next_idx];
        let dt = t1 - t0;

        let t = if dt > 1e-6 { (time - t0) / dt } else { 0.0 };
        let t = t.clamp(0.0, 1.0);

        match self.interpolation {
            InterpolationMode::Step => *self.get_value_at(index),
            InterpolationMode::Linear => {
                T::interpolate_linear(*self.get_value_at(index), *self.get_value_at(next_idx), t)
            }
            InterpolationMode::CubicSpline => {
                let i_prev = index * 3;
                let i_next = next_idx * 3;

                let v0 = self.values[i_prev + 1];
                let out_tangent0 = self.values[i_prev + 2];
                let in_tangent1 = self.values[i_next];
                let v1 = self.values[i_next + 1];

                T::interpolate_cubic(v0, out_tangent0, in_tangent1, v1, t, dt)
            }
        }
    }
}
