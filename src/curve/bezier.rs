use glam::Vec3;

/// One cubic Bezier segment in absolute coordinates.
///
/// `p0`/`p3` are the anchors, `p1`/`p2` the absolute handle positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicSegment {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl CubicSegment {
    #[must_use]
    pub const fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Evaluates the segment position at `t` in `[0, 1]`.
    #[must_use]
    pub fn point(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        let u2 = u * u;
        let t2 = t * t;
        self.p0 * (u2 * u) + self.p1 * (3.0 * u2 * t) + self.p2 * (3.0 * u * t2) + self.p3 * (t2 * t)
    }

    /// First derivative with respect to `t`.
    #[must_use]
    pub fn derivative(&self, t: f32) -> Vec3 {
        let u = 1.0 - t;
        (self.p1 - self.p0) * (3.0 * u * u)
            + (self.p2 - self.p1) * (6.0 * u * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// De Casteljau split at `t`, returning the two sub-curves that together
    /// trace exactly the same shape.
    #[must_use]
    pub fn split(&self, t: f32) -> (Self, Self) {
        let a = self.p0.lerp(self.p1, t);
        let b = self.p1.lerp(self.p2, t);
        let c = self.p2.lerp(self.p3, t);
        let ab = a.lerp(b, t);
        let bc = b.lerp(c, t);
        let mid = ab.lerp(bc, t);

        (
            Self::new(self.p0, a, ab, mid),
            Self::new(mid, bc, c, self.p3),
        )
    }

    /// Splits into `pieces` sub-segments of equal parameter width.
    #[must_use]
    pub fn split_uniform(&self, pieces: usize) -> Vec<Self> {
        let pieces = pieces.max(1);
        let mut out = Vec::with_capacity(pieces);
        let mut remaining = *self;

        // Each cut is taken on the shrinking remainder, so the local parameter
        // is rescaled to keep the pieces uniform in the original parameter.
        for m in 0..pieces - 1 {
            let local_t = 1.0 / (pieces - m) as f32;
            let (left, right) = remaining.split(local_t);
            out.push(left);
            remaining = right;
        }
        out.push(remaining);
        out
    }
}
