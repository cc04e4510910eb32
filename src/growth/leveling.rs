//! Power-law experience curve mapping accumulated experience to a depth level.

/// Experience thresholds `threshold(d) = base * d^power` for `d >= 1`,
/// with `threshold(0) = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelingCurve {
    pub exp_base: f32,
    pub exp_power: f32,
    pub max_depth: u32,
}

impl Default for LevelingCurve {
    fn default() -> Self {
        Self {
            exp_base: 30.0,
            exp_power: 1.6,
            max_depth: 6,
        }
    }
}

impl LevelingCurve {
    pub fn new(exp_base: f32, exp_power: f32, max_depth: u32) -> Self {
        Self { exp_base, exp_power, max_depth }
    }

    /// Experience required to reach `depth`.
    #[inline]
    pub fn threshold(&self, depth: u32) -> f32 {
        if depth == 0 {
            0.0
        } else {
            self.exp_base * (depth as f32).powf(self.exp_power)
        }
    }

    /// Whether `experience` is enough to move from `level` to `level + 1`.
    #[inline]
    pub fn can_advance(&self, level: u32, experience: f32) -> bool {
        level < self.max_depth && experience >= self.threshold(level + 1)
    }

    /// Fraction of the way from `level` to `level + 1`, in `[0, 1]`.
    ///
    /// Returns exactly `1.0` at max depth or when the two thresholds
    /// coincide (or are inverted by a degenerate curve).
    pub fn progress(&self, level: u32, experience: f32) -> f32 {
        if level >= self.max_depth {
            return 1.0;
        }
        let lo = self.threshold(level);
        let hi = self.threshold(level + 1);
        let span = hi - lo;
        if span <= 0.0 || !span.is_finite() {
            return 1.0;
        }
        ((experience - lo) / span).clamp(0.0, 1.0)
    }
}
