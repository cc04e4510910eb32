//! Growth parameters with exponential smoothing toward player-driven targets.

use serde::{Deserialize, Serialize};

use super::leveling::LevelingCurve;

/// Fraction of the remaining distance covered by each tick.
pub const SMOOTHING_FACTOR: f32 = 0.1;

/// Lower bound for the length target.
pub const MIN_LENGTH: f32 = 10.0;
/// Lower bound for the thickness target.
pub const MIN_THICKNESS: f32 = 2.0;

/// Experience granted per action at buff 1.0.
pub const EXP_PER_ACTION: f32 = 5.0;

/// Thickness lost per water at buff 1.0, before resilience.
pub const WATER_THICKNESS_PENALTY: f32 = 3.0;
/// Length lost per fertilize at buff 1.0, before resilience.
pub const FERTILIZE_LENGTH_PENALTY: f32 = 5.0;
/// Mutation removed by water or fertilize.
pub const CALMING_DECREMENT: f32 = 0.1;

/// Kotodama gains at buff 1.0.
pub const KOTODAMA_LENGTH_GAIN: f32 = 5.0;
pub const KOTODAMA_THICKNESS_LOSS: f32 = 1.0;
pub const KOTODAMA_MUTATION_GAIN: f32 = 0.2;

/// Resilience level at which action penalties vanish entirely.
pub const RESILIENCE_IMMUNE_LEVEL: u32 = 6;

const INITIAL_TARGET_LENGTH: f32 = 10.0;
const INITIAL_TARGET_THICKNESS: f32 = 2.0;

/// Penalty multiplier for a resilience upgrade level: each level removes 15%
/// of the penalty, and level 6 or above removes it completely.
#[inline]
pub fn resilience_multiplier(level: u32) -> f32 {
    if level >= RESILIENCE_IMMUNE_LEVEL {
        0.0
    } else {
        (1.0 - 0.15 * level as f32).max(0.0)
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cumulative gains earned through player commands (never through smoothing).
///
/// Mutation is tracked in percentage points so it competes on the same
/// scale as the length/thickness increments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EarnedTotals {
    pub length: f32,
    pub thickness: f32,
    pub mutation: f32,
}

/// Result of a single [`GrowthState::tick`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Depth level increased by one this tick.
    pub leveled_up: bool,
}

/// Smoothed growth parameters plus experience and leveling counters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthState {
    current_length: f32,
    current_thickness: f32,
    current_mutation: f32,

    target_length: f32,
    target_thickness: f32,
    target_mutation: f32,

    depth_experience: f32,
    depth_level: u32,
    max_mutation_reached: f32,

    earned: EarnedTotals,
}

impl Default for GrowthState {
    fn default() -> Self {
        Self::new()
    }
}

impl GrowthState {
    /// Freshly planted state: length 0 -> 10, thickness 0 -> 2, no chaos.
    pub fn new() -> Self {
        Self {
            current_length: 0.0,
            current_thickness: 0.0,
            current_mutation: 0.0,
            target_length: INITIAL_TARGET_LENGTH,
            target_thickness: INITIAL_TARGET_THICKNESS,
            target_mutation: 0.0,
            depth_experience: 0.0,
            depth_level: 0,
            max_mutation_reached: 0.0,
            earned: EarnedTotals::default(),
        }
    }

    /// Water: grow longer at the cost of thickness, calm the chaos.
    pub fn water(&mut self, buff: f32, resilience_level: u32, increment: f32) {
        let gain = increment * buff;
        self.target_length += gain;
        self.earned.length += gain;
        self.depth_experience += EXP_PER_ACTION * buff;

        let penalty = WATER_THICKNESS_PENALTY * buff * resilience_multiplier(resilience_level);
        self.target_thickness = (self.target_thickness - penalty).max(MIN_THICKNESS);

        self.calm();
    }

    /// Fertilize: grow thicker at the cost of length, calm the chaos.
    pub fn fertilize(&mut self, buff: f32, resilience_level: u32, increment: f32) {
        let gain = increment * buff;
        self.target_thickness += gain;
        self.earned.thickness += gain;
        self.depth_experience += EXP_PER_ACTION * buff;

        let penalty = FERTILIZE_LENGTH_PENALTY * buff * resilience_multiplier(resilience_level);
        self.target_length = (self.target_length - penalty).max(MIN_LENGTH);

        self.calm();
    }

    /// Kotodama: stretch the tree, thin it out and feed the chaos.
    pub fn kotodama(&mut self, buff: f32) {
        self.depth_experience += EXP_PER_ACTION * buff;
        self.target_length += KOTODAMA_LENGTH_GAIN * buff;
        self.target_thickness =
            (self.target_thickness - KOTODAMA_THICKNESS_LOSS * buff).max(MIN_THICKNESS);

        let before = self.target_mutation;
        self.target_mutation = (before + KOTODAMA_MUTATION_GAIN * buff).clamp(0.0, 1.0);
        self.earned.mutation += (self.target_mutation - before).max(0.0) * 100.0;
    }

    fn calm(&mut self) {
        self.target_mutation = (self.target_mutation - CALMING_DECREMENT).max(0.0);
    }

    /// Advance one frame: relax current values toward targets and level up
    /// by at most one depth.
    pub fn tick(&mut self, curve: &LevelingCurve) -> TickOutcome {
        self.current_length = lerp(self.current_length, self.target_length, SMOOTHING_FACTOR);
        self.current_thickness =
            lerp(self.current_thickness, self.target_thickness, SMOOTHING_FACTOR);
        self.current_mutation =
            lerp(self.current_mutation, self.target_mutation, SMOOTHING_FACTOR);
        self.max_mutation_reached = self.max_mutation_reached.max(self.current_mutation);

        let mut outcome = TickOutcome::default();
        if curve.can_advance(self.depth_level, self.depth_experience) {
            self.depth_level += 1;
            outcome.leveled_up = true;
        }
        // A curve swapped for one with fewer levels must not leave us above it
        self.depth_level = self.depth_level.min(curve.max_depth);
        outcome
    }

    /// Progress toward the next depth level, in `[0, 1]`.
    pub fn depth_progress(&self, curve: &LevelingCurve) -> f32 {
        curve.progress(self.depth_level, self.depth_experience)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.current_length
    }

    #[inline]
    pub fn thickness(&self) -> f32 {
        self.current_thickness
    }

    #[inline]
    pub fn mutation(&self) -> f32 {
        self.current_mutation
    }

    #[inline]
    pub fn target_length(&self) -> f32 {
        self.target_length
    }

    #[inline]
    pub fn target_thickness(&self) -> f32 {
        self.target_thickness
    }

    #[inline]
    pub fn target_mutation(&self) -> f32 {
        self.target_mutation
    }

    #[inline]
    pub fn experience(&self) -> f32 {
        self.depth_experience
    }

    #[inline]
    pub fn depth_level(&self) -> u32 {
        self.depth_level
    }

    #[inline]
    pub fn max_mutation(&self) -> f32 {
        self.max_mutation_reached
    }

    #[inline]
    pub fn earned(&self) -> &EarnedTotals {
        &self.earned
    }
}
