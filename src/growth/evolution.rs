//! One-way evolution state machine.
//!
//! `Default -> {Elegant | Sturdy | Eldritch}` on [`EVOLUTION_DAY`], chosen by
//! the largest [`EarnedTotals`] entry, then `None -> {Crystal | Petal | Spirit}`
//! on [`BLOOM_DAY`], chosen by the growth type. Both transitions are terminal
//! until [`EvolutionTracker::reset`].

use serde::{Deserialize, Serialize};

use super::state::EarnedTotals;

/// Day on which the growth type is chosen.
pub const EVOLUTION_DAY: u32 = 15;
/// Day on which the flower type is chosen.
pub const BLOOM_DAY: u32 = 30;
/// Last day of a playthrough.
pub const MAX_DAYS: u32 = 50;

/// Permanent shape variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GrowthType {
    #[default]
    Default,
    /// Long and narrow
    Elegant,
    /// Thick and gnarled
    Sturdy,
    /// Wildly twisted
    Eldritch,
}

impl GrowthType {
    /// Pick the variant the player invested in most. Ties go to the earliest
    /// of length, thickness, mutation.
    pub fn select(totals: &EarnedTotals) -> Self {
        let candidates = [
            (GrowthType::Elegant, totals.length),
            (GrowthType::Sturdy, totals.thickness),
            (GrowthType::Eldritch, totals.mutation),
        ];
        let mut best = candidates[0];
        for c in &candidates[1..] {
            // Strict comparison keeps the earlier entry on ties
            if c.1 > best.1 {
                best = *c;
            }
        }
        best.0
    }

    /// Flower variant that belongs to this growth type.
    pub fn flower(self) -> FlowerType {
        match self {
            GrowthType::Default => FlowerType::None,
            GrowthType::Elegant => FlowerType::Crystal,
            GrowthType::Sturdy => FlowerType::Petal,
            GrowthType::Eldritch => FlowerType::Spirit,
        }
    }
}

/// Flower decoration variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlowerType {
    #[default]
    None,
    /// Faceted six-point fan
    Crystal,
    /// Five loose petals
    Petal,
    /// Flickering translucent wisp
    Spirit,
}

/// A transition fired by the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolutionEvent {
    Growth(GrowthType),
    Flower(FlowerType),
}

/// Day counter plus the two one-way variant selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvolutionTracker {
    day: u32,
    growth_type: GrowthType,
    flower_type: FlowerType,
}

impl Default for EvolutionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl EvolutionTracker {
    pub fn new() -> Self {
        Self {
            day: 1,
            growth_type: GrowthType::Default,
            flower_type: FlowerType::None,
        }
    }

    #[inline]
    pub fn day(&self) -> u32 {
        self.day
    }

    #[inline]
    pub fn growth_type(&self) -> GrowthType {
        self.growth_type
    }

    #[inline]
    pub fn flower_type(&self) -> FlowerType {
        self.flower_type
    }

    /// Whether the final day has been reached.
    #[inline]
    pub fn is_final_day(&self) -> bool {
        self.day >= MAX_DAYS
    }

    /// Advance the day counter (capped at [`MAX_DAYS`]) and run the
    /// milestone checks.
    pub fn advance_day(&mut self, totals: &EarnedTotals) -> Vec<EvolutionEvent> {
        if self.day < MAX_DAYS {
            self.day += 1;
        }
        self.check_evolution(totals)
    }

    /// Fire any milestone transitions that are due. Already-taken
    /// transitions are never re-evaluated.
    pub fn check_evolution(&mut self, totals: &EarnedTotals) -> Vec<EvolutionEvent> {
        let mut events = Vec::new();

        if self.day >= EVOLUTION_DAY && self.growth_type == GrowthType::Default {
            self.growth_type = GrowthType::select(totals);
            events.push(EvolutionEvent::Growth(self.growth_type));
        }

        if self.day >= BLOOM_DAY
            && self.flower_type == FlowerType::None
            && self.growth_type != GrowthType::Default
        {
            self.flower_type = self.growth_type.flower();
            events.push(EvolutionEvent::Flower(self.flower_type));
        }

        events
    }

    /// Force a growth type outside the day schedule. Returns `false` when a
    /// type was already chosen (the transition is one-way).
    pub fn force_growth_type(&mut self, growth_type: GrowthType) -> bool {
        if self.growth_type != GrowthType::Default || growth_type == GrowthType::Default {
            return false;
        }
        self.growth_type = growth_type;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(length: f32, thickness: f32, mutation: f32) -> EarnedTotals {
        EarnedTotals { length, thickness, mutation }
    }

    #[test]
    fn test_select_largest_total() {
        assert_eq!(GrowthType::select(&totals(10.0, 5.0, 1.0)), GrowthType::Elegant);
        assert_eq!(GrowthType::select(&totals(1.0, 5.0, 1.0)), GrowthType::Sturdy);
        assert_eq!(GrowthType::select(&totals(1.0, 5.0, 60.0)), GrowthType::Eldritch);
    }

    #[test]
    fn test_select_tie_priority() {
        assert_eq!(GrowthType::select(&totals(0.0, 0.0, 0.0)), GrowthType::Elegant);
        assert_eq!(GrowthType::select(&totals(5.0, 5.0, 5.0)), GrowthType::Elegant);
        assert_eq!(GrowthType::select(&totals(1.0, 5.0, 5.0)), GrowthType::Sturdy);
    }

    #[test]
    fn test_flower_mapping() {
        assert_eq!(GrowthType::Elegant.flower(), FlowerType::Crystal);
        assert_eq!(GrowthType::Sturdy.flower(), FlowerType::Petal);
        assert_eq!(GrowthType::Eldritch.flower(), FlowerType::Spirit);
        assert_eq!(GrowthType::Default.flower(), FlowerType::None);
    }

    #[test]
    fn test_no_evolution_before_milestone() {
        let mut t = EvolutionTracker::new();
        let earned = totals(0.0, 10.0, 0.0);
        for _ in 1..EVOLUTION_DAY - 1 {
            assert!(t.advance_day(&earned).is_empty());
        }
        assert_eq!(t.day(), EVOLUTION_DAY - 1);
        assert_eq!(t.growth_type(), GrowthType::Default);

        let events = t.advance_day(&earned);
        assert_eq!(events, vec![EvolutionEvent::Growth(GrowthType::Sturdy)]);
    }

    #[test]
    fn test_evolution_is_one_way() {
        let mut t = EvolutionTracker::new();
        while t.day() < EVOLUTION_DAY {
            t.advance_day(&totals(0.0, 10.0, 0.0));
        }
        assert_eq!(t.growth_type(), GrowthType::Sturdy);

        // Same milestone day, different investment: nothing changes
        assert!(t.check_evolution(&totals(0.0, 0.0, 500.0)).is_empty());
        assert!(t.check_evolution(&totals(500.0, 0.0, 0.0)).is_empty());
        assert_eq!(t.growth_type(), GrowthType::Sturdy);
        assert!(!t.force_growth_type(GrowthType::Eldritch));
    }

    #[test]
    fn test_flower_follows_growth_type() {
        let mut t = EvolutionTracker::new();
        let earned = totals(0.0, 0.0, 90.0);
        let mut all = Vec::new();
        while t.day() < BLOOM_DAY {
            all.extend(t.advance_day(&earned));
        }
        assert_eq!(
            all,
            vec![
                EvolutionEvent::Growth(GrowthType::Eldritch),
                EvolutionEvent::Flower(FlowerType::Spirit),
            ]
        );
        assert!(t.advance_day(&earned).is_empty());
    }

    #[test]
    fn test_day_caps_at_max() {
        let mut t = EvolutionTracker::new();
        for _ in 0..200 {
            t.advance_day(&EarnedTotals::default());
        }
        assert_eq!(t.day(), MAX_DAYS);
        assert!(t.is_final_day());
    }

    #[test]
    fn test_forced_type_then_flower_milestone() {
        let mut t = EvolutionTracker::new();
        assert!(t.force_growth_type(GrowthType::Elegant));
        let mut events = Vec::new();
        while t.day() < BLOOM_DAY {
            events.extend(t.advance_day(&totals(0.0, 100.0, 0.0)));
        }
        // Forced type is not overridden at the evolution milestone
        assert_eq!(events, vec![EvolutionEvent::Flower(FlowerType::Crystal)]);
    }

    #[test]
    fn test_reset() {
        let mut t = EvolutionTracker::new();
        t.force_growth_type(GrowthType::Sturdy);
        t.advance_day(&EarnedTotals::default());
        t.reset();
        assert_eq!(t, EvolutionTracker::new());
    }
}
