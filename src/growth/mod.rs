//! Growth simulation: smoothed growth parameters, experience leveling and
//! the one-way evolution policy.
//!
//! Player commands only move *targets*; [`GrowthState::tick`] relaxes the
//! displayed values toward them and advances the depth level along the
//! [`LevelingCurve`]. The [`EvolutionTracker`] watches the day counter and
//! picks a permanent growth/flower variant at fixed milestones.

pub mod evolution;
pub mod leveling;
pub mod state;

pub use evolution::{EvolutionEvent, EvolutionTracker, FlowerType, GrowthType};
pub use leveling::LevelingCurve;
pub use state::{EarnedTotals, GrowthState, TickOutcome};
