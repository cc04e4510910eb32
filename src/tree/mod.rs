//! Procedural tree engine.
//!
//! [`Tree`] owns the growth state, the evolution tracker, the active shape
//! settings and the generated [`Mesh`]. Call [`Tree::update`] once per frame;
//! the mesh is rebuilt only when the smoothed growth values moved enough to
//! be visible, the depth level changed, a variant changed, or the tree is
//! collapsing under high chaos (which animates every frame).

pub mod branch;
pub mod color;
pub mod config;
pub mod mesh;
pub mod noise;
pub mod shapes;

pub use branch::{BranchBuilder, BranchNode, BuildParams, BuildStats};
pub use config::TreeSettings;
pub use mesh::{Mesh, Vertex};

use serde::Serialize;

use crate::growth::{
    EvolutionEvent, EvolutionTracker, FlowerType, GrowthState, GrowthType, LevelingCurve,
};
use branch::{bloom_threshold, collapse_amount, collapse_threshold};
use color::hue_drift_speed;

/// Length change that triggers a rebuild.
pub const LENGTH_EPSILON: f32 = 0.5;
/// Thickness change that triggers a rebuild.
pub const THICKNESS_EPSILON: f32 = 0.1;
/// Mutation change that triggers a rebuild.
pub const MUTATION_EPSILON: f32 = 0.02;

/// Visual length bonus per growth upgrade level.
pub const GROWTH_LEVEL_LENGTH_BONUS: f32 = 0.1;

/// Per-frame inputs from the game layer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UpdateParams {
    /// Seconds since start; drives hue drift, melt and sway
    pub elapsed: f32,
    /// Growth upgrade level (longer visual branches)
    pub growth_level: u32,
    /// Chaos resistance upgrade level (raises the collapse threshold)
    pub chaos_resist_level: u32,
    /// Bloom catalyst upgrade level (lowers the bloom threshold)
    pub bloom_level: u32,
    /// Overrides the evolved growth type unless `Default`
    pub growth_type: GrowthType,
    /// Overrides the evolved flower type unless `None`. Any active flower
    /// type shows flowers regardless of bloom
    pub flower_type: FlowerType,
}

/// Values the last mesh was built from.
#[derive(Clone, Copy, Debug, PartialEq)]
struct BuildSnapshot {
    length: f32,
    thickness: f32,
    mutation: f32,
    depth_level: u32,
    bloomed: bool,
    growth_type: GrowthType,
    flower_type: FlowerType,
    growth_level: u32,
}

impl BuildSnapshot {
    fn differs(&self, other: &Self) -> bool {
        (self.length - other.length).abs() > LENGTH_EPSILON
            || (self.thickness - other.thickness).abs() > THICKNESS_EPSILON
            || (self.mutation - other.mutation).abs() > MUTATION_EPSILON
            || self.depth_level != other.depth_level
            || self.bloomed != other.bloomed
            || self.growth_type != other.growth_type
            || self.flower_type != other.flower_type
            || self.growth_level != other.growth_level
    }
}

/// Diagnostic snapshot for debug overlays and the CLI.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TreeStats {
    pub day: u32,
    pub growth_type: GrowthType,
    pub flower_type: FlowerType,
    pub length: f32,
    pub thickness: f32,
    pub mutation: f32,
    pub max_mutation: f32,
    pub experience: f32,
    pub depth_level: u32,
    pub depth_progress: f32,
    pub bloomed: bool,
    pub seed: u64,
    pub vertices: usize,
    pub triangles: usize,
    pub stems: u32,
    pub leaves: u32,
    pub flowers: u32,
}

/// The growth-and-mesh engine for a single tree.
pub struct Tree {
    base_settings: TreeSettings,
    settings: TreeSettings,
    curve: LevelingCurve,
    growth: GrowthState,
    evolution: EvolutionTracker,
    seed: u64,
    mesh: Mesh,
    build_stats: BuildStats,
    last_built: Option<BuildSnapshot>,
    dirty: bool,
    bloomed: bool,
}

impl Tree {
    /// Plant a tree with a random seed.
    pub fn new(settings: TreeSettings) -> Self {
        Self::with_seed(settings, rand::random())
    }

    /// Plant a tree with a fixed seed (reproducible jitter and noise).
    pub fn with_seed(settings: TreeSettings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let curve = settings.leveling_curve();
        log::info!(
            "Planted tree (seed {}, max depth {}, exp curve {}·d^{})",
            seed,
            settings.max_depth,
            settings.exp_base,
            settings.exp_power
        );
        Self {
            base_settings: settings.clone(),
            settings,
            curve,
            growth: GrowthState::new(),
            evolution: EvolutionTracker::new(),
            seed,
            mesh: Mesh::new(),
            build_stats: BuildStats::default(),
            last_built: None,
            dirty: true,
            bloomed: false,
        }
    }

    // -----------------------------------------------------------------------
    // Player actions
    // -----------------------------------------------------------------------

    pub fn water(&mut self, buff: f32, resilience_level: u32, increment: f32) {
        self.growth.water(buff, resilience_level, increment);
        log::debug!("Water: target length {:.1}", self.growth.target_length());
    }

    pub fn fertilize(&mut self, buff: f32, resilience_level: u32, increment: f32) {
        self.growth.fertilize(buff, resilience_level, increment);
        log::debug!("Fertilize: target thickness {:.1}", self.growth.target_thickness());
    }

    pub fn kotodama(&mut self, buff: f32) {
        self.growth.kotodama(buff);
        log::debug!("Kotodama: target mutation {:.2}", self.growth.target_mutation());
    }

    /// Force a growth type outside the day schedule. One-way: returns
    /// `false` if a type was already chosen.
    pub fn apply_evolution(&mut self, growth_type: GrowthType) -> bool {
        if !self.evolution.force_growth_type(growth_type) {
            return false;
        }
        self.evolve_settings(growth_type);
        true
    }

    /// Advance the day counter and apply any milestone evolution.
    pub fn increment_day(&mut self) -> Vec<EvolutionEvent> {
        let events = self.evolution.advance_day(self.growth.earned());
        for event in &events {
            match *event {
                EvolutionEvent::Growth(growth_type) => self.evolve_settings(growth_type),
                EvolutionEvent::Flower(flower_type) => {
                    log::info!("Day {}: flowers will bloom as {:?}", self.evolution.day(), flower_type);
                    self.dirty = true;
                }
            }
        }
        events
    }

    /// Replant: initial growth values, fresh random seed, no evolution.
    pub fn reset(&mut self) {
        self.reset_with_seed(rand::random());
    }

    pub fn reset_with_seed(&mut self, seed: u64) {
        self.settings = self.base_settings.clone();
        self.curve = self.settings.leveling_curve();
        self.growth = GrowthState::new();
        self.evolution.reset();
        self.seed = seed;
        self.mesh.clear();
        self.build_stats = BuildStats::default();
        self.last_built = None;
        self.dirty = true;
        self.bloomed = false;
        log::info!("Tree reset (seed {})", seed);
    }

    fn evolve_settings(&mut self, growth_type: GrowthType) {
        self.settings = self.base_settings.evolved(growth_type);
        self.dirty = true;
        log::info!("Day {}: evolved into {:?}", self.evolution.day(), growth_type);
    }

    // -----------------------------------------------------------------------
    // Frame update
    // -----------------------------------------------------------------------

    /// Growth type used for rendering: the parameter when set, otherwise
    /// the one this tree evolved into.
    fn active_growth_type(&self, params: &UpdateParams) -> GrowthType {
        match params.growth_type {
            GrowthType::Default => self.evolution.growth_type(),
            forced => forced,
        }
    }

    /// Flower type used for rendering: the parameter when set, otherwise
    /// the one this tree evolved into.
    fn active_flower_type(&self, params: &UpdateParams) -> FlowerType {
        match params.flower_type {
            FlowerType::None => self.evolution.flower_type(),
            forced => forced,
        }
    }

    /// Advance one frame. Returns `true` when the mesh was rebuilt.
    pub fn update(&mut self, params: &UpdateParams) -> bool {
        let outcome = self.growth.tick(&self.curve);
        if outcome.leveled_up {
            log::info!(
                "Depth level {} reached ({:.1} exp)",
                self.growth.depth_level(),
                self.growth.experience()
            );
            self.dirty = true;
        }

        let bloomed = self.growth.max_mutation() > bloom_threshold(params.bloom_level);
        if bloomed && !self.bloomed {
            log::info!("Bloom unlocked at mutation {:.2}", self.growth.max_mutation());
        }
        self.bloomed = bloomed;

        let collapse = self.collapse(params);
        let snapshot = self.snapshot(params);
        let changed = self.last_built.is_none_or(|prev| prev.differs(&snapshot));

        log::trace!(
            "Tick: len {:.2} thick {:.2} mut {:.3} (dirty {}, changed {}, collapse {:.2})",
            self.growth.length(),
            self.growth.thickness(),
            self.growth.mutation(),
            self.dirty,
            changed,
            collapse
        );

        if self.dirty || changed || collapse > 0.0 {
            self.rebuild(params);
            true
        } else {
            false
        }
    }

    /// Rebuild the mesh from the current smoothed values without ticking.
    pub fn rebuild(&mut self, params: &UpdateParams) {
        let collapse = self.collapse(params);
        let hue_speed = hue_drift_speed(self.settings.hue_speed, self.active_growth_type(params));

        let length_scale =
            self.settings.len_scale * (1.0 + GROWTH_LEVEL_LENGTH_BONUS * params.growth_level as f32);
        let root = BranchNode::root(
            self.growth.length() * length_scale,
            self.growth.thickness() * self.settings.thick_scale,
            self.growth.depth_level() as i32,
        );

        let build = BuildParams {
            settings: &self.settings,
            mutation: self.growth.mutation(),
            max_mutation: self.growth.max_mutation(),
            collapse,
            bloomed: self.bloomed,
            flower_type: self.active_flower_type(params),
            hue_speed,
            elapsed: params.elapsed,
            seed: self.seed,
        };

        self.mesh.clear();
        self.build_stats = BranchBuilder::new(build).build(root, &mut self.mesh);
        self.last_built = Some(self.snapshot(params));
        self.dirty = false;

        log::debug!(
            "Rebuilt mesh: {} vertices, {} triangles ({} stems, {} leaves, {} flowers)",
            self.mesh.vertex_count(),
            self.mesh.triangle_count(),
            self.build_stats.stems,
            self.build_stats.leaves,
            self.build_stats.flowers
        );
    }

    fn collapse(&self, params: &UpdateParams) -> f32 {
        collapse_amount(
            self.growth.max_mutation(),
            collapse_threshold(params.chaos_resist_level),
        )
    }

    fn snapshot(&self, params: &UpdateParams) -> BuildSnapshot {
        BuildSnapshot {
            length: self.growth.length(),
            thickness: self.growth.thickness(),
            mutation: self.growth.mutation(),
            depth_level: self.growth.depth_level(),
            bloomed: self.bloomed,
            growth_type: self.active_growth_type(params),
            flower_type: self.active_flower_type(params),
            growth_level: params.growth_level,
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn length(&self) -> f32 {
        self.growth.length()
    }

    #[inline]
    pub fn thickness(&self) -> f32 {
        self.growth.thickness()
    }

    #[inline]
    pub fn mutation(&self) -> f32 {
        self.growth.mutation()
    }

    #[inline]
    pub fn max_mutation(&self) -> f32 {
        self.growth.max_mutation()
    }

    #[inline]
    pub fn experience(&self) -> f32 {
        self.growth.experience()
    }

    #[inline]
    pub fn depth_level(&self) -> u32 {
        self.growth.depth_level()
    }

    /// Progress toward the next depth level, in `[0, 1]`.
    #[inline]
    pub fn depth_progress(&self) -> f32 {
        self.growth.depth_progress(&self.curve)
    }

    #[inline]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Seed for jitter and noise (diagnostic display).
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn growth(&self) -> &GrowthState {
        &self.growth
    }

    #[inline]
    pub fn evolution(&self) -> &EvolutionTracker {
        &self.evolution
    }

    #[inline]
    pub fn settings(&self) -> &TreeSettings {
        &self.settings
    }

    #[inline]
    pub fn day_count(&self) -> u32 {
        self.evolution.day()
    }

    #[inline]
    pub fn growth_type(&self) -> GrowthType {
        self.evolution.growth_type()
    }

    #[inline]
    pub fn flower_type(&self) -> FlowerType {
        self.evolution.flower_type()
    }

    /// Whether flowers have unlocked (as of the last update).
    #[inline]
    pub fn is_bloomed(&self) -> bool {
        self.bloomed
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.evolution.is_final_day()
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats {
            day: self.day_count(),
            growth_type: self.growth_type(),
            flower_type: self.flower_type(),
            length: self.length(),
            thickness: self.thickness(),
            mutation: self.mutation(),
            max_mutation: self.max_mutation(),
            experience: self.experience(),
            depth_level: self.depth_level(),
            depth_progress: self.depth_progress(),
            bloomed: self.bloomed,
            seed: self.seed,
            vertices: self.mesh.vertex_count(),
            triangles: self.mesh.triangle_count(),
            stems: self.build_stats.stems,
            leaves: self.build_stats.leaves,
            flowers: self.build_stats.flowers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::color::{bark_color, bark_hue, CHAOTIC_HUE_SPEED_MULT};
    use super::shapes::SPIRIT_COLOR;
    use crate::growth::evolution::{BLOOM_DAY, EVOLUTION_DAY, MAX_DAYS};

    fn tree() -> Tree {
        Tree::with_seed(TreeSettings::default(), 1234)
    }

    fn run(tree: &mut Tree, ticks: u32) {
        for _ in 0..ticks {
            tree.update(&UpdateParams::default());
        }
    }

    #[test]
    fn test_first_update_builds_trunk() {
        let mut t = tree();
        assert!(t.mesh().is_empty());
        assert!(t.update(&UpdateParams::default()));
        assert!(!t.mesh().is_empty());
        assert_eq!(t.stats().stems, 1);
    }

    #[test]
    fn test_rebuild_gated_by_epsilon() {
        let mut t = tree();
        run(&mut t, 200);
        // Fully settled: nothing moves, nothing rebuilds
        assert!(!t.update(&UpdateParams::default()));

        t.water(1.0, 0, 15.0);
        // First tick moves length by 1.5 (> 0.5)
        assert!(t.update(&UpdateParams::default()));
    }

    #[test]
    fn test_small_change_does_not_rebuild() {
        let mut t = tree();
        run(&mut t, 300);
        t.rebuild(&UpdateParams::default());
        t.water(1.0, 0, 2.0);
        // 0.2 per tick at first; first tick below the length epsilon
        assert!(!t.update(&UpdateParams::default()));
    }

    #[test]
    fn test_level_up_rebuilds_and_adds_branches() {
        let mut t = tree();
        run(&mut t, 100);
        let before = t.mesh().vertex_count();
        for _ in 0..6 {
            t.water(1.0, 6, 0.0);
        }
        // 30 exp reaches level 1 on the next tick
        assert!(t.update(&UpdateParams::default()));
        assert_eq!(t.depth_level(), 1);
        assert!(t.mesh().vertex_count() > before);
    }

    #[test]
    fn test_water_scenario_through_tree() {
        let mut t = tree();
        t.water(1.0, 0, 15.0);
        assert!((t.growth().target_length() - 25.0).abs() < 1e-4);
        assert!((t.experience() - 5.0).abs() < 1e-4);
        assert_eq!(t.max_mutation(), 0.0);
        assert!((t.growth().target_thickness() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_identical_inputs_identical_mesh() {
        let mut a = tree();
        let mut b = tree();
        for t in [&mut a, &mut b] {
            t.water(1.0, 0, 40.0);
            t.kotodama(3.0);
            for _ in 0..60 {
                t.water(0.5, 0, 1.0);
                let params = UpdateParams { elapsed: 1.0, ..Default::default() };
                t.update(&params);
            }
        }
        assert_eq!(a.mesh(), b.mesh());

        // Rebuilding again without ticking reproduces the same mesh
        let params = UpdateParams { elapsed: 1.0, ..Default::default() };
        let before = a.mesh().clone();
        a.rebuild(&params);
        assert_eq!(a.mesh(), &before);
    }

    #[test]
    fn test_bloom_shows_flowers_and_persists() {
        let mut t = tree();
        for _ in 0..200 {
            t.water(1.0, 6, 0.0);
        }
        run(&mut t, 20);
        assert!(t.depth_level() >= 2);
        assert_eq!(t.stats().flowers, 0);

        t.kotodama(1.0);
        t.kotodama(1.0);
        t.kotodama(1.0);
        run(&mut t, 100);
        assert!(t.is_bloomed());
        assert!(t.stats().flowers > 0);

        // Calm back down: mutation drops, flowers stay
        for _ in 0..10 {
            t.water(1.0, 6, 0.0);
        }
        run(&mut t, 200);
        assert!(t.mutation() < 0.05);
        assert!(t.is_bloomed());
        assert!(t.stats().flowers > 0);
    }

    #[test]
    fn test_catalyst_lowers_bloom_threshold() {
        let mut t = tree();
        t.kotodama(1.0); // 0.2 target, below 0.4
        for _ in 0..200 {
            t.update(&UpdateParams::default());
        }
        assert!(!t.is_bloomed());

        let params = UpdateParams { bloom_level: 5, ..Default::default() };
        t.update(&params);
        assert!(t.is_bloomed());
    }

    #[test]
    fn test_flower_override_without_bloom() {
        let mut t = tree();
        for _ in 0..10 {
            t.water(1.0, 6, 0.0);
        }
        run(&mut t, 50);
        assert!(!t.is_bloomed());
        let params = UpdateParams { flower_type: FlowerType::Petal, ..Default::default() };
        assert!(t.update(&params));
        assert!(t.stats().flowers > 0);
    }

    #[test]
    fn test_collapse_rebuilds_every_tick() {
        let mut t = tree();
        for _ in 0..5 {
            t.kotodama(1.0);
        }
        run(&mut t, 400);
        assert!(t.max_mutation() > 0.9);

        let params = UpdateParams { elapsed: 5.0, ..Default::default() };
        assert!(t.update(&params));
        assert!(t.update(&params));

        // Enough resistance pushes the threshold to 1.0: back to gating
        let resisted = UpdateParams { elapsed: 5.0, chaos_resist_level: 5, ..Default::default() };
        t.update(&resisted);
        assert!(!t.update(&resisted));
    }

    #[test]
    fn test_melt_displaces_geometry() {
        let mut calm = tree();
        let mut wild = tree();
        for t in [&mut calm, &mut wild] {
            for _ in 0..5 {
                t.kotodama(1.0);
            }
            run(t, 400);
        }
        let params = UpdateParams { elapsed: 2.0, ..Default::default() };
        let resisted = UpdateParams { chaos_resist_level: 5, ..params };
        calm.rebuild(&resisted);
        wild.rebuild(&params);
        assert_ne!(calm.mesh(), wild.mesh());
        assert_eq!(calm.mesh().vertex_count(), wild.mesh().vertex_count());
    }

    #[test]
    fn test_evolution_at_milestone_changes_settings() {
        let mut t = tree();
        for _ in 0..5 {
            t.kotodama(1.0);
        }
        let mut events = Vec::new();
        while t.day_count() < EVOLUTION_DAY {
            events.extend(t.increment_day());
        }
        assert_eq!(events, vec![EvolutionEvent::Growth(GrowthType::Eldritch)]);
        assert!((t.settings().twist_factor - 150.0).abs() < 1e-6);

        // One-way: an explicit request afterwards is refused
        assert!(!t.apply_evolution(GrowthType::Sturdy));
        assert_eq!(t.growth_type(), GrowthType::Eldritch);

        while t.day_count() < BLOOM_DAY {
            t.increment_day();
        }
        assert_eq!(t.flower_type(), FlowerType::Spirit);
    }

    #[test]
    fn test_evolved_flower_type_rendered() {
        let mut t = tree();
        for _ in 0..10 {
            t.water(1.0, 6, 0.0);
        }
        for _ in 0..3 {
            t.kotodama(1.0);
        }
        while t.day_count() < BLOOM_DAY {
            t.increment_day();
        }
        assert_eq!(t.flower_type(), FlowerType::Spirit);

        run(&mut t, 150);
        assert!(t.is_bloomed());
        assert!(t.stats().flowers > 0);
        assert!(t.mesh().vertices().iter().any(|v| v.color == SPIRIT_COLOR));

        // An explicit flower type still wins over the evolved one
        t.rebuild(&UpdateParams { flower_type: FlowerType::Crystal, ..Default::default() });
        assert!(t.stats().flowers > 0);
        assert!(!t.mesh().vertices().iter().any(|v| v.color == SPIRIT_COLOR));
    }

    #[test]
    fn test_eldritch_bark_drifts_faster() {
        let mut calm = tree();
        let mut wild = tree();
        assert!(wild.apply_evolution(GrowthType::Eldritch));
        run(&mut calm, 100);
        run(&mut wild, 100);

        let params = UpdateParams { elapsed: 2.0, ..Default::default() };
        calm.rebuild(&params);
        wild.rebuild(&params);

        let trunk_color = |t: &Tree, speed: f32| {
            let s = t.settings();
            let hue = bark_hue(s.trunk_hue_start, s.trunk_hue_end, 0.0, 0, 2.0, speed);
            bark_color(hue, 0.0, 0, s.max_depth)
        };
        let base = TreeSettings::default().hue_speed;
        assert_eq!(calm.mesh().vertices()[0].color, trunk_color(&calm, base));
        assert_eq!(
            wild.mesh().vertices()[0].color,
            trunk_color(&wild, base * CHAOTIC_HUE_SPEED_MULT)
        );
        assert_ne!(calm.mesh().vertices()[0].color, wild.mesh().vertices()[0].color);
    }

    #[test]
    fn test_apply_evolution_then_milestone() {
        let mut t = tree();
        assert!(t.apply_evolution(GrowthType::Elegant));
        assert!((t.settings().branch_len_ratio - 0.82).abs() < 1e-6);
        t.fertilize(1.0, 0, 100.0);
        while t.day_count() < EVOLUTION_DAY {
            assert!(t.increment_day().is_empty());
        }
        assert_eq!(t.growth_type(), GrowthType::Elegant);
    }

    #[test]
    fn test_game_over_on_final_day() {
        let mut t = tree();
        for _ in 0..MAX_DAYS + 5 {
            t.increment_day();
        }
        assert_eq!(t.day_count(), MAX_DAYS);
        assert!(t.is_game_over());
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut t = tree();
        t.apply_evolution(GrowthType::Sturdy);
        for _ in 0..8 {
            t.kotodama(1.0);
        }
        for _ in 0..3 {
            t.increment_day();
        }
        run(&mut t, 100);
        assert!(t.max_mutation() > 0.0);

        t.reset_with_seed(99);
        assert_eq!(t.seed(), 99);
        assert_eq!(t.max_mutation(), 0.0);
        assert_eq!(t.experience(), 0.0);
        assert_eq!(t.depth_level(), 0);
        assert_eq!(t.length(), 0.0);
        assert_eq!(t.day_count(), 1);
        assert_eq!(t.growth_type(), GrowthType::Default);
        assert_eq!(t.flower_type(), FlowerType::None);
        assert_eq!(t.settings(), &TreeSettings::default());
        assert!(t.mesh().is_empty());
        assert!(!t.is_bloomed());

        // And the tree can be grown again
        assert!(t.update(&UpdateParams::default()));
    }

    #[test]
    fn test_reset_draws_new_seed() {
        let mut t = tree();
        let seeds: Vec<u64> = (0..4)
            .map(|_| {
                t.reset();
                t.seed()
            })
            .collect();
        assert!(seeds.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_depth_level_bounded_and_single_steps() {
        let mut t = tree();
        for _ in 0..500 {
            t.water(1.0, 6, 0.0);
        }
        let mut prev = t.depth_level();
        for _ in 0..50 {
            t.update(&UpdateParams::default());
            let level = t.depth_level();
            assert!(level <= prev + 1);
            assert!(level <= t.settings().max_depth);
            assert!((0.0..=1.0).contains(&t.depth_progress()));
            prev = level;
        }
        assert_eq!(t.depth_level(), t.settings().max_depth);
        assert_eq!(t.depth_progress(), 1.0);
    }

    #[test]
    fn test_growth_level_lengthens_tree() {
        let mut a = tree();
        let mut b = tree();
        run(&mut a, 100);
        run(&mut b, 100);
        a.rebuild(&UpdateParams::default());
        b.rebuild(&UpdateParams { growth_level: 5, ..Default::default() });
        let height = |t: &Tree| t.mesh().bounds().map(|(_, max)| max.y).unwrap_or(0.0);
        assert!(height(&b) > height(&a));
    }

    #[test]
    fn test_stats_serialize() {
        let mut t = tree();
        run(&mut t, 10);
        let json = serde_json::to_string(&t.stats()).unwrap();
        assert!(json.contains("\"depth_level\":0"));
        assert!(json.contains("\"growth_type\":\"Default\""));
    }
}
