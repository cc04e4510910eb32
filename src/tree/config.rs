//! Tree shape configuration.
//!
//! Every field has a hard-coded default, so a JSON document only needs the
//! keys it wants to override. Out-of-range values are replaced with the
//! defaults by [`TreeSettings::sanitized`] rather than reported as errors.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::growth::{GrowthType, LevelingCurve};

/// Upper bound on recursion depth; rebuild cost is exponential in depth.
pub const MAX_SUPPORTED_DEPTH: u32 = 10;

/// Shape, leveling and palette parameters for one tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeSettings {
    /// Maximum depth level (number of branch generations above the trunk)
    pub max_depth: u32,
    /// Leveling curve base: `threshold(d) = exp_base * d^exp_power`
    pub exp_base: f32,
    /// Leveling curve exponent
    pub exp_power: f32,
    /// World units per unit of growth length
    pub len_scale: f32,
    /// World units per unit of growth thickness
    pub thick_scale: f32,
    /// Child length / parent length
    pub branch_len_ratio: f32,
    /// Child thickness / parent thickness (also the stem tip taper)
    pub branch_thick_ratio: f32,
    /// Spread angle of children at zero mutation (degrees)
    pub base_angle: f32,
    /// Extra spread at full mutation (degrees)
    pub mutation_angle_max: f32,
    /// Stem twist from base ring to tip ring (degrees)
    pub twist_factor: f32,
    /// Bark hue at zero mutation (0-255 hue wheel)
    pub trunk_hue_start: f32,
    /// Bark hue at full mutation (0-255 hue wheel, may exceed 255)
    pub trunk_hue_end: f32,
    /// Hue drift in hue units per second
    pub hue_speed: f32,
    /// Leaf RGBA
    pub leaf_color: [u8; 4],
    /// Flower RGBA for variants that use the configured color
    pub flower_color: [u8; 4],
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            max_depth: 6,
            exp_base: 30.0,
            exp_power: 1.6,
            len_scale: 2.0,
            thick_scale: 1.0,
            branch_len_ratio: 0.75,
            branch_thick_ratio: 0.7,
            base_angle: 25.0,
            mutation_angle_max: 45.0,
            twist_factor: 0.0,
            trunk_hue_start: 20.0,
            trunk_hue_end: 200.0,
            hue_speed: 4.0,
            leaf_color: [90, 200, 110, 230],
            flower_color: [255, 170, 210, 255],
        }
    }
}

impl TreeSettings {
    /// Parse settings from a JSON string. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded tree settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!(
                    "Failed to load tree settings from {}: {}; using defaults",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save settings as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Replace values that would break the recursion or the leveling curve
    /// with their defaults.
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();

        if self.max_depth > MAX_SUPPORTED_DEPTH {
            log::warn!("max_depth {} exceeds {}, clamping", self.max_depth, MAX_SUPPORTED_DEPTH);
            self.max_depth = MAX_SUPPORTED_DEPTH;
        }

        let ratio_ok = |v: f32| v.is_finite() && v > 0.0 && v <= 1.0;
        if !ratio_ok(self.branch_len_ratio) {
            log::warn!("Invalid branch_len_ratio {}, using default", self.branch_len_ratio);
            self.branch_len_ratio = d.branch_len_ratio;
        }
        if !ratio_ok(self.branch_thick_ratio) {
            log::warn!("Invalid branch_thick_ratio {}, using default", self.branch_thick_ratio);
            self.branch_thick_ratio = d.branch_thick_ratio;
        }

        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.exp_base) {
            self.exp_base = d.exp_base;
        }
        if !self.exp_power.is_finite() {
            self.exp_power = d.exp_power;
        }
        if !positive(self.len_scale) {
            self.len_scale = d.len_scale;
        }
        if !positive(self.thick_scale) {
            self.thick_scale = d.thick_scale;
        }

        for (value, fallback) in [
            (&mut self.base_angle, d.base_angle),
            (&mut self.mutation_angle_max, d.mutation_angle_max),
            (&mut self.twist_factor, d.twist_factor),
            (&mut self.trunk_hue_start, d.trunk_hue_start),
            (&mut self.trunk_hue_end, d.trunk_hue_end),
            (&mut self.hue_speed, d.hue_speed),
        ] {
            if !value.is_finite() {
                *value = fallback;
            }
        }

        self
    }

    /// Leveling curve described by these settings.
    pub fn leveling_curve(&self) -> LevelingCurve {
        LevelingCurve::new(self.exp_base, self.exp_power, self.max_depth)
    }

    /// Override the shape table for a growth type. `Default` leaves the
    /// settings untouched.
    pub fn apply_evolution(&mut self, growth_type: GrowthType) {
        match growth_type {
            GrowthType::Default => {}
            GrowthType::Elegant => {
                self.branch_len_ratio = 0.82;
                self.base_angle = 18.0;
                self.twist_factor = 15.0;
            }
            GrowthType::Sturdy => {
                self.branch_thick_ratio = 0.85;
                self.base_angle = 35.0;
                self.twist_factor = 40.0;
            }
            GrowthType::Eldritch => {
                self.twist_factor = 150.0;
                self.mutation_angle_max = 65.0;
                self.trunk_hue_end += 100.0;
            }
        }
    }

    /// Copy of these settings with the growth type's overrides applied.
    pub fn evolved(&self, growth_type: GrowthType) -> Self {
        let mut settings = self.clone();
        settings.apply_evolution(growth_type);
        settings
    }
}
