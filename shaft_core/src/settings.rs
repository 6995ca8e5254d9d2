//! # Engine Configuration
//!
//! Tunable constants for the capacity models, friction resolution and the
//! preference scorer. Every section carries `#[serde(default)]`, so a JSON
//! file only needs the values it changes:
//!
//! ```json
//! {
//!   "spline": { "extrapolation": "clamp" },
//!   "friction": { "policy": "sampled" },
//!   "scoring": { "w_prefs": 0.6 }
//! }
//! ```
//!
//! Scoring weights and profiles are ranking heuristics, not physics. They are
//! validated with the rest of the configuration before an engine accepts them.
//!
//! ## Example
//!
//! ```rust
//! use shaft_core::settings::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "press_fit": { "slip_safety": 1.2 } }"#).unwrap();
//! assert_eq!(config.press_fit.slip_safety, 1.2);
//! assert_eq!(config.spline.load_share, 0.75);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::calculations::ConnectionType;
use crate::errors::{CalcError, CalcResult};
use crate::file_io;
use crate::friction::{FrictionPolicy, OverrideBand};
use crate::geometry::{SplineExtrapolation, STANDARD_KEY_LENGTHS_MM, STANDARD_MODULES_MM};
use crate::selection::Preferences;

const TABLE: &str = "config";

// ============================================================================
// Press Fit
// ============================================================================

/// Upper diameter bound of a relative-interference band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterferenceBand {
    /// Band applies for d ≤ this value (mm)
    pub up_to_mm: f64,
    /// Maximum relative interference ξ = U / d
    pub ratio: f64,
}

/// Press-fit (DIN 7190) model constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressFitConfig {
    /// Slip safety S_R applied on top of the design torque
    pub slip_safety: f64,
    /// Fraction of the allowable stress usable as joint pressure
    pub pressure_utilization: f64,
    /// Smoothing loss factor on Rz (G = factor · (Rz_I + Rz_A))
    pub smoothing_factor: f64,
    /// Nominal interference placement λ between U_req and U_max
    pub nominal_placement: f64,
    /// Share of the interference tolerance assigned to the shaft
    pub shaft_tolerance_share: f64,
    /// Ambient temperature (°C)
    pub room_temperature_c: f64,
    /// Joining clearance per mm of diameter (mm/mm)
    pub joining_clearance_ratio: f64,
    /// Relative interference limits, ascending by diameter
    pub interference_bands: Vec<InterferenceBand>,
    /// Relative interference limit beyond the last band
    pub interference_ratio_beyond: f64,
}

impl Default for PressFitConfig {
    fn default() -> Self {
        PressFitConfig {
            slip_safety: 1.0,
            pressure_utilization: 0.8,
            smoothing_factor: 0.4,
            nominal_placement: 0.6,
            shaft_tolerance_share: 0.6,
            room_temperature_c: 20.0,
            joining_clearance_ratio: 0.001,
            interference_bands: vec![
                InterferenceBand { up_to_mm: 18.0, ratio: 0.0010 },
                InterferenceBand { up_to_mm: 50.0, ratio: 0.0015 },
                InterferenceBand { up_to_mm: 120.0, ratio: 0.0020 },
            ],
            interference_ratio_beyond: 0.0025,
        }
    }
}

impl PressFitConfig {
    /// Maximum relative interference ξ_max for diameter `d_mm`.
    pub fn interference_ratio(&self, d_mm: f64) -> f64 {
        self.interference_bands
            .iter()
            .find(|band| d_mm <= band.up_to_mm)
            .map_or(self.interference_ratio_beyond, |band| band.ratio)
    }

    fn validate(&self) -> CalcResult<()> {
        positive("press_fit.slip_safety", self.slip_safety)?;
        unit_interval_open_low("press_fit.pressure_utilization", self.pressure_utilization)?;
        non_negative("press_fit.smoothing_factor", self.smoothing_factor)?;
        unit_interval("press_fit.nominal_placement", self.nominal_placement)?;
        unit_interval("press_fit.shaft_tolerance_share", self.shaft_tolerance_share)?;
        finite("press_fit.room_temperature_c", self.room_temperature_c)?;
        non_negative("press_fit.joining_clearance_ratio", self.joining_clearance_ratio)?;
        positive("press_fit.interference_ratio_beyond", self.interference_ratio_beyond)?;
        for band in &self.interference_bands {
            positive("press_fit.interference_bands.up_to_mm", band.up_to_mm)?;
            positive("press_fit.interference_bands.ratio", band.ratio)?;
        }
        if self
            .interference_bands
            .windows(2)
            .any(|w| w[1].up_to_mm <= w[0].up_to_mm)
        {
            return Err(CalcError::invalid_table(
                TABLE,
                "press_fit.interference_bands must be ordered by increasing diameter",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Key / Spline
// ============================================================================

/// Parallel key model constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Effective key length is capped at factor · d
    pub length_factor: f64,
    /// Standard key lengths (mm)
    pub standard_lengths_mm: Vec<f64>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            length_factor: 1.5,
            standard_lengths_mm: STANDARD_KEY_LENGTHS_MM.to_vec(),
        }
    }
}

impl KeyConfig {
    fn validate(&self) -> CalcResult<()> {
        positive("key.length_factor", self.length_factor)?;
        for &l in &self.standard_lengths_mm {
            positive("key.standard_lengths_mm", l)?;
        }
        Ok(())
    }
}

/// Spline model constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplineConfig {
    /// Load-share factor K (uneven flank contact)
    pub load_share: f64,
    /// Behavior beyond the spline table
    pub extrapolation: SplineExtrapolation,
    /// Synthesized module targets d / divisor
    pub module_divisor: f64,
    /// Standard module series (mm)
    pub standard_modules_mm: Vec<f64>,
}

impl Default for SplineConfig {
    fn default() -> Self {
        SplineConfig {
            load_share: 0.75,
            extrapolation: SplineExtrapolation::default(),
            module_divisor: 35.0,
            standard_modules_mm: STANDARD_MODULES_MM.to_vec(),
        }
    }
}

impl SplineConfig {
    fn validate(&self) -> CalcResult<()> {
        unit_interval_open_low("spline.load_share", self.load_share)?;
        positive("spline.module_divisor", self.module_divisor)?;
        if self.standard_modules_mm.is_empty() && self.extrapolation == SplineExtrapolation::Synthesize {
            return Err(CalcError::invalid_table(
                TABLE,
                "spline.standard_modules_mm must not be empty when synthesizing",
            ));
        }
        for &m in &self.standard_modules_mm {
            positive("spline.standard_modules_mm", m)?;
        }
        Ok(())
    }
}

// ============================================================================
// Friction
// ============================================================================

/// Friction resolution settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FrictionConfig {
    pub policy: FrictionPolicy,
    pub override_band: OverrideBand,
}

// ============================================================================
// Scoring
// ============================================================================

/// Preference profile of each connection type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceProfiles {
    pub press: Preferences,
    pub key: Preferences,
    pub spline: Preferences,
}

impl Default for PreferenceProfiles {
    fn default() -> Self {
        PreferenceProfiles {
            press: Preferences::from_array([0.15, 0.00, 0.80, 0.95, 0.90, 0.95, 0.70, 0.60]),
            key: Preferences::from_array([0.70, 0.30, 0.45, 0.35, 0.40, 0.55, 0.40, 0.35]),
            spline: Preferences::from_array([0.80, 0.90, 0.15, 0.85, 0.70, 0.85, 0.25, 0.85]),
        }
    }
}

impl PreferenceProfiles {
    /// Profile of one connection type
    pub fn for_type(&self, connection: ConnectionType) -> &Preferences {
        match connection {
            ConnectionType::Press => &self.press,
            ConnectionType::Key => &self.key,
            ConnectionType::Spline => &self.spline,
        }
    }
}

/// Preference scorer weights and caps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Weight of the capacity-margin term
    pub w_margin: f64,
    /// Relative margin treated as fully useful
    pub margin_cap: f64,
    /// Penalty per unit of margin above `margin_cap`
    pub w_overkill: f64,
    /// Maximum excess margin penalized
    pub overkill_cap: f64,
    /// Weight of the preference utility
    pub w_prefs: f64,
    /// Weight of the hub stiffness penalty (press fit only)
    pub w_hub: f64,
    /// Weight of the spline practicality penalty
    pub w_spline: f64,
    /// Mean spline-relevant preference below which splines are penalized
    pub spline_threshold: f64,
    /// Lower bound on a candidate's total score
    pub score_floor: f64,
    pub profiles: PreferenceProfiles,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            w_margin: 0.20,
            margin_cap: 0.35,
            w_overkill: 0.06,
            overkill_cap: 2.0,
            w_prefs: 0.70,
            w_hub: 0.10,
            w_spline: 0.05,
            spline_threshold: 0.4,
            score_floor: -0.25,
            profiles: PreferenceProfiles::default(),
        }
    }
}

impl ScoringConfig {
    fn validate(&self) -> CalcResult<()> {
        non_negative("scoring.w_margin", self.w_margin)?;
        positive("scoring.margin_cap", self.margin_cap)?;
        non_negative("scoring.w_overkill", self.w_overkill)?;
        positive("scoring.overkill_cap", self.overkill_cap)?;
        non_negative("scoring.w_prefs", self.w_prefs)?;
        non_negative("scoring.w_hub", self.w_hub)?;
        non_negative("scoring.w_spline", self.w_spline)?;
        unit_interval_open_low("scoring.spline_threshold", self.spline_threshold)?;
        if !self.score_floor.is_finite() || self.score_floor > 0.0 {
            return Err(CalcError::invalid_table(
                TABLE,
                format!("scoring.score_floor must be finite and ≤ 0, got {}", self.score_floor),
            ));
        }
        for connection in ConnectionType::ALL {
            let profile = self.profiles.for_type(connection);
            if profile.as_array().iter().any(|v| !(0.0..=1.0).contains(v)) {
                return Err(CalcError::invalid_table(
                    TABLE,
                    format!("scoring.profiles.{}: entries must lie in [0, 1]", connection.code()),
                ));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub press_fit: PressFitConfig,
    pub key: KeyConfig,
    pub spline: SplineConfig,
    pub friction: FrictionConfig,
    pub scoring: ScoringConfig,
}

impl EngineConfig {
    /// Validate every section.
    pub fn validate(&self) -> CalcResult<()> {
        self.press_fit.validate()?;
        self.key.validate()?;
        self.spline.validate()?;
        self.scoring.validate()
    }

    /// Parse and validate a (possibly partial) JSON configuration.
    pub fn from_json_str(json: &str) -> CalcResult<EngineConfig> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    pub fn from_file(path: &Path) -> CalcResult<EngineConfig> {
        let config: EngineConfig = file_io::load_json(path)?;
        config.validate()?;
        Ok(config)
    }
}

fn finite(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() {
        return Err(CalcError::invalid_table(TABLE, format!("{} must be finite, got {}", field, value)));
    }
    Ok(())
}

fn positive(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CalcError::invalid_table(TABLE, format!("{} must be positive, got {}", field, value)));
    }
    Ok(())
}

fn non_negative(field: &str, value: f64) -> CalcResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(CalcError::invalid_table(TABLE, format!("{} must be ≥ 0, got {}", field, value)));
    }
    Ok(())
}

fn unit_interval(field: &str, value: f64) -> CalcResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CalcError::invalid_table(TABLE, format!("{} must lie in [0, 1], got {}", field, value)));
    }
    Ok(())
}

fn unit_interval_open_low(field: &str, value: f64) -> CalcResult<()> {
    if !(value > 0.0 && value <= 1.0) {
        return Err(CalcError::invalid_table(TABLE, format!("{} must lie in (0, 1], got {}", field, value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        EngineConfig::default().validate().unwrap();
    }

    #[test]
    fn test_interference_ratio_bands() {
        let config = PressFitConfig::default();
        assert_eq!(config.interference_ratio(10.0), 0.0010);
        assert_eq!(config.interference_ratio(18.0), 0.0010);
        assert_eq!(config.interference_ratio(45.0), 0.0015);
        assert_eq!(config.interference_ratio(120.0), 0.0020);
        assert_eq!(config.interference_ratio(300.0), 0.0025);
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json_str(
            r#"{ "spline": { "extrapolation": "clamp" }, "friction": { "policy": "sampled" } }"#,
        )
        .unwrap();
        assert_eq!(config.spline.extrapolation, SplineExtrapolation::Clamp);
        assert_eq!(config.spline.module_divisor, 35.0);
        assert_eq!(config.friction.policy, FrictionPolicy::Sampled);
        assert_eq!(config.friction.override_band, OverrideBand::Design);
        assert_eq!(config.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(EngineConfig::from_json_str("{}").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = EngineConfig::from_json_str(r#"{ "scoring": { "w_margin": -1.0 } }"#).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TABLE");

        assert!(EngineConfig::from_json_str(r#"{ "spline": { "load_share": 1.5 } }"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{ "scoring": { "score_floor": 0.5 } }"#).is_err());
        assert!(EngineConfig::from_json_str(r#"{ "press_fit": { "interference_bands": [
            { "up_to_mm": 50.0, "ratio": 0.001 }, { "up_to_mm": 18.0, "ratio": 0.001 } ] } }"#)
        .is_err());
    }

    #[test]
    fn test_profile_entries_bounded() {
        let mut config = EngineConfig::default();
        config.scoring.profiles.key.cost = 1.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json_str("{ not json").unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file(Path::new("/nonexistent/shaft_config.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
