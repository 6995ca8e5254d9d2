//! # Parallel Key
//!
//! Static torque capacity of a DIN 6885-1 parallel key.
//!
//! ## Method
//!
//! - Key section b × h from the diameter table
//! - Effective length: largest standard key length ≤ min(L, 1.5·d)
//! - Shear of the key: `M = τ_zul · b · l · r`
//! - Flank bearing: `M = min(p_shaft, p_hub) · (h/2) · l · r`
//! - Capacity is the smaller; the governing mode is reported
//!
//! ## Example
//!
//! ```rust
//! use shaft_core::calculations::key::{calculate, KeyFailureMode, KeyInput};
//! use shaft_core::geometry::GeometryTables;
//! use shaft_core::materials::MaterialCatalog;
//! use shaft_core::settings::KeyConfig;
//!
//! let catalog = MaterialCatalog::standard();
//! let steel = catalog.get("Steel 42CrMo4").unwrap();
//! let input = KeyInput { shaft_diameter_mm: 45.0, hub_length_mm: 90.0 };
//!
//! let result = calculate(&input, steel, steel, &GeometryTables::standard(), &KeyConfig::default()).unwrap();
//! assert_eq!(result.effective_length_mm, 63.0);
//! assert_eq!(result.governing, KeyFailureMode::Bearing);
//! assert!((result.capacity_nm - 956.8).abs() < 0.1);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::equations::{key_bearing_torque, key_shear_torque};
use crate::errors::{require_positive, CalcResult};
use crate::geometry::{standard_length_at_most, GeometryTables};
use crate::materials::Material;
use crate::settings::KeyConfig;
use crate::units::{NewtonMeters, NewtonMillimeters};

/// Input parameters for a parallel key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyInput {
    /// Shaft diameter d (mm)
    pub shaft_diameter_mm: f64,
    /// Hub length L (mm)
    pub hub_length_mm: f64,
}

impl KeyInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("shaft_diameter_mm", self.shaft_diameter_mm)?;
        require_positive("hub_length_mm", self.hub_length_mm)
    }
}

/// Which check limits the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyFailureMode {
    Shear,
    Bearing,
}

/// Results from a parallel key calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyResult {
    /// Key width b (mm)
    pub width_mm: f64,
    /// Key height h (mm)
    pub height_mm: f64,
    /// Load-bearing key length l (mm)
    pub effective_length_mm: f64,
    pub tau_allow_mpa: f64,
    pub p_allow_mpa: f64,
    /// Capacity in shear (N·m)
    pub shear_capacity_nm: f64,
    /// Capacity in flank bearing (N·m)
    pub bearing_capacity_nm: f64,
    /// Governing capacity (N·m)
    pub capacity_nm: f64,
    pub governing: KeyFailureMode,
}

/// Calculate parallel key capacity.
pub fn calculate(
    input: &KeyInput,
    shaft: &Material,
    hub: &Material,
    tables: &GeometryTables,
    config: &KeyConfig,
) -> CalcResult<KeyResult> {
    input.validate()?;

    let d = input.shaft_diameter_mm;
    let row = tables.key_for(d);
    let length_limit = input.hub_length_mm.min(config.length_factor * d);
    let length = standard_length_at_most(&config.standard_lengths_mm, length_limit);

    let tau_allow = shaft.tau_allow_key_mpa;
    let p_allow = shaft.p_allow_key_mpa.min(hub.p_allow_key_mpa);

    let shear: NewtonMeters = NewtonMillimeters(key_shear_torque(tau_allow, row.width_mm, length, d)).into();
    let bearing: NewtonMeters = NewtonMillimeters(key_bearing_torque(p_allow, row.height_mm, length, d)).into();

    let (capacity, governing) = if shear.value() < bearing.value() {
        (shear.value(), KeyFailureMode::Shear)
    } else {
        (bearing.value(), KeyFailureMode::Bearing)
    };

    debug!(
        "key {}x{} l = {} mm on d = {} mm: shear {:.1} N·m, bearing {:.1} N·m",
        row.width_mm,
        row.height_mm,
        length,
        d,
        shear.value(),
        bearing.value()
    );

    Ok(KeyResult {
        width_mm: row.width_mm,
        height_mm: row.height_mm,
        effective_length_mm: length,
        tau_allow_mpa: tau_allow,
        p_allow_mpa: p_allow,
        shear_capacity_nm: shear.value(),
        bearing_capacity_nm: bearing.value(),
        capacity_nm: capacity,
        governing,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialCatalog;

    fn run(d: f64, l: f64, shaft: &str, hub: &str) -> KeyResult {
        let catalog = MaterialCatalog::standard();
        calculate(
            &KeyInput {
                shaft_diameter_mm: d,
                hub_length_mm: l,
            },
            catalog.get(shaft).unwrap(),
            catalog.get(hub).unwrap(),
            &GeometryTables::standard(),
            &KeyConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_reference_key() {
        let result = run(45.0, 90.0, "Steel 42CrMo4", "Steel 42CrMo4");
        assert_eq!((result.width_mm, result.height_mm), (14.0, 9.0));
        // min(90, 67.5) snapped down to 63
        assert_eq!(result.effective_length_mm, 63.0);
        assert!((result.shear_capacity_nm - 1984.5).abs() < 1e-9);
        assert!((result.bearing_capacity_nm - 956.8125).abs() < 1e-9);
        assert_eq!(result.governing, KeyFailureMode::Bearing);
    }

    #[test]
    fn test_short_hub_limits_length() {
        let result = run(45.0, 30.0, "Steel C45", "Steel C45");
        assert_eq!(result.effective_length_mm, 28.0);
    }

    #[test]
    fn test_weaker_hub_governs_bearing() {
        let result = run(45.0, 90.0, "Steel 42CrMo4", "Aluminum 6061");
        assert_eq!(result.p_allow_mpa, 40.0);
        assert_eq!(result.tau_allow_mpa, 100.0);
    }

    #[test]
    fn test_invalid_input() {
        let catalog = MaterialCatalog::standard();
        let steel = catalog.get("Steel C45").unwrap();
        let input = KeyInput {
            shaft_diameter_mm: -1.0,
            hub_length_mm: 50.0,
        };
        let err = calculate(&input, steel, steel, &GeometryTables::standard(), &KeyConfig::default()).unwrap_err();
        assert!(err.is_input_error());
    }
}
