//! # Spline
//!
//! Static torque capacity of a straight-sided spline from flank bearing:
//!
//! ```text
//! M = K · L · z · h · r_m · p_zul
//! ```
//!
//! with K the load-share factor, h the projected flank height, r_m the mean
//! flank radius and p_zul the smaller spline allowable of shaft and hub.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::equations::spline_torque;
use crate::errors::{require_positive, CalcResult};
use crate::geometry::{GeometryTables, SplineGeometry};
use crate::materials::Material;
use crate::settings::SplineConfig;
use crate::units::{NewtonMeters, NewtonMillimeters};

/// Input parameters for a spline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineInput {
    /// Shaft diameter d (mm)
    pub shaft_diameter_mm: f64,
    /// Hub (engagement) length L (mm)
    pub hub_length_mm: f64,
    /// Major diameter override (mm)
    #[serde(default)]
    pub major_diameter_mm: Option<f64>,
    /// Tooth count override
    #[serde(default)]
    pub tooth_count: Option<u32>,
}

impl SplineInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("shaft_diameter_mm", self.shaft_diameter_mm)?;
        require_positive("hub_length_mm", self.hub_length_mm)
    }
}

/// Results from a spline calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplineResult {
    pub geometry: SplineGeometry,
    /// Mean flank radius r_m (mm)
    pub mean_radius_mm: f64,
    pub p_allow_mpa: f64,
    pub load_share: f64,
    /// Capacity (N·m)
    pub capacity_nm: f64,
}

/// Calculate spline capacity.
pub fn calculate(
    input: &SplineInput,
    shaft: &Material,
    hub: &Material,
    tables: &GeometryTables,
    config: &SplineConfig,
) -> CalcResult<SplineResult> {
    input.validate()?;

    let geometry = tables.spline_with_overrides(
        input.shaft_diameter_mm,
        input.major_diameter_mm,
        input.tooth_count,
        config,
    )?;
    let mean_radius = geometry.mean_radius_mm();
    let p_allow = shaft.p_allow_spline_mpa.min(hub.p_allow_spline_mpa);

    let capacity: NewtonMeters = NewtonMillimeters(spline_torque(
        config.load_share,
        input.hub_length_mm,
        geometry.teeth,
        geometry.height_mm,
        mean_radius,
        p_allow,
    ))
    .into();

    debug!(
        "spline {} x {} x {} ({:?}) on d = {} mm: {:.1} N·m",
        geometry.teeth,
        geometry.root_mm,
        geometry.major_mm,
        geometry.source,
        input.shaft_diameter_mm,
        capacity.value()
    );

    Ok(SplineResult {
        geometry,
        mean_radius_mm: mean_radius,
        p_allow_mpa: p_allow,
        load_share: config.load_share,
        capacity_nm: capacity.value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SplineSource;
    use crate::materials::MaterialCatalog;

    fn run(input: SplineInput, shaft: &str, hub: &str) -> CalcResult<SplineResult> {
        let catalog = MaterialCatalog::standard();
        calculate(
            &input,
            catalog.get(shaft).unwrap(),
            catalog.get(hub).unwrap(),
            &GeometryTables::standard(),
            &SplineConfig::default(),
        )
    }

    fn input(d: f64, l: f64) -> SplineInput {
        SplineInput {
            shaft_diameter_mm: d,
            hub_length_mm: l,
            major_diameter_mm: None,
            tooth_count: None,
        }
    }

    #[test]
    fn test_reference_spline() {
        let result = run(input(45.0, 90.0), "Steel 42CrMo4", "Steel 42CrMo4").unwrap();
        assert_eq!(result.geometry.source, SplineSource::Table);
        assert_eq!(result.geometry.root_mm, 45.0);
        assert_eq!(result.mean_radius_mm, 24.5);
        // 0.75 · 90 · 8 · 4 · 24.5 · 120
        assert!((result.capacity_nm - 6350.4).abs() < 1e-6);
    }

    #[test]
    fn test_capacity_grows_within_a_row() {
        // 42.5 and 46 share the 46 × 54 row profile
        let lower = run(input(42.5, 90.0), "Steel C45", "Steel C45").unwrap();
        let upper = run(input(46.0, 90.0), "Steel C45", "Steel C45").unwrap();
        assert_eq!(lower.geometry.teeth, upper.geometry.teeth);
        assert!(lower.capacity_nm < upper.capacity_nm);
    }

    #[test]
    fn test_weaker_material_governs() {
        let result = run(input(45.0, 90.0), "Steel 42CrMo4", "Cast Iron GG25").unwrap();
        assert_eq!(result.p_allow_mpa, 40.0);
    }

    #[test]
    fn test_override_geometry() {
        let mut with_override = input(45.0, 90.0);
        with_override.major_diameter_mm = Some(53.0);
        with_override.tooth_count = Some(10);
        let result = run(with_override, "Steel C45", "Steel C45").unwrap();
        assert_eq!(result.geometry.height_mm, 4.0);
        assert_eq!(result.mean_radius_mm, 24.5);
        // 0.75 · 90 · 10 · 4 · 24.5 · 70
        assert!((result.capacity_nm - 4630.5).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_override() {
        let mut bad = input(45.0, 90.0);
        bad.major_diameter_mm = Some(40.0);
        assert!(run(bad, "Steel C45", "Steel C45").unwrap_err().is_input_error());
    }

    #[test]
    fn test_synthesized_beyond_table() {
        let result = run(input(150.0, 120.0), "Steel C45", "Steel C45").unwrap();
        assert_eq!(result.geometry.source, SplineSource::Synthesized);
        assert!(result.capacity_nm > run(input(112.0, 120.0), "Steel C45", "Steel C45").unwrap().capacity_nm);
    }
}
