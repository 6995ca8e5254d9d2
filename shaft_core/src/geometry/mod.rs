//! # Standard Geometry Tables
//!
//! Diameter-indexed lookups for parallel keys (DIN 6885-1) and straight-sided
//! splines (ISO 14 medium series). Tables are validated once at construction
//! and read-only afterwards.
//!
//! ## Lookup Rules
//!
//! | Table  | Match                       | Below first row | Beyond last row          |
//! |--------|-----------------------------|-----------------|--------------------------|
//! | key    | `d_min < d ≤ d_max`         | first row       | last row                 |
//! | spline | first row with `d ≤ d_row`  | first row       | synthesize or clamp      |
//!
//! A spline row supplies the tooth count and flank height; the shaft itself
//! is the root diameter, so `root = d` and `major = d + 2h` for every lookup.
//!
//! ## Example
//!
//! ```rust
//! use shaft_core::geometry::{GeometryTables, SplineExtrapolation};
//! use shaft_core::settings::SplineConfig;
//!
//! let tables = GeometryTables::standard();
//! let key = tables.key_for(45.0);
//! assert_eq!((key.width_mm, key.height_mm), (14.0, 9.0));
//!
//! let spline = tables.spline_for(45.0, &SplineConfig::default());
//! assert_eq!(spline.teeth, 8);
//! assert_eq!((spline.root_mm, spline.major_mm), (45.0, 53.0));
//! ```

pub mod keys;
pub mod splines;

use log::trace;
use once_cell::sync::Lazy;

use crate::errors::{CalcError, CalcResult};
use crate::settings::SplineConfig;

pub use keys::{din_6885_rows, standard_length_at_most, KeyRow, STANDARD_KEY_LENGTHS_MM};
pub use splines::{
    iso_14_medium_rows, nearest_module, synthesize, SplineExtrapolation, SplineGeometry, SplineRow, SplineSource,
    STANDARD_MODULES_MM,
};

static STANDARD_TABLES: Lazy<GeometryTables> = Lazy::new(|| GeometryTables {
    keys: din_6885_rows(),
    splines: iso_14_medium_rows(),
});

/// Validated key and spline tables.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryTables {
    keys: Vec<KeyRow>,
    splines: Vec<SplineRow>,
}

impl GeometryTables {
    /// Build tables from explicit rows.
    ///
    /// Rows must be non-empty, ordered by strictly increasing diameter and
    /// have positive dimensions.
    pub fn new(keys: Vec<KeyRow>, splines: Vec<SplineRow>) -> CalcResult<Self> {
        validate_keys(&keys)?;
        validate_splines(&splines)?;
        Ok(GeometryTables { keys, splines })
    }

    /// Built-in DIN 6885-1 / ISO 14 tables
    pub fn standard() -> Self {
        STANDARD_TABLES.clone()
    }

    /// Shared reference to the built-in tables
    pub fn standard_ref() -> &'static GeometryTables {
        &STANDARD_TABLES
    }

    pub fn key_rows(&self) -> &[KeyRow] {
        &self.keys
    }

    pub fn spline_rows(&self) -> &[SplineRow] {
        &self.splines
    }

    /// Key section for shaft diameter `d_mm`.
    pub fn key_for(&self, d_mm: f64) -> KeyRow {
        // Both tables are non-empty after validation
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if d_mm <= first.d_min_mm {
            return first;
        }
        self.keys.iter().copied().find(|row| row.contains(d_mm)).unwrap_or(last)
    }

    /// Spline profile for shaft diameter `d_mm` without overrides.
    pub fn spline_for(&self, d_mm: f64, config: &SplineConfig) -> SplineGeometry {
        if let Some(row) = self.splines.iter().find(|row| d_mm <= row.inner_mm) {
            return SplineGeometry::on_shaft(row, d_mm, SplineSource::Table);
        }

        let last = &self.splines[self.splines.len() - 1];
        match config.extrapolation {
            SplineExtrapolation::Clamp => SplineGeometry::on_shaft(last, d_mm, SplineSource::Clamped),
            SplineExtrapolation::Synthesize => {
                match synthesize(d_mm, &config.standard_modules_mm, config.module_divisor) {
                    Some(geometry) => {
                        trace!("spline for d = {} synthesized with m = {}", d_mm, geometry.height_mm);
                        geometry
                    }
                    None => SplineGeometry::on_shaft(last, d_mm, SplineSource::Clamped),
                }
            }
        }
    }

    /// Spline profile with optional caller overrides.
    ///
    /// A major-diameter override sets `h = (D − d) / 2` on the shaft root.
    /// A tooth-count override replaces `z` only.
    pub fn spline_with_overrides(
        &self,
        d_mm: f64,
        major_override_mm: Option<f64>,
        teeth_override: Option<u32>,
        config: &SplineConfig,
    ) -> CalcResult<SplineGeometry> {
        let mut geometry = self.spline_for(d_mm, config);

        if let Some(major) = major_override_mm {
            if !major.is_finite() || major <= d_mm {
                return Err(CalcError::invalid_input(
                    "spline_major_diameter_mm",
                    major.to_string(),
                    "Spline major diameter must be greater than the shaft diameter",
                ));
            }
            geometry.root_mm = d_mm;
            geometry.major_mm = major;
            geometry.height_mm = (major - d_mm) / 2.0;
            geometry.source = SplineSource::Override;
        }

        if let Some(teeth) = teeth_override {
            if teeth == 0 {
                return Err(CalcError::invalid_input(
                    "spline_tooth_count",
                    "0",
                    "Spline tooth count must be at least 1",
                ));
            }
            geometry.teeth = teeth;
            geometry.source = SplineSource::Override;
        }

        Ok(geometry)
    }
}

impl Default for GeometryTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn validate_keys(rows: &[KeyRow]) -> CalcResult<()> {
    if rows.is_empty() {
        return Err(CalcError::invalid_table("keys", "table must contain at least one row"));
    }
    for (i, row) in rows.iter().enumerate() {
        let dims = [row.d_min_mm, row.d_max_mm, row.width_mm, row.height_mm];
        if dims.iter().any(|v| !v.is_finite()) || row.d_min_mm < 0.0 || row.width_mm <= 0.0 || row.height_mm <= 0.0 {
            return Err(CalcError::invalid_table("keys", format!("row {}: dimensions must be positive", i)));
        }
        if row.d_max_mm <= row.d_min_mm {
            return Err(CalcError::invalid_table("keys", format!("row {}: d_max must exceed d_min", i)));
        }
    }
    if rows.windows(2).any(|w| w[1].d_max_mm <= w[0].d_max_mm) {
        return Err(CalcError::invalid_table("keys", "rows must be ordered by increasing diameter"));
    }
    Ok(())
}

fn validate_splines(rows: &[SplineRow]) -> CalcResult<()> {
    if rows.is_empty() {
        return Err(CalcError::invalid_table("splines", "table must contain at least one row"));
    }
    for (i, row) in rows.iter().enumerate() {
        if !row.inner_mm.is_finite() || row.inner_mm <= 0.0 {
            return Err(CalcError::invalid_table("splines", format!("row {}: dimensions must be positive", i)));
        }
        if !row.major_mm.is_finite() || row.major_mm <= row.inner_mm {
            return Err(CalcError::invalid_table("splines", format!("row {}: major diameter must exceed d", i)));
        }
        if row.teeth == 0 {
            return Err(CalcError::invalid_table("splines", format!("row {}: tooth count must be at least 1", i)));
        }
    }
    if rows.windows(2).any(|w| w[1].inner_mm <= w[0].inner_mm) {
        return Err(CalcError::invalid_table("splines", "rows must be ordered by increasing diameter"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_lookup() {
        let tables = GeometryTables::standard();
        let row = tables.key_for(45.0);
        assert_eq!((row.width_mm, row.height_mm), (14.0, 9.0));
        // Upper bound is inclusive
        assert_eq!(tables.key_for(44.0).width_mm, 12.0);
        assert_eq!(tables.key_for(44.01).width_mm, 14.0);
    }

    #[test]
    fn test_key_lookup_outside_table() {
        let tables = GeometryTables::standard();
        assert_eq!(tables.key_for(3.0).width_mm, 2.0);
        assert_eq!(tables.key_for(6.0).width_mm, 2.0);
        assert_eq!(tables.key_for(400.0).width_mm, 50.0);
    }

    #[test]
    fn test_spline_lookup() {
        let tables = GeometryTables::standard();
        let config = SplineConfig::default();
        let g = tables.spline_for(45.0, &config);
        assert_eq!(g.source, SplineSource::Table);
        assert_eq!((g.root_mm, g.major_mm, g.teeth), (45.0, 53.0, 8));
        assert_eq!(g.height_mm, 4.0);

        // Exact match and below the table
        assert_eq!(tables.spline_for(46.0, &config).major_mm, 54.0);
        let small = tables.spline_for(5.0, &config);
        assert_eq!((small.root_mm, small.height_mm, small.teeth), (5.0, 1.5, 6));
    }

    #[test]
    fn test_spline_root_is_the_shaft() {
        let tables = GeometryTables::standard();
        let config = SplineConfig::default();
        for d in [5.0, 11.0, 12.5, 45.0, 47.0, 60.0, 100.0, 112.0, 150.0, 400.0] {
            let g = tables.spline_for(d, &config);
            assert_eq!(g.root_mm, d);
            assert!(g.major_mm > d);
            assert!((g.height_mm - (g.major_mm - d) / 2.0).abs() < 1e-12);
        }
        // Between rows the next row's profile sits on the smaller shaft
        let g = tables.spline_for(47.0, &config);
        assert_eq!((g.root_mm, g.major_mm, g.teeth), (47.0, 55.0, 8));
    }

    #[test]
    fn test_spline_beyond_table() {
        let tables = GeometryTables::standard();
        let synth = tables.spline_for(150.0, &SplineConfig::default());
        assert_eq!(synth.source, SplineSource::Synthesized);
        assert_eq!(synth.root_mm, 150.0);

        let clamp_config = SplineConfig {
            extrapolation: SplineExtrapolation::Clamp,
            ..SplineConfig::default()
        };
        let clamped = tables.spline_for(150.0, &clamp_config);
        assert_eq!(clamped.source, SplineSource::Clamped);
        assert_eq!((clamped.root_mm, clamped.major_mm), (150.0, 163.0));
    }

    #[test]
    fn test_spline_overrides() {
        let tables = GeometryTables::standard();
        let config = SplineConfig::default();
        let g = tables.spline_with_overrides(45.0, Some(55.0), Some(10), &config).unwrap();
        assert_eq!(g.source, SplineSource::Override);
        assert_eq!((g.root_mm, g.major_mm, g.teeth), (45.0, 55.0, 10));
        assert_eq!(g.height_mm, 5.0);

        let teeth_only = tables.spline_with_overrides(45.0, None, Some(6), &config).unwrap();
        assert_eq!((teeth_only.root_mm, teeth_only.major_mm, teeth_only.teeth), (45.0, 53.0, 6));
    }

    #[test]
    fn test_invalid_spline_overrides() {
        let tables = GeometryTables::standard();
        let config = SplineConfig::default();
        let err = tables.spline_with_overrides(45.0, Some(45.0), None, &config).unwrap_err();
        assert!(err.is_input_error());
        assert!(tables.spline_with_overrides(45.0, None, Some(0), &config).is_err());
        assert!(tables.spline_with_overrides(45.0, Some(f64::NAN), None, &config).is_err());
    }

    #[test]
    fn test_table_validation() {
        assert!(GeometryTables::new(din_6885_rows(), iso_14_medium_rows()).is_ok());
        assert!(GeometryTables::new(Vec::new(), iso_14_medium_rows()).is_err());

        let mut keys = din_6885_rows();
        keys.swap(0, 1);
        assert_eq!(
            GeometryTables::new(keys, iso_14_medium_rows()).unwrap_err().error_code(),
            "INVALID_TABLE"
        );

        let mut splines = iso_14_medium_rows();
        splines[3].major_mm = splines[3].inner_mm;
        assert!(GeometryTables::new(din_6885_rows(), splines).is_err());
    }
}
