//! Straight-sided spline dimensions (ISO 14 medium series) and the
//! module-based synthesis used beyond the table.

use serde::{Deserialize, Serialize};

/// One ISO 14 medium-series row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineRow {
    /// Nominal inner (minor) diameter d (mm)
    pub inner_mm: f64,
    /// Major diameter D (mm)
    pub major_mm: f64,
    /// Number of teeth z
    pub teeth: u32,
}

impl SplineRow {
    /// Nominal flank height (D − d) / 2 (mm)
    pub fn flank_height_mm(&self) -> f64 {
        (self.major_mm - self.inner_mm) / 2.0
    }
}

/// Standard module series (mm) used for synthesis
pub const STANDARD_MODULES_MM: [f64; 14] = [1.0, 1.25, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 12.0, 16.0, 20.0];

/// ISO 14 medium series, d = 11 … 112 mm.
pub fn iso_14_medium_rows() -> Vec<SplineRow> {
    [
        (11.0, 14.0, 6),
        (13.0, 16.0, 6),
        (16.0, 20.0, 6),
        (18.0, 22.0, 6),
        (21.0, 25.0, 6),
        (23.0, 28.0, 6),
        (26.0, 32.0, 6),
        (28.0, 34.0, 6),
        (32.0, 38.0, 8),
        (36.0, 42.0, 8),
        (42.0, 48.0, 8),
        (46.0, 54.0, 8),
        (52.0, 60.0, 8),
        (56.0, 65.0, 8),
        (62.0, 72.0, 8),
        (72.0, 82.0, 10),
        (82.0, 92.0, 10),
        (92.0, 102.0, 10),
        (102.0, 112.0, 10),
        (112.0, 125.0, 10),
    ]
    .into_iter()
    .map(|(inner_mm, major_mm, teeth)| SplineRow {
        inner_mm,
        major_mm,
        teeth,
    })
    .collect()
}

/// Where a spline geometry came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplineSource {
    Table,
    Clamped,
    Synthesized,
    Override,
}

/// Behavior beyond the largest tabulated diameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplineExtrapolation {
    /// Build a module-based profile from the shaft diameter
    #[default]
    Synthesize,
    /// Reuse the last table row
    Clamp,
}

/// Resolved spline profile used by the capacity model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineGeometry {
    /// Root (minor) diameter (mm)
    pub root_mm: f64,
    /// Major diameter (mm)
    pub major_mm: f64,
    /// Number of teeth
    pub teeth: u32,
    /// Projected flank height h (mm)
    pub height_mm: f64,
    pub source: SplineSource,
}

impl SplineGeometry {
    /// A row's tooth profile cut on a shaft of diameter `d_mm`.
    ///
    /// The shaft is the root: `root = d`, `h = (D_row − d_row) / 2`,
    /// `major = d + 2h`.
    pub fn on_shaft(row: &SplineRow, d_mm: f64, source: SplineSource) -> Self {
        let height = row.flank_height_mm();
        SplineGeometry {
            root_mm: d_mm,
            major_mm: d_mm + 2.0 * height,
            teeth: row.teeth,
            height_mm: height,
            source,
        }
    }

    /// Mean flank radius r_m = (d + D) / 4 (mm)
    pub fn mean_radius_mm(&self) -> f64 {
        (self.root_mm + self.major_mm) / 4.0
    }
}

/// Standard module closest to `target`; ties go to the smaller module.
pub fn nearest_module(modules_mm: &[f64], target: f64) -> Option<f64> {
    modules_mm.iter().copied().fold(None, |best, m| match best {
        Some(b) if (m - target).abs() >= (b - target).abs() => Some(b),
        _ => Some(m),
    })
}

/// Module-based profile for a shaft of diameter `d_mm`.
///
/// ```text
/// m = nearest standard module to d / divisor
/// z = ⌈d / m⌉,  h = m,  D = d + 2m
/// ```
pub fn synthesize(d_mm: f64, modules_mm: &[f64], module_divisor: f64) -> Option<SplineGeometry> {
    let m = nearest_module(modules_mm, d_mm / module_divisor)?;
    let teeth = (d_mm / m).ceil().max(1.0) as u32;
    Some(SplineGeometry {
        root_mm: d_mm,
        major_mm: d_mm + 2.0 * m,
        teeth,
        height_mm: m,
        source: SplineSource::Synthesized,
    })
}
