//! Parallel key dimensions (DIN 6885-1) and standard key lengths.

use serde::{Deserialize, Serialize};

/// One DIN 6885-1 row: shaft diameter band `(d_min, d_max]` → key section b × h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyRow {
    /// Lower (exclusive) bound of the diameter band (mm)
    pub d_min_mm: f64,
    /// Upper (inclusive) bound of the diameter band (mm)
    pub d_max_mm: f64,
    /// Key width b (mm)
    pub width_mm: f64,
    /// Key height h (mm)
    pub height_mm: f64,
}

impl KeyRow {
    fn new(d_min_mm: f64, d_max_mm: f64, width_mm: f64, height_mm: f64) -> Self {
        KeyRow {
            d_min_mm,
            d_max_mm,
            width_mm,
            height_mm,
        }
    }

    /// True when `d` falls inside `(d_min, d_max]`
    pub fn contains(&self, d_mm: f64) -> bool {
        d_mm > self.d_min_mm && d_mm <= self.d_max_mm
    }
}

/// Standard DIN 6885 key lengths (mm)
pub const STANDARD_KEY_LENGTHS_MM: [f64; 34] = [
    6.0, 8.0, 10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 25.0, 28.0, 32.0, 36.0, 40.0, 45.0, 50.0, 56.0, 63.0, 70.0,
    80.0, 90.0, 100.0, 110.0, 125.0, 140.0, 160.0, 180.0, 200.0, 220.0, 250.0, 280.0, 320.0, 360.0, 400.0,
];

/// DIN 6885-1 rows for shafts from 6 mm to 230 mm.
pub fn din_6885_rows() -> Vec<KeyRow> {
    [
        (6.0, 8.0, 2.0, 2.0),
        (8.0, 10.0, 3.0, 3.0),
        (10.0, 12.0, 4.0, 4.0),
        (12.0, 17.0, 5.0, 5.0),
        (17.0, 22.0, 6.0, 6.0),
        (22.0, 30.0, 8.0, 7.0),
        (30.0, 38.0, 10.0, 8.0),
        (38.0, 44.0, 12.0, 8.0),
        (44.0, 50.0, 14.0, 9.0),
        (50.0, 58.0, 16.0, 10.0),
        (58.0, 65.0, 18.0, 11.0),
        (65.0, 75.0, 20.0, 12.0),
        (75.0, 85.0, 22.0, 14.0),
        (85.0, 95.0, 25.0, 14.0),
        (95.0, 110.0, 28.0, 16.0),
        (110.0, 130.0, 32.0, 18.0),
        (130.0, 150.0, 36.0, 20.0),
        (150.0, 170.0, 40.0, 22.0),
        (170.0, 200.0, 45.0, 25.0),
        (200.0, 230.0, 50.0, 28.0),
    ]
    .into_iter()
    .map(|(d_min, d_max, b, h)| KeyRow::new(d_min, d_max, b, h))
    .collect()
}

/// Largest standard length not exceeding `limit_mm`.
///
/// Falls back to `limit_mm` itself when it is shorter than every standard
/// length (or the list is empty).
pub fn standard_length_at_most(lengths_mm: &[f64], limit_mm: f64) -> f64 {
    lengths_mm
        .iter()
        .copied()
        .filter(|&l| l <= limit_mm)
        .fold(None, |best: Option<f64>, l| Some(best.map_or(l, |b| b.max(l))))
        .unwrap_or(limit_mm)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_are_contiguous() {
        let rows = din_6885_rows();
        assert_eq!(rows.len(), 20);
        for pair in rows.windows(2) {
            assert_eq!(pair[0].d_max_mm, pair[1].d_min_mm);
        }
    }

    #[test]
    fn test_band_is_half_open() {
        let row = KeyRow::new(44.0, 50.0, 14.0, 9.0);
        assert!(!row.contains(44.0));
        assert!(row.contains(45.0));
        assert!(row.contains(50.0));
    }

    #[test]
    fn test_standard_length_snapping() {
        assert_eq!(standard_length_at_most(&STANDARD_KEY_LENGTHS_MM, 67.5), 63.0);
        assert_eq!(standard_length_at_most(&STANDARD_KEY_LENGTHS_MM, 90.0), 90.0);
        assert_eq!(standard_length_at_most(&STANDARD_KEY_LENGTHS_MM, 1000.0), 400.0);
        // Shorter than every standard length
        assert_eq!(standard_length_at_most(&STANDARD_KEY_LENGTHS_MM, 4.5), 4.5);
        assert_eq!(standard_length_at_most(&[], 30.0), 30.0);
    }
}
