//! # Hub Stiffness
//!
//! Coarse rating of how stiff the hub is around an interference fit, from the
//! diameter ratio `Q_A = d / D_a`. Thin hubs (Q_A → 1) spread and lose
//! pressure; the factor only feeds the press-fit scoring penalty.
//!
//! | Q_A        | factor |
//! |------------|--------|
//! | < 0.5      | 1.00   |
//! | < 0.6      | 0.85   |
//! | < 0.7      | 0.60   |
//! | < 0.8      | 0.30   |
//! | otherwise  | 0.10   |

use serde::{Deserialize, Serialize};

/// Hub ratio and its stiffness factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HubStiffness {
    /// Q_A = d / D_a
    pub ratio: f64,
    /// Stiffness factor in (0, 1]
    pub factor: f64,
}

/// Rate the hub of a shaft `d_mm` with outer diameter `hub_outer_mm`.
pub fn evaluate(d_mm: f64, hub_outer_mm: f64) -> HubStiffness {
    let ratio = d_mm / hub_outer_mm;
    HubStiffness {
        ratio,
        factor: stiffness_factor(ratio),
    }
}

/// Stiffness factor for a given Q_A.
pub fn stiffness_factor(ratio: f64) -> f64 {
    if ratio < 0.5 {
        1.0
    } else if ratio < 0.6 {
        0.85
    } else if ratio < 0.7 {
        0.60
    } else if ratio < 0.8 {
        0.30
    } else {
        0.10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(stiffness_factor(0.3), 1.0);
        assert_eq!(stiffness_factor(0.5), 0.85);
        assert_eq!(stiffness_factor(0.65), 0.60);
        assert_eq!(stiffness_factor(0.75), 0.30);
        assert_eq!(stiffness_factor(0.8), 0.10);
    }

    #[test]
    fn test_default_hub_is_085() {
        // D_a = 2d → Q_A = 0.5
        let hub = evaluate(45.0, 90.0);
        assert_eq!(hub.ratio, 0.5);
        assert_eq!(hub.factor, 0.85);
    }
}
