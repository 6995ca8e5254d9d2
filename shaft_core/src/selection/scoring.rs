//! # Preference Scoring
//!
//! Ranks feasible candidates. The score is a heuristic, not a safety
//! measure; the feasibility gate has already run.
//!
//! ```text
//! raw       = (capacity − M_design) / M_design
//! margin    =  w_margin  · min(raw, margin_cap) / margin_cap
//! overkill  = −w_overkill · min((raw − margin_cap)⁺, overkill_cap)
//! prefs     =  w_prefs   · Σ pᵢ·profileᵢ / Σ pᵢ        (0 when Σ pᵢ = 0)
//! hub       =  w_hub     · (stiffness − 1)             (press only)
//! spline    = −w_spline  · (t − intensity) / t         (spline only, intensity < t)
//! total     = max(sum, score_floor)
//! ```

use serde::{Deserialize, Serialize};

use crate::calculations::{CapacityResult, ConnectionType};
use crate::selection::Preferences;
use crate::settings::ScoringConfig;

/// Individual terms of a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Relative capacity margin over the design torque
    pub raw_margin: f64,
    pub margin: f64,
    pub overkill: f64,
    pub preference: f64,
    pub hub_stiffness: f64,
    pub spline_practicality: f64,
    pub total: f64,
}

/// Weighted match between user preferences and a profile, in [0, 1].
///
/// The user vector is normalized by its sum; an all-zero vector yields 0.
pub fn preference_utility(prefs: &Preferences, profile: &Preferences) -> f64 {
    let p = prefs.as_array();
    let q = profile.as_array();
    let sum: f64 = p.iter().sum();
    let normalizer = if sum > 0.0 { sum } else { 1.0 };
    p.iter().zip(q.iter()).map(|(a, b)| a * b).sum::<f64>() / normalizer
}

/// Mean of the preferences a spline actually serves well.
pub fn spline_intensity(prefs: &Preferences) -> f64 {
    (prefs.movement + prefs.bidirectional + prefs.durability) / 3.0
}

/// Score one feasible candidate.
pub fn score(
    candidate: &CapacityResult,
    design_torque_nm: f64,
    prefs: &Preferences,
    hub_stiffness_factor: f64,
    config: &ScoringConfig,
) -> ScoreBreakdown {
    let connection = candidate.connection_type();
    let raw = (candidate.capacity_nm() - design_torque_nm) / design_torque_nm;

    let margin = config.w_margin * raw.min(config.margin_cap) / config.margin_cap;
    let overkill = -config.w_overkill * (raw - config.margin_cap).max(0.0).min(config.overkill_cap);
    let preference = config.w_prefs * preference_utility(prefs, config.profiles.for_type(connection));

    let hub_stiffness = match connection {
        ConnectionType::Press => config.w_hub * (hub_stiffness_factor - 1.0),
        ConnectionType::Key | ConnectionType::Spline => 0.0,
    };

    let spline_practicality = match connection {
        ConnectionType::Spline => {
            let intensity = spline_intensity(prefs);
            if intensity < config.spline_threshold {
                -config.w_spline * (config.spline_threshold - intensity) / config.spline_threshold
            } else {
                0.0
            }
        }
        ConnectionType::Press | ConnectionType::Key => 0.0,
    };

    let total = (margin + overkill + preference + hub_stiffness + spline_practicality).max(config.score_floor);

    ScoreBreakdown {
        raw_margin: raw,
        margin,
        overkill,
        preference,
        hub_stiffness,
        spline_practicality,
        total,
    }
}

/// Highest-scoring type; ties go to the earlier type in
/// [`ConnectionType::ALL`] order.
pub fn pick_best<'a, I>(scores: I) -> Option<ConnectionType>
where
    I: IntoIterator<Item = (&'a ConnectionType, &'a f64)>,
{
    let mut ranked: Vec<(ConnectionType, f64)> = scores.into_iter().map(|(&t, &s)| (t, s)).collect();
    ranked.sort_by_key(|(t, _)| *t);
    ranked
        .into_iter()
        .fold(None, |best: Option<(ConnectionType, f64)>, (t, s)| match best {
            Some((_, best_score)) if s <= best_score => best,
            _ => Some((t, s)),
        })
        .map(|(t, _)| t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::spline::SplineResult;
    use crate::geometry::{SplineGeometry, SplineSource};
    use std::collections::BTreeMap;

    fn spline(capacity_nm: f64) -> CapacityResult {
        CapacityResult::Spline(SplineResult {
            geometry: SplineGeometry {
                root_mm: 45.0,
                major_mm: 53.0,
                teeth: 8,
                height_mm: 4.0,
                source: SplineSource::Table,
            },
            mean_radius_mm: 24.5,
            p_allow_mpa: 120.0,
            load_share: 0.75,
            capacity_nm,
        })
    }

    fn scenario_prefs() -> Preferences {
        Preferences::from_array([0.6, 1.0, 0.2, 0.8, 0.5, 0.5, 0.3, 0.9])
    }

    #[test]
    fn test_reference_spline_score() {
        let b = score(&spline(6350.4), 1740.0, &scenario_prefs(), 0.85, &ScoringConfig::default());
        assert!((b.margin - 0.2).abs() < 1e-12);
        assert!((b.overkill + 0.12).abs() < 1e-12);
        assert_eq!(b.hub_stiffness, 0.0);
        assert_eq!(b.spline_practicality, 0.0);
        assert!((b.total - 0.6203).abs() < 1e-4);
    }

    #[test]
    fn test_small_margin_is_proportional() {
        // raw = 0.175 → half the margin weight, no overkill
        let b = score(&spline(1175.0), 1000.0, &scenario_prefs(), 1.0, &ScoringConfig::default());
        assert!((b.margin - 0.1).abs() < 1e-12);
        assert_eq!(b.overkill, 0.0);
    }

    #[test]
    fn test_spline_penalty_for_low_intensity() {
        let prefs = Preferences::from_array([0.5, 0.0, 0.5, 0.0, 0.5, 0.5, 0.5, 0.3]);
        let b = score(&spline(2000.0), 1740.0, &prefs, 1.0, &ScoringConfig::default());
        // intensity 0.1 → −0.05 · 0.3 / 0.4
        assert!((b.spline_practicality + 0.0375).abs() < 1e-12);
    }

    #[test]
    fn test_zero_preferences_are_finite() {
        let zero = Preferences::from_array([0.0; 8]);
        assert_eq!(preference_utility(&zero, &ScoringConfig::default().profiles.press), 0.0);
        let b = score(&spline(6350.4), 1740.0, &zero, 1.0, &ScoringConfig::default());
        assert!(b.total.is_finite());
        assert!(b.total >= -0.25);
    }

    #[test]
    fn test_score_floor() {
        let config = ScoringConfig {
            w_overkill: 5.0,
            ..ScoringConfig::default()
        };
        let zero = Preferences::from_array([0.0; 8]);
        let b = score(&spline(100_000.0), 1000.0, &zero, 1.0, &config);
        assert_eq!(b.total, -0.25);
    }

    #[test]
    fn test_pick_best_and_ties() {
        let mut scores = BTreeMap::new();
        scores.insert(ConnectionType::Spline, 0.5);
        scores.insert(ConnectionType::Key, 0.5);
        assert_eq!(pick_best(&scores), Some(ConnectionType::Key));

        scores.insert(ConnectionType::Press, 0.49);
        assert_eq!(pick_best(&scores), Some(ConnectionType::Key));

        scores.insert(ConnectionType::Spline, 0.51);
        assert_eq!(pick_best(&scores), Some(ConnectionType::Spline));

        assert_eq!(pick_best(&BTreeMap::<ConnectionType, f64>::new()), None);
    }
}
