//! # Friction Coefficients (DIN 7190-1)
//!
//! Resolves the static adhesion coefficient μ for a shaft/hub material pair
//! and surface condition, or applies a manual override.
//!
//! Resolution order:
//!
//! 1. A manual override is clamped into the configured band and returned.
//! 2. The pair (shaft category, hub category, condition) is looked up, then
//!    the swapped pair. Tabulated ranges resolve to their lower bound under
//!    [`FrictionPolicy::Conservative`] or to a uniform draw from the caller's
//!    RNG under [`FrictionPolicy::Sampled`].
//! 3. No entry for either ordering: steel/steel dry, μ = 0.12.
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use shaft_core::friction::{FrictionResolver, FrictionSource, SurfaceCondition};
//! use shaft_core::materials::MaterialCatalog;
//!
//! let catalog = MaterialCatalog::standard();
//! let resolver = FrictionResolver::default();
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//!
//! let mu = resolver
//!     .resolve(&catalog, "Steel C45", "Cast Iron GG25", SurfaceCondition::Dry, None, &mut rng)
//!     .unwrap();
//! assert_eq!(mu.source, FrictionSource::Table);
//! assert!((mu.mu - 0.10).abs() < 1e-12);
//! ```

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::{MaterialCatalog, MaterialCategory};

/// Conservative fallback coefficient (steel/steel, dry)
pub const FALLBACK_MU: f64 = 0.12;

/// Surface condition of the joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceCondition {
    #[default]
    Dry,
    Oiled,
    Greased,
}

impl SurfaceCondition {
    /// All conditions
    pub const ALL: [SurfaceCondition; 3] = [SurfaceCondition::Dry, SurfaceCondition::Oiled, SurfaceCondition::Greased];

    /// Lowercase code ("dry", "oiled", "greased")
    pub fn code(&self) -> &'static str {
        match self {
            SurfaceCondition::Dry => "dry",
            SurfaceCondition::Oiled => "oiled",
            SurfaceCondition::Greased => "greased",
        }
    }
}

impl std::str::FromStr for SurfaceCondition {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dry" => Ok(SurfaceCondition::Dry),
            "oiled" | "oil" => Ok(SurfaceCondition::Oiled),
            "greased" | "grease" => Ok(SurfaceCondition::Greased),
            _ => Err(CalcError::invalid_input(
                "surface_condition",
                s,
                "Expected 'dry', 'oiled' or 'greased'",
            )),
        }
    }
}

impl std::fmt::Display for SurfaceCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Tabulated coefficient: a single value or a DIN range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionValue {
    Fixed(f64),
    Range { low: f64, high: f64 },
}

impl FrictionValue {
    /// Lower (conservative) bound
    pub fn low(&self) -> f64 {
        match *self {
            FrictionValue::Fixed(mu) => mu,
            FrictionValue::Range { low, .. } => low,
        }
    }
}

/// One row of the friction table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionEntry {
    pub first: MaterialCategory,
    pub second: MaterialCategory,
    pub condition: SurfaceCondition,
    pub value: FrictionValue,
}

/// How tabulated ranges resolve to a single coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FrictionPolicy {
    /// Always the lower bound of the range
    #[default]
    Conservative,
    /// Uniform draw from [low, high] using the caller's RNG
    Sampled,
}

/// Clamp band for manual overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OverrideBand {
    /// [0.05, 0.25]: press-fit design
    #[default]
    Design,
    /// [0.05, 0.50]: ranking only
    Ranking,
}

impl OverrideBand {
    /// (min, max) of the band
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            OverrideBand::Design => (0.05, 0.25),
            OverrideBand::Ranking => (0.05, 0.50),
        }
    }

    /// Clamp a finite override into the band
    pub fn clamp(&self, mu: f64) -> f64 {
        let (lo, hi) = self.bounds();
        mu.clamp(lo, hi)
    }
}

/// Where the resolved coefficient came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionSource {
    Override,
    Table,
    Fallback,
}

/// Resolved coefficient with its provenance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrictionResolution {
    pub mu: f64,
    pub source: FrictionSource,
}

/// Friction table plus resolution policy.
#[derive(Debug, Clone, PartialEq)]
pub struct FrictionResolver {
    entries: Vec<FrictionEntry>,
    policy: FrictionPolicy,
    band: OverrideBand,
}

impl Default for FrictionResolver {
    fn default() -> Self {
        FrictionResolver {
            entries: din_7190_table(),
            policy: FrictionPolicy::default(),
            band: OverrideBand::default(),
        }
    }
}

impl FrictionResolver {
    /// Standard table with the given policy and override band.
    pub fn new(policy: FrictionPolicy, band: OverrideBand) -> Self {
        FrictionResolver {
            entries: din_7190_table(),
            policy,
            band,
        }
    }

    /// Custom table. Ranges must satisfy 0 < low ≤ high.
    pub fn with_entries(entries: Vec<FrictionEntry>, policy: FrictionPolicy, band: OverrideBand) -> CalcResult<Self> {
        for entry in &entries {
            let (low, high) = match entry.value {
                FrictionValue::Fixed(mu) => (mu, mu),
                FrictionValue::Range { low, high } => (low, high),
            };
            if !low.is_finite() || !high.is_finite() || low <= 0.0 || high < low {
                return Err(CalcError::invalid_table(
                    "friction",
                    format!(
                        "{}/{} {}: invalid coefficient {:?}",
                        entry.first, entry.second, entry.condition, entry.value
                    ),
                ));
            }
        }
        Ok(FrictionResolver { entries, policy, band })
    }

    /// Active policy
    pub fn policy(&self) -> FrictionPolicy {
        self.policy
    }

    /// Table entry for an ordered category pair, if any.
    fn entry(&self, first: MaterialCategory, second: MaterialCategory, condition: SurfaceCondition) -> Option<&FrictionEntry> {
        self.entries
            .iter()
            .find(|e| e.first == first && e.second == second && e.condition == condition)
    }

    /// Symmetric lookup: (a, b) first, then (b, a).
    pub fn lookup(&self, a: MaterialCategory, b: MaterialCategory, condition: SurfaceCondition) -> Option<FrictionValue> {
        self.entry(a, b, condition)
            .or_else(|| self.entry(b, a, condition))
            .map(|e| e.value)
    }

    /// Resolve μ for a shaft/hub pair.
    ///
    /// The RNG is only consulted for tabulated ranges under
    /// [`FrictionPolicy::Sampled`].
    pub fn resolve<R: Rng>(
        &self,
        catalog: &MaterialCatalog,
        shaft_material: &str,
        hub_material: &str,
        condition: SurfaceCondition,
        override_mu: Option<f64>,
        rng: &mut R,
    ) -> CalcResult<FrictionResolution> {
        if let Some(mu) = override_mu {
            if !mu.is_finite() {
                return Err(CalcError::invalid_input("mu_override", mu.to_string(), "Must be a finite number"));
            }
            let clamped = self.band.clamp(mu);
            debug!("friction override {} clamped to {}", mu, clamped);
            return Ok(FrictionResolution {
                mu: clamped,
                source: FrictionSource::Override,
            });
        }

        let cat_shaft = catalog.category(shaft_material)?;
        let cat_hub = catalog.category(hub_material)?;

        let resolution = match self.lookup(cat_shaft, cat_hub, condition) {
            Some(FrictionValue::Fixed(mu)) => FrictionResolution {
                mu,
                source: FrictionSource::Table,
            },
            Some(FrictionValue::Range { low, high }) => {
                let mu = match self.policy {
                    FrictionPolicy::Conservative => low,
                    FrictionPolicy::Sampled => rng.random_range(low..=high),
                };
                FrictionResolution {
                    mu,
                    source: FrictionSource::Table,
                }
            }
            None => {
                trace!("no friction entry for {}/{} {}", cat_shaft, cat_hub, condition);
                FrictionResolution {
                    mu: FALLBACK_MU,
                    source: FrictionSource::Fallback,
                }
            }
        };

        debug!(
            "friction {}/{} {} -> mu = {:.3} ({:?})",
            cat_shaft, cat_hub, condition, resolution.mu, resolution.source
        );
        Ok(resolution)
    }
}

/// DIN 7190-1 adhesion coefficients, lower bounds first.
pub fn din_7190_table() -> Vec<FrictionEntry> {
    use FrictionValue::{Fixed, Range};
    use MaterialCategory::*;
    use SurfaceCondition::*;

    let rows: [(MaterialCategory, MaterialCategory, SurfaceCondition, FrictionValue); 21] = [
        (Steel, Steel, Dry, Range { low: 0.12, high: 0.20 }),
        (Steel, Steel, Oiled, Range { low: 0.08, high: 0.12 }),
        (Steel, Steel, Greased, Fixed(0.06)),
        (Steel, CastIron, Dry, Range { low: 0.10, high: 0.16 }),
        (Steel, CastIron, Oiled, Range { low: 0.06, high: 0.10 }),
        (Steel, CastIron, Greased, Fixed(0.05)),
        (Steel, Bronze, Dry, Range { low: 0.08, high: 0.14 }),
        (Steel, Bronze, Oiled, Range { low: 0.05, high: 0.08 }),
        (Steel, Bronze, Greased, Fixed(0.04)),
        (Steel, Aluminum, Dry, Fixed(0.10)),
        (Steel, Aluminum, Oiled, Fixed(0.07)),
        (Steel, Aluminum, Greased, Fixed(0.05)),
        (CastIron, CastIron, Dry, Fixed(0.10)),
        (CastIron, CastIron, Oiled, Fixed(0.06)),
        (CastIron, CastIron, Greased, Fixed(0.04)),
        (Aluminum, Aluminum, Dry, Fixed(0.15)),
        (Aluminum, Aluminum, Oiled, Fixed(0.10)),
        (Aluminum, Aluminum, Greased, Fixed(0.08)),
        (Bronze, Bronze, Dry, Fixed(0.08)),
        (Bronze, Bronze, Oiled, Fixed(0.05)),
        (Bronze, Bronze, Greased, Fixed(0.04)),
    ];

    rows.into_iter()
        .map(|(first, second, condition, value)| FrictionEntry {
            first,
            second,
            condition,
            value,
        })
        .collect()
}
