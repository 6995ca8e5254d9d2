//! # Connection Selection
//!
//! Evaluates all three connection types for one request, gates them on the
//! design torque and practicality, scores the survivors against the user's
//! preferences and recommends the best one.
//!
//! ## Pipeline
//!
//! ```text
//! request ─► validate ─► μ ─► press / key / spline capacities
//!                              │
//!                              ▼
//!                   feasibility gate (M_design = M_req · SF)
//!                              │
//!                              ▼
//!                   preference scoring ─► highest score (ties: press, key, spline)
//! ```
//!
//! Nothing feasible is a normal outcome: `recommended` is `None` and
//! `reason` says why.
//!
//! ## Example
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//! use shaft_core::calculations::ConnectionType;
//! use shaft_core::selection::{select_connection, ConnectionRequest, Preferences};
//!
//! let mut request = ConnectionRequest::new(45.0, 90.0, "Steel 42CrMo4", "Steel 42CrMo4", 870.0);
//! request.safety_factor = 2.0;
//! request.preferences = Preferences::from_array([0.6, 1.0, 0.2, 0.8, 0.5, 0.5, 0.3, 0.9]);
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//! let result = select_connection(&request, &mut rng).unwrap();
//!
//! assert_eq!(result.recommended, Some(ConnectionType::Spline));
//! assert!(!result.feasible[&ConnectionType::Key]);
//! ```

pub mod feasibility;
pub mod scoring;

use std::collections::BTreeMap;

use log::debug;
use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::calculations::hub_stiffness::{self, HubStiffness};
use crate::calculations::key::{self, KeyInput};
use crate::calculations::press_fit::{self, AssemblyMethod, PressFitInput};
use crate::calculations::spline::{self, SplineInput};
use crate::calculations::{CapacityResult, ConnectionType};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::friction::{FrictionResolution, FrictionResolver, SurfaceCondition};
use crate::geometry::GeometryTables;
use crate::materials::MaterialCatalog;
use crate::settings::EngineConfig;

pub use feasibility::{GateOutcome, InfeasibilityReason};
pub use scoring::ScoreBreakdown;

/// Default user safety factor
pub const DEFAULT_SAFETY_FACTOR: f64 = 1.5;

/// Default surface roughness Rz (µm)
pub const DEFAULT_RZ_UM: f64 = 12.0;

static STANDARD_ENGINE: Lazy<SelectionEngine> = Lazy::new(SelectionEngine::standard);

// ============================================================================
// Request
// ============================================================================

/// Solid or hollow shaft.
///
/// Deserializes through [`FromStr`](std::str::FromStr), so JSON accepts the
/// same spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ShaftType {
    #[default]
    Solid,
    Hollow,
}

impl std::str::FromStr for ShaftType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solid" => Ok(ShaftType::Solid),
            "hollow" => Ok(ShaftType::Hollow),
            _ => Err(CalcError::invalid_input("shaft_type", s, "Expected 'solid' or 'hollow'")),
        }
    }
}

impl TryFrom<String> for ShaftType {
    type Error = CalcError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::fmt::Display for ShaftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaftType::Solid => write!(f, "solid"),
            ShaftType::Hollow => write!(f, "hollow"),
        }
    }
}

/// Qualitative user preferences, each in [0, 1].
///
/// The same shape describes each connection type's profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Ease of assembly and disassembly
    pub ease: f64,
    /// Axial movement of the hub on the shaft
    pub movement: f64,
    /// Low cost
    pub cost: f64,
    /// Reversing (bidirectional) torque
    pub bidirectional: f64,
    /// Vibration and shock resistance
    pub vibration: f64,
    /// High rotational speed
    pub speed: f64,
    /// Low maintenance
    pub maintenance: f64,
    /// Long service life
    pub durability: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences::from_array([0.5; 8])
    }
}

impl Preferences {
    /// Field names in vector order
    pub const NAMES: [&'static str; 8] = [
        "ease",
        "movement",
        "cost",
        "bidirectional",
        "vibration",
        "speed",
        "maintenance",
        "durability",
    ];

    /// Build from a vector in [`Preferences::NAMES`] order
    pub fn from_array(values: [f64; 8]) -> Self {
        let [ease, movement, cost, bidirectional, vibration, speed, maintenance, durability] = values;
        Preferences {
            ease,
            movement,
            cost,
            bidirectional,
            vibration,
            speed,
            maintenance,
            durability,
        }
    }

    /// Vector in [`Preferences::NAMES`] order
    pub fn as_array(&self) -> [f64; 8] {
        [
            self.ease,
            self.movement,
            self.cost,
            self.bidirectional,
            self.vibration,
            self.speed,
            self.maintenance,
            self.durability,
        ]
    }

    /// Every entry must lie in [0, 1].
    pub fn validate(&self) -> CalcResult<()> {
        for (name, value) in Self::NAMES.iter().zip(self.as_array()) {
            if !(0.0..=1.0).contains(&value) {
                return Err(CalcError::invalid_input(
                    format!("preferences.{}", name),
                    value.to_string(),
                    "Preference must lie in [0, 1]",
                ));
            }
        }
        Ok(())
    }
}

fn default_safety_factor() -> f64 {
    DEFAULT_SAFETY_FACTOR
}

fn default_rz() -> f64 {
    DEFAULT_RZ_UM
}

/// One selection request.
///
/// ## JSON Example
///
/// ```json
/// {
///   "shaft_diameter_mm": 45.0,
///   "hub_length_mm": 90.0,
///   "shaft_type": "solid",
///   "shaft_material": "Steel 42CrMo4",
///   "hub_material": "Steel 42CrMo4",
///   "required_torque_nm": 870.0,
///   "safety_factor": 2.0,
///   "surface_condition": "dry",
///   "preferences": { "movement": 1.0, "durability": 0.9 }
/// }
/// ```
///
/// Omitted optional fields take their defaults: safety factor 1.5, dry
/// surfaces, hub outer diameter 2·d, Rz 12 µm, hub heating, preferences 0.5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    /// Shaft diameter d (mm)
    pub shaft_diameter_mm: f64,
    /// Hub length L (mm)
    pub hub_length_mm: f64,
    #[serde(default)]
    pub shaft_type: ShaftType,
    /// Bore of a hollow shaft (mm); only valid when hollow
    #[serde(default)]
    pub shaft_inner_diameter_mm: Option<f64>,
    pub shaft_material: String,
    pub hub_material: String,
    /// Torque to transmit (N·m)
    #[serde(default)]
    pub required_torque_nm: Option<f64>,
    #[serde(default = "default_safety_factor")]
    pub safety_factor: f64,
    #[serde(default)]
    pub surface_condition: SurfaceCondition,
    /// Manual friction coefficient, clamped into the configured band
    #[serde(default)]
    pub mu_override: Option<f64>,
    /// Hub outer diameter D_a (mm); defaults to 2·d
    #[serde(default)]
    pub hub_outer_diameter_mm: Option<f64>,
    #[serde(default)]
    pub spline_major_diameter_mm: Option<f64>,
    #[serde(default)]
    pub spline_tooth_count: Option<u32>,
    /// Shaft roughness Rz (µm)
    #[serde(default = "default_rz")]
    pub rz_shaft_um: f64,
    /// Hub bore roughness Rz (µm)
    #[serde(default = "default_rz")]
    pub rz_hub_um: f64,
    #[serde(default)]
    pub assembly_method: AssemblyMethod,
    #[serde(default)]
    pub preferences: Preferences,
}

impl ConnectionRequest {
    /// Request for a solid shaft with every optional field at its default.
    pub fn new(
        shaft_diameter_mm: f64,
        hub_length_mm: f64,
        shaft_material: impl Into<String>,
        hub_material: impl Into<String>,
        required_torque_nm: f64,
    ) -> Self {
        ConnectionRequest {
            shaft_diameter_mm,
            hub_length_mm,
            shaft_type: ShaftType::Solid,
            shaft_inner_diameter_mm: None,
            shaft_material: shaft_material.into(),
            hub_material: hub_material.into(),
            required_torque_nm: Some(required_torque_nm),
            safety_factor: DEFAULT_SAFETY_FACTOR,
            surface_condition: SurfaceCondition::default(),
            mu_override: None,
            hub_outer_diameter_mm: None,
            spline_major_diameter_mm: None,
            spline_tooth_count: None,
            rz_shaft_um: DEFAULT_RZ_UM,
            rz_hub_um: DEFAULT_RZ_UM,
            assembly_method: AssemblyMethod::default(),
            preferences: Preferences::default(),
        }
    }

    /// Parse a request from JSON.
    ///
    /// A `shaft_type` that is not "solid" or "hollow" is an input error, not
    /// a serialization error.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(kind) = value.get("shaft_type") {
            match kind.as_str() {
                Some(name) => {
                    name.parse::<ShaftType>()?;
                }
                None => {
                    return Err(CalcError::invalid_input(
                        "shaft_type",
                        kind.to_string(),
                        "Expected 'solid' or 'hollow'",
                    ))
                }
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Validate the request against a material catalog.
    ///
    /// Returns the required torque (N·m) once it is known to be present.
    pub fn validate(&self, catalog: &MaterialCatalog) -> CalcResult<f64> {
        require_positive("shaft_diameter_mm", self.shaft_diameter_mm)?;
        require_positive("hub_length_mm", self.hub_length_mm)?;

        let required = self
            .required_torque_nm
            .ok_or_else(|| CalcError::missing_field("required_torque_nm"))?;
        require_positive("required_torque_nm", required)?;
        require_positive("safety_factor", self.safety_factor)?;

        match (self.shaft_type, self.shaft_inner_diameter_mm) {
            (ShaftType::Solid, Some(d_i)) => {
                return Err(CalcError::invalid_input(
                    "shaft_inner_diameter_mm",
                    d_i.to_string(),
                    "Inner diameter is only valid for a hollow shaft",
                ));
            }
            (ShaftType::Hollow, None) => return Err(CalcError::missing_field("shaft_inner_diameter_mm")),
            (ShaftType::Hollow, Some(d_i)) if !(d_i > 0.0 && d_i < self.shaft_diameter_mm) => {
                return Err(CalcError::invalid_input(
                    "shaft_inner_diameter_mm",
                    d_i.to_string(),
                    "Hollow shaft inner diameter must lie strictly between 0 and the shaft diameter",
                ));
            }
            _ => {}
        }

        if let Some(d_a) = self.hub_outer_diameter_mm {
            if !d_a.is_finite() || d_a <= self.shaft_diameter_mm {
                return Err(CalcError::invalid_input(
                    "hub_outer_diameter_mm",
                    d_a.to_string(),
                    "Hub outer diameter must be greater than the shaft diameter",
                ));
            }
        }

        self.preferences.validate()?;
        catalog.get(&self.shaft_material)?;
        catalog.get(&self.hub_material)?;

        Ok(required)
    }

    /// Hub outer diameter with the 2·d default applied
    pub fn hub_outer_mm(&self) -> f64 {
        self.hub_outer_diameter_mm.unwrap_or(2.0 * self.shaft_diameter_mm)
    }
}

// ============================================================================
// Result
// ============================================================================

/// Outcome of one selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Best feasible type; None when nothing is feasible
    pub recommended: Option<ConnectionType>,
    pub required_torque_nm: f64,
    pub safety_factor: f64,
    /// Required torque × safety factor (N·m)
    pub design_torque_nm: f64,
    pub capacities_nm: BTreeMap<ConnectionType, f64>,
    pub feasible: BTreeMap<ConnectionType, bool>,
    pub feasible_count: usize,
    /// Totals of feasible candidates only; None when nothing is feasible
    pub scores: Option<BTreeMap<ConnectionType, f64>>,
    pub score_breakdown: BTreeMap<ConnectionType, ScoreBreakdown>,
    pub reason: Option<InfeasibilityReason>,
    pub friction: FrictionResolution,
    pub surface_condition: SurfaceCondition,
    pub hub_stiffness: HubStiffness,
    pub details: BTreeMap<ConnectionType, CapacityResult>,
}

impl SelectionResult {
    /// Recommended type code, or "none"
    pub fn recommended_code(&self) -> &'static str {
        self.recommended.map_or("none", |t| t.code())
    }

    /// True when `connection` passed the gate
    pub fn is_feasible(&self, connection: ConnectionType) -> bool {
        self.feasible.get(&connection).copied().unwrap_or(false)
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Selection engine over a fixed catalog, table set and configuration.
///
/// The engine holds no per-request state; one instance can serve any number
/// of requests concurrently.
#[derive(Debug, Clone)]
pub struct SelectionEngine {
    catalog: MaterialCatalog,
    tables: GeometryTables,
    config: EngineConfig,
    friction: FrictionResolver,
}

impl SelectionEngine {
    /// Build an engine, validating the configuration.
    pub fn new(catalog: MaterialCatalog, tables: GeometryTables, config: EngineConfig) -> CalcResult<Self> {
        config.validate()?;
        let friction = FrictionResolver::new(config.friction.policy, config.friction.override_band);
        Ok(SelectionEngine {
            catalog,
            tables,
            config,
            friction,
        })
    }

    /// Built-in catalog, tables and default configuration
    pub fn standard() -> Self {
        let config = EngineConfig::default();
        SelectionEngine {
            catalog: MaterialCatalog::standard(),
            tables: GeometryTables::standard(),
            friction: FrictionResolver::new(config.friction.policy, config.friction.override_band),
            config,
        }
    }

    pub fn catalog(&self) -> &MaterialCatalog {
        &self.catalog
    }

    pub fn tables(&self) -> &GeometryTables {
        &self.tables
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate every connection type and recommend one.
    ///
    /// The RNG is only used when the friction policy samples from a range.
    pub fn select_connection<R: Rng>(&self, request: &ConnectionRequest, rng: &mut R) -> CalcResult<SelectionResult> {
        let required = request.validate(&self.catalog)?;
        let design = required * request.safety_factor;
        let shaft = self.catalog.get(&request.shaft_material)?;
        let hub = self.catalog.get(&request.hub_material)?;

        let friction = self.friction.resolve(
            &self.catalog,
            &request.shaft_material,
            &request.hub_material,
            request.surface_condition,
            request.mu_override,
            rng,
        )?;

        let press = press_fit::calculate(
            &PressFitInput {
                shaft_diameter_mm: request.shaft_diameter_mm,
                hub_length_mm: request.hub_length_mm,
                shaft_inner_diameter_mm: request.shaft_inner_diameter_mm,
                hub_outer_diameter_mm: request.hub_outer_diameter_mm,
                mu: friction.mu,
                design_torque_nm: design,
                rz_shaft_um: request.rz_shaft_um,
                rz_hub_um: request.rz_hub_um,
                assembly_method: request.assembly_method,
            },
            shaft,
            hub,
            &self.config.press_fit,
        )?;

        let key = key::calculate(
            &KeyInput {
                shaft_diameter_mm: request.shaft_diameter_mm,
                hub_length_mm: request.hub_length_mm,
            },
            shaft,
            hub,
            &self.tables,
            &self.config.key,
        )?;

        let spline = spline::calculate(
            &SplineInput {
                shaft_diameter_mm: request.shaft_diameter_mm,
                hub_length_mm: request.hub_length_mm,
                major_diameter_mm: request.spline_major_diameter_mm,
                tooth_count: request.spline_tooth_count,
            },
            shaft,
            hub,
            &self.tables,
            &self.config.spline,
        )?;

        let details: BTreeMap<ConnectionType, CapacityResult> = [
            CapacityResult::Press(press),
            CapacityResult::Key(key),
            CapacityResult::Spline(spline),
        ]
        .into_iter()
        .map(|candidate| (candidate.connection_type(), candidate))
        .collect();

        let hub_stiffness = hub_stiffness::evaluate(request.shaft_diameter_mm, request.hub_outer_mm());
        let gate = feasibility::evaluate(&details, design);

        let score_breakdown: BTreeMap<ConnectionType, ScoreBreakdown> = details
            .iter()
            .filter(|(connection, _)| gate.feasible.get(connection).copied().unwrap_or(false))
            .map(|(&connection, candidate)| {
                let breakdown = scoring::score(
                    candidate,
                    design,
                    &request.preferences,
                    hub_stiffness.factor,
                    &self.config.scoring,
                );
                (connection, breakdown)
            })
            .collect();

        let scores = (gate.feasible_count > 0).then(|| {
            score_breakdown
                .iter()
                .map(|(&connection, breakdown)| (connection, breakdown.total))
                .collect::<BTreeMap<_, _>>()
        });
        let recommended = scores.as_ref().and_then(scoring::pick_best);

        debug!(
            "selection d = {} mm, M_design = {:.1} N·m: scores {:?} -> {:?}",
            request.shaft_diameter_mm, design, scores, recommended
        );

        Ok(SelectionResult {
            recommended,
            required_torque_nm: required,
            safety_factor: request.safety_factor,
            design_torque_nm: design,
            capacities_nm: details.iter().map(|(&t, c)| (t, c.capacity_nm())).collect(),
            feasible: gate.feasible,
            feasible_count: gate.feasible_count,
            scores,
            score_breakdown,
            reason: gate.reason,
            friction,
            surface_condition: request.surface_condition,
            hub_stiffness,
            details,
        })
    }
}

impl Default for SelectionEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Run a request through the built-in engine.
pub fn select_connection<R: Rng>(request: &ConnectionRequest, rng: &mut R) -> CalcResult<SelectionResult> {
    STANDARD_ENGINE.select_connection(request, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::friction::{FrictionPolicy, FrictionSource};
    use crate::materials::din_materials::standard_materials;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn scenario() -> ConnectionRequest {
        let mut request = ConnectionRequest::new(45.0, 90.0, "Steel 42CrMo4", "Steel 42CrMo4", 870.0);
        request.safety_factor = 2.0;
        request.preferences = Preferences::from_array([0.6, 1.0, 0.2, 0.8, 0.5, 0.5, 0.3, 0.9]);
        request
    }

    #[test]
    fn test_reference_scenario() {
        let result = select_connection(&scenario(), &mut rng()).unwrap();

        assert!((result.design_torque_nm - 1740.0).abs() < 1e-9);
        assert!((result.capacities_nm[&ConnectionType::Key] - 956.8).abs() < 0.1);
        assert!((result.capacities_nm[&ConnectionType::Spline] - 6350.4).abs() < 1e-6);
        assert!((result.capacities_nm[&ConnectionType::Press] - 8931.8).abs() < 0.1);

        assert!(!result.is_feasible(ConnectionType::Key));
        assert!(result.is_feasible(ConnectionType::Spline));
        assert!(result.is_feasible(ConnectionType::Press));
        assert_eq!(result.feasible_count, 2);

        let scores = result.scores.as_ref().unwrap();
        assert!(!scores.contains_key(&ConnectionType::Key));
        assert!((scores[&ConnectionType::Press] - 0.4566).abs() < 1e-4);
        assert!((scores[&ConnectionType::Spline] - 0.6203).abs() < 1e-4);

        assert_eq!(result.recommended, Some(ConnectionType::Spline));
        assert_eq!(result.recommended_code(), "spline");
        assert_eq!(result.reason, None);
        assert_eq!(result.friction.source, FrictionSource::Table);
        assert!((result.friction.mu - 0.12).abs() < 1e-12);
        assert_eq!(result.hub_stiffness.factor, 0.85);
    }

    #[test]
    fn test_nothing_feasible() {
        let mut request = scenario();
        request.required_torque_nm = Some(50_000.0);
        let result = select_connection(&request, &mut rng()).unwrap();
        assert_eq!(result.recommended, None);
        assert_eq!(result.recommended_code(), "none");
        assert_eq!(result.feasible_count, 0);
        assert_eq!(result.scores, None);
        assert_eq!(result.reason, Some(InfeasibilityReason::TorqueNotMet));
    }

    #[test]
    fn test_press_fit_impractical_reason() {
        // 6600 N·m: press capacity (8931.8) covers it but needs too much
        // interference; key and spline fall short.
        let mut request = scenario();
        request.required_torque_nm = Some(3300.0);
        let result = select_connection(&request, &mut rng()).unwrap();

        let press = match &result.details[&ConnectionType::Press] {
            CapacityResult::Press(p) => p.clone(),
            other => panic!("unexpected {:?}", other),
        };
        assert!(press.capacity_nm >= result.design_torque_nm);
        assert!(!press.practical);
        assert_eq!(result.feasible_count, 0);
        assert_eq!(result.reason, Some(InfeasibilityReason::PressFitImpractical));
    }

    #[test]
    fn test_gate_matches_capacities() {
        let result = select_connection(&scenario(), &mut rng()).unwrap();
        for connection in ConnectionType::ALL {
            let cap_ok = result.capacities_nm[&connection] >= result.design_torque_nm;
            let practical = result.details[&connection].is_practical();
            assert_eq!(result.is_feasible(connection), cap_ok && practical);
        }
    }

    #[test]
    fn test_missing_torque() {
        let mut request = scenario();
        request.required_torque_nm = None;
        let err = select_connection(&request, &mut rng()).unwrap_err();
        assert_eq!(err, CalcError::missing_field("required_torque_nm"));
    }

    #[test]
    fn test_unknown_material() {
        let mut request = scenario();
        request.hub_material = "Unobtainium".to_string();
        let err = select_connection(&request, &mut rng()).unwrap_err();
        assert_eq!(err, CalcError::material_not_found("Unobtainium"));
    }

    #[test]
    fn test_hollow_shaft_validation() {
        let mut request = scenario();
        request.shaft_type = ShaftType::Hollow;
        request.shaft_inner_diameter_mm = Some(45.0);
        assert!(select_connection(&request, &mut rng()).unwrap_err().is_input_error());

        request.shaft_inner_diameter_mm = None;
        assert_eq!(
            select_connection(&request, &mut rng()).unwrap_err().error_code(),
            "MISSING_FIELD"
        );

        request.shaft_inner_diameter_mm = Some(25.0);
        assert!(select_connection(&request, &mut rng()).is_ok());
    }

    #[test]
    fn test_inner_diameter_on_solid_shaft_rejected() {
        let mut request = scenario();
        request.shaft_inner_diameter_mm = Some(20.0);
        assert!(select_connection(&request, &mut rng()).unwrap_err().is_input_error());
    }

    #[test]
    fn test_hub_outer_diameter_validation() {
        let mut request = scenario();
        request.hub_outer_diameter_mm = Some(45.0);
        assert!(select_connection(&request, &mut rng()).is_err());

        // Thick hub: Q_A = 0.45 → full stiffness
        request.hub_outer_diameter_mm = Some(100.0);
        let result = select_connection(&request, &mut rng()).unwrap();
        assert_eq!(result.hub_stiffness.factor, 1.0);
    }

    #[test]
    fn test_invalid_numbers_rejected() {
        for mutate in [
            (|r: &mut ConnectionRequest| r.shaft_diameter_mm = 0.0) as fn(&mut ConnectionRequest),
            |r| r.hub_length_mm = -5.0,
            |r| r.safety_factor = 0.0,
            |r| r.required_torque_nm = Some(-1.0),
            |r| r.preferences.cost = 1.5,
            |r| r.mu_override = Some(f64::NAN),
            |r| r.spline_major_diameter_mm = Some(40.0),
            |r| r.spline_tooth_count = Some(0),
        ] {
            let mut request = scenario();
            mutate(&mut request);
            let err = select_connection(&request, &mut rng()).unwrap_err();
            assert!(err.is_input_error(), "{:?}", err);
        }
    }

    #[test]
    fn test_zero_preferences() {
        let mut request = scenario();
        request.preferences = Preferences::from_array([0.0; 8]);
        let result = select_connection(&request, &mut rng()).unwrap();
        for score in result.scores.unwrap().values() {
            assert!(score.is_finite());
        }
    }

    #[test]
    fn test_idempotent() {
        let engine = SelectionEngine::standard();
        let a = engine.select_connection(&scenario(), &mut rng()).unwrap();
        let b = engine.select_connection(&scenario(), &mut rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sampled_friction_is_seeded() {
        let mut config = EngineConfig::default();
        config.friction.policy = FrictionPolicy::Sampled;
        let engine = SelectionEngine::new(MaterialCatalog::standard(), GeometryTables::standard(), config).unwrap();

        let a = engine.select_connection(&scenario(), &mut rng()).unwrap();
        let b = engine.select_connection(&scenario(), &mut rng()).unwrap();
        assert_eq!(a.friction, b.friction);
        assert!(a.friction.mu >= 0.12 && a.friction.mu <= 0.20);
    }

    #[test]
    fn test_engine_rejects_invalid_config() {
        let mut config = EngineConfig::default();
        config.scoring.margin_cap = 0.0;
        let err = SelectionEngine::new(MaterialCatalog::standard(), GeometryTables::standard(), config).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_TABLE");
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = MaterialCatalog::from_records(standard_materials()).unwrap();
        let engine = SelectionEngine::new(catalog, GeometryTables::standard(), EngineConfig::default()).unwrap();
        let result = engine.select_connection(&scenario(), &mut rng()).unwrap();
        assert_eq!(result.recommended, Some(ConnectionType::Spline));
    }

    #[test]
    fn test_request_json_defaults() {
        let json = r#"{
            "shaft_diameter_mm": 45.0,
            "hub_length_mm": 90.0,
            "shaft_material": "Steel C45",
            "hub_material": "Cast Iron GG25",
            "required_torque_nm": 300.0
        }"#;
        let request: ConnectionRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.safety_factor, 1.5);
        assert_eq!(request.shaft_type, ShaftType::Solid);
        assert_eq!(request.rz_hub_um, 12.0);
        assert_eq!(request.preferences, Preferences::default());
        assert_eq!(request.assembly_method, AssemblyMethod::HeatHub);
    }

    #[test]
    fn test_result_serializes_lowercase_keys() {
        let result = select_connection(&scenario(), &mut rng()).unwrap();
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"recommended\":\"spline\""));
        assert!(json.contains("\"press\":"));
        assert!(json.contains("\"reason\":null"));
    }

    #[test]
    fn test_shaft_type_parsing() {
        assert_eq!("Hollow".parse::<ShaftType>().unwrap(), ShaftType::Hollow);
        let err = "tubular".parse::<ShaftType>().unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_request_json_shaft_type() {
        let json = |kind: &str| {
            format!(
                r#"{{
                    "shaft_diameter_mm": 45.0,
                    "hub_length_mm": 90.0,
                    "shaft_type": {},
                    "shaft_inner_diameter_mm": 20.0,
                    "shaft_material": "Steel C45",
                    "hub_material": "Steel C45",
                    "required_torque_nm": 300.0
                }}"#,
                kind
            )
        };

        let request = ConnectionRequest::from_json_str(&json("\"Hollow\"")).unwrap();
        assert_eq!(request.shaft_type, ShaftType::Hollow);
        assert_eq!(serde_json::to_value(request.shaft_type).unwrap(), "hollow");

        let err = ConnectionRequest::from_json_str(&json("\"tubular\"")).unwrap_err();
        assert!(err.is_input_error());
        assert!(matches!(err, CalcError::InvalidInput { ref field, .. } if field == "shaft_type"));

        let err = ConnectionRequest::from_json_str(&json("3")).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        assert_eq!(
            ConnectionRequest::from_json_str("{ nope").unwrap_err().error_code(),
            "SERIALIZATION_ERROR"
        );
    }
}
