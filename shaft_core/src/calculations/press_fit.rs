//! # Interference (Press) Fit
//!
//! Torque capacity and practicality of a cylindrical interference fit per
//! DIN 7190-1.
//!
//! ## Method
//!
//! 1. Ratios `Q_I = d_i / d` (0 for solid) and `Q_A = d / D_a` (D_a defaults to 2d)
//! 2. Allowable pressure: the smaller of the shaft and hub limits
//! 3. Required pressure for the design torque
//! 4. Interference `U = Z(p) + G` at both pressures
//! 5. Practicality: the required interference must fit under the
//!    diameter-dependent limit `ξ_max·d` and under the interference the
//!    allowable pressure produces, with something left after smoothing
//! 6. Capacity at the allowable pressure: `M = π·μ·p_zul·L·d²/2`
//!
//! A fit can carry the torque on paper and still be impractical; the
//! feasibility gate requires both.
//!
//! ## Example
//!
//! ```rust
//! use shaft_core::calculations::press_fit::{calculate, AssemblyMethod, PressFitInput};
//! use shaft_core::materials::MaterialCatalog;
//! use shaft_core::settings::PressFitConfig;
//!
//! let catalog = MaterialCatalog::standard();
//! let steel = catalog.get("Steel 42CrMo4").unwrap();
//!
//! let input = PressFitInput {
//!     shaft_diameter_mm: 45.0,
//!     hub_length_mm: 90.0,
//!     shaft_inner_diameter_mm: None,
//!     hub_outer_diameter_mm: None,
//!     mu: 0.12,
//!     design_torque_nm: 1740.0,
//!     rz_shaft_um: 12.0,
//!     rz_hub_um: 12.0,
//!     assembly_method: AssemblyMethod::HeatHub,
//! };
//!
//! let result = calculate(&input, steel, steel, &PressFitConfig::default()).unwrap();
//! assert!(result.practical);
//! assert!((result.capacity_nm - 8931.8).abs() < 0.1);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::equations::{
    allowable_joint_pressure, elastic_interference, friction_torque, hub_deformation_factor,
    joining_temperature_delta, required_joint_pressure, shaft_deformation_factor, smoothing_loss,
};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::materials::Material;
use crate::settings::PressFitConfig;
use crate::units::{NewtonMeters, NewtonMillimeters};

/// How the joint is assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssemblyMethod {
    /// Shrink fit: hub heated
    #[default]
    HeatHub,
    /// Expansion fit: shaft cooled
    CoolShaft,
    /// Longitudinal press fit at room temperature
    Press,
}

impl AssemblyMethod {
    pub const ALL: [AssemblyMethod; 3] = [AssemblyMethod::HeatHub, AssemblyMethod::CoolShaft, AssemblyMethod::Press];

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            AssemblyMethod::HeatHub => "Heat hub (shrink fit)",
            AssemblyMethod::CoolShaft => "Cool shaft (expansion fit)",
            AssemblyMethod::Press => "Longitudinal press",
        }
    }
}

impl std::str::FromStr for AssemblyMethod {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "heat_hub" | "heat" => Ok(AssemblyMethod::HeatHub),
            "cool_shaft" | "cool" => Ok(AssemblyMethod::CoolShaft),
            "press" => Ok(AssemblyMethod::Press),
            _ => Err(CalcError::invalid_input(
                "assembly_method",
                s,
                "Expected 'heat_hub', 'cool_shaft' or 'press'",
            )),
        }
    }
}

/// Why an interference fit cannot be manufactured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticalityIssue {
    /// Smoothing loss eats the whole usable interference
    RoughnessConsumesInterference,
    /// Required interference exceeds ξ_max · d
    ExceedsDiameterLimit,
    /// Required interference exceeds what the allowable pressure produces
    PressureWindowEmpty,
}

/// Input parameters for an interference fit.
///
/// ## JSON Example
///
/// ```json
/// {
///   "shaft_diameter_mm": 45.0,
///   "hub_length_mm": 90.0,
///   "shaft_inner_diameter_mm": null,
///   "hub_outer_diameter_mm": 90.0,
///   "mu": 0.12,
///   "design_torque_nm": 1740.0,
///   "rz_shaft_um": 12.0,
///   "rz_hub_um": 12.0,
///   "assembly_method": "heat_hub"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressFitInput {
    /// Joint diameter d (mm)
    pub shaft_diameter_mm: f64,
    /// Joint length L (mm)
    pub hub_length_mm: f64,
    /// Bore of a hollow shaft d_i (mm); None for solid
    pub shaft_inner_diameter_mm: Option<f64>,
    /// Hub outer diameter D_a (mm); None → 2d
    pub hub_outer_diameter_mm: Option<f64>,
    /// Adhesion coefficient μ
    pub mu: f64,
    /// Design torque (N·m), safety factor included
    pub design_torque_nm: f64,
    /// Shaft surface roughness Rz (µm)
    pub rz_shaft_um: f64,
    /// Hub bore surface roughness Rz (µm)
    pub rz_hub_um: f64,
    pub assembly_method: AssemblyMethod,
}

impl PressFitInput {
    /// Validate input parameters.
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("shaft_diameter_mm", self.shaft_diameter_mm)?;
        require_positive("hub_length_mm", self.hub_length_mm)?;
        require_positive("mu", self.mu)?;
        require_positive("design_torque_nm", self.design_torque_nm)?;

        if let Some(d_i) = self.shaft_inner_diameter_mm {
            if !d_i.is_finite() || d_i <= 0.0 || d_i >= self.shaft_diameter_mm {
                return Err(CalcError::invalid_input(
                    "shaft_inner_diameter_mm",
                    d_i.to_string(),
                    "Hollow shaft inner diameter must lie strictly between 0 and the shaft diameter",
                ));
            }
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
        for (field, rz) in [("rz_shaft_um", self.rz_shaft_um), ("rz_hub_um", self.rz_hub_um)] {
            if !rz.is_finite() || rz < 0.0 {
                return Err(CalcError::invalid_input(field, rz.to_string(), "Roughness must be ≥ 0"));
            }
        }
        Ok(())
    }

    /// Hub outer diameter with the 2d default applied
    pub fn hub_outer_mm(&self) -> f64 {
        self.hub_outer_diameter_mm.unwrap_or(2.0 * self.shaft_diameter_mm)
    }

    /// Shaft bore ratio Q_I
    pub fn q_inner(&self) -> f64 {
        self.shaft_inner_diameter_mm
            .map_or(0.0, |d_i| d_i / self.shaft_diameter_mm)
    }

    /// Hub ratio Q_A
    pub fn q_outer(&self) -> f64 {
        self.shaft_diameter_mm / self.hub_outer_mm()
    }
}

/// Manufacturing data for a practical fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssemblyPlan {
    /// Target measured interference U_nom (mm)
    pub nominal_interference_mm: f64,
    /// Interference tolerance assigned to the shaft (mm)
    pub shaft_tolerance_mm: f64,
    /// Interference tolerance assigned to the hub bore (mm)
    pub hub_tolerance_mm: f64,
    pub method: AssemblyMethod,
    /// Hub heating or shaft cooling temperature (°C); None for a press
    pub joining_temperature_c: Option<f64>,
}

/// Results from an interference fit calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressFitResult {
    /// Transmissible torque at the allowable pressure (N·m)
    pub capacity_nm: f64,
    pub mu: f64,
    pub q_inner: f64,
    pub q_outer: f64,
    /// Hub outer diameter actually used (mm)
    pub hub_outer_diameter_mm: f64,
    pub p_allow_shaft_mpa: f64,
    pub p_allow_hub_mpa: f64,
    /// Governing allowable joint pressure (MPa)
    pub p_allow_mpa: f64,
    /// Joint pressure needed for the design torque (MPa)
    pub p_required_mpa: f64,
    pub k_shaft: f64,
    pub k_hub: f64,
    /// Smoothing loss G (mm)
    pub smoothing_mm: f64,
    /// Measured interference needed for the design torque (mm)
    pub interference_required_mm: f64,
    /// Measured interference at the allowable pressure (mm)
    pub interference_allowable_mm: f64,
    /// Diameter-dependent interference limit ξ_max · d (mm)
    pub interference_limit_mm: f64,
    /// min(allowable, limit) (mm)
    pub interference_max_mm: f64,
    /// U_max − G (mm)
    pub net_interference_mm: f64,
    pub practical: bool,
    pub issue: Option<PracticalityIssue>,
    /// Only present for a practical fit
    pub assembly: Option<AssemblyPlan>,
}

/// Calculate an interference fit.
///
/// # Arguments
///
/// * `input` - Joint geometry, friction and design torque
/// * `shaft` / `hub` - Materials of the two parts
/// * `config` - Model constants
///
/// # Returns
///
/// * `Ok(PressFitResult)` - Capacity, interference window and verdict
/// * `Err(CalcError)` - Invalid geometry or values
pub fn calculate(input: &PressFitInput, shaft: &Material, hub: &Material, config: &PressFitConfig) -> CalcResult<PressFitResult> {
    input.validate()?;

    let d = input.shaft_diameter_mm;
    let l = input.hub_length_mm;
    let q_inner = input.q_inner();
    let q_outer = input.q_outer();

    let p_allow_shaft = allowable_joint_pressure(shaft.allowable_stress_mpa(), q_inner, config.pressure_utilization);
    let p_allow_hub = allowable_joint_pressure(hub.allowable_stress_mpa(), q_outer, config.pressure_utilization);
    let p_allow = p_allow_shaft.min(p_allow_hub);

    let design_nmm: NewtonMillimeters = NewtonMeters(input.design_torque_nm).into();
    let p_required = required_joint_pressure(design_nmm.value(), config.slip_safety, input.mu, d, l);

    let k_shaft = shaft_deformation_factor(q_inner, shaft.poisson);
    let k_hub = hub_deformation_factor(q_outer, hub.poisson);
    let smoothing = smoothing_loss(input.rz_shaft_um, input.rz_hub_um, config.smoothing_factor);

    let interference_required = elastic_interference(p_required, d, k_shaft, shaft.e_mpa, k_hub, hub.e_mpa) + smoothing;
    let interference_allowable = elastic_interference(p_allow, d, k_shaft, shaft.e_mpa, k_hub, hub.e_mpa) + smoothing;
    let interference_limit = config.interference_ratio(d) * d;
    let interference_max = interference_allowable.min(interference_limit);
    let net_interference = interference_max - smoothing;

    let issue = if net_interference <= 0.0 {
        Some(PracticalityIssue::RoughnessConsumesInterference)
    } else if interference_required > interference_limit {
        Some(PracticalityIssue::ExceedsDiameterLimit)
    } else if interference_required > interference_allowable {
        Some(PracticalityIssue::PressureWindowEmpty)
    } else {
        None
    };
    let practical = issue.is_none();

    let capacity: NewtonMeters = NewtonMillimeters(friction_torque(input.mu, p_allow, l, d)).into();

    let assembly = practical.then(|| assembly_plan(input, shaft, hub, config, interference_required, interference_max));

    debug!(
        "press fit d = {} mm: p_allow = {:.1} MPa, p_req = {:.1} MPa, U_req = {:.4} mm, U_max = {:.4} mm, capacity = {:.1} N·m, issue = {:?}",
        d,
        p_allow,
        p_required,
        interference_required,
        interference_max,
        capacity.value(),
        issue
    );

    Ok(PressFitResult {
        capacity_nm: capacity.value(),
        mu: input.mu,
        q_inner,
        q_outer,
        hub_outer_diameter_mm: input.hub_outer_mm(),
        p_allow_shaft_mpa: p_allow_shaft,
        p_allow_hub_mpa: p_allow_hub,
        p_allow_mpa: p_allow,
        p_required_mpa: p_required,
        k_shaft,
        k_hub,
        smoothing_mm: smoothing,
        interference_required_mm: interference_required,
        interference_allowable_mm: interference_allowable,
        interference_limit_mm: interference_limit,
        interference_max_mm: interference_max,
        net_interference_mm: net_interference,
        practical,
        issue,
        assembly,
    })
}

fn assembly_plan(
    input: &PressFitInput,
    shaft: &Material,
    hub: &Material,
    config: &PressFitConfig,
    u_required: f64,
    u_max: f64,
) -> AssemblyPlan {
    let d = input.shaft_diameter_mm;
    let window = u_max - u_required;

    let joining_temperature_c = match input.assembly_method {
        AssemblyMethod::HeatHub => Some(
            config.room_temperature_c
                + joining_temperature_delta(u_max, d, config.joining_clearance_ratio, hub.thermal_expansion_per_k),
        ),
        AssemblyMethod::CoolShaft => Some(
            config.room_temperature_c
                - joining_temperature_delta(u_max, d, config.joining_clearance_ratio, shaft.thermal_expansion_per_k),
        ),
        AssemblyMethod::Press => None,
    };

    AssemblyPlan {
        nominal_interference_mm: u_required + config.nominal_placement * window,
        shaft_tolerance_mm: config.shaft_tolerance_share * window,
        hub_tolerance_mm: (1.0 - config.shaft_tolerance_share) * window,
        method: input.assembly_method,
        joining_temperature_c,
    }
}
