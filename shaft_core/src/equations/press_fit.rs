//! # Interference Fit Formulas (DIN 7190-1)
//!
//! Thick-walled cylinder (Lamé) relations for a shaft pressed into a hub,
//! evaluated in the N-mm-MPa system.
//!
//! ## Notation
//!
//! - `d` = Joint (nominal) diameter
//! - `L` = Joint length
//! - `Q_I = d_i / d` = Shaft bore ratio (0 for a solid shaft)
//! - `Q_A = d / D_a` = Hub diameter ratio
//! - `p` = Joint pressure
//! - `μ` = Static adhesion coefficient
//! - `Z` = Effective (elastic) interference, `U = Z + G` measured interference
//! - `G` = Smoothing loss from surface roughness

use std::f64::consts::PI;

use crate::units::{Micrometers, Millimeters};

/// Largest joint pressure a part tolerates.
///
/// ```text
/// p_zul = util · σ_zul · (1 − Q²)
/// ```
///
/// For the shaft `Q = Q_I`, for the hub `Q = Q_A`.
#[inline]
pub fn allowable_joint_pressure(sigma_allow_mpa: f64, q: f64, utilization: f64) -> f64 {
    utilization * sigma_allow_mpa * (1.0 - q * q)
}

/// Joint pressure needed to transmit a torque by friction.
///
/// ```text
/// p_req = 2 · M · S_R / (π · μ · d² · L)
/// ```
///
/// # Arguments
/// * `torque_nmm` - Design torque (N·mm)
/// * `slip_safety` - Slip safety S_R
/// * `mu` - Adhesion coefficient
/// * `d_mm` - Joint diameter
/// * `l_mm` - Joint length
///
/// ```rust
/// use shaft_core::equations::required_joint_pressure;
///
/// let p = required_joint_pressure(1_740_000.0, 1.0, 0.12, 45.0, 90.0);
/// assert!((p - 50.65).abs() < 0.01);
/// ```
#[inline]
pub fn required_joint_pressure(torque_nmm: f64, slip_safety: f64, mu: f64, d_mm: f64, l_mm: f64) -> f64 {
    2.0 * torque_nmm * slip_safety / (PI * mu * d_mm * d_mm * l_mm)
}

/// Friction torque transmitted at pressure `p` (N·mm).
///
/// ```text
/// M = π · μ · p · L · d² / 2
/// ```
#[inline]
pub fn friction_torque(mu: f64, p_mpa: f64, l_mm: f64, d_mm: f64) -> f64 {
    PI * mu * p_mpa * l_mm * d_mm * d_mm / 2.0
}

/// Shaft deformation factor `K_I = (1 + Q_I²)/(1 − Q_I²) − ν_I`.
#[inline]
pub fn shaft_deformation_factor(q_inner: f64, poisson: f64) -> f64 {
    let q2 = q_inner * q_inner;
    (1.0 + q2) / (1.0 - q2) - poisson
}

/// Hub deformation factor `K_A = (1 + Q_A²)/(1 − Q_A²) + ν_A`.
#[inline]
pub fn hub_deformation_factor(q_outer: f64, poisson: f64) -> f64 {
    let q2 = q_outer * q_outer;
    (1.0 + q2) / (1.0 - q2) + poisson
}

/// Elastic interference producing pressure `p` (mm).
///
/// ```text
/// Z = p · d · (K_I / E_I + K_A / E_A)
/// ```
#[inline]
pub fn elastic_interference(p_mpa: f64, d_mm: f64, k_shaft: f64, e_shaft_mpa: f64, k_hub: f64, e_hub_mpa: f64) -> f64 {
    p_mpa * d_mm * (k_shaft / e_shaft_mpa + k_hub / e_hub_mpa)
}

/// Smoothing loss of the roughness peaks during joining (mm).
///
/// ```text
/// G = factor · (Rz_I + Rz_A)     (Rz in µm, G in mm)
/// ```
#[inline]
pub fn smoothing_loss(rz_shaft_um: f64, rz_hub_um: f64, factor: f64) -> f64 {
    let rz_sum = Micrometers(rz_shaft_um) + Micrometers(rz_hub_um);
    Millimeters::from(rz_sum * factor).value()
}

/// Temperature change needed to join thermally (K).
///
/// The part must grow (or shrink) by the maximum interference plus a joining
/// clearance:
///
/// ```text
/// Δt = (U_max + c · d) / (α · d)
/// ```
#[inline]
pub fn joining_temperature_delta(u_max_mm: f64, d_mm: f64, clearance_ratio: f64, alpha_per_k: f64) -> f64 {
    (u_max_mm + clearance_ratio * d_mm) / (alpha_per_k * d_mm)
}
