//! # Connection Equations
//!
//! Closed-form capacity relations shared by the calculation modules. Keeping
//! the formulas here, separate from input handling, makes each one easy to
//! check against the standard it comes from.
//!
//! ## Modules
//!
//! - [`press_fit`] - Interference fit pressures, interference and torque (DIN 7190-1)
//! - [`form_fit`] - Parallel key and spline torque (DIN 6892, ISO 14)
//!
//! ## Units
//!
//! All functions work in mm, MPa (N/mm²) and N·mm. Surface roughness enters
//! in µm and is converted inside [`press_fit::smoothing_loss`].
//!
//! ## References
//!
//! - DIN 7190-1:2017 Interference fits, calculation and design rules
//! - DIN 6892:2012 Parallel keys, calculation and design
//! - DIN 6885-1 Parallel keys, dimensions
//! - ISO 14 Straight-sided splines for cylindrical shafts

pub mod form_fit;
pub mod press_fit;

pub use form_fit::{key_bearing_torque, key_shear_torque, spline_torque};
pub use press_fit::{
    allowable_joint_pressure, elastic_interference, friction_torque, hub_deformation_factor,
    joining_temperature_delta, required_joint_pressure, shaft_deformation_factor, smoothing_loss,
};
