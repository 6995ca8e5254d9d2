//! # Form-Fit Torque Formulas
//!
//! Static capacity of parallel keys (DIN 6892 method C) and straight-sided
//! splines. Torques are returned in N·mm.
//!
//! ## Notation
//!
//! - `d` = Shaft diameter, `r = d / 2`
//! - `b`, `h` = Key width and height
//! - `l` = Effective (load-bearing) key length
//! - `z` = Number of spline teeth, `h` = projected flank height
//! - `r_m` = Mean flank radius
//! - `K` = Load-share factor (not all flanks carry equally)

/// Key torque limited by shear of the key cross section.
///
/// ```text
/// M = τ_zul · b · l · r
/// ```
#[inline]
pub fn key_shear_torque(tau_allow_mpa: f64, width_mm: f64, length_mm: f64, d_mm: f64) -> f64 {
    tau_allow_mpa * width_mm * length_mm * d_mm / 2.0
}

/// Key torque limited by flank bearing pressure.
///
/// Half the key height engages the hub groove:
///
/// ```text
/// M = p_zul · (h / 2) · l · r
/// ```
///
/// ```rust
/// use shaft_core::equations::key_bearing_torque;
///
/// // 14 × 9 key, l = 63 mm on a 45 mm shaft
/// let m = key_bearing_torque(150.0, 9.0, 63.0, 45.0);
/// assert!((m - 956_812.5).abs() < 1e-6);
/// ```
#[inline]
pub fn key_bearing_torque(p_allow_mpa: f64, height_mm: f64, length_mm: f64, d_mm: f64) -> f64 {
    p_allow_mpa * (height_mm / 2.0) * length_mm * d_mm / 2.0
}

/// Spline torque limited by flank bearing pressure.
///
/// ```text
/// M = K · L · z · h · r_m · p_zul
/// ```
#[inline]
pub fn spline_torque(load_share: f64, length_mm: f64, teeth: u32, height_mm: f64, mean_radius_mm: f64, p_allow_mpa: f64) -> f64 {
    load_share * length_mm * f64::from(teeth) * height_mm * mean_radius_mm * p_allow_mpa
}
