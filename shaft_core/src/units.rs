//! # Unit Types
//!
//! Newtype wrappers for the unit changes at the edges of the connection
//! equations.
//!
//! ## Unit System
//!
//! The capacity equations are evaluated in the consistent N-mm-MPa system:
//! - Length: millimeters (mm); surface roughness in micrometers (µm)
//! - Stress / pressure: megapascals (MPa = N/mm²)
//! - Torque: newton-millimeters (N·mm) internally, newton-meters (N·m) at the API
//!
//! ## Example
//!
//! ```rust
//! use shaft_core::units::{NewtonMeters, NewtonMillimeters, Micrometers, Millimeters};
//!
//! let torque = NewtonMeters(870.0);
//! let torque_nmm: NewtonMillimeters = torque.into();
//! assert_eq!(torque_nmm.value(), 870_000.0);
//!
//! let rz: Millimeters = (Micrometers(12.0) + Micrometers(12.0)).into();
//! assert!((rz.value() - 0.024).abs() < 1e-12);
//! ```

use std::ops::{Add, Mul};

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Millimeters(pub f64);

/// Length in micrometers (surface roughness Rz)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Micrometers(pub f64);

/// Torque in newton-meters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonMeters(pub f64);

/// Torque in newton-millimeters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonMillimeters(pub f64);

impl From<Micrometers> for Millimeters {
    fn from(um: Micrometers) -> Self {
        Millimeters(um.0 / 1000.0)
    }
}

impl From<NewtonMeters> for NewtonMillimeters {
    fn from(nm: NewtonMeters) -> Self {
        NewtonMillimeters(nm.0 * 1000.0)
    }
}

impl From<NewtonMillimeters> for NewtonMeters {
    fn from(nmm: NewtonMillimeters) -> Self {
        NewtonMeters(nmm.0 / 1000.0)
    }
}

// Roughness peaks are summed and scaled before conversion
impl Add for Micrometers {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Micrometers(self.0 + rhs.0)
    }
}

impl Mul<f64> for Micrometers {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        Micrometers(self.0 * rhs)
    }
}

macro_rules! impl_value {
    ($($type:ty),*) => {
        $(
            impl $type {
                /// Get the raw f64 value
                pub fn value(self) -> f64 {
                    self.0
                }
            }
        )*
    };
}

impl_value!(Millimeters, Micrometers, NewtonMeters, NewtonMillimeters);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_torque_conversion() {
        let nm = NewtonMeters(1.74);
        let nmm: NewtonMillimeters = nm.into();
        assert!((nmm.value() - 1740.0).abs() < 1e-9);
        let back: NewtonMeters = nmm.into();
        assert!((back.value() - 1.74).abs() < 1e-12);
    }

    #[test]
    fn test_roughness_conversion() {
        let sum = Micrometers(12.0) + Micrometers(12.0);
        let mm: Millimeters = (sum * 0.4).into();
        assert!((mm.value() - 0.0096).abs() < 1e-12);
    }
}
