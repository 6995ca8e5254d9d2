//! # Connection Calculations
//!
//! One module per connection type. Each follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ..) -> CalcResult<*Result>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`press_fit`] - Interference fit capacity and practicality (DIN 7190-1)
//! - [`key`] - Parallel key capacity (DIN 6885-1 / DIN 6892)
//! - [`spline`] - Straight-sided spline capacity (ISO 14)
//! - [`hub_stiffness`] - Hub ratio rating used by the scorer

pub mod hub_stiffness;
pub mod key;
pub mod press_fit;
pub mod spline;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

// Re-export commonly used types
pub use hub_stiffness::HubStiffness;
pub use key::{KeyInput, KeyResult};
pub use press_fit::{AssemblyMethod, PracticalityIssue, PressFitInput, PressFitResult};
pub use spline::{SplineInput, SplineResult};

/// The three connection types the selector compares.
///
/// The declaration order is the evaluation order and the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionType {
    Press,
    Key,
    Spline,
}

impl ConnectionType {
    /// All types in evaluation order
    pub const ALL: [ConnectionType; 3] = [ConnectionType::Press, ConnectionType::Key, ConnectionType::Spline];

    /// Lowercase code ("press", "key", "spline")
    pub fn code(&self) -> &'static str {
        match self {
            ConnectionType::Press => "press",
            ConnectionType::Key => "key",
            ConnectionType::Spline => "spline",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionType::Press => "Interference fit",
            ConnectionType::Key => "Parallel key",
            ConnectionType::Spline => "Spline",
        }
    }
}

impl std::fmt::Display for ConnectionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for ConnectionType {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "press" => Ok(ConnectionType::Press),
            "key" => Ok(ConnectionType::Key),
            "spline" => Ok(ConnectionType::Spline),
            _ => Err(CalcError::invalid_input(
                "connection_type",
                s,
                "Expected 'press', 'key' or 'spline'",
            )),
        }
    }
}

/// Capacity details of one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CapacityResult {
    Press(PressFitResult),
    Key(KeyResult),
    Spline(SplineResult),
}

impl CapacityResult {
    /// Transmissible torque (N·m)
    pub fn capacity_nm(&self) -> f64 {
        match self {
            CapacityResult::Press(r) => r.capacity_nm,
            CapacityResult::Key(r) => r.capacity_nm,
            CapacityResult::Spline(r) => r.capacity_nm,
        }
    }

    pub fn connection_type(&self) -> ConnectionType {
        match self {
            CapacityResult::Press(_) => ConnectionType::Press,
            CapacityResult::Key(_) => ConnectionType::Key,
            CapacityResult::Spline(_) => ConnectionType::Spline,
        }
    }

    /// False only for an impractical interference fit
    pub fn is_practical(&self) -> bool {
        match self {
            CapacityResult::Press(r) => r.practical,
            CapacityResult::Key(_) | CapacityResult::Spline(_) => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_type_serialization() {
        assert_eq!(serde_json::to_string(&ConnectionType::Press).unwrap(), "\"press\"");
        let parsed: ConnectionType = serde_json::from_str("\"spline\"").unwrap();
        assert_eq!(parsed, ConnectionType::Spline);
    }

    #[test]
    fn test_enumeration_order() {
        let mut types = vec![ConnectionType::Spline, ConnectionType::Press, ConnectionType::Key];
        types.sort();
        assert_eq!(types, ConnectionType::ALL.to_vec());
    }

    #[test]
    fn test_parse() {
        assert_eq!(" Key ".parse::<ConnectionType>().unwrap(), ConnectionType::Key);
        assert!("weld".parse::<ConnectionType>().is_err());
    }
}
