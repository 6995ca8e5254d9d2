//! Feasibility gate: a candidate passes when its capacity covers the design
//! torque and, for an interference fit, the fit can actually be made.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculations::{CapacityResult, ConnectionType};

/// Why nothing was recommended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfeasibilityReason {
    /// No candidate reaches the design torque
    TorqueNotMet,
    /// The interference fit reaches the torque but cannot be manufactured
    PressFitImpractical,
}

/// Outcome of the gate over all candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct GateOutcome {
    pub feasible: BTreeMap<ConnectionType, bool>,
    pub feasible_count: usize,
    /// Set only when `feasible_count == 0`
    pub reason: Option<InfeasibilityReason>,
}

/// True when a single candidate passes.
pub fn is_feasible(candidate: &CapacityResult, design_torque_nm: f64) -> bool {
    candidate.capacity_nm() >= design_torque_nm && candidate.is_practical()
}

/// Apply the gate to every candidate.
pub fn evaluate(details: &BTreeMap<ConnectionType, CapacityResult>, design_torque_nm: f64) -> GateOutcome {
    let feasible: BTreeMap<ConnectionType, bool> = details
        .iter()
        .map(|(&connection, candidate)| (connection, is_feasible(candidate, design_torque_nm)))
        .collect();
    let feasible_count = feasible.values().filter(|&&ok| ok).count();

    let reason = (feasible_count == 0).then(|| {
        let press_met_torque_only = details.get(&ConnectionType::Press).is_some_and(|press| {
            press.capacity_nm() >= design_torque_nm && !press.is_practical()
        });
        if press_met_torque_only {
            InfeasibilityReason::PressFitImpractical
        } else {
            InfeasibilityReason::TorqueNotMet
        }
    });

    debug!(
        "gate at {:.1} N·m: {} feasible {:?}, reason {:?}",
        design_torque_nm, feasible_count, feasible, reason
    );

    GateOutcome {
        feasible,
        feasible_count,
        reason,
    }
}
