//! Core types for PULSIM
//!
//! Gantree: L0_Foundation → CoreTypes
//!
//! Fundamental type aliases and the system-dimension description shared by
//! pulses and noise sources.

use crate::error::{PulsimError, PulsimResult};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// Qubit (subsystem) identifier, 0-indexed
/// Gantree: QubitId // pub type QubitId = usize
pub type QubitId = usize;

/// Ordered time grid
/// Gantree: TimeList // pub type TimeList = Vec<f64>
pub type TimeList = Vec<f64>;

// ============================================================================
// SystemDims
// ============================================================================

/// Dimensions of the composite system
/// Gantree: SystemDims // 시스템 차원
///
/// Either a qubit count (every subsystem has dimension 2) or an explicit
/// per-subsystem dimension list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SystemDims {
    /// `N` qubits, i.e. `[2; N]`
    Qubits(usize),
    /// Explicit dimension of each component system
    Subsystems(Vec<usize>),
}

impl SystemDims {
    /// Per-subsystem dimensions
    /// Gantree: resolve() -> Result<Vec<usize>> // 차원 추론
    pub fn resolve(&self) -> PulsimResult<Vec<usize>> {
        if self.num_subsystems() == 0 {
            return Err(PulsimError::InvalidArgument(
                "system must have at least one subsystem".to_string(),
            ));
        }
        match self {
            SystemDims::Qubits(n) => Ok(vec![2; *n]),
            SystemDims::Subsystems(dims) => {
                if let Some(&d) = dims.iter().find(|&&d| d == 0) {
                    return Err(PulsimError::InvalidArgument(format!(
                        "subsystem dimension must be positive, got {}",
                        d
                    )));
                }
                Ok(dims.clone())
            }
        }
    }

    /// Number of component systems
    pub fn num_subsystems(&self) -> usize {
        match self {
            SystemDims::Qubits(n) => *n,
            SystemDims::Subsystems(dims) => dims.len(),
        }
    }
}

impl From<usize> for SystemDims {
    fn from(num_qubits: usize) -> Self {
        SystemDims::Qubits(num_qubits)
    }
}

impl From<Vec<usize>> for SystemDims {
    fn from(dims: Vec<usize>) -> Self {
        SystemDims::Subsystems(dims)
    }
}

impl fmt::Display for SystemDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemDims::Qubits(n) => write!(f, "{} qubits", n),
            SystemDims::Subsystems(dims) => write!(f, "dims {:?}", dims),
        }
    }
}

/// Check every target against the number of subsystems
pub fn check_targets(targets: &[QubitId], num_qubits: usize) -> PulsimResult<()> {
    match targets.iter().find(|&&q| q >= num_qubits) {
        Some(&qubit) => Err(PulsimError::QubitOutOfRange { qubit, num_qubits }),
        None => Ok(()),
    }
}

// ============================================================================
// Tests
// ============================================================================
