//! Error types for PULSIM
//!
//! Gantree: L0_Foundation → Errors
//!
//! Every failure in the noise pipeline is an eager, fatal error: a failing
//! noise source aborts the whole composition and no partial result is kept.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use thiserror::Error;

/// Main error type for PULSIM
/// Gantree: PulsimError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PulsimError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Qubit index out of range
    /// Gantree: QubitOutOfRange{{q,max}} // 큐비트 범위
    #[error("Qubit {qubit} out of range: system has {num_qubits} qubits")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    /// Relaxation time must be a positive number
    #[error("Invalid relaxation time {name}={value}: must be a positive number")]
    InvalidRelaxationTime { name: &'static str, value: f64 },

    /// Per-qubit relaxation sequence of the wrong length
    #[error("Length of {name} does not match the number of qubits: len({name})={len}, N={num_qubits}")]
    RelaxationLengthMismatch {
        name: &'static str,
        len: usize,
        num_qubits: usize,
    },

    /// Physical constraint 2*T1 >= T2 violated
    /// Gantree: InvalidT2{{t2,t1}} // T2>2*T1
    #[error("t1={t1}, t2={t2} does not fulfill 2*t1 >= t2")]
    InvalidT2 { t1: f64, t2: f64 },

    /// Invalid sampling interval
    #[error("Invalid time step {0}: must be a positive finite number")]
    InvalidTimeStep(f64),

    /// Generic invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ========================================================================
    // Operator Errors
    // ========================================================================
    /// Operator shapes or subsystem dimensions do not agree
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Operator acts on a different number of subsystems than it targets
    #[error("Operator acts on {subsystems} subsystem(s) but {targets} target(s) were given")]
    TargetMismatch { subsystems: usize, targets: usize },

    /// Broadcast decoherence requires single-qubit operators
    #[error("The operator with dims {dims:?} is not a single qubit operator, thus cannot be applied to all qubits")]
    NotSingleQubitOperator { dims: Vec<usize> },

    // ========================================================================
    // Pulse Errors
    // ========================================================================
    /// Coefficient samples not aligned with their time grid
    #[error("Coefficient length {coeff_len} does not match time grid length {tlist_len}")]
    CoefficientLengthMismatch { coeff_len: usize, tlist_len: usize },

    /// Sampled coefficient given without a time grid, or no grid to derive from
    #[error("Missing time grid: {0}")]
    MissingTimeGrid(String),

    /// Pulse has no ideal control term
    #[error("Pulse '{0}' has no ideal control term")]
    MissingIdealTerm(String),

    /// Pulse index out of range
    #[error("Pulse index {index} out of range: {len} pulses given")]
    PulseIndexOutOfRange { index: usize, len: usize },

    // ========================================================================
    // Noise Errors
    // ========================================================================
    /// Parameter name reserved by the noise source
    #[error("Parameter '{0}' is predetermined inside the noise object")]
    ReservedParameter(String),

    /// Noise source returned a result the pipeline cannot interpret
    /// Gantree: MalformedNoiseOutput // 반환 형태 오류
    #[error("Returned value of {source_name} not understood: {reason}")]
    MalformedNoiseOutput { source_name: String, reason: String },

    /// Spectroscopy parameter sequence too short
    #[error("Parameter '{name}' has {len} entries, {required} required")]
    ParameterLengthMismatch {
        name: &'static str,
        len: usize,
        required: usize,
    },

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),
}

/// Result type alias for PULSIM operations
/// Gantree: PulsimResult<T> // type alias
pub type PulsimResult<T> = Result<T, PulsimError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for PulsimError {
    fn from(err: serde_json::Error) -> Self {
        PulsimError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl PulsimError {
    /// Check if error is an invalid-argument (validation) error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            PulsimError::QubitOutOfRange { .. }
                | PulsimError::InvalidRelaxationTime { .. }
                | PulsimError::RelaxationLengthMismatch { .. }
                | PulsimError::InvalidT2 { .. }
                | PulsimError::InvalidTimeStep(_)
                | PulsimError::InvalidArgument(_)
                | PulsimError::TargetMismatch { .. }
                | PulsimError::NotSingleQubitOperator { .. }
                | PulsimError::CoefficientLengthMismatch { .. }
                | PulsimError::ReservedParameter(_)
                | PulsimError::ParameterLengthMismatch { .. }
        )
    }

    /// Check if error was raised while applying a noise source
    pub fn is_noise_error(&self) -> bool {
        matches!(
            self,
            PulsimError::ReservedParameter(_)
                | PulsimError::MalformedNoiseOutput { .. }
                | PulsimError::ParameterLengthMismatch { .. }
                | PulsimError::InvalidT2 { .. }
                | PulsimError::NotSingleQubitOperator { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PulsimError::InvalidT2 { t1: 1.0, t2: 3.0 };
        assert!(err.to_string().contains("t1=1"));
        assert!(err.to_string().contains("t2=3"));
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = PulsimError::RelaxationLengthMismatch {
            name: "t1",
            len: 2,
            num_qubits: 3,
        };
        assert!(err.to_string().contains("len(t1)=2"));
        assert!(err.to_string().contains("N=3"));
    }

    #[test]
    fn test_is_validation_error() {
        assert!(PulsimError::InvalidT2 { t1: 1.0, t2: 3.0 }.is_validation_error());
        assert!(PulsimError::ReservedParameter("size".into()).is_validation_error());
        assert!(!PulsimError::JsonError("bad".into()).is_validation_error());
    }

    #[test]
    fn test_is_noise_error() {
        let err = PulsimError::MalformedNoiseOutput {
            source_name: "custom".into(),
            reason: "wrong length".into(),
        };
        assert!(err.is_noise_error());
        assert!(!PulsimError::MissingIdealTerm("p".into()).is_noise_error());
    }

    #[test]
    fn test_from_json_error() {
        let err: PulsimError = serde_json::from_str::<f64>("not json").unwrap_err().into();
        assert!(matches!(err, PulsimError::JsonError(_)));
    }
}
