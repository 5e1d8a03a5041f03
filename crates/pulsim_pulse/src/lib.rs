//! # PULSIM Pulse
//!
//! Control pulses carrying an ideal term and accumulated noise terms.
//!
//! ## Gantree Architecture
//!
//! ```text
//! pulsim_pulse // L2: Pulse (완료)
//!     PulseTerm // 연산자+대상+시간의존 (완료)
//!         Coefficient // Constant | Samples
//!         SplineKind // step_func | cubic
//!         new(), constant(), time_span()
//!     Pulse // 제어 펄스 (완료)
//!         ideal, coherent_noise, lindblad_noise
//!         new(), systematic()
//!         add_coherent_noise(), add_lindblad_noise()
//!         time_span(), full_tlist()
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pulsim_pulse::prelude::*;
//! use pulsim_core::Operator;
//!
//! let mut pulse = Pulse::new(
//!     "sx0",
//!     Operator::sigmax(),
//!     vec![0],
//!     Some(vec![0.0, 1.0, 2.0]),
//!     Coefficient::Samples(vec![0.5, 0.5, 0.5]),
//! )
//! .unwrap();
//!
//! pulse
//!     .add_lindblad_noise(Operator::destroy(2), vec![0], None, Coefficient::Constant)
//!     .unwrap();
//! assert!(pulse.has_noise());
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Pulse terms (Gantree: L2_Pulse → PulseTerm)
pub mod term;

/// Pulse container (Gantree: L2_Pulse → Pulse)
pub mod pulse;

// ============================================================================
// Re-exports
// ============================================================================

pub use pulse::Pulse;
pub use term::{Coefficient, PulseTerm, SplineKind};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use pulsim_pulse::prelude::*;
    //! ```

    pub use crate::pulse::Pulse;
    pub use crate::term::{Coefficient, PulseTerm, SplineKind};
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use pulsim_core::{Operator, PulsimError};

    #[test]
    fn test_two_qubit_control_pulse() {
        let zz = Operator::sigmaz().tensor(&Operator::sigmaz());
        let pulse = Pulse::new(
            "zz01",
            zz,
            vec![0, 1],
            Some(vec![0.0, 1.0]),
            Coefficient::Samples(vec![0.3, 0.3]),
        )
        .unwrap();
        assert_eq!(pulse.targets(), &[0, 1]);
        assert_eq!(pulse.operator().map(|op| op.dims().len()), Some(2));
    }

    #[test]
    fn test_target_dimension_checked_on_pulse() {
        let result = Pulse::new(
            "bad",
            Operator::sigmax(),
            vec![0, 1],
            None,
            Coefficient::Constant,
        );
        assert!(matches!(result, Err(PulsimError::TargetMismatch { .. })));
    }

    #[test]
    fn test_accumulator_collects_both_kinds() {
        let mut acc = Pulse::systematic(None);
        acc.add_lindblad_noise(Operator::destroy(3), vec![2], None, Coefficient::Constant)
            .unwrap();
        acc.add_coherent_noise(
            Operator::sigmaz().tensor(&Operator::sigmaz()),
            vec![0, 1],
            None,
            Coefficient::Constant,
        )
        .unwrap();

        assert!(acc.is_systematic());
        assert_eq!(acc.lindblad_noise()[0].targets(), &[2]);
        assert_eq!(acc.coherent_noise()[0].targets(), &[0, 1]);
        assert!(acc.full_tlist().is_none());
    }

    #[test]
    fn test_spline_hint_carried() {
        let pulse = Pulse::new(
            "x",
            Operator::sigmax(),
            vec![0],
            Some(vec![0.0]),
            Coefficient::Samples(vec![1.0]),
        )
        .unwrap()
        .with_spline_kind(SplineKind::Cubic);
        assert_eq!(pulse.spline_kind(), Some(SplineKind::Cubic));
    }
}
