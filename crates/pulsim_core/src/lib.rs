//! # PULSIM Core
//!
//! Core types, errors, and dense operators for the pulse noise pipeline.
//!
//! ## Gantree Architecture
//!
//! ```text
//! pulsim_core // L0+L1: Foundation + Operator (완료)
//!     L0_Foundation // 기반 타입/상수/에러 (완료)
//!         CoreTypes // QubitId, TimeList, SystemDims (완료)
//!         Constants // 라벨/예약어/허용오차 (완료)
//!         Errors // 에러 타입 (완료)
//!     L1_Operator // 연산자 (완료)
//!         Operator // destroy, num, projector, tensor, dag (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pulsim_core::prelude::*;
//!
//! // Two-qubit ZZ coupling
//! let zz = Operator::sigmaz().tensor(&Operator::sigmaz());
//! assert_eq!(zz.dims(), &[2, 2]);
//!
//! // Qubit count inference
//! let dims = SystemDims::Qubits(3).resolve().unwrap();
//! assert_eq!(dims, vec![2, 2, 2]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Core types (Gantree: L0_Foundation → CoreTypes)
pub mod types;

/// Constants (Gantree: L0_Foundation → Constants)
pub mod constants;

/// Error types (Gantree: L0_Foundation → Errors)
pub mod error;

/// Dense operators (Gantree: L1_Operator → Operator)
pub mod operator;

// ============================================================================
// Re-exports
// ============================================================================

pub use constants::{labels, numerics, random};
pub use error::{PulsimError, PulsimResult};
pub use operator::Operator;
pub use types::{check_targets, QubitId, SystemDims, TimeList};

// ============================================================================
// Prelude
// ============================================================================

pub mod prelude {
    //! Convenient imports for common use cases
    //!
    //! ```rust
    //! use pulsim_core::prelude::*;
    //! ```

    pub use crate::error::{PulsimError, PulsimResult};
    pub use crate::operator::Operator;
    pub use crate::types::{QubitId, SystemDims, TimeList};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Integration Tests
// ============================================================================
