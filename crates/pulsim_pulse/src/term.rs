//! Pulse terms for PULSIM
//!
//! Gantree: L2_Pulse → PulseTerm
//!
//! One operator placed on a set of targets with an optional time
//! dependence. Ideal controls, coherent noise and Lindblad noise all share
//! this shape.

use pulsim_core::{Operator, PulsimError, PulsimResult, QubitId, TimeList};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Coefficient
// ============================================================================

/// Time dependence of a term
/// Gantree: Coefficient // 계수
#[derive(Debug, Clone, PartialEq)]
pub enum Coefficient {
    /// Static, time-independent term
    Constant,
    /// One sample per point of the paired time grid
    Samples(Vec<f64>),
}

impl Coefficient {
    /// Check for the constant flag
    pub fn is_constant(&self) -> bool {
        matches!(self, Coefficient::Constant)
    }

    /// Sample values, if time dependent
    pub fn samples(&self) -> Option<&[f64]> {
        match self {
            Coefficient::Constant => None,
            Coefficient::Samples(values) => Some(values),
        }
    }
}

impl From<Vec<f64>> for Coefficient {
    fn from(values: Vec<f64>) -> Self {
        Coefficient::Samples(values)
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coefficient::Constant => write!(f, "constant"),
            Coefficient::Samples(values) => write!(f, "{} samples", values.len()),
        }
    }
}

// ============================================================================
// SplineKind
// ============================================================================

/// Interpolation hint for the downstream solver
/// Gantree: SplineKind // 보간 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SplineKind {
    /// Piecewise constant between grid points
    #[default]
    StepFunc,
    /// Cubic spline through the samples
    Cubic,
}

impl fmt::Display for SplineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplineKind::StepFunc => write!(f, "step_func"),
            SplineKind::Cubic => write!(f, "cubic"),
        }
    }
}

// ============================================================================
// PulseTerm
// ============================================================================

/// Operator with targets and time dependence
/// Gantree: PulseTerm // 펄스 항
#[derive(Debug, Clone, PartialEq)]
pub struct PulseTerm {
    /// Generator or collapse operator
    operator: Operator,

    /// Subsystems the operator acts on, in tensor order
    /// Gantree: targets: Vec<QubitId> // 대상 큐비트
    targets: Vec<QubitId>,

    /// Time grid, absent for static terms
    tlist: Option<TimeList>,

    /// Coefficient aligned to `tlist`, or the constant flag
    coeff: Coefficient,
}

impl PulseTerm {
    /// Create a term, checking target count and grid alignment
    /// Gantree: new(op,targets,tlist,coeff) -> Result<Self> // 생성+검증
    pub fn new(
        operator: Operator,
        targets: Vec<QubitId>,
        tlist: Option<TimeList>,
        coeff: Coefficient,
    ) -> PulsimResult<Self> {
        if operator.num_subsystems() != targets.len() {
            return Err(PulsimError::TargetMismatch {
                subsystems: operator.num_subsystems(),
                targets: targets.len(),
            });
        }

        if let Some(&t) = tlist.iter().flatten().find(|t| !t.is_finite()) {
            return Err(PulsimError::InvalidArgument(format!(
                "time grid points must be finite, got {}",
                t
            )));
        }

        if let Coefficient::Samples(values) = &coeff {
            let tlist = tlist.as_ref().ok_or_else(|| {
                PulsimError::MissingTimeGrid(format!(
                    "coefficient with {} samples has no time grid",
                    values.len()
                ))
            })?;
            if tlist.len() != values.len() {
                return Err(PulsimError::CoefficientLengthMismatch {
                    coeff_len: values.len(),
                    tlist_len: tlist.len(),
                });
            }
        }

        Ok(Self {
            operator,
            targets,
            tlist,
            coeff,
        })
    }

    /// Create a static term
    pub fn constant(operator: Operator, targets: Vec<QubitId>) -> PulsimResult<Self> {
        Self::new(operator, targets, None, Coefficient::Constant)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Operator
    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    /// Target subsystems
    pub fn targets(&self) -> &[QubitId] {
        &self.targets
    }

    /// Time grid
    pub fn tlist(&self) -> Option<&[f64]> {
        self.tlist.as_deref()
    }

    /// Coefficient
    pub fn coeff(&self) -> &Coefficient {
        &self.coeff
    }

    /// Check for a static term
    pub fn is_constant(&self) -> bool {
        self.coeff.is_constant()
    }

    /// Earliest and latest grid point
    pub fn time_span(&self) -> Option<(f64, f64)> {
        let tlist = self.tlist.as_ref().filter(|t| !t.is_empty())?;
        let span = tlist
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
                (lo.min(t), hi.max(t))
            });
        Some(span)
    }
}

impl fmt::Display for PulseTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {:?} ({})", self.operator, self.targets, self.coeff)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_term() {
        let term = PulseTerm::constant(Operator::sigmaz(), vec![1]).unwrap();
        assert!(term.is_constant());
        assert!(term.tlist().is_none());
        assert_eq!(term.targets(), &[1]);
        assert!(term.time_span().is_none());
    }

    #[test]
    fn test_sampled_term() {
        let term = PulseTerm::new(
            Operator::sigmax(),
            vec![0],
            Some(vec![0.0, 0.5, 1.0]),
            Coefficient::from(vec![0.1, 0.2, 0.3]),
        )
        .unwrap();
        assert_eq!(term.coeff().samples(), Some(&[0.1, 0.2, 0.3][..]));
        assert_eq!(term.time_span(), Some((0.0, 1.0)));
    }

    #[test]
    fn test_length_mismatch() {
        let result = PulseTerm::new(
            Operator::sigmax(),
            vec![0],
            Some(vec![0.0, 1.0]),
            Coefficient::Samples(vec![1.0, 2.0, 3.0]),
        );
        assert_eq!(
            result,
            Err(PulsimError::CoefficientLengthMismatch {
                coeff_len: 3,
                tlist_len: 2
            })
        );
    }

    #[test]
    fn test_samples_without_grid() {
        let result = PulseTerm::new(
            Operator::sigmax(),
            vec![0],
            None,
            Coefficient::Samples(vec![1.0]),
        );
        assert!(matches!(result, Err(PulsimError::MissingTimeGrid(_))));
    }

    #[test]
    fn test_non_finite_grid_rejected() {
        for bad in [f64::INFINITY, f64::NAN] {
            let result = PulseTerm::new(
                Operator::sigmax(),
                vec![0],
                Some(vec![0.0, bad]),
                Coefficient::Samples(vec![1.0, 1.0]),
            );
            assert!(matches!(result, Err(PulsimError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_target_mismatch() {
        let zz = Operator::sigmaz().tensor(&Operator::sigmaz());
        let result = PulseTerm::constant(zz, vec![0]);
        assert_eq!(
            result,
            Err(PulsimError::TargetMismatch {
                subsystems: 2,
                targets: 1
            })
        );
    }

    #[test]
    fn test_constant_with_grid_is_allowed() {
        // static term that still records its grid
        let term = PulseTerm::new(
            Operator::sigmaz(),
            vec![0],
            Some(vec![0.0, 1.0]),
            Coefficient::Constant,
        )
        .unwrap();
        assert!(term.is_constant());
        assert_eq!(term.time_span(), Some((0.0, 1.0)));
    }

    #[test]
    fn test_spline_kind_display() {
        assert_eq!(SplineKind::Cubic.to_string(), "cubic");
        assert_eq!(SplineKind::default(), SplineKind::StepFunc);
    }
}
