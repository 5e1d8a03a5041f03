//! Decoherence noise from fixed collapse operators
//!
//! Gantree: L3_Noise → DecoherenceNoise
//!
//! Lindblad noise generated by user-supplied collapse operators. Always
//! written to the systematic-noise accumulator.

use crate::noise::{check_operator_dims, Noise, NoiseOutcome};
use pulsim_core::{Operator, PulsimError, PulsimResult, QubitId, TimeList};
use pulsim_pulse::{Coefficient, Pulse};

/// Lindblad noise from fixed collapse operators
/// Gantree: DecoherenceNoise // 디코히어런스
#[derive(Debug, Clone, PartialEq)]
pub struct DecoherenceNoise {
    /// Collapse operators
    /// Gantree: c_ops: Vec<Operator> // 붕괴 연산자
    c_ops: Vec<Operator>,

    /// Qubits acted on, all qubits when absent
    targets: Option<Vec<QubitId>>,

    /// Time grid of a time-dependent rate
    tlist: Option<TimeList>,

    /// Rate coefficient, constant by default
    coeff: Coefficient,

    /// Apply each single-qubit operator to every qubit
    /// Gantree: all_qubits: bool // 전체 브로드캐스트
    all_qubits: bool,
}

impl DecoherenceNoise {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Collapse operators acting on explicit targets (all qubits by default)
    pub fn new(c_ops: Vec<Operator>) -> Self {
        Self {
            c_ops,
            targets: None,
            tlist: None,
            coeff: Coefficient::Constant,
            all_qubits: false,
        }
    }

    /// Single collapse operator
    pub fn single(c_op: Operator) -> Self {
        Self::new(vec![c_op])
    }

    /// Single-qubit collapse operators applied to every qubit
    /// Gantree: broadcast(c_ops) -> Result<Self> // 2x2 검증
    pub fn broadcast(c_ops: Vec<Operator>) -> PulsimResult<Self> {
        if let Some(op) = c_ops.iter().find(|op| !op.is_single_qubit()) {
            return Err(PulsimError::NotSingleQubitOperator {
                dims: op.dims().to_vec(),
            });
        }
        Ok(Self {
            all_qubits: true,
            ..Self::new(c_ops)
        })
    }

    /// Set explicit targets
    pub fn with_targets(mut self, targets: Vec<QubitId>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// Time-dependent rate sampled on `tlist`
    pub fn with_time_dependence(mut self, tlist: TimeList, coeff: Vec<f64>) -> Self {
        self.tlist = Some(tlist);
        self.coeff = Coefficient::Samples(coeff);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Collapse operators
    pub fn c_ops(&self) -> &[Operator] {
        &self.c_ops
    }

    /// Check for broadcast mode
    pub fn is_all_qubits(&self) -> bool {
        self.all_qubits
    }
}

impl Noise for DecoherenceNoise {
    fn get_noisy_pulses(
        &self,
        dims: &[usize],
        pulses: &[Pulse],
        systematic_noise: &Pulse,
    ) -> PulsimResult<NoiseOutcome> {
        let n = dims.len();
        let mut systematic = systematic_noise.clone();

        for c_op in &self.c_ops {
            if self.all_qubits {
                for q in 0..n {
                    check_operator_dims(c_op, &[q], dims)?;
                    systematic.add_lindblad_noise(
                        c_op.clone(),
                        vec![q],
                        self.tlist.clone(),
                        self.coeff.clone(),
                    )?;
                }
            } else {
                let targets: Vec<QubitId> = match &self.targets {
                    Some(targets) => targets.clone(),
                    None => (0..n).collect(),
                };
                check_operator_dims(c_op, &targets, dims)?;
                systematic.add_lindblad_noise(
                    c_op.clone(),
                    targets,
                    self.tlist.clone(),
                    self.coeff.clone(),
                )?;
            }
        }

        Ok(NoiseOutcome::PulsesAndSystematic(pulses.to_vec(), systematic))
    }

    fn is_device_noise(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "decoherence"
    }
}

// ============================================================================
// Tests
// ============================================================================
