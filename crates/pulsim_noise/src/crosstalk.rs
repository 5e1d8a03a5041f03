//! Always-on ZZ crosstalk for PULSIM
//!
//! Gantree: L3_Noise → ZzCrossTalk
//!
//! Static ZZ coupling between neighbouring transmons, restricted to the two
//! lowest levels of each subsystem. Written to the accumulator as constant
//! coherent noise. Not filtered as device noise: it always runs, and its
//! contribution only survives when the accumulator is returned.

use crate::noise::{check_operator_dims, Noise, NoiseOutcome};
use pulsim_core::{Operator, PulsimError, PulsimResult};
use pulsim_pulse::{Coefficient, Pulse};
use serde::{Deserialize, Serialize};

/// Device parameters of a superconducting qubit chain
/// Gantree: CrossTalkParams // 소자 파라미터
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CrossTalkParams {
    /// Coupling strength of each neighbouring pair
    #[serde(alias = "J")]
    pub j: Vec<f64>,

    /// Qubit frequency dressed by the cavity
    pub wq_dressed_cavity: Vec<f64>,

    /// Anharmonicity of each qubit
    pub alpha: Vec<f64>,
}

impl CrossTalkParams {
    /// Check that every sequence covers `num_qubits` qubits
    pub fn validate(&self, num_qubits: usize) -> PulsimResult<()> {
        let pairs = num_qubits.saturating_sub(1);
        let checks: [(&'static str, usize, usize); 3] = [
            ("J", self.j.len(), pairs),
            ("wq_dressed_cavity", self.wq_dressed_cavity.len(), num_qubits),
            ("alpha", self.alpha.len(), num_qubits),
        ];
        for (name, len, required) in checks {
            if len < required {
                return Err(PulsimError::ParameterLengthMismatch {
                    name,
                    len,
                    required,
                });
            }
        }
        Ok(())
    }
}

/// Z restricted to levels {0, 1}: P(2n - I)P
/// Gantree: population_difference(d) -> Result<Operator> // 하위 2준위 Z
pub fn population_difference(d: usize) -> PulsimResult<Operator> {
    let projector = Operator::projector(d, &[0, 1])?;
    let z = Operator::num(d).scale(2.0).sub(&Operator::identity(d))?;
    projector.matmul(&z)?.matmul(&projector)
}

/// ZZ strength between qubit `i` and `i + 1`
/// Gantree: zz_coefficient(params,i) -> f64 // J²[1/(Δ-α₂) - 1/(Δ+α₁)]
pub fn zz_coefficient(params: &CrossTalkParams, i: usize) -> f64 {
    let detuning = params.wq_dressed_cavity[i] - params.wq_dressed_cavity[i + 1];
    let j = params.j[i];
    j * j * (1.0 / (detuning - params.alpha[i + 1]) - 1.0 / (detuning + params.alpha[i]))
}

/// Always-on ZZ coupling on each neighbouring pair
/// Gantree: ZzCrossTalk // ZZ 크로스토크
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZzCrossTalk {
    params: CrossTalkParams,
}

impl ZzCrossTalk {
    /// Create crosstalk noise from device parameters
    pub fn new(params: CrossTalkParams) -> Self {
        Self { params }
    }

    /// Device parameters
    pub fn params(&self) -> &CrossTalkParams {
        &self.params
    }
}

impl Noise for ZzCrossTalk {
    fn get_noisy_pulses(
        &self,
        dims: &[usize],
        pulses: &[Pulse],
        systematic_noise: &Pulse,
    ) -> PulsimResult<NoiseOutcome> {
        if dims.len() < 2 {
            return Ok(NoiseOutcome::Unchanged);
        }
        self.params.validate(dims.len())?;

        let mut systematic = systematic_noise.clone();
        for i in 0..dims.len() - 1 {
            if dims[i] != dims[i + 1] {
                log::warn!(
                    "crosstalk pair ({}, {}) has unequal dims {} and {}, restricting each side with its own",
                    i,
                    i + 1,
                    dims[i],
                    dims[i + 1]
                );
            }
            let zz = population_difference(dims[i])?.tensor(&population_difference(dims[i + 1])?);
            let operator = zz.scale(zz_coefficient(&self.params, i) / 2.0);
            let targets = vec![i, i + 1];
            check_operator_dims(&operator, &targets, dims)?;
            systematic.add_coherent_noise(operator, targets, None, Coefficient::Constant)?;
        }
        Ok(NoiseOutcome::PulsesAndSystematic(pulses.to_vec(), systematic))
    }

    fn name(&self) -> &str {
        "zz_crosstalk"
    }
}

// ============================================================================
// Tests
// ============================================================================
