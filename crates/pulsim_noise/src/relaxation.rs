//! T1/T2 relaxation noise for PULSIM
//!
//! Gantree: L3_Noise → RelaxationNoise
//!
//! Amplitude damping and dephasing on every qubit, characterized by the
//! two time scales T1 and T2. Contributes collapse operators to the
//! systematic-noise accumulator only.

use crate::noise::{Noise, NoiseOutcome};
use pulsim_core::{check_targets, Operator, PulsimError, PulsimResult, QubitId};
use pulsim_pulse::{Coefficient, Pulse};
use serde::{Deserialize, Serialize};

// ============================================================================
// RelaxationTime
// ============================================================================

/// Relaxation time for every qubit, or one per qubit
/// Gantree: RelaxationTime // 이완 시간
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RelaxationTime {
    /// Same value broadcast to all qubits
    Uniform(f64),
    /// One entry per qubit, `None` where the qubit does not relax
    PerQubit(Vec<Option<f64>>),
}

impl From<f64> for RelaxationTime {
    fn from(t: f64) -> Self {
        RelaxationTime::Uniform(t)
    }
}

impl From<Vec<f64>> for RelaxationTime {
    fn from(times: Vec<f64>) -> Self {
        RelaxationTime::PerQubit(times.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<f64>>> for RelaxationTime {
    fn from(times: Vec<Option<f64>>) -> Self {
        RelaxationTime::PerQubit(times)
    }
}

/// Broadcast a relaxation time to `num_qubits` entries
/// Gantree: broadcast_relaxation_time(T,name,N) -> Result<Vec<Option<f64>>> // 브로드캐스트+검증
pub fn broadcast_relaxation_time(
    time: Option<&RelaxationTime>,
    name: &'static str,
    num_qubits: usize,
) -> PulsimResult<Vec<Option<f64>>> {
    let check = |value: f64| {
        // NaN fails this comparison as well
        if value > 0.0 {
            Ok(value)
        } else {
            Err(PulsimError::InvalidRelaxationTime { name, value })
        }
    };

    match time {
        None => Ok(vec![None; num_qubits]),
        Some(RelaxationTime::Uniform(t)) => Ok(vec![Some(check(*t)?); num_qubits]),
        Some(RelaxationTime::PerQubit(times)) => {
            if times.len() != num_qubits {
                return Err(PulsimError::RelaxationLengthMismatch {
                    name,
                    len: times.len(),
                    num_qubits,
                });
            }
            times.iter().map(|t| t.map(check).transpose()).collect()
        }
    }
}

/// Effective pure-dephasing time keeping total dephasing at `exp(-t/T2)`
/// Gantree: effective_t2(t1,t2) -> Result<f64> // 1/T2_eff = 1/T2 - 1/(2T1)
///
/// Returns infinity when `2*T1 == T2` (no pure dephasing left).
pub fn effective_t2(t1: Option<f64>, t2: f64) -> PulsimResult<f64> {
    match t1 {
        Some(t1) => {
            if 2.0 * t1 < t2 {
                return Err(PulsimError::InvalidT2 { t1, t2 });
            }
            Ok(1.0 / (1.0 / t2 - 1.0 / (2.0 * t1)))
        }
        None => Ok(t2),
    }
}

// ============================================================================
// RelaxationNoise
// ============================================================================

/// Decoherence on each qubit characterized by T1 and T2
/// Gantree: RelaxationNoise // T1/T2 노이즈
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelaxationNoise {
    /// Amplitude damping time
    /// Gantree: t1: Option<RelaxationTime> // T1
    t1: Option<RelaxationTime>,

    /// Dephasing time
    /// Gantree: t2: Option<RelaxationTime> // T2
    t2: Option<RelaxationTime>,

    /// Qubits acted on, all qubits when absent
    targets: Option<Vec<QubitId>>,
}

impl RelaxationNoise {
    /// Create relaxation noise from optional T1 and T2
    pub fn new(t1: Option<RelaxationTime>, t2: Option<RelaxationTime>) -> Self {
        Self {
            t1,
            t2,
            targets: None,
        }
    }

    /// Same T1 and T2 on every qubit
    pub fn uniform(t1: f64, t2: f64) -> Self {
        Self::new(Some(t1.into()), Some(t2.into()))
    }

    /// Restrict to a subset of qubits
    pub fn with_targets(mut self, targets: Vec<QubitId>) -> Self {
        self.targets = Some(targets);
        self
    }

    /// T1 setting
    pub fn t1(&self) -> Option<&RelaxationTime> {
        self.t1.as_ref()
    }

    /// T2 setting
    pub fn t2(&self) -> Option<&RelaxationTime> {
        self.t2.as_ref()
    }

    /// Collapse operators for one qubit of dimension `d`
    /// Gantree: collapse_operators(d,t1,t2) -> Result<Vec<Operator>> // 붕괴 연산자
    pub fn collapse_operators(d: usize, t1: Option<f64>, t2: Option<f64>) -> PulsimResult<Vec<Operator>> {
        let mut ops = Vec::with_capacity(2);
        if let Some(t1) = t1 {
            ops.push(Operator::destroy(d).scale(1.0 / t1.sqrt()));
        }
        if let Some(t2) = t2 {
            let t2_eff = effective_t2(t1, t2)?;
            ops.push(Operator::num(d).scale(2.0 / (2.0 * t2_eff).sqrt()));
        }
        Ok(ops)
    }
}

impl Noise for RelaxationNoise {
    fn get_noisy_pulses(
        &self,
        dims: &[usize],
        pulses: &[Pulse],
        systematic_noise: &Pulse,
    ) -> PulsimResult<NoiseOutcome> {
        let n = dims.len();
        let t1 = broadcast_relaxation_time(self.t1.as_ref(), "t1", n)?;
        let t2 = broadcast_relaxation_time(self.t2.as_ref(), "t2", n)?;

        let targets: Vec<QubitId> = match &self.targets {
            Some(targets) => targets.clone(),
            None => (0..n).collect(),
        };
        check_targets(&targets, n)?;

        let mut systematic = systematic_noise.clone();
        for q in targets {
            for op in Self::collapse_operators(dims[q], t1[q], t2[q])? {
                systematic.add_lindblad_noise(op, vec![q], None, Coefficient::Constant)?;
            }
        }

        Ok(NoiseOutcome::PulsesAndSystematic(pulses.to_vec(), systematic))
    }

    fn is_device_noise(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "relaxation"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn apply(noise: &RelaxationNoise, dims: &[usize]) -> PulsimResult<Pulse> {
        match noise.get_noisy_pulses(dims, &[], &Pulse::systematic(None))? {
            NoiseOutcome::PulsesAndSystematic(_, systematic) => Ok(systematic),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_broadcast_scalar() {
        let t = broadcast_relaxation_time(Some(&RelaxationTime::Uniform(5.0)), "t1", 3).unwrap();
        assert_eq!(t, vec![Some(5.0); 3]);
        assert_eq!(broadcast_relaxation_time(None, "t1", 2).unwrap(), vec![None, None]);
    }

    #[test]
    fn test_broadcast_length_mismatch() {
        let t = RelaxationTime::from(vec![1.0_f64, 2.0]);
        let err = broadcast_relaxation_time(Some(&t), "t2", 3).unwrap_err();
        assert_eq!(
            err,
            PulsimError::RelaxationLengthMismatch {
                name: "t2",
                len: 2,
                num_qubits: 3
            }
        );
    }

    #[test]
    fn test_broadcast_rejects_non_positive() {
        assert!(broadcast_relaxation_time(Some(&RelaxationTime::Uniform(0.0)), "t1", 1).is_err());
        assert!(broadcast_relaxation_time(Some(&RelaxationTime::Uniform(-1.0)), "t1", 1).is_err());
        let per_qubit = RelaxationTime::PerQubit(vec![Some(1.0), Some(-2.0)]);
        assert!(broadcast_relaxation_time(Some(&per_qubit), "t1", 2).is_err());
    }

    #[test]
    fn test_no_times_no_terms() {
        let acc = apply(&RelaxationNoise::default(), &[2, 2, 2]).unwrap();
        assert!(acc.lindblad_noise().is_empty());
        assert!(acc.coherent_noise().is_empty());
    }

    #[test]
    fn test_t1_only_three_qubits() {
        let noise = RelaxationNoise::new(Some(RelaxationTime::Uniform(1.0)), None);
        let acc = apply(&noise, &[2, 2, 2]).unwrap();

        assert_eq!(acc.lindblad_noise().len(), 3);
        let expected = Operator::destroy(2).scale(1.0 / 1.0_f64.sqrt());
        for (q, term) in acc.lindblad_noise().iter().enumerate() {
            assert_eq!(term.targets(), &[q]);
            assert!(term.is_constant());
            assert!(term.operator().approx_eq(&expected, 1e-12));
        }
    }

    #[test]
    fn test_t2_exceeding_twice_t1_fails() {
        let noise = RelaxationNoise::uniform(1.0, 3.0);
        assert_eq!(
            apply(&noise, &[2]).unwrap_err(),
            PulsimError::InvalidT2 { t1: 1.0, t2: 3.0 }
        );
    }

    #[test]
    fn test_effective_dephasing() {
        let t2_eff = effective_t2(Some(2.0), 1.0).unwrap();
        assert_relative_eq!(t2_eff, 4.0 / 3.0, epsilon = 1e-12);

        let acc = apply(&RelaxationNoise::uniform(2.0, 1.0), &[2]).unwrap();
        assert_eq!(acc.lindblad_noise().len(), 2);

        let amplitude = Operator::destroy(2).scale(1.0 / 2.0_f64.sqrt());
        let dephasing = Operator::num(2).scale(2.0 / (2.0 * 4.0 / 3.0_f64).sqrt());
        assert!(acc.lindblad_noise()[0].operator().approx_eq(&amplitude, 1e-12));
        assert!(acc.lindblad_noise()[1].operator().approx_eq(&dephasing, 1e-12));
    }

    #[test]
    fn test_t2_without_t1() {
        let acc = apply(&RelaxationNoise::new(None, Some(RelaxationTime::Uniform(2.0))), &[3]).unwrap();
        assert_eq!(acc.lindblad_noise().len(), 1);
        let expected = Operator::num(3).scale(2.0 / 4.0_f64.sqrt());
        assert!(acc.lindblad_noise()[0].operator().approx_eq(&expected, 1e-12));
    }

    #[test]
    fn test_limit_two_t1_equals_t2() {
        // pure dephasing rate vanishes
        let ops = RelaxationNoise::collapse_operators(2, Some(1.0), Some(2.0)).unwrap();
        assert_eq!(ops.len(), 2);
        assert!(ops[1].is_zero());
    }

    #[test]
    fn test_per_qubit_with_gaps_and_targets() {
        let noise = RelaxationNoise::new(
            Some(RelaxationTime::PerQubit(vec![Some(10.0), None, Some(30.0)])),
            None,
        )
        .with_targets(vec![1, 2]);
        let acc = apply(&noise, &[2, 2, 2]).unwrap();

        // qubit 0 not targeted, qubit 1 has no T1
        assert_eq!(acc.lindblad_noise().len(), 1);
        assert_eq!(acc.lindblad_noise()[0].targets(), &[2]);
    }

    #[test]
    fn test_target_out_of_range() {
        let noise = RelaxationNoise::uniform(1.0, 1.0).with_targets(vec![4]);
        assert!(matches!(
            apply(&noise, &[2, 2]),
            Err(PulsimError::QubitOutOfRange { qubit: 4, .. })
        ));
    }

    #[test]
    fn test_is_device_noise() {
        assert!(RelaxationNoise::default().is_device_noise());
    }

    #[test]
    fn test_relaxation_time_json() {
        let uniform: RelaxationTime = serde_json::from_str("25.0").unwrap();
        assert_eq!(uniform, RelaxationTime::Uniform(25.0));
        let per_qubit: RelaxationTime = serde_json::from_str("[10.0, null]").unwrap();
        assert_eq!(per_qubit, RelaxationTime::PerQubit(vec![Some(10.0), None]));
    }
}
