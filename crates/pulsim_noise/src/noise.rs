//! Noise-source interface for PULSIM
//!
//! Gantree: L3_Noise → Noise
//!
//! Every noise source implements one operation: given the subsystem
//! dimensions, the current pulses and the systematic-noise accumulator,
//! return a tagged [`NoiseOutcome`]. Inputs are borrowed and outputs are
//! fresh values, so a source can never keep hold of the fold state.

use pulsim_core::{Operator, PulsimError, PulsimResult, QubitId};
use pulsim_pulse::Pulse;

// ============================================================================
// NoiseOutcome
// ============================================================================

/// Result of applying one noise source
/// Gantree: NoiseOutcome // 태그 결과
#[derive(Debug, Clone, PartialEq)]
pub enum NoiseOutcome {
    /// Nothing was modified
    Unchanged,
    /// New pulses, accumulator untouched
    Pulses(Vec<Pulse>),
    /// New pulses and a new accumulator
    PulsesAndSystematic(Vec<Pulse>, Pulse),
}

// ============================================================================
// Noise Trait
// ============================================================================

/// A physical noise mechanism that can be composed into the pipeline
/// Gantree: Noise // trait
pub trait Noise {
    /// Add this noise to the pulses and/or the systematic-noise accumulator
    /// Gantree: get_noisy_pulses(dims,pulses,sys) -> Result<NoiseOutcome>
    fn get_noisy_pulses(
        &self,
        dims: &[usize],
        pulses: &[Pulse],
        systematic_noise: &Pulse,
    ) -> PulsimResult<NoiseOutcome>;

    /// Pulse-independent device noise, only applied on request
    fn is_device_noise(&self) -> bool {
        false
    }

    /// Short name used in log output and error messages
    fn name(&self) -> &str {
        "noise"
    }
}

/// Apply one noise source and hand back the next fold state
/// Gantree: apply_noise(noise,dims,pulses,sys) -> Result<(pulses,sys)> // 결과 정규화
pub fn apply_noise(
    noise: &dyn Noise,
    dims: &[usize],
    pulses: Vec<Pulse>,
    systematic_noise: Pulse,
) -> PulsimResult<(Vec<Pulse>, Pulse)> {
    match noise.get_noisy_pulses(dims, &pulses, &systematic_noise)? {
        NoiseOutcome::Unchanged => Ok((pulses, systematic_noise)),
        NoiseOutcome::Pulses(noisy) => {
            check_pulse_count(noise, pulses.len(), noisy.len())?;
            Ok((noisy, systematic_noise))
        }
        NoiseOutcome::PulsesAndSystematic(noisy, systematic) => {
            check_pulse_count(noise, pulses.len(), noisy.len())?;
            if !systematic.is_systematic() {
                return Err(PulsimError::MalformedNoiseOutput {
                    source_name: noise.name().to_string(),
                    reason: format!(
                        "accumulator '{}' carries an ideal control term",
                        systematic.label()
                    ),
                });
            }
            Ok((noisy, systematic))
        }
    }
}

fn check_pulse_count(noise: &dyn Noise, expected: usize, got: usize) -> PulsimResult<()> {
    if expected != got {
        return Err(PulsimError::MalformedNoiseOutput {
            source_name: noise.name().to_string(),
            reason: format!("expected {} pulses, got {}", expected, got),
        });
    }
    Ok(())
}

/// Check that an operator fits the subsystems it is placed on
pub(crate) fn check_operator_dims(
    operator: &Operator,
    targets: &[QubitId],
    dims: &[usize],
) -> PulsimResult<()> {
    pulsim_core::check_targets(targets, dims.len())?;
    let target_dims: Vec<usize> = targets.iter().map(|&q| dims[q]).collect();
    if operator.dims() != target_dims.as_slice() {
        return Err(PulsimError::DimensionMismatch(format!(
            "operator dims {:?} do not match target dims {:?} on {:?}",
            operator.dims(),
            target_dims,
            targets
        )));
    }
    Ok(())
}

// ============================================================================
// Legacy Hook
// ============================================================================

/// Custom noise written against the old `get_noisy_dynamics` hook
/// Gantree: LegacyNoise // 구 인터페이스
pub trait LegacyNoise {
    /// Same contract as [`Noise::get_noisy_pulses`]
    fn get_noisy_dynamics(
        &self,
        dims: &[usize],
        pulses: &[Pulse],
        systematic_noise: &Pulse,
    ) -> PulsimResult<NoiseOutcome>;

    /// Short name used in log output
    fn name(&self) -> &str {
        "legacy noise"
    }
}

/// Wraps a [`LegacyNoise`] so it can join the pipeline
/// Gantree: LegacyNoiseAdapter // 호환 어댑터
///
/// Construction logs a deprecation warning once.
#[derive(Debug, Clone)]
pub struct LegacyNoiseAdapter<N> {
    inner: N,
}

impl<N: LegacyNoise> LegacyNoiseAdapter<N> {
    /// Wrap a legacy noise source
    pub fn new(inner: N) -> Self {
        log::warn!(
            "Using get_noisy_dynamics as the hook function for custom noise ('{}') will be deprecated, please implement Noise::get_noisy_pulses instead",
            inner.name()
        );
        Self { inner }
    }
}

impl<N: LegacyNoise> Noise for LegacyNoiseAdapter<N> {
    fn get_noisy_pulses(
        &self,
        dims: &[usize],
        pulses: &[Pulse],
        systematic_noise: &Pulse,
    ) -> PulsimResult<NoiseOutcome> {
        self.inner.get_noisy_dynamics(dims, pulses, systematic_noise)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pulsim_pulse::Coefficient;

    fn pulses() -> Vec<Pulse> {
        vec![Pulse::new(
            "x0",
            Operator::sigmax(),
            vec![0],
            Some(vec![0.0, 1.0]),
            Coefficient::Samples(vec![1.0, 1.0]),
        )
        .unwrap()]
    }

    struct Silent;

    impl Noise for Silent {
        fn get_noisy_pulses(
            &self,
            _dims: &[usize],
            _pulses: &[Pulse],
            _systematic_noise: &Pulse,
        ) -> PulsimResult<NoiseOutcome> {
            Ok(NoiseOutcome::Unchanged)
        }
    }

    struct DropsPulses;

    impl Noise for DropsPulses {
        fn get_noisy_pulses(
            &self,
            _dims: &[usize],
            _pulses: &[Pulse],
            _systematic_noise: &Pulse,
        ) -> PulsimResult<NoiseOutcome> {
            Ok(NoiseOutcome::Pulses(Vec::new()))
        }

        fn name(&self) -> &str {
            "drops_pulses"
        }
    }

    struct OldStyle;

    impl LegacyNoise for OldStyle {
        fn get_noisy_dynamics(
            &self,
            _dims: &[usize],
            pulses: &[Pulse],
            systematic_noise: &Pulse,
        ) -> PulsimResult<NoiseOutcome> {
            let mut systematic = systematic_noise.clone();
            systematic.add_lindblad_noise(
                Operator::sigmaz(),
                vec![0],
                None,
                Coefficient::Constant,
            )?;
            Ok(NoiseOutcome::PulsesAndSystematic(pulses.to_vec(), systematic))
        }
    }

    #[test]
    fn test_unchanged_keeps_state() {
        let (noisy, acc) = apply_noise(&Silent, &[2], pulses(), Pulse::systematic(None)).unwrap();
        assert_eq!(noisy, pulses());
        assert!(!acc.has_noise());
        assert!(!Silent.is_device_noise());
        assert_eq!(Silent.name(), "noise");
    }

    #[test]
    fn test_wrong_pulse_count_is_malformed() {
        let result = apply_noise(&DropsPulses, &[2], pulses(), Pulse::systematic(None));
        match result {
            Err(PulsimError::MalformedNoiseOutput { source_name, .. }) => {
                assert_eq!(source_name, "drops_pulses")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_legacy_adapter_delegates() {
        let adapter = LegacyNoiseAdapter::new(OldStyle);
        assert_eq!(adapter.name(), "legacy noise");
        let (noisy, acc) = apply_noise(&adapter, &[2], pulses(), Pulse::systematic(None)).unwrap();
        assert_eq!(noisy.len(), 1);
        assert_eq!(acc.lindblad_noise().len(), 1);
    }

    #[test]
    fn test_accumulator_must_stay_systematic() {
        struct ReplacesAccumulator;
        impl Noise for ReplacesAccumulator {
            fn get_noisy_pulses(
                &self,
                _dims: &[usize],
                pulses: &[Pulse],
                _systematic_noise: &Pulse,
            ) -> PulsimResult<NoiseOutcome> {
                Ok(NoiseOutcome::PulsesAndSystematic(
                    pulses.to_vec(),
                    pulses[0].clone(),
                ))
            }
        }

        let result = apply_noise(&ReplacesAccumulator, &[2], pulses(), Pulse::systematic(None));
        assert!(matches!(
            result,
            Err(PulsimError::MalformedNoiseOutput { .. })
        ));
    }

    #[test]
    fn test_check_operator_dims() {
        assert!(check_operator_dims(&Operator::destroy(3), &[1], &[2, 3]).is_ok());
        assert!(matches!(
            check_operator_dims(&Operator::destroy(2), &[1], &[2, 3]),
            Err(PulsimError::DimensionMismatch(_))
        ));
        assert!(matches!(
            check_operator_dims(&Operator::destroy(2), &[2], &[2, 3]),
            Err(PulsimError::QubitOutOfRange { .. })
        ));
    }
}
