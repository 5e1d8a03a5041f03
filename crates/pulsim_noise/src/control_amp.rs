//! Control-amplitude noise for PULSIM
//!
//! Gantree: L3_Noise → ControlAmpNoise
//!
//! Perturbs the amplitude of selected control pulses by adding a coherent
//! term with the pulse's own generator. The accumulator is not touched.

use crate::noise::{Noise, NoiseOutcome};
use pulsim_core::{PulsimError, PulsimResult, TimeList};
use pulsim_pulse::{Coefficient, Pulse};
use serde::{Deserialize, Serialize};

/// Amplitude perturbation
/// Gantree: AmpCoefficient // 진폭 계수
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmpCoefficient {
    /// Multiply the pulse's coefficient by a factor
    Scale(f64),
    /// Replace the coefficient by explicit samples
    Samples(Vec<f64>),
}

/// Noise in the amplitude of control pulses
/// Gantree: ControlAmpNoise // 제어 진폭 노이즈
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlAmpNoise {
    /// Perturbation
    coeff: AmpCoefficient,

    /// Time grid override, the pulse's own grid when absent
    tlist: Option<TimeList>,

    /// Indices of target pulses, all pulses when absent
    /// Gantree: indices: Option<Vec<usize>> // 대상 펄스
    indices: Option<Vec<usize>>,
}

impl ControlAmpNoise {
    /// Create control-amplitude noise on all pulses
    pub fn new(coeff: AmpCoefficient) -> Self {
        Self {
            coeff,
            tlist: None,
            indices: None,
        }
    }

    /// Scale every targeted pulse by `factor`
    pub fn scale(factor: f64) -> Self {
        Self::new(AmpCoefficient::Scale(factor))
    }

    /// Override the time grid
    pub fn with_tlist(mut self, tlist: TimeList) -> Self {
        self.tlist = Some(tlist);
        self
    }

    /// Restrict to some pulses
    pub fn with_indices(mut self, indices: Vec<usize>) -> Self {
        self.indices = Some(indices);
        self
    }
}

impl Noise for ControlAmpNoise {
    fn get_noisy_pulses(
        &self,
        _dims: &[usize],
        pulses: &[Pulse],
        _systematic_noise: &Pulse,
    ) -> PulsimResult<NoiseOutcome> {
        let mut noisy = pulses.to_vec();
        for i in resolve_indices(self.indices.as_deref(), noisy.len())? {
            add_amplitude_noise(&mut noisy[i], &self.coeff, self.tlist.as_deref())?;
        }
        Ok(NoiseOutcome::Pulses(noisy))
    }

    fn name(&self) -> &str {
        "control_amp"
    }
}

/// Selected pulse indices, all pulses when absent
pub(crate) fn resolve_indices(indices: Option<&[usize]>, len: usize) -> PulsimResult<Vec<usize>> {
    match indices {
        None => Ok((0..len).collect()),
        Some(indices) => {
            if let Some(&index) = indices.iter().find(|&&i| i >= len) {
                return Err(PulsimError::PulseIndexOutOfRange { index, len });
            }
            Ok(indices.to_vec())
        }
    }
}

/// Add a coherent amplitude perturbation with the pulse's own generator
/// Gantree: add_amplitude_noise(&mut pulse,coeff,tlist) -> Result // 결맞음 진폭항
pub(crate) fn add_amplitude_noise(
    pulse: &mut Pulse,
    coeff: &AmpCoefficient,
    tlist: Option<&[f64]>,
) -> PulsimResult<()> {
    let ideal = pulse
        .ideal()
        .ok_or_else(|| PulsimError::MissingIdealTerm(pulse.label().to_string()))?;

    let (operator, coeff) = match (coeff, ideal.coeff()) {
        (AmpCoefficient::Scale(s), Coefficient::Samples(values)) => (
            ideal.operator().clone(),
            Coefficient::Samples(values.iter().map(|c| c * s).collect()),
        ),
        // a static control has no samples to scale
        (AmpCoefficient::Scale(s), Coefficient::Constant) => {
            (ideal.operator().scale(*s), Coefficient::Constant)
        }
        (AmpCoefficient::Samples(values), _) => {
            (ideal.operator().clone(), Coefficient::Samples(values.clone()))
        }
    };
    let tlist = tlist.or_else(|| ideal.tlist()).map(<[f64]>::to_vec);
    let targets = ideal.targets().to_vec();

    pulse.add_coherent_noise(operator, targets, tlist, coeff)
}

// ============================================================================
// Tests
// ============================================================================
