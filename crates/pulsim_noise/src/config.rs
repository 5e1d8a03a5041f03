//! Pipeline configuration for PULSIM
//!
//! Gantree: L4_Integration → ProcessOptions, NoiseSpec
//!
//! `ProcessOptions` carries the per-call settings of [`process_noise`];
//! `NoiseSpec` is a serializable description of a noise source that can be
//! built into a `Box<dyn Noise>`.
//!
//! [`process_noise`]: crate::process::process_noise

use crate::control_amp::{AmpCoefficient, ControlAmpNoise};
use crate::crosstalk::{CrossTalkParams, ZzCrossTalk};
use crate::noise::Noise;
use crate::random::{DrawKind, DrawParams, RandomNoise, SeededDraw};
use crate::relaxation::{broadcast_relaxation_time, effective_t2, RelaxationNoise, RelaxationTime};
use pulsim_core::{PulsimResult, QubitId, SystemDims, TimeList};
use pulsim_pulse::SplineKind;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ProcessOptions
// ============================================================================

/// Settings of one noise-processing call
/// Gantree: ProcessOptions // 처리 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessOptions {
    /// Qubit count or per-subsystem dimensions
    pub dims: SystemDims,

    /// Global amplitude damping time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t1: Option<RelaxationTime>,

    /// Global dephasing time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t2: Option<RelaxationTime>,

    /// Include pulse-independent noise and return the accumulator
    #[serde(default)]
    pub device_noise: bool,

    /// Interpolation hint for the accumulator pulse
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spline_kind: Option<SplineKind>,
}

impl ProcessOptions {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// No T1/T2, device noise off, no interpolation hint
    pub fn new(dims: impl Into<SystemDims>) -> Self {
        Self {
            dims: dims.into(),
            t1: None,
            t2: None,
            device_noise: false,
            spline_kind: None,
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    /// Set global T1
    pub fn with_t1(mut self, t1: impl Into<RelaxationTime>) -> Self {
        self.t1 = Some(t1.into());
        self
    }

    /// Set global T2
    pub fn with_t2(mut self, t2: impl Into<RelaxationTime>) -> Self {
        self.t2 = Some(t2.into());
        self
    }

    /// Enable or disable device noise
    pub fn with_device_noise(mut self, enabled: bool) -> Self {
        self.device_noise = enabled;
        self
    }

    /// Set the accumulator interpolation hint
    pub fn with_spline_kind(mut self, kind: SplineKind) -> Self {
        self.spline_kind = Some(kind);
        self
    }

    // ========================================================================
    // Derived Values
    // ========================================================================

    /// Relaxation source implied by the T1/T2 shortcuts
    /// Gantree: implicit_relaxation() -> Option<RelaxationNoise> // 암묵 T1/T2
    pub fn implicit_relaxation(&self) -> Option<RelaxationNoise> {
        if self.t1.is_none() && self.t2.is_none() {
            return None;
        }
        Some(RelaxationNoise::new(self.t1.clone(), self.t2.clone()))
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Validate dimensions and relaxation times
    pub fn validate(&self) -> PulsimResult<()> {
        let n = self.dims.resolve()?.len();
        let t1 = broadcast_relaxation_time(self.t1.as_ref(), "t1", n)?;
        let t2 = broadcast_relaxation_time(self.t2.as_ref(), "t2", n)?;
        for (t1, t2) in t1.into_iter().zip(t2) {
            if let Some(t2) = t2 {
                effective_t2(t1, t2)?;
            }
        }
        Ok(())
    }

    // ========================================================================
    // Serialization
    // ========================================================================

    /// Load from JSON
    pub fn from_json(json: &str) -> PulsimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save to JSON
    pub fn to_json(&self) -> PulsimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ProcessOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProcessOptions(dims={}, t1={}, t2={}, device_noise={})",
            self.dims,
            self.t1.is_some(),
            self.t2.is_some(),
            self.device_noise
        )
    }
}

// ============================================================================
// NoiseSpec
// ============================================================================

/// Serializable description of a noise source
/// Gantree: NoiseSpec // 노이즈 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NoiseSpec {
    /// T1/T2 relaxation
    Relaxation {
        /// Amplitude damping time
        #[serde(default)]
        t1: Option<RelaxationTime>,
        /// Dephasing time
        #[serde(default)]
        t2: Option<RelaxationTime>,
        /// Qubits acted on
        #[serde(default)]
        targets: Option<Vec<QubitId>>,
    },

    /// Control-amplitude noise
    ControlAmp {
        /// Scale factor or replacement samples
        coeff: AmpCoefficient,
        /// Time grid override
        #[serde(default)]
        tlist: Option<TimeList>,
        /// Target pulses
        #[serde(default)]
        indices: Option<Vec<usize>>,
    },

    /// Random amplitude noise from a built-in distribution
    Random {
        /// Step of the noise time grid
        dt: f64,
        /// Distribution
        #[serde(default)]
        distribution: DrawKind,
        /// Distribution parameters
        #[serde(default)]
        params: DrawParams,
        /// Seed for reproducible draws
        #[serde(default)]
        seed: Option<u64>,
        /// Target pulses
        #[serde(default)]
        indices: Option<Vec<usize>>,
    },

    /// Always-on ZZ crosstalk
    ZzCrossTalk {
        /// Device parameters
        params: CrossTalkParams,
    },
}

impl NoiseSpec {
    /// Build the described noise source
    /// Gantree: build() -> Result<Box<dyn Noise>> // 설정 → 노이즈
    pub fn build(&self) -> PulsimResult<Box<dyn Noise>> {
        let noise: Box<dyn Noise> = match self {
            NoiseSpec::Relaxation { t1, t2, targets } => {
                let mut noise = RelaxationNoise::new(t1.clone(), t2.clone());
                if let Some(targets) = targets {
                    noise = noise.with_targets(targets.clone());
                }
                Box::new(noise)
            }
            NoiseSpec::ControlAmp {
                coeff,
                tlist,
                indices,
            } => {
                let mut noise = ControlAmpNoise::new(coeff.clone());
                if let Some(tlist) = tlist {
                    noise = noise.with_tlist(tlist.clone());
                }
                if let Some(indices) = indices {
                    noise = noise.with_indices(indices.clone());
                }
                Box::new(noise)
            }
            NoiseSpec::Random {
                dt,
                distribution,
                params,
                seed,
                indices,
            } => {
                let draw = Box::new(SeededDraw::new(*distribution, *seed));
                let mut noise = RandomNoise::new(*dt, draw, params.clone())?;
                if let Some(indices) = indices {
                    noise = noise.with_indices(indices.clone());
                }
                Box::new(noise)
            }
            NoiseSpec::ZzCrossTalk { params } => Box::new(ZzCrossTalk::new(params.clone())),
        };
        Ok(noise)
    }

    /// Build every source in order
    pub fn build_all(specs: &[NoiseSpec]) -> PulsimResult<Vec<Box<dyn Noise>>> {
        specs.iter().map(NoiseSpec::build).collect()
    }

    /// Load a list of sources from JSON
    pub fn list_from_json(json: &str) -> PulsimResult<Vec<NoiseSpec>> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
