//! Random amplitude noise for PULSIM
//!
//! Gantree: L3_Noise → RandomNoise
//!
//! Control-amplitude noise whose coefficient is drawn from a random
//! distribution on a shared time grid. The sampler is injected through
//! the [`RandomDraw`] trait so tests can substitute a deterministic fake.

use crate::control_amp::{add_amplitude_noise, resolve_indices, AmpCoefficient};
use crate::noise::{Noise, NoiseOutcome};
use pulsim_core::random::{
    DEFAULT_HIGH, DEFAULT_LOC, DEFAULT_LOW, DEFAULT_SCALE, MAX_GRID_POINTS, RESERVED_SIZE_KEY,
};
use pulsim_core::{PulsimError, PulsimResult, TimeList};
use pulsim_pulse::Pulse;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;

/// Named parameters passed to a draw function
pub type DrawParams = BTreeMap<String, f64>;

// ============================================================================
// RandomDraw
// ============================================================================

/// Source of random coefficient samples
/// Gantree: RandomDraw // trait
pub trait RandomDraw {
    /// Draw `size` samples using the named parameters
    fn draw(&self, params: &DrawParams, size: usize) -> PulsimResult<Vec<f64>>;
}

impl<F> RandomDraw for F
where
    F: Fn(&DrawParams, usize) -> PulsimResult<Vec<f64>>,
{
    fn draw(&self, params: &DrawParams, size: usize) -> PulsimResult<Vec<f64>> {
        self(params, size)
    }
}

/// Built-in distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawKind {
    /// Gaussian with `loc` and `scale`
    #[default]
    Normal,
    /// Flat on `[low, high)`
    Uniform,
}

impl fmt::Display for DrawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawKind::Normal => write!(f, "normal"),
            DrawKind::Uniform => write!(f, "uniform"),
        }
    }
}

/// Seedable sampler for the built-in distributions
/// Gantree: SeededDraw // ChaCha8 샘플러
#[derive(Debug)]
pub struct SeededDraw {
    kind: DrawKind,
    rng: RefCell<ChaCha8Rng>,
}

impl SeededDraw {
    /// Create a sampler, seeded for reproducibility or from entropy
    pub fn new(kind: DrawKind, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            kind,
            rng: RefCell::new(rng),
        }
    }

    /// Normal sampler
    pub fn normal(seed: Option<u64>) -> Self {
        Self::new(DrawKind::Normal, seed)
    }

    /// Uniform sampler
    pub fn uniform(seed: Option<u64>) -> Self {
        Self::new(DrawKind::Uniform, seed)
    }

    /// Distribution kind
    pub fn kind(&self) -> DrawKind {
        self.kind
    }

    fn sample<D: Distribution<f64>>(&self, dist: D, size: usize) -> Vec<f64> {
        let mut rng = self.rng.borrow_mut();
        dist.sample_iter(&mut *rng).take(size).collect()
    }
}

impl RandomDraw for SeededDraw {
    fn draw(&self, params: &DrawParams, size: usize) -> PulsimResult<Vec<f64>> {
        let param = |key: &str, default: f64| params.get(key).copied().unwrap_or(default);
        match self.kind {
            DrawKind::Normal => {
                let loc = param("loc", DEFAULT_LOC);
                let scale = param("scale", DEFAULT_SCALE);
                // Normal::new accepts a negative std dev and mirrors it
                if scale < 0.0 {
                    return Err(PulsimError::InvalidArgument(format!(
                        "normal draw needs scale >= 0, got {}",
                        scale
                    )));
                }
                let dist = Normal::new(loc, scale).map_err(|e| {
                    PulsimError::InvalidArgument(format!(
                        "normal draw with loc={}, scale={}: {}",
                        loc, scale, e
                    ))
                })?;
                Ok(self.sample(dist, size))
            }
            DrawKind::Uniform => {
                let low = param("low", DEFAULT_LOW);
                let high = param("high", DEFAULT_HIGH);
                // Uniform::new panics on an empty or infinite range
                if low >= high || !(high - low).is_finite() {
                    return Err(PulsimError::InvalidArgument(format!(
                        "uniform draw needs finite low < high, got [{}, {})",
                        low, high
                    )));
                }
                Ok(self.sample(Uniform::new(low, high), size))
            }
        }
    }
}

// ============================================================================
// Time Grid
// ============================================================================

/// Earliest and latest time over every pulse that has a grid
/// Gantree: shared_span(pulses) -> Result<(t_min,t_max)> // 공통 시간 범위
pub fn shared_span(pulses: &[Pulse]) -> PulsimResult<(f64, f64)> {
    pulses
        .iter()
        .filter_map(Pulse::time_span)
        .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
        .ok_or_else(|| {
            PulsimError::MissingTimeGrid("random noise needs at least one sampled pulse".to_string())
        })
}

/// Evenly spaced grid from `t_min` with step `dt`, never past `t_max`
/// Gantree: sample_grid(t_min,t_max,dt) -> Result<TimeList> // floor((max-min)/dt)+1
///
/// Fails when the span or step is not finite, or when the grid would hold
/// more than [`MAX_GRID_POINTS`] points.
pub fn sample_grid(t_min: f64, t_max: f64, dt: f64) -> PulsimResult<TimeList> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(PulsimError::InvalidTimeStep(dt));
    }
    let steps = ((t_max - t_min) / dt).floor();
    if !steps.is_finite() || steps < 0.0 || steps >= MAX_GRID_POINTS as f64 {
        return Err(PulsimError::InvalidArgument(format!(
            "time grid on [{}, {}] with step {} exceeds {} points",
            t_min, t_max, dt, MAX_GRID_POINTS
        )));
    }
    let count = steps as usize + 1;
    Ok((0..count).map(|k| k as f64 * dt + t_min).collect())
}

// ============================================================================
// RandomNoise
// ============================================================================

/// Random amplitude noise on selected pulses
/// Gantree: RandomNoise // 랜덤 진폭 노이즈
pub struct RandomNoise {
    /// Step of the noise time grid
    dt: f64,

    /// Sampler
    draw: Box<dyn RandomDraw>,

    /// Sampler parameters, never containing the reserved size key
    params: DrawParams,

    /// Indices of target pulses, all pulses when absent
    indices: Option<Vec<usize>>,
}

impl RandomNoise {
    /// Create random noise with step `dt`
    /// Gantree: new(dt,draw,params) -> Result<Self> // size 예약어 검사
    pub fn new(dt: f64, draw: Box<dyn RandomDraw>, params: DrawParams) -> PulsimResult<Self> {
        if params.contains_key(RESERVED_SIZE_KEY) {
            return Err(PulsimError::ReservedParameter(RESERVED_SIZE_KEY.to_string()));
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(PulsimError::InvalidTimeStep(dt));
        }
        Ok(Self {
            dt,
            draw,
            params,
            indices: None,
        })
    }

    /// Restrict to some pulses
    pub fn with_indices(mut self, indices: Vec<usize>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Step of the noise time grid
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Sampler parameters
    pub fn params(&self) -> &DrawParams {
        &self.params
    }
}

impl fmt::Debug for RandomNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomNoise")
            .field("dt", &self.dt)
            .field("params", &self.params)
            .field("indices", &self.indices)
            .finish_non_exhaustive()
    }
}

impl Noise for RandomNoise {
    fn get_noisy_pulses(
        &self,
        _dims: &[usize],
        pulses: &[Pulse],
        _systematic_noise: &Pulse,
    ) -> PulsimResult<NoiseOutcome> {
        let indices = resolve_indices(self.indices.as_deref(), pulses.len())?;
        if indices.is_empty() {
            return Ok(NoiseOutcome::Unchanged);
        }

        let (t_min, t_max) = shared_span(pulses)?;
        let tlist = sample_grid(t_min, t_max, self.dt)?;
        log::trace!(
            "random noise grid: {} points on [{}, {}]",
            tlist.len(),
            t_min,
            t_max
        );

        let mut noisy = pulses.to_vec();
        for i in indices {
            let samples = self.draw.draw(&self.params, tlist.len())?;
            if samples.len() != tlist.len() {
                return Err(PulsimError::MalformedNoiseOutput {
                    source_name: self.name().to_string(),
                    reason: format!(
                        "draw returned {} samples for a grid of {}",
                        samples.len(),
                        tlist.len()
                    ),
                });
            }
            add_amplitude_noise(&mut noisy[i], &AmpCoefficient::Samples(samples), Some(&tlist))?;
        }
        Ok(NoiseOutcome::Pulses(noisy))
    }

    fn name(&self) -> &str {
        "random"
    }
}

// ============================================================================
// Tests
// ============================================================================
