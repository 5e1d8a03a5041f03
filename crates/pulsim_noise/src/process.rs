//! Noise pipeline for PULSIM
//!
//! Gantree: L4_Integration → process_noise
//!
//! Folds an ordered list of noise sources over a copy of the caller's
//! pulses and a fresh systematic-noise accumulator.

use crate::config::{NoiseSpec, ProcessOptions};
use crate::noise::{apply_noise, Noise};
use pulsim_core::PulsimResult;
use pulsim_pulse::Pulse;

/// Apply every noise source to a copy of `pulses`
/// Gantree: process_noise(pulses,noise_list,options) -> Result<Vec<Pulse>> // 폴드
///
/// The caller's pulses are never modified. Sources run in the given order,
/// followed by the implicit relaxation source when T1 or T2 is set.
/// Device-noise sources are skipped unless `options.device_noise` is set, in
/// which case T1/T2 are validated and the accumulator is appended as one
/// extra pulse.
pub fn process_noise(
    pulses: &[Pulse],
    noise_list: &[Box<dyn Noise>],
    options: &ProcessOptions,
) -> PulsimResult<Vec<Pulse>> {
    let dims = options.dims.resolve()?;
    if options.device_noise {
        options.validate()?;
    }

    let implicit = options.implicit_relaxation();
    let mut sources: Vec<&dyn Noise> = noise_list.iter().map(|noise| &**noise).collect();
    if let Some(relaxation) = &implicit {
        sources.push(relaxation);
    }

    let mut noisy_pulses = pulses.to_vec();
    let mut systematic_noise = Pulse::systematic(options.spline_kind);

    for noise in sources {
        if noise.is_device_noise() && !options.device_noise {
            log::debug!("skipping device noise '{}'", noise.name());
            continue;
        }
        log::debug!("applying noise '{}'", noise.name());
        (noisy_pulses, systematic_noise) = apply_noise(noise, &dims, noisy_pulses, systematic_noise)?;
    }

    if options.device_noise {
        log::trace!(
            "systematic noise: {} coherent, {} lindblad terms",
            systematic_noise.coherent_noise().len(),
            systematic_noise.lindblad_noise().len()
        );
        noisy_pulses.push(systematic_noise);
    }
    Ok(noisy_pulses)
}

// ============================================================================
// NoiseProcessor
// ============================================================================

/// Reusable pairing of options and noise sources
/// Gantree: NoiseProcessor // 설정+노이즈 묶음
pub struct NoiseProcessor {
    options: ProcessOptions,
    noise_list: Vec<Box<dyn Noise>>,
}

impl NoiseProcessor {
    /// Processor with no noise sources
    pub fn new(options: ProcessOptions) -> Self {
        Self {
            options,
            noise_list: Vec::new(),
        }
    }

    /// Processor built from serialized source descriptions
    pub fn from_specs(options: ProcessOptions, specs: &[NoiseSpec]) -> PulsimResult<Self> {
        Ok(Self {
            options,
            noise_list: NoiseSpec::build_all(specs)?,
        })
    }

    /// Append a noise source
    pub fn add_noise(&mut self, noise: Box<dyn Noise>) {
        self.noise_list.push(noise);
    }

    /// Append a noise source, builder style
    pub fn with_noise(mut self, noise: impl Noise + 'static) -> Self {
        self.noise_list.push(Box::new(noise));
        self
    }

    /// Options in use
    pub fn options(&self) -> &ProcessOptions {
        &self.options
    }

    /// Number of explicit noise sources
    pub fn num_sources(&self) -> usize {
        self.noise_list.len()
    }

    /// Run the pipeline on `pulses`
    pub fn process(&self, pulses: &[Pulse]) -> PulsimResult<Vec<Pulse>> {
        process_noise(pulses, &self.noise_list, &self.options)
    }
}

impl std::fmt::Debug for NoiseProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.noise_list.iter().map(|noise| noise.name()).collect();
        f.debug_struct("NoiseProcessor")
            .field("options", &self.options)
            .field("noise_list", &names)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
