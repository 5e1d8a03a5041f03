//! # PULSIM Noise
//!
//! Noise sources and the pipeline that folds them over control pulses.
//!
//! ## Gantree Architecture
//!
//! ```text
//! pulsim_noise // L3+L4: Noise + Integration (완료)
//!     L3_Noise // 노이즈 소스 (완료)
//!         Noise // trait, NoiseOutcome, apply_noise() (완료)
//!         LegacyNoise // get_noisy_dynamics 어댑터 (완료)
//!         DecoherenceNoise // 고정 붕괴 연산자 (완료)
//!         RelaxationNoise // T1/T2 (완료)
//!         ControlAmpNoise // 진폭 노이즈 (완료)
//!         RandomNoise // RandomDraw, SeededDraw (완료)
//!         ZzCrossTalk // ZZ 크로스토크 (완료)
//!     L4_Integration // 파이프라인 (완료)
//!         ProcessOptions, NoiseSpec // 설정 (완료)
//!         process_noise(), NoiseProcessor // 폴드 (완료)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use pulsim_noise::prelude::*;
//! use pulsim_core::{Operator, SystemDims};
//! use pulsim_pulse::{Coefficient, Pulse};
//!
//! let pulses = vec![Pulse::new(
//!     "sx0",
//!     Operator::sigmax(),
//!     vec![0],
//!     Some(vec![0.0, 1.0, 2.0]),
//!     Coefficient::Samples(vec![0.5, 0.5, 0.5]),
//! )
//! .unwrap()];
//!
//! let noise: Vec<Box<dyn Noise>> = vec![Box::new(ControlAmpNoise::scale(0.02))];
//! let options = ProcessOptions::new(SystemDims::Qubits(1))
//!     .with_t1(50.0)
//!     .with_device_noise(true);
//!
//! let noisy = process_noise(&pulses, &noise, &options).unwrap();
//! assert_eq!(noisy.len(), 2);
//! assert!(noisy[1].is_systematic());
//! ```
//!
//! ## Custom Noise
//!
//! ```rust
//! use pulsim_noise::prelude::*;
//! use pulsim_core::PulsimResult;
//! use pulsim_pulse::Pulse;
//!
//! struct Nothing;
//!
//! impl Noise for Nothing {
//!     fn get_noisy_pulses(
//!         &self,
//!         _dims: &[usize],
//!         _pulses: &[Pulse],
//!         _systematic_noise: &Pulse,
//!     ) -> PulsimResult<NoiseOutcome> {
//!         Ok(NoiseOutcome::Unchanged)
//!     }
//! }
//! ```

#![warn(missing_docs)]

// ============================================================================
// Module Declarations
// ============================================================================

/// Noise interface (Gantree: L3_Noise → Noise)
pub mod noise;

/// Fixed collapse operators (Gantree: L3_Noise → DecoherenceNoise)
pub mod decoherence;

/// T1/T2 relaxation (Gantree: L3_Noise → RelaxationNoise)
pub mod relaxation;

/// Control-amplitude noise (Gantree: L3_Noise → ControlAmpNoise)
pub mod control_amp;

/// Random amplitude noise (Gantree: L3_Noise → RandomNoise)
pub mod random;

/// ZZ crosstalk (Gantree: L3_Noise → ZzCrossTalk)
pub mod crosstalk;

/// Configuration (Gantree: L4_Integration → ProcessOptions)
pub mod config;

/// Pipeline (Gantree: L4_Integration → process_noise)
pub mod process;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{NoiseSpec, ProcessOptions};
pub use control_amp::{AmpCoefficient, ControlAmpNoise};
pub use crosstalk::{population_difference, zz_coefficient, CrossTalkParams, ZzCrossTalk};
pub use decoherence::DecoherenceNoise;
pub use noise::{apply_noise, LegacyNoise, LegacyNoiseAdapter, Noise, NoiseOutcome};
pub use process::{process_noise, NoiseProcessor};
pub use random::{sample_grid, shared_span, DrawKind, DrawParams, RandomDraw, RandomNoise, SeededDraw};
pub use relaxation::{broadcast_relaxation_time, effective_t2, RelaxationNoise, RelaxationTime};

// ============================================================================
// Prelude
// ============================================================================

/// Convenient imports for common use cases
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use pulsim_noise::prelude::*;
    //! ```

    pub use crate::config::{NoiseSpec, ProcessOptions};
    pub use crate::control_amp::{AmpCoefficient, ControlAmpNoise};
    pub use crate::crosstalk::{CrossTalkParams, ZzCrossTalk};
    pub use crate::decoherence::DecoherenceNoise;
    pub use crate::noise::{LegacyNoise, LegacyNoiseAdapter, Noise, NoiseOutcome};
    pub use crate::process::{process_noise, NoiseProcessor};
    pub use crate::random::{DrawKind, DrawParams, RandomDraw, RandomNoise, SeededDraw};
    pub use crate::relaxation::{RelaxationNoise, RelaxationTime};
}

// ============================================================================
// Version Information
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use approx::assert_relative_eq;
    use pulsim_core::{Operator, PulsimError, PulsimResult, SystemDims};
    use pulsim_pulse::{Coefficient, Pulse};

    fn drive(label: &str, target: usize) -> Pulse {
        Pulse::new(
            label,
            Operator::sigmax(),
            vec![target],
            Some(vec![0.0, 0.5, 1.0]),
            Coefficient::Samples(vec![1.0, 1.0, 1.0]),
        )
        .unwrap()
    }

    fn pulses() -> Vec<Pulse> {
        vec![drive("x0", 0), drive("x1", 1)]
    }

    fn ramp(_: &DrawParams, size: usize) -> PulsimResult<Vec<f64>> {
        Ok((0..size).map(|k| k as f64).collect())
    }

    #[test]
    fn test_caller_pulses_untouched() {
        let original = pulses();
        let noise: Vec<Box<dyn Noise>> = vec![
            Box::new(ControlAmpNoise::scale(0.5)),
            Box::new(RandomNoise::new(0.1, Box::new(ramp), DrawParams::new()).unwrap()),
        ];
        let options = ProcessOptions::new(SystemDims::Qubits(2))
            .with_t1(5.0)
            .with_device_noise(true);

        let noisy = process_noise(&original, &noise, &options).unwrap();

        assert_eq!(original, pulses());
        assert!(original.iter().all(|p| !p.has_noise()));
        assert!(noisy[0].has_noise());
    }

    #[test]
    fn test_output_length_follows_device_flag() {
        let noise: Vec<Box<dyn Noise>> = vec![Box::new(ControlAmpNoise::scale(0.1))];
        let off = ProcessOptions::new(SystemDims::Qubits(2)).with_t1(3.0);
        let on = off.clone().with_device_noise(true);

        assert_eq!(process_noise(&pulses(), &noise, &off).unwrap().len(), 2);
        assert_eq!(process_noise(&pulses(), &noise, &on).unwrap().len(), 3);
    }

    #[test]
    fn test_empty_noise_list_with_device_noise() {
        let options = ProcessOptions::new(SystemDims::Qubits(2)).with_device_noise(true);
        let out = process_noise(&pulses(), &[], &options).unwrap();

        assert_eq!(out.len(), 3);
        assert_eq!(&out[..2], &pulses()[..]);
        assert!(out[2].is_systematic());
        assert!(!out[2].has_noise());
        assert_eq!(out[2].label(), pulsim_core::labels::SYSTEMATIC_NOISE);
    }

    #[test]
    fn test_relaxation_shortcut_through_pipeline() {
        let options = ProcessOptions::new(SystemDims::Qubits(1))
            .with_t1(2.0)
            .with_t2(1.0)
            .with_device_noise(true);
        let out = process_noise(&[drive("x0", 0)], &[], &options).unwrap();
        let lindblad = out[1].lindblad_noise();

        assert_eq!(lindblad.len(), 2);
        // T2_eff = 4/3, so the dephasing operator is 2 num / sqrt(8/3)
        let dephasing = lindblad[1].operator().matrix();
        assert_relative_eq!(dephasing[[1, 1]].re, 2.0 / (8.0_f64 / 3.0).sqrt(), epsilon = 1e-12);
        assert_relative_eq!(dephasing[[0, 0]].re, 0.0);
    }

    #[test]
    fn test_invalid_t2_rejected() {
        let options = ProcessOptions::new(SystemDims::Qubits(3)).with_t1(1.0).with_t2(3.0);
        assert_eq!(process_noise(&pulses(), &[], &options).unwrap(), pulses());
        let options = options.with_device_noise(true);
        assert!(process_noise(&pulses(), &[], &options).is_err());
        let direct = RelaxationNoise::uniform(1.0, 3.0).get_noisy_pulses(
            &[2, 2, 2],
            &[],
            &Pulse::systematic(None),
        );
        assert_eq!(direct.unwrap_err(), PulsimError::InvalidT2 { t1: 1.0, t2: 3.0 });
    }

    #[test]
    fn test_broadcast_requires_single_qubit_operator() {
        let cnot_like = Operator::sigmax().tensor(&Operator::sigmax());
        assert!(DecoherenceNoise::broadcast(vec![cnot_like]).is_err());
    }

    #[test]
    fn test_amplitude_then_random_ordering() {
        let noise: Vec<Box<dyn Noise>> = vec![
            Box::new(ControlAmpNoise::scale(0.5).with_indices(vec![0])),
            Box::new(
                RandomNoise::new(0.5, Box::new(ramp), DrawParams::new())
                    .unwrap()
                    .with_indices(vec![0]),
            ),
        ];
        let out = process_noise(&pulses(), &noise, &ProcessOptions::new(SystemDims::Qubits(2))).unwrap();
        let terms = out[0].coherent_noise();

        assert_eq!(terms.len(), 2);
        assert_eq!(terms[0].coeff().samples(), Some(&[0.5, 0.5, 0.5][..]));
        assert_eq!(terms[1].coeff().samples(), Some(&[0.0, 1.0, 2.0][..]));
        assert!(!out[1].has_noise());
    }

    #[test]
    fn test_crosstalk_visible_only_with_device_noise() {
        let params = CrossTalkParams {
            j: vec![0.05],
            wq_dressed_cavity: vec![5.0, 5.3],
            alpha: vec![-0.3, -0.3],
        };
        let noise: Vec<Box<dyn Noise>> = vec![Box::new(ZzCrossTalk::new(params))];
        let dims = SystemDims::Subsystems(vec![3, 3]);

        let off = process_noise(&[], &noise, &ProcessOptions::new(dims.clone())).unwrap();
        assert!(off.is_empty());

        let on = process_noise(&[], &noise, &ProcessOptions::new(dims).with_device_noise(true)).unwrap();
        assert_eq!(on.len(), 1);
        assert_eq!(on[0].coherent_noise()[0].targets(), &[0, 1]);
    }

    #[test]
    fn test_legacy_noise_in_pipeline() {
        struct Dephase;
        impl LegacyNoise for Dephase {
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

        let noise: Vec<Box<dyn Noise>> = vec![Box::new(LegacyNoiseAdapter::new(Dephase))];
        let options = ProcessOptions::new(SystemDims::Qubits(2)).with_device_noise(true);
        let out = process_noise(&pulses(), &noise, &options).unwrap();
        assert_eq!(out[2].lindblad_noise().len(), 1);
    }

    #[test]
    fn test_json_driven_pipeline() {
        let options = ProcessOptions::from_json(r#"{"dims": 2, "t1": 40.0, "device_noise": true}"#).unwrap();
        let specs = NoiseSpec::list_from_json(
            r#"[{"type": "random", "dt": 0.25, "distribution": "uniform", "params": {"low": -0.01, "high": 0.01}, "seed": 11}]"#,
        )
        .unwrap();
        let processor = NoiseProcessor::from_specs(options, &specs).unwrap();

        let first = processor.process(&pulses()).unwrap();
        assert_eq!(first.len(), 3);
        let samples = first[1].coherent_noise()[0].coeff().samples().unwrap();
        assert_eq!(samples.len(), 5);
        assert!(samples.iter().all(|x| (-0.01..0.01).contains(x)));
        assert_eq!(first[2].lindblad_noise().len(), 2);
    }
}
