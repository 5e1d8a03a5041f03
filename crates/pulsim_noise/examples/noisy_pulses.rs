//! PULSIM Noisy Pulses Demo
//!
//! Builds a three-transmon drive schedule, runs it through amplitude,
//! random and crosstalk noise plus T1/T2 relaxation, and prints the noise
//! terms attached to every pulse.

use pulsim_core::{Operator, PulsimResult, SystemDims};
use pulsim_noise::prelude::*;
use pulsim_noise::zz_coefficient;
use pulsim_pulse::{Coefficient, Pulse};

fn main() -> PulsimResult<()> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║                  PULSIM Noisy Pulses Demo                    ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    let dims = vec![3, 3, 3];
    let tlist: Vec<f64> = (0..=20).map(|k| k as f64 * 0.5).collect();

    // Gaussian-ish envelope on every qubit
    let envelope: Vec<f64> = tlist
        .iter()
        .map(|t| (-(t - 5.0) * (t - 5.0) / 8.0).exp())
        .collect();

    let drive = Operator::create(3).add(&Operator::destroy(3))?;
    let pulses = (0..dims.len())
        .map(|q| {
            Pulse::new(
                &format!("sx{}", q),
                drive.clone(),
                vec![q],
                Some(tlist.clone()),
                Coefficient::Samples(envelope.clone()),
            )
        })
        .collect::<PulsimResult<Vec<_>>>()?;

    let crosstalk = CrossTalkParams {
        j: vec![0.02, 0.02],
        wq_dressed_cavity: vec![5.0, 5.4, 5.1],
        alpha: vec![-0.32, -0.30, -0.31],
    };

    let processor = NoiseProcessor::new(
        ProcessOptions::new(SystemDims::Subsystems(dims))
            .with_t1(vec![60.0_f64, 45.0, 80.0])
            .with_t2(40.0)
            .with_device_noise(true),
    )
    .with_noise(ControlAmpNoise::scale(0.01))
    .with_noise(RandomNoise::new(
        0.25,
        Box::new(SeededDraw::normal(Some(42))),
        [("scale".to_string(), 0.005)].into_iter().collect(),
    )?)
    .with_noise(ZzCrossTalk::new(crosstalk.clone()));

    println!("Options: {}", processor.options());
    println!("Sources: {}\n", processor.num_sources());

    let noisy = processor.process(&pulses)?;

    println!("┌──────────────────┬──────────┬──────────┬──────────┐");
    println!("│ Pulse            │ Targets  │ Coherent │ Lindblad │");
    println!("├──────────────────┼──────────┼──────────┼──────────┤");
    for pulse in &noisy {
        println!(
            "│ {:16} │ {:8} │ {:8} │ {:8} │",
            pulse.label(),
            format!("{:?}", pulse.targets()),
            pulse.coherent_noise().len(),
            pulse.lindblad_noise().len()
        );
    }
    println!("└──────────────────┴──────────┴──────────┴──────────┘\n");

    for (i, term) in noisy[noisy.len() - 1].coherent_noise().iter().enumerate() {
        println!(
            "ZZ pair {:?}: coefficient {:+.3e}",
            term.targets(),
            zz_coefficient(&crosstalk, i)
        );
    }

    Ok(())
}
