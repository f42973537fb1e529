//! Simon's algorithm with GF(2) post-processing.

use qalgos::algorithms::{Simon, SimonOutcome};
use qalgos::simulation::format_bits;
use qalgos::{LocalBackend, ReportSink, RunConfig, TracingReporter};

const NUM_QUBITS: usize = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).with_target(false).init();

    let config = RunConfig::default().with_shots(64);
    let mut rng = config.rng();
    let simon = Simon::random(NUM_QUBITS, &mut rng)?;
    println!("Hidden period: {}", format_bits(simon.secret(), NUM_QUBITS));
    println!("{}", simon.circuit()?);

    let outcome = simon.run(&mut LocalBackend::new(), config.shots, &mut rng)?;
    TracingReporter.report("simon", outcome.histogram(), &outcome);
    if let SimonOutcome::Unresolved { .. } = outcome {
        println!("Not enough independent equations; try more shots.");
    }
    println!("{}", outcome);
    Ok(())
}
