//! Deutsch-Jozsa on a random constant or balanced oracle.

use qalgos::algorithms::DeutschJozsa;
use qalgos::{LocalBackend, ReportSink, RunConfig, TracingReporter};

const NUM_QUBITS: usize = 4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).with_target(false).init();

    let config = RunConfig::default();
    let mut rng = config.rng();
    let dj = DeutschJozsa::random(NUM_QUBITS, &mut rng)?;
    println!("{}", dj.circuit()?);

    let outcome = dj.run(&mut LocalBackend::new(), config.shots, &mut rng)?;
    TracingReporter.report("deutsch-jozsa", &outcome.histogram, &outcome);
    println!("Hidden oracle: {:?}", dj.hidden_oracle());
    println!("Verdict: {}", outcome);
    Ok(())
}
