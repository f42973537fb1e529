//! Shor factoring of a small random semiprime.

use qalgos::algorithms::ShorFactoring;
use qalgos::{LocalBackend, ReportSink, RunConfig, TracingReporter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).with_target(false).init();

    let config = RunConfig::default();
    let mut rng = config.rng();
    let shor = ShorFactoring::random(&mut rng)?;
    println!("Factoring N = {}", shor.modulus());

    let outcome = shor.run(&mut LocalBackend::new(), config.shots, &mut rng)?;
    for attempt in outcome.attempts() {
        println!("  base {:>2}: {:?}", attempt.base, attempt.result);
    }
    if let Some(histogram) = outcome.histogram() {
        TracingReporter.report("shor", histogram, &outcome);
    }
    println!("{}", outcome);
    Ok(())
}
