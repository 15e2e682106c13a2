use lanebench::bench::StdioSink;
use lanebench::{logging, Orchestrator, ITERATIONS};

fn main() {
    logging::init();

    println!("Calculating using {ITERATIONS} iterations...");

    let summary = Orchestrator::default().run(&StdioSink);

    // Worker errors were already reported on stderr; they do not change the exit code.
    for outcome in &summary.outcomes {
        if let Err(error) = &outcome.result {
            tracing::info!(label = %outcome.label, %error, "benchmark did not complete");
        }
    }
}
