//! CSV export of scenario results.
//!
//! One row per scenario with fixed two-decimal formatting, so repeated runs
//! with the same seed diff cleanly.

use std::path::Path;

use crate::scenarios::ScenarioResult;

/// Write all scenario results to a single CSV file, overwriting it.
pub fn write_results_csv<P: AsRef<Path>>(
    path: P,
    results: &[ScenarioResult],
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "scenario",
        "agents",
        "avg_wait",
        "avg_queue",
        "throughput",
        "utilization",
        "arrived",
        "finished",
    ])?;

    for result in results {
        wtr.write_record(&[
            result.config.name.clone(),
            result.stats.agents.to_string(),
            format!("{:.2}", result.stats.avg_wait),
            format!("{:.2}", result.stats.avg_queue_length),
            format!("{:.2}", result.stats.throughput),
            format!("{:.2}", result.stats.utilization),
            result.stats.arrivals.to_string(),
            result.stats.completed.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
