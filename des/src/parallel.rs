//! Parallel execution of independent simulation scenarios.
//!
//! Scenarios share no state, so they can run concurrently for wall-clock
//! speed without affecting results: each closure builds, runs, and reduces
//! its own simulation, and results come back in scenario order regardless of
//! which thread finished first.
//!
//! # Determinism
//!
//! Results are deterministic when:
//! 1. The builder derives any seeds from `scenario_id` alone
//! 2. Agents use seeded RNGs (e.g. `StdRng::seed_from_u64`)
//! 3. No shared mutable state across scenarios
//!
//! # Error handling
//!
//! A panic in one scenario is caught and returned as `Err(String)` in that
//! scenario's slot; the other scenarios run to completion.

use rayon::prelude::*;

/// Run `num_scenarios` independent scenarios on the rayon pool.
///
/// `run` is called once per scenario with the scenario index and must carry
/// out the whole scenario: build the event loop, run it, and return the
/// reduced result.
pub fn run_parallel<R, F>(num_scenarios: usize, run: F) -> Vec<Result<R, String>>
where
    F: Fn(usize) -> R + Send + Sync,
    R: Send,
{
    (0..num_scenarios)
        .into_par_iter()
        .map(|scenario_id| {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                run(scenario_id)
            }));
            result.map_err(|panic| {
                if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    "Unknown panic".to_string()
                }
            })
        })
        .collect()
}
