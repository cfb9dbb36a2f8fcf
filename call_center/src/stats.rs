use crate::Stats;

/// Aggregate statistics for one scenario run.
///
/// Flattened from the agents' [`Stats`] snapshots after the event loop has
/// drained; this is the record the console table and the CSV rows are built
/// from.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    /// Number of agent slots in the scenario
    pub agents: usize,
    /// Calls that arrived before the horizon
    pub arrivals: usize,
    /// Calls served to completion, drained past the horizon included
    pub completed: usize,
    /// Calls completed at or before the horizon
    pub completed_by_horizon: usize,
    /// Calls still waiting or in service at the horizon
    pub in_flight_at_horizon: usize,
    /// Mean wait in minutes, 0.0 when no call was answered
    pub avg_wait: f64,
    /// Time-averaged queue length over the horizon
    pub avg_queue_length: f64,
    /// Calls completed per minute, within the horizon
    pub throughput: f64,
    /// Fraction of agent-time spent serving, in [0, 1]
    pub utilization: f64,
}

impl RunStatistics {
    /// Reduce the event loop's per-agent stats to the run aggregate.
    pub fn from_stats(all_stats: &[Stats]) -> RunStatistics {
        let pool = all_stats
            .iter()
            .find_map(|s| {
                if let Stats::Pool(p) = s {
                    Some(p)
                } else {
                    None
                }
            })
            .expect("No pool stats found");

        RunStatistics {
            agents: pool.capacity,
            arrivals: pool.arrivals,
            completed: pool.completed,
            completed_by_horizon: pool.completed_by_horizon,
            in_flight_at_horizon: pool.in_flight_at_horizon(),
            avg_wait: pool.avg_wait_time().unwrap_or(0.0),
            avg_queue_length: pool.avg_queue_length(),
            throughput: pool.throughput(),
            utilization: pool.utilization(),
        }
    }
}
