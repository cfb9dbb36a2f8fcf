//! Call center queueing simulation.
//!
//! Calls arrive as a renewal process with exponential inter-arrival gaps,
//! contend for a fixed pool of interchangeable agents, are served for an
//! exponentially distributed duration, and depart. Three fixed scenarios
//! (A, B, C) vary the agent count and mean service time; each run reports
//! average wait, time-averaged queue length, throughput, and utilization.
//!
//! The simulation is two [`des::Agent`]s on one event loop: a [`CallSource`]
//! that drives arrivals and service completions, and an [`AgentPool`] that
//! owns the slot count, the FIFO wait queue, and all statistics.

pub mod config;
pub mod output;
pub mod pool;
pub mod scenarios;
pub mod source;
pub mod stats;

pub use config::{ConfigError, ScenarioConfig};
pub use pool::{AgentPool, PoolStats};
pub use scenarios::{ScenarioResult, run_all_scenarios, run_all_scenarios_parallel, run_scenario};
pub use source::{CallSource, SourceStats};
pub use stats::RunStatistics;

/// Events in the call center simulation
#[derive(Debug, Clone)]
pub enum Event {
    /// Kick off the arrival process
    Start,
    /// A call enters the system and requests an agent
    CallArrived { call: usize },
    /// The pool granted an agent slot to a call
    CallAnswered { call: usize, arrived_at: f64 },
    /// Service finished; the call releases its slot and departs
    CallCompleted { call: usize },
}

/// Combined stats enum for DES framework compatibility
#[derive(Debug, Clone, PartialEq)]
pub enum Stats {
    Source(SourceStats),
    Pool(PoolStats),
}
