use std::fmt;

/// Mean inter-arrival gap shared by all three scenarios, in minutes.
///
/// One call every five minutes on average (arrival rate 0.2/min).
pub const MEAN_ARRIVAL_GAP: f64 = 5.0;

/// Simulated minutes after which no new calls are admitted.
pub const HORIZON: f64 = 100.0;

/// Seed used by the fixed scenario table.
pub const DEFAULT_SEED: u64 = 10;

/// Configuration for a simulation scenario
///
/// Immutable once a run starts; `validate` must pass before the event loop
/// is built.
#[derive(Debug, Clone)]
pub struct ScenarioConfig {
    /// Name of the scenario
    pub name: String,
    /// Number of interchangeable agent slots
    pub agents: usize,
    /// Mean service duration in minutes (exponential)
    pub mean_service_time: f64,
    /// Mean inter-arrival gap in minutes (exponential)
    pub mean_arrival_gap: f64,
    /// Simulated minutes during which calls may arrive
    pub horizon: f64,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Print a line per arrival/answer/completion
    pub trace: bool,
}

impl ScenarioConfig {
    pub fn new(name: &str, agents: usize, mean_service_time: f64) -> Self {
        ScenarioConfig {
            name: name.to_string(),
            agents,
            mean_service_time,
            mean_arrival_gap: MEAN_ARRIVAL_GAP,
            horizon: HORIZON,
            seed: DEFAULT_SEED,
            trace: false,
        }
    }

    /// Scenario A: 2 agents, 8-minute average service time
    pub fn scenario_a() -> Self {
        Self::new("Scenario A", 2, 8.0)
    }

    /// Scenario B: 3 agents, 7-minute average service time
    pub fn scenario_b() -> Self {
        Self::new("Scenario B", 3, 7.0)
    }

    /// Scenario C: 5 agents, 9-minute average service time
    pub fn scenario_c() -> Self {
        Self::new("Scenario C", 5, 9.0)
    }

    /// The fixed scenario table, in reporting order
    pub fn all_three() -> Vec<Self> {
        vec![Self::scenario_a(), Self::scenario_b(), Self::scenario_c()]
    }

    /// Reject configurations the simulation cannot run.
    ///
    /// Mean times and the horizon must be positive and finite so the
    /// exponential distributions and the per-horizon averages are defined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agents == 0 {
            return Err(ConfigError::NoAgents);
        }
        if !(self.mean_service_time > 0.0 && self.mean_service_time.is_finite()) {
            return Err(ConfigError::BadServiceTime(self.mean_service_time));
        }
        if !(self.mean_arrival_gap > 0.0 && self.mean_arrival_gap.is_finite()) {
            return Err(ConfigError::BadArrivalGap(self.mean_arrival_gap));
        }
        if !(self.horizon > 0.0 && self.horizon.is_finite()) {
            return Err(ConfigError::BadHorizon(self.horizon));
        }
        Ok(())
    }
}

/// Rejected scenario configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NoAgents,
    BadServiceTime(f64),
    BadArrivalGap(f64),
    BadHorizon(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoAgents => {
                write!(f, "agent count must be at least 1")
            }
            ConfigError::BadServiceTime(v) => {
                write!(f, "mean service time must be positive and finite, got {}", v)
            }
            ConfigError::BadArrivalGap(v) => {
                write!(f, "mean arrival gap must be positive and finite, got {}", v)
            }
            ConfigError::BadHorizon(v) => {
                write!(f, "horizon must be positive and finite, got {}", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
