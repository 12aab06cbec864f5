use chaos_edge_lib::fault::FailureProbability;

use super::FaultConfig;

/// Named presets of fault injection behavior.
#[derive(Debug, Clone, Copy, clap::ValueEnum, Default)]
pub enum Scenario {
    /// Latency between 500ms and 2s, one in five requests fails.
    #[default]
    Edge,

    /// Tighter latency window between 500ms and 1.5s,
    /// one in five requests fails.
    Jitter,

    /// No latency and no failures.
    /// Used to measure the service without any chaos.
    Calm,
}

impl Scenario {
    /// Construct the concrete fault configuration
    /// associated with this scenario.
    pub fn fault_config(self) -> FaultConfig {
        match self {
            Scenario::Edge => FaultConfig {
                latency_min_ms: Some(500),
                latency_max_ms: Some(2000),
                failure_rate: FailureProbability::try_from_ratio(1, 5).ok(),
                failure_status: None,
            },

            Scenario::Jitter => FaultConfig {
                latency_min_ms: Some(500),
                latency_max_ms: Some(1500),
                failure_rate: FailureProbability::try_from_ratio(1, 5).ok(),
                failure_status: None,
            },

            Scenario::Calm => FaultConfig {
                latency_min_ms: Some(0),
                latency_max_ms: Some(0),
                failure_rate: None,
                failure_status: None,
            },
        }
    }
}
