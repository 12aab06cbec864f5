use chaos_edge_lib::fault::{
    FailurePolicy, FailureProbability, FaultPolicy, LatencyPolicy, LatencyRange,
};
use rama::{
    error::{BoxError, ErrorContext as _},
    http::StatusCode,
};

/// Fault injection behavior of the chaos endpoints.
///
/// Undefined properties fall back to the selected scenario.
#[derive(Debug, Clone, clap::Args, Default)]
pub struct FaultConfig {
    /// Lower bound (inclusive) of the injected latency.
    #[arg(long, value_name = "MILLISECONDS")]
    pub latency_min_ms: Option<u64>,

    /// Upper bound (exclusive) of the injected latency,
    /// equal to the lower bound for a fixed delay.
    #[arg(long, value_name = "MILLISECONDS")]
    pub latency_max_ms: Option<u64>,

    /// Probability of injecting a failure,
    /// as a decimal (e.g. 0.2) or a ratio (e.g. 1/5).
    #[arg(long, value_name = "PROBABILITY")]
    pub failure_rate: Option<FailureProbability>,

    /// Status code of injected failures (4xx or 5xx).
    #[arg(long, value_name = "STATUS")]
    pub failure_status: Option<StatusCode>,
}

impl FaultConfig {
    /// Validate this config and turn it into the policy used by the fault injector.
    pub fn try_into_policy(self) -> Result<FaultPolicy, BoxError> {
        let min_ms = self.latency_min_ms.unwrap_or_default();
        let max_ms = self.latency_max_ms.unwrap_or(min_ms);
        let range = LatencyRange::try_new(min_ms, max_ms).context("create latency range")?;

        let failure = FailurePolicy::new(self.failure_rate.unwrap_or(FailureProbability::NEVER));
        let failure = match self.failure_status {
            Some(status) => failure
                .try_with_status(status)
                .context("set failure status")?,
            None => failure,
        };

        Ok(FaultPolicy::new(LatencyPolicy::new(range), failure))
    }
}
