use std::time::Duration;

use chaos_edge_lib::fault::FaultPolicy;
use rama::telemetry::tracing;

mod fault;
mod scenario;


pub use self::{fault::FaultConfig, scenario::Scenario};

/// Merge the explicitly defined fault properties on top of the scenario ones.
///
/// Properties defined in `overwrite` always win.
pub fn merge_fault_config(scenario: Option<Scenario>, overwrite: FaultConfig) -> FaultConfig {
    let scenario_cfg = scenario
        .map(|s| {
            tracing::info!("use scenario to define base config: {s:?}");
            s.fault_config()
        })
        .unwrap_or_else(|| {
            tracing::info!("no scenario defined, use default as base config");
            Scenario::default().fault_config()
        });

    macro_rules! merge_config {
        ($scenario:ident, $overwrite:ident, {$($property:ident),+ $(,)?}) => {
            FaultConfig {
                $(
                    $property: if let Some(value) = $overwrite.$property {
                        tracing::info!("property '{}': use overwrite: {value}", stringify!($property));
                        Some(value)
                    } else if let Some(value) = $scenario.$property {
                        tracing::info!("property '{}': use scenario: {value}", stringify!($property));
                        Some(value)
                    } else {
                        tracing::info!("property '{}': undefined", stringify!($property));
                        None
                    },
                )+
            }
        };
    }

    merge_config!(
        scenario_cfg, overwrite,
        {
            latency_min_ms,
            latency_max_ms,
            failure_rate,
            failure_status,
        }
    )
}

/// Time a connection gets on top of the largest latency that can be injected.
pub const CONNECTION_TIMEOUT_MARGIN: Duration = Duration::from_secs(60);

/// Connection timeout for the http server,
/// long enough to let every injected latency run to completion.
pub fn connection_timeout(policy: &FaultPolicy) -> Duration {
    CONNECTION_TIMEOUT_MARGIN.saturating_add(Duration::from_millis(policy.latency.range.max_ms()))
}
