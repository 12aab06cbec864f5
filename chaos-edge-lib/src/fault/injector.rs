use std::{sync::Arc, time::Duration};

use rama::{
    http::{Response, StatusCode, service::web::response::IntoResponse},
    telemetry::tracing,
};

use super::{FaultPolicy, RandomSource};

/// Outcome of a single failure injection draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// The draw fell within the failure band.
    Injected,
    Survived,
}

/// Produces (non-deterministically degraded) responses
/// according to a [`FaultPolicy`].
///
/// Cloning is cheap, all clones share the same policy and random source.
/// No state is kept between calls.
#[derive(Debug, Clone)]
pub struct FaultInjector {
    policy: Arc<FaultPolicy>,
    random: Arc<dyn RandomSource>,
}

impl FaultInjector {
    pub fn new(policy: FaultPolicy, random: impl RandomSource) -> Self {
        Self::new_with_shared_random(policy, Arc::new(random))
    }

    pub fn new_with_shared_random(policy: FaultPolicy, random: Arc<dyn RandomSource>) -> Self {
        Self {
            policy: Arc::new(policy),
            random,
        }
    }

    #[inline(always)]
    pub fn policy(&self) -> &FaultPolicy {
        &self.policy
    }

    /// Draw a fresh delay from the latency range of the policy.
    pub fn sample_delay(&self) -> Duration {
        let range = self.policy.latency.range;
        let ms = self.random.next_in_range(range.min_ms(), range.max_ms());
        Duration::from_millis(ms)
    }

    /// Draw whether or not a failure has to be injected.
    pub fn draw_failure(&self) -> FailureOutcome {
        let u = self.random.next_unit();
        if self.policy.failure.probability.is_hit(u) {
            FailureOutcome::Injected
        } else {
            FailureOutcome::Survived
        }
    }

    /// Sleep for a sampled delay and respond with `200 OK`,
    /// reporting the delay in the body.
    ///
    /// Only the current request task is suspended.
    pub async fn handle_latency_injection(&self) -> Response {
        let delay = self.sample_delay();
        tracing::debug!(
            delay_ms = delay.as_millis() as u64,
            "inject latency (range = {})",
            self.policy.latency.range,
        );

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let body = self.policy.latency.render_message(delay);
        (StatusCode::OK, body).into_response()
    }

    /// Respond with the failure status and message in case a failure is drawn,
    /// or `200 OK` with the success message otherwise.
    pub fn handle_failure_injection(&self) -> Response {
        let failure = &self.policy.failure;
        match self.draw_failure() {
            FailureOutcome::Injected => {
                tracing::debug!(
                    http.response.status_code = failure.status().as_u16(),
                    "inject failure (probability = {})",
                    failure.probability,
                );
                (failure.status(), failure.failure_message.to_string()).into_response()
            }
            FailureOutcome::Survived => {
                (StatusCode::OK, failure.success_message.to_string()).into_response()
            }
        }
    }
}
