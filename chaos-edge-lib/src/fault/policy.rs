use std::{fmt, str::FromStr, time::Duration};

use rama::{
    error::{BoxError, ErrorContext as _},
    http::StatusCode,
    utils::str::arcstr::ArcStr,
};

/// Placeholder in [`LatencyPolicy`] message templates,
/// replaced by the sampled delay in milliseconds.
pub const DELAY_MS_PLACEHOLDER: &str = "{delay_ms}";

/// Bounds `[min, max)` in milliseconds from which
/// an artificial delay is drawn uniformly.
///
/// `min == max` is a fixed delay of exactly `min` milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LatencyRange {
    min_ms: u64,
    max_ms: u64,
}

impl LatencyRange {
    /// No delay at all.
    pub const NONE: Self = Self::fixed(0);

    pub fn try_new(min_ms: u64, max_ms: u64) -> Result<Self, BoxError> {
        if min_ms > max_ms {
            return Err(BoxError::from(format!(
                "latency range min ({min_ms}ms) must be <= max ({max_ms}ms)"
            )));
        }
        Ok(Self { min_ms, max_ms })
    }

    pub const fn fixed(ms: u64) -> Self {
        Self {
            min_ms: ms,
            max_ms: ms,
        }
    }

    #[inline(always)]
    pub fn min_ms(&self) -> u64 {
        self.min_ms
    }

    #[inline(always)]
    pub fn max_ms(&self) -> u64 {
        self.max_ms
    }

    #[inline(always)]
    pub fn is_fixed(&self) -> bool {
        self.min_ms == self.max_ms
    }

    /// Whether `delay` could have been drawn from this range.
    pub fn contains(&self, delay: Duration) -> bool {
        let ms = delay.as_millis();
        if self.is_fixed() {
            ms == self.min_ms as u128
        } else {
            (self.min_ms as u128..self.max_ms as u128).contains(&ms)
        }
    }
}

impl fmt::Display for LatencyRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fixed() {
            write!(f, "{}ms", self.min_ms)
        } else {
            write!(f, "[{}ms, {}ms)", self.min_ms, self.max_ms)
        }
    }
}

/// Chance in `[0, 1]` that a failure is injected instead of a success.
///
/// Bounds are exact: `0` never fails, `1` always fails.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FailureProbability(f64);

impl FailureProbability {
    pub const NEVER: Self = Self(0.0);
    pub const ALWAYS: Self = Self(1.0);

    pub fn try_new(p: f64) -> Result<Self, BoxError> {
        // NaN is rejected here as well
        if !(0.0..=1.0).contains(&p) {
            return Err(BoxError::from(format!(
                "failure probability must be within [0, 1], got: {p}"
            )));
        }
        Ok(Self(p))
    }

    /// Create a probability from a ratio, e.g. `1/5`.
    pub fn try_from_ratio(numerator: u32, denominator: u32) -> Result<Self, BoxError> {
        if denominator == 0 {
            return Err(BoxError::from("failure probability ratio has zero denominator"));
        }
        Self::try_new(numerator as f64 / denominator as f64)
    }

    #[inline(always)]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Decide for a uniform draw `u` in `[0, 1)`
    /// whether it falls within the failure band.
    #[inline(always)]
    pub fn is_hit(self, u: f64) -> bool {
        u < self.0
    }
}

impl fmt::Display for FailureProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for FailureProbability {
    type Err = BoxError;

    /// Parses either a decimal (`0.2`) or a ratio (`1/5`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let probability = match s.split_once('/') {
            Some((numerator, denominator)) => {
                let numerator: u32 = numerator
                    .trim()
                    .parse()
                    .context("parse failure probability numerator")?;
                let denominator: u32 = denominator
                    .trim()
                    .parse()
                    .context("parse failure probability denominator")?;
                Self::try_from_ratio(numerator, denominator)?
            }
            None => {
                let p: f64 = s.parse().context("parse failure probability")?;
                Self::try_new(p)?
            }
        };
        Ok(probability)
    }
}

/// Artificial latency injected by the latency endpoint.
#[derive(Debug, Clone)]
pub struct LatencyPolicy {
    pub range: LatencyRange,
    /// Response body template, see [`DELAY_MS_PLACEHOLDER`].
    pub message: ArcStr,
}

impl LatencyPolicy {
    pub fn new(range: LatencyRange) -> Self {
        Self {
            range,
            message: ArcStr::from("⏱️ Injected latency: {delay_ms}ms"),
        }
    }

    /// Overwrite the response body template.
    pub fn with_message(mut self, message: impl Into<ArcStr>) -> Self {
        self.message = message.into();
        self
    }

    pub fn render_message(&self, delay: Duration) -> String {
        self.message.replace(DELAY_MS_PLACEHOLDER, &delay.as_millis().to_string())
    }
}

/// Probabilistic failure injected by the failure endpoint.
#[derive(Debug, Clone)]
pub struct FailurePolicy {
    pub probability: FailureProbability,
    status: StatusCode,
    pub failure_message: ArcStr,
    pub success_message: ArcStr,
}

impl FailurePolicy {
    pub fn new(probability: FailureProbability) -> Self {
        Self {
            probability,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            failure_message: ArcStr::from("💥 Chaos Injected!"),
            success_message: ArcStr::from("Chaos Survived ✓"),
        }
    }

    #[inline(always)]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Overwrite the status code used for injected failures,
    /// only client and server error codes are accepted.
    pub fn try_with_status(mut self, status: StatusCode) -> Result<Self, BoxError> {
        if !(status.is_client_error() || status.is_server_error()) {
            return Err(BoxError::from(format!(
                "failure status must be a 4xx or 5xx status code, got: {status}"
            )));
        }
        self.status = status;
        Ok(self)
    }

    pub fn with_failure_message(mut self, message: impl Into<ArcStr>) -> Self {
        self.failure_message = message.into();
        self
    }

    pub fn with_success_message(mut self, message: impl Into<ArcStr>) -> Self {
        self.success_message = message.into();
        self
    }
}

/// Process-wide fault injection configuration,
/// immutable once the server is running.
#[derive(Debug, Clone)]
pub struct FaultPolicy {
    pub latency: LatencyPolicy,
    pub failure: FailurePolicy,
}

impl FaultPolicy {
    pub fn new(latency: LatencyPolicy, failure: FailurePolicy) -> Self {
        Self { latency, failure }
    }
}

impl Default for FaultPolicy {
    fn default() -> Self {
        Self {
            latency: LatencyPolicy::new(LatencyRange {
                min_ms: 500,
                max_ms: 2000,
            }),
            failure: FailurePolicy::new(FailureProbability(0.2)),
        }
    }
}
