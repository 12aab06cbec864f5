//! Request-scoped fault injection.
//!
//! Two primitives exist: artificial latency (uniform jitter)
//! and probabilistic failures (a deliberate error response).
//! Each decision is a fresh, independent draw from a [`RandomSource`]
//! which is passed in explicitly, so tests can make it deterministic.

mod injector;
mod policy;
mod random;

pub use self::{
    injector::{FailureOutcome, FaultInjector},
    policy::{
        DELAY_MS_PLACEHOLDER, FailurePolicy, FailureProbability, FaultPolicy, LatencyPolicy,
        LatencyRange,
    },
    random::{RandomSource, StdRandomSource},
};

#[cfg(test)]
pub use self::random::FixedRandomSource;
