//! Ordered predicate pipelines, one per backend family.
//!
//! A pipeline consults its predicates in priority order and stops at the
//! first one that matches; when none match it fails closed. The built-in
//! pipelines are constructed once and shared for the process lifetime;
//! their evaluation order is part of their contract.

use once_cell::sync::Lazy;

use crate::adapt;
use crate::decision::RetryDecision;
use crate::error::TransportError;
use crate::predicate::{self, Predicate};

/// Ordered, immutable predicate list for one backend family.
#[derive(Debug)]
pub struct Pipeline {
    name: &'static str,
    predicates: Vec<Predicate>,
}

impl Pipeline {
    /// Build a call-site-specific pipeline. Integrations that need policy
    /// beyond the built-ins compose one from the predicates in
    /// [`crate::predicate`] and pass it down explicitly.
    pub fn new(name: &'static str, predicates: Vec<Predicate>) -> Self {
        Self { name, predicates }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Classify a normalized transport error. First matching predicate
    /// wins; no match means not retryable.
    pub fn evaluate(&self, err: &TransportError) -> RetryDecision {
        for predicate in &self.predicates {
            if let Some(decision) = predicate.check(err).into_decision() {
                tracing::debug!(
                    pipeline = self.name,
                    predicate = predicate.name(),
                    retryable = decision.retryable,
                    "classified transport error"
                );
                return decision;
            }
        }
        tracing::debug!(pipeline = self.name, "no predicate matched, failing closed");
        RetryDecision::no_retry()
    }

    /// Adapt an opaque error and classify it. Unrecognizable shapes are
    /// not retryable.
    pub fn evaluate_raw(&self, err: &(dyn std::error::Error + 'static)) -> RetryDecision {
        match adapt::from_dyn(err) {
            Some(transport) => self.evaluate(&transport),
            None => {
                tracing::debug!(
                    pipeline = self.name,
                    error = %err,
                    "unclassifiable error shape, failing closed"
                );
                RetryDecision::no_retry()
            }
        }
    }
}

static APP_ENGINE: Lazy<Pipeline> = Lazy::new(|| {
    Pipeline::new(
        "app-engine",
        vec![
            Predicate::new("operation-in-progress", predicate::operation_in_progress),
            Predicate::new(
                "identity-propagation-delay",
                predicate::identity_propagation_delay,
            ),
        ],
    )
});

static COMMON_INFRA: Lazy<Pipeline> = Lazy::new(|| {
    Pipeline::new(
        "common-infra",
        vec![Predicate::new(
            "common-transient-codes",
            predicate::common_transient_codes,
        )],
    )
});

static QUOTA_AWARE: Lazy<Pipeline> = Lazy::new(|| {
    Pipeline::new(
        "quota-aware",
        vec![
            Predicate::new("per-minute-quota", predicate::per_minute_quota_exceeded),
            Predicate::new("per-day-quota", predicate::per_day_quota_exceeded),
            Predicate::new(
                "common-transient-codes",
                predicate::common_transient_codes,
            ),
        ],
    )
});

static RPC: Lazy<Pipeline> = Lazy::new(|| {
    Pipeline::new(
        "rpc",
        vec![Predicate::new(
            "rpc-transient-codes",
            predicate::rpc_transient_codes,
        )],
    )
});

/// App-Engine-style services: only the two known transient phrases retry.
/// A bare 404 or 500 from this family is definitive and is not retried.
pub fn app_engine() -> &'static Pipeline {
    &APP_ENGINE
}

/// Plain status-code policy shared by most REST backends; message content
/// is never consulted.
pub fn common_infra() -> &'static Pipeline {
    &COMMON_INFRA
}

/// Quota-sensitive REST backends: per-minute quota 403s retry, per-day
/// quota 403s are explicitly fatal, everything else falls back to the
/// common code table.
pub fn quota_aware() -> &'static Pipeline {
    &QUOTA_AWARE
}

/// RPC-based data-store clients; classifies by status code only.
pub fn rpc() -> &'static Pipeline {
    &RPC
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::Verdict;
    use crate::error::ApiError;
    use std::time::Duration;

    fn rest(code: u16, message: &str) -> TransportError {
        TransportError::Rest(ApiError::new(code, message))
    }

    #[test]
    fn first_match_wins() {
        fn always_retry(_: &TransportError) -> Verdict {
            Verdict::Retry
        }
        fn always_fatal(_: &TransportError) -> Verdict {
            Verdict::Fatal
        }
        let pipeline = Pipeline::new(
            "test",
            vec![
                Predicate::new("retry", always_retry),
                Predicate::new("fatal", always_fatal),
            ],
        );
        assert!(pipeline.evaluate(&rest(500, "")).retryable);
    }

    #[test]
    fn no_match_fails_closed() {
        let pipeline = Pipeline::new("empty", Vec::new());
        let decision = pipeline.evaluate(&rest(500, "boom"));
        assert!(!decision.retryable);
        assert_eq!(decision.delay_hint, None);
    }

    #[test]
    fn built_in_registry_names() {
        assert_eq!(app_engine().name(), "app-engine");
        assert_eq!(common_infra().name(), "common-infra");
        assert_eq!(quota_aware().name(), "quota-aware");
        assert_eq!(rpc().name(), "rpc");
    }

    #[test]
    fn delay_hint_propagates_from_verdict() {
        fn backoff_hint(err: &TransportError) -> Verdict {
            if err.status_code() == Some(409) {
                Verdict::RetryAfter(Duration::from_secs(30))
            } else {
                Verdict::NoMatch
            }
        }
        let pipeline = Pipeline::new("hinted", vec![Predicate::new("hint", backoff_hint)]);
        let decision = pipeline.evaluate(&rest(409, "conflict"));
        assert!(decision.retryable);
        assert_eq!(decision.delay_hint, Some(Duration::from_secs(30)));
    }

    #[test]
    fn evaluate_raw_fails_closed_on_unknown_shape() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "socket closed");
        assert!(!common_infra().evaluate_raw(&err).retryable);
    }

    #[test]
    fn evaluate_raw_classifies_recognized_errors() {
        let api = ApiError::new(503, "Service Unavailable");
        assert!(common_infra().evaluate_raw(&api).retryable);
    }
}
