//! Predicate verdicts and the caller-facing retry decision.

use std::time::Duration;

/// Tri-state result of one predicate.
///
/// `NoMatch` is deliberately distinct from `Fatal`: a predicate outside its
/// jurisdiction defers to the rest of the pipeline, while a predicate that
/// matched and knows the error is permanent terminates evaluation with a
/// negative decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Matched; retry with the caller's own backoff.
    Retry,
    /// Matched; retry after at least the given delay.
    RetryAfter(Duration),
    /// Matched; do not retry.
    Fatal,
    /// The predicate does not apply to this error.
    NoMatch,
}

impl Verdict {
    /// The decision a matched verdict resolves to; `NoMatch` resolves to
    /// none and the pipeline keeps looking.
    pub fn into_decision(self) -> Option<RetryDecision> {
        match self {
            Verdict::Retry => Some(RetryDecision::retry()),
            Verdict::RetryAfter(delay) => Some(RetryDecision::retry_after(delay)),
            Verdict::Fatal => Some(RetryDecision::no_retry()),
            Verdict::NoMatch => None,
        }
    }
}

/// Final classification handed to the retry loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryDecision {
    /// Whether the operation should be reattempted.
    pub retryable: bool,
    /// Minimum wait before the next attempt; `None` leaves backoff entirely
    /// to the caller's policy.
    pub delay_hint: Option<Duration>,
}

impl RetryDecision {
    pub fn retry() -> Self {
        Self {
            retryable: true,
            delay_hint: None,
        }
    }

    pub fn retry_after(delay: Duration) -> Self {
        Self {
            retryable: true,
            delay_hint: Some(delay),
        }
    }

    pub fn no_retry() -> Self {
        Self {
            retryable: false,
            delay_hint: None,
        }
    }
}
