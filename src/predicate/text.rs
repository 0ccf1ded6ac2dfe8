//! Phrase matchers for transient failures reported inside message bodies.
//!
//! These scan the human-readable text the backend returns, scoped to one
//! status code each so an unrelated error with a coincidental phrase cannot
//! match. The quota matchers hang off the wording of the limit description
//! ("... per minute", "... per day") and stop matching if the backend
//! rewords it. Known fragility; the wording is the only discriminator the
//! response offers.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::decision::Verdict;
use crate::error::TransportError;

/// Service-account identity embedded in propagation-delay messages.
static SERVICE_ACCOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._-]+@[A-Za-z0-9._-]+\.iam\.gserviceaccount\.com")
        .expect("service account pattern")
});

/// 409 with an operation-already-running body: the pending operation will
/// finish on its own and the same request succeeds afterwards.
pub fn operation_in_progress(err: &TransportError) -> Verdict {
    if err.status_code() != Some(409) {
        return Verdict::NoMatch;
    }
    if err.message().contains("already in progress") {
        Verdict::Retry
    } else {
        Verdict::NoMatch
    }
}

/// 404 raised while a freshly minted per-product service account is still
/// propagating: the message names the identity it could not resolve.
pub fn identity_propagation_delay(err: &TransportError) -> Verdict {
    if err.status_code() != Some(404) {
        return Verdict::NoMatch;
    }
    let message = err.message();
    if message.contains("Unable to retrieve") && SERVICE_ACCOUNT.is_match(message) {
        Verdict::Retry
    } else {
        Verdict::NoMatch
    }
}

fn quota_exceeded_with(err: &TransportError, qualifier: &str) -> bool {
    err.status_code() == Some(403)
        && err.message().contains("Quota exceeded")
        && err.message().to_lowercase().contains(qualifier)
}

/// 403 for a per-minute quota: the window resets within a minute, so
/// waiting it out succeeds.
pub fn per_minute_quota_exceeded(err: &TransportError) -> Verdict {
    if quota_exceeded_with(err, "per minute") {
        Verdict::Retry
    } else {
        Verdict::NoMatch
    }
}

/// 403 for a per-day quota: no retry loop outlives a daily window, so this
/// is an explicit negative rather than a fall-through.
pub fn per_day_quota_exceeded(err: &TransportError) -> Verdict {
    if quota_exceeded_with(err, "per day") {
        Verdict::Fatal
    } else {
        Verdict::NoMatch
    }
}
