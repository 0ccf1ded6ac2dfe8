//! Classifiers keyed on the `reason` field of structured sub-errors.

use crate::decision::Verdict;
use crate::error::TransportError;

/// 403 because the target API is not yet enabled on the project. Enablement
/// propagates asynchronously and the call starts succeeding once it lands.
pub fn api_not_enabled(err: &TransportError) -> Verdict {
    if err.status_code() == Some(403) && err.has_reason("accessNotConfigured") {
        Verdict::Retry
    } else {
        Verdict::NoMatch
    }
}

/// 400 failedPrecondition raised while an IAM or policy change is still
/// propagating.
pub fn failed_precondition_reason(err: &TransportError) -> Verdict {
    if err.status_code() == Some(400) && err.has_reason("failedPrecondition") {
        Verdict::Retry
    } else {
        Verdict::NoMatch
    }
}
