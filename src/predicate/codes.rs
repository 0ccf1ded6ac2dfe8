//! Fixed status-code tables for codes whose retry semantics do not depend
//! on the message body.

use tonic::Code;

use crate::decision::Verdict;
use crate::error::TransportError;

/// Codes every REST backend treats as transient: throttling (429) and the
/// stock transient 5xx family.
pub fn common_transient_codes(err: &TransportError) -> Verdict {
    match err.status_code() {
        Some(429 | 500 | 502 | 503) => Verdict::Retry,
        _ => Verdict::NoMatch,
    }
}

/// Optimistic-concurrency conflicts (409, 412): the losing writer retries
/// against the updated resource. Not part of any built-in pipeline; call
/// sites doing read-modify-write compose it in.
pub fn conflict_codes(err: &TransportError) -> Verdict {
    match err.status_code() {
        Some(409 | 412) => Verdict::Retry,
        _ => Verdict::NoMatch,
    }
}

/// RPC status table. The RPC family encodes retryability in the code alone,
/// so any code outside the transient set is a definitive negative, not a
/// fall-through.
pub fn rpc_transient_codes(err: &TransportError) -> Verdict {
    match err.rpc_code() {
        Some(
            Code::FailedPrecondition | Code::Unavailable | Code::Aborted | Code::ResourceExhausted,
        ) => Verdict::Retry,
        Some(_) => Verdict::Fatal,
        None => Verdict::NoMatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn rest(code: u16) -> TransportError {
        TransportError::Rest(ApiError::new(code, "some text describing error"))
    }

    #[test]
    fn transient_code_table() {
        for code in [429, 500, 502, 503] {
            assert_eq!(common_transient_codes(&rest(code)), Verdict::Retry, "{code}");
        }
        assert_eq!(common_transient_codes(&rest(404)), Verdict::NoMatch);
        assert_eq!(common_transient_codes(&rest(501)), Verdict::NoMatch);
    }

    #[test]
    fn conflict_code_table() {
        assert_eq!(conflict_codes(&rest(409)), Verdict::Retry);
        assert_eq!(conflict_codes(&rest(412)), Verdict::Retry);
        assert_eq!(conflict_codes(&rest(400)), Verdict::NoMatch);
    }

    #[test]
    fn rpc_transient_set_retries() {
        for code in [
            Code::FailedPrecondition,
            Code::Unavailable,
            Code::Aborted,
            Code::ResourceExhausted,
        ] {
            assert_eq!(
                rpc_transient_codes(&TransportError::Rpc(code)),
                Verdict::Retry,
                "{code:?}"
            );
        }
    }

    #[test]
    fn rpc_other_codes_are_fatal() {
        for code in [Code::InvalidArgument, Code::NotFound, Code::PermissionDenied] {
            assert_eq!(
                rpc_transient_codes(&TransportError::Rpc(code)),
                Verdict::Fatal,
                "{code:?}"
            );
        }
    }

    #[test]
    fn rpc_table_ignores_rest_errors() {
        assert_eq!(rpc_transient_codes(&rest(503)), Verdict::NoMatch);
    }
}
