//! Normalize raw transport failures into [`TransportError`].
//!
//! Transports hand errors over in three shapes: a structured [`ApiError`]
//! (possibly buried in a wrapped chain), a `tonic::Status` from an RPC
//! client, or raw HTTP response parts. Anything else is unclassifiable and
//! callers must fail closed.

use serde::Deserialize;

use crate::error::{ApiError, ApiErrorDetail, TransportError};

/// JSON error envelope returned by REST management APIs:
/// `{"error": {"message": ..., "errors": [{"reason", "message"}]}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    errors: Vec<ApiErrorDetail>,
}

/// Walk the `source()` chain of an opaque error and pick out the first
/// recognizable transport failure.
///
/// Returns `None` when no link in the chain is an [`ApiError`] or a
/// `tonic::Status`; the caller must treat that as non-retryable.
pub fn from_dyn(err: &(dyn std::error::Error + 'static)) -> Option<TransportError> {
    let mut current = Some(err);
    while let Some(e) = current {
        if let Some(api) = e.downcast_ref::<ApiError>() {
            return Some(TransportError::Rest(api.clone()));
        }
        if let Some(status) = e.downcast_ref::<tonic::Status>() {
            return Some(TransportError::Rpc(status.code()));
        }
        current = e.source();
    }
    None
}

/// Build the REST view straight from an HTTP response.
///
/// The body is decoded as the standard JSON error envelope when possible;
/// otherwise it is kept verbatim as the message with no sub-errors.
pub fn from_http_parts(status: u16, body: &str) -> TransportError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => TransportError::Rest(ApiError::with_details(
            status,
            envelope.error.message,
            envelope.error.errors,
        )),
        Err(_) => TransportError::Rest(ApiError::new(status, body)),
    }
}

/// True when the chain contains a REST error with exactly this status.
/// Lets orchestration answer "was this a 404" without unwrapping layers.
pub fn has_status_code(err: &(dyn std::error::Error + 'static), code: u16) -> bool {
    matches!(from_dyn(err), Some(TransportError::Rest(api)) if api.code == code)
}
