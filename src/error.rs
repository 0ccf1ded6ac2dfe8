//! REST error type and the normalized transport-error view.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One structured sub-error from a REST error envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub message: String,
}

/// Structured error returned by a REST management API: HTTP status, the
/// human-readable body, and zero or more `{reason, message}` sub-errors.
#[derive(Debug, Clone, Error)]
#[error("HTTP {code}: {message}")]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub details: Vec<ApiErrorDetail>,
}

impl ApiError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn with_details(
        code: u16,
        message: impl Into<String>,
        details: Vec<ApiErrorDetail>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            details,
        }
    }

    /// Synthesized 404 for a nested object whose parent resource is gone,
    /// so read paths treat it as deleted instead of failing.
    pub fn not_found(kind: &str, name: &str) -> Self {
        Self::new(404, format!("{} object {} not found", kind, name))
    }
}

/// Normalized view of a transport failure, one variant per error family.
///
/// Accessors are total: a field the family does not carry reads as absent
/// (or empty), never as an error.
#[derive(Debug, Clone)]
pub enum TransportError {
    /// REST-style error with a numeric status, message body, and optional
    /// structured sub-errors.
    Rest(ApiError),
    /// RPC-style error carrying only a status code.
    Rpc(tonic::Code),
}

impl TransportError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Rest(api) => Some(api.code),
            TransportError::Rpc(_) => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            TransportError::Rest(api) => &api.message,
            TransportError::Rpc(_) => "",
        }
    }

    pub fn details(&self) -> &[ApiErrorDetail] {
        match self {
            TransportError::Rest(api) => &api.details,
            TransportError::Rpc(_) => &[],
        }
    }

    pub fn rpc_code(&self) -> Option<tonic::Code> {
        match self {
            TransportError::Rest(_) => None,
            TransportError::Rpc(code) => Some(*code),
        }
    }

    /// True when any structured sub-error carries the given reason.
    pub fn has_reason(&self, reason: &str) -> bool {
        self.details().iter().any(|d| d.reason == reason)
    }
}
