//! Retry classification for cloud provisioning API errors.
//!
//! Given the error a management-API call produced, decide whether the call
//! should be retried and with what delay hint. Classification is pure and
//! total: malformed or unrecognized inputs never panic, they classify as
//! not retryable.
//!
//! The pipeline is chosen per call site because backend families encode
//! retryability differently: REST services combine HTTP status with free
//! text, RPC services use status codes alone.

pub mod adapt;
pub mod decision;
pub mod error;
pub mod pipeline;
pub mod predicate;

pub use decision::{RetryDecision, Verdict};
pub use error::{ApiError, ApiErrorDetail, TransportError};
pub use pipeline::Pipeline;
pub use predicate::Predicate;
