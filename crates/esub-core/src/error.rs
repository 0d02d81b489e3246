//! Shared error type across esub crates.

use thiserror::Error;

/// Reply error codes (stable API, surfaced in `error` replies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Resource quantity could not be normalized.
    MalformedQuantity,
    /// Input payload does not match the job request schema.
    MalformedInput,
    /// Input payload exceeds the configured limit.
    PayloadTooLarge,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Invalid policy configuration.
    BadConfig,
    /// Internal failure (I/O, serialization).
    Internal,
}

impl ErrorCode {
    /// String representation used in JSON replies.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MalformedQuantity => "MALFORMED_QUANTITY",
            ErrorCode::MalformedInput => "MALFORMED_INPUT",
            ErrorCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::BadConfig => "BAD_CONFIG",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, EsubError>;

/// Unified error type used by core and hook.
///
/// A policy rejection is deliberately absent: it is a normal outcome, modeled
/// as `Decision::Reject`.
#[derive(Debug, Error)]
pub enum EsubError {
    #[error("malformed quantity: {0}")]
    MalformedQuantity(String),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("bad config: {0}")]
    Config(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl EsubError {
    /// Map internal error to a stable reply code.
    pub fn code(&self) -> ErrorCode {
        match self {
            EsubError::MalformedQuantity(_) => ErrorCode::MalformedQuantity,
            EsubError::MalformedInput(_) => ErrorCode::MalformedInput,
            EsubError::PayloadTooLarge => ErrorCode::PayloadTooLarge,
            EsubError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            EsubError::Config(_) => ErrorCode::BadConfig,
            EsubError::Internal(_) => ErrorCode::Internal,
        }
    }
}
