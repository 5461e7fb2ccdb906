//! Shared error type across mtajson crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Request body is not a decodable envelope.
    MalformedEnvelope,
    /// Envelope carries more than two elements.
    EnvelopeArity,
    /// Effective method rejected for the caller's trust tier.
    MethodNotAllowed,
    /// Payload too large.
    PayloadTooLarge,
    /// Invalid input / configuration.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::MalformedEnvelope => "MALFORMED_ENVELOPE",
            ClientCode::EnvelopeArity => "ENVELOPE_ARITY",
            ClientCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MtaJsonError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MtaJsonError {
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
    #[error("number of JSON elements > 2: actual {0}")]
    EnvelopeArity(usize),
    #[error("request method {0} not allowed")]
    MethodNotAllowed(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MtaJsonError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MtaJsonError::MalformedEnvelope(_) => ClientCode::MalformedEnvelope,
            MtaJsonError::EnvelopeArity(_) => ClientCode::EnvelopeArity,
            MtaJsonError::MethodNotAllowed(_) => ClientCode::MethodNotAllowed,
            MtaJsonError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            MtaJsonError::BadRequest(_) => ClientCode::BadRequest,
            MtaJsonError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MtaJsonError::Internal(_) => ClientCode::Internal,
        }
    }
}
