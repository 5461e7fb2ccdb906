//! Request rewriter: decoded params become the native request parameters.
//!
//! The native route is the `.json` one, so the params are re-encoded as a JSON
//! body that `Json<T>` extractors read transparently. The decoded value is also
//! kept in extensions as `MtaParams` for handlers that want it untyped.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue, StatusCode},
};
use bytes::Bytes;
use serde_json::Value;

use mtajson_core::error::{Result, MtaJsonError};

/// Decoded envelope params, as seen by downstream handlers.
#[derive(Debug, Clone, PartialEq)]
pub struct MtaParams(pub Value);

#[async_trait]
impl<S> FromRequestParts<S> for MtaParams
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<MtaParams>()
            .cloned()
            .ok_or((StatusCode::BAD_REQUEST, "no mta params on this request"))
    }
}

/// Replace the parameter surface of `parts` and return the new body.
///
/// The new body has a fixed length, so any inbound `Transfer-Encoding` goes.
pub fn inject_params(parts: &mut Parts, params: Value) -> Result<Bytes> {
    let body = serde_json::to_vec(&params)
        .map_err(|e| MtaJsonError::Internal(format!("params encode failed: {e}")))?;

    parts.headers.remove(header::TRANSFER_ENCODING);
    parts
        .headers
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(body.len()));
    parts.extensions.insert(MtaParams(params));

    Ok(Bytes::from(body))
}

/// No params: the envelope is consumed and nothing replaces it.
pub fn clear_body(parts: &mut Parts) -> Bytes {
    parts.headers.remove(header::CONTENT_TYPE);
    parts.headers.remove(header::TRANSFER_ENCODING);
    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from_static("0"));
    Bytes::new()
}
