//! Forgery-protection tokens for trusted, state-changing calls.

use axum::http::{HeaderName, HeaderValue, Method};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use rand_core::{OsRng, RngCore};

use mtajson_core::error::{Result, MtaJsonError};

use crate::context::Session;
use crate::policy::TrustTier;

/// Only trusted callers using something other than GET get a token.
pub fn needs_token(method: &Method, tier: TrustTier) -> bool {
    method != Method::GET && tier.is_trusted()
}

/// `bytes` bytes from the OS CSPRNG, base64 (standard alphabet).
pub fn generate_token(bytes: usize) -> Result<String> {
    let mut buf = vec![0u8; bytes];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|e| MtaJsonError::Internal(format!("csprng failure: {e}")))?;
    Ok(BASE64_STANDARD.encode(buf))
}

/// Issued token, ready to be set on the forwarded request and the response.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub header: HeaderName,
    pub value: HeaderValue,
}

/// Generate a token and record it in the caller's session.
pub async fn issue(
    session: Option<&Session>,
    session_key: &str,
    header: &HeaderName,
    bytes: usize,
) -> Result<IssuedToken> {
    let session = session.ok_or_else(|| {
        MtaJsonError::Internal("no session attached to request; cannot issue csrf token".into())
    })?;

    let token = generate_token(bytes)?;
    let value = HeaderValue::from_str(&token)
        .map_err(|e| MtaJsonError::Internal(format!("token not a header value: {e}")))?;

    session.set(session_key, token).await?;

    Ok(IssuedToken {
        header: header.clone(),
        value,
    })
}
