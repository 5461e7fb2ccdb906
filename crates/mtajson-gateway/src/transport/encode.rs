//! Response encoder: 2xx responses become `[<body>,<headers>]`.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue},
    response::Response,
};
use bytes::BytesMut;
use futures_util::TryStreamExt;

use mtajson_core::error::{Result, MtaJsonError};
use mtajson_core::protocol::response::{encode_headers, wrap_body};

pub fn headers_json(headers: &HeaderMap) -> String {
    encode_headers(
        headers
            .iter()
            .map(|(k, v)| (k.as_str(), String::from_utf8_lossy(v.as_bytes()).into_owned())),
    )
}

pub async fn encode_response(resp: Response) -> Result<Response> {
    if !resp.status().is_success() {
        return Ok(resp);
    }

    let (mut parts, body) = resp.into_parts();

    let mut raw = BytesMut::new();
    let mut chunks = body.into_data_stream();
    while let Some(chunk) = chunks
        .try_next()
        .await
        .map_err(|e| MtaJsonError::Internal(format!("downstream body failed: {e}")))?
    {
        raw.extend_from_slice(&chunk);
    }

    let wrapped = wrap_body(&raw, &headers_json(&parts.headers));

    if parts.headers.contains_key(header::CONTENT_LENGTH) {
        parts
            .headers
            .insert(header::CONTENT_LENGTH, HeaderValue::from(wrapped.len()));
    }

    tracing::debug!(status = %parts.status, body_len = raw.len(), wrapped_len = wrapped.len(), "response wrapped");
    Ok(Response::from_parts(parts, Body::from(wrapped)))
}
