//! Decode-once codec for inbound HTTP requests.
//!
//! - POST to `*.mta` with a non-empty body => `Inbound::Rpc`
//! - Everything else => `Inbound::Passthrough`, untouched
//!
//! Bodies are only buffered once suffix and method already match.

use std::net::IpAddr;

use axum::{
    body::Body,
    extract::Request,
    http::{header, request::Parts, uri::PathAndQuery, Method, Uri},
};
use bytes::{Bytes, BytesMut};
use futures_util::TryStreamExt;
use mtajson_core::error::{Result, MtaJsonError};

use crate::config::MtaSection;
use crate::context::peer_ip;

/// An RPC call with its body already buffered.
#[derive(Debug)]
pub struct RpcRequest {
    pub parts: Parts,
    pub peer: Option<IpAddr>,
    pub body: Bytes,
}

#[derive(Debug)]
pub enum Inbound {
    Rpc(RpcRequest),
    Passthrough(Request),
}

/// Cheap pre-check: suffix and method only, body untouched.
pub fn is_rpc_candidate(method: &Method, uri: &Uri, rpc_suffix: &str) -> bool {
    method == Method::POST && uri.path().ends_with(rpc_suffix)
}

pub async fn decode(req: Request, cfg: &MtaSection) -> Result<Inbound> {
    if !is_rpc_candidate(req.method(), req.uri(), &cfg.rpc_suffix) {
        return Ok(Inbound::Passthrough(req));
    }

    let peer = peer_ip(&req);
    let (parts, body) = req.into_parts();

    if let Some(len) = declared_len(&parts) {
        if len > cfg.max_body_bytes {
            return Err(MtaJsonError::PayloadTooLarge);
        }
    }

    let body = read_limited(body, cfg.max_body_bytes).await?;

    if body.is_empty() {
        return Ok(Inbound::Passthrough(Request::from_parts(parts, Body::empty())));
    }

    Ok(Inbound::Rpc(RpcRequest { parts, peer, body }))
}

/// Buffer a body, failing with `PayloadTooLarge` only once `limit` is crossed.
/// Any other stream failure (e.g. the client hung up mid-body) is a bad request.
pub async fn read_limited(body: Body, limit: usize) -> Result<Bytes> {
    let mut buf = BytesMut::new();
    let mut chunks = body.into_data_stream();
    while let Some(chunk) = chunks.try_next().await.map_err(|e| {
        tracing::debug!(error = %e, "rpc body read failed");
        MtaJsonError::BadRequest(format!("failed to read request body: {e}"))
    })? {
        if buf.len() + chunk.len() > limit {
            return Err(MtaJsonError::PayloadTooLarge);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

/// Swap the RPC suffix for the native one, keeping the query string.
pub fn rewrite_path(uri: &Uri, rpc_suffix: &str, native_suffix: &str) -> Result<Uri> {
    let stem = uri.path().strip_suffix(rpc_suffix).ok_or_else(|| {
        MtaJsonError::Internal(format!("path {} does not end with {rpc_suffix}", uri.path()))
    })?;

    let mut pq = format!("{stem}{native_suffix}");
    if let Some(q) = uri.query() {
        pq.push('?');
        pq.push_str(q);
    }
    let pq: PathAndQuery = pq
        .parse()
        .map_err(|e| MtaJsonError::Internal(format!("rewritten path invalid: {e}")))?;

    let mut uri_parts = uri.clone().into_parts();
    uri_parts.path_and_query = Some(pq);
    Uri::from_parts(uri_parts).map_err(|e| MtaJsonError::Internal(format!("rewritten uri invalid: {e}")))
}

fn declared_len(parts: &Parts) -> Option<usize> {
    parts
        .headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
