//! The MTA interceptor.
//!
//! Pipeline for every matching request:
//! 1. decode (suffix/method/body check, envelope, arity)
//! 2. arbitrate (trust tier, options override, method verification)
//! 3. rewrite (path suffix, params, optional csrf token)
//! 4. forward, then wrap 2xx responses
//!
//! Errors from steps 1-3 abort before anything reaches the downstream.

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderName, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::Instrument;

use mtajson_core::error::{ClientCode, Result, MtaJsonError};
use mtajson_core::protocol::decode_envelope;

use crate::config::MtaSection;
use crate::context::Session;
use crate::policy::PolicyArbiter;
use crate::transport::codec::{self, Inbound, RpcRequest};
use crate::transport::{csrf, encode, rewrite};

/// Interceptor built once from immutable config; cheap to clone.
#[derive(Clone)]
pub struct MtaJson {
    inner: Arc<MtaJsonInner>,
}

struct MtaJsonInner {
    cfg: MtaSection,
    arbiter: PolicyArbiter,
    csrf_header: HeaderName,
}

impl MtaJson {
    pub fn new(cfg: MtaSection) -> Result<Self> {
        cfg.validate()?;
        let arbiter = PolicyArbiter::new(&cfg.whitelist)?;
        let csrf_header = HeaderName::from_bytes(cfg.csrf_header.as_bytes())
            .map_err(|e| MtaJsonError::BadRequest(format!("invalid csrf header: {e}")))?;

        Ok(Self {
            inner: Arc::new(MtaJsonInner {
                cfg,
                arbiter,
                csrf_header,
            }),
        })
    }

    /// Run one request through the pipeline. `downstream` is only called
    /// once decoding and arbitration have succeeded, or for pass-through.
    pub async fn handle<F, Fut>(&self, req: Request, downstream: F) -> Result<Response>
    where
        F: FnOnce(Request) -> Fut,
        Fut: Future<Output = Response>,
    {
        let rpc = match codec::decode(req, &self.inner.cfg).await? {
            Inbound::Passthrough(req) => return Ok(downstream(req).await),
            Inbound::Rpc(rpc) => rpc,
        };

        let span = tracing::debug_span!("mta", path = %rpc.parts.uri.path(), peer = ?rpc.peer);
        self.handle_rpc(rpc, downstream).instrument(span).await
    }

    async fn handle_rpc<F, Fut>(&self, rpc: RpcRequest, downstream: F) -> Result<Response>
    where
        F: FnOnce(Request) -> Fut,
        Fut: Future<Output = Response>,
    {
        let cfg = &self.inner.cfg;
        let RpcRequest { mut parts, peer, body } = rpc;

        parts.uri = codec::rewrite_path(&parts.uri, &cfg.rpc_suffix, &cfg.native_suffix)?;

        let envelope = decode_envelope(&body).map_err(|e| {
            tracing::warn!(error = %e, "envelope rejected");
            e
        })?;

        let arb = self
            .inner
            .arbiter
            .arbitrate(peer, parts.method.clone(), envelope.options.as_ref())?;
        parts.method = arb.method.clone();

        let body = match envelope.params {
            Some(params) => rewrite::inject_params(&mut parts, params)?,
            None => rewrite::clear_body(&mut parts),
        };

        let token = if csrf::needs_token(&arb.method, arb.tier) {
            let issued = csrf::issue(
                parts.extensions.get::<Session>(),
                &cfg.csrf_session_key,
                &self.inner.csrf_header,
                cfg.token_bytes,
            )
            .await?;
            parts.headers.insert(issued.header.clone(), issued.value.clone());
            tracing::debug!("csrf token issued");
            Some(issued)
        } else {
            None
        };

        let mut resp = downstream(Request::from_parts(parts, Body::from(body))).await;

        if let Some(issued) = token {
            resp.headers_mut().insert(issued.header, issued.value);
        }

        encode::encode_response(resp).await
    }
}

/// Status used when an error is rendered for the caller.
pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::MalformedEnvelope | ClientCode::EnvelopeArity | ClientCode::BadRequest => {
            StatusCode::BAD_REQUEST
        }
        ClientCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ClientCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ClientCode::UnsupportedVersion | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn error_response(err: &MtaJsonError) -> Response {
    let code = err.client_code();
    (
        status_for(code),
        Json(json!({
            "code": code.as_str(),
            "msg": err.to_string(),
        })),
    )
        .into_response()
}

/// axum adapter: `middleware::from_fn_with_state(mta, mta_json_middleware)`.
pub async fn mta_json_middleware(State(mta): State<MtaJson>, req: Request, next: Next) -> Response {
    match mta.handle(req, |r| next.run(r)).await {
        Ok(resp) => resp,
        Err(e) => error_response(&e),
    }
}
