use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;

use mtajson_core::error::Result;

use super::peer_ip;

/// Caller-scoped key/value session state owned by the host.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String) -> Result<()>;
}

/// Request extension giving handlers access to the caller's session.
#[derive(Clone)]
pub struct Session(pub Arc<dyn SessionStore>);

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self(store)
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).await
    }

    pub async fn set(&self, key: &str, value: String) -> Result<()> {
        self.0.set(key, value).await
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Session(..)")
    }
}

/// In-process session (no persistence).
#[derive(Debug, Default)]
pub struct MemorySession {
    values: DashMap<String, String>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySession {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).map(|v| v.value().clone())
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

/// Sessions keyed by peer address. Good enough for the demo server and tests;
/// real deployments bring their own cookie- or server-backed store.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    by_peer: DashMap<Option<IpAddr>, Arc<MemorySession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_for(&self, peer: Option<IpAddr>) -> Arc<MemorySession> {
        self.by_peer
            .entry(peer)
            .or_insert_with(|| Arc::new(MemorySession::new()))
            .value()
            .clone()
    }
}

/// Middleware: attach the caller's `Session` before inner layers run.
pub async fn attach_session(
    State(registry): State<Arc<SessionRegistry>>,
    mut req: Request,
    next: Next,
) -> Response {
    let store = registry.session_for(peer_ip(&req));
    req.extensions_mut().insert(Session::new(store));
    next.run(req).await
}
