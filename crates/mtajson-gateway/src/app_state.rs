//! Shared application state for the mtajson gateway.
//!
//! Everything here is built once at startup from the loaded config and shared
//! read-only afterwards; startup errors surface as `Result` instead of panics.

use std::sync::Arc;

use mtajson_core::error::Result;

use crate::config::GatewayConfig;
use crate::context::SessionRegistry;
use crate::services::{ItemStore, ItemsState};
use crate::transport::MtaJson;

#[derive(Clone)]
pub struct AppState {
    cfg: Arc<GatewayConfig>,
    mta: MtaJson,
    sessions: Arc<SessionRegistry>,
    items: Arc<ItemStore>,
}

impl AppState {
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        let mta = MtaJson::new(cfg.mta.clone())?;

        tracing::info!(
            trusted = cfg.mta.whitelist.len(),
            rpc_suffix = %cfg.mta.rpc_suffix,
            native_suffix = %cfg.mta.native_suffix,
            "mta interceptor configured"
        );

        Ok(Self {
            cfg: Arc::new(cfg),
            mta,
            sessions: Arc::new(SessionRegistry::new()),
            items: Arc::new(ItemStore::new()),
        })
    }

    pub fn mta(&self) -> MtaJson {
        self.mta.clone()
    }

    pub fn sessions(&self) -> Arc<SessionRegistry> {
        Arc::clone(&self.sessions)
    }

    pub fn items(&self) -> ItemsState {
        ItemsState {
            store: Arc::clone(&self.items),
            csrf_header: self.cfg.mta.csrf_header.clone(),
            csrf_session_key: self.cfg.mta.csrf_session_key.clone(),
        }
    }
}
