use std::net::{IpAddr, SocketAddr};

use axum::http::HeaderName;
use serde::Deserialize;
use mtajson_core::error::{Result, MtaJsonError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub gateway: GatewaySection,

    #[serde(default)]
    pub mta: MtaSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(MtaJsonError::UnsupportedVersion);
        }

        self.gateway.validate()?;
        self.mta.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewaySection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl GatewaySection {
    pub fn validate(&self) -> Result<()> {
        self.listen.parse::<SocketAddr>().map_err(|_| {
            MtaJsonError::BadRequest(format!(
                "gateway.listen must be a valid SocketAddr: {}",
                self.listen
            ))
        })?;
        Ok(())
    }
}

/// Settings of the MTA interceptor. Read once at startup, never mutated.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MtaSection {
    /// Source addresses treated as trusted.
    #[serde(default = "default_whitelist")]
    pub whitelist: Vec<String>,

    #[serde(default = "default_rpc_suffix")]
    pub rpc_suffix: String,

    #[serde(default = "default_native_suffix")]
    pub native_suffix: String,

    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,

    #[serde(default = "default_csrf_session_key")]
    pub csrf_session_key: String,

    /// Entropy of issued forgery tokens, in bytes.
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for MtaSection {
    fn default() -> Self {
        Self {
            whitelist: default_whitelist(),
            rpc_suffix: default_rpc_suffix(),
            native_suffix: default_native_suffix(),
            csrf_header: default_csrf_header(),
            csrf_session_key: default_csrf_session_key(),
            token_bytes: default_token_bytes(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl MtaSection {
    pub fn validate(&self) -> Result<()> {
        for ip in &self.whitelist {
            ip.parse::<IpAddr>().map_err(|_| {
                MtaJsonError::BadRequest(format!("mta.whitelist entry is not an ip address: {ip}"))
            })?;
        }
        for (name, suffix) in [("rpc_suffix", &self.rpc_suffix), ("native_suffix", &self.native_suffix)] {
            if suffix.len() < 2 || !suffix.starts_with('.') {
                return Err(MtaJsonError::BadRequest(format!(
                    "mta.{name} must start with '.' and name an extension"
                )));
            }
        }
        if self.rpc_suffix == self.native_suffix {
            return Err(MtaJsonError::BadRequest(
                "mta.rpc_suffix and mta.native_suffix must differ".into(),
            ));
        }
        HeaderName::from_bytes(self.csrf_header.as_bytes()).map_err(|_| {
            MtaJsonError::BadRequest(format!("mta.csrf_header is not a valid header name: {}", self.csrf_header))
        })?;
        if self.csrf_session_key.is_empty() {
            return Err(MtaJsonError::BadRequest("mta.csrf_session_key must not be empty".into()));
        }
        if !(32..=256).contains(&self.token_bytes) {
            return Err(MtaJsonError::BadRequest(
                "mta.token_bytes must be between 32 and 256".into(),
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(MtaJsonError::BadRequest("mta.max_body_bytes must be > 0".into()));
        }
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_whitelist() -> Vec<String> {
    vec!["127.0.0.1".into()]
}
fn default_rpc_suffix() -> String {
    ".mta".into()
}
fn default_native_suffix() -> String {
    ".json".into()
}
fn default_csrf_header() -> String {
    "X-CSRF-Token".into()
}
fn default_csrf_session_key() -> String {
    "_csrf_token".into()
}
fn default_token_bytes() -> usize {
    32
}
fn default_max_body_bytes() -> usize {
    1024 * 1024
}
