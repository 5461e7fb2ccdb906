//! Gateway config loader (strict parsing).
//!
//! The file is YAML with `deny_unknown_fields` at every level; a typo is a
//! startup error, never a silently ignored key.

pub mod schema;

use std::fs;
use std::path::Path;

use mtajson_core::error::{Result, MtaJsonError};

pub use schema::{GatewayConfig, GatewaySection, MtaSection};

pub fn load_from_file(path: impl AsRef<Path>) -> Result<GatewayConfig> {
    let path = path.as_ref();
    let s = fs::read_to_string(path).map_err(|e| {
        MtaJsonError::Internal(format!("read config {} failed: {e}", path.display()))
    })?;
    let cfg = load_from_str(&s)?;
    tracing::debug!(path = %path.display(), trusted = cfg.mta.whitelist.len(), "config loaded");
    Ok(cfg)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| MtaJsonError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
