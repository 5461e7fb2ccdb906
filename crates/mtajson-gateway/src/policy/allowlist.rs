//! Allowlist compilation and matching utilities.
//!
//! Two kinds of allowlist live here: the source-address allowlist that decides
//! a caller's trust tier, and the fixed method sets each tier may use.

use std::collections::HashSet;
use std::net::IpAddr;

use axum::http::Method;
use mtajson_core::error::{Result, MtaJsonError};

/// Methods anyone may use (read-only).
pub const PUBLIC_METHODS: [&str; 1] = ["GET"];

/// Methods reserved for trusted callers (mutating).
pub const PRIVATE_METHODS: [&str; 3] = ["POST", "PUT", "DELETE"];

/// Named method set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodSet {
    /// `PUBLIC_METHODS` only.
    Public,
    /// `PUBLIC_METHODS` plus `PRIVATE_METHODS`.
    All,
}

impl MethodSet {
    /// Exact, case-sensitive membership.
    pub fn contains(self, method: &str) -> bool {
        match self {
            MethodSet::Public => PUBLIC_METHODS.contains(&method),
            MethodSet::All => {
                PUBLIC_METHODS.contains(&method) || PRIVATE_METHODS.contains(&method)
            }
        }
    }

    pub fn contains_method(self, method: &Method) -> bool {
        self.contains(method.as_str())
    }

    pub fn methods(self) -> Vec<&'static str> {
        match self {
            MethodSet::Public => PUBLIC_METHODS.to_vec(),
            MethodSet::All => PUBLIC_METHODS.iter().chain(PRIVATE_METHODS.iter()).copied().collect(),
        }
    }
}

/// Compiled source-address allowlist.
#[derive(Debug, Clone, Default)]
pub struct TrustAllowlist {
    addrs: HashSet<IpAddr>,
}

impl TrustAllowlist {
    pub fn compile(raw: &[String]) -> Result<Self> {
        let mut addrs = HashSet::with_capacity(raw.len());
        for s in raw {
            let ip: IpAddr = s.trim().parse().map_err(|_| {
                MtaJsonError::BadRequest(format!("invalid whitelist entry: {s} (expected ip address)"))
            })?;
            addrs.insert(ip.to_canonical());
        }
        Ok(Self { addrs })
    }

    /// IPv4-mapped IPv6 peers (`::ffff:127.0.0.1`) match their IPv4 entry.
    pub fn contains(&self, ip: IpAddr) -> bool {
        self.addrs.contains(&ip.to_canonical())
    }
}
