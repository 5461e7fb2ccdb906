use std::net::IpAddr;

use axum::http::Method;
use mtajson_core::error::{Result, MtaJsonError};
use mtajson_core::protocol::Options;

use super::allowlist::{MethodSet, TrustAllowlist};

/// Caller classification derived from the source address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustTier {
    Trusted,
    Untrusted,
}

impl TrustTier {
    pub fn is_trusted(self) -> bool {
        matches!(self, TrustTier::Trusted)
    }

    /// Methods this tier may end up using.
    pub fn allowed(self) -> MethodSet {
        match self {
            TrustTier::Trusted => MethodSet::All,
            TrustTier::Untrusted => MethodSet::Public,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrustTier::Trusted => "trusted",
            TrustTier::Untrusted => "untrusted",
        }
    }
}

/// Outcome of a successful arbitration.
#[derive(Debug, Clone)]
pub struct Arbitration {
    pub tier: TrustTier,
    /// Effective method: the inbound one, or the options override.
    pub method: Method,
    pub overridden: bool,
}

/// Method/trust arbiter.
/// Construct once at startup, then share via Arc.
#[derive(Debug, Clone)]
pub struct PolicyArbiter {
    trust: TrustAllowlist,
}

impl PolicyArbiter {
    pub fn new(whitelist: &[String]) -> Result<Self> {
        Ok(Self {
            trust: TrustAllowlist::compile(whitelist)?,
        })
    }

    /// Peers with no known address are never trusted.
    pub fn tier(&self, peer: Option<IpAddr>) -> TrustTier {
        match peer {
            Some(ip) if self.trust.contains(ip) => TrustTier::Trusted,
            _ => TrustTier::Untrusted,
        }
    }

    /// Apply `options.method` if it names any known method.
    ///
    /// Membership is checked against the union of both sets regardless of
    /// tier; `verify` is what enforces the tier. Returns whether the method
    /// changed.
    pub fn apply_options(&self, method: &mut Method, options: &Options) -> bool {
        let Some(requested) = options.method() else {
            return false;
        };
        if !MethodSet::All.contains(requested) {
            tracing::debug!(requested, "ignoring unknown method override");
            return false;
        }
        match Method::from_bytes(requested.as_bytes()) {
            Ok(m) => {
                let changed = *method != m;
                *method = m;
                changed
            }
            Err(_) => false,
        }
    }

    /// Reject methods outside the tier-scoped set.
    pub fn verify(&self, tier: TrustTier, method: &Method) -> Result<()> {
        if tier.allowed().contains_method(method) {
            Ok(())
        } else {
            Err(MtaJsonError::MethodNotAllowed(method.as_str().to_string()))
        }
    }

    /// Tier, then override, then verification.
    pub fn arbitrate(
        &self,
        peer: Option<IpAddr>,
        method: Method,
        options: Option<&Options>,
    ) -> Result<Arbitration> {
        let tier = self.tier(peer);
        let mut method = method;
        let overridden = match options {
            Some(o) => self.apply_options(&mut method, o),
            None => false,
        };

        if let Err(e) = self.verify(tier, &method) {
            tracing::warn!(tier = tier.as_str(), method = %method, ?peer, "method rejected");
            return Err(e);
        }

        tracing::debug!(tier = tier.as_str(), method = %method, overridden, "arbitration passed");
        Ok(Arbitration {
            tier,
            method,
            overridden,
        })
    }
}
