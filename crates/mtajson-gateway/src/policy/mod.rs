//! Policy layer (trust tiers, method allowlists).
//!
//! Compiles the configured source-address allowlist into a lookup structure
//! and arbitrates the effective request method for each RPC call.

pub mod allowlist;
pub mod engine;

pub use allowlist::{MethodSet, TrustAllowlist, PRIVATE_METHODS, PUBLIC_METHODS};
pub use engine::{Arbitration, PolicyArbiter, TrustTier};
