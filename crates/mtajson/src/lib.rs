//! Top-level facade crate for mtajson.
//!
//! Re-exports the wire primitives and the axum gateway so users can depend on a single crate.

pub mod core {
    pub use mtajson_core::*;
}

pub mod gateway {
    pub use mtajson_gateway::*;
}
