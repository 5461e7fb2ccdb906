//! mtajson core: transport-agnostic wire primitives for the MTA calling convention.
//!
//! This crate defines the request envelope decoder, the case-insensitive
//! options accessor, the response envelope builder and the error surface shared
//! with the gateway. It intentionally carries no HTTP or runtime dependencies
//! so the wire rules can be tested without a server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `MtaJsonError`/`Result` so hostile
//! envelopes never take the process down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{Result, MtaJsonError};
