//! mtajson gateway library entry.
//!
//! This crate wires config, policy, session context, the MTA interceptor and a
//! demo application into an axum stack. It is intended to be consumed by the
//! binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod ops;
pub mod policy;
pub mod router;
pub mod services;
pub mod transport;
