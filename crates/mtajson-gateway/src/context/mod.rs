//! Per-caller context shared across layers.
//!
//! The interceptor never owns session state; the host attaches a caller-scoped
//! `Session` handle to the request and the interceptor writes through it.

pub mod session;

use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, Request};

pub use session::{MemorySession, Session, SessionRegistry, SessionStore};

/// Source address of the caller, when the server recorded one.
pub fn peer_ip(req: &Request) -> Option<IpAddr> {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
}
