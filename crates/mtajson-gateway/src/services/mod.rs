//! Built-in demo services.
//!
//! A tiny CRUD resource served on native `.json` routes so the interceptor has
//! something realistic to wrap.

pub mod items;

pub use items::{ItemStore, ItemsState};
