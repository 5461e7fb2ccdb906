//! Transport layer (HTTP).
//!
//! Exposes the interceptor plus the codec, rewriter, csrf and encoder stages it
//! is built from.

pub mod codec;
pub mod csrf;
pub mod encode;
pub mod interceptor;
pub mod rewrite;

pub use interceptor::{error_response, mta_json_middleware, MtaJson};
pub use rewrite::MtaParams;
