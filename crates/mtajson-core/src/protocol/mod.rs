//! Protocol modules (request envelope, options, response envelope).
//!
//! The MTA convention wraps everything in JSON arrays:
//! - Request: `[params]` or `[params, options]`, at most two elements.
//! - Response: `[<body>,<headers>]`, body spliced in verbatim.
//!
//! All parsers are panic-free: malformed input is reported as `MtaJsonError`.

pub mod envelope;
pub mod options;
pub mod response;

pub use envelope::{decode_envelope, Envelope};
pub use options::Options;
pub use response::wrap_body;
