//! Request envelope (`[params]` / `[params, options]`).
//!
//! MTA's `callRemote` may send several arguments, but the gateway only honours
//! the first two: a parameter table and an options table. Anything longer is
//! rejected outright rather than truncated.

use serde_json::Value;

use crate::error::{Result, MtaJsonError};
use crate::protocol::options::Options;

/// Maximum number of elements an envelope may carry.
pub const MAX_ELEMENTS: usize = 2;

/// Decoded request envelope.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    /// Parameter value to inject. `None` when absent or the zero sentinel;
    /// `Some(Value::Null)` when the caller sent `null`.
    pub params: Option<Value>,
    /// Options table, if the caller sent one.
    pub options: Option<Options>,
}

impl Envelope {
    /// Method requested through the options table, if any.
    pub fn requested_method(&self) -> Option<&str> {
        self.options.as_ref().and_then(Options::method)
    }
}

/// Decode an envelope from a raw request body.
pub fn decode_envelope(body: &[u8]) -> Result<Envelope> {
    let json: Value = serde_json::from_slice(body)
        .map_err(|e| MtaJsonError::MalformedEnvelope(format!("invalid json: {e}")))?;

    let items = match json {
        Value::Array(items) => items,
        other => {
            return Err(MtaJsonError::MalformedEnvelope(format!(
                "expected a JSON array, got {}",
                kind(&other)
            )))
        }
    };

    if items.len() > MAX_ELEMENTS {
        return Err(MtaJsonError::EnvelopeArity(items.len()));
    }

    let mut it = items.into_iter();
    let params = it.next();
    let options = match it.next() {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) => Some(Options::new(map)),
        Some(other) => {
            return Err(MtaJsonError::MalformedEnvelope(format!(
                "options must be an object, got {}",
                kind(&other)
            )))
        }
    };

    let params = params.filter(|p| !is_zero_sentinel(p));
    tracing::trace!(has_params = params.is_some(), has_options = options.is_some(), "envelope decoded");

    Ok(Envelope { params, options })
}

/// `0` is how `callRemote` spells "no parameters". JSON `null` is a real value.
pub fn is_zero_sentinel(v: &Value) -> bool {
    match v {
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
