//! Response envelope (`[<body>,<headers>]`).
//!
//! The body is spliced in as raw bytes, not parsed or re-escaped: if the
//! downstream rendered `{"id":1}` the caller receives `[{"id":1},{...}]`.
//! An empty body yields `[,{...}]`, which is what MTA clients expect.

use bytes::{BufMut, Bytes, BytesMut};
use serde_json::{Map, Value};

/// Wrap a raw body and pre-serialized headers into a single chunk.
pub fn wrap_body(body: &[u8], headers_json: &str) -> Bytes {
    let mut out = BytesMut::with_capacity(body.len() + headers_json.len() + 3);
    out.put_u8(b'[');
    out.put_slice(body);
    out.put_u8(b',');
    out.put_slice(headers_json.as_bytes());
    out.put_u8(b']');
    out.freeze()
}

/// Serialize header pairs into a JSON object.
///
/// Names are written in canonical case (`Content-Type`); MTA scripts index
/// the resulting table case-sensitively. Repeated names are folded into one
/// entry joined by `", "`.
pub fn encode_headers<'a, I>(headers: I) -> String
where
    I: IntoIterator<Item = (&'a str, String)>,
{
    let mut map: Map<String, Value> = Map::new();
    for (name, value) in headers {
        let name = canonical_header_name(name);
        match map.get_mut(&name) {
            Some(Value::String(existing)) => {
                existing.push_str(", ");
                existing.push_str(&value);
            }
            _ => {
                map.insert(name, Value::String(value));
            }
        }
    }
    Value::Object(map).to_string()
}

/// `x-csrf-token` => `X-Csrf-Token`.
pub fn canonical_header_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        upper = c == '-';
    }
    out
}
