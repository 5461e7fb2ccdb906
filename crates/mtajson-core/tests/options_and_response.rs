//! Options accessor and response envelope tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use serde_json::{json, Value};

use mtajson_core::protocol::options::Options;
use mtajson_core::protocol::response::{canonical_header_name, encode_headers, wrap_body};

fn options(v: Value) -> Options {
    match v {
        Value::Object(map) => Options::new(map),
        _ => panic!("options fixture must be an object"),
    }
}

#[test]
fn option_keys_are_case_insensitive() {
    let o = options(json!({ "MeThOd": "DELETE", "other": 1 }));
    assert_eq!(o.method(), Some("DELETE"));
    assert_eq!(o.get("OTHER"), Some(&json!(1)));
    assert!(o.get("missing").is_none());
}

#[test]
fn exact_key_wins_over_case_variant() {
    let o = options(json!({ "METHOD": "PUT", "method": "GET" }));
    assert_eq!(o.method(), Some("GET"));
}

#[test]
fn non_string_method_is_ignored() {
    let o = options(json!({ "method": 5 }));
    assert!(o.method().is_none());
    assert_eq!(o.len(), 1);
}

#[test]
fn wrap_splices_body_verbatim() {
    let wrapped = wrap_body(br#"{"id":1}"#, r#"{"x":"y"}"#);
    assert_eq!(&wrapped[..], br#"[{"id":1},{"x":"y"}]"#);
    let parsed: Value = serde_json::from_slice(&wrapped).unwrap();
    assert_eq!(parsed[0]["id"], 1);
}

#[test]
fn wrap_empty_body_leaves_leading_gap() {
    let wrapped = wrap_body(b"", r#"{"a":"b"}"#);
    assert_eq!(&wrapped[..], br#"[,{"a":"b"}]"#);
}

#[test]
fn wrap_does_not_escape_invalid_body() {
    let wrapped = wrap_body(b"not \"json\"", "{}");
    assert_eq!(&wrapped[..], b"[not \"json\",{}]");
}

#[test]
fn repeated_headers_are_folded() {
    let s = encode_headers(vec![
        ("set-cookie", "a=1".to_string()),
        ("content-type", "application/json".to_string()),
        ("set-cookie", "b=2".to_string()),
    ]);
    let v: Value = serde_json::from_str(&s).unwrap();
    assert_eq!(v["Set-Cookie"], "a=1, b=2");
    assert_eq!(v["Content-Type"], "application/json");
}

#[test]
fn header_names_are_canonicalized() {
    assert_eq!(canonical_header_name("content-length"), "Content-Length");
    assert_eq!(canonical_header_name("x-csrf-token"), "X-Csrf-Token");
    assert_eq!(canonical_header_name("ETAG"), "Etag");

    let s = encode_headers(vec![
        ("Content-Type", "text/plain".to_string()),
        ("content-type", "charset=utf-8".to_string()),
    ]);
    let v: Value = serde_json::from_str(&s).unwrap();
    assert_eq!(v, json!({ "Content-Type": "text/plain, charset=utf-8" }));
}
