//! End-to-end: real listener, demo app, session layer and interceptor.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use mtajson_gateway::{app_state::AppState, config, router};

async fn spawn(yaml: &str) -> SocketAddr {
    let cfg = config::load_from_str(yaml).unwrap();
    let app = router::build_router(AppState::new(cfg).unwrap());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
            .await
            .unwrap();
    });
    addr
}

async fn send(addr: SocketAddr, method: &str, path: &str, body: &str) -> (u16, String) {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let req = format!(
        "{method} {path} HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    stream.write_all(req.as_bytes()).await.unwrap();

    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await.unwrap();
    let text = String::from_utf8(buf).unwrap();
    let (head, body) = text.split_once("\r\n\r\n").unwrap();
    let status = head.split_whitespace().nth(1).unwrap().parse().unwrap();
    (status, body.to_string())
}

#[tokio::test]
async fn trusted_caller_round_trip() {
    let addr = spawn("version: 1\n").await;

    let (status, body) = send(addr, "POST", "/items.mta", r#"[{"name":"cake","qty":2}]"#).await;
    assert_eq!(status, 201);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v[0]["name"], "cake");
    assert_eq!(v[0]["qty"], 2);
    assert!(v[1]["X-Csrf-Token"].is_string());
    assert_eq!(v[1]["Content-Type"], "application/json");

    let (status, body) = send(addr, "POST", "/items.mta", r#"[0,{"method":"GET"}]"#).await;
    assert_eq!(status, 200);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v[0][0]["name"], "cake");
    assert!(v[1].get("X-Csrf-Token").is_none());

    let (status, body) = send(addr, "POST", "/items/1.mta", r#"[{"name":"pie"},{"method":"PUT"}]"#).await;
    assert_eq!(status, 200);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v[0]["name"], "pie");

    let (status, _) = send(addr, "POST", "/items/1.mta", r#"[0,{"method":"DELETE"}]"#).await;
    assert_eq!(status, 204);

    let (status, body) = send(addr, "POST", "/items/1.mta", r#"[0,{"method":"GET"}]"#).await;
    assert_eq!(status, 404);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["error"], "not found");
}

#[tokio::test]
async fn native_routes_are_untouched() {
    let addr = spawn("version: 1\n").await;

    let (status, body) = send(addr, "GET", "/healthz", "").await;
    assert_eq!(status, 200);
    assert_eq!(body, "ok");

    let (status, body) = send(addr, "GET", "/items.json", "").await;
    assert_eq!(status, 200);
    assert_eq!(body, "[]");

    let (status, _) = send(addr, "POST", "/items.json", r#"{"name":"x"}"#).await;
    assert_eq!(status, 403, "native mutation without a token is refused by the app");
}

#[tokio::test]
async fn envelope_errors_are_rendered() {
    let addr = spawn("version: 1\n").await;

    let (status, body) = send(addr, "POST", "/items.mta", "[1,2,3]").await;
    assert_eq!(status, 400);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["code"], "ENVELOPE_ARITY");

    let (status, body) = send(addr, "POST", "/items.mta", "[{").await;
    assert_eq!(status, 400);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["code"], "MALFORMED_ENVELOPE");
}

#[tokio::test]
async fn untrusted_caller_is_read_only() {
    let addr = spawn("version: 1\nmta:\n  whitelist: []\n").await;

    let (status, body) = send(addr, "POST", "/items.mta", r#"[{"name":"cake"}]"#).await;
    assert_eq!(status, 405);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["code"], "METHOD_NOT_ALLOWED");

    let (status, _) = send(addr, "POST", "/items.mta", r#"[{"name":"cake"},{"method":"POST"}]"#).await;
    assert_eq!(status, 405);

    let (status, body) = send(addr, "POST", "/items.mta", r#"[0,{"method":"GET"}]"#).await;
    assert_eq!(status, 200);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v[0], Value::Array(vec![]));
}
