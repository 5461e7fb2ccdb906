//! mtajson gateway
//!
//! - Native routes: /items.json, /items/{id}.json, /healthz
//! - MTA routes: the same paths with `.mta`, POST with an envelope body
//! - Config: `mtajson.yaml`, or the path given as first argument

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use mtajson_gateway::{app_state, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "mtajson.yaml".to_string());
    let cfg = config::load_from_file(&path).expect("config load failed");
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .expect("gateway.listen must be a valid SocketAddr");

    let state = app_state::AppState::new(cfg).expect("app state init failed");
    let app = router::build_router(state);

    tracing::info!(%listen, "mtajson-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await.expect("failed to bind");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .expect("server failed");
}
