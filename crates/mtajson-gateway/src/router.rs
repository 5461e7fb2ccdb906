//! Axum router wiring.
//!
//! The demo application routes on native `.json` paths. It is mounted as the
//! fallback service of an outer router that carries the middleware, so the
//! interceptor's path rewrite happens before the inner router matches.

use axum::{middleware, routing::get, Router};

use crate::context::session::attach_session;
use crate::transport::mta_json_middleware;
use crate::{app_state::AppState, ops, services::items};

/// Native application, without the interceptor.
pub fn build_app(state: &AppState) -> Router {
    Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/items.json", get(items::list).post(items::create))
        .route(
            "/items/:file",
            get(items::show).put(items::update).delete(items::destroy),
        )
        .with_state(state.items())
}

/// Native application wrapped by the session layer and the interceptor.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .fallback_service(build_app(&state))
        .layer(middleware::from_fn_with_state(state.mta(), mta_json_middleware))
        .layer(middleware::from_fn_with_state(state.sessions(), attach_session))
}
