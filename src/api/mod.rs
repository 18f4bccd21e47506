//! # HTTP Surface
//!
//! | Route | Success | Failure |
//! |-------|---------|---------|
//! | `POST /orders` `{"message": "..."}` | 200 `{success, order, message}` | 400 / 500 `{error}` |
//! | `GET /orders` | 200 `{success, orders}` | 500 `{success: false, error}` |
//! | `GET /healthz` | 200 text | |
//!
//! Handlers only translate HTTP to [`OrderSystem`] calls and back. Each call
//! is bounded by [`OrderSystem::request_timeout`]; running past it is reported
//! in the same error shapes as any other failure.

pub mod error;
pub mod handlers;

use crate::lifecycle::OrderSystem;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

pub fn build_app(system: OrderSystem) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health))
        .route("/orders", post(handlers::place_order).get(handlers::list_orders))
        .with_state(system)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
}
