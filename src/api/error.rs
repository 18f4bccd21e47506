//! HTTP error bodies.
//!
//! The two endpoints report failures differently: `POST /orders` answers with
//! `{"error": ...}` and a 400 or 500 status, `GET /orders` with
//! `{"success": false, "error": ...}` and a 500.

use crate::lifecycle::OrderError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Failure of `POST /orders`.
#[derive(Debug)]
pub enum PlaceOrderError {
    /// The body was not a JSON object with a string `message`.
    BadRequest(String),
    Order(OrderError),
}

impl From<OrderError> for PlaceOrderError {
    fn from(e: OrderError) -> Self {
        PlaceOrderError::Order(e)
    }
}

impl IntoResponse for PlaceOrderError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            PlaceOrderError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            PlaceOrderError::Order(OrderError::MissingInput) => {
                (StatusCode::BAD_REQUEST, OrderError::MissingInput.to_string())
            }
            PlaceOrderError::Order(e) => {
                error!(error = %e, "Order processing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Failure of `GET /orders`.
#[derive(Debug)]
pub struct ListOrdersError(pub OrderError);

impl From<OrderError> for ListOrdersError {
    fn from(e: OrderError) -> Self {
        ListOrdersError(e)
    }
}

impl IntoResponse for ListOrdersError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Listing orders failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "success": false, "error": self.0.to_string() })),
        )
            .into_response()
    }
}
