use crate::api::error::{ListOrdersError, PlaceOrderError};
use crate::lifecycle::{OrderError, OrderSystem};
use crate::model::{Order, OrderRecord};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub order: Order,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListOrdersResponse {
    pub success: bool,
    pub orders: Vec<OrderRecord>,
}

pub async fn health() -> &'static str {
    "order intake is ready"
}

#[instrument(skip_all)]
pub async fn place_order(
    State(system): State<OrderSystem>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<Json<PlaceOrderResponse>, PlaceOrderError> {
    let Json(req) = payload.map_err(|e| PlaceOrderError::BadRequest(e.body_text()))?;
    let message = req.message.unwrap_or_default();

    let limit = system.request_timeout();
    let order = tokio::time::timeout(limit, system.place_order(&message))
        .await
        .map_err(|_| OrderError::TimedOut(limit))??;
    info!(items = order.items.len(), "Order accepted");

    Ok(Json(PlaceOrderResponse {
        success: true,
        order,
        message: "Order recorded successfully".to_string(),
    }))
}

#[instrument(skip_all)]
pub async fn list_orders(
    State(system): State<OrderSystem>,
) -> Result<Json<ListOrdersResponse>, ListOrdersError> {
    let limit = system.request_timeout();
    let orders = tokio::time::timeout(limit, system.list_orders())
        .await
        .map_err(|_| OrderError::TimedOut(limit))??;
    Ok(Json(ListOrdersResponse {
        success: true,
        orders,
    }))
}
