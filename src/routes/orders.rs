//! Order submission route.

#[cfg(test)]
#[path = "orders_test.rs"]
mod orders_test;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use tracing::{error, warn};

use crate::services::orders::{self, Order, OrderError};
use crate::state::AppState;

/// `POST /api/orders` — validate the design against the live catalog and
/// hand the order to the configured sink.
pub async fn submit_order(State(state): State<AppState>, Json(order): Json<Order>) -> Response {
    let snapshot = state.catalog.read().await.snapshot();
    if let Err(err) = orders::validate_order(&order, &snapshot) {
        warn!(error = %err, "order rejected");
        return (order_error_to_status(&err), err.to_string()).into_response();
    }

    if let Err(err) = state.orders.deliver(&order).await {
        error!(error = %err, "order delivery failed");
        return (order_error_to_status(&err), err.to_string()).into_response();
    }

    (StatusCode::ACCEPTED, Json(serde_json::json!({ "ok": true }))).into_response()
}

pub(crate) fn order_error_to_status(err: &OrderError) -> StatusCode {
    match err {
        OrderError::MissingField(_) | OrderError::InvalidDesign(_) => StatusCode::BAD_REQUEST,
        OrderError::Delivery(_) => StatusCode::BAD_GATEWAY,
    }
}
