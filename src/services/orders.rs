//! Order service — validates a submitted design and hands it to delivery.
//!
//! DESIGN
//! ======
//! The configurator only produces the order payload; delivery (mail,
//! messaging, CRM) sits behind the `OrderSink` trait so it can be swapped
//! without touching the route. The default sink writes the order to the
//! structured log.

#[cfg(test)]
#[path = "orders_test.rs"]
mod orders_test;

use canvas::catalog::{Background, Category};
use canvas::session::{OrderPayload, SelectionError, SelectionSession};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("invalid design: {0}")]
    InvalidDesign(#[from] SelectionError),
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// A customer's order: contact and venue details plus the chosen design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub full_name: String,
    pub address: String,
    /// Floor of the venue; negative for basements.
    pub floor: i32,
    /// Whether the venue has an elevator.
    pub elevator: bool,
    /// Event date as entered (`YYYY-MM-DD`).
    pub date: String,
    /// Event time as entered (`HH:MM`).
    pub time: String,
    pub design: OrderPayload,
}

/// Delivery channel for accepted orders.
#[async_trait::async_trait]
pub trait OrderSink: Send + Sync {
    /// Deliver one accepted order.
    ///
    /// # Errors
    ///
    /// Returns `OrderError::Delivery` if the channel rejects the order.
    async fn deliver(&self, order: &Order) -> Result<(), OrderError>;
}

/// Sink that records orders in the log.
pub struct LogOrderSink;

#[async_trait::async_trait]
impl OrderSink for LogOrderSink {
    async fn deliver(&self, order: &Order) -> Result<(), OrderError> {
        let design = Category::ALL
            .into_iter()
            .filter_map(|c| order.design.selection(c).map(|id| format!("{c}={id}")))
            .collect::<Vec<_>>()
            .join(",");
        info!(
            full_name = %order.full_name,
            address = %order.address,
            floor = order.floor,
            elevator = order.elevator,
            date = %order.date,
            time = %order.time,
            background = order.design.background_id.as_deref().unwrap_or(""),
            %design,
            "order received"
        );
        Ok(())
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Check required fields and that the design matches the current catalog.
///
/// # Errors
///
/// Returns `MissingField` for blank contact details and `InvalidDesign`
/// when the selection does not fit the catalog.
pub fn validate_order(order: &Order, catalog: &[Background]) -> Result<(), OrderError> {
    let required = [
        ("full_name", &order.full_name),
        ("address", &order.address),
        ("date", &order.date),
        ("time", &order.time),
    ];
    if let Some(&(name, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(OrderError::MissingField(name));
    }

    SelectionSession::from_order_payload(&order.design).validate(catalog)?;
    Ok(())
}
