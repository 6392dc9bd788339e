use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A completed purchase. Immutable once inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i32,
    pub customer_id: i32,
    pub value: BigDecimal,
    pub order_date: DateTime<Utc>,
}

/// An order not yet persisted; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: i32,
    pub value: BigDecimal,
    pub order_date: DateTime<Utc>,
}

/// Predicate for counting a customer's orders.
///
/// `placed_since` is inclusive: an order dated exactly at the bound matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderFilter {
    pub customer_id: i32,
    pub placed_since: Option<DateTime<Utc>>,
}

impl OrderFilter {
    /// Every order the customer ever placed.
    pub fn for_customer(customer_id: i32) -> Self {
        Self {
            customer_id,
            placed_since: None,
        }
    }

    pub fn placed_since(mut self, since: DateTime<Utc>) -> Self {
        self.placed_since = Some(since);
        self
    }

    pub fn matches(&self, order: &Order) -> bool {
        order.customer_id == self.customer_id
            && self
                .placed_since
                .map_or(true, |since| order.order_date >= since)
    }
}
