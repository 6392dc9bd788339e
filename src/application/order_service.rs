use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{Duration, Utc};
use log::{debug, info, warn};

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order};
use crate::domain::ports::OrderRepository;

use super::payment_registry::PaymentRegistry;

/// Hours subtracted from the system clock when an order is stamped.
///
/// Orders read wall-clock time directly, not the injected [`Clock`] used for
/// eligibility checks.
///
/// [`Clock`]: crate::domain::clock::Clock
pub const ORDER_DATE_OFFSET_HOURS: i64 = 3;

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    payments: PaymentRegistry,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, payments: PaymentRegistry) -> Self {
        Self { orders, payments }
    }

    /// Settles `payment_value` with the named method and records the order.
    ///
    /// The order is inserted even when the method reports a failed
    /// settlement.
    pub fn pay_order(
        &self,
        payment_method: &str,
        payment_value: BigDecimal,
        customer_id: i32,
    ) -> Result<Order, DomainError> {
        let method = self
            .payments
            .resolve(payment_method)
            .ok_or_else(|| DomainError::UnsupportedPaymentMethod(payment_method.to_string()))?;

        debug!(
            "Paying {} for customer {} with {}",
            payment_value,
            customer_id,
            method.method()
        );
        if !method.pay(&payment_value, customer_id) {
            warn!(
                "Settlement of {} via {} reported failure for customer {}; recording order anyway",
                payment_value,
                method.method(),
                customer_id
            );
        }

        self.insert_order(customer_id, payment_value)
    }

    /// Persists an order stamped with the shifted system time.
    pub fn insert_order(&self, customer_id: i32, value: BigDecimal) -> Result<Order, DomainError> {
        let order = self.orders.insert(NewOrder {
            customer_id,
            value,
            order_date: Utc::now() - Duration::hours(ORDER_DATE_OFFSET_HOURS),
        })?;
        info!(
            "Recorded order {} of {} for customer {}",
            order.id, order.value, order.customer_id
        );
        Ok(order)
    }
}
