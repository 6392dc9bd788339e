use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::parse_decimal;
use crate::domain::order::Order;
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PayOrderRequest {
    /// One of the registered methods, case-insensitive: creditcard, paypal, pix.
    pub payment_method: String,
    /// Decimal value as a string to avoid floating-point issues, e.g. "9.99"
    pub value: String,
    pub customer_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i32,
    pub customer_id: i32,
    pub value: String,
    pub order_date: String,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            customer_id: o.customer_id,
            value: o.value.to_string(),
            order_date: o.order_date.to_rfc3339(),
        }
    }
}

/// POST /orders
///
/// Settles the payment with the requested method and records the order.
/// Eligibility is not checked here; call `/customers/{id}/can-purchase`
/// first.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = PayOrderRequest,
    responses(
        (status = 201, description = "Order recorded", body = OrderResponse),
        (status = 400, description = "Unparsable value"),
        (status = 422, description = "Payment method not supported"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn pay_order(
    state: web::Data<AppState>,
    body: web::Json<PayOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let value = parse_decimal("value", &body.value)?;

    let order = web::block(move || {
        state
            .orders
            .pay_order(&body.payment_method, value, body.customer_id)
    })
    .await??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}
