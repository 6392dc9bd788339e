use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{parse_decimal, PageParams};
use crate::domain::customer::Customer;
use crate::domain::paged::PagedList;
use crate::errors::AppError;
use crate::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerResponse {
    pub id: i32,
    pub name: String,
}

impl From<Customer> for CustomerResponse {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CustomerPageResponse {
    pub items: Vec<CustomerResponse>,
    pub total_count: i64,
    pub has_next: bool,
}

impl From<PagedList<Customer>> for CustomerPageResponse {
    fn from(page: PagedList<Customer>) -> Self {
        let page = page.map(CustomerResponse::from);
        Self {
            items: page.items,
            total_count: page.total_count,
            has_next: page.has_next,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CanPurchaseParams {
    /// Decimal purchase value as a string, e.g. "99.90".
    pub value: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CanPurchaseResponse {
    pub customer_id: i32,
    pub value: String,
    pub can_purchase: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /customers
///
/// Returns one page of customers. The listing is not ordered, so pages are
/// only stable while the table is unchanged.
#[utoipa::path(
    get,
    path = "/customers",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("page_size" = Option<i64>, Query, description = "Items per page (default 10)"),
    ),
    responses(
        (status = 200, description = "Paginated list of customers", body = CustomerPageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "customers"
)]
pub async fn list_customers(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let page =
        web::block(move || state.customers.list_customers(params.page, params.page_size))
            .await??;

    Ok(HttpResponse::Ok().json(CustomerPageResponse::from(page)))
}

/// GET /customers/{id}/can-purchase
///
/// Evaluates whether the customer may buy `value` right now.
#[utoipa::path(
    get,
    path = "/customers/{id}/can-purchase",
    params(
        ("id" = i32, Path, description = "Customer id"),
        ("value" = String, Query, description = "Purchase value, e.g. \"99.90\""),
    ),
    responses(
        (status = 200, description = "Eligibility decision", body = CanPurchaseResponse),
        (status = 400, description = "Non-positive id or value, or unparsable value"),
        (status = 404, description = "Customer does not exist"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "customers"
)]
pub async fn can_purchase(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    query: web::Query<CanPurchaseParams>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let value = parse_decimal("value", &query.value)?;

    let (value, allowed) = web::block(move || {
        let allowed = state.customers.can_purchase(customer_id, &value)?;
        Ok::<_, AppError>((value, allowed))
    })
    .await??;

    Ok(HttpResponse::Ok().json(CanPurchaseResponse {
        customer_id,
        value: value.to_string(),
        can_purchase: allowed,
    }))
}
