pub mod customers;
pub mod numbers;
pub mod orders;
pub mod products;

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::Deserialize;
use utoipa::OpenApi;

use crate::domain::paged::DEFAULT_PAGE_SIZE;
use crate::errors::AppError;

#[derive(OpenApi)]
#[openapi(
    paths(
        customers::list_customers,
        customers::can_purchase,
        orders::pay_order,
        products::list_products,
        numbers::next_number,
    ),
    components(schemas(
        customers::CustomerResponse,
        customers::CustomerPageResponse,
        customers::CanPurchaseResponse,
        orders::PayOrderRequest,
        orders::OrderResponse,
        products::ProductResponse,
        products::ProductPageResponse,
        numbers::NumberResponse,
    )),
    tags(
        (name = "customers", description = "Customer listing and purchase eligibility"),
        (name = "orders", description = "Order payment"),
        (name = "products", description = "Product catalogue"),
        (name = "numbers", description = "Unique random numbers"),
    )
)]
pub struct ApiDoc;

// ── Shared query parameters ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PageParams {
    /// Page number (1-based). Defaults to 1; values below 1 become 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page. Defaults to 10; values below 1 become 10.
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Decimal amounts travel as strings, e.g. "9.99".
pub(crate) fn parse_decimal(field: &str, raw: &str) -> Result<BigDecimal, AppError> {
    BigDecimal::from_str(raw.trim())
        .map_err(|e| AppError::BadRequest(format!("Invalid {} '{}': {}", field, raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_decimal_strings() {
        assert_eq!(
            parse_decimal("value", " 9.99 ").unwrap(),
            BigDecimal::from_str("9.99").unwrap()
        );
    }

    #[test]
    fn rejects_garbage_decimal() {
        let err = parse_decimal("value", "ten").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(msg) if msg.starts_with("Invalid value 'ten'")));
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/customers",
            "/customers/{id}/can-purchase",
            "/orders",
            "/products",
            "/numbers",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
