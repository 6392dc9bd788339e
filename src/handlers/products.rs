use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PageParams;
use crate::domain::paged::PagedList;
use crate::domain::product::Product;
use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductPageResponse {
    pub items: Vec<ProductResponse>,
    pub total_count: i64,
    pub has_next: bool,
}

impl From<PagedList<Product>> for ProductPageResponse {
    fn from(page: PagedList<Product>) -> Self {
        Self {
            items: page
                .items
                .into_iter()
                .map(|p| ProductResponse {
                    id: p.id,
                    name: p.name,
                })
                .collect(),
            total_count: page.total_count,
            has_next: page.has_next,
        }
    }
}

/// GET /products
///
/// Returns one page of products ordered by id.
#[utoipa::path(
    get,
    path = "/products",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("page_size" = Option<i64>, Query, description = "Items per page (default 10)"),
    ),
    responses(
        (status = 200, description = "Paginated list of products", body = ProductPageResponse),
        (status = 500, description = "Internal server error"),
    ),
    tag = "products"
)]
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();

    let page = web::block(move || state.products.list_products(params.page, params.page_size))
        .await??;

    Ok(HttpResponse::Ok().json(ProductPageResponse::from(page)))
}
