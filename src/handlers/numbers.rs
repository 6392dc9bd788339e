use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NumberResponse {
    pub number: i32,
}

/// POST /numbers
///
/// Issues a random number in `0..100` that has never been issued before.
#[utoipa::path(
    post,
    path = "/numbers",
    responses(
        (status = 201, description = "Number issued", body = NumberResponse),
        (status = 409, description = "Every number has been issued"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "numbers"
)]
pub async fn next_number(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let number = web::block(move || state.numbers.next_unique()).await??;

    Ok(HttpResponse::Created().json(NumberResponse { number }))
}
