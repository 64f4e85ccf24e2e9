use actix_web::{web, HttpResponse};

use hm_shared::types::HealthResponse;

use crate::app::AppState;

/// Health check endpoint handler
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        state.store_backend,
        env!("CARGO_PKG_VERSION"),
    ))
}
