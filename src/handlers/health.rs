use actix_web::{HttpResponse, Result, web};
use chrono::Utc;
use serde_json::json;

use crate::models::ApiResponse;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service is up"))
)]
pub async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
        json!({ "timestamp": Utc::now().to_rfc3339() }),
        "Evolv backend is running",
    )))
}

pub fn health_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
