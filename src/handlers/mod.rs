pub mod auth;
pub mod cart;
pub mod health;
pub mod order;
pub mod product;
pub mod user;

pub use auth::auth_config;
pub use cart::cart_config;
pub use health::health_config;
pub use order::order_config;
pub use product::product_config;
pub use user::user_config;

use actix_web::{HttpResponse, Result};
use serde_json::json;

/// Catch-all for unmatched routes; same envelope as every other error.
pub async fn not_found() -> Result<HttpResponse> {
    Ok(HttpResponse::NotFound().json(json!({
        "status": "error",
        "message": "Route not found"
    })))
}
