use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::error::AppError;
use crate::middlewares::auth::get_current_user_id;
use crate::models::*;
use crate::services::CartService;

#[utoipa::path(
    get,
    path = "/cart",
    tag = "cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart contents with total", body = CartResponse)
    )
)]
pub async fn get_cart(cart_service: web::Data<CartService>, req: HttpRequest) -> Result<HttpResponse> {
    let Some(user_id) = get_current_user_id(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };

    match cart_service.get_cart(user_id).await {
        Ok(cart) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "data": cart
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/cart",
    tag = "cart",
    request_body = AddToCartRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Item added or quantity incremented", body = CartItemResponse),
        (status = 400, description = "Insufficient stock", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn add_to_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    request: web::Json<AddToCartRequest>,
) -> Result<HttpResponse> {
    let Some(user_id) = get_current_user_id(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };

    match cart_service.add_to_cart(user_id, request.into_inner()).await {
        Ok(cart_item) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Item added to cart",
            "data": { "cart_item": cart_item }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/cart/items/{item_id}",
    tag = "cart",
    params(("item_id" = i64, Path, description = "Cart item id")),
    request_body = UpdateCartItemRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Quantity updated", body = CartItemResponse),
        (status = 400, description = "Invalid quantity or insufficient stock", body = ErrorResponse),
        (status = 404, description = "Cart item not found", body = ErrorResponse)
    )
)]
pub async fn update_cart_item(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    item_id: web::Path<i64>,
    request: web::Json<UpdateCartItemRequest>,
) -> Result<HttpResponse> {
    let Some(user_id) = get_current_user_id(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };

    match cart_service
        .update_cart_item(user_id, *item_id, request.into_inner())
        .await
    {
        Ok(cart_item) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Cart updated",
            "data": { "cart_item": cart_item }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cart/items/{item_id}",
    tag = "cart",
    params(("item_id" = i64, Path, description = "Cart item id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Item removed"),
        (status = 404, description = "Cart item not found", body = ErrorResponse)
    )
)]
pub async fn remove_cart_item(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
    item_id: web::Path<i64>,
) -> Result<HttpResponse> {
    let Some(user_id) = get_current_user_id(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };

    match cart_service.remove_cart_item(user_id, *item_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Item removed from cart"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/cart",
    tag = "cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cart cleared")
    )
)]
pub async fn clear_cart(
    cart_service: web::Data<CartService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let Some(user_id) = get_current_user_id(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };

    match cart_service.clear_cart(user_id).await {
        Ok(_) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Cart cleared"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn cart_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cart")
            .route("", web::get().to(get_cart))
            .route("", web::post().to(add_to_cart))
            .route("", web::delete().to(clear_cart))
            .route("/items/{item_id}", web::put().to(update_cart_item))
            .route("/items/{item_id}", web::delete().to(remove_cart_item)),
    );
}
