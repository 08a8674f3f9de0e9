use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};
use serde_json::json;

use crate::error::AppError;
use crate::middlewares::auth::get_current_user_id;
use crate::models::*;
use crate::services::{ProductService, UserService};

#[utoipa::path(
    get,
    path = "/products",
    tag = "product",
    params(
        ("page" = Option<u32>, Query, description = "Page number (1-based)"),
        ("limit" = Option<u32>, Query, description = "Products per page"),
        ("category" = Option<String>, Query, description = "Exact category match"),
        ("search" = Option<String>, Query, description = "Case-insensitive substring on name"),
        ("min_price" = Option<i64>, Query, description = "Inclusive lower price bound, cents"),
        ("max_price" = Option<i64>, Query, description = "Inclusive upper price bound, cents"),
        ("sort_by" = Option<String>, Query, description = "name | price | created_at | stock_quantity"),
        ("sort_order" = Option<String>, Query, description = "asc | desc")
    ),
    responses(
        (status = 200, description = "Product catalog page", body = ProductListResponse),
        (status = 400, description = "Invalid filter or sort", body = ErrorResponse)
    )
)]
pub async fn list_products(
    product_service: web::Data<ProductService>,
    query: web::Query<ProductQuery>,
) -> Result<HttpResponse> {
    match product_service.list_products(&query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "data": response
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/categories",
    tag = "product",
    responses(
        (status = 200, description = "Distinct category list", body = CategoryListResponse)
    )
)]
pub async fn list_categories(
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse> {
    match product_service.list_categories().await {
        Ok(categories) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "data": { "categories": categories }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/category/{category}",
    tag = "product",
    params(("category" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Products in the category")
    )
)]
pub async fn list_by_category(
    product_service: web::Data<ProductService>,
    category: web::Path<String>,
) -> Result<HttpResponse> {
    match product_service.list_by_category(&category).await {
        Ok(products) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "data": { "products": products }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    tag = "product",
    params(("id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail", body = ProductResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn get_product(
    product_service: web::Data<ProductService>,
    id: web::Path<i64>,
) -> Result<HttpResponse> {
    match product_service.get_product(*id).await {
        Ok(product) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "data": { "product": product }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/products",
    tag = "product",
    request_body = CreateProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse)
    )
)]
pub async fn create_product(
    product_service: web::Data<ProductService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
    request: web::Json<CreateProductRequest>,
) -> Result<HttpResponse> {
    let Some(user_id) = get_current_user_id(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };
    if let Err(e) = user_service.ensure_admin(user_id).await {
        return Ok(e.error_response());
    }

    match product_service.create_product(request.into_inner()).await {
        Ok(product) => Ok(HttpResponse::Created().json(json!({
            "status": "success",
            "message": "Product created successfully",
            "data": { "product": product }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/products/{id}",
    tag = "product",
    params(("id" = i64, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn update_product(
    product_service: web::Data<ProductService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
    id: web::Path<i64>,
    request: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse> {
    let Some(user_id) = get_current_user_id(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };
    if let Err(e) = user_service.ensure_admin(user_id).await {
        return Ok(e.error_response());
    }

    match product_service.update_product(*id, request.into_inner()).await {
        Ok(product) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Product updated successfully",
            "data": { "product": product }
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    delete,
    path = "/products/{id}",
    tag = "product",
    params(("id" = i64, Path, description = "Product id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Product deleted"),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse)
    )
)]
pub async fn delete_product(
    product_service: web::Data<ProductService>,
    user_service: web::Data<UserService>,
    req: HttpRequest,
    id: web::Path<i64>,
) -> Result<HttpResponse> {
    let Some(user_id) = get_current_user_id(&req) else {
        return Ok(AppError::AuthError("Missing access token".to_string()).error_response());
    };
    if let Err(e) = user_service.ensure_admin(user_id).await {
        return Ok(e.error_response());
    }

    match product_service.delete_product(*id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "status": "success",
            "message": "Product deleted successfully"
        }))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn product_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/products")
            .route("", web::get().to(list_products))
            .route("", web::post().to(create_product))
            .route("/categories", web::get().to(list_categories))
            .route("/category/{category}", web::get().to(list_by_category))
            .route("/{id}", web::get().to(get_product))
            .route("/{id}", web::put().to(update_product))
            .route("/{id}", web::delete().to(delete_product)),
    );
}
