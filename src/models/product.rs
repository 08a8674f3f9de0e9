use crate::entities::product_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    /// price in cents
    pub price: i64,
    pub category: String,
    pub stock_quantity: i32,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

/// Catalog pagination block; field names are part of the public API.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductPagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_products: i64,
    pub products_per_page: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
    pub pagination: ProductPagination,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    pub categories: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    #[schema(example = "Whey Protein 900g")]
    pub name: String,
    #[schema(example = 12990)]
    pub price: i64,
    #[schema(example = "protein")]
    pub category: String,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub stock_quantity: Option<i32>,
    pub image_url: Option<String>,
    pub description: Option<String>,
}

impl From<product_entity::Model> for ProductResponse {
    fn from(p: product_entity::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price,
            category: p.category,
            stock_quantity: p.stock_quantity,
            image_url: p.image_url,
            description: p.description,
            created_at: p.created_at,
        }
    }
}
