use crate::entities::product_entity as products;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

const DEFAULT_CATALOG_PAGE_SIZE: u32 = 12;

/// Sort columns are allow-listed; anything else is a 400 rather than being
/// forwarded to the database.
fn parse_sort(sort_by: Option<&str>, sort_order: Option<&str>) -> AppResult<(products::Column, Order)> {
    let column = match sort_by.unwrap_or("created_at") {
        "name" => products::Column::Name,
        "price" => products::Column::Price,
        "created_at" => products::Column::CreatedAt,
        "stock_quantity" => products::Column::StockQuantity,
        other => {
            return Err(AppError::ValidationError(format!(
                "Cannot sort by '{other}'"
            )));
        }
    };

    let order = match sort_order.unwrap_or("desc") {
        "asc" => Order::Asc,
        "desc" => Order::Desc,
        other => {
            return Err(AppError::ValidationError(format!(
                "Invalid sort order '{other}'"
            )));
        }
    };

    Ok((column, order))
}

#[derive(Clone)]
pub struct ProductService {
    pool: DatabaseConnection,
}

impl ProductService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_products(&self, query: &ProductQuery) -> AppResult<ProductListResponse> {
        let (sort_column, sort_order) = parse_sort(
            query.sort_by.as_deref(),
            query.sort_order.as_deref(),
        )?;

        if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
            if min > max {
                return Err(AppError::ValidationError(
                    "min_price cannot exceed max_price".to_string(),
                ));
            }
        }

        let mut find = products::Entity::find();

        if let Some(category) = &query.category {
            find = find.filter(products::Column::Category.eq(category.clone()));
        }
        if let Some(search) = &query.search {
            // case-insensitive substring match on the name
            find = find.filter(
                Expr::expr(Func::lower(Expr::col((
                    products::Entity,
                    products::Column::Name,
                ))))
                .like(format!("%{}%", search.to_lowercase())),
            );
        }
        if let Some(min_price) = query.min_price {
            find = find.filter(products::Column::Price.gte(min_price));
        }
        if let Some(max_price) = query.max_price {
            find = find.filter(products::Column::Price.lte(max_price));
        }

        let params = PaginationParams::new(
            query.page,
            Some(query.limit.unwrap_or(DEFAULT_CATALOG_PAGE_SIZE)),
        );

        let total = find.clone().count(&self.pool).await? as i64;

        let models = find
            .order_by(sort_column, sort_order)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let pagination = ProductPagination {
            current_page: params.get_page(),
            total_pages: PaginationInfo::new(params.get_page(), params.get_limit(), total)
                .total_pages,
            total_products: total,
            products_per_page: params.get_limit(),
        };

        Ok(ProductListResponse {
            products: models.into_iter().map(ProductResponse::from).collect(),
            pagination,
        })
    }

    pub async fn get_product(&self, id: i64) -> AppResult<ProductResponse> {
        let product = products::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        Ok(ProductResponse::from(product))
    }

    pub async fn list_categories(&self) -> AppResult<Vec<String>> {
        #[derive(Debug, sea_orm::FromQueryResult)]
        struct CategoryRow {
            category: String,
        }

        let rows = products::Entity::find()
            .select_only()
            .column(products::Column::Category)
            .distinct()
            .order_by(products::Column::Category, Order::Asc)
            .into_model::<CategoryRow>()
            .all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.category).collect())
    }

    pub async fn list_by_category(&self, category: &str) -> AppResult<Vec<ProductResponse>> {
        let models = products::Entity::find()
            .filter(products::Column::Category.eq(category))
            .order_by_desc(products::Column::CreatedAt)
            .all(&self.pool)
            .await?;

        Ok(models.into_iter().map(ProductResponse::from).collect())
    }

    pub async fn create_product(&self, request: CreateProductRequest) -> AppResult<ProductResponse> {
        if request.name.trim().is_empty() || request.category.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Name and category are required".to_string(),
            ));
        }
        if request.price < 0 {
            return Err(AppError::ValidationError(
                "Price cannot be negative".to_string(),
            ));
        }

        let product = products::ActiveModel {
            name: Set(request.name),
            price: Set(request.price),
            category: Set(request.category),
            stock_quantity: Set(request.stock_quantity.unwrap_or(0)),
            image_url: Set(request.image_url),
            description: Set(request.description),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        log::info!("Created product {} ({})", product.id, product.name);

        Ok(ProductResponse::from(product))
    }

    pub async fn update_product(
        &self,
        id: i64,
        request: UpdateProductRequest,
    ) -> AppResult<ProductResponse> {
        if let Some(price) = request.price {
            if price < 0 {
                return Err(AppError::ValidationError(
                    "Price cannot be negative".to_string(),
                ));
            }
        }
        if let Some(stock) = request.stock_quantity {
            if stock < 0 {
                return Err(AppError::ValidationError(
                    "Stock quantity cannot be negative".to_string(),
                ));
            }
        }

        let mut model = products::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?
            .into_active_model();

        if let Some(name) = request.name {
            model.name = Set(name);
        }
        if let Some(price) = request.price {
            model.price = Set(price);
        }
        if let Some(category) = request.category {
            model.category = Set(category);
        }
        if let Some(stock) = request.stock_quantity {
            model.stock_quantity = Set(stock);
        }
        if let Some(image_url) = request.image_url {
            model.image_url = Set(Some(image_url));
        }
        if let Some(description) = request.description {
            model.description = Set(Some(description));
        }
        model.updated_at = Set(Some(Utc::now()));

        let updated = model.update(&self.pool).await?;
        Ok(ProductResponse::from(updated))
    }

    pub async fn delete_product(&self, id: i64) -> AppResult<()> {
        let result = products::Entity::delete_by_id(id).exec(&self.pool).await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        log::info!("Deleted product {id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort_allow_list() {
        assert!(parse_sort(Some("name"), None).is_ok());
        assert!(parse_sort(Some("price"), Some("asc")).is_ok());
        assert!(parse_sort(Some("created_at"), Some("desc")).is_ok());
        assert!(parse_sort(Some("stock_quantity"), None).is_ok());
        assert!(parse_sort(None, None).is_ok());
    }

    #[test]
    fn test_parse_sort_rejects_unknown_column() {
        assert!(matches!(
            parse_sort(Some("password_hash"), None),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            parse_sort(Some("id; DROP TABLE products"), None),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_parse_sort_rejects_unknown_order() {
        assert!(matches!(
            parse_sort(Some("price"), Some("sideways")),
            Err(AppError::ValidationError(_))
        ));
    }
}
