use crate::entities::{
    OrderStatus, order_entity as orders, order_item_entity as order_items,
    product_entity as products,
};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;

#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Order placement is all-or-nothing: price lookups, the order row, its
    /// items, and the stock decrements share one transaction. The decrement is
    /// guarded by `stock_quantity >= quantity`, so two concurrent orders for
    /// the last unit cannot both succeed.
    pub async fn create_order(
        &self,
        user_id: i64,
        request: CreateOrderRequest,
    ) -> AppResult<OrderResponse> {
        if request.items.is_empty() {
            return Err(AppError::ValidationError(
                "Order must contain at least one item".to_string(),
            ));
        }
        for item in &request.items {
            if item.quantity < 1 {
                return Err(AppError::ValidationError(
                    "Item quantity must be at least 1".to_string(),
                ));
            }
        }
        if request.shipping_address.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Shipping address is required".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;

        let mut total: i64 = 0;
        let mut lines: Vec<(products::Model, i32)> = Vec::with_capacity(request.items.len());
        for item in &request.items {
            let product = products::Entity::find_by_id(item.product_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Product {} not found", item.product_id))
                })?;

            if product.stock_quantity < item.quantity {
                return Err(AppError::ValidationError(format!(
                    "Insufficient stock for {}",
                    product.name
                )));
            }

            total += product.price * item.quantity as i64;
            lines.push((product, item.quantity));
        }

        let order = orders::ActiveModel {
            user_id: Set(user_id),
            total_amount: Set(total),
            status: Set(OrderStatus::Pending),
            shipping_address: Set(request.shipping_address.clone()),
            payment_method: Set(request.payment_method.clone()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let item_models: Vec<order_items::ActiveModel> = lines
            .iter()
            .map(|(product, quantity)| order_items::ActiveModel {
                order_id: Set(order.id),
                product_id: Set(product.id),
                quantity: Set(*quantity),
                unit_price: Set(product.price),
                ..Default::default()
            })
            .collect();

        order_items::Entity::insert_many(item_models).exec(&txn).await?;

        for (product, quantity) in &lines {
            let result = products::Entity::update_many()
                .col_expr(
                    products::Column::StockQuantity,
                    Expr::col(products::Column::StockQuantity).sub(*quantity),
                )
                .col_expr(products::Column::UpdatedAt, Expr::value(Utc::now()))
                .filter(products::Column::Id.eq(product.id))
                .filter(products::Column::StockQuantity.gte(*quantity))
                .exec(&txn)
                .await?;

            // zero rows means a concurrent order took the stock after our
            // read; dropping the transaction rolls everything back
            if result.rows_affected == 0 {
                return Err(AppError::Conflict(format!(
                    "Insufficient stock for {}",
                    product.name
                )));
            }
        }

        txn.commit().await?;

        log::info!(
            "Created order {} for user {user_id} ({} items, {total} cents)",
            order.id,
            lines.len()
        );

        let items = lines
            .into_iter()
            .map(|(product, quantity)| OrderItemResponse {
                product_id: product.id,
                product_name: Some(product.name),
                image_url: product.image_url,
                quantity,
                unit_price: product.price,
            })
            .collect();

        Ok(OrderResponse::from_parts(order, items))
    }

    pub async fn get_user_orders(
        &self,
        user_id: i64,
        query: &OrderQuery,
    ) -> AppResult<PaginatedResponse<OrderResponse>> {
        let params = PaginationParams::new(query.page, query.limit);

        let total = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .count(&self.pool)
            .await? as i64;

        let models = orders::Entity::find()
            .filter(orders::Column::UserId.eq(user_id))
            .order_by_desc(orders::Column::CreatedAt)
            .limit(params.get_limit() as u64)
            .offset(params.get_offset())
            .all(&self.pool)
            .await?;

        let responses = self.attach_items(models).await?;
        Ok(PaginatedResponse::new(responses, &params, total))
    }

    pub async fn get_order(&self, user_id: i64, order_id: i64) -> AppResult<OrderResponse> {
        let order = orders::Entity::find()
            .filter(orders::Column::Id.eq(order_id))
            .filter(orders::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let mut responses = self.attach_items(vec![order]).await?;
        Ok(responses.remove(0))
    }

    pub async fn update_status(&self, order_id: i64, status: &str) -> AppResult<OrderResponse> {
        let status = OrderStatus::parse(status)
            .ok_or_else(|| AppError::ValidationError(format!("Invalid order status '{status}'")))?;

        let order = orders::Entity::find_by_id(order_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        let mut model = order.into_active_model();
        model.status = Set(status);
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        let mut responses = self.attach_items(vec![updated]).await?;
        Ok(responses.remove(0))
    }

    /// Loads the items for a batch of orders and joins in the product
    /// summaries the storefront renders alongside each line.
    async fn attach_items(
        &self,
        order_models: Vec<orders::Model>,
    ) -> AppResult<Vec<OrderResponse>> {
        let order_ids: Vec<i64> = order_models.iter().map(|o| o.id).collect();

        let item_models = order_items::Entity::find()
            .filter(order_items::Column::OrderId.is_in(order_ids))
            .all(&self.pool)
            .await?;

        let product_ids: Vec<i64> = item_models.iter().map(|i| i.product_id).collect();
        let product_map: HashMap<i64, products::Model> = products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut items_by_order: HashMap<i64, Vec<OrderItemResponse>> = HashMap::new();
        for item in item_models {
            let product = product_map.get(&item.product_id);
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderItemResponse {
                    product_id: item.product_id,
                    product_name: product.map(|p| p.name.clone()),
                    image_url: product.and_then(|p| p.image_url.clone()),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                });
        }

        Ok(order_models
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                OrderResponse::from_parts(order, items)
            })
            .collect())
    }
}
