use crate::entities::{cart_item_entity as cart_items, product_entity as products};
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, Set,
};
use std::collections::HashMap;

fn cart_product(product: &products::Model) -> CartProduct {
    CartProduct {
        id: product.id,
        name: product.name.clone(),
        price: product.price,
        image_url: product.image_url.clone(),
        stock_quantity: product.stock_quantity,
    }
}

#[derive(Clone)]
pub struct CartService {
    pool: DatabaseConnection,
}

impl CartService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get_cart(&self, user_id: i64) -> AppResult<CartResponse> {
        let items = cart_items::Entity::find()
            .filter(cart_items::Column::UserId.eq(user_id))
            .all(&self.pool)
            .await?;

        let product_ids: Vec<i64> = items.iter().map(|i| i.product_id).collect();
        let product_map: HashMap<i64, products::Model> = products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let mut responses = Vec::with_capacity(items.len());
        let mut total = 0i64;
        for item in items {
            // FK cascade removes cart rows with their product; a missing
            // product here is a row caught mid-delete, skip it
            if let Some(product) = product_map.get(&item.product_id) {
                total += product.price * item.quantity as i64;
                responses.push(CartItemResponse {
                    id: item.id,
                    quantity: item.quantity,
                    product: cart_product(product),
                });
            }
        }

        Ok(CartResponse {
            item_count: responses.len(),
            items: responses,
            total,
        })
    }

    pub async fn add_to_cart(
        &self,
        user_id: i64,
        request: AddToCartRequest,
    ) -> AppResult<CartItemResponse> {
        if request.quantity < 1 {
            return Err(AppError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let product = products::Entity::find_by_id(request.product_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        if product.stock_quantity < request.quantity {
            return Err(AppError::ValidationError(
                "Requested quantity is not available in stock".to_string(),
            ));
        }

        let existing = cart_items::Entity::find()
            .filter(cart_items::Column::UserId.eq(user_id))
            .filter(cart_items::Column::ProductId.eq(request.product_id))
            .one(&self.pool)
            .await?;

        // one row per (user, product): increment on conflict
        let item = match existing {
            Some(item) => {
                let new_quantity = item.quantity + request.quantity;
                let mut model = item.into_active_model();
                model.quantity = Set(new_quantity);
                model.updated_at = Set(Some(Utc::now()));
                model.update(&self.pool).await?
            }
            None => {
                cart_items::ActiveModel {
                    user_id: Set(user_id),
                    product_id: Set(request.product_id),
                    quantity: Set(request.quantity),
                    ..Default::default()
                }
                .insert(&self.pool)
                .await?
            }
        };

        Ok(CartItemResponse {
            id: item.id,
            quantity: item.quantity,
            product: cart_product(&product),
        })
    }

    pub async fn update_cart_item(
        &self,
        user_id: i64,
        item_id: i64,
        request: UpdateCartItemRequest,
    ) -> AppResult<CartItemResponse> {
        if request.quantity < 1 {
            return Err(AppError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }

        // ownership is the user_id predicate, not a separate check
        let item = cart_items::Entity::find()
            .filter(cart_items::Column::Id.eq(item_id))
            .filter(cart_items::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

        let product = products::Entity::find_by_id(item.product_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        if product.stock_quantity < request.quantity {
            return Err(AppError::ValidationError(
                "Requested quantity is not available in stock".to_string(),
            ));
        }

        let mut model = item.into_active_model();
        model.quantity = Set(request.quantity);
        model.updated_at = Set(Some(Utc::now()));
        let updated = model.update(&self.pool).await?;

        Ok(CartItemResponse {
            id: updated.id,
            quantity: updated.quantity,
            product: cart_product(&product),
        })
    }

    pub async fn remove_cart_item(&self, user_id: i64, item_id: i64) -> AppResult<()> {
        let item = cart_items::Entity::find()
            .filter(cart_items::Column::Id.eq(item_id))
            .filter(cart_items::Column::UserId.eq(user_id))
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Cart item not found".to_string()))?;

        item.delete(&self.pool).await?;
        Ok(())
    }

    pub async fn clear_cart(&self, user_id: i64) -> AppResult<u64> {
        let result = cart_items::Entity::delete_many()
            .filter(cart_items::Column::UserId.eq(user_id))
            .exec(&self.pool)
            .await?;

        Ok(result.rows_affected)
    }
}
