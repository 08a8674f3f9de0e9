use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    #[schema(example = 1)]
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

/// Product summary embedded in a cart line.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartProduct {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub image_url: Option<String>,
    pub stock_quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartItemResponse {
    pub id: i64,
    pub quantity: i32,
    pub product: CartProduct,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    pub items: Vec<CartItemResponse>,
    /// sum of price * quantity over the lines, in cents
    pub total: i64,
    pub item_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_to_cart_quantity_defaults_to_one() {
        let req: AddToCartRequest = serde_json::from_str(r#"{"product_id": 5}"#).unwrap();
        assert_eq!(req.quantity, 1);

        let req: AddToCartRequest =
            serde_json::from_str(r#"{"product_id": 5, "quantity": 3}"#).unwrap();
        assert_eq!(req.quantity, 3);
    }
}
