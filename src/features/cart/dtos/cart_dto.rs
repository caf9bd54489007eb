use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::cart::models::{Cart, CartLine, QuantityChange};
use crate::shared::i18n::Localized;

/// Request DTO for adding a product to the cart
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemDto {
    pub product_id: Uuid,

    #[validate(range(min = 1, max = 99, message = "Quantity must be between 1 and 99"))]
    pub quantity: i32,
}

/// Request DTO for setting a line's quantity; 0 removes the line
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCartItemDto {
    #[validate(range(min = 0, max = 99, message = "Quantity must be between 0 and 99"))]
    pub quantity: i32,
}

/// Response DTO for a cart line
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub id: Uuid,
    pub product_id: Uuid,
    pub sku: String,
    #[schema(value_type = Object)]
    pub name: Localized<String>,
    #[schema(value_type = String, example = "49.90")]
    pub price: Decimal,
    pub quantity: i32,
    #[schema(value_type = String, example = "99.80")]
    pub line_total: Decimal,
    pub stock_quantity: i32,
    pub image: Option<String>,
}

impl From<CartLine> for CartLineDto {
    fn from(line: CartLine) -> Self {
        Self {
            name: line.name(),
            line_total: line.line_total(),
            image: line.images.first().cloned(),
            id: line.id,
            product_id: line.product_id,
            sku: line.sku,
            price: line.price,
            quantity: line.quantity,
            stock_quantity: line.stock_quantity,
        }
    }
}

/// Response DTO for the whole cart
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    pub items: Vec<CartLineDto>,
    pub item_count: i64,
    #[schema(value_type = String, example = "149.70")]
    pub subtotal: Decimal,
}

impl From<Cart> for CartDto {
    fn from(cart: Cart) -> Self {
        Self {
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            items: cart.lines.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response DTO for a quantity change: `{ id, removed, item }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuantityChangeDto {
    pub id: Uuid,
    pub removed: bool,
    pub item: Option<CartLineDto>,
}

impl From<QuantityChange> for QuantityChangeDto {
    fn from(change: QuantityChange) -> Self {
        Self {
            id: change.id,
            removed: change.removed,
            item: change.line.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(UpdateCartItemDto { quantity: 0 }.validate().is_ok());
        assert!(UpdateCartItemDto { quantity: 99 }.validate().is_ok());
        assert!(UpdateCartItemDto { quantity: 100 }.validate().is_err());
        assert!(UpdateCartItemDto { quantity: -1 }.validate().is_err());
    }

    #[test]
    fn test_add_requires_positive_quantity() {
        let dto = AddCartItemDto {
            product_id: Uuid::nil(),
            quantity: 0,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_removed_change_serializes_null_item() {
        let body = serde_json::to_value(QuantityChangeDto::from(QuantityChange {
            id: Uuid::nil(),
            removed: true,
            line: None,
        }))
        .unwrap();

        assert_eq!(body["removed"], true);
        assert!(body["item"].is_null());
    }
}
