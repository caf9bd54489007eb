use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::cart::models::{CartItem, CartLine};

const CART_LINE_SELECT: &str = r#"
    SELECT ci.id, ci.product_id, ci.quantity,
           p.sku, p.name_en, p.name_pt, p.name_es, p.name_fr,
           p.price, p.stock_quantity, p.images, p.is_active,
           ci.created_at
    FROM cart_items ci
    JOIN products p ON p.id = ci.product_id
"#;

const CART_ITEM_COLUMNS: &str = "id, user_id, product_id, quantity, created_at, updated_at";

/// Cart storage. Every statement is scoped to the owning user.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn list_lines(&self, user_id: &str) -> Result<Vec<CartLine>>;

    async fn find_line(&self, id: Uuid, user_id: &str) -> Result<Option<CartLine>>;

    /// Quantity already in the cart for a product
    async fn quantity_for_product(&self, user_id: &str, product_id: Uuid) -> Result<Option<i32>>;

    /// Insert a line, or add to the existing line for the same product
    async fn add(&self, user_id: &str, product_id: Uuid, quantity: i32) -> Result<CartItem>;

    async fn update_quantity(
        &self,
        id: Uuid,
        user_id: &str,
        quantity: i32,
    ) -> Result<Option<CartItem>>;

    /// `false` when no row owned by the user matched
    async fn delete(&self, id: Uuid, user_id: &str) -> Result<bool>;
}

pub struct PgCartRepository {
    pool: PgPool,
}

impl PgCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    async fn list_lines(&self, user_id: &str) -> Result<Vec<CartLine>> {
        sqlx::query_as::<_, CartLine>(&format!(
            "{} WHERE ci.user_id = $1 ORDER BY ci.created_at ASC",
            CART_LINE_SELECT
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list cart items: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find_line(&self, id: Uuid, user_id: &str) -> Result<Option<CartLine>> {
        sqlx::query_as::<_, CartLine>(&format!(
            "{} WHERE ci.id = $1 AND ci.user_id = $2",
            CART_LINE_SELECT
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get cart item: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn quantity_for_product(&self, user_id: &str, product_id: Uuid) -> Result<Option<i32>> {
        sqlx::query_scalar::<_, i32>(
            "SELECT quantity FROM cart_items WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get cart quantity: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn add(&self, user_id: &str, product_id: Uuid, quantity: i32) -> Result<CartItem> {
        sqlx::query_as::<_, CartItem>(&format!(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, product_id) DO UPDATE
                SET quantity = cart_items.quantity + EXCLUDED.quantity,
                    updated_at = NOW()
            RETURNING {}
            "#,
            CART_ITEM_COLUMNS
        ))
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to add cart item: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn update_quantity(
        &self,
        id: Uuid,
        user_id: &str,
        quantity: i32,
    ) -> Result<Option<CartItem>> {
        sqlx::query_as::<_, CartItem>(&format!(
            r#"
            UPDATE cart_items
            SET quantity = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            CART_ITEM_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update cart item: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, id: Uuid, user_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete cart item: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
