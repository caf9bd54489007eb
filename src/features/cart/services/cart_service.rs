use std::sync::Arc;

use uuid::Uuid;

use crate::core::error::{AppError, Resource, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::cart::models::{Cart, CartLine, QuantityChange};
use crate::features::cart::repositories::CartRepository;
use crate::features::products::ProductService;
use crate::shared::constants::MAX_CART_QUANTITY;

/// Service for the acting user's cart
pub struct CartService {
    repository: Arc<dyn CartRepository>,
    products: Arc<ProductService>,
}

fn item_not_found() -> AppError {
    AppError::not_found(Resource::CartItem, "Cart item not found")
}

impl CartService {
    pub fn new(repository: Arc<dyn CartRepository>, products: Arc<ProductService>) -> Self {
        Self {
            repository,
            products,
        }
    }

    pub async fn get_cart(&self, user: &AuthenticatedUser) -> Result<Cart> {
        let lines = self.repository.list_lines(&user.user_id).await?;
        Ok(Cart { lines })
    }

    pub async fn get_item(&self, user: &AuthenticatedUser, id: Uuid) -> Result<CartLine> {
        self.repository
            .find_line(id, &user.user_id)
            .await?
            .ok_or_else(item_not_found)
    }

    /// Add an active product, summing with an existing line for it
    pub async fn add_item(
        &self,
        user: &AuthenticatedUser,
        product_id: Uuid,
        quantity: i32,
    ) -> Result<CartLine> {
        if !(1..=MAX_CART_QUANTITY).contains(&quantity) {
            return Err(AppError::validation(format!(
                "Quantity must be between 1 and {}",
                MAX_CART_QUANTITY
            )));
        }

        let product = self.products.get(product_id).await?;

        let existing = self
            .repository
            .quantity_for_product(&user.user_id, product_id)
            .await?
            .unwrap_or(0);

        let requested = match existing.checked_add(quantity) {
            Some(total) if total <= MAX_CART_QUANTITY => total,
            _ => {
                return Err(AppError::validation(format!(
                    "A cart line cannot hold more than {} units",
                    MAX_CART_QUANTITY
                )))
            }
        };

        if requested > product.stock_quantity {
            return Err(AppError::InsufficientStock {
                requested,
                available: product.stock_quantity,
            });
        }

        let item = self
            .repository
            .add(&user.user_id, product_id, quantity)
            .await?;

        self.get_item(user, item.id).await
    }

    /// Set a line's quantity; 0 deletes the line
    pub async fn set_quantity(
        &self,
        user: &AuthenticatedUser,
        id: Uuid,
        quantity: i32,
    ) -> Result<QuantityChange> {
        if !(0..=MAX_CART_QUANTITY).contains(&quantity) {
            return Err(AppError::validation(format!(
                "Quantity must be between 0 and {}",
                MAX_CART_QUANTITY
            )));
        }

        let mut line = self.get_item(user, id).await?;

        if quantity == 0 {
            if !self.repository.delete(id, &user.user_id).await? {
                return Err(item_not_found());
            }
            return Ok(QuantityChange {
                id,
                removed: true,
                line: None,
            });
        }

        if quantity > line.stock_quantity {
            return Err(AppError::InsufficientStock {
                requested: quantity,
                available: line.stock_quantity,
            });
        }

        self.repository
            .update_quantity(id, &user.user_id, quantity)
            .await?
            .ok_or_else(item_not_found)?;

        line.quantity = quantity;

        Ok(QuantityChange {
            id,
            removed: false,
            line: Some(line),
        })
    }

    pub async fn remove_item(&self, user: &AuthenticatedUser, id: Uuid) -> Result<()> {
        if self.repository.delete(id, &user.user_id).await? {
            Ok(())
        } else {
            Err(item_not_found())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cart::models::CartItem;
    use crate::features::cart::repositories::MockCartRepository;
    use crate::features::products::repositories::MockProductRepository;
    use crate::shared::test_helpers::{cart_line_fixture, product_fixture};

    fn service(cart: MockCartRepository, products: MockProductRepository) -> CartService {
        CartService::new(
            Arc::new(cart),
            Arc::new(ProductService::new(Arc::new(products))),
        )
    }

    fn shopper() -> AuthenticatedUser {
        AuthenticatedUser::new("shopper")
    }

    fn cart_item(id: Uuid, quantity: i32) -> CartItem {
        CartItem {
            id,
            user_id: "shopper".to_string(),
            product_id: Uuid::new_v4(),
            quantity,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_zero_quantity_deletes_line() {
        let id = Uuid::new_v4();
        let mut cart = MockCartRepository::new();
        cart.expect_find_line()
            .withf(move |item, user| *item == id && user == "shopper")
            .returning(|item, _| Ok(Some(cart_line_fixture(item, 2, 10))));
        cart.expect_delete()
            .withf(move |item, user| *item == id && user == "shopper")
            .times(1)
            .returning(|_, _| Ok(true));
        cart.expect_update_quantity().never();

        let change = service(cart, MockProductRepository::new())
            .set_quantity(&shopper(), id, 0)
            .await
            .unwrap();

        assert!(change.removed);
        assert!(change.line.is_none());
    }

    #[tokio::test]
    async fn test_quantity_above_stock_leaves_row_unchanged() {
        let id = Uuid::new_v4();
        let mut cart = MockCartRepository::new();
        cart.expect_find_line()
            .returning(|item, _| Ok(Some(cart_line_fixture(item, 1, 3))));
        cart.expect_update_quantity().never();
        cart.expect_delete().never();

        let err = service(cart, MockProductRepository::new())
            .set_quantity(&shopper(), id, 4)
            .await
            .unwrap_err();

        match err {
            AppError::InsufficientStock {
                requested,
                available,
            } => {
                assert_eq!(requested, 4);
                assert_eq!(available, 3);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_foreign_line_is_not_found() {
        let mut cart = MockCartRepository::new();
        cart.expect_find_line().returning(|_, _| Ok(None));
        cart.expect_update_quantity().never();

        let err = service(cart, MockProductRepository::new())
            .set_quantity(&shopper(), Uuid::new_v4(), 2)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "cart_item_not_found");
    }

    #[tokio::test]
    async fn test_out_of_range_quantity_is_rejected_before_lookup() {
        let mut cart = MockCartRepository::new();
        cart.expect_find_line().never();

        let err = service(cart, MockProductRepository::new())
            .set_quantity(&shopper(), Uuid::new_v4(), 100)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "validation_error");
    }

    #[tokio::test]
    async fn test_update_returns_line_with_new_quantity() {
        let id = Uuid::new_v4();
        let mut cart = MockCartRepository::new();
        cart.expect_find_line()
            .returning(|item, _| Ok(Some(cart_line_fixture(item, 1, 10))));
        cart.expect_update_quantity()
            .withf(move |item, user, qty| *item == id && user == "shopper" && *qty == 5)
            .times(1)
            .returning(|item, _, qty| Ok(Some(cart_item(item, qty))));

        let change = service(cart, MockProductRepository::new())
            .set_quantity(&shopper(), id, 5)
            .await
            .unwrap();

        assert!(!change.removed);
        assert_eq!(change.line.map(|l| l.quantity), Some(5));
    }

    #[tokio::test]
    async fn test_add_sums_with_existing_line_and_checks_stock() {
        let mut product = product_fixture();
        product.stock_quantity = 5;
        let product_id = product.id;

        let mut products = MockProductRepository::new();
        products
            .expect_find_active_by_id()
            .returning(move |_| Ok(Some(product.clone())));
        let mut cart = MockCartRepository::new();
        cart.expect_quantity_for_product().returning(|_, _| Ok(Some(4)));
        cart.expect_add().never();

        let err = service(cart, products)
            .add_item(&shopper(), product_id, 2)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "insufficient_stock");
    }

    #[tokio::test]
    async fn test_add_rejects_non_positive_and_oversized_quantities() {
        for quantity in [-3, 0, MAX_CART_QUANTITY + 1, i32::MAX] {
            let mut products = MockProductRepository::new();
            products.expect_find_active_by_id().never();
            let mut cart = MockCartRepository::new();
            cart.expect_quantity_for_product().never();
            cart.expect_add().never();

            let err = service(cart, products)
                .add_item(&shopper(), Uuid::new_v4(), quantity)
                .await
                .unwrap_err();

            assert_eq!(err.code(), "validation_error", "quantity {}", quantity);
        }
    }

    #[tokio::test]
    async fn test_add_total_above_cap_is_rejected() {
        let product = product_fixture();
        let product_id = product.id;

        let mut products = MockProductRepository::new();
        products
            .expect_find_active_by_id()
            .returning(move |_| Ok(Some(product.clone())));
        let mut cart = MockCartRepository::new();
        cart.expect_quantity_for_product()
            .returning(|_, _| Ok(Some(i32::MAX)));
        cart.expect_add().never();

        let err = service(cart, products)
            .add_item(&shopper(), product_id, 1)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "validation_error");
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_product_not_found() {
        let mut products = MockProductRepository::new();
        products.expect_find_active_by_id().returning(|_| Ok(None));
        let mut cart = MockCartRepository::new();
        cart.expect_add().never();

        let err = service(cart, products)
            .add_item(&shopper(), Uuid::new_v4(), 1)
            .await
            .unwrap_err();

        assert_eq!(err.code(), "product_not_found");
    }

    #[tokio::test]
    async fn test_add_inserts_and_returns_line() {
        let product = product_fixture();
        let product_id = product.id;
        let item_id = Uuid::new_v4();

        let mut products = MockProductRepository::new();
        products
            .expect_find_active_by_id()
            .returning(move |_| Ok(Some(product.clone())));
        let mut cart = MockCartRepository::new();
        cart.expect_quantity_for_product().returning(|_, _| Ok(None));
        cart.expect_add()
            .withf(move |user, product, qty| user == "shopper" && *product == product_id && *qty == 2)
            .times(1)
            .returning(move |_, _, qty| Ok(cart_item(item_id, qty)));
        cart.expect_find_line()
            .withf(move |id, _| *id == item_id)
            .returning(|id, _| Ok(Some(cart_line_fixture(id, 2, 10))));

        let line = service(cart, products)
            .add_item(&shopper(), product_id, 2)
            .await
            .unwrap();

        assert_eq!(line.id, item_id);
        assert_eq!(line.quantity, 2);
    }

    #[tokio::test]
    async fn test_cart_totals() {
        let mut cart = MockCartRepository::new();
        cart.expect_list_lines().returning(|_| {
            Ok(vec![
                cart_line_fixture(Uuid::new_v4(), 2, 10),
                cart_line_fixture(Uuid::new_v4(), 1, 10),
            ])
        });

        let cart = service(cart, MockProductRepository::new())
            .get_cart(&shopper())
            .await
            .unwrap();

        assert_eq!(cart.item_count(), 3);
        assert_eq!(
            cart.subtotal(),
            cart.lines.iter().map(|l| l.price * rust_decimal::Decimal::from(l.quantity)).sum()
        );
    }
}
