use axum::{
    extract::{rejection::FormRejection, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Serialize;
use uuid::Uuid;

use crate::core::error::{AppError, Resource, Result};
use crate::features::pages::forms::{AddToCartForm, CartNotice, QuantityForm};
use crate::features::pages::frame::PageFrame;
use crate::features::pages::state::PageState;
use crate::features::pages::views::CartView;

/// Cart errors reported back on the cart page rather than as an error page
const CART_NOTICES: [&str; 4] = [
    "insufficient_stock",
    "validation_error",
    "product_not_found",
    "cart_item_not_found",
];

fn form_value<T>(form: std::result::Result<Form<T>, FormRejection>) -> Result<T> {
    form.map(|Form(value)| value)
        .map_err(|rejection| AppError::validation(rejection.body_text()))
}

/// Back to the cart, with the error code when the change was refused
fn after_change(state: &PageState, frame: &PageFrame, result: Result<()>) -> Response {
    let cart = frame.href("/cart");

    match result {
        Ok(()) => Redirect::to(&cart).into_response(),
        Err(e) if CART_NOTICES.contains(&e.code()) => {
            Redirect::to(&format!("{}?error={}", cart, e.code())).into_response()
        }
        Err(e) => state.renderer.error_page(frame, &e),
    }
}

#[derive(Serialize)]
struct CartPage {
    cart: CartView,
    notice: Option<String>,
    checkout_href: String,
}

pub async fn cart(
    State(state): State<PageState>,
    frame: PageFrame,
    Query(notice): Query<CartNotice>,
) -> Response {
    let result = async {
        let user = frame.require_user()?;
        let cart = state.cart.get_cart(user).await?;

        let notice = notice
            .error
            .filter(|code| CART_NOTICES.contains(&code.as_str()))
            .map(|code| {
                state
                    .renderer
                    .translate(&frame, &format!("cart.error.{}", code))
                    .to_string()
            });

        let page = CartPage {
            cart: CartView::new(&cart, frame.locale),
            notice,
            checkout_href: frame.href("/checkout"),
        };

        Ok::<_, AppError>(
            state
                .renderer
                .render(&frame, "pages/cart.html", &page)?
                .into_response(),
        )
    }
    .await;

    state.renderer.respond(&frame, result)
}

pub async fn add_item(
    State(state): State<PageState>,
    frame: PageFrame,
    form: std::result::Result<Form<AddToCartForm>, FormRejection>,
) -> Response {
    let result = async {
        let user = frame.require_user()?;
        let form = form_value(form)?;

        state
            .cart
            .add_item(user, form.product_id, form.quantity.unwrap_or(1))
            .await
            .map(|_| ())
    }
    .await;

    after_change(&state, &frame, result)
}

pub async fn update_item(
    State(state): State<PageState>,
    frame: PageFrame,
    Path((_, id)): Path<(String, String)>,
    form: std::result::Result<Form<QuantityForm>, FormRejection>,
) -> Response {
    let result = async {
        let user = frame.require_user()?;
        let id = Uuid::parse_str(&id)
            .map_err(|_| AppError::not_found(Resource::CartItem, "Cart item not found"))?;
        let form = form_value(form)?;

        state
            .cart
            .set_quantity(user, id, form.quantity)
            .await
            .map(|_| ())
    }
    .await;

    after_change(&state, &frame, result)
}

#[derive(Serialize)]
struct CheckoutPage {
    cart: CartView,
    cart_href: String,
}

/// Order summary; payment is not taken here
pub async fn checkout(State(state): State<PageState>, frame: PageFrame) -> Response {
    let result = async {
        let user = frame.require_user()?;
        let cart = state.cart.get_cart(user).await?;

        let page = CheckoutPage {
            cart: CartView::new(&cart, frame.locale),
            cart_href: frame.href("/cart"),
        };

        Ok::<_, AppError>(
            state
                .renderer
                .render(&frame, "pages/checkout.html", &page)?
                .into_response(),
        )
    }
    .await;

    state.renderer.respond(&frame, result)
}
