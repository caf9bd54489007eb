//! Template view models. Text is already resolved for the page locale and
//! prices are already formatted.

use serde::Serialize;
use uuid::Uuid;

use crate::features::admin::models::DashboardStats;
use crate::features::cart::models::{Cart, CartLine};
use crate::features::categories::models::Category;
use crate::features::collections::models::Collection;
use crate::features::products::models::Product;
use crate::shared::constants::MAX_CART_QUANTITY;
use crate::shared::i18n::{format_price, Locale};
use crate::shared::types::{PageRequest, Pagination};

#[derive(Debug, Clone, Serialize)]
pub struct ProductCard {
    pub id: Uuid,
    pub href: String,
    pub name: String,
    pub price: String,
    pub image: Option<String>,
    pub in_stock: bool,
    pub featured: bool,
}

impl ProductCard {
    pub fn new(product: &Product, locale: Locale) -> Self {
        Self {
            id: product.id,
            href: format!("/{}/products/{}", locale, product.id),
            name: product.name_in(locale).to_string(),
            price: format_price(product.price, locale),
            image: product.primary_image().map(str::to_string),
            in_stock: product.in_stock(),
            featured: product.is_featured,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub images: Vec<String>,
    pub in_stock: bool,
    pub stock_quantity: i32,
    /// Largest quantity the add-to-cart form offers
    pub max_quantity: i32,
    pub collection_href: Option<String>,
}

impl ProductView {
    pub fn new(product: &Product, locale: Locale) -> Self {
        Self {
            id: product.id,
            sku: product.sku.clone(),
            name: product.name_in(locale).to_string(),
            description: product.description().text(locale).map(str::to_string),
            price: format_price(product.price, locale),
            images: product.images.clone(),
            in_stock: product.in_stock(),
            stock_quantity: product.stock_quantity,
            max_quantity: product.stock_quantity.clamp(0, MAX_CART_QUANTITY),
            collection_href: product
                .collection_slug
                .as_ref()
                .map(|slug| format!("/{}/collections/{}", locale, slug)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionCard {
    pub slug: String,
    pub href: String,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl CollectionCard {
    pub fn new(collection: &Collection, locale: Locale) -> Self {
        Self {
            slug: collection.slug.clone(),
            href: format!("/{}/collections/{}", locale, collection.slug),
            name: collection.name().get(locale).clone(),
            description: collection.description().text(locale).map(str::to_string),
            image: collection.hero_image.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectionView {
    pub name: String,
    pub description: Option<String>,
    pub story: Option<String>,
    pub image: Option<String>,
    pub products: Vec<ProductCard>,
}

impl CollectionView {
    pub fn new(collection: &Collection, products: &[Product], locale: Locale) -> Self {
        Self {
            name: collection.name().get(locale).clone(),
            description: collection.description().text(locale).map(str::to_string),
            story: collection.story().text(locale).map(str::to_string),
            image: collection.hero_image.clone(),
            products: products.iter().map(|p| ProductCard::new(p, locale)).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryOption {
    pub slug: String,
    pub name: String,
    pub selected: bool,
}

impl CategoryOption {
    pub fn new(category: &Category, locale: Locale, selected: Option<&str>) -> Self {
        Self {
            slug: category.slug.clone(),
            name: category.name().get(locale).clone(),
            selected: selected == Some(category.slug.as_str()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub id: Uuid,
    pub href: String,
    pub name: String,
    pub price: String,
    pub quantity: i32,
    pub line_total: String,
    pub image: Option<String>,
    pub max_quantity: i32,
    pub update_action: String,
}

impl CartLineView {
    pub fn new(line: &CartLine, locale: Locale) -> Self {
        Self {
            id: line.id,
            href: format!("/{}/products/{}", locale, line.product_id),
            name: line.name_in(locale).to_string(),
            price: format_price(line.price, locale),
            quantity: line.quantity,
            line_total: format_price(line.line_total(), locale),
            image: line.images.first().cloned(),
            max_quantity: line
                .stock_quantity
                .clamp(line.quantity.min(MAX_CART_QUANTITY), MAX_CART_QUANTITY),
            update_action: format!("/{}/cart/items/{}", locale, line.id),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: i64,
    pub subtotal: String,
    pub empty: bool,
}

impl CartView {
    pub fn new(cart: &Cart, locale: Locale) -> Self {
        Self {
            lines: cart
                .lines
                .iter()
                .map(|l| CartLineView::new(l, locale))
                .collect(),
            item_count: cart.item_count(),
            subtotal: format_price(cart.subtotal(), locale),
            empty: cart.lines.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminProductRow {
    pub id: Uuid,
    pub sku: String,
    pub name: String,
    pub price: String,
    pub stock_quantity: i32,
    pub low_stock: bool,
    pub is_active: bool,
    pub is_featured: bool,
}

impl AdminProductRow {
    pub fn new(product: &Product, locale: Locale, low_stock_threshold: i32) -> Self {
        Self {
            id: product.id,
            sku: product.sku.clone(),
            name: product.name_in(locale).to_string(),
            price: format_price(product.price, locale),
            stock_quantity: product.stock_quantity,
            low_stock: product.stock_quantity <= low_stock_threshold,
            is_active: product.is_active,
            is_featured: product.is_featured,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub total_products: i64,
    pub active_products: i64,
    pub featured_products: i64,
    pub low_stock_products: i64,
    pub out_of_stock_products: i64,
    pub active_collections: i64,
    pub cart_items: i64,
}

impl From<DashboardStats> for DashboardView {
    fn from(s: DashboardStats) -> Self {
        Self {
            total_products: s.total_products,
            active_products: s.active_products,
            featured_products: s.featured_products,
            low_stock_products: s.low_stock_products,
            out_of_stock_products: s.out_of_stock_products,
            active_collections: s.active_collections,
            cart_items: s.cart_items,
        }
    }
}

/// Previous/next links of a listing page, keeping its other query parameters
#[derive(Debug, Clone, Serialize)]
pub struct PageLinks {
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub previous: Option<String>,
    pub next: Option<String>,
}

impl PageLinks {
    pub fn new(
        base: &str,
        params: &[(&str, String)],
        page: PageRequest,
        pagination: Pagination,
    ) -> Self {
        let link = |offset: i64| listing_href(base, params, page.limit, offset);

        Self {
            page: pagination.page,
            total_pages: pagination.total_pages,
            total: pagination.total,
            previous: page.previous_offset().map(link),
            next: page.next_offset(pagination.total).map(link),
        }
    }
}

/// `base?k=v&…&limit=…&offset=…` with every value URL-encoded
pub fn listing_href(base: &str, params: &[(&str, String)], limit: i64, offset: i64) -> String {
    let mut query: Vec<String> = params
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect();
    query.push(format!("limit={}", limit));
    query.push(format!("offset={}", offset));

    format!("{}?{}", base, query.join("&"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{cart_line_fixture, product_fixture};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_product_card_formats_for_locale() {
        let mut product = product_fixture();
        product.price = Decimal::from_str("1234.5").unwrap();
        product.name_fr = "Sac en cuir".to_string();

        let card = ProductCard::new(&product, Locale::Fr);

        assert_eq!(card.name, "Sac en cuir");
        assert_eq!(card.price, "1\u{202F}234,50 €");
        assert_eq!(card.href, format!("/fr/products/{}", product.id));
    }

    #[test]
    fn test_product_view_caps_form_quantity() {
        let mut product = product_fixture();
        product.stock_quantity = 500;
        assert_eq!(ProductView::new(&product, Locale::En).max_quantity, 99);

        product.stock_quantity = 3;
        assert_eq!(ProductView::new(&product, Locale::En).max_quantity, 3);
    }

    #[test]
    fn test_cart_view_totals() {
        let line = cart_line_fixture(Uuid::new_v4(), 2, 10);
        let cart = Cart {
            lines: vec![line.clone()],
        };

        let view = CartView::new(&cart, Locale::En);

        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, format_price(line.line_total(), Locale::En));
        assert!(!view.empty);
    }

    #[test]
    fn test_page_links_keep_filters() {
        let page = PageRequest::new(12, 12);
        let links = PageLinks::new(
            "/en/products",
            &[("search", "red bag".to_string())],
            page,
            Pagination::new(30, page),
        );

        assert_eq!(
            links.previous.as_deref(),
            Some("/en/products?search=red%20bag&limit=12&offset=0")
        );
        assert_eq!(
            links.next.as_deref(),
            Some("/en/products?search=red%20bag&limit=12&offset=24")
        );
        assert_eq!(links.total_pages, 3);
    }

    #[test]
    fn test_last_page_has_no_next_link() {
        let page = PageRequest::new(12, 24);
        let links = PageLinks::new("/en/products", &[], page, Pagination::new(30, page));
        assert!(links.next.is_none());
    }
}
