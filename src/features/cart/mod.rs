//! Per-user shopping cart.
//!
//! One line per (user, product). Adding an already present product sums the
//! quantities; every write checks the result against the product's stock.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/cart` | Lines, item count and subtotal |
//! | POST | `/api/cart/items` | Add a product |
//! | GET | `/api/cart/items/{id}` | One line |
//! | PATCH | `/api/cart/items/{id}` | Set quantity (0 removes) |
//! | DELETE | `/api/cart/items/{id}` | Remove a line |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::CartService;
