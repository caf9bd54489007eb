//! Catalog products.
//!
//! Listings combine the query filters conjunctively over active rows and
//! return the pagination block; inactive rows are only visible through the
//! admin listing.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/products` | Filtered, paginated listing |
//! | GET | `/api/products/{id}` | Active product detail |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ProductService;
