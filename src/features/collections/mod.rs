//! Curated collections.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/collections` | Active collections in display order |
//! | GET | `/api/collections/{slug}` | Active collection with its active products |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::CollectionService;
