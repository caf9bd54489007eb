//! Storefront profiles.
//!
//! One row per identity provider account, holding display fields and the
//! admin flag consulted by the authorization gate.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/profile` | Current user's profile (created on demand) |
//! | PATCH | `/api/profile` | Update the display name |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::ProfileService;
