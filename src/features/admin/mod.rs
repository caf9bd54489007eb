//! Admin dashboard data.
//!
//! Every route here is nested under `/api/admin` and requires a session whose
//! profile carries the admin flag.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/admin/dashboard` | Catalog and cart counts |
//! | GET | `/api/admin/products` | Product listing including inactive rows |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use services::AdminService;
