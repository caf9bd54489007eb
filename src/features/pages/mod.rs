//! Server-rendered storefront pages.
//!
//! Every page path starts with its locale. Templates receive the page data
//! already localized, plus `t` (the locale's messages), `alternates` (the
//! same page in other locales) and `signed_in`.
//!
//! | Method | Path | Gate |
//! |--------|------|------|
//! | GET | `/{locale}` | - |
//! | GET | `/{locale}/products`, `/{locale}/products/{id}` | - |
//! | GET | `/{locale}/collections`, `/{locale}/collections/{slug}` | - |
//! | GET, POST | `/{locale}/login`, `/{locale}/register` | - |
//! | POST | `/{locale}/logout` | - |
//! | GET | `/{locale}/account`, `/{locale}/checkout`, `/{locale}/cart` | customer |
//! | POST | `/{locale}/cart/items`, `/{locale}/cart/items/{id}` | customer |
//! | GET | `/{locale}/admin`, `/{locale}/admin/products` | admin |

pub mod forms;
pub mod frame;
pub mod handlers;
pub mod renderer;
pub mod routes;
pub mod state;
pub mod views;

pub use renderer::PageRenderer;
pub use state::PageState;
