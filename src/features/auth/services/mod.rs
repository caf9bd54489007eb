pub mod auth_service;
pub mod token_service;

pub use auth_service::{AuthService, AuthSession};
#[cfg(test)]
pub use token_service::MockTokenIssuer;
pub use token_service::{TokenIssuer, TokenService};
