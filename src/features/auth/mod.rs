//! Accounts and sessions, delegated to the Logto identity provider.
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | POST | `/api/auth/register` | Create an account and start a session |
//! | POST | `/api/auth/login` | Start a session |
//! | POST | `/api/auth/logout` | Revoke the refresh token and clear cookies |
//! | GET | `/api/auth/me` | Current user and profile |

mod jwks;
mod validator;

pub mod authorization;
pub mod clients;
pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;
pub mod session;

pub use authorization::Authorizer;
pub use jwks::JwksClient;
#[cfg(test)]
pub use validator::MockSessionVerifier;
pub use validator::{JwtValidator, SessionVerifier};
