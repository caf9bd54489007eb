mod logto_auth_client;

#[cfg(test)]
pub use logto_auth_client::MockIdentityProvider;
pub use logto_auth_client::{IdentityProvider, LogtoAuthClient};
