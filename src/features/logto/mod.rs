//! Logto Management API access shared by the auth feature.

pub mod token_manager;

pub use token_manager::LogtoTokenManager;
