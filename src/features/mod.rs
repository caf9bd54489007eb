pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod collections;
pub mod logto;
pub mod pages;
pub mod products;
pub mod profiles;
