pub mod cart_dto;

pub use cart_dto::*;
