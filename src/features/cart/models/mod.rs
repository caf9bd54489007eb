pub mod cart_item;

pub use cart_item::{Cart, CartItem, CartLine, QuantityChange};
