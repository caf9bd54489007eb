pub mod cart_handler;

pub use cart_handler::{
    __path_add_cart_item, __path_delete_cart_item, __path_get_cart, __path_get_cart_item,
    __path_update_cart_item, add_cart_item, delete_cart_item, get_cart, get_cart_item,
    update_cart_item,
};
