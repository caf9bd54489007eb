pub mod admin_handler;

pub use admin_handler::{
    __path_get_dashboard, __path_list_admin_products, get_dashboard, list_admin_products,
};
