pub mod collection_handler;

pub use collection_handler::{
    __path_get_collection, __path_list_collections, get_collection, list_collections,
};
