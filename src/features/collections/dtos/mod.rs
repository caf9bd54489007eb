pub mod collection_dto;

pub use collection_dto::*;
