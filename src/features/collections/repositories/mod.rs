mod collection_repository;

#[cfg(test)]
pub use collection_repository::MockCollectionRepository;
pub use collection_repository::{CollectionRepository, PgCollectionRepository};
