mod product_repository;

#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{PgProductRepository, ProductRepository};
