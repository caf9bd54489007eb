mod cart_repository;

#[cfg(test)]
pub use cart_repository::MockCartRepository;
pub use cart_repository::{CartRepository, PgCartRepository};
