mod profile_repository;

#[cfg(test)]
pub use profile_repository::MockProfileRepository;
pub use profile_repository::{PgProfileRepository, ProfileRepository};
