//! PostgreSQL Repository Implementations

mod pet_repository;

pub use pet_repository::PgPetRepository;
