//! In-Memory Repository Implementations
//!
//! Used for local development (`STORAGE_BACKEND=memory`) and tests.

mod pet_repository;

pub use pet_repository::InMemoryPetRepository;
