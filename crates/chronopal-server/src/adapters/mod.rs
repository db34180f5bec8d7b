//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod clock;
pub mod memory;
pub mod openai;
pub mod postgres;

// Re-exports
pub use clock::SystemClock;
pub use memory::InMemoryPetRepository;
pub use openai::OpenAiChatProvider;
pub use postgres::PgPetRepository;
