//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod pet_repository;

pub use pet_repository::*;
