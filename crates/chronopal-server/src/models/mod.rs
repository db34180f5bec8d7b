//! API Models (Request/Response DTOs)

mod pet;

pub use pet::*;
