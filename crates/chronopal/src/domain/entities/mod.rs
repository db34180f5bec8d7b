//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - Pet: the single virtual pet an owner looks after

mod pet;

pub use pet::*;
