//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod interaction;
mod mood;
mod sass_level;

pub use interaction::*;
pub use mood::*;
pub use sass_level::*;
