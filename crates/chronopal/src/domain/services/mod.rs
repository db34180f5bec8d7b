//! Domain Services
//!
//! Stateless rules that operate on domain entities.
//! - lifecycle: neglect decay, interactions, sass and battery rules
//! - phrasebook: rule-based dialogue for the text responder

pub mod lifecycle;
pub mod phrasebook;

pub use lifecycle::{LifecycleConfig, NeglectReport, Outcome, PetLifecycle};
