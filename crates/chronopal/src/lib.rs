//! ChronoPal Domain Library
//!
//! Core domain types and interfaces for the ChronoPal virtual pet.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Pet)
//!   - `value_objects/`: Immutable value types (Mood, SassLevel, Interaction)
//!   - `services/`: Lifecycle rules and the rule-based phrasebook
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External service interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use chronopal::domain::{Pet, PetLifecycle};
//! use chronopal::ports::{PetRepository, TextResponder};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    DomainError, Interaction, LifecycleConfig, Mood, NeglectReport, Outcome, Pet, PetContext,
    PetLifecycle, SassLevel,
};
pub use ports::{
    ChatMessage, Clock, CompletionOptions, CompletionResponse, LlmProvider, MessageRole,
    PetRepository, PetUpdate, TextResponder,
};
