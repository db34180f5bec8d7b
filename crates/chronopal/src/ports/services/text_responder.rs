//! Text Responder Port
//!
//! Produces the pet's side of a chat.

use async_trait::async_trait;

use crate::domain::entities::PetContext;

/// Service interface for generating in-character chat replies.
///
/// Implementations must always return some text: any internal failure is
/// absorbed into a fallback reply rather than surfaced to the caller.
#[async_trait]
pub trait TextResponder: Send + Sync {
    async fn generate_reply(&self, message: &str, context: &PetContext) -> String;
}
