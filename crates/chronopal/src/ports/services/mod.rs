//! Service Ports
//!
//! Abstract interfaces for external services.

mod clock;
mod llm_provider;
mod text_responder;

pub use clock::*;
pub use llm_provider::*;
pub use text_responder::*;
