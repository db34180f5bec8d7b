//! Server-side Services
//!
//! - personality: in-character chat replies (LLM with rule-based fallback)

pub mod personality;
