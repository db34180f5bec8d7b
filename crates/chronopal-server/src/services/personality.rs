//! Personality Responder - The pet's voice
//!
//! Asks the configured LLM for an in-character reply and falls back to the
//! rule-based phrasebook when no model is configured or the call fails.

use std::sync::Arc;

use async_trait::async_trait;

use chronopal::domain::services::phrasebook;
use chronopal::{ChatMessage, CompletionOptions, LlmProvider, PetContext, SassLevel, TextResponder};

/// Longest reply the persona is asked to give
const MAX_REPLY_CHARS: usize = 100;

/// Builds the system prompt that describes every sass tier
pub fn system_prompt(ctx: &PetContext) -> String {
    let mut prompt = format!(
        "You are {}, a {} digital pet whose sassiness evolves with how often you are visited.\n\
         Your personality ranges from Level 1 (mildly sassy) to Level 5 (maximum sass).\n\n",
        ctx.name, ctx.species
    );

    for value in SassLevel::MIN..=SassLevel::MAX {
        let tier = SassLevel::saturating_from(value);
        prompt.push_str(&format!(
            "Level {} ({}): {}\n",
            tier.value(),
            tier.name(),
            phrasebook::persona_brief(tier)
        ));
    }

    prompt.push_str(&format!(
        "\nRemember to:\n\
         - Keep responses under {} characters\n\
         - Match the sass level to the pet's current level\n\
         - Reference early 2000s internet culture\n\
         - Give helpful advice when appropriate\n\
         - Use emojis sparingly (like they did in the early 2000s)",
        MAX_REPLY_CHARS
    ));

    prompt
}

/// The user turn: pet state header followed by the message
pub fn user_prompt(message: &str, ctx: &PetContext) -> String {
    format!(
        "Pet mood: {}, Level: {}, Sass Level: {}, Battery: {}\nUser message: {}",
        ctx.mood,
        ctx.level,
        ctx.sass_level.value(),
        ctx.battery_level,
        message
    )
}

/// TextResponder backed by an optional LLM provider
pub struct PersonalityResponder {
    llm: Option<Arc<dyn LlmProvider>>,
    options: CompletionOptions,
}

impl PersonalityResponder {
    pub fn new(llm: Option<Arc<dyn LlmProvider>>) -> Self {
        Self {
            llm,
            options: CompletionOptions::default(),
        }
    }

    /// Rule-based replies only
    pub fn offline() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl TextResponder for PersonalityResponder {
    async fn generate_reply(&self, message: &str, ctx: &PetContext) -> String {
        let Some(llm) = &self.llm else {
            return phrasebook::fallback_reply(message, ctx);
        };

        let messages = [
            ChatMessage::system(system_prompt(ctx)),
            ChatMessage::user(user_prompt(message, ctx)),
        ];

        match llm.complete(&messages, &self.options).await {
            Ok(response) => {
                let reply = response.content.trim();
                if reply.is_empty() {
                    tracing::warn!(
                        provider = llm.provider_name(),
                        model = llm.model_id(),
                        "Empty completion, using phrasebook"
                    );
                    phrasebook::fallback_reply(message, ctx)
                } else {
                    reply.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(
                    provider = llm.provider_name(),
                    model = llm.model_id(),
                    "LLM call failed, using phrasebook: {}",
                    e
                );
                phrasebook::fallback_reply(message, ctx)
            }
        }
    }
}
