//! Interaction - The actions an owner can take with a pet

use serde::{Deserialize, Serialize};

/// Interaction kinds that mutate pet state and count toward sass milestones
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    Feed,
    Play,
    Teach,
    Chat,
}

impl std::fmt::Display for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interaction::Feed => write!(f, "feed"),
            Interaction::Play => write!(f, "play"),
            Interaction::Teach => write!(f, "teach"),
            Interaction::Chat => write!(f, "chat"),
        }
    }
}
