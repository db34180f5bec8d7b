//! SassLevel - How sarcastic the pet's dialogue is

use serde::{Deserialize, Serialize};

/// Sass tier, 1 (sweet) through 5 (savage).
///
/// Serialized as its integer tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i32", into = "i32")]
pub enum SassLevel {
    #[default]
    Sweet = 1,
    Playful = 2,
    Snarky = 3,
    Sassy = 4,
    Savage = 5,
}

/// Cumulative interaction counts that unlock each tier
const MILESTONES: [(i32, SassLevel); 4] = [
    (100, SassLevel::Savage),
    (50, SassLevel::Sassy),
    (25, SassLevel::Snarky),
    (10, SassLevel::Playful),
];

impl SassLevel {
    pub const MIN: i32 = 1;
    pub const MAX: i32 = 5;

    /// Tier earned by `interaction_count` cumulative interactions
    pub fn milestone(interaction_count: i32) -> Self {
        MILESTONES
            .iter()
            .find(|(threshold, _)| interaction_count >= *threshold)
            .map(|(_, level)| *level)
            .unwrap_or(SassLevel::Sweet)
    }

    /// Tier from an integer, clamped into `1..=5`
    pub fn saturating_from(value: i32) -> Self {
        match value.clamp(Self::MIN, Self::MAX) {
            1 => SassLevel::Sweet,
            2 => SassLevel::Playful,
            3 => SassLevel::Snarky,
            4 => SassLevel::Sassy,
            _ => SassLevel::Savage,
        }
    }

    /// Raise by `steps` tiers, capped at savage
    pub fn raised_by(self, steps: i32) -> Self {
        Self::saturating_from(self.value() + steps.max(0))
    }

    pub fn value(self) -> i32 {
        self as i32
    }

    pub fn name(&self) -> &'static str {
        match self {
            SassLevel::Sweet => "sweet",
            SassLevel::Playful => "playful",
            SassLevel::Snarky => "snarky",
            SassLevel::Sassy => "sassy",
            SassLevel::Savage => "savage",
        }
    }
}

impl TryFrom<i32> for SassLevel {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self::saturating_from(value))
        } else {
            Err(format!("Sass level out of range: {}", value))
        }
    }
}

impl From<SassLevel> for i32 {
    fn from(level: SassLevel) -> Self {
        level.value()
    }
}

impl std::fmt::Display for SassLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
