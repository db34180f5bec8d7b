//! Pet - The virtual pet an owner looks after
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{Mood, SassLevel};

/// Full battery charge
pub const MAX_BATTERY: i32 = 100;

/// Memory every freshly hatched pet starts with
pub const SEED_MEMORY: &str = "I just hatched! Nice to meet you.";

/// Name given to auto-provisioned pets
pub const DEFAULT_PET_NAME: &str = "ChronoPal";

/// Species given to auto-provisioned pets
pub const DEFAULT_PET_SPECIES: &str = "Digital";

/// Pet - Snapshot of one pet record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub species: String,
    pub mood: Mood,
    /// Always >= 1
    pub level: i32,
    pub sass_level: SassLevel,
    /// 0..=100, zero means depleted
    pub battery_level: i32,
    pub interaction_count: i32,
    pub last_fed: DateTime<Utc>,
    pub last_interaction: DateTime<Utc>,
    /// Instant up to which neglect has already been charged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_neglect_check: Option<DateTime<Utc>>,
    /// Append-only, oldest first
    #[serde(default)]
    pub memory_log: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The slice of pet state the text responder needs to stay in character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetContext {
    pub name: String,
    pub species: String,
    pub mood: Mood,
    pub level: i32,
    pub sass_level: SassLevel,
    pub battery_level: i32,
}

impl Pet {
    /// Hatch a new pet with default stats and a seed memory
    pub fn hatch(
        owner_id: impl Into<String>,
        name: impl Into<String>,
        species: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            name: name.into(),
            species: species.into(),
            mood: Mood::Happy,
            level: 1,
            sass_level: SassLevel::Sweet,
            battery_level: MAX_BATTERY,
            interaction_count: 0,
            last_fed: now,
            last_interaction: now,
            last_neglect_check: None,
            memory_log: vec![SEED_MEMORY.to_string()],
            created_at: now,
            updated_at: now,
        }
    }

    /// Hatch a pet with the default name and species
    pub fn hatch_default(owner_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::hatch(owner_id, DEFAULT_PET_NAME, DEFAULT_PET_SPECIES, now)
    }

    /// A depleted pet ignores every interaction until it is reset
    pub fn is_depleted(&self) -> bool {
        self.battery_level <= 0
    }

    /// Instant neglect is measured from.
    ///
    /// The older of the last feed and the last interaction, so playing with a
    /// hungry pet does not hide its hunger. Time already charged by a previous
    /// neglect check is never counted twice.
    pub fn neglect_anchor(&self) -> DateTime<Utc> {
        let last_action = self.last_fed.min(self.last_interaction);
        match self.last_neglect_check {
            Some(checked) => last_action.max(checked),
            None => last_action,
        }
    }

    /// Append an entry to the memory log
    pub fn remember(&mut self, entry: impl Into<String>) {
        self.memory_log.push(entry.into());
    }

    /// Add `delta` to the battery, clamped to `0..=100`
    pub fn adjust_battery(&mut self, delta: i32) {
        self.battery_level = self
            .battery_level
            .saturating_add(delta)
            .clamp(0, MAX_BATTERY);
    }

    pub fn context(&self) -> PetContext {
        PetContext {
            name: self.name.clone(),
            species: self.species.clone(),
            mood: self.mood,
            level: self.level,
            sass_level: self.sass_level,
            battery_level: self.battery_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_hatch_defaults() {
        let now = Utc::now();
        let pet = Pet::hatch_default("owner-1", now);

        assert_eq!(pet.owner_id, "owner-1");
        assert_eq!(pet.name, DEFAULT_PET_NAME);
        assert_eq!(pet.species, DEFAULT_PET_SPECIES);
        assert_eq!(pet.level, 1);
        assert_eq!(pet.sass_level, SassLevel::Sweet);
        assert_eq!(pet.battery_level, MAX_BATTERY);
        assert_eq!(pet.mood, Mood::Happy);
        assert_eq!(pet.memory_log, vec![SEED_MEMORY.to_string()]);
        assert!(!pet.is_depleted());
    }

    #[test]
    fn test_adjust_battery_clamps() {
        let mut pet = Pet::hatch_default("owner-1", Utc::now());
        pet.battery_level = 95;
        pet.adjust_battery(10);
        assert_eq!(pet.battery_level, 100);

        pet.battery_level = 2;
        pet.adjust_battery(-3);
        assert_eq!(pet.battery_level, 0);
        assert!(pet.is_depleted());
    }

    #[test]
    fn test_neglect_anchor_uses_oldest_action() {
        let now = Utc::now();
        let mut pet = Pet::hatch_default("owner-1", now);
        pet.last_fed = now - Duration::hours(50);
        pet.last_interaction = now - Duration::hours(30);
        assert_eq!(pet.neglect_anchor(), now - Duration::hours(50));

        pet.last_fed = now;
        assert_eq!(pet.neglect_anchor(), now - Duration::hours(30));

        pet.last_neglect_check = Some(now - Duration::hours(2));
        assert_eq!(pet.neglect_anchor(), now - Duration::hours(2));
    }

    #[test]
    fn test_camel_case_wire_format() {
        let pet = Pet::hatch_default("owner-1", Utc::now());
        let json = serde_json::to_value(&pet).unwrap();

        assert_eq!(json["ownerId"], "owner-1");
        assert_eq!(json["sassLevel"], 1);
        assert_eq!(json["batteryLevel"], 100);
        assert_eq!(json["mood"], "happy");
        assert!(json.get("lastNeglectCheck").is_none());
    }
}
