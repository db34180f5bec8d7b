//! Pet Repository Port
//!
//! Abstract interface for Pet persistence operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{errors::DomainError, Mood, Pet, SassLevel};

/// Field-set written back after a state transition.
///
/// Identity fields (`id`, `owner_id`, `name`, `species`) are never part of an
/// update. Memory entries are appended, never replaced.
#[derive(Debug, Clone, PartialEq)]
pub struct PetUpdate {
    pub mood: Mood,
    pub level: i32,
    pub sass_level: SassLevel,
    pub battery_level: i32,
    pub interaction_count: i32,
    pub last_fed: DateTime<Utc>,
    pub last_interaction: DateTime<Utc>,
    pub last_neglect_check: Option<DateTime<Utc>>,
    pub append_memories: Vec<String>,
}

impl PetUpdate {
    /// Changes between a loaded snapshot and its mutated copy.
    ///
    /// Returns `None` when nothing changed.
    pub fn between(before: &Pet, after: &Pet) -> Option<Self> {
        let append_memories = after
            .memory_log
            .get(before.memory_log.len()..)
            .map(<[String]>::to_vec)
            .unwrap_or_default();

        let unchanged = append_memories.is_empty()
            && before.mood == after.mood
            && before.level == after.level
            && before.sass_level == after.sass_level
            && before.battery_level == after.battery_level
            && before.interaction_count == after.interaction_count
            && before.last_fed == after.last_fed
            && before.last_interaction == after.last_interaction
            && before.last_neglect_check == after.last_neglect_check;

        if unchanged {
            return None;
        }

        Some(Self {
            mood: after.mood,
            level: after.level,
            sass_level: after.sass_level,
            battery_level: after.battery_level,
            interaction_count: after.interaction_count,
            last_fed: after.last_fed,
            last_interaction: after.last_interaction,
            last_neglect_check: after.last_neglect_check,
            append_memories,
        })
    }

    /// Apply this update to a snapshot in place
    pub fn apply_to(&self, pet: &mut Pet) {
        pet.mood = self.mood;
        pet.level = self.level;
        pet.sass_level = self.sass_level;
        pet.battery_level = self.battery_level;
        pet.interaction_count = self.interaction_count;
        pet.last_fed = self.last_fed;
        pet.last_interaction = self.last_interaction;
        pet.last_neglect_check = self.last_neglect_check;
        pet.memory_log.extend(self.append_memories.iter().cloned());
    }
}

/// Repository interface for Pet entities
#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Find a Pet by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, DomainError>;

    /// Find all Pets owned by an identity, oldest first
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Pet>, DomainError>;

    /// Insert a new Pet
    async fn create(&self, pet: &Pet) -> Result<Pet, DomainError>;

    /// Write a field-set to an existing Pet.
    ///
    /// Returns `None` if the Pet no longer exists.
    async fn update(&self, id: Uuid, update: &PetUpdate) -> Result<Option<Pet>, DomainError>;

    /// Delete a Pet by ID
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
