//! Pet DTOs
//!
//! Wire shapes are camelCase to match the web client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use chronopal::Pet;

/// Pet snapshot returned by every pet endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PetResponse {
    pub id: Uuid,
    pub owner_id: String,
    pub name: String,
    pub species: String,
    /// happy, content, neutral, grumpy or angry
    #[schema(example = "happy")]
    pub mood: String,
    pub level: i32,
    /// 1 (sweet) to 5 (savage)
    #[schema(minimum = 1, maximum = 5)]
    pub sass_level: i32,
    #[schema(minimum = 0, maximum = 100)]
    pub battery_level: i32,
    pub interaction_count: i32,
    pub last_fed: DateTime<Utc>,
    pub last_interaction: DateTime<Utc>,
    pub memory_log: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Pet> for PetResponse {
    fn from(pet: Pet) -> Self {
        Self {
            id: pet.id,
            owner_id: pet.owner_id,
            name: pet.name,
            species: pet.species,
            mood: pet.mood.to_string(),
            level: pet.level,
            sass_level: pet.sass_level.value(),
            battery_level: pet.battery_level,
            interaction_count: pet.interaction_count,
            last_fed: pet.last_fed,
            last_interaction: pet.last_interaction,
            memory_log: pet.memory_log,
            created_at: pet.created_at,
            updated_at: pet.updated_at,
        }
    }
}

/// Create pet request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePetRequest {
    pub name: String,
    pub species: String,
}

/// Teach request
#[derive(Debug, Deserialize, ToSchema)]
pub struct TeachRequest {
    #[serde(alias = "message")]
    pub lesson: String,
}

/// Chat request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ChatRequest {
    pub message: String,
}

/// Chat response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatResponse {
    pub response: String,
}
