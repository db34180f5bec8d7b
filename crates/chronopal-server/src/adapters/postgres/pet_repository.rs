//! PostgreSQL implementation of PetRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use chronopal::{DomainError, Mood, Pet, PetRepository, PetUpdate, SassLevel};

/// PostgreSQL implementation of PetRepository
pub struct PgPetRepository {
    pool: PgPool,
}

impl PgPetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx mapping
#[derive(sqlx::FromRow)]
struct PetRow {
    id: Uuid,
    owner_id: String,
    name: String,
    species: String,
    mood: String,
    level: i32,
    sass_level: i32,
    battery_level: i32,
    interaction_count: i32,
    last_fed: chrono::DateTime<chrono::Utc>,
    last_interaction: chrono::DateTime<chrono::Utc>,
    last_neglect_check: Option<chrono::DateTime<chrono::Utc>>,
    memory_log: Vec<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// Clamp a stored number into range, warning when it was out of bounds
fn clamp_field(pet_id: Uuid, field: &str, value: i32, min: i32, max: i32) -> i32 {
    let clamped = value.clamp(min, max);
    if clamped != value {
        tracing::warn!(
            pet_id = %pet_id,
            field,
            stored = value,
            clamped,
            "Stored pet field out of range"
        );
    }
    clamped
}

impl TryFrom<PetRow> for Pet {
    type Error = DomainError;

    fn try_from(row: PetRow) -> Result<Self, Self::Error> {
        let mood: Mood = row.mood.parse().map_err(|_| {
            DomainError::Storage(format!("Pet {} has unknown mood '{}'", row.id, row.mood))
        })?;

        let sass = clamp_field(
            row.id,
            "sass_level",
            row.sass_level,
            SassLevel::MIN,
            SassLevel::MAX,
        );

        Ok(Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            species: row.species,
            mood,
            level: clamp_field(row.id, "level", row.level, 1, i32::MAX),
            sass_level: SassLevel::saturating_from(sass),
            battery_level: clamp_field(
                row.id,
                "battery_level",
                row.battery_level,
                0,
                chronopal::domain::MAX_BATTERY,
            ),
            interaction_count: clamp_field(
                row.id,
                "interaction_count",
                row.interaction_count,
                0,
                i32::MAX,
            ),
            last_fed: row.last_fed,
            last_interaction: row.last_interaction,
            last_neglect_check: row.last_neglect_check,
            memory_log: row.memory_log,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl PetRepository for PgPetRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, DomainError> {
        let row = sqlx::query_as::<_, PetRow>("SELECT * FROM pets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        row.map(Pet::try_from).transpose()
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Pet>, DomainError> {
        let rows = sqlx::query_as::<_, PetRow>(
            "SELECT * FROM pets WHERE owner_id = $1 ORDER BY created_at ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        rows.into_iter().map(Pet::try_from).collect()
    }

    async fn create(&self, pet: &Pet) -> Result<Pet, DomainError> {
        let row = sqlx::query_as::<_, PetRow>(
            r#"
            INSERT INTO pets (
                id, owner_id, name, species, mood, level, sass_level, battery_level,
                interaction_count, last_fed, last_interaction, last_neglect_check,
                memory_log, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING *
            "#,
        )
        .bind(pet.id)
        .bind(&pet.owner_id)
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(pet.mood.as_str())
        .bind(pet.level)
        .bind(pet.sass_level.value())
        .bind(pet.battery_level)
        .bind(pet.interaction_count)
        .bind(pet.last_fed)
        .bind(pet.last_interaction)
        .bind(pet.last_neglect_check)
        .bind(&pet.memory_log)
        .bind(pet.created_at)
        .bind(pet.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        tracing::info!("Created pet: {} ({})", pet.name, pet.id);

        Pet::try_from(row)
    }

    async fn update(&self, id: Uuid, update: &PetUpdate) -> Result<Option<Pet>, DomainError> {
        // Memory entries are concatenated in SQL so concurrent appends are not lost
        let row = sqlx::query_as::<_, PetRow>(
            r#"
            UPDATE pets
            SET mood = $2, level = $3, sass_level = $4, battery_level = $5,
                interaction_count = $6, last_fed = $7, last_interaction = $8,
                last_neglect_check = $9, memory_log = memory_log || $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.mood.as_str())
        .bind(update.level)
        .bind(update.sass_level.value())
        .bind(update.battery_level)
        .bind(update.interaction_count)
        .bind(update.last_fed)
        .bind(update.last_interaction)
        .bind(update.last_neglect_check)
        .bind(&update.append_memories)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::Storage(e.to_string()))?;

        row.map(Pet::try_from).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Storage(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
