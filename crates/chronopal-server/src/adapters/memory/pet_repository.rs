//! In-memory implementation of PetRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use chronopal::{DomainError, Pet, PetRepository, PetUpdate};

/// HashMap-backed pet store
#[derive(Default)]
pub struct InMemoryPetRepository {
    pets: RwLock<HashMap<Uuid, Pet>>,
}

impl InMemoryPetRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, DomainError> {
        Ok(self.pets.read().await.get(&id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Pet>, DomainError> {
        let mut pets: Vec<Pet> = self
            .pets
            .read()
            .await
            .values()
            .filter(|pet| pet.owner_id == owner_id)
            .cloned()
            .collect();
        pets.sort_by_key(|pet| pet.created_at);
        Ok(pets)
    }

    async fn create(&self, pet: &Pet) -> Result<Pet, DomainError> {
        let mut pets = self.pets.write().await;
        if pets.contains_key(&pet.id) {
            return Err(DomainError::Conflict(format!("Pet {} already exists", pet.id)));
        }
        pets.insert(pet.id, pet.clone());
        Ok(pet.clone())
    }

    async fn update(&self, id: Uuid, update: &PetUpdate) -> Result<Option<Pet>, DomainError> {
        let mut pets = self.pets.write().await;
        Ok(pets.get_mut(&id).map(|pet| {
            update.apply_to(pet);
            pet.updated_at = Utc::now();
            pet.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.pets.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_find_by_owner_oldest_first() {
        let repo = InMemoryPetRepository::new();
        let now = Utc::now();
        let newer = Pet::hatch("owner", "Two", "dog", now);
        let older = Pet::hatch("owner", "One", "cat", now - Duration::hours(1));
        let other = Pet::hatch("someone-else", "Three", "fish", now);

        repo.create(&newer).await.unwrap();
        repo.create(&older).await.unwrap();
        repo.create(&other).await.unwrap();

        let pets = repo.find_by_owner("owner").await.unwrap();
        let names: Vec<&str> = pets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn test_update_appends_memories() {
        let repo = InMemoryPetRepository::new();
        let pet = Pet::hatch_default("owner", Utc::now());
        repo.create(&pet).await.unwrap();

        let mut changed = pet.clone();
        changed.battery_level = 60;
        changed.remember("a new memory");
        let update = PetUpdate::between(&pet, &changed).unwrap();

        let stored = repo.update(pet.id, &update).await.unwrap().unwrap();
        assert_eq!(stored.battery_level, 60);
        assert_eq!(stored.memory_log.len(), 2);
        assert_eq!(stored.memory_log[1], "a new memory");
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_pet() {
        let repo = InMemoryPetRepository::new();
        let pet = Pet::hatch_default("owner", Utc::now());
        let mut changed = pet.clone();
        changed.level = 2;
        let update = PetUpdate::between(&pet, &changed).unwrap();

        assert!(repo.update(pet.id, &update).await.unwrap().is_none());
        assert!(!repo.delete(pet.id).await.unwrap());
    }
}
