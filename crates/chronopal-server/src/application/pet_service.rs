//! Pet Application Service (Use Case)
//!
//! Loads a pet, runs the lifecycle rules against it and writes back only
//! what changed. Neglect is reconciled lazily on every access.

use std::sync::Arc;

use uuid::Uuid;

use chronopal::domain::services::lifecycle::require_text;
use chronopal::domain::services::phrasebook;
use chronopal::{
    Clock, DomainError, Outcome, Pet, PetLifecycle, PetRepository, PetUpdate, TextResponder,
};

/// Application service for Pet operations
pub struct PetService {
    repo: Arc<dyn PetRepository>,
    responder: Arc<dyn TextResponder>,
    clock: Arc<dyn Clock>,
    lifecycle: PetLifecycle,
}

impl PetService {
    pub fn new(
        repo: Arc<dyn PetRepository>,
        responder: Arc<dyn TextResponder>,
        clock: Arc<dyn Clock>,
        lifecycle: PetLifecycle,
    ) -> Self {
        Self {
            repo,
            responder,
            clock,
            lifecycle,
        }
    }

    async fn load(&self, pet_id: Uuid) -> Result<Pet, DomainError> {
        self.repo
            .find_by_id(pet_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Pet", pet_id))
    }

    /// Write back the difference between `before` and `after`
    async fn persist(&self, before: &Pet, after: Pet) -> Result<Pet, DomainError> {
        let Some(update) = PetUpdate::between(before, &after) else {
            return Ok(after);
        };

        self.repo
            .update(after.id, &update)
            .await?
            .ok_or_else(|| DomainError::not_found("Pet", after.id))
    }

    /// Apply neglect up to now and persist it
    async fn reconcile(&self, pet: Pet) -> Result<Pet, DomainError> {
        let mut current = pet.clone();
        self.lifecycle.evaluate_neglect(&mut current, self.clock.now());
        self.persist(&pet, current).await
    }

    /// Load a pet with neglect applied up to now
    pub async fn get_snapshot(&self, pet_id: Uuid) -> Result<Pet, DomainError> {
        let pet = self.load(pet_id).await?;
        self.reconcile(pet).await
    }

    /// The owner's pet, reconciled. `NotFound` when the owner has none.
    pub async fn get_for_owner(&self, owner_id: &str) -> Result<Pet, DomainError> {
        let pet = self
            .repo
            .find_by_owner(owner_id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found_str("Pet for owner", owner_id))?;

        self.reconcile(pet).await
    }

    /// The owner's pet, hatching a default one on first visit
    pub async fn get_or_create_for_owner(&self, owner_id: &str) -> Result<Pet, DomainError> {
        match self.get_for_owner(owner_id).await {
            Err(DomainError::NotFound { .. }) => {
                let pet = Pet::hatch_default(owner_id, self.clock.now());
                let created = self.repo.create(&pet).await?;
                tracing::info!(pet_id = %created.id, owner_id, "Hatched default pet");
                Ok(created)
            }
            other => other,
        }
    }

    /// Hatch a named pet. Each owner keeps a single pet.
    pub async fn create_pet(
        &self,
        owner_id: &str,
        name: &str,
        species: &str,
    ) -> Result<Pet, DomainError> {
        let owner_id = require_text("owner_id", owner_id)?;
        let name = require_text("name", name)?;
        let species = require_text("species", species)?;

        if !self.repo.find_by_owner(owner_id).await?.is_empty() {
            return Err(DomainError::Conflict(format!(
                "Owner {} already has a pet",
                owner_id
            )));
        }

        let pet = Pet::hatch(owner_id, name, species, self.clock.now());
        let created = self.repo.create(&pet).await?;
        tracing::info!(pet_id = %created.id, owner_id, "Hatched pet {}", created.name);
        Ok(created)
    }

    pub async fn delete_pet(&self, pet_id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(pet_id).await? {
            return Err(DomainError::not_found("Pet", pet_id));
        }
        tracing::info!(pet_id = %pet_id, "Deleted pet");
        Ok(())
    }

    pub async fn feed(&self, pet_id: Uuid) -> Result<Pet, DomainError> {
        let pet = self.load(pet_id).await?;
        let mut next = pet.clone();
        if self.lifecycle.feed(&mut next, self.clock.now()) == Outcome::Applied {
            tracing::info!(pet_id = %pet_id, battery = next.battery_level, "Pet fed");
        }
        self.persist(&pet, next).await
    }

    pub async fn play(&self, pet_id: Uuid) -> Result<Pet, DomainError> {
        let pet = self.load(pet_id).await?;
        let mut next = pet.clone();
        if self.lifecycle.play(&mut next, self.clock.now()) == Outcome::Applied {
            tracing::info!(pet_id = %pet_id, battery = next.battery_level, "Played with pet");
        }
        self.persist(&pet, next).await
    }

    pub async fn teach(&self, pet_id: Uuid, lesson: &str) -> Result<Pet, DomainError> {
        let lesson = require_text("lesson", lesson)?;
        let pet = self.load(pet_id).await?;
        let mut next = pet.clone();
        if self.lifecycle.teach(&mut next, lesson, self.clock.now())? == Outcome::Applied {
            tracing::info!(pet_id = %pet_id, level = next.level, "Pet learned something");
        }
        self.persist(&pet, next).await
    }

    /// Chat with the pet and return its reply
    pub async fn chat(&self, pet_id: Uuid, message: &str) -> Result<String, DomainError> {
        let message = require_text("message", message)?;
        let pet = self.load(pet_id).await?;
        let now = self.clock.now();

        let mut next = pet.clone();
        if !self.lifecycle.prepare(&mut next, now) {
            let reply = phrasebook::depleted_reply(&next.context());
            self.persist(&pet, next).await?;
            return Ok(reply);
        }

        let reply = self.responder.generate_reply(message, &next.context()).await;
        match self.lifecycle.chat(&mut next, message, &reply, now)? {
            Outcome::Applied => {
                tracing::info!(pet_id = %pet_id, battery = next.battery_level, "Chatted with pet")
            }
            Outcome::Depleted => {
                tracing::warn!(pet_id = %pet_id, "Pet depleted while replying, exchange dropped")
            }
        }
        self.persist(&pet, next).await?;

        Ok(reply)
    }

    /// Replace the owner's drained pet with a freshly hatched one
    pub async fn reset_depleted_pet(&self, owner_id: &str) -> Result<Pet, DomainError> {
        let current = self.get_for_owner(owner_id).await?;
        let fresh = self.lifecycle.reincarnate(&current, self.clock.now())?;

        // Hatch before removing the old record so a failed write never leaves
        // the owner without a pet
        let created = self.repo.create(&fresh).await?;
        if let Err(e) = self.repo.delete(current.id).await {
            if let Err(rollback) = self.repo.delete(created.id).await {
                tracing::error!(
                    pet_id = %created.id,
                    "Failed to roll back reset: {}",
                    rollback
                );
            }
            return Err(e);
        }

        tracing::info!(
            old_pet_id = %current.id,
            pet_id = %created.id,
            owner_id,
            "Pet reset"
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryPetRepository;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use chronopal::{Mood, PetContext, SassLevel};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FixedClock(Mutex<DateTime<Utc>>);

    impl FixedClock {
        fn at(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    /// Responder that echoes and counts calls
    #[derive(Default)]
    struct EchoResponder {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextResponder for EchoResponder {
        async fn generate_reply(&self, message: &str, ctx: &PetContext) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            format!("{} heard '{}' while {}", ctx.name, message, ctx.mood)
        }
    }

    /// In-memory store whose writes can be made to fail
    #[derive(Default)]
    struct FlakyRepository {
        inner: InMemoryPetRepository,
        fail_create: AtomicBool,
        fail_delete: AtomicBool,
    }

    #[async_trait]
    impl PetRepository for FlakyRepository {
        async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, DomainError> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Pet>, DomainError> {
            self.inner.find_by_owner(owner_id).await
        }

        async fn create(&self, pet: &Pet) -> Result<Pet, DomainError> {
            if self.fail_create.load(Ordering::SeqCst) {
                return Err(DomainError::Storage("connection reset".to_string()));
            }
            self.inner.create(pet).await
        }

        async fn update(&self, id: Uuid, update: &PetUpdate) -> Result<Option<Pet>, DomainError> {
            self.inner.update(id, update).await
        }

        async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
            if self.fail_delete.swap(false, Ordering::SeqCst) {
                return Err(DomainError::Storage("connection reset".to_string()));
            }
            self.inner.delete(id).await
        }
    }

    struct Harness {
        service: PetService,
        repo: Arc<InMemoryPetRepository>,
        clock: Arc<FixedClock>,
        responder: Arc<EchoResponder>,
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn harness() -> Harness {
        let repo = Arc::new(InMemoryPetRepository::new());
        let clock = Arc::new(FixedClock::at(start()));
        let responder = Arc::new(EchoResponder::default());
        let service = PetService::new(
            repo.clone(),
            responder.clone(),
            clock.clone(),
            PetLifecycle::default(),
        );
        Harness {
            service,
            repo,
            clock,
            responder,
        }
    }

    impl Harness {
        async fn pet(&self) -> Pet {
            self.service.create_pet("owner", "Bit", "cat").await.unwrap()
        }

        async fn stored(&self, id: Uuid) -> Pet {
            self.repo.find_by_id(id).await.unwrap().unwrap()
        }

        async fn set_battery(&self, pet: &Pet, battery_level: i32) {
            let mut drained = pet.clone();
            drained.battery_level = battery_level;
            let update = PetUpdate::between(pet, &drained).unwrap();
            self.repo.update(pet.id, &update).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_feed_persists_changes() {
        let h = harness();
        let pet = h.pet().await;
        h.set_battery(&pet, 50).await;
        h.clock.advance(Duration::hours(1));

        let fed = h.service.feed(pet.id).await.unwrap();
        assert_eq!(fed.battery_level, 60);
        assert_eq!(fed.mood, Mood::Happy);
        assert_eq!(fed.interaction_count, 1);
        assert_eq!(fed.last_fed, start() + Duration::hours(1));
        assert_eq!(
            fed.memory_log.last().map(String::as_str),
            Some("I was fed and it was delicious!")
        );

        let stored = h.stored(pet.id).await;
        assert_eq!(stored.battery_level, 60);
        assert_eq!(stored.memory_log.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_reconciles_neglect_once() {
        let h = harness();
        let pet = h.pet().await;
        h.clock.advance(Duration::hours(30));

        let first = h.service.get_snapshot(pet.id).await.unwrap();
        assert_eq!(first.mood, Mood::Grumpy);
        assert_eq!(first.battery_level, 70);
        assert_eq!(first.sass_level, SassLevel::Playful);

        let second = h.service.get_snapshot(pet.id).await.unwrap();
        assert_eq!(second.battery_level, 70);
        assert_eq!(second.memory_log.len(), first.memory_log.len());
        assert_eq!(h.stored(pet.id).await.battery_level, 70);
    }

    #[tokio::test]
    async fn test_missing_pet_is_not_found() {
        let h = harness();
        let err = h.service.feed(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let err = h.service.delete_pet(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_blank_text_rejected_before_loading() {
        let h = harness();
        let missing = Uuid::new_v4();

        let err = h.service.teach(missing, "   ").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));

        let err = h.service.chat(missing, "").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_teach_raises_level() {
        let h = harness();
        let pet = h.pet().await;

        let taught = h.service.teach(pet.id, "  dial-up tones ").await.unwrap();
        assert_eq!(taught.level, 2);
        assert_eq!(
            taught.memory_log.last().map(String::as_str),
            Some("I learned about dial-up tones")
        );
    }

    #[tokio::test]
    async fn test_chat_records_exchange() {
        let h = harness();
        let pet = h.pet().await;

        let reply = h.service.chat(pet.id, "hi there").await.unwrap();
        assert_eq!(reply, "Bit heard 'hi there' while happy");

        let stored = h.stored(pet.id).await;
        assert_eq!(stored.battery_level, 97);
        assert_eq!(stored.interaction_count, 1);
        assert_eq!(
            stored.memory_log.last().map(String::as_str),
            Some("User said: 'hi there', I replied: 'Bit heard 'hi there' while happy'")
        );
    }

    #[tokio::test]
    async fn test_chat_sees_reconciled_mood() {
        let h = harness();
        let pet = h.pet().await;
        h.clock.advance(Duration::hours(26));

        let reply = h.service.chat(pet.id, "sorry").await.unwrap();
        assert!(reply.ends_with("while grumpy"));
    }

    #[tokio::test]
    async fn test_depleted_pet_is_frozen() {
        let h = harness();
        let pet = h.pet().await;
        h.set_battery(&pet, 0).await;
        let before = h.stored(pet.id).await;

        let fed = h.service.feed(pet.id).await.unwrap();
        assert_eq!(fed, before);

        let reply = h.service.chat(pet.id, "wake up").await.unwrap();
        assert!(reply.contains("out of battery"));
        assert_eq!(h.responder.calls.load(Ordering::SeqCst), 0);
        assert_eq!(h.stored(pet.id).await, before);
    }

    #[tokio::test]
    async fn test_neglect_can_drain_before_chat() {
        let h = harness();
        let pet = h.pet().await;
        h.set_battery(&pet, 20).await;
        h.clock.advance(Duration::hours(48));

        let reply = h.service.chat(pet.id, "hello?").await.unwrap();
        assert!(reply.contains("out of battery"));
        assert_eq!(h.responder.calls.load(Ordering::SeqCst), 0);

        let stored = h.stored(pet.id).await;
        assert_eq!(stored.battery_level, 0);
        assert_eq!(
            stored.memory_log.last().map(String::as_str),
            Some("Pet was neglected for 48 hours")
        );
    }

    #[tokio::test]
    async fn test_sass_milestone_after_ten_interactions() {
        let h = harness();
        let pet = h.pet().await;

        let mut last = pet.clone();
        for _ in 0..10 {
            last = h.service.play(pet.id).await.unwrap();
        }
        assert_eq!(last.interaction_count, 10);
        assert_eq!(last.sass_level, SassLevel::Playful);
    }

    #[tokio::test]
    async fn test_owner_has_single_pet() {
        let h = harness();
        h.pet().await;

        let err = h
            .service
            .create_pet("owner", "Other", "dog")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = h.service.create_pet("owner-2", " ", "dog").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_get_or_create_provisions_once() {
        let h = harness();

        let first = h.service.get_or_create_for_owner("newcomer").await.unwrap();
        assert_eq!(first.name, "ChronoPal");
        assert_eq!(first.species, "Digital");

        let second = h.service.get_or_create_for_owner("newcomer").await.unwrap();
        assert_eq!(second.id, first.id);
        assert_eq!(h.repo.find_by_owner("newcomer").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reset_requires_low_battery() {
        let h = harness();
        let pet = h.pet().await;

        let err = h.service.reset_depleted_pet("owner").await.unwrap_err();
        assert!(matches!(err, DomainError::PreconditionFailed(_)));

        let err = h.service.reset_depleted_pet("nobody").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        h.set_battery(&pet, 10).await;
        let fresh = h.service.reset_depleted_pet("owner").await.unwrap();
        assert_ne!(fresh.id, pet.id);
        assert_eq!(fresh.name, "Bit");
        assert_eq!(fresh.species, "cat");
        assert_eq!(fresh.battery_level, 100);
        assert_eq!(fresh.level, 1);
        assert_eq!(fresh.memory_log, vec!["I just hatched! Nice to meet you.".to_string()]);

        assert!(h.repo.find_by_id(pet.id).await.unwrap().is_none());
        let owned = h.repo.find_by_owner("owner").await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, fresh.id);
    }

    #[tokio::test]
    async fn test_failed_reset_keeps_old_pet() {
        let repo = Arc::new(FlakyRepository::default());
        let service = PetService::new(
            repo.clone(),
            Arc::new(EchoResponder::default()),
            Arc::new(FixedClock::at(start())),
            PetLifecycle::default(),
        );
        let pet = service.create_pet("owner", "Bit", "cat").await.unwrap();
        let mut drained = pet.clone();
        drained.battery_level = 5;
        let update = PetUpdate::between(&pet, &drained).unwrap();
        repo.update(pet.id, &update).await.unwrap();

        repo.fail_create.store(true, Ordering::SeqCst);
        let err = service.reset_depleted_pet("owner").await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(service.get_for_owner("owner").await.unwrap().id, pet.id);

        repo.fail_create.store(false, Ordering::SeqCst);
        repo.fail_delete.store(true, Ordering::SeqCst);
        let err = service.reset_depleted_pet("owner").await.unwrap_err();
        assert!(err.is_retryable());
        let owned = repo.find_by_owner("owner").await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, pet.id);

        let fresh = service.reset_depleted_pet("owner").await.unwrap();
        assert_ne!(fresh.id, pet.id);
        let owned = repo.find_by_owner("owner").await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].id, fresh.id);
    }
}
