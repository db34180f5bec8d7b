//! Pet Lifecycle - State evolution rules
//!
//! Pure functions over a `Pet` snapshot: neglect decay, interaction
//! effects, sass progression and battery management. Persistence and
//! text generation happen in the caller; nothing here performs I/O.

use chrono::{DateTime, Utc};

use crate::domain::entities::Pet;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Interaction, Mood, SassLevel};

pub const FED_MEMORY: &str = "I was fed and it was delicious!";
pub const PLAYED_MEMORY: &str = "We played together and it was fun!";

/// Tunable thresholds for the lifecycle rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Hours without attention before neglect kicks in
    pub neglect_threshold_hours: i64,
    /// Periods at or beyond which neglect raises sass by two tiers
    pub heavy_neglect_periods: i64,
    pub feed_battery_gain: i32,
    pub play_battery_gain: i32,
    pub teach_battery_gain: i32,
    pub chat_battery_cost: i32,
    /// Highest battery level at which a pet may be reset
    pub reset_battery_threshold: i32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            neglect_threshold_hours: 24,
            heavy_neglect_periods: 3,
            feed_battery_gain: 10,
            play_battery_gain: 5,
            teach_battery_gain: 7,
            chat_battery_cost: 3,
            reset_battery_threshold: 10,
        }
    }
}

/// What a neglect evaluation charged the pet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeglectReport {
    /// Whole hours since the neglect anchor
    pub hours: i64,
    /// Whole threshold periods within `hours`
    pub periods: i64,
}

/// Result of applying an interaction
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The interaction changed the pet
    Applied,
    /// The pet is depleted; nothing but neglect reconciliation happened
    Depleted,
}

/// Rule engine for pet state transitions
#[derive(Debug, Clone, Default)]
pub struct PetLifecycle {
    config: LifecycleConfig,
}

impl PetLifecycle {
    pub fn new(config: Option<LifecycleConfig>) -> Self {
        Self {
            config: config.unwrap_or_default(),
        }
    }

    pub fn config(&self) -> &LifecycleConfig {
        &self.config
    }

    /// Charge the pet for time spent without attention.
    ///
    /// Elapsed time is measured from [`Pet::neglect_anchor`], and the anchor
    /// moves to `now` whenever decay is charged, so calling this twice with
    /// the same `now` changes nothing the second time. Depleted pets are frozen.
    pub fn evaluate_neglect(&self, pet: &mut Pet, now: DateTime<Utc>) -> Option<NeglectReport> {
        if pet.is_depleted() {
            return None;
        }

        let threshold = self.config.neglect_threshold_hours.max(1);
        let hours = (now - pet.neglect_anchor()).num_hours();
        if hours < threshold {
            return None;
        }

        let periods = hours / threshold;
        let sass_steps = if periods >= self.config.heavy_neglect_periods {
            2
        } else {
            1
        };

        pet.mood = pet.mood.worst(Mood::for_neglect(periods));
        pet.adjust_battery(-saturating_i32(hours));
        pet.sass_level = pet.sass_level.raised_by(sass_steps);
        pet.level = pet.level.saturating_sub(saturating_i32(periods)).max(1);
        pet.remember(format!("Pet was neglected for {} hours", hours));
        pet.last_neglect_check = Some(now);

        tracing::info!(
            pet_id = %pet.id,
            hours,
            periods,
            mood = %pet.mood,
            sass = %pet.sass_level,
            battery = pet.battery_level,
            "Neglect charged"
        );

        Some(NeglectReport { hours, periods })
    }

    /// Reconcile neglect and report whether the pet can still interact
    pub fn prepare(&self, pet: &mut Pet, now: DateTime<Utc>) -> bool {
        if pet.is_depleted() {
            return false;
        }
        self.evaluate_neglect(pet, now);
        !pet.is_depleted()
    }

    pub fn feed(&self, pet: &mut Pet, now: DateTime<Utc>) -> Outcome {
        if !self.prepare(pet, now) {
            return Outcome::Depleted;
        }

        pet.last_fed = now;
        pet.last_interaction = now;
        pet.mood = Mood::Happy;
        pet.adjust_battery(self.config.feed_battery_gain);
        pet.remember(FED_MEMORY);
        self.record_interaction(pet, Interaction::Feed, now);

        Outcome::Applied
    }

    pub fn play(&self, pet: &mut Pet, now: DateTime<Utc>) -> Outcome {
        if !self.prepare(pet, now) {
            return Outcome::Depleted;
        }

        pet.last_interaction = now;
        pet.mood = Mood::Happy;
        pet.adjust_battery(self.config.play_battery_gain);
        pet.remember(PLAYED_MEMORY);
        self.record_interaction(pet, Interaction::Play, now);

        Outcome::Applied
    }

    /// Teach a lesson. Blank lessons are rejected before anything changes.
    pub fn teach(
        &self,
        pet: &mut Pet,
        lesson: &str,
        now: DateTime<Utc>,
    ) -> Result<Outcome, DomainError> {
        let lesson = require_text("lesson", lesson)?;
        if !self.prepare(pet, now) {
            return Ok(Outcome::Depleted);
        }

        pet.last_interaction = now;
        pet.level = pet.level.saturating_add(1);
        pet.adjust_battery(self.config.teach_battery_gain);
        pet.remember(format!("I learned about {}", lesson));
        self.record_interaction(pet, Interaction::Teach, now);

        Ok(Outcome::Applied)
    }

    /// Record a chat exchange. The reply is produced by the caller.
    pub fn chat(
        &self,
        pet: &mut Pet,
        message: &str,
        reply: &str,
        now: DateTime<Utc>,
    ) -> Result<Outcome, DomainError> {
        let message = require_text("message", message)?;
        if !self.prepare(pet, now) {
            return Ok(Outcome::Depleted);
        }

        pet.adjust_battery(-self.config.chat_battery_cost);
        pet.remember(format!(
            "User said: '{}', I replied: '{}'",
            message,
            reply.trim()
        ));
        self.record_interaction(pet, Interaction::Chat, now);

        Ok(Outcome::Applied)
    }

    /// Bookkeeping shared by every interaction
    pub fn record_interaction(&self, pet: &mut Pet, kind: Interaction, now: DateTime<Utc>) {
        self.evaluate_neglect(pet, now);

        pet.interaction_count = pet.interaction_count.saturating_add(1);
        pet.sass_level = pet
            .sass_level
            .max(SassLevel::milestone(pet.interaction_count));
        pet.last_interaction = now;

        tracing::debug!(
            pet_id = %pet.id,
            interaction = %kind,
            count = pet.interaction_count,
            sass = %pet.sass_level,
            "Interaction recorded"
        );
    }

    /// Whether the pet is drained enough to be reset
    pub fn can_reset(&self, pet: &Pet) -> bool {
        pet.battery_level <= self.config.reset_battery_threshold
    }

    /// Fresh pet that replaces `previous`, keeping its owner, name and species
    pub fn reincarnate(&self, previous: &Pet, now: DateTime<Utc>) -> Result<Pet, DomainError> {
        if !self.can_reset(previous) {
            return Err(DomainError::PreconditionFailed(format!(
                "Battery level {} is above the reset threshold of {}",
                previous.battery_level, self.config.reset_battery_threshold
            )));
        }

        Ok(Pet::hatch(
            previous.owner_id.clone(),
            previous.name.clone(),
            previous.species.clone(),
            now,
        ))
    }
}

/// Trimmed, non-empty text or `InvalidArgument`
pub fn require_text<'a>(field: &str, value: &'a str) -> Result<&'a str, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidArgument(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(trimmed)
}

fn saturating_i32(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
