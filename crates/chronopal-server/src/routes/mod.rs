//! ChronoPal API Routes
//!
//! - /chronopal/pet - The caller's pet (provisioning, creation, reset)
//! - /chronopal/pets/:id - Snapshot, deletion and interactions

pub mod error;
pub mod pet;
pub mod swagger;
