//! Clock Port
//!
//! Source of the current time for neglect and interaction timestamps.

use chrono::{DateTime, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
