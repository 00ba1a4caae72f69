//! Shared primitive types used across the desk.

use chrono::{DateTime, Utc};

/// A stable, unique identifier for a subscriber.
pub type SubscriberId = i64;

/// Wall-clock instant. All timestamps in the desk are UTC.
pub type Timestamp = DateTime<Utc>;

/// The canonical session identifier.
pub type SessionId = String;
