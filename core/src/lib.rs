//! desk-core: the logic behind the subscriber desk.
//!
//! Holds a roster snapshot in memory and serves filtered, paged,
//! selectable views of it with per-record engagement and churn badges.
//! Rendering and network transport live elsewhere.

pub mod analytics;
pub mod command;
pub mod config;
pub mod error;
pub mod filter;
pub mod metrics;
pub mod name_generator;
pub mod paginator;
pub mod rng;
pub mod roster;
pub mod scoring;
pub mod selection;
pub mod session;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod subscriber;
pub mod synthetic;
pub mod types;
