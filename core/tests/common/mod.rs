//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use desk_core::{
    roster::{Roster, RosterOrigin},
    subscriber::{RiskTolerance, Subscriber, SubscriptionStatus, SubscriptionTier},
    types::Timestamp,
};

/// Route log output through the test harness. Safe to call repeatedly.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn fixed_now() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn subscriber(id: i64, email: &str, first: &str, last: &str) -> Subscriber {
    Subscriber {
        id,
        email:               email.to_string(),
        first_name:          Some(first.to_string()),
        last_name:           Some(last.to_string()),
        subscription_status: SubscriptionStatus::Active,
        subscription_tier:   SubscriptionTier::Basic,
        engagement_score:    50,
        total_emails_sent:   100,
        total_emails_opened: 40,
        total_clicks:        10,
        risk_tolerance:      RiskTolerance::Moderate,
        churn_risk_score:    0.2,
        lifetime_value:      1_000.0,
        created_at:          Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        last_engagement_at:  None,
    }
}

/// `n` records with ids 1..=n and emails user{id}@example.com.
pub fn numbered(n: i64) -> Vec<Subscriber> {
    (1..=n)
        .map(|id| subscriber(id, &format!("user{id}@example.com"), "User", &format!("Number{id}")))
        .collect()
}

pub fn roster_of(records: Vec<Subscriber>) -> Roster {
    Roster::new(RosterOrigin::Fetched { source: "test".into() }, records)
}

/// The five-record roster used by the filtering scenarios.
pub fn mixed_roster() -> Vec<Subscriber> {
    let mut john = subscriber(1, "john.smith@example.com", "John", "Smith");
    john.subscription_tier = SubscriptionTier::Premium;

    let mut sarah = subscriber(2, "sarah.j@example.com", "Sarah", "Johnson");
    sarah.subscription_status = SubscriptionStatus::Paused;
    sarah.subscription_tier = SubscriptionTier::Enterprise;

    let mut mike = subscriber(3, "mike@example.com", "Mike", "Smithers");
    mike.subscription_status = SubscriptionStatus::Cancelled;
    mike.subscription_tier = SubscriptionTier::Premium;

    let emily = subscriber(4, "emily.davis@example.com", "Emily", "Davis");

    let mut anna = subscriber(5, "anna@SMITH-co.com", "Anna", "Lee");
    anna.subscription_tier = SubscriptionTier::Premium;

    vec![john, sarah, mike, emily, anna]
}
