//! Synthetic fallback roster.
//!
//! Used only when the roster source fails, to keep the desk usable.
//! Never persisted, never reconciled. Same (seed, size, now) gives the
//! same roster, field for field.

use crate::{
    name_generator::NameGenerator,
    rng::{DeskRng, RngStream},
    roster::{Roster, RosterOrigin},
    subscriber::{RiskTolerance, Subscriber, SubscriptionStatus, SubscriptionTier},
    types::{SubscriberId, Timestamp},
};
use chrono::Duration;

pub const FALLBACK_ROSTER_SIZE: usize = 20;

const FALLBACK_STATUSES: &[SubscriptionStatus] =
    &[SubscriptionStatus::Active, SubscriptionStatus::Paused];

/// `size` records with ids 1..=size, created within the year before `now`.
pub fn synthetic_subscribers(size: usize, seed: u64, now: Timestamp) -> Vec<Subscriber> {
    let mut rng = DeskRng::new(seed, RngStream::Roster);
    let mut names = DeskRng::new(seed, RngStream::Names);
    let mut out = Vec::with_capacity(size);
    log::debug!("synthetic: {size} records from streams {}/{} (seed={seed})", rng.stream.name(), names.stream.name());

    for i in 0..size {
        let (first, last) = NameGenerator::name_for_slot(i, &mut names);
        let status = rng.pick(FALLBACK_STATUSES).copied().unwrap_or_default();
        let tier = rng.pick(SubscriptionTier::ALL).copied().unwrap_or_default();
        let risk_tolerance = rng.pick(RiskTolerance::ALL).copied().unwrap_or_default();
        let age_secs = (rng.next_f64() * 365.0 * 86_400.0) as i64;

        out.push(Subscriber {
            id:                  (i + 1) as SubscriberId,
            email:               NameGenerator::email_for(first, last, i),
            first_name:          Some(first.to_string()),
            last_name:           Some(last.to_string()),
            subscription_status: status,
            subscription_tier:   tier,
            engagement_score:    rng.int_between(20, 99) as u8,
            total_emails_sent:   rng.int_between(50, 499),
            total_emails_opened: rng.int_between(10, 359),
            total_clicks:        rng.int_between(5, 154),
            risk_tolerance,
            churn_risk_score:    rng.uniform(0.1, 0.9),
            lifetime_value:      rng.int_between(5_000, 49_999) as f64,
            created_at:          now - Duration::seconds(age_secs),
            last_engagement_at:  None,
        });
    }
    out
}

/// The fallback roster, tagged with its seed.
pub fn fallback_roster(size: usize, seed: u64, now: Timestamp) -> Roster {
    Roster::new(RosterOrigin::Fallback { seed }, synthetic_subscribers(size, seed, now))
}
