//! Heuristic engagement and churn scorers.
//!
//! Band-based stand-ins for a trained model. Both are pure: they read
//! a subscriber and a reference instant and return a fresh score. They
//! never write back; a Roster's records stay as fetched.
//!
//! Rates here are unrounded, unlike metrics::open_rate.

use crate::{
    subscriber::{Subscriber, SubscriptionTier},
    types::Timestamp,
};

pub const MAX_ENGAGEMENT: u8 = 100;

fn raw_rate(part: u64, sent: u64) -> f64 {
    if sent == 0 {
        0.0
    } else {
        part as f64 / sent as f64 * 100.0
    }
}

fn days_since(then: Timestamp, now: Timestamp) -> i64 {
    (now - then).num_days()
}

/// 0..=100. Open rate worth up to 40, click rate 30, recency 20, tier 10.
/// Recency contributes nothing when the subscriber has never engaged.
pub fn score_engagement(s: &Subscriber, now: Timestamp) -> u8 {
    let open = raw_rate(s.total_emails_opened, s.total_emails_sent);
    let click = raw_rate(s.total_clicks, s.total_emails_sent);

    let open_points = match open {
        r if r > 50.0 => 40,
        r if r > 30.0 => 30,
        r if r > 15.0 => 20,
        _ => 10,
    };
    let click_points = match click {
        r if r > 10.0 => 30,
        r if r > 5.0 => 20,
        r if r > 2.0 => 15,
        _ => 5,
    };
    let recency_points = match s.last_engagement_at.map(|t| days_since(t, now)) {
        None => 0,
        Some(d) if d <= 7 => 20,
        Some(d) if d <= 30 => 15,
        Some(d) if d <= 90 => 10,
        Some(_) => 5,
    };
    let tier_points = match s.subscription_tier {
        SubscriptionTier::Enterprise => 10,
        SubscriptionTier::Premium => 8,
        SubscriptionTier::Basic => 5,
    };

    let total: u32 = open_points + click_points + recency_points + tier_points;
    total.min(MAX_ENGAGEMENT as u32) as u8
}

/// 0.0..=1.0. Adds up low engagement, staleness, and weak open/click rates.
pub fn score_churn_risk(s: &Subscriber, now: Timestamp) -> f64 {
    let mut risk = 0.0;

    if s.engagement_score < 20 {
        risk += 0.4;
    } else if s.engagement_score < 40 {
        risk += 0.2;
    }

    match s.last_engagement_at.map(|t| days_since(t, now)) {
        None => risk += 0.4,
        Some(d) if d > 90 => risk += 0.3,
        Some(d) if d > 30 => risk += 0.2,
        Some(_) => {}
    }

    if raw_rate(s.total_emails_opened, s.total_emails_sent) < 10.0 {
        risk += 0.2;
    }
    if raw_rate(s.total_clicks, s.total_emails_sent) < 1.0 {
        risk += 0.1;
    }

    f64::min(risk, 1.0)
}
