//! Roster-wide aggregates for the subscriber analytics panel.
//!
//! Unlike the filter engine these helpers may sort; they answer
//! "who is most engaged / most at risk", not "what does the table show".

use crate::{
    metrics::{engagement_tier, round_to_tenth, EngagementTier, HIGH_CHURN_RISK_MIN},
    subscriber::{RiskTolerance, Subscriber, SubscriptionStatus, SubscriptionTier},
};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub active:    usize,
    pub paused:    usize,
    pub cancelled: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCounts {
    pub basic:      usize,
    pub premium:    usize,
    pub enterprise: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementCounts {
    pub high:   usize,
    pub medium: usize,
    pub low:    usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskToleranceCounts {
    pub conservative: usize,
    pub moderate:     usize,
    pub aggressive:   usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterAnalytics {
    pub total_subscribers:   usize,
    pub status:              StatusCounts,
    pub tiers:               TierCounts,
    pub engagement:          EngagementCounts,
    pub risk_tolerance:      RiskToleranceCounts,
    /// Churn risk at or above the High Risk threshold.
    pub at_risk_subscribers: usize,
    pub avg_engagement:      f64,
    pub open_rate:           f64,
    pub click_rate:          f64,
    pub total_lifetime_value: f64,
}

impl RosterAnalytics {
    pub fn compute<'a>(roster: impl IntoIterator<Item = &'a Subscriber>) -> Self {
        let mut out = Self::default();
        let mut engagement_sum: u64 = 0;
        let (mut sent, mut opened, mut clicks) = (0u64, 0u64, 0u64);

        for s in roster {
            out.total_subscribers += 1;
            match s.subscription_status {
                SubscriptionStatus::Active    => out.status.active += 1,
                SubscriptionStatus::Paused    => out.status.paused += 1,
                SubscriptionStatus::Cancelled => out.status.cancelled += 1,
            }
            match s.subscription_tier {
                SubscriptionTier::Basic      => out.tiers.basic += 1,
                SubscriptionTier::Premium    => out.tiers.premium += 1,
                SubscriptionTier::Enterprise => out.tiers.enterprise += 1,
            }
            match engagement_tier(s.engagement_score) {
                EngagementTier::High   => out.engagement.high += 1,
                EngagementTier::Medium => out.engagement.medium += 1,
                EngagementTier::Low    => out.engagement.low += 1,
            }
            match s.risk_tolerance {
                RiskTolerance::Conservative => out.risk_tolerance.conservative += 1,
                RiskTolerance::Moderate     => out.risk_tolerance.moderate += 1,
                RiskTolerance::Aggressive   => out.risk_tolerance.aggressive += 1,
            }
            if s.churn_risk_score >= HIGH_CHURN_RISK_MIN {
                out.at_risk_subscribers += 1;
            }
            engagement_sum += s.engagement_score as u64;
            // counters are unbounded; saturate instead of wrapping
            sent = sent.saturating_add(s.total_emails_sent);
            opened = opened.saturating_add(s.total_emails_opened);
            clicks = clicks.saturating_add(s.total_clicks);
            out.total_lifetime_value += s.lifetime_value;
        }

        if out.total_subscribers > 0 {
            out.avg_engagement =
                round_to_tenth(engagement_sum as f64 / out.total_subscribers as f64);
        }
        out.open_rate = crate::metrics::open_rate(sent, opened);
        out.click_rate = crate::metrics::click_rate(sent, clicks);
        out
    }
}

/// Up to `limit` subscribers, highest engagement first. Ties keep roster order.
pub fn top_engaged(roster: &[Subscriber], limit: usize) -> Vec<&Subscriber> {
    let mut ranked: Vec<&Subscriber> = roster.iter().collect();
    ranked.sort_by(|a, b| b.engagement_score.cmp(&a.engagement_score));
    ranked.truncate(limit);
    ranked
}

/// Up to `limit` subscribers with churn risk >= `threshold`, riskiest first.
pub fn at_risk(roster: &[Subscriber], threshold: f64, limit: usize) -> Vec<&Subscriber> {
    let mut ranked: Vec<&Subscriber> = roster
        .iter()
        .filter(|s| s.churn_risk_score >= threshold)
        .collect();
    ranked.sort_by(|a, b| {
        b.churn_risk_score
            .partial_cmp(&a.churn_risk_score)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

/// Case-insensitive email substring match, roster order.
pub fn search_by_email<'a>(roster: &'a [Subscriber], pattern: &str) -> Vec<&'a Subscriber> {
    let needle = pattern.to_lowercase();
    roster
        .iter()
        .filter(|s| s.email.to_lowercase().contains(&needle))
        .collect()
}
