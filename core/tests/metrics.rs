mod common;

use common::subscriber;
use desk_core::metrics::{
    churn_risk_tier, click_rate, engagement_tier, open_rate, BadgeTone, ChurnRiskTier,
    EngagementTier, RecordMetrics,
};

/// Engagement bands are inclusive on their lower bound.
#[test]
fn engagement_tier_boundaries() {
    assert_eq!(engagement_tier(70), EngagementTier::High);
    assert_eq!(engagement_tier(69), EngagementTier::Medium);
    assert_eq!(engagement_tier(40), EngagementTier::Medium);
    assert_eq!(engagement_tier(39), EngagementTier::Low);
    assert_eq!(engagement_tier(0), EngagementTier::Low);
}

/// Churn bands are inclusive on their lower bound.
#[test]
fn churn_tier_boundaries() {
    assert_eq!(churn_risk_tier(0.7), ChurnRiskTier::High);
    assert_eq!(churn_risk_tier(0.69), ChurnRiskTier::Medium);
    assert_eq!(churn_risk_tier(0.4), ChurnRiskTier::Medium);
    assert_eq!(churn_risk_tier(0.39), ChurnRiskTier::Low);
    assert_eq!(churn_risk_tier(1.0).label(), "High Risk");
}

/// No emails sent means 0% for both rates, never NaN.
#[test]
fn zero_sent_gives_zero_rates() {
    assert_eq!(open_rate(0, 0), 0.0);
    assert_eq!(click_rate(0, 0), 0.0);
    assert_eq!(open_rate(0, 5), 0.0);
}

/// Rates are rounded to one decimal and not clamped.
#[test]
fn rates_round_to_one_decimal() {
    assert_eq!(open_rate(156, 124), 79.5);
    assert_eq!(click_rate(156, 67), 42.9);
    assert_eq!(open_rate(10, 12), 120.0);
}

/// A row's metrics bundle tiers, tones, rates and churn probability.
#[test]
fn record_metrics_for_subscriber() {
    let mut s = subscriber(1, "john@example.com", "John", "Doe");
    s.engagement_score = 78;
    s.churn_risk_score = 0.234;
    s.total_emails_sent = 156;
    s.total_emails_opened = 124;
    s.total_clicks = 67;

    let m = RecordMetrics::for_subscriber(&s);
    assert_eq!(m.engagement_tier, EngagementTier::High);
    assert_eq!(m.engagement_tone, BadgeTone::Success);
    assert_eq!(m.churn_risk_tier, ChurnRiskTier::Low);
    assert_eq!(m.churn_risk_tone, BadgeTone::Success);
    assert_eq!(m.open_rate, 79.5);
    assert_eq!(m.click_rate, 42.9);
    assert_eq!(m.churn_probability, 23.4);
}
