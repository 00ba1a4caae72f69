//! Derived metrics: pure per-record classification and rates.
//!
//! Every band is inclusive on its lower bound: exactly 70 engagement
//! is High, exactly 0.4 churn risk is Medium Risk.
//! Rates are not clamped. Counters with opened > sent yield > 100%.

use crate::subscriber::Subscriber;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const HIGH_ENGAGEMENT_MIN: u8 = 70;
pub const MEDIUM_ENGAGEMENT_MIN: u8 = 40;
pub const HIGH_CHURN_RISK_MIN: f64 = 0.7;
pub const MEDIUM_CHURN_RISK_MIN: f64 = 0.4;

/// Badge colour family used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementTier {
    High,
    Medium,
    Low,
}

impl EngagementTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High   => "High",
            Self::Medium => "Medium",
            Self::Low    => "Low",
        }
    }

    pub fn tone(&self) -> BadgeTone {
        match self {
            Self::High   => BadgeTone::Success,
            Self::Medium => BadgeTone::Warning,
            Self::Low    => BadgeTone::Danger,
        }
    }
}

impl fmt::Display for EngagementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChurnRiskTier {
    High,
    Medium,
    Low,
}

impl ChurnRiskTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High   => "High Risk",
            Self::Medium => "Medium Risk",
            Self::Low    => "Low Risk",
        }
    }

    /// Inverted relative to engagement: high risk is bad news.
    pub fn tone(&self) -> BadgeTone {
        match self {
            Self::High   => BadgeTone::Danger,
            Self::Medium => BadgeTone::Warning,
            Self::Low    => BadgeTone::Success,
        }
    }
}

impl fmt::Display for ChurnRiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

pub fn engagement_tier(score: u8) -> EngagementTier {
    if score >= HIGH_ENGAGEMENT_MIN {
        EngagementTier::High
    } else if score >= MEDIUM_ENGAGEMENT_MIN {
        EngagementTier::Medium
    } else {
        EngagementTier::Low
    }
}

pub fn churn_risk_tier(score: f64) -> ChurnRiskTier {
    if score >= HIGH_CHURN_RISK_MIN {
        ChurnRiskTier::High
    } else if score >= MEDIUM_CHURN_RISK_MIN {
        ChurnRiskTier::Medium
    } else {
        ChurnRiskTier::Low
    }
}

/// Percentage of sent emails that were opened, one decimal place.
/// Zero sent is 0.0, never NaN.
pub fn open_rate(sent: u64, opened: u64) -> f64 {
    percent_of(opened, sent)
}

/// Percentage of sent emails that produced a click, one decimal place.
pub fn click_rate(sent: u64, clicks: u64) -> f64 {
    percent_of(clicks, sent)
}

fn percent_of(part: u64, sent: u64) -> f64 {
    if sent == 0 {
        return 0.0;
    }
    round_to_tenth(part as f64 / sent as f64 * 100.0)
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Everything the dashboard shows next to one subscriber row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetrics {
    pub engagement_tier:  EngagementTier,
    pub engagement_tone:  BadgeTone,
    pub churn_risk_tier:  ChurnRiskTier,
    pub churn_risk_tone:  BadgeTone,
    pub open_rate:        f64,
    pub click_rate:       f64,
    /// churn_risk_score as a percentage, one decimal place.
    pub churn_probability: f64,
}

impl RecordMetrics {
    pub fn for_subscriber(s: &Subscriber) -> Self {
        let engagement = engagement_tier(s.engagement_score);
        let churn = churn_risk_tier(s.churn_risk_score);
        Self {
            engagement_tier:   engagement,
            engagement_tone:   engagement.tone(),
            churn_risk_tier:   churn,
            churn_risk_tone:   churn.tone(),
            open_rate:         open_rate(s.total_emails_sent, s.total_emails_opened),
            click_rate:        click_rate(s.total_emails_sent, s.total_clicks),
            churn_probability: round_to_tenth(s.churn_risk_score * 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_one_decimal() {
        assert_eq!(open_rate(3, 1), 33.3);
        assert_eq!(open_rate(3, 2), 66.7);
        assert_eq!(click_rate(8, 1), 12.5);
    }

    #[test]
    fn labels_match_dashboard_text() {
        assert_eq!(engagement_tier(100).to_string(), "High");
        assert_eq!(churn_risk_tier(0.0).to_string(), "Low Risk");
        assert_eq!(ChurnRiskTier::High.tone(), BadgeTone::Danger);
        assert_eq!(EngagementTier::High.tone(), BadgeTone::Success);
    }
}
