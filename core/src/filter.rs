//! Filter engine: stable, three-criteria view over the roster.
//!
//! RULE: Filtering never reorders. The output is the roster with
//! non-matching records removed, nothing else.

use crate::subscriber::{Subscriber, SubscriptionStatus, SubscriptionTier};
use serde::{Deserialize, Serialize};

/// Status facet: "all" or one exact status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Paused,
    Cancelled,
}

impl StatusFilter {
    pub fn admits(&self, status: SubscriptionStatus) -> bool {
        match self {
            Self::All       => true,
            Self::Active    => status == SubscriptionStatus::Active,
            Self::Paused    => status == SubscriptionStatus::Paused,
            Self::Cancelled => status == SubscriptionStatus::Cancelled,
        }
    }
}

impl From<SubscriptionStatus> for StatusFilter {
    fn from(status: SubscriptionStatus) -> Self {
        match status {
            SubscriptionStatus::Active    => Self::Active,
            SubscriptionStatus::Paused    => Self::Paused,
            SubscriptionStatus::Cancelled => Self::Cancelled,
        }
    }
}

/// Tier facet: "all" or one exact tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierFilter {
    #[default]
    All,
    Basic,
    Premium,
    Enterprise,
}

impl TierFilter {
    pub fn admits(&self, tier: SubscriptionTier) -> bool {
        match self {
            Self::All        => true,
            Self::Basic      => tier == SubscriptionTier::Basic,
            Self::Premium    => tier == SubscriptionTier::Premium,
            Self::Enterprise => tier == SubscriptionTier::Enterprise,
        }
    }
}

impl From<SubscriptionTier> for TierFilter {
    fn from(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Basic      => Self::Basic,
            SubscriptionTier::Premium    => Self::Premium,
            SubscriptionTier::Enterprise => Self::Enterprise,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub status:      StatusFilter,
    #[serde(default)]
    pub tier:        TierFilter,
}

impl FilterCriteria {
    /// Criteria that admit every record.
    pub fn all() -> Self {
        Self::default()
    }

    /// All three predicates, ANDed.
    pub fn matches(&self, s: &Subscriber) -> bool {
        self.matches_lowered(s, &self.search_term.to_lowercase())
    }

    /// `needle` is the search term, lowercased.
    fn matches_lowered(&self, s: &Subscriber, needle: &str) -> bool {
        self.status.admits(s.subscription_status)
            && self.tier.admits(s.subscription_tier)
            && matches_search(s, needle)
    }
}

/// `needle` must already be lowercased. Empty matches everything.
fn matches_search(s: &Subscriber, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hit = |field: &str| field.to_lowercase().contains(needle);
    hit(s.email.as_str())
        || s.first_name.as_deref().is_some_and(hit)
        || s.last_name.as_deref().is_some_and(hit)
}

/// Positions (into `roster`) of the records matching `criteria`, ascending.
pub fn matching_positions(roster: &[Subscriber], criteria: &FilterCriteria) -> Vec<usize> {
    let needle = criteria.search_term.to_lowercase();
    roster
        .iter()
        .enumerate()
        .filter(|(_, s)| criteria.matches_lowered(s, &needle))
        .map(|(i, _)| i)
        .collect()
}

/// The filtered view itself, in roster order.
pub fn filter<'a>(roster: &'a [Subscriber], criteria: &FilterCriteria) -> Vec<&'a Subscriber> {
    matching_positions(roster, criteria)
        .into_iter()
        .map(|i| &roster[i])
        .collect()
}
