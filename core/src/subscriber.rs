//! The subscriber record and its enumerated fields.
//!
//! RULE: A Subscriber is an immutable snapshot once it enters a Roster.
//! Range invariants (engagement 0..=100, churn risk 0.0..=1.0,
//! non-negative lifetime value) are enforced here, at decode time,
//! so nothing downstream has to re-check them.

use crate::{
    error::UnknownVariant,
    types::{SubscriberId, Timestamp},
};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

// ── Enumerated fields ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Basic,
    Premium,
    Enterprise,
}

/// Display-only. Nothing in filtering reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTolerance {
    Conservative,
    #[default]
    Moderate,
    Aggressive,
}

macro_rules! text_enum {
    ($ty:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownVariant { kind: $kind, value: other.to_string() }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(self.as_str())
            }
        }
    };
}

text_enum!(SubscriptionStatus, "subscription status", {
    Active    => "active",
    Paused    => "paused",
    Cancelled => "cancelled",
});

text_enum!(SubscriptionTier, "subscription tier", {
    Basic      => "basic",
    Premium    => "premium",
    Enterprise => "enterprise",
});

text_enum!(RiskTolerance, "risk tolerance", {
    Conservative => "conservative",
    Moderate     => "moderate",
    Aggressive   => "aggressive",
});

// ── Subscriber ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id:                  SubscriberId,
    pub email:               String,
    #[serde(default)]
    pub first_name:          Option<String>,
    #[serde(default)]
    pub last_name:           Option<String>,
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
    #[serde(default)]
    pub subscription_tier:   SubscriptionTier,
    /// 0..=100. Fractional input is rounded.
    #[serde(default, deserialize_with = "engagement_score")]
    pub engagement_score:    u8,
    #[serde(default)]
    pub total_emails_sent:   u64,
    #[serde(default)]
    pub total_emails_opened: u64,
    #[serde(default)]
    pub total_clicks:        u64,
    #[serde(default)]
    pub risk_tolerance:      RiskTolerance,
    /// Probability of churning, 0.0..=1.0.
    #[serde(default, deserialize_with = "unit_interval")]
    pub churn_risk_score:    f64,
    #[serde(default, deserialize_with = "non_negative")]
    pub lifetime_value:      f64,
    #[serde(deserialize_with = "timestamp")]
    pub created_at:          Timestamp,
    #[serde(default, deserialize_with = "optional_timestamp")]
    pub last_engagement_at:  Option<Timestamp>,
}

impl Subscriber {
    /// "First Last", whichever half is present, or the email's local part.
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().filter(|s| !s.is_empty());
        let last = self.last_name.as_deref().filter(|s| !s.is_empty());
        match (first, last) {
            (Some(f), Some(l)) => format!("{f} {l}"),
            (Some(f), None) => f.to_string(),
            (None, Some(l)) => l.to_string(),
            (None, None) => self
                .email
                .split('@')
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

// ── Decode helpers ───────────────────────────────────────────────────────────

fn engagement_score<'de, D: Deserializer<'de>>(d: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(d)?;
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

fn unit_interval<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let raw = f64::deserialize(d)?;
    Ok(raw.clamp(0.0, 1.0))
}

fn non_negative<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let raw = f64::deserialize(d)?;
    Ok(raw.max(0.0))
}

/// Accepts RFC 3339 ("...Z" / "+00:00") and naive ISO-8601, read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Timestamp, D::Error> {
    let raw = String::deserialize(d)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

fn optional_timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Timestamp>, D::Error> {
    match Option::<String>::deserialize(d)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'"))),
    }
}
