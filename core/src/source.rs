//! Roster and summary sources, and the fallback policy around them.
//!
//! RULE: A source failure never reaches the session. load_roster and
//! load_summary log the failure and substitute synthetic data; the
//! desk always has something to show.

use crate::{
    config::DeskConfig,
    error::{DeskError, DeskResult},
    roster::{Roster, RosterOrigin},
    subscriber::Subscriber,
    synthetic::fallback_roster,
    types::Timestamp,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub const ROSTER_FILE: &str = "subscribers.json";
pub const SUMMARY_FILE: &str = "summary.json";

// ── Payloads ─────────────────────────────────────────────────────────────────

/// One line of the "recent activity" feed. Beyond `action` and `time`
/// each event carries its own keys (subscriber, test, amount, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub action:  String,
    #[serde(default)]
    pub time:    String,
    #[serde(flatten)]
    pub details: BTreeMap<String, Value>,
}

impl ActivityEvent {
    fn new(action: &str, time: &str, key: &str, value: &str) -> Self {
        let mut details = BTreeMap::new();
        details.insert(key.to_string(), Value::String(value.to_string()));
        Self { action: action.to_string(), time: time.to_string(), details }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub total_subscribers: u64,
    #[serde(default)]
    pub engagement_rate:   f64,
    #[serde(default)]
    pub revenue_impact:    f64,
    #[serde(default)]
    pub churn_reduction:   f64,
    #[serde(default)]
    pub recent_activity:   Vec<ActivityEvent>,
}

impl Default for DashboardSummary {
    fn default() -> Self {
        Self::demo()
    }
}

impl DashboardSummary {
    /// The fixed demo figures shown when no summary can be fetched.
    pub fn demo() -> Self {
        Self {
            total_subscribers: 15_420,
            engagement_rate:   23.4,
            revenue_impact:    285_000.0,
            churn_reduction:   18.5,
            recent_activity:   vec![
                ActivityEvent::new("Subject line generated", "2 minutes ago", "subscriber", "John D."),
                ActivityEvent::new("A/B test completed", "15 minutes ago", "test", "Newsletter #47"),
                ActivityEvent::new("New subscriber added", "1 hour ago", "subscriber", "Sarah M."),
                ActivityEvent::new("Revenue impact calculated", "2 hours ago", "amount", "$12,450"),
            ],
        }
    }
}

/// Reject bodies the backend marks as failed (`"status": "error"`).
fn check_status(source_name: &str, body: &Value) -> DeskResult<()> {
    if body.get("status").and_then(Value::as_str) == Some("error") {
        let reason = body
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("backend reported an error")
            .to_string();
        return Err(DeskError::SourceUnavailable { source_name: source_name.to_string(), reason });
    }
    Ok(())
}

/// Decode a roster response body.
///
/// An unparseable body or an error status is an error. A missing, null
/// or non-array `subscribers` field is an empty roster. Records that
/// fail to decode are skipped.
pub fn decode_roster(source_name: &str, body: &str) -> DeskResult<Vec<Subscriber>> {
    let value: Value = serde_json::from_str(body)?;
    check_status(source_name, &value)?;

    let Some(items) = value.get("subscribers").and_then(Value::as_array) else {
        log::warn!("source={source_name}: response has no subscribers array, treating as empty");
        return Ok(Vec::new());
    };

    let mut records = Vec::with_capacity(items.len());
    for (idx, item) in items.iter().enumerate() {
        match Subscriber::deserialize(item) {
            Ok(s) => records.push(s),
            Err(e) => log::warn!("source={source_name}: skipping subscriber #{idx}: {e}"),
        }
    }
    Ok(records)
}

/// Decode a summary response body. Absent fields default to zero/empty.
pub fn decode_summary(source_name: &str, body: &str) -> DeskResult<DashboardSummary> {
    let value: Value = serde_json::from_str(body)?;
    check_status(source_name, &value)?;
    Ok(DashboardSummary::deserialize(&value)?)
}

// ── Sources ──────────────────────────────────────────────────────────────────

/// Anything that can hand the desk a roster snapshot and a summary.
pub trait RosterSource {
    /// Stable name used in logs and in RosterOrigin::Fetched.
    fn name(&self) -> &str;

    /// Subscribers in source order.
    fn fetch_roster(&self) -> DeskResult<Vec<Subscriber>>;

    fn fetch_summary(&self) -> DeskResult<DashboardSummary>;
}

/// Reads `subscribers.json` and `summary.json` response bodies from a directory.
pub struct JsonFileSource {
    dir:  PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let name = format!("json:{}", dir.display());
        Self { dir, name }
    }

    fn read(&self, file: &str) -> DeskResult<String> {
        let path = self.dir.join(file);
        std::fs::read_to_string(&path).map_err(|e| DeskError::SourceUnavailable {
            source_name: self.name.clone(),
            reason:      format!("cannot read {}: {e}", path.display()),
        })
    }
}

impl RosterSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_roster(&self) -> DeskResult<Vec<Subscriber>> {
        decode_roster(&self.name, &self.read(ROSTER_FILE)?)
    }

    fn fetch_summary(&self) -> DeskResult<DashboardSummary> {
        decode_summary(&self.name, &self.read(SUMMARY_FILE)?)
    }
}

/// No backend configured. Every fetch fails, so the desk runs on fallback data.
pub struct OfflineSource;

impl RosterSource for OfflineSource {
    fn name(&self) -> &str {
        "offline"
    }

    fn fetch_roster(&self) -> DeskResult<Vec<Subscriber>> {
        Err(DeskError::SourceUnavailable {
            source_name: "offline".into(),
            reason:      "no roster source configured".into(),
        })
    }

    fn fetch_summary(&self) -> DeskResult<DashboardSummary> {
        Err(DeskError::SourceUnavailable {
            source_name: "offline".into(),
            reason:      "no summary source configured".into(),
        })
    }
}

// ── Fallback policy ──────────────────────────────────────────────────────────

/// Fetch the roster, or build the synthetic one if the fetch fails.
pub fn load_roster(source: &dyn RosterSource, config: &DeskConfig, now: Timestamp) -> Roster {
    match source.fetch_roster() {
        Ok(records) => {
            log::info!("source={}: loaded {} subscribers", source.name(), records.len());
            Roster::new(RosterOrigin::Fetched { source: source.name().to_string() }, records)
        }
        Err(e) => {
            log::error!(
                "source={}: roster fetch failed ({e}); using {} synthetic subscribers (seed={})",
                source.name(),
                config.fallback_roster_size,
                config.fallback_seed
            );
            fallback_roster(config.fallback_roster_size, config.fallback_seed, now)
        }
    }
}

/// Fetch the summary, or serve the configured fallback figures.
pub fn load_summary(source: &dyn RosterSource, config: &DeskConfig) -> DashboardSummary {
    match source.fetch_summary() {
        Ok(summary) => summary,
        Err(e) => {
            log::error!("source={}: summary fetch failed ({e}); using fallback figures", source.name());
            config.summary_fallback.clone()
        }
    }
}
