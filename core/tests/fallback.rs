mod common;

use common::{fixed_now, init_logging};
use desk_core::{
    config::DeskConfig,
    error::DeskError,
    roster::RosterOrigin,
    source::{decode_roster, decode_summary, load_roster, load_summary, JsonFileSource, OfflineSource, RosterSource},
    synthetic::{fallback_roster, synthetic_subscribers, FALLBACK_ROSTER_SIZE},
};
use std::fs;

// ── Helpers ──────────────────────────────────────────────────────────────────

const RECORD: &str = r#"{
    "id": 1, "email": "john.doe@example.com", "first_name": "John", "last_name": "Doe",
    "subscription_status": "active", "subscription_tier": "premium",
    "engagement_score": 78.5, "total_emails_sent": 156, "total_emails_opened": 124,
    "total_clicks": 67, "risk_tolerance": "moderate", "churn_risk_score": 0.23,
    "lifetime_value": 28500.0, "created_at": "2024-03-01T09:30:00"
}"#;

fn roster_body(records: &[&str]) -> String {
    format!(r#"{{ "status": "success", "subscribers": [{}] }}"#, records.join(","))
}

// ── Synthetic roster ─────────────────────────────────────────────────────────

/// Same seed, same instant: identical rosters, field for field.
#[test]
fn synthetic_roster_is_deterministic() {
    let a = synthetic_subscribers(FALLBACK_ROSTER_SIZE, 42, fixed_now());
    let b = synthetic_subscribers(FALLBACK_ROSTER_SIZE, 42, fixed_now());
    assert_eq!(a, b);

    let c = synthetic_subscribers(FALLBACK_ROSTER_SIZE, 43, fixed_now());
    assert_ne!(a, c);
}

/// Twenty records with ids 1..=20, unique emails, all fields in range.
#[test]
fn synthetic_roster_respects_invariants() {
    let roster = fallback_roster(FALLBACK_ROSTER_SIZE, 7, fixed_now());
    assert_eq!(roster.len(), 20);
    assert_eq!(roster.origin(), &RosterOrigin::Fallback { seed: 7 });

    let ids: Vec<i64> = roster.iter().map(|s| s.id).collect();
    assert_eq!(ids, (1..=20).collect::<Vec<i64>>());

    let mut emails: Vec<&str> = roster.iter().map(|s| s.email.as_str()).collect();
    emails.sort();
    emails.dedup();
    assert_eq!(emails.len(), 20);

    for s in roster.iter() {
        assert!((20..=99).contains(&s.engagement_score));
        assert!((0.1..0.9).contains(&s.churn_risk_score), "churn {}", s.churn_risk_score);
        assert!(s.lifetime_value >= 5_000.0);
        assert!(s.created_at <= fixed_now());
    }
}

/// Rosters larger than the fixed name list still get unique emails.
#[test]
fn oversized_synthetic_roster_keeps_emails_unique() {
    let records = synthetic_subscribers(45, 1, fixed_now());
    let mut emails: Vec<&str> = records.iter().map(|s| s.email.as_str()).collect();
    emails.sort();
    emails.dedup();
    assert_eq!(emails.len(), 45);
}

// ── Decoding ─────────────────────────────────────────────────────────────────

#[test]
fn decode_roster_reads_backend_shape() {
    let records = decode_roster("test", &roster_body(&[RECORD])).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].engagement_score, 79);
}

/// A response without a subscribers array is an empty roster, not an error.
#[test]
fn missing_subscribers_array_is_empty() {
    assert!(decode_roster("test", r#"{ "status": "success" }"#).unwrap().is_empty());
    assert!(decode_roster("test", r#"{ "subscribers": null }"#).unwrap().is_empty());
    assert!(decode_roster("test", r#"{ "subscribers": "nope" }"#).unwrap().is_empty());
}

/// Malformed records are dropped; their neighbours survive.
#[test]
fn malformed_records_are_skipped() {
    init_logging();
    let body = roster_body(&[RECORD, r#"{ "id": 2, "email": "x@example.com", "created_at": "yesterday" }"#]);
    let records = decode_roster("test", &body).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 1);
}

/// An error status or unparseable body is a source failure.
#[test]
fn error_bodies_are_rejected() {
    let err = decode_roster("test", r#"{ "status": "error", "error": "db down" }"#).unwrap_err();
    match err {
        DeskError::SourceUnavailable { reason, .. } => assert_eq!(reason, "db down"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(decode_roster("test", "<html>").is_err());
    assert!(decode_summary("test", r#"{ "status": "error" }"#).is_err());
}

// ── Fallback policy ──────────────────────────────────────────────────────────

/// With no backend, the desk runs on the configured synthetic roster and demo summary.
#[test]
fn offline_source_falls_back() {
    init_logging();
    let config = DeskConfig { fallback_roster_size: 12, fallback_seed: 99, ..DeskConfig::default() };
    let roster = load_roster(&OfflineSource, &config, fixed_now());
    assert!(roster.is_fallback());
    assert_eq!(roster.len(), 12);
    assert_eq!(roster.origin(), &RosterOrigin::Fallback { seed: 99 });

    let summary = load_summary(&OfflineSource, &config);
    assert_eq!(summary.total_subscribers, 15_420);
    assert_eq!(summary.recent_activity.len(), 4);
}

/// A directory of response bodies is read as a fetched roster.
#[test]
fn json_file_source_reads_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("subscribers.json"), roster_body(&[RECORD])).unwrap();
    fs::write(
        dir.path().join("summary.json"),
        r#"{ "status": "success", "total_subscribers": 3, "engagement_rate": 41.2,
             "recent_activity": [{ "action": "New subscriber added", "time": "now", "subscriber": "Ann" }] }"#,
    )
    .unwrap();

    let source = JsonFileSource::new(dir.path());
    let roster = load_roster(&source, &DeskConfig::default(), fixed_now());
    assert!(!roster.is_fallback());
    assert_eq!(roster.len(), 1);
    assert!(matches!(roster.origin(), RosterOrigin::Fetched { .. }));

    let summary = source.fetch_summary().unwrap();
    assert_eq!(summary.total_subscribers, 3);
    assert_eq!(summary.revenue_impact, 0.0);
    assert_eq!(summary.recent_activity[0].details["subscriber"], "Ann");
}

/// A missing file is a failed fetch and triggers the fallback.
#[test]
fn json_file_source_without_files_falls_back() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let source = JsonFileSource::new(dir.path());
    assert!(matches!(source.fetch_roster(), Err(DeskError::SourceUnavailable { .. })));

    let roster = load_roster(&source, &DeskConfig::default(), fixed_now());
    assert!(roster.is_fallback());
    assert_eq!(roster.len(), FALLBACK_ROSTER_SIZE);
}

// ── Shipped data ─────────────────────────────────────────────────────────────

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");

/// The checked-in config matches the built-in defaults.
#[test]
fn shipped_config_loads() {
    let config = DeskConfig::load(DATA_DIR).unwrap();
    assert_eq!(config, DeskConfig::default());
}

/// The sample responses decode completely.
#[test]
fn sample_directory_decodes() {
    let source = JsonFileSource::new(format!("{DATA_DIR}/sample"));
    let records = source.fetch_roster().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].engagement_score, 79);
    assert!(records[1].last_engagement_at.is_none());

    let summary = source.fetch_summary().unwrap();
    assert_eq!(summary.total_subscribers, 4);
    assert_eq!(summary.recent_activity.len(), 2);
}
