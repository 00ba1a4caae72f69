//! SQLite subscriber store: the backend data layer behind the roster endpoint.
//!
//! RULE: Only store.rs talks to the database. The desk session never
//! sees a connection; it receives a Roster built from fetch_roster().

use crate::{
    error::DeskResult,
    metrics::round_to_tenth,
    source::{DashboardSummary, RosterSource},
    subscriber::{parse_timestamp, Subscriber},
    types::SubscriberId,
};
use rusqlite::{params, types::Type, Connection, OptionalExtension, Row};
use std::str::FromStr;

const SUBSCRIBER_COLUMNS: &str =
    "id, email, first_name, last_name, subscription_status, subscription_tier,
     engagement_score, total_emails_sent, total_emails_opened, total_clicks,
     risk_tolerance, churn_risk_score, lifetime_value, created_at, last_engagement_at";

pub struct SubscriberStore {
    conn: Connection,
    name: String,
}

impl SubscriberStore {
    /// Open (or create) the subscriber database at `path`.
    pub fn open(path: &str) -> DeskResult<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn, name: format!("sqlite:{path}") })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> DeskResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn, name: "sqlite::memory:".into() })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> DeskResult<()> {
        self.conn
            .execute_batch(include_str!("../../migrations/001_subscribers.sql"))?;
        Ok(())
    }

    // ── Writes ─────────────────────────────────────────────────

    pub fn insert_subscriber(&self, s: &Subscriber) -> DeskResult<()> {
        insert_row(&self.conn, s)
    }

    /// Insert many in one transaction.
    pub fn insert_subscribers(&mut self, records: &[Subscriber]) -> DeskResult<()> {
        let tx = self.conn.transaction()?;
        for s in records {
            insert_row(&tx, s)?;
        }
        tx.commit()?;
        Ok(())
    }

    // ── Reads ──────────────────────────────────────────────────

    pub fn subscriber_count(&self) -> DeskResult<i64> {
        let n = self
            .conn
            .query_row("SELECT COUNT(*) FROM subscriber", [], |row| row.get(0))?;
        Ok(n)
    }

    pub fn get_subscriber(&self, id: SubscriberId) -> DeskResult<Option<Subscriber>> {
        let sql = format!("SELECT {SUBSCRIBER_COLUMNS} FROM subscriber WHERE id = ?1");
        let found = self
            .conn
            .query_row(&sql, params![id], subscriber_from_row)
            .optional()?;
        Ok(found)
    }

    /// The whole roster in id order.
    pub fn all_subscribers(&self) -> DeskResult<Vec<Subscriber>> {
        self.query(&format!("SELECT {SUBSCRIBER_COLUMNS} FROM subscriber ORDER BY id ASC"), [])
    }

    /// Email contains `pattern` as a plain substring (ASCII case-insensitive).
    /// `%` and `_` in the pattern match themselves.
    pub fn search_by_email(&self, pattern: &str) -> DeskResult<Vec<Subscriber>> {
        self.query(
            &format!(
                "SELECT {SUBSCRIBER_COLUMNS} FROM subscriber
                 WHERE email LIKE '%' || ?1 || '%' ESCAPE '\\' ORDER BY id ASC"
            ),
            params![escape_like(pattern)],
        )
    }

    /// Highest engagement first.
    pub fn top_engaged(&self, limit: usize) -> DeskResult<Vec<Subscriber>> {
        self.query(
            &format!(
                "SELECT {SUBSCRIBER_COLUMNS} FROM subscriber
                 ORDER BY engagement_score DESC, id ASC LIMIT ?1"
            ),
            params![limit as i64],
        )
    }

    /// Churn risk at or above `threshold`, riskiest first.
    pub fn at_risk(&self, threshold: f64, limit: usize) -> DeskResult<Vec<Subscriber>> {
        self.query(
            &format!(
                "SELECT {SUBSCRIBER_COLUMNS} FROM subscriber
                 WHERE churn_risk_score >= ?1
                 ORDER BY churn_risk_score DESC, id ASC LIMIT ?2"
            ),
            params![threshold, limit as i64],
        )
    }

    /// Opens over sends across the whole roster, one decimal place.
    pub fn aggregate_open_rate(&self) -> DeskResult<f64> {
        let (sent, opened): (i64, i64) = self.conn.query_row(
            "SELECT COALESCE(SUM(total_emails_sent), 0), COALESCE(SUM(total_emails_opened), 0)
             FROM subscriber",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        if sent <= 0 {
            return Ok(0.0);
        }
        Ok(round_to_tenth(opened as f64 / sent as f64 * 100.0))
    }

    fn query<P: rusqlite::Params>(&self, sql: &str, params: P) -> DeskResult<Vec<Subscriber>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(params, subscriber_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}

fn escape_like(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// SQLite integers are signed; counters above i64::MAX are refused, not wrapped.
fn counter_to_sql(value: u64) -> rusqlite::Result<i64> {
    i64::try_from(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn counter_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<u64> {
    let raw: i64 = row.get(idx)?;
    u64::try_from(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

fn insert_row(conn: &Connection, s: &Subscriber) -> DeskResult<()> {
    let sent = counter_to_sql(s.total_emails_sent)?;
    let opened = counter_to_sql(s.total_emails_opened)?;
    let clicks = counter_to_sql(s.total_clicks)?;
    conn.execute(
        "INSERT INTO subscriber (
            id, email, first_name, last_name, subscription_status, subscription_tier,
            engagement_score, total_emails_sent, total_emails_opened, total_clicks,
            risk_tolerance, churn_risk_score, lifetime_value, created_at, last_engagement_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            s.id,
            &s.email,
            &s.first_name,
            &s.last_name,
            s.subscription_status.as_str(),
            s.subscription_tier.as_str(),
            s.engagement_score as i64,
            sent,
            opened,
            clicks,
            s.risk_tolerance.as_str(),
            s.churn_risk_score,
            s.lifetime_value,
            s.created_at.to_rfc3339(),
            s.last_engagement_at.map(|t| t.to_rfc3339()),
        ],
    )?;
    Ok(())
}

fn text_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<crate::types::Timestamp>> {
    let raw: Option<String> = row.get(idx)?;
    match raw {
        None => Ok(None),
        Some(text) => parse_timestamp(&text).map(Some).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Text,
                format!("invalid timestamp '{text}'").into(),
            )
        }),
    }
}

fn subscriber_from_row(row: &Row<'_>) -> rusqlite::Result<Subscriber> {
    let created_at = timestamp_column(row, 13)?.ok_or(rusqlite::Error::InvalidColumnType(
        13,
        "created_at".into(),
        Type::Null,
    ))?;
    Ok(Subscriber {
        id:                  row.get(0)?,
        email:               row.get(1)?,
        first_name:          row.get(2)?,
        last_name:           row.get(3)?,
        subscription_status: text_column(row, 4)?,
        subscription_tier:   text_column(row, 5)?,
        engagement_score:    row.get::<_, i64>(6)?.clamp(0, 100) as u8,
        total_emails_sent:   counter_column(row, 7)?,
        total_emails_opened: counter_column(row, 8)?,
        total_clicks:        counter_column(row, 9)?,
        risk_tolerance:      text_column(row, 10)?,
        churn_risk_score:    row.get(11)?,
        lifetime_value:      row.get::<_, f64>(12)?.max(0.0),
        created_at,
        last_engagement_at:  timestamp_column(row, 14)?,
    })
}

impl RosterSource for SubscriberStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch_roster(&self) -> DeskResult<Vec<Subscriber>> {
        self.all_subscribers()
    }

    /// Subscriber count and open rate come from the table; the campaign
    /// figures and activity feed are not tracked here and stay at demo values.
    fn fetch_summary(&self) -> DeskResult<DashboardSummary> {
        Ok(DashboardSummary {
            total_subscribers: self.subscriber_count()?.max(0) as u64,
            engagement_rate:   self.aggregate_open_rate()?,
            ..DashboardSummary::demo()
        })
    }
}
