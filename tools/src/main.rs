//! desk-runner: headless driver for the subscriber desk.
//!
//! Usage:
//!   desk-runner --data-dir ./data --roster ./data/sample
//!   desk-runner --db subscribers.db --search smith --page 2
//!   desk-runner --seed 12345 --ipc-mode

use anyhow::Result;
use chrono::{DateTime, Utc};
use desk_core::{
    analytics::{at_risk, top_engaged, RosterAnalytics},
    command::DeskCommand,
    config::DeskConfig,
    metrics::{HIGH_CHURN_RISK_MIN, RecordMetrics},
    scoring::{score_churn_risk, score_engagement},
    session::DeskSession,
    source::{load_roster, load_summary, DashboardSummary, JsonFileSource, OfflineSource, RosterSource},
    store::SubscriberStore,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcRequest {
    GetState,
    Apply { command: DeskCommand },
    Analytics,
    Summary,
    Quit,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let page = parse_arg(&args, "--page", 1usize);

    let mut config = match DeskConfig::load(data_dir) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("config: {e}; using defaults");
            DeskConfig::default()
        }
    };
    config.fallback_seed = parse_arg(&args, "--seed", config.fallback_seed);

    let source: Box<dyn RosterSource> = if let Some(db) = string_arg(&args, "--db") {
        let store = SubscriberStore::open(db)?;
        store.migrate()?;
        Box::new(store)
    } else if let Some(dir) = string_arg(&args, "--roster") {
        Box::new(JsonFileSource::new(dir))
    } else {
        Box::new(OfflineSource)
    };

    let now = Utc::now();
    let roster = load_roster(source.as_ref(), &config, now);
    let summary = load_summary(source.as_ref(), &config);
    let mut session = DeskSession::with_config(roster, &config);

    if ipc_mode {
        return run_ipc_loop(&mut session, &summary);
    }

    if let Some(term) = string_arg(&args, "--search") {
        session.set_search_term(term);
    }
    session.go_to_page(page);
    print_report(&session, &summary, now);
    Ok(())
}

fn run_ipc_loop(session: &mut DeskSession, summary: &DashboardSummary) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("ipc: rejected request: {e}");
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match request {
            IpcRequest::Quit => break,
            IpcRequest::GetState => {
                writeln!(stdout, "{}", serde_json::to_string(&session.snapshot())?)?;
            }
            IpcRequest::Apply { command } => {
                session.apply(command);
                writeln!(stdout, "{}", serde_json::to_string(&session.snapshot())?)?;
            }
            IpcRequest::Analytics => {
                let analytics = RosterAnalytics::compute(session.roster().iter());
                writeln!(stdout, "{}", serde_json::to_string(&analytics)?)?;
            }
            IpcRequest::Summary => {
                writeln!(stdout, "{}", serde_json::to_string(summary)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn print_report(session: &DeskSession, summary: &DashboardSummary, now: DateTime<Utc>) {
    let roster = session.roster();
    let analytics = RosterAnalytics::compute(roster.iter());

    println!("Subscriber Desk (desk-runner)");
    println!("  session:    {}", session.session_id);
    println!("  origin:     {:?}", roster.origin());
    println!("  roster:     {}", roster.len());
    println!();

    println!("=== DASHBOARD ===");
    println!("  subscribers:     {}", summary.total_subscribers);
    println!("  engagement rate: {:.1}%", summary.engagement_rate);
    println!("  revenue impact:  ${:.0}", summary.revenue_impact);
    println!("  churn reduction: {:.1}%", summary.churn_reduction);
    for event in &summary.recent_activity {
        println!("    - {} ({})", event.action, event.time);
    }
    println!();

    println!("=== ROSTER ANALYTICS ===");
    println!(
        "  status:     active={} paused={} cancelled={}",
        analytics.status.active, analytics.status.paused, analytics.status.cancelled
    );
    println!(
        "  tiers:      basic={} premium={} enterprise={}",
        analytics.tiers.basic, analytics.tiers.premium, analytics.tiers.enterprise
    );
    println!(
        "  engagement: high={} medium={} low={} (avg {:.1})",
        analytics.engagement.high,
        analytics.engagement.medium,
        analytics.engagement.low,
        analytics.avg_engagement
    );
    println!(
        "  rates:      open {:.1}% / click {:.1}%",
        analytics.open_rate, analytics.click_rate
    );
    println!("  at risk:    {}", analytics.at_risk_subscribers);
    println!("  total LTV:  ${:.0}", analytics.total_lifetime_value);
    for s in top_engaged(roster.as_slice(), 3) {
        println!(
            "    top:  {} ({}, heuristic {})",
            s.display_name(),
            s.engagement_score,
            score_engagement(s, now)
        );
    }
    for s in at_risk(roster.as_slice(), HIGH_CHURN_RISK_MIN, 3) {
        println!(
            "    risk: {} ({:.2}, heuristic {:.2})",
            s.display_name(),
            s.churn_risk_score,
            score_churn_risk(s, now)
        );
    }
    println!();

    println!(
        "=== PAGE {} of {} ({} matching \"{}\") ===",
        session.current_page(),
        session.total_pages(),
        session.filtered_len(),
        session.criteria().search_term
    );
    for s in session.visible() {
        let m = RecordMetrics::for_subscriber(s);
        println!(
            "  #{:<4} {:<28} {:<10} {:<10} {:<6} {:<11} open {:>5.1}% click {:>5.1}%",
            s.id,
            s.email,
            s.subscription_status,
            s.subscription_tier,
            m.engagement_tier,
            m.churn_risk_tier,
            m.open_rate,
            m.click_rate
        );
    }
    if let Some(w) = session.pagination().window(session.filtered_len()) {
        println!("  Showing {} to {} of {} results", w.first, w.last, w.total);
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
