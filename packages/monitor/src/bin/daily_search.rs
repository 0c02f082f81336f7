//! One scheduled search run: load rules, execute them, persist the result.
//!
//! The host scheduler (cron, systemd timer) decides when this runs; the
//! binary performs a single run and exits.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use djen_client::{DjenClient, DjenConfig};
use monitor::store::{ExecutionRecord, ExecutionStore, JsonResultStore, RuleStore};
use monitor::{FetchConfig, PublicationFetcher, SearchEngine, TracingReporter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "daily_search")]
#[command(about = "Run every configured search rule once and save the results")]
struct Cli {
    /// Custom-rules file; built-in rules are always included.
    #[arg(long, default_value = "data/saved_rules.json")]
    rules_path: String,

    /// Directory for daily result files.
    #[arg(long, default_value = "daily_results")]
    results_dir: String,

    /// Execution name; defaults to "Busca do dia <DD/MM/YYYY>".
    #[arg(long)]
    name: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,monitor=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let now = Local::now();
    let today = now.date_naive();

    tracing::info!(date = %today, "starting daily search");

    let rules = RuleStore::new(&cli.rules_path).load_all(today);
    let enabled = rules.iter().filter(|rule| rule.enabled).count();
    if enabled == 0 {
        tracing::warn!("no enabled rules, nothing to do");
        return Ok(());
    }
    tracing::info!(total = rules.len(), enabled, "rules loaded");

    let client = DjenClient::new(DjenConfig::from_env()).context("failed to build DJEN client")?;
    let engine = SearchEngine::new(PublicationFetcher::new(client, FetchConfig::default()));

    let report = engine.execute(&rules, &TracingReporter).await;
    tracing::info!(
        found = report.stats.total_found,
        excluded = report.stats.total_excluded,
        duplicates = report.stats.duplicates_removed,
        "search complete"
    );

    let name = cli
        .name
        .unwrap_or_else(|| format!("Busca do dia {}", now.format("%d/%m/%Y")));
    let record = ExecutionRecord::from_report(name, today, now, report);

    JsonResultStore::new(&cli.results_dir)
        .save(&record)
        .await
        .context("failed to save execution results")?;

    Ok(())
}
