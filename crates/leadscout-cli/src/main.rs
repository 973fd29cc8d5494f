//! `leadscout` binary: scrape a map directory query, qualify the results,
//! and upsert them into the shared lead store.
//!
//! Exit policy: setup failures (missing store credentials, Chrome cannot
//! launch, initial navigation fails) exit non-zero. Everything downstream
//! degrades gracefully — skipped listings, failed probes, and even a failed
//! store upsert are logged and the process still exits zero.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use leadscout_core::load_app_config_from_env;
use leadscout_scraper::{probe_client, ChromePage, Orchestrator, ScrapeOptions};
use leadscout_store::LeadStoreClient;

#[derive(Debug, Parser)]
#[command(name = "leadscout")]
#[command(about = "Find businesses with a weak web presence via a map directory scrape")]
struct Cli {
    /// Free-text directory search query.
    #[arg(default_value = "Dentist in Bandra")]
    query: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = load_app_config_from_env().context("failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    // Built before Chrome launches so a bad credential fails fast.
    let store = LeadStoreClient::new(
        &config.lead_store_url,
        &config.lead_store_api_key,
        config.store_timeout_secs,
    )
    .context("failed to build lead store client")?;

    let page = ChromePage::new(&config.search_base_url)
        .context("failed to launch browser session")?;
    let probe_http = probe_client(config.probe_timeout_secs, &config.probe_user_agent)
        .context("failed to build probe client")?;

    let orchestrator = Orchestrator::new(page, probe_http, ScrapeOptions::from_config(&config));

    tracing::info!(query = %cli.query, "starting scrape");
    let leads = orchestrator
        .run(&cli.query)
        .await
        .context("scrape run failed")?;

    if leads.is_empty() {
        tracing::info!("no qualified leads this run; nothing to upsert");
        return Ok(());
    }

    match store.upsert_leads(&leads).await {
        Ok(written) => {
            tracing::info!(
                qualified = leads.len(),
                written,
                skipped = skipped_count(leads.len(), written),
                "lead upsert complete"
            );
        }
        Err(error) => {
            // Not fatal: the run's leads are lost, the process still exits 0.
            tracing::error!(error = %error, "lead store upsert failed");
        }
    }

    Ok(())
}

/// Rows the store skipped as conflicts. Saturating: a store echoing more
/// rows than were submitted must not panic the report line.
fn skipped_count(submitted: usize, written: usize) -> usize {
    submitted.saturating_sub(written)
}
