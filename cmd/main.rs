use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use allowlist_syncer::error::Result;
use allowlist_syncer::fetcher::HttpFetcher;
use allowlist_syncer::provider::{CfClient, Cloudflare};
use allowlist_syncer::sync::{ReconciliationEngine, RuleEnsurer, RuleOutcome, SyncOutcome};
use allowlist_syncer::types::list_filter_expression;

mod config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = config::Args::parse();
    setup_logging(args.verbose);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &config::Args) -> Result<()> {
    let config::Settings {
        credentials,
        api_base,
        ips_url,
        ipv6,
        list,
        rule_description,
        poll_interval,
    } = config::Settings::load(args)?;

    let cli = CfClient::with_base_url(credentials.api_token(), &api_base);
    let mut cf = Cloudflare::with_client(credentials, cli);
    cf.initialize().await?;

    let fetcher = HttpFetcher::new(ips_url, ipv6);
    log::info!("syncing list '{}' from {}", list.name, fetcher.url());

    let engine = ReconciliationEngine::new(&cf, poll_interval);
    match engine.sync(&list, &fetcher).await? {
        SyncOutcome::Created { count } => log::info!("list filled with {} ips", count),
        SyncOutcome::Replaced { missing, count } => {
            log::info!("list replaced with {} ips, {} were missing", count, missing.len())
        }
        SyncOutcome::Unchanged => log::info!("no missing ips"),
    }

    let expression = list_filter_expression(&list.name);
    match RuleEnsurer::new(&cf)
        .ensure(&rule_description, &expression)
        .await?
    {
        RuleOutcome::Exists { matches } => {
            log::debug!("{} matching firewall rule(s) found", matches)
        }
        RuleOutcome::Created(rule) => log::debug!("created firewall rule {:?}", rule),
    }

    Ok(())
}

fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    // The fmt subscriber also picks up `log` records through its tracing-log bridge.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
