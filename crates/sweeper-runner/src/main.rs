use anyhow::{Context, Result};
use clap::Parser;
use sweeper_runner::config::SweeperConfig;
use sweeper_runner::{report, sweep};
use sweeper_service::HttpTracker;
use tracing::{error, info};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SweeperConfig::parse();
    let options = config.sweep_options()?;
    info!("attachment-sweeper starting");
    info!("tracker: {}", config.tracker_url);
    info!(
        "scope: {}, page size: {}, retention: {} years, dry run: {}",
        options.query.scope_label(),
        options.query.page_size,
        options.retention.years(),
        options.dry_run
    );

    let tracker = HttpTracker::new(
        &config.tracker_url,
        config.token.clone(),
        config.request_timeout(),
    )
    .context("create tracker client")?;

    let stats = match sweep::run(&tracker, &options) {
        Ok(stats) => stats,
        Err(e) => {
            error!("sweep aborted: {e:#}");
            return Err(e);
        }
    };

    print!(
        "{}",
        report::render(&stats, &options.query.scope_label(), options.dry_run)
    );
    Ok(())
}
