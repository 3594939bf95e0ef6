use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use sweeper_core::RetentionPolicy;
use sweeper_service::IssueQuery;

use crate::sweep::SweepOptions;

#[derive(Debug, Parser)]
#[command(
    name = "attachment-sweeper",
    about = "Delete issue attachments older than a retention window"
)]
pub struct SweeperConfig {
    /// Issues API URL, e.g. https://example.myjetbrains.com/api/issues
    #[arg(long, env = "SWEEPER_TRACKER_URL")]
    pub tracker_url: String,

    /// Bearer token for the tracker API
    #[arg(long, env = "SWEEPER_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Per-request timeout (seconds)
    #[arg(long, env = "SWEEPER_TIMEOUT", default_value = "20")]
    pub timeout: u64,

    /// Comma-separated project names to sweep. Empty sweeps every project.
    #[arg(long, env = "SWEEPER_PROJECTS", value_delimiter = ',')]
    pub projects: Vec<String>,

    /// Issues requested per search page
    #[arg(long, env = "SWEEPER_PAGE_SIZE", default_value = "16000")]
    pub page_size: usize,

    /// Attachments created or updated longer ago than this are deleted
    #[arg(long, env = "SWEEPER_RETENTION_YEARS", default_value = "3")]
    pub retention_years: u32,

    /// Pause between search pages (milliseconds)
    #[arg(long, env = "SWEEPER_PAGE_DELAY_MS", default_value = "500")]
    pub page_delay_ms: u64,

    /// Report old attachments without deleting them
    #[arg(long, env = "SWEEPER_DRY_RUN")]
    pub dry_run: bool,
}

impl SweeperConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Validate the numeric settings and build the sweep parameters.
    pub fn sweep_options(&self) -> Result<SweepOptions> {
        if self.page_size == 0 {
            bail!("page size must be greater than zero");
        }
        let retention = RetentionPolicy::new(self.retention_years)?;
        Ok(SweepOptions {
            query: IssueQuery::new(self.projects.clone(), self.page_size),
            retention,
            page_delay: self.page_delay(),
            dry_run: self.dry_run,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> SweeperConfig {
        let mut args = vec![
            "attachment-sweeper",
            "--tracker-url",
            "https://tracker.example/api/issues",
            "--token",
            "perm:abc",
        ];
        args.extend_from_slice(extra);
        SweeperConfig::try_parse_from(args).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.request_timeout(), Duration::from_secs(20));
        assert_eq!(config.page_size, 16000);
        assert_eq!(config.retention_years, 3);
        assert_eq!(config.page_delay(), Duration::from_millis(500));
        assert!(config.projects.is_empty());
        assert!(!config.dry_run);

        let options = config.sweep_options().unwrap();
        assert_eq!(options.query.page_size, 16000);
        assert_eq!(options.query.scope_label(), "all projects");
        assert_eq!(options.retention, RetentionPolicy::default());
    }

    #[test]
    fn projects_split_on_commas() {
        let config = parse(&["--projects", "OPS,WEB", "--dry-run"]);
        assert_eq!(config.projects, vec!["OPS", "WEB"]);
        let options = config.sweep_options().unwrap();
        assert_eq!(options.query.project_clause(), "project:+OPS,WEB");
        assert!(options.dry_run);
    }

    #[test]
    fn zero_page_size_rejected() {
        let err = parse(&["--page-size", "0"]).sweep_options().unwrap_err();
        assert!(err.to_string().contains("page size"));
    }

    #[test]
    fn zero_retention_rejected() {
        let err = parse(&["--retention-years", "0"])
            .sweep_options()
            .unwrap_err();
        assert!(err.to_string().contains("retention"));
    }
}
