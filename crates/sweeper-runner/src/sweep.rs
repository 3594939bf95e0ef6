use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use sweeper_core::{Disposition, Issue, RetentionPolicy, SweepStats};
use sweeper_service::{IssueQuery, TrackerService};
use tracing::{debug, error, info};

use crate::report::bytes_to_mb;

#[derive(Debug, Clone)]
pub struct SweepOptions {
    pub query: IssueQuery,
    pub retention: RetentionPolicy,
    /// Blocking pause between pages. Not applied after the last page.
    pub page_delay: Duration,
    /// Log old attachments instead of deleting them.
    pub dry_run: bool,
}

/// Page through every issue with attachments, deleting the old ones.
///
/// Search failures abort the sweep. Delete failures are logged, counted
/// and skipped.
pub fn run<T: TrackerService + ?Sized>(tracker: &T, options: &SweepOptions) -> Result<SweepStats> {
    let mut stats = SweepStats::new();
    let mut skip = 0usize;

    loop {
        let issues = tracker
            .search_issues(&options.query, skip)
            .with_context(|| format!("fetch issues at offset {skip}"))?;
        stats.record_page();
        let fetched = issues.len();
        info!("fetched {fetched} issues (offset {skip})");

        for issue in &issues {
            sweep_issue(tracker, options, issue, &mut stats);
        }

        // SweepOptions built by hand may carry a zero page size; an empty
        // page always ends the walk.
        if fetched == 0 || fetched < options.query.page_size {
            break;
        }
        skip += fetched;
        std::thread::sleep(options.page_delay);
    }

    info!(
        "sweep finished: {} pages, {} issues, {} attachments, {} old",
        stats.pages, stats.issues_seen, stats.attachments_seen, stats.old_count
    );
    Ok(stats)
}

fn sweep_issue<T: TrackerService + ?Sized>(
    tracker: &T,
    options: &SweepOptions,
    issue: &Issue,
    stats: &mut SweepStats,
) {
    let project = issue.project_name();
    if !options.query.includes_project(project) {
        debug!("skipping {} (project {project:?} not in filter)", issue.id);
        return;
    }
    stats.record_issue();

    for attachment in &issue.attachments {
        stats.record_attachment(attachment.size);
        if !options.retention.is_old(attachment, Utc::now()) {
            continue;
        }

        let disposition = if options.dry_run {
            info!(
                "old attachment {} on {}: {:.2} MB, created {}, updated {}",
                attachment.id,
                issue.id,
                bytes_to_mb(attachment.size),
                attachment.created.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
                attachment.updated.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
            );
            Disposition::Eligible
        } else {
            match tracker.delete_attachment(&issue.id, &attachment.id) {
                Ok(()) => {
                    info!(
                        "deleted old attachment {} from issue {}",
                        attachment.id, issue.id
                    );
                    Disposition::Deleted
                }
                Err(e) => {
                    error!(
                        "failed to delete attachment {} from issue {}: {e}",
                        attachment.id, issue.id
                    );
                    Disposition::Failed
                }
            }
        };
        stats.record_old(project, attachment.size, disposition);
    }
}
