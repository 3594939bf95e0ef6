use std::fmt::Write;

use sweeper_core::SweepStats;

pub fn bytes_to_mb(bytes: i64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Plain-text summary printed once the sweep finishes.
pub fn render(stats: &SweepStats, scope: &str, dry_run: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Total attachments size ({scope}): {:.2} MB",
        bytes_to_mb(stats.total_size)
    );
    let _ = writeln!(
        out,
        "Total old attachments size: {:.2} MB ({} attachments)",
        bytes_to_mb(stats.old_size),
        stats.old_count
    );
    let label = if dry_run {
        "Eligible for deletion"
    } else {
        "Deleted"
    };
    let _ = writeln!(
        out,
        "{label}: {:.2} MB ({} attachments)",
        bytes_to_mb(stats.removed_size),
        stats.removed_count
    );
    if stats.failed_count > 0 {
        let _ = writeln!(
            out,
            "Failed deletions: {} ({:.2} MB)",
            stats.failed_count,
            bytes_to_mb(stats.failed_size)
        );
    }
    for project in stats.ranked_projects() {
        let _ = writeln!(
            out,
            "Project {}: {:.2} MB",
            project.name,
            bytes_to_mb(project.size)
        );
    }
    out
}
