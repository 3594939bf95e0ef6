use std::collections::HashMap;

/// What happened to an attachment that was classified old.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// The tracker confirmed the delete.
    Deleted,
    /// The delete call failed; the attachment is still on the tracker.
    Failed,
    /// Dry run: the attachment would have been deleted.
    Eligible,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTotal {
    pub name: String,
    pub size: i64,
}

/// Running totals for one sweep. Folded through the fetch loop and handed
/// to the reporter at the end.
///
/// `project_sizes` only tracks attachments that were actually removed
/// (or would be, in a dry run); failed deletes are counted separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub pages: u64,
    pub issues_seen: u64,
    pub attachments_seen: u64,
    pub total_size: i64,
    pub old_count: u64,
    pub old_size: i64,
    pub removed_count: u64,
    pub removed_size: i64,
    pub failed_count: u64,
    pub failed_size: i64,
    project_sizes: HashMap<String, i64>,
}

impl SweepStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_page(&mut self) {
        self.pages += 1;
    }

    pub fn record_issue(&mut self) {
        self.issues_seen += 1;
    }

    pub fn record_attachment(&mut self, size: i64) {
        self.attachments_seen += 1;
        self.total_size += size;
    }

    pub fn record_old(&mut self, project: &str, size: i64, disposition: Disposition) {
        self.old_count += 1;
        self.old_size += size;
        match disposition {
            Disposition::Deleted | Disposition::Eligible => {
                self.removed_count += 1;
                self.removed_size += size;
                *self.project_sizes.entry(project.to_string()).or_insert(0) += size;
            }
            Disposition::Failed => {
                self.failed_count += 1;
                self.failed_size += size;
            }
        }
    }

    pub fn project_size(&self, project: &str) -> i64 {
        self.project_sizes.get(project).copied().unwrap_or(0)
    }

    /// Projects ordered by accumulated size, largest first. Equal sizes are
    /// ordered by name so the report is stable between runs.
    pub fn ranked_projects(&self) -> Vec<ProjectTotal> {
        let mut ranked: Vec<ProjectTotal> = self
            .project_sizes
            .iter()
            .map(|(name, size)| ProjectTotal {
                name: name.clone(),
                size: *size,
            })
            .collect();
        ranked.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
        ranked
    }
}
