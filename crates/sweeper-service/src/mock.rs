use std::collections::HashSet;
use std::sync::Mutex;

use sweeper_core::Issue;

use crate::query::IssueQuery;
use crate::{ServiceError, TrackerService};

/// An in-memory tracker for testing. Serves `issues` in pages according to
/// the requested `$top`/`$skip` and records every call.
pub struct MockTracker {
    issues: Vec<Issue>,
    missing_attachments: HashSet<String>,
    fail_search_at: Option<usize>,
    searches: Mutex<Vec<usize>>,
    deletes: Mutex<Vec<(String, String)>>,
}

impl MockTracker {
    pub fn new(issues: Vec<Issue>) -> Self {
        Self {
            issues,
            missing_attachments: HashSet::new(),
            fail_search_at: None,
            searches: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        }
    }

    /// Deleting this attachment answers 404.
    pub fn with_missing_attachment(mut self, attachment_id: &str) -> Self {
        self.missing_attachments.insert(attachment_id.to_string());
        self
    }

    /// The n-th search call (0-based) answers 500.
    pub fn with_search_failure_at(mut self, call: usize) -> Self {
        self.fail_search_at = Some(call);
        self
    }

    /// `skip` values of every search call, in order.
    pub fn searches(&self) -> Vec<usize> {
        self.searches.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// `(issue_id, attachment_id)` of every delete call, in order.
    pub fn deletes(&self) -> Vec<(String, String)> {
        self.deletes.lock().map(|d| d.clone()).unwrap_or_default()
    }
}

impl TrackerService for MockTracker {
    fn search_issues(&self, query: &IssueQuery, skip: usize) -> Result<Vec<Issue>, ServiceError> {
        let call = {
            let mut searches = self
                .searches
                .lock()
                .map_err(|_| ServiceError::Request("mock lock poisoned".into()))?;
            searches.push(skip);
            searches.len() - 1
        };
        if self.fail_search_at == Some(call) {
            return Err(ServiceError::Status {
                status: 500,
                url: format!("mock?{}", query.query_string(skip)),
            });
        }
        Ok(self
            .issues
            .iter()
            .skip(skip)
            .take(query.page_size)
            .cloned()
            .collect())
    }

    fn delete_attachment(&self, issue_id: &str, attachment_id: &str) -> Result<(), ServiceError> {
        self.deletes
            .lock()
            .map_err(|_| ServiceError::Request("mock lock poisoned".into()))?
            .push((issue_id.to_string(), attachment_id.to_string()));
        if self.missing_attachments.contains(attachment_id) {
            return Err(ServiceError::Status {
                status: 404,
                url: format!("mock/{issue_id}/attachments/{attachment_id}"),
            });
        }
        Ok(())
    }
}
