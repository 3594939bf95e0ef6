use sweeper_core::Issue;
use thiserror::Error;

use crate::query::IssueQuery;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("invalid response: {0}")]
    Decode(String),
}

impl ServiceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The two tracker calls a sweep needs.
///
/// `HttpTracker` talks to a real tracker over blocking HTTP.
/// `MockTracker` serves a scripted issue list from memory.
pub trait TrackerService: Send + Sync {
    /// Fetch one page of issues, starting `skip` results into the search.
    fn search_issues(&self, query: &IssueQuery, skip: usize) -> Result<Vec<Issue>, ServiceError>;

    /// Delete one attachment from an issue.
    fn delete_attachment(&self, issue_id: &str, attachment_id: &str) -> Result<(), ServiceError>;
}
