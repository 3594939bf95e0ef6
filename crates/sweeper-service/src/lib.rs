mod http;
pub mod mock;
mod query;
#[cfg(feature = "test-helpers")]
pub mod test_helpers;
mod traits;

pub use http::HttpTracker;
pub use query::{IssueQuery, ISSUE_FIELDS};
pub use traits::{ServiceError, TrackerService};
