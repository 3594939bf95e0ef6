use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use sweeper_core::Issue;
use tracing::debug;

use crate::query::IssueQuery;
use crate::{ServiceError, TrackerService};

/// Blocking HTTP client for the tracker's issues API.
///
/// `base_url` points at the issues collection, e.g.
/// `https://example.myjetbrains.com/api/issues`.
pub struct HttpTracker {
    base_url: String,
    token: String,
    client: Client,
}

impl HttpTracker {
    pub fn new(base_url: &str, token: String, timeout: Duration) -> Result<Self, ServiceError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Request(format!("build client: {e}")))?;
        Ok(Self {
            base_url,
            token,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
    }

    pub fn search_url(&self, query: &IssueQuery, skip: usize) -> String {
        format!("{}?{}", self.base_url, query.query_string(skip))
    }

    pub fn attachment_url(&self, issue_id: &str, attachment_id: &str) -> String {
        format!("{}/{issue_id}/attachments/{attachment_id}", self.base_url)
    }
}

impl TrackerService for HttpTracker {
    fn search_issues(&self, query: &IssueQuery, skip: usize) -> Result<Vec<Issue>, ServiceError> {
        let url = self.search_url(query, skip);
        debug!("GET {url}");
        let resp = self
            .with_auth(self.client.get(&url))
            .send()
            .map_err(|e| ServiceError::Request(format!("GET {url}: {e}")))?;
        handle_response(resp, &url)
    }

    fn delete_attachment(&self, issue_id: &str, attachment_id: &str) -> Result<(), ServiceError> {
        let url = self.attachment_url(issue_id, attachment_id);
        debug!("DELETE {url}");
        let resp = self
            .with_auth(self.client.delete(&url))
            .send()
            .map_err(|e| ServiceError::Request(format!("DELETE {url}: {e}")))?;
        // The tracker answers a successful delete with a plain 200.
        if resp.status() == StatusCode::OK {
            Ok(())
        } else {
            Err(ServiceError::Status {
                status: resp.status().as_u16(),
                url,
            })
        }
    }
}

fn handle_response<T: serde::de::DeserializeOwned>(
    resp: Response,
    url: &str,
) -> Result<T, ServiceError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ServiceError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }
    let body = resp
        .text()
        .map_err(|e| ServiceError::Decode(format!("read body: {e}")))?;
    serde_json::from_str(&body).map_err(|e| ServiceError::Decode(format!("json decode: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(base: &str) -> HttpTracker {
        HttpTracker::new(base, "secret".into(), Duration::from_secs(1)).unwrap()
    }

    #[test]
    fn trailing_slash_trimmed() {
        let t = tracker("https://tracker.example/api/issues/");
        assert_eq!(t.base_url(), "https://tracker.example/api/issues");
    }

    #[test]
    fn attachment_url_pattern() {
        let t = tracker("https://tracker.example/api/issues");
        assert_eq!(
            t.attachment_url("OPS-7", "8-1234"),
            "https://tracker.example/api/issues/OPS-7/attachments/8-1234"
        );
    }

    #[test]
    fn search_url_joins_query() {
        let t = tracker("https://tracker.example/api/issues");
        let q = IssueQuery::new(vec!["OPS".into()], 100);
        assert_eq!(
            t.search_url(&q, 200),
            "https://tracker.example/api/issues?fields=idReadable,project(name),\
             attachments(id,size,created,updated)&$top=100&$skip=200\
             &query=project:+OPS+has:+attachments"
        );
    }

    #[test]
    fn unreachable_host_is_request_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let t = tracker("http://127.0.0.1:9/api/issues");
        let err = t
            .search_issues(&IssueQuery::new(vec![], 10), 0)
            .unwrap_err();
        assert!(matches!(err, ServiceError::Request(_)), "got {err:?}");
    }
}
