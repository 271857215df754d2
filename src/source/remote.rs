//! Remote QueryFeed source.
//!
//! Posts the requested page number and size to
//! `{base}/api/developer/QueryFeed` with the static `DeveloperKey` header and
//! parses the body as a [`PageResponse`].  The endpoint paginates; nothing is
//! sliced locally.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

use super::{FeedSource, PageRequest, PageResponse};
use crate::error::{Result, SourceError};

const QUERY_FEED_PATH: &str = "/api/developer/QueryFeed";

/// A feed served by the QueryFeed HTTP API.
pub struct RemoteSource {
    /// Base URL of the API, without the endpoint path.  `None` when the
    /// deployment did not supply one.
    base_url: Option<String>,
    developer_key: String,
    client: Client,
}

impl RemoteSource {
    /// Create a remote source.
    ///
    /// * `base_url`: e.g. `https://api.example.com`.
    /// * `developer_key`: sent verbatim as the `DeveloperKey` header.
    /// * `timeout`: per-request limit; `None` waits indefinitely.
    pub fn new(
        base_url: Option<String>,
        developer_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            developer_key: developer_key.into(),
            client,
        })
    }

    /// Full endpoint URL, or `None` when no base URL is configured.
    pub fn endpoint(&self) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}{QUERY_FEED_PATH}", base.trim_end_matches('/')))
    }
}

impl FeedSource for RemoteSource {
    fn name(&self) -> &str {
        "API"
    }

    fn fetch_page(&self, request: PageRequest) -> Result<PageResponse> {
        let url = self
            .endpoint()
            .ok_or(SourceError::Unconfigured { what: "API base URL" })?;
        debug!(%url, page = request.page_number, size = request.page_size, "requesting feed page");

        let response = self
            .client
            .post(&url)
            .header("DeveloperKey", &self.developer_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .map(String::from)
                .unwrap_or_else(|| status.as_str().to_string());
            warn!(status = status.as_u16(), %reason, "feed request rejected");
            return Err(SourceError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let body = response.text()?;
        let page: PageResponse = serde_json::from_str(&body)?;
        debug!(
            page = page.page_number,
            size = page.page_size,
            items = page.items.len(),
            total = page.total_items,
            "feed page received"
        );
        Ok(page)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn source_for(server: &MockServer) -> RemoteSource {
        RemoteSource::new(Some(server.base_url()), "secret-key", None).unwrap()
    }

    #[test]
    fn posts_page_request_with_developer_key() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/developer/QueryFeed")
                .header("DeveloperKey", "secret-key")
                .header("Content-Type", "application/json")
                .json_body(json!({"pageNumber": 2, "pageSize": 25}));
            then.status(200).json_body(json!({
                "TotalItems": 60,
                "PageNumber": 2,
                "PageSize": 25,
                "Items": [
                    {"Record Id": "r-26", "Acquirer Company": "Acme"},
                    {"Record Id": "r-27", "Acquirer Company": "Globex"}
                ]
            }));
        });

        let page = source_for(&server)
            .fetch_page(PageRequest::new(2, 25))
            .unwrap();

        mock.assert();
        assert_eq!(page.total_items, 60);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].get("Record Id"), Some(&json!("r-26")));
    }

    #[test]
    fn non_success_status_surfaces_reason() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/developer/QueryFeed");
            then.status(401).body("nope");
        });

        let err = source_for(&server)
            .fetch_page(PageRequest::new(1, 50))
            .unwrap_err();

        assert!(matches!(err, SourceError::Status { status: 401, .. }));
        assert_eq!(err.to_string(), "API request failed: Unauthorized");
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/developer/QueryFeed");
            then.status(200).body("<html>maintenance</html>");
        });

        let err = source_for(&server)
            .fetch_page(PageRequest::new(1, 50))
            .unwrap_err();

        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn missing_base_url_is_unconfigured() {
        let src = RemoteSource::new(None, "", None).unwrap();
        let err = src.fetch_page(PageRequest::new(1, 50)).unwrap_err();
        assert!(matches!(err, SourceError::Unconfigured { .. }));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let src = RemoteSource::new(Some("https://api.example.com/".into()), "", None).unwrap();
        assert_eq!(
            src.endpoint().as_deref(),
            Some("https://api.example.com/api/developer/QueryFeed")
        );
    }

    #[test]
    fn name_is_api() {
        let src = RemoteSource::new(None, "", None).unwrap();
        assert_eq!(src.name(), "API");
    }
}
