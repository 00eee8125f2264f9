//! Page fetching: one HTTP GET per (query, page) against the place search API
//!
//! The fetcher performs no retries and never panics on a bad response; every
//! failure path resolves to a `FetchError` so the orchestrator can count the
//! page as skipped and move on. Retry policy, if the caller wants one, lives
//! above this layer.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use url::Url;

use crate::credentials::CredentialProvider;
use crate::harvest_engine::types::{FetchError, PageResult, PlaceRecord};

/// Fetches one page of results for a query.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Issues exactly one outbound request for `(query, page)`.
    ///
    /// An absent or empty record collection in the response is the source's
    /// natural end-of-data signal and comes back as an empty `PageResult`,
    /// not an error.
    async fn fetch_page(&self, query: &str, page: u32) -> Result<PageResult, FetchError>;
}

/// Wire shape of a page response: `{"data": {"pois": [...]}}`.
///
/// Both levels are optional because the API omits them once a query's result
/// set is exhausted.
#[derive(Debug, Deserialize)]
struct PlacePayload {
    #[serde(default)]
    data: Option<PayloadData>,
}

#[derive(Debug, Deserialize)]
struct PayloadData {
    #[serde(default)]
    pois: Option<Vec<PlaceRecord>>,
}

/// `PageFetcher` backed by a reqwest client.
pub struct HttpPageFetcher {
    client: reqwest::Client,
    endpoint: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpPageFetcher {
    /// Builds a fetcher with a per-request timeout. A page that times out is
    /// an ordinary skipped page, not a stalled run.
    pub fn new(
        endpoint: Url,
        credentials: Arc<dyn CredentialProvider>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            credentials,
        })
    }

    fn page_url(&self, query: &str, page: u32) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page.to_string());
        url
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<PageResult, FetchError> {
        let url = self.page_url(query, page);
        debug!("fetching {url}");

        let response = self
            .client
            .get(url)
            .headers(self.credentials.headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let payload: PlacePayload = response.json().await?;
        let records = payload.data.and_then(|data| data.pois).unwrap_or_default();
        if records.is_empty() {
            debug!("{query}: page {page} returned no places (end of data)");
        }
        Ok(PageResult::new(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_url_carries_query_and_page_number() {
        struct NoHeaders;
        impl CredentialProvider for NoHeaders {
            fn headers(&self) -> reqwest::header::HeaderMap {
                reqwest::header::HeaderMap::new()
            }
        }

        let fetcher = HttpPageFetcher::new(
            Url::parse("https://example.com/ajax/statuses/place").unwrap(),
            Arc::new(NoHeaders),
            Duration::from_secs(5),
        )
        .unwrap();

        let url = fetcher.page_url("上海", 7);
        assert_eq!(
            url.as_str(),
            "https://example.com/ajax/statuses/place?q=%E4%B8%8A%E6%B5%B7&page=7"
        );
    }
}
