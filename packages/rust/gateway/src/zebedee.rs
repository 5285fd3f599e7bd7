//! Client for the zebedee content service.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use content_resolver_shared::{ContentNode, RawPage, Result, TimeSeriesPage};

use crate::http::{self, build_client, endpoint};

/// Response header carrying the page type of a `/data` document.
pub const PAGE_TYPE_HEADER: &str = "ONS-Page-Type";

/// HTTP client for the content service endpoints.
#[derive(Debug, Clone)]
pub struct ZebedeeClient {
    client: Client,
    base_url: Url,
    request_id: Option<String>,
}

impl ZebedeeClient {
    /// Create a client for `base_url` with the given transport timeout.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(build_client(timeout)?, base_url))
    }

    /// Create a client that shares an existing connection pool.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            request_id: None,
        }
    }

    /// A copy of this client that tags its calls with `request_id`.
    pub fn with_request_id(&self, request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            ..self.clone()
        }
    }

    /// `GET /data?uri=…`: raw page body and its page type.
    #[instrument(skip(self))]
    pub async fn get_data(&self, uri: &str) -> Result<RawPage> {
        let (body, headers) = http::get(
            &self.client,
            endpoint(&self.base_url, "data"),
            &[("uri", uri)],
            uri,
            self.request_id.as_deref(),
        )
        .await?;

        let page_type = headers
            .get(PAGE_TYPE_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        debug!(uri, page_type = %page_type, "identified page type");

        Ok(RawPage { body, page_type })
    }

    /// `GET /taxonomy?uri=…&depth=…`
    #[instrument(skip(self))]
    pub async fn get_taxonomy(&self, uri: &str, depth: u32) -> Result<Vec<ContentNode>> {
        let depth = depth.to_string();
        let (body, _) = http::get(
            &self.client,
            endpoint(&self.base_url, "taxonomy"),
            &[("uri", uri), ("depth", depth.as_str())],
            uri,
            self.request_id.as_deref(),
        )
        .await?;

        http::decode("fetch_taxonomy", uri, &body)
    }

    /// `GET /parents?uri=…`
    #[instrument(skip(self))]
    pub async fn get_parents(&self, uri: &str) -> Result<Vec<ContentNode>> {
        let (body, _) = http::get(
            &self.client,
            endpoint(&self.base_url, "parents"),
            &[("uri", uri)],
            uri,
            self.request_id.as_deref(),
        )
        .await?;

        http::decode("fetch_parents", uri, &body)
    }

    /// `GET /data?uri=…&series=1`
    #[instrument(skip(self))]
    pub async fn get_time_series(&self, uri: &str) -> Result<TimeSeriesPage> {
        let (body, _) = http::get(
            &self.client,
            endpoint(&self.base_url, "data"),
            &[("uri", uri), ("series", "1")],
            uri,
            self.request_id.as_deref(),
        )
        .await?;

        http::decode("fetch_time_series", uri, &body)
    }
}
