//! Client for the babbage statistics service.

use std::time::Duration;

use reqwest::Client;
use tracing::instrument;
use url::Url;

use content_resolver_shared::{Result, TimeSeriesPage};

use crate::http::{self, build_client, endpoint};

/// HTTP client for time series served by the statistics backend.
#[derive(Debug, Clone)]
pub struct BabbageClient {
    client: Client,
    base_url: Url,
    request_id: Option<String>,
}

impl BabbageClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(build_client(timeout)?, base_url))
    }

    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self {
            client,
            base_url,
            request_id: None,
        }
    }

    pub fn with_request_id(&self, request_id: impl Into<String>) -> Self {
        Self {
            request_id: Some(request_id.into()),
            ..self.clone()
        }
    }

    /// `GET {uri}/data`
    #[instrument(skip(self))]
    pub async fn get_time_series(&self, uri: &str) -> Result<TimeSeriesPage> {
        let resource = format!("{}/data", uri.trim_end_matches('/'));
        let (body, _) = http::get(
            &self.client,
            endpoint(&self.base_url, &resource),
            &[],
            uri,
            self.request_id.as_deref(),
        )
        .await?;

        http::decode("fetch_time_series", uri, &body)
    }
}
