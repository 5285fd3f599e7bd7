//! Backend gateway: the seam between the aggregation engine and the
//! content and statistics services.
//!
//! This crate provides:
//! - [`BackendGateway`]: the four backend operations the engine consumes
//! - [`ZebedeeClient`] / [`BabbageClient`]: reqwest clients for each backend
//! - [`HttpGateway`]: the production gateway composing both clients

mod babbage;
mod http;
mod zebedee;

use async_trait::async_trait;

use content_resolver_shared::{ContentNode, GatewayConfig, RawPage, Result, TimeSeriesPage};

pub use babbage::BabbageClient;
pub use http::{REQUEST_ID_HEADER, outbound_request_id};
pub use zebedee::{PAGE_TYPE_HEADER, ZebedeeClient};

/// Operations the resolver needs from its backends.
#[async_trait]
pub trait BackendGateway: Send + Sync {
    /// Fetch a document by path, along with its page type tag.
    async fn fetch_by_path(&self, path: &str) -> Result<RawPage>;

    /// Fetch the taxonomy tree below `path`, `depth` levels deep.
    async fn fetch_taxonomy(&self, path: &str, depth: u32) -> Result<Vec<ContentNode>>;

    /// Fetch the ancestors of `path`, root first.
    async fn fetch_parents(&self, path: &str) -> Result<Vec<ContentNode>>;

    /// Fetch the time series at `path`.
    async fn fetch_time_series(&self, path: &str) -> Result<TimeSeriesPage>;
}

/// Gateway backed by the real HTTP services.
///
/// Time series come from babbage when one is configured and from zebedee
/// otherwise.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    zebedee: ZebedeeClient,
    babbage: Option<BabbageClient>,
}

impl HttpGateway {
    /// Build the gateway and its HTTP clients from runtime config.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let client = http::build_client(config.request_timeout)?;
        let zebedee = ZebedeeClient::with_client(client.clone(), config.zebedee_url.clone());
        let babbage = config
            .babbage_url
            .clone()
            .map(|url| BabbageClient::with_client(client, url));

        Ok(Self { zebedee, babbage })
    }

    /// A copy of this gateway whose calls carry `request_id`.
    pub fn with_request_id(&self, request_id: &str) -> Self {
        Self {
            zebedee: self.zebedee.with_request_id(request_id),
            babbage: self.babbage.as_ref().map(|b| b.with_request_id(request_id)),
        }
    }
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn fetch_by_path(&self, path: &str) -> Result<RawPage> {
        self.zebedee.get_data(path).await
    }

    async fn fetch_taxonomy(&self, path: &str, depth: u32) -> Result<Vec<ContentNode>> {
        self.zebedee.get_taxonomy(path, depth).await
    }

    async fn fetch_parents(&self, path: &str) -> Result<Vec<ContentNode>> {
        self.zebedee.get_parents(path).await
    }

    async fn fetch_time_series(&self, path: &str) -> Result<TimeSeriesPage> {
        match &self.babbage {
            Some(babbage) => babbage.get_time_series(path).await,
            None => self.zebedee.get_time_series(path).await,
        }
    }
}
