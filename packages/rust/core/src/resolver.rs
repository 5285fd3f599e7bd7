//! Entry point for a single inbound request: fetch the root document,
//! pick the resolution strategy for its page type, and run it.

use std::sync::Arc;

use tracing::{debug, instrument};

use content_resolver_gateway::BackendGateway;
use content_resolver_shared::{
    EngineConfig, HOME_PAGE, HomePage, ResolverError, Result, SITE_ROOT,
};

use crate::aggregate::AggregationEngine;
use crate::outcome::Aggregation;

/// Resolves content pages through an injected gateway.
#[derive(Clone)]
pub struct Resolver {
    gateway: Arc<dyn BackendGateway>,
    config: EngineConfig,
}

impl Resolver {
    pub fn new(gateway: Arc<dyn BackendGateway>, config: EngineConfig) -> Self {
        Self { gateway, config }
    }

    /// Resolve the page at `uri`.
    ///
    /// Fails only when the root document itself cannot be fetched or read,
    /// or when its page type has no resolver. Sub-resource failures are
    /// returned inside the [`Aggregation`].
    #[instrument(skip(self))]
    pub async fn resolve(&self, uri: &str) -> Result<Aggregation> {
        let uri = if uri.is_empty() { SITE_ROOT } else { uri };
        let raw = self.gateway.fetch_by_path(uri).await?;
        debug!(uri, page_type = %raw.page_type, "fetched root document");

        match raw.page_type.as_str() {
            HOME_PAGE => {
                let page: HomePage = serde_json::from_slice(&raw.body)
                    .map_err(|e| ResolverError::decode("resolve_home_page", uri, e))?;
                let engine = AggregationEngine::new(Arc::clone(&self.gateway), self.config.clone());
                Ok(engine.resolve(&page).await)
            }
            other => Err(ResolverError::UnsupportedPageType {
                uri: uri.to_string(),
                page_type: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubGateway, content_node};

    fn resolver(stub: StubGateway) -> Resolver {
        Resolver::new(Arc::new(stub), EngineConfig::default())
    }

    #[tokio::test]
    async fn resolves_home_page() {
        let stub = StubGateway::new()
            .page(
                "/",
                "home_page",
                serde_json::json!({
                    "uri": "/",
                    "sections": [
                        {"statistics": {"uri": "/a"}},
                        {"statistics": {"uri": "/b"}}
                    ]
                }),
            )
            .taxonomy(vec![content_node("/economy", "taxonomy_landing_page")])
            .parents(vec![])
            .series("/a")
            .series("/b");

        let result = resolver(stub).resolve("/").await.unwrap();
        assert!(result.is_complete());
        assert_eq!(result.page.headline_figures.len(), 2);
        assert_eq!(result.page.taxonomy[0].uri, "/economy");
    }

    #[tokio::test]
    async fn empty_uri_fetches_site_root() {
        let stub = StubGateway::new()
            .page("/", "home_page", serde_json::json!({"uri": "/"}))
            .taxonomy(vec![])
            .parents(vec![]);

        let result = resolver(stub).resolve("").await.unwrap();
        assert_eq!(result.page.uri, "/");
    }

    #[tokio::test]
    async fn root_fetch_failure_fails_the_request() {
        let err = resolver(StubGateway::new()).resolve("/").await.unwrap_err();
        assert!(matches!(err, ResolverError::UnexpectedStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn unsupported_page_type_is_rejected() {
        let stub = StubGateway::new().page("/about", "static_page", serde_json::json!({}));
        let err = resolver(stub).resolve("/about").await.unwrap_err();
        assert!(matches!(
            err,
            ResolverError::UnsupportedPageType { ref page_type, .. } if page_type == "static_page"
        ));
    }

    #[tokio::test]
    async fn malformed_home_page_is_a_decode_error() {
        let stub = StubGateway::new().page("/", "home_page", serde_json::json!({"sections": 3}));
        let err = resolver(stub).resolve("/").await.unwrap_err();
        assert!(matches!(
            err,
            ResolverError::Decode { operation: "resolve_home_page", .. }
        ));
    }
}
