//! Home page aggregation engine.
//!
//! Resolves taxonomy, breadcrumb and section headlines concurrently and
//! assembles them into one [`ComposedPage`]. A failing sub-resolution leaves
//! its part of the page empty and is recorded in [`Aggregation::errors`];
//! nothing inside the engine fails the page as a whole.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use content_resolver_gateway::BackendGateway;
use content_resolver_shared::{
    ComposedPage, EngineConfig, HeadlineFigure, HomePage, HomeSection, Result, SITE_ROOT,
    TaxonomyNode,
};

use crate::mapper;
use crate::outcome::{Aggregation, AggregationError, SectionFailure, with_deadline};
use crate::sections;

/// Concurrent resolver for home page sub-resources.
#[derive(Clone)]
pub struct AggregationEngine {
    gateway: Arc<dyn BackendGateway>,
    config: EngineConfig,
}

impl AggregationEngine {
    pub fn new(gateway: Arc<dyn BackendGateway>, config: EngineConfig) -> Self {
        Self { gateway, config }
    }

    /// Resolve every sub-resource of `root` and compose the page.
    ///
    /// Waits for the taxonomy, the breadcrumb and every section before
    /// returning, whatever fails along the way.
    #[instrument(skip_all, fields(uri = %root.uri, sections = root.sections.len()))]
    pub async fn resolve(&self, root: &HomePage) -> Aggregation {
        let uri = if root.uri.is_empty() {
            SITE_ROOT
        } else {
            root.uri.as_str()
        };

        let (taxonomy, breadcrumb, (headline_figures, section_failures)) = tokio::join!(
            self.resolve_taxonomy(uri),
            self.resolve_breadcrumb(uri),
            self.resolve_sections(&root.sections),
        );

        let mut errors = Vec::new();
        let taxonomy = taxonomy.unwrap_or_else(|e| {
            warn!(uri, error = %e, "taxonomy resolution failed");
            errors.push(AggregationError::Taxonomy(e));
            Vec::new()
        });
        let breadcrumb = breadcrumb.unwrap_or_else(|e| {
            warn!(uri, error = %e, "breadcrumb resolution failed");
            errors.push(AggregationError::Breadcrumb(e));
            Vec::new()
        });
        errors.extend(section_failures.into_iter().map(AggregationError::from));

        info!(
            uri,
            taxonomy = taxonomy.len(),
            breadcrumb = breadcrumb.len(),
            headline_figures = headline_figures.len(),
            errors = errors.len(),
            "home page aggregated"
        );

        Aggregation {
            page: ComposedPage {
                uri: uri.to_string(),
                taxonomy,
                breadcrumb,
                headline_figures,
            },
            errors,
        }
    }

    /// Resolve one headline figure per section; see [`sections::resolve_sections`].
    pub async fn resolve_sections(
        &self,
        sections: &[HomeSection],
    ) -> (Vec<HeadlineFigure>, Vec<SectionFailure>) {
        sections::resolve_sections(sections, &self.gateway, self.config.task_timeout).await
    }

    async fn resolve_taxonomy(&self, uri: &str) -> Result<Vec<TaxonomyNode>> {
        let nodes = with_deadline(
            "resolve_taxonomy",
            uri,
            self.config.task_timeout,
            self.gateway.fetch_taxonomy(uri, self.config.taxonomy_depth),
        )
        .await?;
        Ok(mapper::taxonomy_landing_nodes(&nodes))
    }

    async fn resolve_breadcrumb(&self, uri: &str) -> Result<Vec<TaxonomyNode>> {
        let nodes = with_deadline(
            "resolve_breadcrumb",
            uri,
            self.config.task_timeout,
            self.gateway.fetch_parents(uri),
        )
        .await?;
        Ok(mapper::node_list(&nodes))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::testing::{StubGateway, content_node};
    use content_resolver_shared::{Link, ResolverError};

    fn home_page(uri: &str, stats: &[&str]) -> HomePage {
        HomePage {
            uri: uri.into(),
            sections: stats
                .iter()
                .map(|s| HomeSection {
                    statistics: Link { uri: s.to_string() },
                })
                .collect(),
            ..Default::default()
        }
    }

    fn engine(stub: StubGateway) -> AggregationEngine {
        AggregationEngine::new(Arc::new(stub), EngineConfig::default())
    }

    #[tokio::test]
    async fn end_to_end_with_one_failing_section() {
        let stub = StubGateway::new()
            .taxonomy(vec![content_node("/economy/inflation", "taxonomy_landing_page")])
            .parents(vec![content_node("/", "home_page")])
            .series("/a")
            .series("/c");

        let result = engine(stub).resolve(&home_page("/economy", &["/a", "/b", "/c"])).await;

        let page = &result.page;
        assert_eq!(page.uri, "/economy");
        let uris: Vec<_> = page.headline_figures.iter().map(|f| f.uri.as_str()).collect();
        assert_eq!(uris, ["/a", "/c"]);
        assert_eq!(page.taxonomy.len(), 1);
        assert_eq!(page.breadcrumb.len(), 1);

        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            &result.errors[0],
            AggregationError::Section { uri, error: ResolverError::UnexpectedStatus { status: 500, .. }, .. }
                if uri == "/b"
        ));
    }

    #[tokio::test]
    async fn taxonomy_failure_is_isolated() {
        let stub = StubGateway::new()
            .parents(vec![content_node("/", "home_page")])
            .series("/a");

        let result = engine(stub).resolve(&home_page("/", &["/a"])).await;

        assert!(result.page.taxonomy.is_empty());
        assert_eq!(result.page.breadcrumb.len(), 1);
        assert_eq!(result.page.headline_figures.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].kind(), "taxonomy");
    }

    #[tokio::test]
    async fn breadcrumb_failure_is_isolated() {
        let stub = StubGateway::new()
            .taxonomy(vec![content_node("/economy", "taxonomy_landing_page")])
            .series("/a");

        let result = engine(stub).resolve(&home_page("/", &["/a"])).await;

        assert_eq!(result.page.taxonomy.len(), 1);
        assert!(result.page.breadcrumb.is_empty());
        assert_eq!(result.page.headline_figures.len(), 1);
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(result.errors[0], AggregationError::Breadcrumb(_)));
    }

    #[tokio::test]
    async fn everything_failing_still_yields_a_page() {
        let result = engine(StubGateway::new())
            .resolve(&home_page("/", &["/a", "/b"]))
            .await;

        assert_eq!(result.page.uri, "/");
        assert!(result.page.taxonomy.is_empty());
        assert!(result.page.breadcrumb.is_empty());
        assert!(result.page.headline_figures.is_empty());
        let kinds: Vec<_> = result.errors.iter().map(AggregationError::kind).collect();
        assert_eq!(kinds, ["taxonomy", "breadcrumb", "section", "section"]);
    }

    #[tokio::test]
    async fn empty_uri_defaults_to_site_root() {
        let stub = StubGateway::new().taxonomy(vec![]).parents(vec![]);
        let result = engine(stub).resolve(&home_page("", &[])).await;
        assert_eq!(result.page.uri, SITE_ROOT);
        assert!(result.is_complete());
    }

    #[tokio::test]
    async fn taxonomy_keeps_only_landing_nodes() {
        let stub = StubGateway::new()
            .taxonomy(vec![
                content_node("/economy", "taxonomy_landing_page"),
                content_node("/releasecalendar", "release_calendar"),
                content_node("/people", "taxonomy_landing_page"),
            ])
            .parents(vec![content_node("/a", "product_page"), content_node("/b", "static_page")]);

        let result = engine(stub).resolve(&home_page("/", &[])).await;

        let taxonomy: Vec<_> = result.page.taxonomy.iter().map(|n| n.uri.as_str()).collect();
        assert_eq!(taxonomy, ["/economy", "/people"]);
        // Breadcrumb is not filtered.
        assert_eq!(result.page.breadcrumb.len(), 2);
    }

    #[tokio::test]
    async fn sub_resolutions_run_concurrently() {
        let delay = Duration::from_millis(200);
        let stub = StubGateway::new()
            .taxonomy(vec![])
            .parents(vec![])
            .series("/a")
            .series("/b")
            .delay("taxonomy", delay)
            .delay("parents", delay)
            .delay("/a", delay)
            .delay("/b", delay);

        let started = Instant::now();
        let result = engine(stub).resolve(&home_page("/", &["/a", "/b"])).await;
        let elapsed = started.elapsed();

        assert!(result.is_complete());
        assert_eq!(result.page.headline_figures.len(), 2);
        // Running any two of these one after the other takes two delays.
        assert!(elapsed < delay * 2, "took {elapsed:?}");
    }
}
