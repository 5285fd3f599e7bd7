//! Failure records accumulated while a page is being aggregated.

use std::future::Future;
use std::time::Duration;

use content_resolver_shared::{ComposedPage, ResolverError, Result};

/// A section whose headline could not be resolved.
#[derive(Debug)]
pub struct SectionFailure {
    /// Position of the section in the root document.
    pub index: usize,
    /// Statistics URI the section points at.
    pub uri: String,
    pub error: ResolverError,
}

/// A sub-resolution that failed without failing the page.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("taxonomy resolution failed: {0}")]
    Taxonomy(ResolverError),

    #[error("breadcrumb resolution failed: {0}")]
    Breadcrumb(ResolverError),

    #[error("section {index} ({uri}) failed: {error}")]
    Section {
        index: usize,
        uri: String,
        error: ResolverError,
    },
}

impl From<SectionFailure> for AggregationError {
    fn from(failure: SectionFailure) -> Self {
        Self::Section {
            index: failure.index,
            uri: failure.uri,
            error: failure.error,
        }
    }
}

impl AggregationError {
    /// Short tag naming the sub-resolution that failed.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Taxonomy(_) => "taxonomy",
            Self::Breadcrumb(_) => "breadcrumb",
            Self::Section { .. } => "section",
        }
    }

    /// The underlying cause.
    pub fn cause(&self) -> &ResolverError {
        match self {
            Self::Taxonomy(e) | Self::Breadcrumb(e) => e,
            Self::Section { error, .. } => error,
        }
    }
}

/// A composed page plus every failure met while building it.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub page: ComposedPage,
    pub errors: Vec<AggregationError>,
}

impl Aggregation {
    /// Whether every sub-resolution succeeded.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Bound `fut` by `after`, reporting expiry as a [`ResolverError::Timeout`].
pub(crate) async fn with_deadline<T>(
    operation: &'static str,
    uri: &str,
    after: Duration,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::time::timeout(after, fut)
        .await
        .unwrap_or_else(|_| {
            Err(ResolverError::Timeout {
                operation,
                uri: uri.to_string(),
                after,
            })
        })
}
