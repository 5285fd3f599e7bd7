//! Stub gateway shared by the engine tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use content_resolver_gateway::BackendGateway;
use content_resolver_shared::{
    ContentNode, PageDescription, RawPage, ResolverError, Result, SeriesPoint,
    TimeSeriesDescription, TimeSeriesPage,
};

/// In-memory gateway. Unknown paths answer with a 500.
#[derive(Default)]
pub(crate) struct StubGateway {
    pages: HashMap<String, RawPage>,
    taxonomy: Option<Vec<ContentNode>>,
    parents: Option<Vec<ContentNode>>,
    series: HashMap<String, TimeSeriesPage>,
    delays: HashMap<String, Duration>,
    pub calls: AtomicUsize,
    finished: Mutex<Vec<String>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, path: &str, page_type: &str, body: serde_json::Value) -> Self {
        let raw = RawPage {
            body: body.to_string().into_bytes(),
            page_type: page_type.into(),
        };
        self.pages.insert(path.into(), raw);
        self
    }

    pub fn taxonomy(mut self, nodes: Vec<ContentNode>) -> Self {
        self.taxonomy = Some(nodes);
        self
    }

    pub fn parents(mut self, nodes: Vec<ContentNode>) -> Self {
        self.parents = Some(nodes);
        self
    }

    pub fn series(mut self, path: &str) -> Self {
        self.series.insert(path.into(), series_page(path));
        self
    }

    /// Delay every call for `path` (or `"taxonomy"` / `"parents"`).
    pub fn delay(mut self, key: &str, by: Duration) -> Self {
        self.delays.insert(key.into(), by);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Keys of the calls that have returned, in the order they returned.
    pub fn finished(&self) -> Vec<String> {
        self.finished.lock().unwrap().clone()
    }

    async fn enter(&self, key: &str) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        self.finished.lock().unwrap().push(key.to_string());
    }
}

fn server_error(uri: &str) -> ResolverError {
    ResolverError::UnexpectedStatus {
        uri: uri.into(),
        status: 500,
    }
}

#[async_trait]
impl BackendGateway for StubGateway {
    async fn fetch_by_path(&self, path: &str) -> Result<RawPage> {
        self.enter(path).await;
        self.pages.get(path).cloned().ok_or_else(|| server_error(path))
    }

    async fn fetch_taxonomy(&self, path: &str, _depth: u32) -> Result<Vec<ContentNode>> {
        self.enter("taxonomy").await;
        self.taxonomy.clone().ok_or_else(|| server_error(path))
    }

    async fn fetch_parents(&self, path: &str) -> Result<Vec<ContentNode>> {
        self.enter("parents").await;
        self.parents.clone().ok_or_else(|| server_error(path))
    }

    async fn fetch_time_series(&self, path: &str) -> Result<TimeSeriesPage> {
        self.enter(path).await;
        self.series.get(path).cloned().ok_or_else(|| server_error(path))
    }
}

pub(crate) fn series_page(uri: &str) -> TimeSeriesPage {
    TimeSeriesPage {
        uri: uri.into(),
        description: TimeSeriesDescription {
            title: format!("series {uri}"),
            release_date: "2016-10-18".into(),
            unit: "%".into(),
            pre_unit: String::new(),
            number: "1.0".into(),
        },
        series: vec![SeriesPoint {
            name: "2016 SEP".into(),
            string_value: "1.0".into(),
            numeric_value: 1.0,
        }],
    }
}

pub(crate) fn content_node(uri: &str, page_type: &str) -> ContentNode {
    ContentNode {
        uri: uri.into(),
        page_type: Some(page_type.into()),
        description: PageDescription {
            title: format!("title of {uri}"),
            ..Default::default()
        },
        children: vec![],
    }
}
