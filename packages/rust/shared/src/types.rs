//! Wire models read from the backends and the composed page written to callers.

use serde::{Deserialize, Deserializer, Serialize};

/// Page type tag of the site home page.
pub const HOME_PAGE: &str = "home_page";

/// Page type tag of taxonomy landing nodes.
pub const TAXONOMY_LANDING_PAGE: &str = "taxonomy_landing_page";

/// URI substituted when a root document arrives without one.
pub const SITE_ROOT: &str = "/";

// ---------------------------------------------------------------------------
// Backend models
// ---------------------------------------------------------------------------

/// Decode an explicit `null` as the field's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Common description block of content pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageDescription {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub keywords: Vec<String>,
}

/// A node of the content tree as returned by the taxonomy and parents endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    pub uri: String,
    /// Page type of the node, when the backend reports one.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: PageDescription,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    /// Whether this node is a taxonomy landing page.
    pub fn is_taxonomy_landing(&self) -> bool {
        self.page_type.as_deref() == Some(TAXONOMY_LANDING_PAGE)
    }
}

/// Reference from a home page section to another resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
}

/// One section of the home page, pointing at a statistics resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomeSection {
    #[serde(default, deserialize_with = "null_as_default")]
    pub statistics: Link,
}

impl HomeSection {
    /// URI of the time series backing this section.
    pub fn statistics_uri(&self) -> &str {
        &self.statistics.uri
    }
}

/// The home page document as served by the content backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HomePage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: PageDescription,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sections: Vec<HomeSection>,
}

/// Description block of a time series page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesDescription {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unit: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pre_unit: String,
    /// Latest value, as formatted by the backend.
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: String,
}

/// A single observation of a time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub string_value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub numeric_value: f64,
}

/// A time series resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: TimeSeriesDescription,
    #[serde(default, deserialize_with = "null_as_default")]
    pub series: Vec<SeriesPoint>,
}

/// Raw root document plus the page type reported alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPage {
    pub body: Vec<u8>,
    pub page_type: String,
}

// ---------------------------------------------------------------------------
// Composed page models
// ---------------------------------------------------------------------------

/// Navigation node used for taxonomy and breadcrumb lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyNode {
    pub title: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaxonomyNode>,
}

/// Latest value of a headline figure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestFigure {
    pub unit: String,
    pub pre_unit: String,
    pub figure: String,
}

/// One point of a headline figure sparkline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparklinePoint {
    pub name: String,
    pub string_y: String,
    pub y: f64,
}

/// Display-ready projection of a time series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlineFigure {
    pub title: String,
    pub uri: String,
    pub release_date: String,
    pub latest_figure: LatestFigure,
    pub sparkline_data: Vec<SparklinePoint>,
}

/// The resolved home page handed to the renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposedPage {
    pub uri: String,
    pub taxonomy: Vec<TaxonomyNode>,
    pub breadcrumb: Vec<TaxonomyNode>,
    pub headline_figures: Vec<HeadlineFigure>,
}
