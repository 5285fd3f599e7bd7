//! Shared types, error model, and configuration for the content resolver.
//!
//! This crate is the foundation depended on by all other resolver crates.
//! It provides:
//! - [`ResolverError`]: the unified error type
//! - Backend wire models ([`HomePage`], [`ContentNode`], [`TimeSeriesPage`])
//!   and the composed output ([`ComposedPage`], [`TaxonomyNode`], [`HeadlineFigure`])
//! - Configuration ([`AppConfig`], [`GatewayConfig`], [`EngineConfig`])

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BackendsConfig, EngineConfig, GatewayConfig, ServerConfig, load_config,
    load_config_from,
};
pub use error::{ResolverError, Result};
pub use types::{
    ComposedPage, ContentNode, HOME_PAGE, HeadlineFigure, HomePage, HomeSection, LatestFigure,
    Link, PageDescription, RawPage, SITE_ROOT, SeriesPoint, SparklinePoint, TAXONOMY_LANDING_PAGE,
    TaxonomyNode, TimeSeriesDescription, TimeSeriesPage,
};
