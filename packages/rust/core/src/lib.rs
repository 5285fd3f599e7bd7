//! Content aggregation for the resolver.
//!
//! This crate turns a fetched root document into a composed page:
//! - [`resolver`]: page-type dispatch for one inbound request
//! - [`aggregate`]: concurrent taxonomy / breadcrumb / section resolution
//! - [`sections`]: per-section headline fan-out
//! - [`mapper`]: backend payload → page model mappings

pub mod aggregate;
pub mod mapper;
pub mod outcome;
pub mod resolver;
pub mod sections;

#[cfg(test)]
mod testing;

pub use aggregate::AggregationEngine;
pub use outcome::{Aggregation, AggregationError, SectionFailure};
pub use resolver::Resolver;
pub use sections::resolve_sections;
