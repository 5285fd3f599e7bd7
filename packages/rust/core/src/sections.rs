//! Section fan-out: one concurrent headline resolution per home page section.
//!
//! Every section gets its own task. Each task reports back with the index of
//! its section, and the outcome is stored in a slot reserved for that index,
//! so the completion order of the tasks never leaks into the output. Once all
//! tasks have joined, a single pass over the slots emits figures in section
//! order and collects the failures.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{debug, instrument, warn};

use content_resolver_gateway::BackendGateway;
use content_resolver_shared::{HeadlineFigure, HomeSection, ResolverError, Result};

use crate::mapper;
use crate::outcome::{SectionFailure, with_deadline};

const OPERATION: &str = "resolve_section";

/// Resolve one headline figure per section.
///
/// Returns the figures of the sections that resolved, in section order, and
/// one failure per section that did not. The two lengths always add up to
/// `sections.len()`.
#[instrument(skip_all, fields(sections = sections.len()))]
pub async fn resolve_sections(
    sections: &[HomeSection],
    gateway: &Arc<dyn BackendGateway>,
    task_timeout: Duration,
) -> (Vec<HeadlineFigure>, Vec<SectionFailure>) {
    if sections.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let mut slots: Vec<Option<Result<HeadlineFigure>>> = Vec::with_capacity(sections.len());
    slots.resize_with(sections.len(), || None);

    // Dropping the set aborts whatever is still running.
    let mut tasks = JoinSet::new();
    for (index, section) in sections.iter().enumerate() {
        let gateway = Arc::clone(gateway);
        let uri = section.statistics_uri().to_string();

        tasks.spawn(async move {
            let outcome = resolve_headline(gateway.as_ref(), &uri, task_timeout).await;
            (index, outcome)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, outcome)) => slots[index] = Some(outcome),
            // The slot stays empty and is reported during compaction.
            Err(e) => warn!(error = %e, "section task did not complete"),
        }
    }

    compact(sections, slots)
}

/// Fetch and map the time series behind a single section.
async fn resolve_headline(
    gateway: &dyn BackendGateway,
    uri: &str,
    task_timeout: Duration,
) -> Result<HeadlineFigure> {
    debug!(uri, "resolving headline figure");
    let page = with_deadline(
        OPERATION,
        uri,
        task_timeout,
        gateway.fetch_time_series(uri),
    )
    .await?;
    Ok(mapper::headline_figure(&page))
}

/// Turn the index-ordered slots into the figure list and the failure list.
fn compact(
    sections: &[HomeSection],
    slots: Vec<Option<Result<HeadlineFigure>>>,
) -> (Vec<HeadlineFigure>, Vec<SectionFailure>) {
    let mut figures = Vec::with_capacity(slots.len());
    let mut failures = Vec::new();

    for (index, (section, slot)) in sections.iter().zip(slots).enumerate() {
        let uri = section.statistics_uri();
        let outcome = slot.unwrap_or_else(|| {
            Err(ResolverError::Task {
                operation: OPERATION,
                uri: uri.to_string(),
                message: "task ended without reporting a result".into(),
            })
        });

        match outcome {
            Ok(figure) => figures.push(figure),
            Err(error) => {
                warn!(index, uri, error = %error, "section failed");
                failures.push(SectionFailure {
                    index,
                    uri: uri.to_string(),
                    error,
                });
            }
        }
    }

    (figures, failures)
}
