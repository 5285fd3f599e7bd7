//! Pure mappings from backend payloads to composed-page models.

use content_resolver_shared::{
    ContentNode, HeadlineFigure, LatestFigure, SparklinePoint, TaxonomyNode, TimeSeriesPage,
};

/// Recursively convert a content node and all its descendants.
pub fn taxonomy_node(node: &ContentNode) -> TaxonomyNode {
    TaxonomyNode {
        title: node.description.title.clone(),
        uri: node.uri.clone(),
        children: node.children.iter().map(taxonomy_node).collect(),
    }
}

/// Convert every node, keeping order. Used for the breadcrumb.
pub fn node_list(nodes: &[ContentNode]) -> Vec<TaxonomyNode> {
    nodes.iter().map(taxonomy_node).collect()
}

/// Keep only taxonomy landing nodes.
///
/// Every node is judged on its own page type: a node that is not a landing
/// page is left out, and any landing pages below it take its place in the
/// list. Relative order is preserved.
pub fn taxonomy_landing_nodes(nodes: &[ContentNode]) -> Vec<TaxonomyNode> {
    let mut out = Vec::new();
    collect_landing(nodes, &mut out);
    out
}

fn collect_landing(nodes: &[ContentNode], out: &mut Vec<TaxonomyNode>) {
    for node in nodes {
        if node.is_taxonomy_landing() {
            let mut children = Vec::new();
            collect_landing(&node.children, &mut children);
            out.push(TaxonomyNode {
                title: node.description.title.clone(),
                uri: node.uri.clone(),
                children,
            });
        } else {
            collect_landing(&node.children, out);
        }
    }
}

/// Project a time series onto a headline figure.
pub fn headline_figure(page: &TimeSeriesPage) -> HeadlineFigure {
    HeadlineFigure {
        title: page.description.title.clone(),
        uri: page.uri.clone(),
        release_date: page.description.release_date.clone(),
        latest_figure: LatestFigure {
            unit: page.description.unit.clone(),
            pre_unit: page.description.pre_unit.clone(),
            figure: page.description.number.clone(),
        },
        sparkline_data: page
            .series
            .iter()
            .map(|point| SparklinePoint {
                name: point.name.clone(),
                string_y: point.string_value.clone(),
                y: point.numeric_value,
            })
            .collect(),
    }
}
