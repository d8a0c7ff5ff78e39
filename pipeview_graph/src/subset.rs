use std::collections::HashSet;

use crate::edge::DependencyEdge;
use crate::error::GraphError;
use crate::node::NodeDef;
use crate::validate::validate_graph;
use crate::PipelineGraph;

/// Reduce a graph to the named nodes.
///
/// An absent or empty selection returns the full graph unchanged. Names not
/// present in the graph fail the whole request; nothing is dropped
/// silently, and the missing names are reported in input order.
///
/// The subset retains exactly the selected nodes. Dependency edges arriving
/// from unselected nodes are cut at the boundary, which turns the fed input
/// into an unfed one: its type must then be loadable, or revalidation fails
/// the same way a freshly authored graph with that input would. Callers
/// wanting upstream producers included name them in the selection.
pub fn subset(
    graph: &PipelineGraph,
    selection: Option<&[String]>,
) -> Result<PipelineGraph, GraphError> {
    let selection = match selection {
        None => return Ok(graph.clone()),
        Some(s) if s.is_empty() => return Ok(graph.clone()),
        Some(s) => s,
    };

    let mut missing: Vec<String> = vec![];
    for name in selection {
        if !graph.has_node(name) && !missing.contains(name) {
            missing.push(name.clone());
        }
    }
    if !missing.is_empty() {
        return Err(GraphError::NoQualifiedNodes {
            pipeline: graph.name().to_string(),
            selection: selection.to_vec(),
            missing,
        });
    }

    let retained: HashSet<&str> = selection.iter().map(String::as_str).collect();

    // induced nodes and edges, both in the original graph's order
    let nodes: Vec<NodeDef> = graph
        .nodes()
        .iter()
        .filter(|n| retained.contains(n.name.as_str()))
        .cloned()
        .collect();
    let edges: Vec<DependencyEdge> = graph
        .edges()
        .iter()
        .filter(|e| {
            retained.contains(e.upstream_node.as_str())
                && retained.contains(e.downstream_node.as_str())
        })
        .cloned()
        .collect();

    validate_graph(graph.name(), &nodes, &edges).map_err(|source| GraphError::InvalidSubset {
        pipeline: graph.name().to_string(),
        selection: selection.to_vec(),
        source: Box::new(source),
    })?;

    Ok(PipelineGraph::from_parts(
        graph.name().to_string(),
        graph.description().map(str::to_string),
        graph.tags().clone(),
        nodes,
        edges,
    ))
}
