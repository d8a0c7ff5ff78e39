use std::collections::{HashMap, HashSet};

use crate::edge::DependencyEdge;
use crate::error::GraphError;
use crate::node::NodeDef;

/// Validate a node/edge set as a standalone pipeline graph.
///
/// Runs for freshly authored graphs and for subsets alike; there is no
/// special-casing for where the parts came from. Checks run in a fixed
/// order and the first failure wins, so identical inputs report identical
/// errors.
pub(crate) fn validate_graph(
    pipeline: &str,
    nodes: &[NodeDef],
    edges: &[DependencyEdge],
) -> Result<(), GraphError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for node in nodes {
        if !seen.insert(&node.name) {
            return Err(GraphError::DuplicateNode {
                pipeline: pipeline.to_string(),
                node: node.name.clone(),
            });
        }
    }

    let by_name: HashMap<&str, &NodeDef> =
        HashMap::from_iter(nodes.iter().map(|n| (n.name.as_str(), n)));

    for edge in edges {
        let upstream = by_name.get(edge.upstream_node.as_str()).ok_or_else(|| {
            GraphError::UnknownNode {
                pipeline: pipeline.to_string(),
                node: edge.upstream_node.clone(),
            }
        })?;
        let downstream = by_name.get(edge.downstream_node.as_str()).ok_or_else(|| {
            GraphError::UnknownNode {
                pipeline: pipeline.to_string(),
                node: edge.downstream_node.clone(),
            }
        })?;

        let output = upstream.get_output(&edge.upstream_output).ok_or_else(|| {
            GraphError::UnknownOutput {
                pipeline: pipeline.to_string(),
                node: edge.upstream_node.clone(),
                output: edge.upstream_output.clone(),
            }
        })?;
        let input = downstream.get_input(&edge.downstream_input).ok_or_else(|| {
            GraphError::UnknownInput {
                pipeline: pipeline.to_string(),
                node: edge.downstream_node.clone(),
                input: edge.downstream_input.clone(),
            }
        })?;

        if input.dtype.name != output.dtype.name {
            return Err(GraphError::TypeMismatch {
                pipeline: pipeline.to_string(),
                node: edge.downstream_node.clone(),
                input: edge.downstream_input.clone(),
                expected: input.dtype.name.clone(),
                found: output.dtype.name.clone(),
            });
        }
    }

    let mut producers: HashSet<(&str, &str)> = HashSet::new();
    for edge in edges {
        if !producers.insert((&edge.downstream_node, &edge.downstream_input)) {
            return Err(GraphError::DuplicateProducer {
                pipeline: pipeline.to_string(),
                node: edge.downstream_node.clone(),
                input: edge.downstream_input.clone(),
            });
        }
    }

    // every input is either fed by an upstream output or hydrated from
    // config through its type's loader
    for node in nodes {
        for input in &node.inputs {
            let has_producer = producers.contains(&(node.name.as_str(), input.name.as_str()));
            if !has_producer && !input.dtype.loadable {
                return Err(GraphError::MissingHydration {
                    pipeline: pipeline.to_string(),
                    node: node.name.clone(),
                    input: input.name.clone(),
                    type_name: input.dtype.name.clone(),
                });
            }
        }
    }

    if let Some(cycle) = find_cycle(nodes, edges) {
        return Err(GraphError::CircularDependency {
            pipeline: pipeline.to_string(),
            cycle: cycle.join("-->"),
        });
    }

    Ok(())
}

fn upstream_of<'a>(name: &str, edges: &'a [DependencyEdge]) -> Vec<&'a str> {
    edges
        .iter()
        .filter(|e| e.downstream_node == name)
        .map(|e| e.upstream_node.as_str())
        .collect()
}

fn find_cycle(nodes: &[NodeDef], edges: &[DependencyEdge]) -> Option<Vec<String>> {
    for node in nodes {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut path: Vec<&str> = vec![];

        if walk_upstream(&node.name, edges, &mut visited, &mut path) {
            return Some(path.iter().map(|n| n.to_string()).collect());
        }
    }
    None
}

fn walk_upstream<'a>(
    current: &'a str,
    edges: &'a [DependencyEdge],
    visited: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> bool {
    visited.insert(current);
    path.push(current);

    for neighbor in upstream_of(current, edges) {
        if path.contains(&neighbor) {
            path.push(neighbor);
            return true;
        }
        if !visited.contains(neighbor) && walk_upstream(neighbor, edges, visited, path) {
            return true;
        }
    }

    path.pop();
    false
}
