//! # pipeview_snapshot
//!
//! The serializable projection of a pipeline graph that crosses the
//! worker/controller boundary. Snapshots are versioned so a controller can
//! refuse output from a mismatched worker, and deterministic so identical
//! graphs serialize to identical bytes.

use std::collections::BTreeMap;

use pipeview_graph::PipelineGraph;
use serde::{Deserialize, Serialize};

/// Bumped whenever the snapshot shape changes incompatibly.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct IoSnapshot {
    pub name: String,
    pub type_name: String,
    pub loadable: bool,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct NodeSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub inputs: Vec<IoSnapshot>,
    pub outputs: Vec<IoSnapshot>,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct EdgeSnapshot {
    pub upstream_node: String,
    pub upstream_output: String,
    pub downstream_node: String,
    pub downstream_input: String,
}

/// A standalone, acyclic description of one pipeline graph.
///
/// Nodes are sorted by name and edges by endpoint so that equal graphs
/// produce byte-identical serializations regardless of declaration order.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PipelineSnapshot {
    pub schema_version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

impl PipelineSnapshot {
    pub fn node(&self, name: &str) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    /// Canonical wire form, suitable for byte comparison and caching.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(self).expect("snapshot serialization is infallible")
    }
}

/// Project a validated graph into its snapshot.
///
/// Total over valid graphs; subset validation has already ruled out
/// dangling edges, so every edge here references a retained node.
pub fn snapshot_from_graph(graph: &PipelineGraph) -> PipelineSnapshot {
    let mut nodes: Vec<NodeSnapshot> = graph
        .nodes()
        .iter()
        .map(|node| NodeSnapshot {
            name: node.name.clone(),
            description: node.description.clone(),
            inputs: node
                .inputs
                .iter()
                .map(|i| IoSnapshot {
                    name: i.name.clone(),
                    type_name: i.dtype.name.clone(),
                    loadable: i.dtype.loadable,
                })
                .collect(),
            outputs: node
                .outputs
                .iter()
                .map(|o| IoSnapshot {
                    name: o.name.clone(),
                    type_name: o.dtype.name.clone(),
                    loadable: o.dtype.loadable,
                })
                .collect(),
        })
        .collect();
    nodes.sort_by(|a, b| a.name.cmp(&b.name));

    let mut edges: Vec<EdgeSnapshot> = graph
        .edges()
        .iter()
        .map(|e| EdgeSnapshot {
            upstream_node: e.upstream_node.clone(),
            upstream_output: e.upstream_output.clone(),
            downstream_node: e.downstream_node.clone(),
            downstream_input: e.downstream_input.clone(),
        })
        .collect();
    edges.sort_by(|a, b| {
        (
            &a.upstream_node,
            &a.upstream_output,
            &a.downstream_node,
            &a.downstream_input,
        )
            .cmp(&(
                &b.upstream_node,
                &b.upstream_output,
                &b.downstream_node,
                &b.downstream_input,
            ))
    });

    PipelineSnapshot {
        schema_version: SNAPSHOT_SCHEMA_VERSION,
        name: graph.name().to_string(),
        description: graph.description().map(str::to_string),
        tags: graph.tags().clone(),
        nodes,
        edges,
    }
}
