//! # pipeview_graph
//!
//! The worker-local pipeline model: named nodes with typed inputs and
//! outputs, wired together by dependency edges into a directed acyclic
//! graph. Graphs are built through [`PipelineGraphBuilder`], validated on
//! construction, and immutable afterwards. They never cross the process
//! boundary themselves; only their snapshot projection does.

mod builder;
mod edge;
mod error;
mod node;
mod subset;
mod validate;

use std::collections::BTreeMap;

pub use builder::PipelineGraphBuilder;
pub use edge::DependencyEdge;
pub use error::GraphError;
pub use node::{InputDef, NodeDef, OutputDef, TypeSpec};
pub use subset::subset;

/// The full directed graph of nodes and dependencies for one pipeline.
///
/// Constructed only by [`PipelineGraphBuilder::build`] or [`subset`], both
/// of which run the same validation, so a held value is always structurally
/// valid.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineGraph {
    name: String,
    description: Option<String>,
    tags: BTreeMap<String, String>,
    nodes: Vec<NodeDef>,
    edges: Vec<DependencyEdge>,
}

impl PipelineGraph {
    pub(crate) fn from_parts(
        name: String,
        description: Option<String>,
        tags: BTreeMap<String, String>,
        nodes: Vec<NodeDef>,
        edges: Vec<DependencyEdge>,
    ) -> Self {
        Self {
            name,
            description,
            tags,
            nodes,
            edges,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn nodes(&self) -> &[NodeDef] {
        &self.nodes
    }

    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn node(&self, name: &str) -> Option<&NodeDef> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.node(name).is_some()
    }

    /// The edge feeding the given input, if any. Validation guarantees at
    /// most one.
    pub fn producer_for(&self, node: &str, input: &str) -> Option<&DependencyEdge> {
        self.edges
            .iter()
            .find(|e| e.downstream_node == node && e.downstream_input == input)
    }

    pub fn node_names(&self) -> Vec<&str> {
        self.nodes.iter().map(|n| n.name.as_str()).collect()
    }
}
