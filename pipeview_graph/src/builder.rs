use std::collections::BTreeMap;

use crate::edge::DependencyEdge;
use crate::error::GraphError;
use crate::node::NodeDef;
use crate::validate::validate_graph;
use crate::PipelineGraph;

/// Explicit construction API for pipeline graphs.
///
/// Nodes and dependencies accumulate in declaration order; [`build`] runs
/// full validation and hands back an immutable [`PipelineGraph`].
///
/// [`build`]: PipelineGraphBuilder::build
///
/// ```
/// use pipeview_graph::{NodeDef, PipelineGraphBuilder, TypeSpec};
///
/// let graph = PipelineGraphBuilder::new("foo")
///     .add_node(NodeDef::new("do_something").output("result", TypeSpec::new("String")))
///     .add_node(NodeDef::new("do_input").input("x", TypeSpec::new("String")))
///     .add_dependency("do_something", "result", "do_input", "x")
///     .build()
///     .unwrap();
/// assert_eq!(graph.name(), "foo");
/// ```
pub struct PipelineGraphBuilder {
    name: String,
    description: Option<String>,
    tags: BTreeMap<String, String>,
    nodes: Vec<NodeDef>,
    edges: Vec<DependencyEdge>,
}

impl PipelineGraphBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            tags: BTreeMap::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn add_node(mut self, node: NodeDef) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn add_dependency(
        mut self,
        upstream_node: impl Into<String>,
        upstream_output: impl Into<String>,
        downstream_node: impl Into<String>,
        downstream_input: impl Into<String>,
    ) -> Self {
        self.edges.push(DependencyEdge::new(
            upstream_node,
            upstream_output,
            downstream_node,
            downstream_input,
        ));
        self
    }

    pub fn build(self) -> Result<PipelineGraph, GraphError> {
        validate_graph(&self.name, &self.nodes, &self.edges)?;
        Ok(PipelineGraph::from_parts(
            self.name,
            self.description,
            self.tags,
            self.nodes,
            self.edges,
        ))
    }
}
