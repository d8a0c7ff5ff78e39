/// One dependency: an upstream node's named output feeding a downstream
/// node's named input.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DependencyEdge {
    pub upstream_node: String,
    pub upstream_output: String,
    pub downstream_node: String,
    pub downstream_input: String,
}

impl DependencyEdge {
    pub fn new(
        upstream_node: impl Into<String>,
        upstream_output: impl Into<String>,
        downstream_node: impl Into<String>,
        downstream_input: impl Into<String>,
    ) -> Self {
        Self {
            upstream_node: upstream_node.into(),
            upstream_output: upstream_output.into(),
            downstream_node: downstream_node.into(),
            downstream_input: downstream_input.into(),
        }
    }
}
