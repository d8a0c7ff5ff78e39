use thiserror::Error;

/// Failures raised while building, validating, or subsetting a pipeline
/// graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("pipeline {pipeline:?} declares more than one node named {node:?}")]
    DuplicateNode { pipeline: String, node: String },

    #[error("dependency in pipeline {pipeline:?} references unknown node {node:?}")]
    UnknownNode { pipeline: String, node: String },

    #[error("node {node:?} in pipeline {pipeline:?} has no output named {output:?}")]
    UnknownOutput {
        pipeline: String,
        node: String,
        output: String,
    },

    #[error("node {node:?} in pipeline {pipeline:?} has no input named {input:?}")]
    UnknownInput {
        pipeline: String,
        node: String,
        input: String,
    },

    #[error("input {input:?} of node {node:?} in pipeline {pipeline:?} is fed by more than one upstream output")]
    DuplicateProducer {
        pipeline: String,
        node: String,
        input: String,
    },

    #[error("input {input:?} of node {node:?} in pipeline {pipeline:?} expects type {expected:?} but its upstream output produces {found:?}")]
    TypeMismatch {
        pipeline: String,
        node: String,
        input: String,
        expected: String,
        found: String,
    },

    #[error("input {input:?} of node {node:?} in pipeline {pipeline:?} has no upstream output and its type cannot be loaded from config: add a type loader for the type {type_name:?}")]
    MissingHydration {
        pipeline: String,
        node: String,
        input: String,
        type_name: String,
    },

    #[error("cycle detected in pipeline {pipeline:?}: {cycle}")]
    CircularDependency { pipeline: String, cycle: String },

    #[error("No qualified nodes to execute found for selection {selection:?}: pipeline {pipeline:?} has no node(s) named {missing:?}")]
    NoQualifiedNodes {
        pipeline: String,
        selection: Vec<String>,
        missing: Vec<String>,
    },

    #[error("The attempted subset {selection:?} for pipeline {pipeline:?} results in an invalid pipeline")]
    InvalidSubset {
        pipeline: String,
        selection: Vec<String>,
        #[source]
        source: Box<GraphError>,
    },
}
