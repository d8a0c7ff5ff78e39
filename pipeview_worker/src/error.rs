use pipeview_error::ErrorLocation;
use pipeview_graph::GraphError;
use thiserror::Error;

/// Worker-side failures outside the graph algorithms themselves: origin
/// resolution misses and pipeline definition loading.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("repository {repository:?} is not loaded in this worker")]
    RepositoryNotFound { repository: String },

    #[error("repository {repository:?} has no pipeline named {pipeline:?}")]
    PipelineNotFound {
        repository: String,
        pipeline: String,
    },

    #[error("failed to read pipeline definition {path:?}")]
    DefinitionRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pipeline definition {path:?}")]
    DefinitionParse {
        path: String,
        location: Option<ErrorLocation>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("dependency {value:?} for input {input:?} of node {node:?} in {path:?} must be written as \"node.output\"")]
    DefinitionDependency {
        path: String,
        node: String,
        input: String,
        value: String,
    },

    #[error("pipeline definition {path:?} does not build a valid graph")]
    DefinitionInvalid {
        path: String,
        #[source]
        source: GraphError,
    },
}
