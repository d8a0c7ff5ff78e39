use std::collections::HashMap;

use pipeview_graph::PipelineGraph;
use pipeview_proto::PipelineOrigin;

use crate::error::WorkerError;

/// A named collection of pipeline graphs living in this worker.
#[derive(Default)]
pub struct Repository {
    name: String,
    pipelines: HashMap<String, PipelineGraph>,
}

impl Repository {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pipelines: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Later definitions win on a name collision.
    pub fn add_pipeline(&mut self, graph: PipelineGraph) {
        self.pipelines.insert(graph.name().to_string(), graph);
    }

    pub fn pipeline(&self, name: &str) -> Option<&PipelineGraph> {
        self.pipelines.get(name)
    }

    pub fn pipeline_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pipelines.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }
}

/// All repositories this worker serves, keyed by name. Built once at
/// startup and only read afterwards.
#[derive(Default)]
pub struct RepositoryIndex {
    repositories: HashMap<String, Repository>,
}

impl RepositoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_repository(&mut self, repository: Repository) {
        self.repositories
            .insert(repository.name().to_string(), repository);
    }

    pub fn repository(&self, name: &str) -> Option<&Repository> {
        self.repositories.get(name)
    }

    /// Resolve an origin to the live graph it addresses.
    pub fn resolve(&self, origin: &PipelineOrigin) -> Result<&PipelineGraph, WorkerError> {
        let repository = self.repository(&origin.repository_name).ok_or_else(|| {
            WorkerError::RepositoryNotFound {
                repository: origin.repository_name.clone(),
            }
        })?;
        repository
            .pipeline(&origin.pipeline_name)
            .ok_or_else(|| WorkerError::PipelineNotFound {
                repository: origin.repository_name.clone(),
                pipeline: origin.pipeline_name.clone(),
            })
    }

    /// Every pipeline this worker can serve, addressed as origins under the
    /// given location.
    pub fn origins(&self, location_ref: &str) -> Vec<PipelineOrigin> {
        let mut origins: Vec<PipelineOrigin> = self
            .repositories
            .values()
            .flat_map(|repository| {
                repository.pipeline_names().into_iter().map(|pipeline| {
                    PipelineOrigin::new(location_ref, repository.name(), pipeline)
                })
            })
            .collect();
        origins.sort_by(|a, b| {
            (&a.repository_name, &a.pipeline_name).cmp(&(&b.repository_name, &b.pipeline_name))
        });
        origins
    }
}


#[cfg(test)]
mod tests {
    use super::test_fixtures::*;
    use super::*;
    use crate::error::WorkerError;
    use pipeview_proto::PipelineOrigin;

    #[test]
    fn test_resolve_finds_pipeline() {
        let index = example_index();
        let graph = index.resolve(&foo_origin()).unwrap();
        assert_eq!(graph.name(), "foo");
    }

    #[test]
    fn test_resolve_misses_are_typed() {
        let index = example_index();

        let err = index
            .resolve(&PipelineOrigin::new(LOCATION, "ghost_repo", "foo"))
            .unwrap_err();
        assert!(matches!(err, WorkerError::RepositoryNotFound { .. }));

        let err = index
            .resolve(&PipelineOrigin::new(LOCATION, "foo_repo", "ghost"))
            .unwrap_err();
        assert!(matches!(err, WorkerError::PipelineNotFound { .. }));
    }

    #[test]
    fn test_origins_listing_is_sorted() {
        let index = example_index();
        let origins = index.origins(LOCATION);
        assert_eq!(origins, vec![bar_origin(), foo_origin()]);
    }
}
