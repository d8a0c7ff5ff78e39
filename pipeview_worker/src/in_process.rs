use std::sync::Arc;

use pipeview_client::{SubsetClient, TransportError};
use pipeview_proto::{SubsetRequest, SubsetResponse};

use crate::handler::resolve_subset_request;
use crate::repository::RepositoryIndex;

/// A [`SubsetClient`] that dispatches straight into a worker index living
/// in the same process.
///
/// Requests and responses still round-trip through their wire form, so the
/// copy semantics of the boundary hold: the caller never sees a reference
/// into worker state.
#[derive(Clone)]
pub struct InProcessClient {
    index: Arc<RepositoryIndex>,
}

impl InProcessClient {
    pub fn new(index: RepositoryIndex) -> Self {
        Self {
            index: Arc::new(index),
        }
    }
}

impl SubsetClient for InProcessClient {
    fn execute_subset_request(
        &self,
        request: &SubsetRequest,
    ) -> Result<SubsetResponse, TransportError> {
        let malformed = |message: String| TransportError::MalformedResponse {
            location_ref: request.origin.location_ref.clone(),
            message,
        };

        let wire = serde_json::to_vec(request).map_err(|e| malformed(e.to_string()))?;
        let request: SubsetRequest =
            serde_json::from_slice(&wire).map_err(|e| malformed(e.to_string()))?;

        let response = resolve_subset_request(&self.index, &request);

        let wire = serde_json::to_vec(&response).map_err(|e| malformed(e.to_string()))?;
        serde_json::from_slice(&wire).map_err(|e| malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use pipeview_client::{resolve_pipeline_subset, ResolveError};
    use pipeview_error::Classification;

    use super::*;
    use crate::repository::test_fixtures::*;

    fn selection(names: &[&str]) -> Option<Vec<String>> {
        Some(names.iter().map(|n| n.to_string()).collect())
    }

    #[test]
    fn test_resolve_whole_pipeline() {
        let client = InProcessClient::new(example_index());
        let snapshot = resolve_pipeline_subset(&client, &foo_origin(), None).unwrap();
        assert_eq!(snapshot.name, "foo");
    }

    #[test]
    fn test_resolve_valid_subset() {
        let client = InProcessClient::new(example_index());
        let snapshot =
            resolve_pipeline_subset(&client, &foo_origin(), selection(&["do_something"])).unwrap();
        assert_eq!(snapshot.name, "foo");
        assert_eq!(snapshot.node_names(), vec!["do_something"]);
    }

    #[test]
    fn test_resolve_invalid_selection_raises_user_code_error() {
        let client = InProcessClient::new(example_index());
        let error =
            match resolve_pipeline_subset(&client, &foo_origin(), selection(&["invalid_solid"])) {
                Err(ResolveError::UserCode(error)) => error,
                other => panic!("expected user code error, got {other:?}"),
            };

        assert_eq!(error.classification(), Classification::SubsetSelectionError);
        assert!(error.to_string().starts_with("No qualified"));
        assert!(error.to_string().contains("selection"));
    }

    #[test]
    fn test_resolve_unsatisfiable_subset_preserves_cause_chain() {
        let client = InProcessClient::new(example_index());
        let error =
            match resolve_pipeline_subset(&client, &bar_origin(), selection(&["fail_subset"])) {
                Err(ResolveError::UserCode(error)) => error,
                other => panic!("expected user code error, got {other:?}"),
            };

        assert_eq!(error.classification(), Classification::InvalidDefinitionError);
        assert!(error.to_string().contains("invalid pipeline"));

        let messages: Vec<&str> = error.chain().map(|r| r.message.as_str()).collect();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].contains("add a type loader for the type \"InputTypeWithoutHydration\""));
    }

    #[test]
    fn test_resolve_unknown_pipeline_is_unexpected_not_transport() {
        let client = InProcessClient::new(example_index());
        let origin = pipeview_proto::PipelineOrigin::new(LOCATION, "foo_repo", "ghost");

        match resolve_pipeline_subset(&client, &origin, None) {
            Err(ResolveError::UserCode(error)) => {
                assert_eq!(error.classification(), Classification::UnexpectedWorkerError);
            }
            other => panic!("expected user code error, got {other:?}"),
        }
    }

    #[test]
    fn test_resolved_snapshot_matches_local_subsetting() {
        let client = InProcessClient::new(example_index());
        let resolved =
            resolve_pipeline_subset(&client, &foo_origin(), selection(&["do_something"])).unwrap();

        let names = vec!["do_something".to_string()];
        let local = pipeview_snapshot::snapshot_from_graph(
            &pipeview_graph::subset(&foo_pipeline(), Some(&names)).unwrap(),
        );

        assert_eq!(resolved.to_bytes(), local.to_bytes());
    }

    #[test]
    fn test_repeated_resolution_is_byte_identical() {
        let client = InProcessClient::new(example_index());
        let first = resolve_pipeline_subset(&client, &foo_origin(), selection(&["do_something"]))
            .unwrap();
        let second = resolve_pipeline_subset(&client, &foo_origin(), selection(&["do_something"]))
            .unwrap();
        assert_eq!(first.to_bytes(), second.to_bytes());
    }

    #[test]
    fn test_concurrent_resolution_against_independent_origins() {
        let client = InProcessClient::new(example_index());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let client = client.clone();
                thread::spawn(move || {
                    if i % 2 == 0 {
                        resolve_pipeline_subset(&client, &foo_origin(), None)
                            .map(|s| s.name)
                    } else {
                        resolve_pipeline_subset(&client, &bar_origin(), None)
                            .map(|s| s.name)
                    }
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let name = handle.join().unwrap().unwrap();
            assert_eq!(name, if i % 2 == 0 { "foo" } else { "bar" });
        }
    }
}
