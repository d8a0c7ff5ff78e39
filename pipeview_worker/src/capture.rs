use pipeview_error::{capture_chain, Classification, ErrorLocation, ErrorRecord};
use pipeview_graph::GraphError;

use crate::error::WorkerError;

/// Map one error frame to its stable wire tag.
///
/// The mapping is exhaustive: selection misses get their own tag, every
/// other graph-level failure is a definition problem, and anything the
/// worker did not anticipate is wrapped opaquely.
pub fn classify_frame(error: &(dyn std::error::Error + 'static)) -> Classification {
    match error.downcast_ref::<GraphError>() {
        Some(GraphError::NoQualifiedNodes { .. }) => Classification::SubsetSelectionError,
        Some(_) => Classification::InvalidDefinitionError,
        None => Classification::UnexpectedWorkerError,
    }
}

fn location_of(error: &(dyn std::error::Error + 'static)) -> Option<ErrorLocation> {
    match error.downcast_ref::<WorkerError>() {
        Some(WorkerError::DefinitionParse { location, .. }) => location.clone(),
        _ => None,
    }
}

fn attach_locations(record: &mut ErrorRecord, error: &(dyn std::error::Error + 'static)) {
    record.location = location_of(error);
    if let (Some(cause), Some(source)) = (record.cause.as_deref_mut(), error.source()) {
        attach_locations(cause, source);
    }
}

/// Flatten a live worker-side failure into the envelope's record chain,
/// head first, one record per source-chain frame.
pub fn capture_worker_error(error: &(dyn std::error::Error + 'static)) -> ErrorRecord {
    let mut record = capture_chain(error, &classify_frame);
    attach_locations(&mut record, error);
    record
}

#[cfg(test)]
mod tests {
    use pipeview_graph::{subset, GraphError};

    use super::*;
    use crate::repository::test_fixtures::{bar_pipeline, foo_pipeline};

    #[test]
    fn test_selection_miss_maps_to_selection_tag() {
        let selection = vec!["invalid_solid".to_string()];
        let err = subset(&foo_pipeline(), Some(&selection)).unwrap_err();
        let record = capture_worker_error(&err);

        assert_eq!(record.classification, Classification::SubsetSelectionError);
        assert_eq!(record.depth(), 1);
    }

    #[test]
    fn test_structural_failure_maps_to_definition_tags_through_chain() {
        let selection = vec!["fail_subset".to_string()];
        let err = subset(&bar_pipeline(), Some(&selection)).unwrap_err();
        let record = capture_worker_error(&err);

        let tags: Vec<Classification> = record.chain().map(|r| r.classification).collect();
        assert_eq!(
            tags,
            vec![
                Classification::InvalidDefinitionError,
                Classification::InvalidDefinitionError,
            ]
        );
        assert!(record.message.contains("invalid pipeline"));
        assert!(record
            .root()
            .message
            .contains("add a type loader for the type \"InputTypeWithoutHydration\""));
    }

    #[test]
    fn test_non_graph_errors_map_to_unexpected() {
        let err = WorkerError::RepositoryNotFound {
            repository: "ghost".to_string(),
        };
        let record = capture_worker_error(&err);
        assert_eq!(record.classification, Classification::UnexpectedWorkerError);
    }

    #[test]
    fn test_parse_provenance_lands_on_the_record() {
        let source = serde_yaml::from_str::<crate::yaml::PipelineTemplate>("nodes: [")
            .expect_err("unterminated yaml must not parse");
        let location = source.location().map(|l| ErrorLocation {
            file: "broken.yaml".to_string(),
            line: l.line(),
            column: l.column(),
        });
        let err = WorkerError::DefinitionParse {
            path: "broken.yaml".to_string(),
            location,
            source,
        };

        let record = capture_worker_error(&err);
        let location = record.location.expect("location should be attached");
        assert_eq!(location.file, "broken.yaml");
        assert!(location.line >= 1);
    }

    #[test]
    fn test_graph_error_outside_subset_is_a_definition_error() {
        let err = GraphError::DuplicateNode {
            pipeline: "p".to_string(),
            node: "a".to_string(),
        };
        let record = capture_worker_error(&err);
        assert_eq!(record.classification, Classification::InvalidDefinitionError);
    }
}
