use pipeview_error::ErrorRecord;
use pipeview_snapshot::PipelineSnapshot;
use serde::{Deserialize, Serialize};

/// The tagged result envelope a worker returns for one subset request.
///
/// Exactly one of `snapshot`/`error` is populated, gated by `success`. The
/// constructors are the only way workers build one, so a well-behaved
/// worker cannot produce a mixed envelope; the controller still treats a
/// mixed envelope from the wire as a transport-level defect.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct SubsetResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<PipelineSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorRecord>,
}

impl SubsetResponse {
    pub fn for_snapshot(snapshot: PipelineSnapshot) -> Self {
        Self {
            success: true,
            snapshot: Some(snapshot),
            error: None,
        }
    }

    pub fn for_error(error: ErrorRecord) -> Self {
        Self {
            success: false,
            snapshot: None,
            error: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use pipeview_error::Classification;

    use super::*;

    #[test]
    fn test_failure_envelope_wire_shape() {
        let response = SubsetResponse::for_error(
            ErrorRecord::new("head", Classification::SubsetSelectionError)
                .with_cause(ErrorRecord::new(
                    "root",
                    Classification::InvalidDefinitionError,
                )),
        );

        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["success"], serde_json::json!(false));
        assert!(wire.get("snapshot").is_none());
        assert_eq!(wire["error"]["message"], serde_json::json!("head"));
        assert_eq!(wire["error"]["cause"]["message"], serde_json::json!("root"));
        assert!(wire["error"]["cause"].get("cause").is_none());
    }
}
