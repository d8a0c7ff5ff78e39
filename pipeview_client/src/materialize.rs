use pipeview_proto::SubsetResponse;
use pipeview_snapshot::{PipelineSnapshot, SNAPSHOT_SCHEMA_VERSION};

use crate::error::{ResolveError, TransportError, UserCodeProcessError};

/// Turn a wire envelope into a typed snapshot or a raised local error.
///
/// A failure envelope becomes one [`UserCodeProcessError`] carrying the
/// worker's record chain untouched. Envelopes that violate the
/// exactly-one-of contract, and snapshots from a worker speaking a
/// different schema version, are transport-level defects: the worker never
/// reported them, so they never carry a worker chain.
pub fn materialize(
    location_ref: &str,
    response: SubsetResponse,
) -> Result<PipelineSnapshot, ResolveError> {
    if response.success {
        if response.error.is_some() {
            return Err(TransportError::MalformedResponse {
                location_ref: location_ref.to_string(),
                message: "success envelope also carries an error record".to_string(),
            }
            .into());
        }
        let snapshot = response
            .snapshot
            .ok_or_else(|| TransportError::MalformedResponse {
                location_ref: location_ref.to_string(),
                message: "success envelope carries no snapshot".to_string(),
            })?;
        if snapshot.schema_version != SNAPSHOT_SCHEMA_VERSION {
            return Err(TransportError::SchemaVersionMismatch {
                location_ref: location_ref.to_string(),
                expected: SNAPSHOT_SCHEMA_VERSION,
                found: snapshot.schema_version,
            }
            .into());
        }
        Ok(snapshot)
    } else {
        if response.snapshot.is_some() {
            return Err(TransportError::MalformedResponse {
                location_ref: location_ref.to_string(),
                message: "failure envelope also carries a snapshot".to_string(),
            }
            .into());
        }
        let head = response
            .error
            .ok_or_else(|| TransportError::MalformedResponse {
                location_ref: location_ref.to_string(),
                message: "failure envelope carries no error record".to_string(),
            })?;
        Err(UserCodeProcessError::new(head).into())
    }
}
