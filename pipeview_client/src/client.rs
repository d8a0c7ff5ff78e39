use pipeview_proto::{SubsetRequest, SubsetResponse};

use crate::error::TransportError;

/// A connected handle to a worker process.
///
/// Implementations own connection lifecycle, wire serialization, and
/// timeout enforcement. The call is synchronous and carries no state
/// between requests; a handle must be shareable across controller threads
/// issuing requests for independent origins.
pub trait SubsetClient {
    fn execute_subset_request(
        &self,
        request: &SubsetRequest,
    ) -> Result<SubsetResponse, TransportError>;
}
