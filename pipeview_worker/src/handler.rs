use log::{info, warn};
use pipeview_graph::subset;
use pipeview_proto::{SubsetRequest, SubsetResponse};
use pipeview_snapshot::snapshot_from_graph;

use crate::capture::capture_worker_error;
use crate::repository::RepositoryIndex;

/// Answer one subset request.
///
/// Total: every failure, anticipated or not, comes back as a failure
/// envelope rather than escaping. Only reads the index, so any number of
/// requests can run against it at once.
pub fn resolve_subset_request(index: &RepositoryIndex, request: &SubsetRequest) -> SubsetResponse {
    let origin = &request.origin;
    info!("resolving subset of {origin}");

    let graph = match index.resolve(origin) {
        Ok(graph) => graph,
        Err(e) => {
            warn!("{origin}: {e}");
            return SubsetResponse::for_error(capture_worker_error(&e));
        }
    };

    match subset(graph, request.selection.as_deref()) {
        Ok(subgraph) => SubsetResponse::for_snapshot(snapshot_from_graph(&subgraph)),
        Err(e) => {
            warn!("{origin}: {e}");
            SubsetResponse::for_error(capture_worker_error(&e))
        }
    }
}
