//! # pipeview_client
//!
//! The controller side of the boundary: build a request from an origin and
//! selection, send it through a [`SubsetClient`], and materialize the
//! response into a typed snapshot or a raised error whose cause chain
//! mirrors the worker's exactly.

mod client;
mod error;
mod http;
mod materialize;

use log::debug;
use pipeview_proto::{PipelineOrigin, SubsetRequest};
use pipeview_snapshot::PipelineSnapshot;

pub use client::SubsetClient;
pub use error::{ResolveError, TransportError, UserCodeProcessError};
pub use http::HttpSubsetClient;
pub use materialize::materialize;

/// Resolve a (possibly subset) view of a remote pipeline.
///
/// Blocks until the worker answers or the transport gives up. Never
/// retries: a failed request is reported as-is and retry policy stays with
/// the caller.
pub fn resolve_pipeline_subset<C: SubsetClient>(
    client: &C,
    origin: &PipelineOrigin,
    selection: Option<Vec<String>>,
) -> Result<PipelineSnapshot, ResolveError> {
    debug!("resolving subset of {origin}");
    let request = SubsetRequest::new(origin.clone(), selection);
    let response = client.execute_subset_request(&request)?;
    materialize(&origin.location_ref, response)
}
