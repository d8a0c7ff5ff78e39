//! # pipeview_proto
//!
//! The request/response contract carried over the controller/worker
//! boundary: the pipeline origin that addresses a graph the controller has
//! never seen, and the envelope that brings back either a snapshot or an
//! error chain.

mod origin;
mod request;
mod response;

pub use origin::PipelineOrigin;
pub use request::SubsetRequest;
pub use response::SubsetResponse;
