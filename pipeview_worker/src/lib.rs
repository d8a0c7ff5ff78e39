//! # pipeview_worker
//!
//! The user-code side of the boundary. A worker holds an index of
//! repositories (each a set of named pipeline graphs, loaded from YAML
//! definitions at startup), answers subset requests over HTTP, and flattens
//! every failure into the serializable error-chain envelope; a live error
//! never crosses the boundary.

pub mod capture;
pub mod env;
pub mod error;
pub mod handler;
pub mod in_process;
pub mod repository;
pub mod routes;
pub mod yaml;

use repository::RepositoryIndex;

/// Shared state behind the worker's HTTP routes. Requests only read it, so
/// concurrent resolution against independent origins needs no locking.
pub struct AppState {
    pub index: RepositoryIndex,
    pub location_ref: String,
}
