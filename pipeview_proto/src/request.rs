use serde::{Deserialize, Serialize};

use crate::origin::PipelineOrigin;

/// One subset-resolution request.
///
/// `selection` of `None` asks for the whole graph; duplicates in the list
/// are idempotent input. The selection order is preserved because error
/// reporting on the worker side follows it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct SubsetRequest {
    pub origin: PipelineOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<Vec<String>>,
}

impl SubsetRequest {
    pub fn new(origin: PipelineOrigin, selection: Option<Vec<String>>) -> Self {
        Self { origin, selection }
    }
}
