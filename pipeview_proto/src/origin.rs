use std::fmt;

use serde::{Deserialize, Serialize};

/// Names one pipeline inside one repository, reachable at one worker
/// location, without needing the graph in hand.
///
/// Plain value semantics: two origins built in different processes compare
/// equal whenever all three fields match.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct PipelineOrigin {
    pub location_ref: String,
    pub repository_name: String,
    pub pipeline_name: String,
}

impl PipelineOrigin {
    pub fn new(
        location_ref: impl Into<String>,
        repository_name: impl Into<String>,
        pipeline_name: impl Into<String>,
    ) -> Self {
        Self {
            location_ref: location_ref.into(),
            repository_name: repository_name.into(),
            pipeline_name: pipeline_name.into(),
        }
    }
}

impl fmt::Display for PipelineOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{} at {}",
            self.repository_name, self.pipeline_name, self.location_ref
        )
    }
}
