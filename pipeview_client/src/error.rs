use std::fmt;

use pipeview_error::{Chain, Classification, ErrorRecord};
use thiserror::Error;

/// The transport itself failed: no worker envelope was ever received, so
/// none of these carry a worker cause chain.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to worker at {location_ref}: {message}")]
    Connect {
        location_ref: String,
        message: String,
    },

    #[error("request to worker at {location_ref} timed out")]
    Timeout { location_ref: String },

    #[error("worker at {location_ref} answered with http status {status}")]
    Status { location_ref: String, status: u16 },

    #[error("malformed response from worker at {location_ref}: {message}")]
    MalformedResponse {
        location_ref: String,
        message: String,
    },

    #[error("worker at {location_ref} produced snapshot schema version {found}, this controller supports {expected}")]
    SchemaVersionMismatch {
        location_ref: String,
        expected: u32,
        found: u32,
    },
}

/// A failure the worker reported through the envelope.
///
/// One uniform type for every worker-side failure; the record chain, not
/// the wrapping type, tells subset-selection errors apart from definition
/// errors and unexpected ones. Displays as the head record's message and
/// walks the full chain through [`std::error::Error::source`].
#[derive(Clone, Debug)]
pub struct UserCodeProcessError {
    head: ErrorRecord,
}

impl UserCodeProcessError {
    pub fn new(head: ErrorRecord) -> Self {
        Self { head }
    }

    pub fn head(&self) -> &ErrorRecord {
        &self.head
    }

    pub fn classification(&self) -> Classification {
        self.head.classification
    }

    /// All records, head first, exactly as the worker captured them.
    pub fn chain(&self) -> Chain<'_> {
        self.head.chain()
    }
}

impl fmt::Display for UserCodeProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.head.message)
    }
}

impl std::error::Error for UserCodeProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.head
            .cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// Everything `resolve_pipeline_subset` can fail with.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    UserCode(#[from] UserCodeProcessError),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_user_code_error_displays_head_and_walks_chain() {
        let error = UserCodeProcessError::new(
            ErrorRecord::new("subset failed", Classification::InvalidDefinitionError).with_cause(
                ErrorRecord::new("missing loader", Classification::InvalidDefinitionError),
            ),
        );

        assert_eq!(error.to_string(), "subset failed");
        assert_eq!(
            error.classification(),
            Classification::InvalidDefinitionError
        );
        assert_eq!(error.source().unwrap().to_string(), "missing loader");
        assert_eq!(error.chain().count(), 2);
    }
}
