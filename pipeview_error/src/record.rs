use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable tag describing what kind of failure a record represents.
///
/// Controllers pattern-match on this to pick user-facing phrasing, so the
/// set is closed and the serialized names never change.
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    SubsetSelectionError,
    InvalidDefinitionError,
    UnexpectedWorkerError,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Classification::SubsetSelectionError => "subset_selection_error",
            Classification::InvalidDefinitionError => "invalid_definition_error",
            Classification::UnexpectedWorkerError => "unexpected_worker_error",
        };
        write!(f, "{name}")
    }
}

/// Source provenance for a record, when the failure carries one.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorLocation {
    pub file: String,
    pub line: usize,
    pub column: usize,
}

/// One frame of a worker-side failure.
///
/// `cause` is `None` at the root; the chain is finite by construction since
/// it mirrors a finite in-process source chain.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorRecord {
    pub message: String,
    pub classification: Classification,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<ErrorLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Box<ErrorRecord>>,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>, classification: Classification) -> Self {
        Self {
            message: message.into(),
            classification,
            location: None,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: ErrorRecord) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn with_location(mut self, location: ErrorLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Walk the chain head-to-root.
    pub fn chain(&self) -> Chain<'_> {
        Chain { next: Some(self) }
    }

    /// The innermost record of the chain.
    pub fn root(&self) -> &ErrorRecord {
        self.chain().last().unwrap_or(self)
    }

    /// Number of records in the chain, head included.
    pub fn depth(&self) -> usize {
        self.chain().count()
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ErrorRecord {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

/// Iterator over a record chain, head first.
pub struct Chain<'a> {
    next: Option<&'a ErrorRecord>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a ErrorRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause.as_deref();
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    fn three_deep() -> ErrorRecord {
        ErrorRecord::new("head", Classification::InvalidDefinitionError).with_cause(
            ErrorRecord::new("middle", Classification::InvalidDefinitionError)
                .with_cause(ErrorRecord::new("root", Classification::UnexpectedWorkerError)),
        )
    }

    #[test]
    fn test_chain_walks_head_to_root() {
        let record = three_deep();
        let messages: Vec<&str> = record.chain().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, vec!["head", "middle", "root"]);
        assert_eq!(record.depth(), 3);
        assert_eq!(record.root().message, "root");
    }

    #[test]
    fn test_source_matches_cause() {
        let record = three_deep();
        let source = record.source().unwrap();
        assert_eq!(source.to_string(), "middle");
        assert_eq!(source.source().unwrap().to_string(), "root");
        assert!(source.source().unwrap().source().is_none());
    }

    #[test]
    fn test_serde_preserves_chain_and_tags() {
        let record = three_deep().with_location(ErrorLocation {
            file: "bar.yaml".to_string(),
            line: 4,
            column: 2,
        });

        let wire = serde_json::to_string(&record).unwrap();
        assert!(wire.contains("\"invalid_definition_error\""));
        assert!(wire.contains("\"unexpected_worker_error\""));
        assert_eq!(
            Classification::SubsetSelectionError.to_string(),
            "subset_selection_error"
        );

        let decoded: ErrorRecord = serde_json::from_str(&wire).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.depth(), 3);
    }
}
