use crate::record::{Classification, ErrorRecord};

/// Convert a live error and its full source chain into an [`ErrorRecord`]
/// chain, head first.
///
/// Every frame is kept: the depth of the produced chain equals the depth of
/// the source chain, in the same order. `classify` is consulted once per
/// frame so inner and outer errors can carry different tags.
pub fn capture_chain<F>(error: &(dyn std::error::Error + 'static), classify: &F) -> ErrorRecord
where
    F: Fn(&(dyn std::error::Error + 'static)) -> Classification,
{
    let mut record = ErrorRecord::new(error.to_string(), classify(error));
    if let Some(source) = error.source() {
        record.cause = Some(Box::new(capture_chain(source, classify)));
    }
    record
}
