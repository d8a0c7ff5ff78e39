//! Serializable error chains for pipeview.
//!
//! Failures inside a user-code worker process cannot cross the process
//! boundary as live exceptions. They cross as an ordered chain of
//! [`ErrorRecord`] values instead: head first, root cause last, one record
//! per frame of the original error's source chain.

mod capture;
mod record;

pub use capture::capture_chain;
pub use record::{Chain, Classification, ErrorLocation, ErrorRecord};
