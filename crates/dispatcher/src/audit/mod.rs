//! Audit sink implementations
//!
//! Contains LogAuditSink and JsonlAuditSink.

mod jsonl;
mod log;

pub use self::jsonl::JsonlAuditSink;
pub use self::log::LogAuditSink;
