//! Compile-time errors: parsing never panics, but it can fail, and every failure collapses to a
//! single 1-based byte offset into the source text.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("failed to parse expression at byte offset {position}: {reason}")]
pub struct CompileError {
    position: usize,
    reason: String,
}

impl CompileError {
    /// `byte_offset` is the 0-based offset of the first token the parser could not make sense
    /// of; stored as a 1-based offset, clamped to at least 1. `reason` is a human-readable
    /// description of what went wrong there.
    pub(crate) fn at(byte_offset: usize, reason: impl Into<String>) -> Self {
        CompileError {
            position: byte_offset.saturating_add(1),
            reason: reason.into(),
        }
    }

    /// 1-based byte offset of the error, always `>= 1`.
    pub fn position(&self) -> usize {
        self.position
    }

    /// A human-readable description of the failure, e.g. `"unknown identifier 'foo'"`.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}
