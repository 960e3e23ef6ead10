// src/bridge/completion.rs
use std::sync::OnceLock;

use super::SubprocessResult;

/// Single-assignment result slot for one bridge invocation.
///
/// Every completion path (exit, launch error, timeout) goes through
/// [`Completion::resolve`]; only the first one is kept.
#[derive(Debug, Default)]
pub struct Completion {
    cell: OnceLock<SubprocessResult>,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `result` unless the invocation is already resolved.
    /// Returns `false` when the result was discarded.
    pub fn resolve(&self, result: SubprocessResult) -> bool {
        match self.cell.set(result) {
            Ok(()) => true,
            Err(late) => {
                log::warn!("Discarding late result for an already resolved invocation: {:?}", late);
                false
            }
        }
    }

    pub fn into_result(self) -> Option<SubprocessResult> {
        self.cell.into_inner()
    }
}
