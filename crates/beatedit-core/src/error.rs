//! Error handling for Beatedit
//!
//! Provides the error types raised by stateful editing operations:
//! - Scale errors (begin/update/commit lifecycle misuse)
//!
//! Geometric degeneracies during an interactive drag are not errors; they are
//! resolved by clamping or by reverting to the pre-drag snapshot.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Scale operation error type
///
/// Signals a caller contract violation on the scale lifecycle. These are
/// programmer errors: they are returned before any shape is touched and are
/// not meant to be recovered from at runtime.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleError {
    /// `begin` was called while an operation is already open
    #[error("A scale operation is already in progress")]
    OperationInProgress,

    /// `update` or `commit` was called without an open operation
    #[error("No scale operation is in progress")]
    NoOperationInProgress,
}
