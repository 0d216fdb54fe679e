//! Error types for store operations.

use std::fmt;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The transaction-ending operation that was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TxnOp {
    /// Folding the active layer into its base.
    Commit,
    /// Discarding the active layer.
    Rollback,
}

impl fmt::Display for TxnOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commit => f.write_str("commit"),
            Self::Rollback => f.write_str("rollback"),
        }
    }
}

/// Errors that can occur during store operations.
///
/// Reads and writes are total; only ending a transaction can fail, and a
/// failed call never changes the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// `commit` or `rollback` was called with no open transaction.
    #[error("cannot {operation}: no active transaction")]
    NoActiveTransaction {
        /// The operation that was rejected.
        operation: TxnOp,
    },
}

impl StoreError {
    /// Creates a no-active-transaction error for `operation`.
    #[must_use]
    pub const fn no_active_transaction(operation: TxnOp) -> Self {
        Self::NoActiveTransaction { operation }
    }

    /// Returns true if this error came from a guard on transaction depth.
    #[must_use]
    pub const fn is_no_active_transaction(&self) -> bool {
        matches!(self, Self::NoActiveTransaction { .. })
    }
}
