//! Store capability traits.

use crate::error::StoreResult;

/// Something keys can be read from and written to.
///
/// # Invariants
///
/// - After `put(k, v)`, `get(&k)` returns `v` until `k` is removed or the
///   write is rolled back
/// - After `remove(&k)`, `get(&k)` returns `None`
/// - None of these operations fail
pub trait KvStore<K, V> {
    /// Returns the value visible for `key`, if any.
    fn get(&self, key: &K) -> Option<&V>;

    /// Inserts or replaces the value for `key`.
    fn put(&mut self, key: K, value: V);

    /// Deletes `key`.
    ///
    /// Returns whether `key` had a value written in the active layer itself.
    /// A key that is only visible through a lower layer still gets deleted,
    /// but reports `false`.
    fn remove(&mut self, key: &K) -> bool;

    /// Returns true if `key` has a visible value.
    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
}

/// Something that supports nested transactions.
///
/// # Implementors
///
/// - [`super::TransactionalStack`]
pub trait Transactional {
    /// Opens a new transaction nested inside the current one.
    fn begin(&mut self);

    /// Folds the innermost transaction into its enclosing one.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::NoActiveTransaction`] if no transaction
    /// is open. The store is unchanged in that case.
    fn commit(&mut self) -> StoreResult<()>;

    /// Discards the innermost transaction.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StoreError::NoActiveTransaction`] if no transaction
    /// is open. The store is unchanged in that case.
    fn rollback(&mut self) -> StoreResult<()>;

    /// Returns the number of open transactions.
    fn depth(&self) -> usize;

    /// Returns true if at least one transaction is open.
    fn in_transaction(&self) -> bool {
        self.depth() > 0
    }
}
