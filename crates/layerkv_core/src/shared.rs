//! A stack shared behind one lock.

use crate::stack::TransactionalStack;
use parking_lot::{Mutex, MutexGuard};
use std::sync::Arc;

/// A [`TransactionalStack`] shared across threads.
///
/// The whole stack is one critical section: every operation, including a
/// sequence of operations inside a transaction, must happen under the same
/// lock acquisition to stay isolated from other threads.
///
/// # Example
///
/// ```rust
/// use layerkv_core::{KvStore, SharedStack, StoreResult, Transactional};
///
/// let shared = SharedStack::new();
/// let result: StoreResult<()> = shared.with(|stack| {
///     stack.begin();
///     stack.put("k", 1);
///     stack.commit()
/// });
/// assert!(result.is_ok());
/// assert_eq!(shared.lock().get(&"k"), Some(&1));
/// ```
#[derive(Debug)]
pub struct SharedStack<K, V> {
    inner: Arc<Mutex<TransactionalStack<K, V>>>,
}

impl<K, V> Clone for SharedStack<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> Default for SharedStack<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> SharedStack<K, V> {
    /// Creates a shared handle around a fresh stack.
    #[must_use]
    pub fn new() -> Self {
        Self::from_stack(TransactionalStack::new())
    }

    /// Wraps an existing stack.
    #[must_use]
    pub fn from_stack(stack: TransactionalStack<K, V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stack)),
        }
    }

    /// Locks the stack for exclusive use.
    pub fn lock(&self) -> MutexGuard<'_, TransactionalStack<K, V>> {
        self.inner.lock()
    }

    /// Runs `f` with the stack locked.
    pub fn with<T>(&self, f: impl FnOnce(&mut TransactionalStack<K, V>) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut *guard)
    }
}
