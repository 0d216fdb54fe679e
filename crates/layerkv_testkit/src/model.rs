//! Reference model for differential testing.
//!
//! [`ModelStore`] keeps a full copy of the visible map per transaction
//! level. It is slow and obviously correct, which is the point.

use layerkv_core::{KvStore, StoreError, StoreResult, Transactional, TxnOp};
use std::collections::HashMap;
use std::hash::Hash;

/// A store that copies the whole map on every `begin`.
#[derive(Debug, Clone)]
pub struct ModelStore<K, V> {
    levels: Vec<HashMap<K, V>>,
}

impl<K, V> Default for ModelStore<K, V> {
    fn default() -> Self {
        Self {
            levels: vec![HashMap::new()],
        }
    }
}

impl<K, V> ModelStore<K, V> {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the map visible at the current level.
    #[must_use]
    pub fn visible(&self) -> &HashMap<K, V> {
        &self.levels[self.levels.len() - 1]
    }

    fn top_mut(&mut self) -> &mut HashMap<K, V> {
        let top = self.levels.len() - 1;
        &mut self.levels[top]
    }
}

impl<K: Eq + Hash, V> KvStore<K, V> for ModelStore<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        self.visible().get(key)
    }

    fn put(&mut self, key: K, value: V) {
        self.top_mut().insert(key, value);
    }

    fn remove(&mut self, key: &K) -> bool {
        self.top_mut().remove(key).is_some()
    }
}

impl<K: Clone, V: Clone> Transactional for ModelStore<K, V> {
    fn begin(&mut self) {
        let copy = self.visible().clone();
        self.levels.push(copy);
    }

    fn commit(&mut self) -> StoreResult<()> {
        if self.levels.len() <= 1 {
            return Err(StoreError::no_active_transaction(TxnOp::Commit));
        }
        if let Some(top) = self.levels.pop() {
            *self.top_mut() = top;
        }
        Ok(())
    }

    fn rollback(&mut self) -> StoreResult<()> {
        if self.levels.len() <= 1 {
            return Err(StoreError::no_active_transaction(TxnOp::Rollback));
        }
        self.levels.pop();
        Ok(())
    }

    fn depth(&self) -> usize {
        self.levels.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_nested_commit_and_rollback() {
        let mut model: ModelStore<&str, i32> = ModelStore::new();
        model.put("a", 1);
        model.begin();
        model.put("a", 2);
        model.begin();
        model.remove(&"a");
        model.commit().unwrap();
        assert_eq!(model.get(&"a"), None);
        model.rollback().unwrap();
        assert_eq!(model.get(&"a"), Some(&1));
        assert!(model.commit().is_err());
    }
}
