//! Nested transactions as a stack of layers.

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult, TxnOp};
use crate::layer::{Layer, LayerChain};
use crate::traits::{KvStore, Transactional};
use crate::types::{LayerId, LayerStats};
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, warn};

/// An in-memory store with arbitrarily nested transactions.
///
/// The stack owns every layer in a single arena. Index 0 is the root layer,
/// which lives as long as the store. `begin` pushes a layer based on the
/// current top; `commit` folds the top layer into the one directly beneath
/// it and `rollback` drops it. All reads and writes go to the top layer.
///
/// Committing a nested transaction only publishes its changes to the
/// enclosing transaction. They reach the root once every enclosing
/// transaction has committed too.
///
/// # Thread Safety
///
/// The stack has no internal locking. Share it through
/// [`crate::SharedStack`] or give each thread its own stack.
///
/// # Example
///
/// ```rust
/// use layerkv_core::{KvStore, Transactional, TransactionalStack};
///
/// let mut store = TransactionalStack::new();
/// store.put("a", 1);
/// store.begin();
/// store.put("a", 2);
/// assert_eq!(store.get(&"a"), Some(&2));
/// store.rollback().unwrap();
/// assert_eq!(store.get(&"a"), Some(&1));
/// ```
#[derive(Debug, Clone)]
pub struct TransactionalStack<K, V> {
    layers: Vec<Layer<K, V>>,
    config: StoreConfig,
}

impl<K, V> Default for TransactionalStack<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> TransactionalStack<K, V> {
    /// Creates an empty store with no open transaction.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::root()],
            config: StoreConfig::default(),
        }
    }

    /// Returns the configuration this store was created with.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Returns the ID of the layer all operations currently target.
    #[must_use]
    pub fn active_id(&self) -> LayerId {
        LayerId::new(self.layers.len().saturating_sub(1))
    }

    /// Returns the layer all operations currently target.
    #[must_use]
    pub fn active_layer(&self) -> &Layer<K, V> {
        &self.layers[self.active_id().index()]
    }

    /// Returns the layer at `id`, if it exists.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&Layer<K, V>> {
        self.layers.get(id.index())
    }

    /// Returns pending change counts for every layer, root first.
    #[must_use]
    pub fn layer_stats(&self) -> Vec<LayerStats> {
        self.layers
            .iter()
            .enumerate()
            .map(|(depth, layer)| LayerStats {
                depth,
                writes: layer.write_count(),
                tombstones: layer.tombstone_count(),
            })
            .collect()
    }

    fn active_mut(&mut self) -> &mut Layer<K, V> {
        let top = self.active_id().index();
        &mut self.layers[top]
    }

    /// Pops the top layer, refusing to touch the root.
    fn pop_transaction(&mut self, operation: TxnOp) -> StoreResult<Layer<K, V>> {
        if self.layers.len() <= 1 {
            warn!(%operation, "no active transaction");
            return Err(StoreError::no_active_transaction(operation));
        }
        self.layers
            .pop()
            .ok_or(StoreError::no_active_transaction(operation))
    }
}

impl<K: Eq + Hash, V> TransactionalStack<K, V> {
    /// Creates an empty store whose layers are sized from `config`.
    #[must_use]
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            layers: vec![Layer::with_capacity(None, config.root_capacity)],
            config,
        }
    }

    /// Returns a read view of the chain ending at the active layer.
    #[must_use]
    pub fn chain(&self) -> LayerChain<'_, K, V> {
        LayerChain::new(&self.layers, self.active_id())
    }
}

impl<K: Eq + Hash + Clone, V: Clone> TransactionalStack<K, V> {
    /// Returns every visible key with a copy of its value.
    #[must_use]
    pub fn snapshot(&self) -> HashMap<K, V> {
        self.chain()
            .entries()
            .into_iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K: Eq + Hash + Clone, V> TransactionalStack<K, V> {
    /// Runs `f` inside a new transaction.
    ///
    /// The transaction commits if `f` returns `Ok` and rolls back if it
    /// returns `Err`. Transactions `f` opened but did not close are resolved
    /// the same way.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns.
    pub fn transaction<F, T, E>(&mut self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<StoreError>,
    {
        self.begin();
        let depth = self.depth();

        match f(self) {
            Ok(value) => {
                while self.depth() >= depth {
                    self.commit()?;
                }
                Ok(value)
            }
            Err(err) => {
                while self.depth() >= depth {
                    self.rollback()?;
                }
                Err(err)
            }
        }
    }
}

impl<K: Eq + Hash + Clone, V> KvStore<K, V> for TransactionalStack<K, V> {
    fn get(&self, key: &K) -> Option<&V> {
        self.chain().get(key)
    }

    fn put(&mut self, key: K, value: V) {
        self.active_mut().put(key, value);
    }

    fn remove(&mut self, key: &K) -> bool {
        self.active_mut().remove(key)
    }
}

impl<K: Eq + Hash + Clone, V> Transactional for TransactionalStack<K, V> {
    fn begin(&mut self) {
        let base = self.active_id();
        let layer = Layer::with_capacity(Some(base), self.config.layer_capacity);
        self.layers.push(layer);
        debug!(depth = self.depth(), "began transaction");
    }

    fn commit(&mut self) -> StoreResult<()> {
        let mut layer = self.pop_transaction(TxnOp::Commit)?;
        debug_assert_eq!(layer.base(), Some(self.active_id()));

        let writes = layer.write_count();
        let tombstones = layer.tombstone_count();
        layer.merge_into(self.active_mut());

        debug!(depth = self.depth(), writes, tombstones, "committed transaction");
        Ok(())
    }

    fn rollback(&mut self) -> StoreResult<()> {
        let layer = self.pop_transaction(TxnOp::Rollback)?;
        debug!(
            depth = self.depth(),
            writes = layer.write_count(),
            tombstones = layer.tombstone_count(),
            "rolled back transaction"
        );
        Ok(())
    }

    fn depth(&self) -> usize {
        self.layers.len().saturating_sub(1)
    }
}
