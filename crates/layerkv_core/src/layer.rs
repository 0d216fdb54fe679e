//! A single overlay of writes and deletions.

use crate::types::LayerId;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// What a single layer knows about a key, without consulting its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a, V> {
    /// The layer holds a value for the key.
    Found(&'a V),
    /// The layer deleted the key; nothing below is visible.
    Deleted,
    /// The layer has no opinion; ask the base.
    Missing,
}

/// One level of local writes and tombstones.
///
/// A layer optionally names a base layer that reads fall through to. The
/// base is referenced by [`LayerId`], never by pointer: the owning
/// [`crate::TransactionalStack`] keeps every layer in one arena.
///
/// # Invariants
///
/// - A key is never in both `writes` and `tombstones`
/// - A layer without a base never records tombstones
#[derive(Debug, Clone)]
pub struct Layer<K, V> {
    writes: HashMap<K, V>,
    tombstones: HashSet<K>,
    base: Option<LayerId>,
}

impl<K, V> Default for Layer<K, V> {
    fn default() -> Self {
        Self::root()
    }
}

impl<K, V> Layer<K, V> {
    /// Creates an empty layer with no base.
    #[must_use]
    pub fn root() -> Self {
        Self {
            writes: HashMap::new(),
            tombstones: HashSet::new(),
            base: None,
        }
    }

    /// Creates an empty layer reading through to `base`.
    #[must_use]
    pub fn on(base: LayerId) -> Self {
        Self {
            writes: HashMap::new(),
            tombstones: HashSet::new(),
            base: Some(base),
        }
    }

    /// Returns the layer reads fall through to.
    #[must_use]
    pub fn base(&self) -> Option<LayerId> {
        self.base
    }

    /// Returns true if this layer has a base.
    #[must_use]
    pub fn has_base(&self) -> bool {
        self.base.is_some()
    }

    /// Number of keys written in this layer.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// Number of keys deleted in this layer.
    #[must_use]
    pub fn tombstone_count(&self) -> usize {
        self.tombstones.len()
    }

    /// Returns true if the layer records no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.tombstones.is_empty()
    }

    /// Discards every local write and tombstone.
    pub fn clear(&mut self) {
        self.writes.clear();
        self.tombstones.clear();
    }
}

impl<K: Eq + Hash, V> Layer<K, V> {
    /// Creates a layer whose maps are pre-sized for `capacity` keys.
    #[must_use]
    pub fn with_capacity(base: Option<LayerId>, capacity: usize) -> Self {
        Self {
            writes: HashMap::with_capacity(capacity),
            tombstones: HashSet::with_capacity(if base.is_some() { capacity } else { 0 }),
            base,
        }
    }

    /// Looks `key` up in this layer only.
    ///
    /// A tombstone wins over everything; a local write comes next.
    pub fn resolve(&self, key: &K) -> Resolution<'_, V> {
        if self.tombstones.contains(key) {
            return Resolution::Deleted;
        }
        match self.writes.get(key) {
            Some(value) => Resolution::Found(value),
            None => Resolution::Missing,
        }
    }

    /// Writes `value` for `key`, cancelling any pending deletion of it.
    pub fn put(&mut self, key: K, value: V) {
        if self.has_base() {
            self.tombstones.remove(&key);
        }
        self.writes.insert(key, value);
    }

    /// Iterates over the local writes.
    pub fn writes(&self) -> impl Iterator<Item = (&K, &V)> {
        self.writes.iter()
    }

    /// Iterates over the local tombstones.
    pub fn tombstones(&self) -> impl Iterator<Item = &K> {
        self.tombstones.iter()
    }
}

impl<K: Eq + Hash + Clone, V> Layer<K, V> {
    /// Deletes `key` in this layer.
    ///
    /// With a base, a tombstone is recorded even if nothing below holds the
    /// key. Returns whether a local write existed before the call.
    pub fn remove(&mut self, key: &K) -> bool {
        if self.has_base() && !self.tombstones.contains(key) {
            self.tombstones.insert(key.clone());
        }
        self.writes.remove(key).is_some()
    }

    /// Applies this layer's changes to `base` and empties this layer.
    ///
    /// Tombstones are applied before writes. The caller must pass the layer
    /// this one is based on.
    pub fn merge_into(&mut self, base: &mut Layer<K, V>) {
        debug_assert!(self.has_base(), "merging a layer that has no base");

        for key in self.tombstones.drain() {
            base.remove(&key);
        }
        for (key, value) in self.writes.drain() {
            base.put(key, value);
        }
    }
}

/// A read view over a chain of layers ending at `top`.
#[derive(Debug)]
pub struct LayerChain<'a, K, V> {
    layers: &'a [Layer<K, V>],
    top: LayerId,
}

impl<'a, K: Eq + Hash, V> LayerChain<'a, K, V> {
    /// Creates a view reading from `top` downward through `layers`.
    #[must_use]
    pub fn new(layers: &'a [Layer<K, V>], top: LayerId) -> Self {
        Self { layers, top }
    }

    /// Resolves `key` through the chain.
    ///
    /// The first layer with a write or a tombstone for `key` decides; a miss
    /// at the root means absent.
    pub fn get(&self, key: &K) -> Option<&'a V> {
        let mut cursor = Some(self.top);
        while let Some(id) = cursor {
            let layer = self.layers.get(id.index())?;
            match layer.resolve(key) {
                Resolution::Found(value) => return Some(value),
                Resolution::Deleted => return None,
                Resolution::Missing => cursor = layer.base(),
            }
        }
        None
    }

    /// Returns every key visible from `top`, with its value.
    pub fn entries(&self) -> HashMap<&'a K, &'a V> {
        let mut path = Vec::new();
        let mut cursor = Some(self.top);
        while let Some(id) = cursor {
            let Some(layer) = self.layers.get(id.index()) else {
                break;
            };
            path.push(layer);
            cursor = layer.base();
        }

        let mut visible: HashMap<&'a K, &'a V> = HashMap::new();
        for layer in path.into_iter().rev() {
            for key in layer.tombstones() {
                visible.remove(key);
            }
            visible.extend(layer.writes());
        }
        visible
    }
}
