//! Store fixtures for tests.

use crate::generators::{apply, StoreOperation};
use layerkv_core::{KvStore, Transactional, TransactionalStack};

/// The store type every fixture and property test works with.
pub type TestStore = TransactionalStack<String, i32>;

/// Creates a store with `pairs` written to the root layer.
pub fn populated_store(pairs: &[(&str, i32)]) -> TestStore {
    let mut store = TestStore::new();
    for (key, value) in pairs {
        store.put((*key).to_string(), *value);
    }
    store
}

/// Creates a store holding `pairs` at the root with `depth` empty
/// transactions open on top.
pub fn nested_store(pairs: &[(&str, i32)], depth: usize) -> TestStore {
    let mut store = populated_store(pairs);
    for _ in 0..depth {
        store.begin();
    }
    store
}

/// Replays `ops` against `store`, ignoring outcomes.
pub fn replay<S>(store: &mut S, ops: &[StoreOperation])
where
    S: KvStore<String, i32> + Transactional,
{
    for op in ops {
        apply(store, op);
    }
}
