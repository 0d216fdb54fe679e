//! Property-based test generators using proptest.
//!
//! Keys come from a deliberately small alphabet so that random operation
//! sequences keep hitting the same keys across layers.

use layerkv_core::{KvStore, Transactional};
use proptest::prelude::*;

/// Strategy for generating keys from a small, colliding key space.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-f]").expect("Invalid regex")
}

/// Strategy for generating values.
pub fn value_strategy() -> impl Strategy<Value = i32> {
    -100..100i32
}

/// A single operation against a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOperation {
    /// Write a value.
    Put {
        /// Key
        key: String,
        /// Value
        value: i32,
    },
    /// Delete a key.
    Remove {
        /// Key
        key: String,
    },
    /// Read a key.
    Get {
        /// Key
        key: String,
    },
    /// Open a nested transaction.
    Begin,
    /// Commit the innermost transaction.
    Commit,
    /// Roll back the innermost transaction.
    Rollback,
}

/// What applying a [`StoreOperation`] produced.
///
/// `remove`'s return value is deliberately not captured: it reports
/// layer-local presence, which the reference model cannot reproduce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The operation had no result.
    Done,
    /// The value read by a `Get`.
    Read(Option<i32>),
    /// A commit or rollback was rejected.
    Rejected,
}

/// Applies `op` to any store with both capabilities.
pub fn apply<S>(store: &mut S, op: &StoreOperation) -> Outcome
where
    S: KvStore<String, i32> + Transactional,
{
    match op {
        StoreOperation::Put { key, value } => {
            store.put(key.clone(), *value);
            Outcome::Done
        }
        StoreOperation::Remove { key } => {
            store.remove(key);
            Outcome::Done
        }
        StoreOperation::Get { key } => Outcome::Read(store.get(key).copied()),
        StoreOperation::Begin => {
            store.begin();
            Outcome::Done
        }
        StoreOperation::Commit => match store.commit() {
            Ok(()) => Outcome::Done,
            Err(_) => Outcome::Rejected,
        },
        StoreOperation::Rollback => match store.rollback() {
            Ok(()) => Outcome::Done,
            Err(_) => Outcome::Rejected,
        },
    }
}

/// Strategy for generating reads and writes only.
pub fn data_operation_strategy() -> impl Strategy<Value = StoreOperation> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOperation::Put { key, value }),
        2 => key_strategy().prop_map(|key| StoreOperation::Remove { key }),
        2 => key_strategy().prop_map(|key| StoreOperation::Get { key }),
    ]
}

/// Strategy for generating any operation, transaction control included.
pub fn store_operation_strategy() -> impl Strategy<Value = StoreOperation> {
    prop_oneof![
        8 => data_operation_strategy(),
        2 => Just(StoreOperation::Begin),
        1 => Just(StoreOperation::Commit),
        1 => Just(StoreOperation::Rollback),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOperation>> {
    prop::collection::vec(store_operation_strategy(), min_ops..max_ops)
}

/// Strategy for generating a sequence of reads and writes.
pub fn data_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOperation>> {
    prop::collection::vec(data_operation_strategy(), min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Creates a configuration for thorough tests.
    #[must_use]
    pub fn thorough() -> Self {
        Self {
            cases: 1024,
            max_shrink_iters: 10000,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
