//! # LayerKV Core
//!
//! In-memory key-value store with nested transactions.
//!
//! Each transaction is a copy-on-write overlay ([`Layer`]) holding its own
//! writes and tombstones on top of the layer beneath it. Reads fall through
//! the overlays until some layer has a value or a tombstone for the key.
//! Committing folds the top overlay into its parent; rolling back drops it.
//! Nothing beneath the top overlay changes until a commit.
//!
//! ## Design Principles
//!
//! - Layers live in one arena owned by [`TransactionalStack`]; a layer names
//!   its base by [`LayerId`]
//! - Reading and writing ([`KvStore`]) are separate capabilities from
//!   transaction control ([`Transactional`])
//! - Ending a transaction that does not exist is a [`StoreError`], not a panic
//! - No internal locking; use [`SharedStack`] for cross-thread access
//!
//! ## Example
//!
//! ```rust
//! use layerkv_core::{KvStore, Transactional, TransactionalStack};
//!
//! let mut store = TransactionalStack::new();
//! store.begin();
//! store.put("x", 1);
//! store.begin();
//! store.put("x", 2);
//! store.commit().unwrap();
//! assert_eq!(store.get(&"x"), Some(&2));
//! store.rollback().unwrap();
//! assert_eq!(store.get(&"x"), None);
//! assert!(store.commit().is_err());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod layer;
mod shared;
mod stack;
mod traits;
mod types;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult, TxnOp};
pub use layer::{Layer, LayerChain, Resolution};
pub use shared::SharedStack;
pub use stack::TransactionalStack;
pub use traits::{KvStore, Transactional};
pub use types::{LayerId, LayerStats};
