//! # LayerKV Testkit
//!
//! Test utilities for LayerKV.
//!
//! This crate provides:
//! - Property-based test generators using proptest
//! - A copy-per-level reference model for differential testing
//! - Store fixtures
//!
//! ## Usage
//!
//! ```rust
//! use layerkv_testkit::prelude::*;
//!
//! let mut store = nested_store(&[("a", 1)], 1);
//! let mut model = ModelStore::new();
//! model.put("a".to_string(), 1);
//! model.begin();
//!
//! let op = StoreOperation::Get { key: "a".into() };
//! assert_eq!(apply(&mut store, &op), apply(&mut model, &op));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod model;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::model::*;
    pub use layerkv_core::{KvStore, Transactional};
}

pub use fixtures::*;
pub use generators::*;
pub use model::*;
