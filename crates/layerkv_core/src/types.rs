//! Core type definitions for LayerKV.

use std::fmt;

/// Position of a layer in its stack's arena.
///
/// Index 0 is always the root layer. A layer's base is the layer at the
/// next lower index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub usize);

impl LayerId {
    /// The root layer.
    pub const ROOT: Self = Self(0);

    /// Creates a new layer ID.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    /// Returns true for the root layer.
    #[must_use]
    pub const fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer:{}", self.0)
    }
}

/// Pending change counts for one layer of a stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerStats {
    /// Depth of the layer (0 = root).
    pub depth: usize,
    /// Number of keys written in this layer.
    pub writes: usize,
    /// Number of keys deleted in this layer.
    pub tombstones: usize,
}
