//! Store configuration.

/// Configuration for creating a [`crate::TransactionalStack`].
///
/// Capacities are allocation hints. They never change what the store does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of keys the root layer is pre-sized for.
    pub root_capacity: usize,

    /// Number of keys each transaction layer is pre-sized for.
    pub layer_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root_capacity: 0,
            layer_capacity: 0,
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root layer capacity.
    #[must_use]
    pub const fn root_capacity(mut self, capacity: usize) -> Self {
        self.root_capacity = capacity;
        self
    }

    /// Sets the per-transaction layer capacity.
    #[must_use]
    pub const fn layer_capacity(mut self, capacity: usize) -> Self {
        self.layer_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.root_capacity, 0);
        assert_eq!(config.layer_capacity, 0);
    }

    #[test]
    fn builder_pattern() {
        let config = StoreConfig::new().root_capacity(1024).layer_capacity(16);

        assert_eq!(config.root_capacity, 1024);
        assert_eq!(config.layer_capacity, 16);
    }
}
