//! Property tests for nested transaction semantics.

use layerkv_testkit::prelude::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(PropTestConfig::default().to_proptest_config())]

    /// Every operation agrees with the copy-per-level model.
    #[test]
    fn matches_reference_model(ops in operation_sequence_strategy(0, 200)) {
        let mut store = TestStore::new();
        let mut model = ModelStore::new();

        for op in &ops {
            prop_assert_eq!(apply(&mut store, op), apply(&mut model, op), "op {:?}", op);
            prop_assert_eq!(store.depth(), model.depth());
        }
        prop_assert_eq!(&store.snapshot(), model.visible());
    }

    #[test]
    fn read_your_write(
        ops in operation_sequence_strategy(0, 100),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut store = TestStore::new();
        replay(&mut store, &ops);

        store.put(key.clone(), value);
        prop_assert_eq!(store.get(&key), Some(&value));
    }

    #[test]
    fn remove_shadows_everything_below(
        ops in operation_sequence_strategy(0, 100),
        key in key_strategy(),
    ) {
        let mut store = TestStore::new();
        replay(&mut store, &ops);

        store.remove(&key);
        prop_assert_eq!(store.get(&key), None);
        prop_assert!(!store.contains(&key));
    }

    #[test]
    fn rollback_restores_prior_state(
        setup in operation_sequence_strategy(0, 100),
        body in data_sequence_strategy(0, 50),
    ) {
        let mut store = TestStore::new();
        replay(&mut store, &setup);
        let before = store.snapshot();
        let depth = store.depth();

        store.begin();
        replay(&mut store, &body);
        store.rollback().unwrap();

        prop_assert_eq!(store.depth(), depth);
        prop_assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn single_commit_equals_direct_write(
        setup in data_sequence_strategy(0, 50),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut direct = TestStore::new();
        replay(&mut direct, &setup);
        let mut via_txn = direct.clone();

        direct.put(key.clone(), value);

        via_txn.begin();
        via_txn.put(key.clone(), value);
        via_txn.commit().unwrap();

        prop_assert_eq!(via_txn.get(&key), Some(&value));
        prop_assert_eq!(via_txn.snapshot(), direct.snapshot());
    }

    #[test]
    fn nested_commit_stays_in_parent(
        setup in data_sequence_strategy(0, 50),
        key in key_strategy(),
        value in value_strategy(),
    ) {
        let mut store = TestStore::new();
        replay(&mut store, &setup);
        let root_view = store.snapshot();

        store.begin();
        store.begin();
        store.put(key.clone(), value);
        store.commit().unwrap();

        prop_assert_eq!(store.depth(), 1);
        prop_assert_eq!(store.get(&key), Some(&value));

        store.rollback().unwrap();
        prop_assert_eq!(store.snapshot(), root_view);
    }

    #[test]
    fn guard_failures_change_nothing(setup in data_sequence_strategy(0, 50)) {
        let mut store = TestStore::new();
        replay(&mut store, &setup);
        let before = store.snapshot();

        prop_assert!(store.commit().unwrap_err().is_no_active_transaction());
        prop_assert!(store.rollback().unwrap_err().is_no_active_transaction());
        prop_assert_eq!(store.depth(), 0);
        prop_assert_eq!(store.snapshot(), before);
    }

    /// A layer never holds the same key as both a write and a tombstone.
    #[test]
    fn writes_and_tombstones_are_disjoint(ops in operation_sequence_strategy(0, 200)) {
        let mut store = TestStore::new();
        replay(&mut store, &ops);

        for depth in 0..=store.depth() {
            let layer = store.layer(layerkv_core::LayerId::new(depth)).unwrap();
            for key in layer.tombstones() {
                prop_assert!(layer.writes().all(|(k, _)| k != key));
            }
            if depth == 0 {
                prop_assert_eq!(layer.tombstone_count(), 0);
            }
        }
    }
}
