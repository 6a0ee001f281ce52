//! Tests

use assert_matches::assert_matches;
use keyarbor_query::ScanOptions;

use crate::{memory::MemoryStore, Batch, Error, OrderedStore};

fn seeded() -> MemoryStore {
    [
        b"Root".as_slice(),
        b"Robots".as_slice(),
        b"SL2".as_slice(),
        b"a".as_slice(),
        b"b".as_slice(),
        b"c".as_slice(),
    ]
    .iter()
    .map(|key| (key.to_vec(), b"{}".to_vec()))
    .collect()
}

fn scan_keys(store: &MemoryStore, options: &ScanOptions) -> Vec<Vec<u8>> {
    store
        .scan(options)
        .expect("memory scan cannot fail to start")
        .collect::<Result<Vec<_>, _>>()
        .expect("memory scan cannot fail mid-stream")
}

mod point_operations {
    use super::*;

    #[test]
    fn get_returns_stored_values_and_key_not_found_on_miss() {
        let mut store = MemoryStore::new();
        store.put(b"alpha", b"1").unwrap();
        store.put(b"alpha", b"2").unwrap();

        assert_eq!(store.get(b"alpha").unwrap(), b"2");
        assert_matches!(store.get(b"beta"), Err(Error::KeyNotFound(_)));
    }

    #[test]
    fn delete_removes_and_tolerates_absent_keys() {
        let mut store = MemoryStore::new();
        store.put(b"alpha", b"1").unwrap();

        store.delete(b"alpha").unwrap();
        store.delete(b"alpha").unwrap();

        assert!(store.is_empty());
    }

    #[test]
    fn batch_applies_operations_in_order() {
        let mut store = MemoryStore::new();
        store.put(b"doomed", b"x").unwrap();

        let mut batch = Batch::new();
        batch.put(b"kept", b"1");
        batch.put(b"kept", b"2");
        batch.delete(b"doomed");
        assert_eq!(batch.len(), 3);

        store.apply_batch(batch).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(b"kept").unwrap(), b"2");
    }
}

mod scans {
    use super::*;

    #[test]
    fn unbounded_scan_yields_every_key_in_lexicographic_order() {
        let store = seeded();
        let keys = scan_keys(&store, &ScanOptions::everything());
        assert_eq!(keys, [b"Robots".to_vec(), b"Root".to_vec(), b"SL2".to_vec(), b"a".to_vec(), b"b".to_vec(), b"c".to_vec()]);
    }

    #[test]
    fn reverse_scan_yields_descending_order() {
        let store = seeded();
        let forward = scan_keys(&store, &ScanOptions::everything());
        let mut backward = scan_keys(&store, &ScanOptions::with_direction(true));
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn limit_truncates_from_the_scan_direction() {
        let store = seeded();

        let options = ScanOptions::plan(b"", b"", b"", "2", false);
        assert_eq!(scan_keys(&store, &options), [b"Robots".to_vec(), b"Root".to_vec()]);

        let options = ScanOptions::plan(b"", b"", b"", "2", true);
        assert_eq!(scan_keys(&store, &options), [b"c".to_vec(), b"b".to_vec()]);
    }

    #[test]
    fn bounds_are_honored() {
        let store = seeded();

        let options = ScanOptions::plan(b"a", b"b", b"", "100", false);
        assert_eq!(scan_keys(&store, &options), [b"a".to_vec(), b"b".to_vec()]);

        let options = ScanOptions::plan(b"", b"", b"S", "100", false);
        assert_eq!(scan_keys(&store, &options), [b"SL2".to_vec()]);
    }

    #[test]
    fn inverted_bounds_yield_an_empty_sequence_instead_of_panicking() {
        let store = seeded();
        let options = ScanOptions::plan(b"z", b"a", b"", "100", false);
        assert!(scan_keys(&store, &options).is_empty());
    }
}
