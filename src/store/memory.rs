//! In-memory storage implementation

use super::{KeyValueStore, ScanOptions, ScanPage};
use bytes::Bytes;
use parking_lot::RwLock;
use siphasher::sip::SipHasher13;
use std::collections::HashMap;
use std::hash::BuildHasherDefault;

/// Type alias for our hash map with SipHasher
type StoreMap = HashMap<Bytes, Bytes, BuildHasherDefault<SipHasher13>>;

/// In-memory key-value store
///
/// A single reader/writer lock guards the whole map. Reads (GET, EXISTS,
/// KEYS, SCAN) share it, writes (SET, DEL) take it exclusively. No lock is
/// ever held past the end of the call that took it.
pub struct MemoryStore {
    /// The main storage map
    store: RwLock<StoreMap>,
}

impl MemoryStore {
    /// Create a new memory store with default capacity
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    /// Create a new memory store with specified initial capacity
    pub fn with_capacity(capacity: usize) -> Self {
        MemoryStore {
            store: RwLock::new(HashMap::with_capacity_and_hasher(
                capacity,
                BuildHasherDefault::<SipHasher13>::default(),
            )),
        }
    }

    /// Get the number of keys
    pub fn len(&self) -> usize {
        self.store.read().len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn set(&self, key: Bytes, value: Bytes) {
        self.store.write().insert(key, value);
    }

    fn get(&self, key: &[u8]) -> Option<Bytes> {
        self.store.read().get(key).cloned()
    }

    fn del(&self, key: &[u8]) -> bool {
        self.store.write().remove(key).is_some()
    }

    fn exists(&self, key: &[u8]) -> bool {
        self.store.read().contains_key(key)
    }

    fn keys(&self) -> Vec<Bytes> {
        self.store.read().keys().cloned().collect()
    }

    /// Walk the map's iteration order from `cursor`
    ///
    /// The listing is rebuilt on every call, so pages taken across concurrent
    /// writes may skip or repeat keys.
    fn scan(&self, cursor: usize, options: &ScanOptions) -> ScanPage {
        let store = self.store.read();
        let total = store.len();

        if cursor >= total || !options.admits_strings() {
            return ScanPage::done();
        }

        let mut keys = Vec::new();
        let mut examined = 0;

        for key in store.keys().skip(cursor) {
            if options.count > 0 && keys.len() >= options.count {
                break;
            }
            examined += 1;
            if options.matches(key) {
                keys.push(key.clone());
            }
        }

        let next = cursor + examined;
        ScanPage {
            cursor: if next >= total { 0 } else { next },
            keys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    fn filled(n: usize) -> MemoryStore {
        let store = MemoryStore::new();
        for i in 0..n {
            store.set(Bytes::from(format!("key:{}", i)), Bytes::from(format!("value{}", i)));
        }
        store
    }

    fn scan_all(store: &MemoryStore, options: &ScanOptions) -> Vec<Bytes> {
        let mut seen = Vec::new();
        let mut cursor = 0;
        loop {
            let page = store.scan(cursor, options);
            let done = page.is_done();
            cursor = page.cursor;
            seen.extend(page.keys);
            if done {
                return seen;
            }
        }
    }

    #[test]
    fn test_basic_set_get() {
        let store = MemoryStore::new();
        store.set(Bytes::from("key1"), Bytes::from("value1"));

        assert_eq!(store.get(b"key1"), Some(Bytes::from("value1")));
        assert_eq!(store.get(b"missing"), None);
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set(Bytes::from("key1"), Bytes::from("old"));
        store.set(Bytes::from("key1"), Bytes::from("new"));

        assert_eq!(store.get(b"key1"), Some(Bytes::from("new")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete() {
        let store = MemoryStore::new();
        store.set(Bytes::from("key1"), Bytes::from("value1"));

        assert!(store.del(b"key1"));
        assert!(!store.exists(b"key1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_absent_key() {
        let store = filled(3);

        assert!(!store.del(b"nope"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_exists() {
        let store = MemoryStore::new();
        store.set(Bytes::from("key1"), Bytes::from("value1"));

        assert!(store.exists(b"key1"));
        assert!(!store.exists(b"key2"));
    }

    #[test]
    fn test_keys_snapshot() {
        let store = filled(5);
        let keys: HashSet<Bytes> = store.keys().into_iter().collect();

        assert_eq!(keys.len(), 5);
        assert!(keys.contains(&Bytes::from("key:3")));
        assert!(MemoryStore::new().keys().is_empty());
    }

    #[test]
    fn test_scan_visits_every_key() {
        let store = filled(57);
        let seen: HashSet<Bytes> = scan_all(&store, &ScanOptions::all().with_count(10))
            .into_iter()
            .collect();

        assert_eq!(seen.len(), 57);
    }

    #[test]
    fn test_scan_unbounded_count_finishes_in_one_call() {
        let store = filled(20);
        let page = store.scan(0, &ScanOptions::all());

        assert_eq!(page.cursor, 0);
        assert_eq!(page.keys.len(), 20);
    }

    #[test]
    fn test_scan_cursor_past_end() {
        let store = filled(4);

        assert_eq!(store.scan(4, &ScanOptions::all()), ScanPage::done());
        assert_eq!(store.scan(100, &ScanOptions::all()), ScanPage::done());
        assert_eq!(MemoryStore::new().scan(0, &ScanOptions::all()), ScanPage::done());
    }

    #[test]
    fn test_scan_cursor_advances_by_examined_keys() {
        let store = filled(10);
        for i in 0..10 {
            store.set(Bytes::from(format!("other:{}", i)), Bytes::from("x"));
        }

        let options = ScanOptions::all().with_pattern("key:*").with_count(3);
        let page = store.scan(0, &options);

        assert!(page.keys.len() <= 3);
        assert!(page.cursor == 0 || page.cursor >= page.keys.len());

        let seen: HashSet<Bytes> = scan_all(&store, &options).into_iter().collect();
        assert_eq!(seen.len(), 10);
        assert!(seen.iter().all(|k| k.starts_with(b"key:")));
    }

    #[test]
    fn test_scan_hostile_pattern_terminates() {
        let store = MemoryStore::new();
        store.set(Bytes::from(vec![b'a'; 4096]), Bytes::from("v"));
        store.set(Bytes::from("aab"), Bytes::from("v"));

        let options = ScanOptions::all().with_pattern("*a*a*a*a*a*a*a*a*b");
        assert!(scan_all(&store, &options).is_empty());

        let options = ScanOptions::all().with_pattern("*a*b");
        assert_eq!(scan_all(&store, &options), vec![Bytes::from("aab")]);
    }

    #[test]
    fn test_scan_type_filter() {
        let store = filled(8);

        assert_eq!(scan_all(&store, &ScanOptions::all().with_type("string")).len(), 8);
        assert_eq!(scan_all(&store, &ScanOptions::all().with_type("STRING")).len(), 8);
        assert_eq!(store.scan(0, &ScanOptions::all().with_type("hash")), ScanPage::done());
    }

    #[test]
    fn test_concurrent_disjoint_sets() {
        let store = Arc::new(MemoryStore::new());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..500 {
                        store.set(
                            Bytes::from(format!("t{}:{}", t, i)),
                            Bytes::from(format!("{}", i)),
                        );
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 8 * 500);
        assert_eq!(store.get(b"t7:499"), Some(Bytes::from("499")));
    }
}
