//! Concurrent sharded map shared by the template registry and the in-memory
//! counter store.

use dashmap::DashMap;
use std::borrow::Borrow;
use std::hash::Hash;

/// Thread-safe sharded storage backed by DashMap.
///
/// DashMap provides lock-free reads and fine-grained locking for writes.
/// [`with_entry_mut`](Self::with_entry_mut) holds the shard lock for the
/// whole accessor, which is what makes read-modify-write on one key atomic.
#[derive(Debug)]
pub struct ShardedStorage<K, V>
where
    K: Eq + Hash,
{
    map: DashMap<K, V>,
}

impl<K, V> ShardedStorage<K, V>
where
    K: Eq + Hash,
{
    /// Create a new sharded storage instance.
    pub fn new() -> Self {
        Self {
            map: DashMap::new(),
        }
    }

    /// Insert or replace a value.
    pub fn insert(&self, key: K, value: V) {
        self.map.insert(key, value);
    }

    /// Clone out the value for a key.
    pub fn get_cloned<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    /// Check if a key exists.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Remove a key and return its value.
    pub fn remove<Q>(&self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    /// Access an entry with mutable access, creating it if necessary.
    ///
    /// The entry stays locked until `accessor` returns.
    pub fn with_entry_mut<F, R>(&self, key: K, factory: impl FnOnce() -> V, accessor: F) -> R
    where
        F: FnOnce(&mut V) -> R,
    {
        let mut value = self.map.entry(key).or_insert_with(factory);
        accessor(&mut *value)
    }

    /// Mutate an existing entry, if present.
    ///
    /// # Returns
    /// `None` if the key is absent
    pub fn with_existing_mut<Q, F, R>(&self, key: &Q, accessor: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&mut V) -> R,
    {
        self.map.get_mut(key).map(|mut value| accessor(&mut *value))
    }

    /// Get the number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the storage is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clear all entries.
    pub fn clear(&self) {
        self.map.clear();
    }

    /// Retain only the elements that satisfy the predicate.
    pub fn retain(&self, f: impl FnMut(&K, &mut V) -> bool) {
        self.map.retain(f);
    }
}

impl<K, V> Default for ShardedStorage<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_basic_operations() {
        let storage = ShardedStorage::new();

        storage.insert("key1", 100);
        storage.insert("key2", 200);

        assert_eq!(storage.get_cloned("key1"), Some(100));
        assert_eq!(storage.get_cloned("key2"), Some(200));
        assert_eq!(storage.get_cloned("key3"), None);

        assert_eq!(storage.len(), 2);
        assert!(!storage.is_empty());
    }

    #[test]
    fn test_insert_replaces() {
        let storage = ShardedStorage::new();

        storage.insert("key", 100);
        storage.insert("key", 200);
        assert_eq!(storage.get_cloned("key"), Some(200));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove() {
        let storage = ShardedStorage::new();

        storage.insert("key", 100);
        assert!(storage.contains_key("key"));

        assert_eq!(storage.remove("key"), Some(("key", 100)));
        assert!(!storage.contains_key("key"));
    }

    #[test]
    fn test_clear() {
        let storage = ShardedStorage::new();

        storage.insert("key1", 100);
        storage.insert("key2", 200);
        storage.clear();

        assert_eq!(storage.len(), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_with_entry_mut_creates_then_updates() {
        let storage: ShardedStorage<&str, u32> = ShardedStorage::new();

        let first = storage.with_entry_mut("k", || 0, |v| {
            *v += 1;
            *v
        });
        let second = storage.with_entry_mut("k", || panic!("entry exists"), |v| {
            *v += 1;
            *v
        });

        assert_eq!((first, second), (1, 2));
    }

    #[test]
    fn test_with_existing_mut_skips_missing() {
        let storage: ShardedStorage<&str, u32> = ShardedStorage::new();
        assert_eq!(storage.with_existing_mut("missing", |v| *v), None);

        storage.insert("k", 7);
        assert_eq!(storage.with_existing_mut("k", |v| *v * 2), Some(14));
    }

    #[test]
    fn test_retain() {
        let storage = ShardedStorage::new();
        for i in 0..10 {
            storage.insert(i, i * 10);
        }

        storage.retain(|_, v| *v >= 50);
        assert_eq!(storage.len(), 5);
        assert!(!storage.contains_key(&0));
        assert!(storage.contains_key(&9));
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let storage: Arc<ShardedStorage<&str, u64>> = Arc::new(ShardedStorage::new());
        let mut handles = vec![];

        for _ in 0..8 {
            let storage = Arc::clone(&storage);
            handles.push(thread::spawn(move || {
                for _ in 0..1000 {
                    storage.with_entry_mut("shared", || 0, |v| *v += 1);
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(storage.get_cloned("shared"), Some(8000));
    }
}
