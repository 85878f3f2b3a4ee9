use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

struct Slot<V> {
    stored_at: Instant,
    value: Arc<V>,
}

/// TTL-bounded memoization of whole aggregation results, one slot per
/// key. Values are replaced atomically as complete `Arc`s, never
/// mutated in place, so a hit always observes one coherent cycle.
///
/// Concurrent misses on the same key may each recompute and store; the
/// last write wins. That relaxation is deliberate: the cost is a few
/// duplicate upstream cycles, not torn data.
pub struct ResponseCache<K, V> {
    ttl: Duration,
    slots: RwLock<HashMap<K, Slot<V>>>,
}

impl<K: Eq + Hash + Clone, V> ResponseCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Cached value if the slot is younger than the TTL.
    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        let slots = self.slots.read().unwrap();
        slots
            .get(key)
            .filter(|slot| slot.stored_at.elapsed() < self.ttl)
            .map(|slot| Arc::clone(&slot.value))
    }

    /// Store a freshly computed value, resetting the slot's age.
    pub fn put(&self, key: K, value: Arc<V>) {
        let mut slots = self.slots.write().unwrap();
        slots.insert(
            key,
            Slot {
                stored_at: Instant::now(),
                value,
            },
        );
    }
}
