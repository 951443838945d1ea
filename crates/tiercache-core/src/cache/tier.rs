//! Capacity-bounded cache tier with a pluggable eviction policy.
//!
//! Every operation runs under the tier's own exclusive lock, so each
//! check-then-act sequence (existence check, eviction, insertion) is atomic
//! with respect to other threads using the same tier.

#![allow(clippy::cast_precision_loss)] // Precision loss acceptable for hit rate calculation

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Write as _};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use super::policy::{AccessMeta, EvictionPolicy, Rank};
use crate::error::{Error, Result};

/// Statistics for a single tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierStats {
    /// Number of `get` calls that found the key.
    pub hits: u64,
    /// Number of `get` calls that did not find the key.
    pub misses: u64,
    /// Number of entries removed by eviction.
    pub evictions: u64,
    /// Current number of entries.
    pub len: usize,
    /// Maximum number of entries.
    pub capacity: usize,
    /// Eviction policy of the tier.
    pub policy: EvictionPolicy,
}

impl TierStats {
    /// Calculate hit rate (0.0 to 1.0).
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Thread-safe, capacity-bounded key-value store.
///
/// Entries are kept in an ordered index keyed by their policy [`Rank`], so
/// eviction, reordering and snapshots never scan the whole tier.
pub struct CacheTier<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Maximum capacity, always positive.
    capacity: usize,
    policy: EvictionPolicy,
    /// Internal data protected by an exclusive lock.
    inner: Mutex<TierInner<K, V>>,
    /// Statistics (atomic for lock-free reads).
    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

struct Slot<V> {
    value: V,
    meta: AccessMeta,
}

struct TierInner<K, V> {
    /// Key -> value and access metadata.
    entries: FxHashMap<K, Slot<V>>,
    /// Rank -> key (first = next victim, last = most recently touched).
    order: BTreeMap<Rank, K>,
    /// Logical clock, advanced on every touch.
    clock: u64,
}

impl<K, V> TierInner<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Reads a value and records the access.
    fn touch(&mut self, key: &K, policy: EvictionPolicy) -> Option<V> {
        let tick = self.tick();
        let slot = self.entries.get_mut(key)?;
        self.order.remove(&policy.rank(slot.meta));
        slot.meta.touch(tick);
        self.order.insert(policy.rank(slot.meta), key.clone());
        Some(slot.value.clone())
    }

    /// Inserts or replaces an entry with fresh metadata.
    fn insert_fresh(&mut self, key: K, value: V, policy: EvictionPolicy) {
        let meta = AccessMeta::fresh(self.tick());
        if let Some(old) = self.entries.insert(key.clone(), Slot { value, meta }) {
            self.order.remove(&policy.rank(old.meta));
        }
        self.order.insert(policy.rank(meta), key);
    }

    fn evict_one(&mut self, policy: EvictionPolicy) -> Option<(K, V)> {
        let victim = policy.select_victim(&self.order)?.clone();
        let slot = self.entries.remove(&victim)?;
        self.order.remove(&policy.rank(slot.meta));
        Some((victim, slot.value))
    }
}

impl<K, V> CacheTier<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a new tier.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `capacity` is zero.
    pub fn new(capacity: usize, policy: EvictionPolicy) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidConfig(
                "tier capacity must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            capacity,
            policy,
            inner: Mutex::new(TierInner {
                entries: FxHashMap::default(),
                order: BTreeMap::new(),
                clock: 0,
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        })
    }

    /// Get the capacity of the tier.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the eviction policy of the tier.
    #[must_use]
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Get the current number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    /// Check if the tier is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }

    /// Check whether `key` is present, without touching it.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().entries.contains_key(key)
    }

    /// Get a value by key, recording the access.
    ///
    /// Under LRU the entry becomes the most recently used; under LFU its
    /// frequency counter is incremented. The reorder happens under the same
    /// lock acquisition as the read.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let value = self.inner.lock().touch(key, self.policy);

        if value.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        value
    }

    /// Get a value without recording the access.
    #[must_use]
    pub fn peek(&self, key: &K) -> Option<V> {
        self.inner
            .lock()
            .entries
            .get(key)
            .map(|slot| slot.value.clone())
    }

    /// Access count of `key` since its last insertion.
    #[must_use]
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner
            .lock()
            .entries
            .get(key)
            .map(|slot| slot.meta.frequency)
    }

    /// Insert or overwrite a key-value pair.
    ///
    /// Overwriting replaces the value and resets the entry's metadata as for
    /// a fresh insertion. Inserting a new key into a full tier evicts one
    /// victim first.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.inner.lock();

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.capacity {
            if inner.evict_one(self.policy).is_some() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(
                    policy = %self.policy,
                    capacity = self.capacity,
                    "Evicted entry to admit new key"
                );
            }
        }

        inner.insert_fresh(key, value, self.policy);
    }

    /// Evict exactly one entry chosen by the tier's policy.
    ///
    /// Returns the evicted pair, or `None` if the tier is empty.
    pub fn evict(&self) -> Option<(K, V)> {
        let evicted = self.inner.lock().evict_one(self.policy);
        if evicted.is_some() {
            self.evictions.fetch_add(1, Ordering::Relaxed);
        }
        evicted
    }

    /// Copy the entries in eviction order (next victim first).
    ///
    /// For LRU this is least- to most-recently used. Ordering is not mutated.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(K, V)> {
        let inner = self.inner.lock();
        inner
            .order
            .values()
            .filter_map(|key| {
                inner
                    .entries
                    .get(key)
                    .map(|slot| (key.clone(), slot.value.clone()))
            })
            .collect()
    }

    /// Get tier statistics.
    #[must_use]
    pub fn stats(&self) -> TierStats {
        TierStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            len: self.len(),
            capacity: self.capacity,
            policy: self.policy,
        }
    }
}

impl<K, V> CacheTier<K, V>
where
    K: Hash + Eq + Clone + Display,
    V: Clone + Display,
{
    /// Render the entries as `[k1: v1, k2: v2]`, in snapshot order.
    #[must_use]
    pub fn format_entries(&self) -> String {
        let mut out = String::from("[");
        for (i, (key, value)) in self.snapshot().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            // Writing to a String cannot fail.
            let _ = write!(out, "{key}: {value}");
        }
        out.push(']');
        out
    }
}

impl<K, V> fmt::Debug for CacheTier<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheTier")
            .field("capacity", &self.capacity)
            .field("policy", &self.policy)
            .field("len", &self.len())
            .finish()
    }
}
