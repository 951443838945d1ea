//! Multi-level cache orchestrator.
//!
//! Owns an ordered sequence of [`CacheTier`]s. Level 0 is the fastest and is
//! checked first and written first:
//!
//! ```text
//!   put(k, v) ──► L1 ──(evicted entries are discarded)
//!
//!   get(k) ──► L1 ──miss──► L2 ──miss──► ... ──► None
//!               ▲            │ hit
//!               └─promote────┘
//! ```
//!
//! All operations hold a single coordinator lock for their full duration,
//! including nested tier locking and promotion fan-out, so every call is
//! linearizable. Tier locks are only ever taken while the coordinator lock
//! is held, in ascending level order.

#![allow(clippy::cast_precision_loss)] // Precision loss acceptable for hit rate calculation

use parking_lot::Mutex;
use std::fmt::{self, Display};
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};

use super::policy::EvictionPolicy;
use super::tier::{CacheTier, TierStats};
use crate::config::CacheConfig;
use crate::error::{Error, Result};

/// Statistics for the whole cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiLevelStats {
    /// Per-level statistics, in level order.
    pub levels: Vec<TierStats>,
    /// `get` calls answered by any level.
    pub hits: u64,
    /// `get` calls answered by no level.
    pub misses: u64,
    /// Tier writes performed by promotion.
    pub promotions: u64,
}

impl MultiLevelStats {
    /// Calculate total hit rate (0.0 to 1.0).
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

/// Ordered sequence of cache tiers with promotion on read.
pub struct MultiLevelCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Coordinator lock over the level sequence.
    levels: Mutex<Vec<CacheTier<K, V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
    promotions: AtomicU64,
}

impl<K, V> MultiLevelCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a cache with no levels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            levels: Mutex::new(Vec::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            promotions: AtomicU64::new(0),
        }
    }

    /// Build a cache with the levels described by `config`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if any level is invalid; no cache is
    /// built in that case.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        let cache = Self::new();
        for level in &config.levels {
            cache.add_level_str(level.capacity, &level.policy)?;
        }
        Ok(cache)
    }

    /// Number of levels.
    #[must_use]
    pub fn level_count(&self) -> usize {
        self.levels.lock().len()
    }

    /// Append a level at the lowest priority.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if `capacity` is zero. The level
    /// sequence is unchanged on failure.
    pub fn add_level(&self, capacity: usize, policy: EvictionPolicy) -> Result<()> {
        let mut levels = self.levels.lock();

        let tier = CacheTier::new(capacity, policy).inspect_err(|e| {
            tracing::warn!(capacity, %policy, error = %e, "Rejected cache level");
        })?;
        levels.push(tier);

        tracing::info!(
            level = levels.len(),
            capacity,
            %policy,
            "Added cache level"
        );
        Ok(())
    }

    /// Append a level, parsing the policy from its tag (`"LRU"`, `"LFU"`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero capacity or an unknown tag.
    pub fn add_level_str(&self, capacity: usize, policy: &str) -> Result<()> {
        let policy = policy.parse::<EvictionPolicy>().inspect_err(|e| {
            tracing::warn!(capacity, error = %e, "Rejected cache level");
        })?;
        self.add_level(capacity, policy)
    }

    /// Remove the level at `index`, shifting later levels up by one.
    ///
    /// Entries held by the removed level are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index >= level_count()`. The level
    /// sequence is unchanged on failure.
    pub fn remove_level(&self, index: usize) -> Result<()> {
        let mut levels = self.levels.lock();

        if index >= levels.len() {
            tracing::warn!(index, levels = levels.len(), "Rejected level removal");
            return Err(out_of_range(index, levels.len()));
        }

        let removed = levels.remove(index);
        tracing::info!(
            index,
            discarded = removed.len(),
            remaining = levels.len(),
            "Removed cache level"
        );
        Ok(())
    }

    /// Remove the level at a signed `index`.
    ///
    /// Negative indices are rejected the same way as indices past the end,
    /// which lets callers forward user input without a separate check.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `index` is negative or
    /// `index >= level_count()`. The level sequence is unchanged on failure.
    pub fn remove_level_signed(&self, index: i64) -> Result<()> {
        match usize::try_from(index) {
            Ok(index) => self.remove_level(index),
            Err(_) => {
                let len = self.level_count();
                tracing::warn!(index, levels = len, "Rejected level removal");
                Err(Error::OutOfRange { index, len })
            }
        }
    }

    /// Get a value, probing levels in order.
    ///
    /// On a hit at level `i`, the pair is written into every level `0..i`
    /// before returning. The level that produced the hit is not written to.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        let levels = self.levels.lock();

        for (index, level) in levels.iter().enumerate() {
            if let Some(value) = level.get(key) {
                self.hits.fetch_add(1, Ordering::Relaxed);
                if index > 0 {
                    self.promote(&levels[..index], key, &value);
                }
                return Some(value);
            }
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    /// Write a pair into level 0 only. No-op when there are no levels.
    pub fn put(&self, key: K, value: V) {
        let levels = self.levels.lock();

        match levels.first() {
            Some(first) => first.put(key, value),
            None => tracing::trace!("put ignored: cache has no levels"),
        }
    }

    /// Write a pair directly into level `index`, bypassing routing.
    ///
    /// Used to warm a lower level; no promotion or cascade happens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the level does not exist.
    pub fn put_level(&self, index: usize, key: K, value: V) -> Result<()> {
        self.with_level(index, |level| level.put(key, value))
    }

    /// Copy the entries of level `index` in its current order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the level does not exist.
    pub fn snapshot_level(&self, index: usize) -> Result<Vec<(K, V)>> {
        self.with_level(index, CacheTier::snapshot)
    }

    /// Read `key` from level `index` without recording the access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the level does not exist.
    pub fn peek_level(&self, index: usize, key: &K) -> Result<Option<V>> {
        self.with_level(index, |level| level.peek(key))
    }

    /// Number of entries in level `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the level does not exist.
    pub fn level_len(&self, index: usize) -> Result<usize> {
        self.with_level(index, CacheTier::len)
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> MultiLevelStats {
        let levels = self.levels.lock();
        MultiLevelStats {
            levels: levels.iter().map(CacheTier::stats).collect(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            promotions: self.promotions.load(Ordering::Relaxed),
        }
    }

    /// Writes a hit into the higher-priority levels, in ascending order.
    fn promote(&self, upper: &[CacheTier<K, V>], key: &K, value: &V) {
        for level in upper {
            level.put(key.clone(), value.clone());
        }
        self.promotions.fetch_add(upper.len() as u64, Ordering::Relaxed);
        tracing::debug!(from = upper.len(), "Promoted entry to upper levels");
    }

    fn with_level<R>(&self, index: usize, f: impl FnOnce(&CacheTier<K, V>) -> R) -> Result<R> {
        let levels = self.levels.lock();
        levels
            .get(index)
            .map(f)
            .ok_or_else(|| out_of_range(index, levels.len()))
    }
}

fn out_of_range(index: usize, len: usize) -> Error {
    Error::OutOfRange {
        index: i64::try_from(index).unwrap_or(i64::MAX),
        len,
    }
}

impl<K, V> MultiLevelCache<K, V>
where
    K: Hash + Eq + Clone + Display,
    V: Clone + Display,
{
    /// Render every level as `L<n> Cache: [k1: v1, k2: v2]`, in level order.
    #[must_use]
    pub fn display(&self) -> Vec<String> {
        let levels = self.levels.lock();
        levels
            .iter()
            .enumerate()
            .map(|(index, level)| format!("L{} Cache: {}", index + 1, level.format_entries()))
            .collect()
    }
}

impl<K, V> Default for MultiLevelCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for MultiLevelCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiLevelCache")
            .field("levels", &*self.levels.lock())
            .finish()
    }
}
