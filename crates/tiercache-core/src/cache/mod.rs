//! Tiered caching layer for `TierCache`.
//!
//! - [`EvictionPolicy`]: victim selection (LRU, LFU)
//! - [`CacheTier`]: capacity-bounded store applying one policy
//! - [`MultiLevelCache`]: ordered tiers with promotion on read
//!
//! # Thread-Safety & Lock Ordering
//!
//! All structures are thread-safe via `parking_lot::Mutex`.
//!
//! **Lock Hierarchy (acquire in this order to prevent deadlocks):**
//! 1. `MultiLevelCache.levels` (coordinator lock)
//! 2. `CacheTier.inner` of level 0, then level 1, ... (ascending index)
//!
//! A tier lock is never held while acquiring another tier's lock.

mod multilevel;
mod policy;
mod tier;

pub use multilevel::{MultiLevelCache, MultiLevelStats};
pub use policy::EvictionPolicy;
pub use tier::{CacheTier, TierStats};
