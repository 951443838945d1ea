//! # `TierCache` Core
//!
//! In-memory, multi-level key-value cache engine.
//!
//! A cache is an ordered sequence of capacity-bounded tiers, each with its
//! own eviction policy. Writes land in the fastest tier; reads probe tiers
//! in order and promote a hit into every faster tier above it.
//!
//! ## Features
//!
//! - **Pluggable Eviction**: LRU and LFU per tier
//! - **Promotion on Read**: lower-tier hits are copied toward level 0
//! - **Dynamic Topology**: levels can be added and removed at runtime
//! - **Linearizable**: every operation runs under one coordinator lock
//!
//! ## Quick Start
//!
//! ```rust
//! use tiercache_core::{EvictionPolicy, MultiLevelCache};
//!
//! let cache: MultiLevelCache<String, String> = MultiLevelCache::new();
//! cache.add_level(3, EvictionPolicy::Lru)?;
//! cache.add_level(2, EvictionPolicy::Lfu)?;
//!
//! cache.put("A".into(), "1".into());
//! assert_eq!(cache.get(&"A".to_string()), Some("1".to_string()));
//!
//! for line in cache.display() {
//!     println!("{line}");
//! }
//! # Ok::<(), tiercache_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{CacheTier, EvictionPolicy, MultiLevelCache, MultiLevelStats, TierStats};
pub use config::{CacheConfig, ConfigError, LevelConfig, LoggingConfig};
pub use error::{Error, Result};
