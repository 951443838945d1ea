//! Eviction policies for cache tiers.
//!
//! A policy is pure decision logic: it maps an entry's access metadata to a
//! [`Rank`], and the tier keeps its entries in an ordered index keyed by that
//! rank. The entry with the lowest rank is always the next victim, so victim
//! selection is a lookup of the first index slot.
//!
//! | Policy | Rank | Victim |
//! |--------|------|--------|
//! | LRU | `(0, last_touch)` | least recently touched |
//! | LFU | `(frequency, last_touch)` | lowest frequency, least recently touched on ties |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Eviction policy of a cache tier, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EvictionPolicy {
    /// Least-Recently-Used: evicts the entry least recently read or written.
    #[default]
    #[serde(rename = "LRU", alias = "lru")]
    Lru,
    /// Least-Frequently-Used: evicts the entry with the lowest access count.
    #[serde(rename = "LFU", alias = "lfu")]
    Lfu,
}

/// Access metadata tracked per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AccessMeta {
    /// Number of accesses since the entry was (re)inserted, starting at 1.
    pub(crate) frequency: u64,
    /// Tier-local logical clock value of the last touch. Unique per tier.
    pub(crate) last_touch: u64,
}

impl AccessMeta {
    /// Metadata for a freshly inserted entry.
    #[must_use]
    pub(crate) const fn fresh(tick: u64) -> Self {
        Self {
            frequency: 1,
            last_touch: tick,
        }
    }

    /// Records one access at `tick`.
    pub(crate) fn touch(&mut self, tick: u64) {
        self.frequency = self.frequency.saturating_add(1);
        self.last_touch = tick;
    }
}

/// Position of an entry in a tier's eviction order.
///
/// Ranks are totally ordered; the smallest rank in a tier is the victim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct Rank {
    primary: u64,
    tick: u64,
}

impl EvictionPolicy {
    /// All supported policies.
    pub const ALL: [Self; 2] = [Self::Lru, Self::Lfu];

    /// Returns the canonical tag of this policy.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lru => "LRU",
            Self::Lfu => "LFU",
        }
    }

    /// Computes the eviction rank of an entry under this policy.
    #[must_use]
    pub(crate) const fn rank(&self, meta: AccessMeta) -> Rank {
        match self {
            Self::Lru => Rank {
                primary: 0,
                tick: meta.last_touch,
            },
            Self::Lfu => Rank {
                primary: meta.frequency,
                tick: meta.last_touch,
            },
        }
    }

    /// Selects the victim key from a rank-ordered index.
    ///
    /// Returns `None` only when the index is empty.
    #[must_use]
    pub(crate) fn select_victim<'a, K>(&self, order: &'a BTreeMap<Rank, K>) -> Option<&'a K> {
        order.first_key_value().map(|(_, key)| key)
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LRU" => Ok(Self::Lru),
            "LFU" => Ok(Self::Lfu),
            _ => Err(Error::InvalidConfig(format!(
                "unknown eviction policy '{}', expected one of: LRU, LFU",
                s.trim()
            ))),
        }
    }
}
