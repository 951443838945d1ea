//! Fuzz target for multi-level cache operation sequences.
//!
//! Drives arbitrary interleavings of topology changes, writes and reads and
//! checks after every step that:
//! - no level holds more entries than its capacity
//! - a value returned by `get` is present in level 0 afterwards
//! - rejected topology changes leave the level count unchanged

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tiercache_core::{EvictionPolicy, MultiLevelCache};

/// Upper bound on level capacity to keep iterations fast.
const MAX_CAPACITY: usize = 16;

#[derive(Debug, Arbitrary)]
enum Op {
    AddLevel { capacity: u8, lfu: bool },
    RemoveLevel(i8),
    Put(u8, u16),
    PutLevel(u8, u8, u16),
    Get(u8),
}

fuzz_target!(|ops: Vec<Op>| {
    let cache: MultiLevelCache<u8, u16> = MultiLevelCache::new();

    for op in ops {
        let before = cache.level_count();
        match op {
            Op::AddLevel { capacity, lfu } => {
                let capacity = usize::from(capacity) % (MAX_CAPACITY + 1);
                let policy = if lfu { EvictionPolicy::Lfu } else { EvictionPolicy::Lru };
                if cache.add_level(capacity, policy).is_err() {
                    assert_eq!(cache.level_count(), before);
                }
            }
            Op::RemoveLevel(index) => {
                if cache.remove_level_signed(i64::from(index)).is_err() {
                    assert_eq!(cache.level_count(), before);
                }
            }
            Op::Put(k, v) => cache.put(k, v),
            Op::PutLevel(index, k, v) => {
                let _ = cache.put_level(usize::from(index), k, v);
            }
            Op::Get(k) => {
                if let Some(value) = cache.get(&k) {
                    assert_eq!(cache.peek_level(0, &k).ok().flatten(), Some(value));
                }
            }
        }

        for level in cache.stats().levels {
            assert!(level.len <= level.capacity);
        }
    }
});
