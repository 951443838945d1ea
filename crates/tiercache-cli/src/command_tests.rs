//! Tests for `command` module

use super::command::*;

#[test]
fn test_parse_blank_and_comment() {
    assert_eq!(parse("   "), Ok(None));
    assert_eq!(parse("# setup levels"), Ok(None));
}

#[test]
fn test_parse_commands() {
    assert_eq!(
        parse("add-level 3 LRU"),
        Ok(Some(Command::AddLevel {
            capacity: 3,
            policy: "LRU".to_string()
        }))
    );
    assert_eq!(parse("remove-level 1"), Ok(Some(Command::RemoveLevel(1))));
    assert_eq!(
        parse("PUT A 1"),
        Ok(Some(Command::Put {
            key: "A".to_string(),
            value: "1".to_string()
        }))
    );
    assert_eq!(parse("get A"), Ok(Some(Command::Get("A".to_string()))));
    assert_eq!(parse("display"), Ok(Some(Command::Display)));
    assert_eq!(parse("stats"), Ok(Some(Command::Stats)));
}

#[test]
fn test_parse_errors() {
    assert!(matches!(parse("evict"), Err(ParseError::UnknownCommand(_))));
    assert!(matches!(parse("put A"), Err(ParseError::Usage(_))));
    assert!(matches!(
        parse("remove-level one"),
        Err(ParseError::InvalidNumber { what: "index", .. })
    ));
}

#[test]
fn test_parse_keeps_negative_numbers_for_the_engine() {
    assert_eq!(parse("remove-level -1"), Ok(Some(Command::RemoveLevel(-1))));
    assert_eq!(
        parse("add-level -2 LRU"),
        Ok(Some(Command::AddLevel {
            capacity: -2,
            policy: "LRU".to_string()
        }))
    );
}

#[test]
fn test_execute_negative_index_is_out_of_range() {
    let cache = Cache::new();
    cache.add_level(2, tiercache_core::EvictionPolicy::Lru).unwrap();

    let negative = execute(&cache, Command::RemoveLevel(-1)).unwrap_err();
    let past_end = execute(&cache, Command::RemoveLevel(1)).unwrap_err();

    assert_eq!(negative.code(), "TIER-002");
    assert_eq!(past_end.code(), "TIER-002");
    assert_eq!(cache.level_count(), 1);
}

#[test]
fn test_execute_negative_capacity_is_invalid_config() {
    let cache = Cache::new();

    let err = execute(
        &cache,
        Command::AddLevel {
            capacity: -1,
            policy: "LRU".to_string(),
        },
    )
    .unwrap_err();

    assert_eq!(err.code(), "TIER-001");
    assert_eq!(cache.level_count(), 0);
}

#[test]
fn test_execute_get_missing_prints_null() {
    let cache = Cache::new();
    cache.add_level(1, tiercache_core::EvictionPolicy::Lru).unwrap();

    let lines = execute(&cache, Command::Get("X".to_string())).unwrap();

    assert_eq!(lines, vec!["Get X: null".to_string()]);
}

#[test]
fn test_execute_propagates_engine_errors() {
    let cache = Cache::new();

    let err = execute(&cache, Command::RemoveLevel(0)).unwrap_err();

    assert_eq!(err.code(), "TIER-002");
}

#[test]
fn test_execute_stats() {
    let cache = Cache::new();
    cache.add_level(2, tiercache_core::EvictionPolicy::Lfu).unwrap();
    cache.put("A".to_string(), "1".to_string());
    let _ = cache.get(&"A".to_string());

    let lines = execute(&cache, Command::Stats).unwrap();

    assert_eq!(lines[0], "L1: 1/2 LFU hits=1 misses=0 evictions=0");
    assert!(lines[1].starts_with("total: hits=1 misses=0 promotions=0"));
}

#[test]
fn test_run_fixed_stops_at_unparseable_line() {
    let err = run_fixed(&["add-level 1 LRU", "put A", "display"]).unwrap_err();

    assert!(matches!(
        err,
        DemoError::Parse {
            line: "put A",
            source: ParseError::Usage(_)
        }
    ));
}

#[test]
fn test_run_fixed_propagates_engine_errors() {
    let err = run_fixed(&["remove-level 0"]).unwrap_err();

    assert!(matches!(err, DemoError::Cache(ref e) if e.code() == "TIER-002"));
}

#[test]
fn test_demo_output() {
    let output = demo().unwrap();

    assert_eq!(
        output,
        vec![
            "Get A: 1".to_string(),
            "Get C: 3".to_string(),
            "L1 Cache: [A: 1, D: 4, C: 3]".to_string(),
            "L2 Cache: []".to_string(),
        ]
    );
}
