//! Command language shared by script execution and the REPL.
//!
//! One command per line:
//!
//! ```text
//! add-level <capacity> <policy>
//! remove-level <index>
//! put <key> <value>
//! get <key>
//! display
//! stats
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::str::FromStr;

use thiserror::Error;
use tiercache_core::{Error as CacheError, MultiLevelCache};

/// The cache type driven by the CLI.
pub type Cache = MultiLevelCache<String, String>;

/// Command parsing errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// Unknown command word.
    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    /// Wrong number of arguments.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// Argument is not an integer.
    #[error("invalid {what} '{value}': expected an integer")]
    InvalidNumber {
        /// Which argument failed.
        what: &'static str,
        /// Raw argument.
        value: String,
    },
}

/// A parsed command.
///
/// Numeric arguments stay signed so that range checks happen in the engine
/// and surface as its error codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddLevel { capacity: i64, policy: String },
    RemoveLevel(i64),
    Put { key: String, value: String },
    Get(String),
    Display,
    Stats,
    Help,
}

/// Parses one line. Returns `Ok(None)` for blank lines and comments.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let cmd = parts[0].to_lowercase();
    let args = &parts[1..];

    let command = match cmd.as_str() {
        "add-level" => match args {
            [capacity, policy] => Command::AddLevel {
                capacity: parse_number("capacity", capacity)?,
                policy: (*policy).to_string(),
            },
            _ => return Err(ParseError::Usage("add-level <capacity> <LRU|LFU>")),
        },
        "remove-level" => match args {
            [index] => Command::RemoveLevel(parse_number("index", index)?),
            _ => return Err(ParseError::Usage("remove-level <index>")),
        },
        "put" => match args {
            [key, value] => Command::Put {
                key: (*key).to_string(),
                value: (*value).to_string(),
            },
            _ => return Err(ParseError::Usage("put <key> <value>")),
        },
        "get" => match args {
            [key] => Command::Get((*key).to_string()),
            _ => return Err(ParseError::Usage("get <key>")),
        },
        "display" => Command::Display,
        "stats" => Command::Stats,
        "help" => Command::Help,
        other => return Err(ParseError::UnknownCommand(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_number<T: FromStr>(what: &'static str, value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        what,
        value: value.to_string(),
    })
}

/// Executes a command, returning the lines to print.
pub fn execute(cache: &Cache, command: Command) -> tiercache_core::Result<Vec<String>> {
    let lines = match command {
        Command::AddLevel { capacity, policy } => {
            let capacity = usize::try_from(capacity).map_err(|_| {
                CacheError::InvalidConfig(format!(
                    "tier capacity must be greater than 0, got {capacity}"
                ))
            })?;
            cache.add_level_str(capacity, &policy)?;
            Vec::new()
        }
        Command::RemoveLevel(index) => {
            cache.remove_level_signed(index)?;
            Vec::new()
        }
        Command::Put { key, value } => {
            cache.put(key, value);
            Vec::new()
        }
        Command::Get(key) => {
            let value = cache.get(&key);
            vec![format!(
                "Get {key}: {}",
                value.as_deref().unwrap_or("null")
            )]
        }
        Command::Display => cache.display(),
        Command::Stats => format_stats(cache),
        Command::Help => help_lines(),
    };
    Ok(lines)
}

fn format_stats(cache: &Cache) -> Vec<String> {
    let stats = cache.stats();
    let mut lines: Vec<String> = stats
        .levels
        .iter()
        .enumerate()
        .map(|(i, level)| {
            format!(
                "L{}: {}/{} {} hits={} misses={} evictions={}",
                i + 1,
                level.len,
                level.capacity,
                level.policy,
                level.hits,
                level.misses,
                level.evictions
            )
        })
        .collect();
    lines.push(format!(
        "total: hits={} misses={} promotions={} hit_rate={:.1}%",
        stats.hits,
        stats.misses,
        stats.promotions,
        stats.hit_rate() * 100.0
    ));
    lines
}

fn help_lines() -> Vec<String> {
    [
        "add-level <capacity> <LRU|LFU>  Append a cache level",
        "remove-level <index>            Remove a level (0-based)",
        "put <key> <value>               Write into L1",
        "get <key>                       Read, promoting lower-level hits",
        "display                         Show every level",
        "stats                           Show hit/miss/eviction counters",
    ]
    .iter()
    .map(|s| (*s).to_string())
    .collect()
}

/// Demo failures: a script line that does not parse, or an engine error.
#[derive(Error, Debug)]
pub enum DemoError {
    /// A script line failed to parse.
    #[error("demo line '{line}': {source}")]
    Parse {
        /// Offending line.
        line: &'static str,
        /// Parse failure.
        source: ParseError,
    },

    /// The engine rejected a command.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// The canonical two-level scenario.
const DEMO_SCRIPT: [&str; 9] = [
    "add-level 3 LRU",
    "add-level 2 LFU",
    "put A 1",
    "put B 2",
    "put C 3",
    "get A",
    "put D 4",
    "get C",
    "display",
];

/// Runs the canonical two-level scenario and returns its output.
pub fn demo() -> Result<Vec<String>, DemoError> {
    run_fixed(&DEMO_SCRIPT)
}

/// Runs built-in lines against a fresh cache, stopping at the first failure.
pub(crate) fn run_fixed(script: &[&'static str]) -> Result<Vec<String>, DemoError> {
    let cache = Cache::new();
    let mut output = Vec::new();
    for &line in script {
        let command = parse(line).map_err(|source| DemoError::Parse { line, source })?;
        if let Some(command) = command {
            output.extend(execute(&cache, command)?);
        }
    }
    Ok(output)
}
