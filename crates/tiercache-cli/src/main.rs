#![allow(clippy::doc_markdown)]
//! `TierCache` CLI - driver for the multi-level cache engine
//!
//! Usage:
//!   `tiercache demo`
//!   `tiercache run ./commands.txt`
//!   `tiercache --config ./tiercache.toml repl`

mod command;
#[cfg(test)]
mod command_tests;
mod repl;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tiercache_core::{CacheConfig, MultiLevelCache};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tiercache")]
#[command(
    author,
    version,
    about = "TierCache CLI - Multi-level cache engine"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file describing the initial cache levels
    #[arg(short, long, global = true, env = "TIERCACHE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the reference two-level scenario
    Demo,

    /// Execute a command script, one command per line
    Run {
        /// Path to the script file
        script: PathBuf,
    },

    /// Start interactive REPL
    Repl,
}

fn load_config(path: Option<&Path>) -> Result<CacheConfig> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            CacheConfig::load_from_path(path)?
        }
        None => CacheConfig::load()?,
    };
    config.validate()?;
    Ok(config)
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_script(cache: &command::Cache, script: &Path) -> Result<()> {
    let content = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    tracing::debug!(script = %script.display(), lines = content.lines().count(), "Executing script");

    for (n, line) in content.lines().enumerate() {
        let cmd = command::parse(line)
            .with_context(|| format!("{}:{}: {}", script.display(), n + 1, line.trim()))?;
        let Some(cmd) = cmd else { continue };

        let output = command::execute(cache, cmd)
            .with_context(|| format!("{}:{}: {}", script.display(), n + 1, line.trim()))?;
        for out in output {
            println!("{out}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging.level);

    match cli.command {
        Commands::Demo => {
            for line in command::demo()? {
                println!("{line}");
            }
        }
        Commands::Run { script } => {
            let cache = MultiLevelCache::from_config(&config)?;
            run_script(&cache, &script)?;
        }
        Commands::Repl => {
            let cache = MultiLevelCache::from_config(&config)?;
            repl::run(&cache)?;
        }
    }

    Ok(())
}
