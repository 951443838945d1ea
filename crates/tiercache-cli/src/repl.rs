//! REPL (Read-Eval-Print-Loop) over the cache command language

use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Editor, Helper, Highlighter, Hinter, Validator};
use std::path::PathBuf;

use crate::command::{self, Cache};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Completer, Helper, Highlighter, Hinter, Validator)]
struct ReplHelper;

/// Run the interactive REPL against `cache`.
pub fn run(cache: &Cache) -> Result<()> {
    println!("\n{}", format!("TierCache v{VERSION} - REPL").bold().cyan());
    println!("Levels: {}", cache.level_count().to_string().green());
    println!(
        "Type {} for commands, {} to exit\n",
        "help".yellow(),
        "quit".yellow()
    );

    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper));

    let history_path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tiercache_history");
    let _ = rl.load_history(&history_path);

    loop {
        let prompt = "tiercache> ".bold().blue().to_string();
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if matches!(line, "quit" | "exit") {
                    break;
                }

                match command::parse(line) {
                    Ok(Some(cmd)) => match command::execute(cache, cmd) {
                        Ok(lines) => {
                            for out in lines {
                                println!("{out}");
                            }
                        }
                        Err(e) => println!("{} {}", "Error:".red().bold(), e),
                    },
                    Ok(None) => (),
                    Err(e) => println!("{} {}", "Error:".red().bold(), e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("Use quit to exit");
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                println!("{} {:?}", "Error:".red().bold(), err);
                break;
            }
        }
    }

    let _ = rl.save_history(&history_path);
    println!("Goodbye!");
    Ok(())
}
