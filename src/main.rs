mod calc;
mod cmd;
mod data;
mod picker;
mod ui;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datepick", about = "calendar date-time picker")]
struct Cli {
    /// Path to the data directory containing the config file (default: ./config)
    #[arg(long, default_value = "./config")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config.yaml
    Init,
    /// Print the 42-cell display grid for a month
    Grid {
        year: i32,
        /// Month number, 1-12
        month: u32,
        /// Emit the cells as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Evaluate a quick range preset (today, last7days, thismonth)
    Range {
        preset: String,
        /// Evaluate against this date instead of the wall clock (YYYY-MM-DD)
        #[arg(long)]
        today: Option<String>,
        /// Emit the range as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Resolve data_dir to an absolute path so file I/O works regardless of
    // future directory changes within the process.
    let data_dir = if cli.data_dir.is_absolute() {
        cli.data_dir.clone()
    } else {
        std::env::current_dir()?.join(&cli.data_dir)
    };
    data::persistence::set_data_dir(data_dir.clone());

    // Auto-init when the interactive picker needs a config directory that
    // is missing or empty.
    if cli.command.is_none() && dir_needs_init(&data_dir) {
        eprintln!(
            "Data directory '{}' is missing or empty - running init...",
            data_dir.display()
        );
        cmd::init::run()?;
    }

    match cli.command {
        None => cmd::root::run(),
        Some(Commands::Init) => cmd::init::run(),
        Some(Commands::Grid { year, month, json }) => cmd::grid::run(year, month, json),
        Some(Commands::Range { preset, today, json }) => {
            cmd::range::run(&preset, today.as_deref(), json)
        }
    }
}

/// Returns true when `dir` does not exist or exists but contains no files.
fn dir_needs_init(dir: &std::path::Path) -> bool {
    if !dir.exists() {
        return true;
    }
    dir.read_dir()
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_dir_needs_init_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("does_not_exist");
        assert!(dir_needs_init(&missing));
    }

    #[test]
    fn test_dir_needs_init_empty_dir() {
        let tmp = TempDir::new().unwrap();
        assert!(dir_needs_init(tmp.path()));
    }

    #[test]
    fn test_dir_needs_init_nonempty_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("file.txt"), "data").unwrap();
        assert!(!dir_needs_init(tmp.path()));
    }
}
