//! Development tasks: man pages and shell completions for book-freq.
//!
//! ```text
//! cargo run -p xtask -- man          # target/dist/man/*.1
//! cargo run -p xtask -- completions  # target/dist/completions/*
//! cargo run -p xtask -- dist         # both
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "xtask", about = "book-freq development tasks")]
struct Xtask {
    #[command(subcommand)]
    task: Task,

    /// Output directory
    #[arg(long, global = true, default_value = "target/dist")]
    out_dir: PathBuf,
}

#[derive(Subcommand)]
enum Task {
    /// Generate man pages for the CLI and each subcommand
    Man,
    /// Generate shell completion scripts
    Completions {
        /// Only generate for this shell
        #[arg(long, value_enum)]
        shell: Option<Shell>,
    },
    /// Generate man pages and completions for every shell
    Dist,
}

fn main() -> anyhow::Result<()> {
    let xtask = Xtask::parse();
    match xtask.task {
        Task::Man => man(&xtask.out_dir.join("man")),
        Task::Completions { shell } => completions(&xtask.out_dir.join("completions"), shell),
        Task::Dist => {
            man(&xtask.out_dir.join("man"))?;
            completions(&xtask.out_dir.join("completions"), None)
        }
    }
}

fn man(dir: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let cmd = book_freq::command();
    clap_mangen::generate_to(cmd, dir)
        .with_context(|| format!("failed to write man pages to {}", dir.display()))?;
    println!("man pages → {}", dir.display());
    Ok(())
}

fn completions(dir: &Path, only: Option<Shell>) -> anyhow::Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let shells = match only {
        Some(shell) => vec![shell],
        None => vec![
            Shell::Bash,
            Shell::Elvish,
            Shell::Fish,
            Shell::PowerShell,
            Shell::Zsh,
        ],
    };
    for shell in shells {
        let mut cmd = book_freq::command();
        let path = clap_complete::generate_to(shell, &mut cmd, "book-freq", dir)
            .with_context(|| format!("failed to write {shell} completions"))?;
        println!("{shell} completions → {}", path.display());
    }
    Ok(())
}
