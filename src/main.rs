//! Ghostpass - secrets hidden in plain sight.
//!
//! Thin CLI layer: argument parsing, password prompting, and dispatch. All
//! real work happens in the ghostpass library.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ghostpass::Config;

mod commands;
use commands::{
    AddCommand, CommandExecutor, DecryptCommand, DestructCommand, EncryptCommand, InitCommand,
    ListCommand, RemoveCommand, ViewCommand,
};

/// Ghostpass - secrets hidden in plain sight
///
/// An encrypted, password-protected store of named secrets, plus a
/// plainsight codec that re-encodes any single secret as ordinary-looking
/// text for sharing.
#[derive(Parser)]
#[command(name = "ghostpass")]
#[command(version)]
#[command(about = "Secret manager that hides ciphertext in plain sight")]
struct Cli {
    /// Session directory (defaults to ~/.ghostpass)
    #[arg(long, global = true, value_name = "DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new session
    Init(InitCommand),

    /// List stored sessions
    List(ListCommand),

    /// Add a secret field to a session
    Add(AddCommand),

    /// Remove a secret field from a session
    Remove(RemoveCommand),

    /// Show a secret field's value
    View(ViewCommand),

    /// Re-encode a field's value as plainsight text
    Encrypt(EncryptCommand),

    /// Recover a value from plainsight text
    Decrypt(DecryptCommand),

    /// Destroy a session and delete its record
    Destruct(DestructCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.dir {
        Some(dir) => Config::with_dir(dir),
        None => Config::default_location()?,
    };

    match cli.command {
        Commands::Init(cmd) => cmd.execute(&config),
        Commands::List(cmd) => cmd.execute(&config),
        Commands::Add(cmd) => cmd.execute(&config),
        Commands::Remove(cmd) => cmd.execute(&config),
        Commands::View(cmd) => cmd.execute(&config),
        Commands::Encrypt(cmd) => cmd.execute(&config),
        Commands::Decrypt(cmd) => cmd.execute(&config),
        Commands::Destruct(cmd) => cmd.execute(&config),
    }
}
