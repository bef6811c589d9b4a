//! Encrypt command - re-encode a field's value as plainsight text.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ghostpass::{Config, Corpus, RecordStore};

use super::{open_session, CommandExecutor};

/// Re-encode a field's value as plainsight text for out-of-band sharing.
///
/// The output reads like the carrier, word for word; only letter case
/// differs. The carrier itself is never modified.
#[derive(Args, Debug)]
pub struct EncryptCommand {
    /// Field whose value gets re-encoded
    pub field: String,

    /// Path to the carrier text file
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// Session uuid or name (defaults to the only session)
    #[arg(short, long)]
    pub session: Option<String>,

    /// Write the plainsight text to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for EncryptCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let corpus = Corpus::from_file(&self.carrier)
            .with_context(|| format!("Failed to read carrier from {}", self.carrier.display()))?;

        if self.verbose {
            eprintln!("Carrier holds {} payload bits", corpus.capacity_bits());
        }

        let store = RecordStore::open(config)?;
        let session = open_session(&store, self.session.as_deref())?;

        let stego = session.encrypt_field(&self.field, &corpus)?;

        match &self.output {
            Some(path) => {
                fs::write(path, &stego)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("Plainsight text written to {}", path.display());
            }
            None => println!("{}", stego),
        }
        Ok(())
    }
}
