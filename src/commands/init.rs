//! Init command - create a new session.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use zeroize::Zeroize;

use ghostpass::{Config, Corpus, Password, RecordStore, Session};

use super::{prompt_password, CommandExecutor};

/// Create a new session backed by a carrier text.
///
/// Prompts for the master password (never echoed), validates the carrier,
/// and writes an empty encrypted session record.
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Path to the carrier text file used for plainsight encoding
    #[arg(short, long)]
    pub carrier: PathBuf,

    /// Optional human-readable session name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for InitCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let corpus = Corpus::from_file(&self.carrier)
            .with_context(|| format!("Failed to read carrier from {}", self.carrier.display()))?;

        if self.verbose {
            eprintln!("Carrier holds {} payload bits", corpus.capacity_bits());
        }

        let mut password = prompt_password("Enter MASTER PASSWORD (will not be echoed): ")?;
        let mut confirm = prompt_password("Confirm MASTER PASSWORD: ")?;
        let matching = password == confirm;
        confirm.zeroize();
        if !matching {
            password.zeroize();
            bail!("Passwords do not match");
        }

        let store = RecordStore::open(config)?;
        let session = Session::init_state(Password::new(password), &corpus, self.name.clone())?;
        let record = session.export(&store)?;

        println!("Initialized session {}", record.uuid);
        if let Some(name) = &record.name {
            println!("Name: {}", name);
        }
        Ok(())
    }
}
