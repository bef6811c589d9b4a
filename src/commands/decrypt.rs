//! Decrypt command - recover a value from plainsight text.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ghostpass::{Config, Session};

use super::CommandExecutor;

/// Recover a secret from plainsight text.
///
/// Needs no session and no password: the embedded frame carries everything.
/// The optional field argument only labels the output line.
#[derive(Args, Debug)]
pub struct DecryptCommand {
    /// Plainsight text given directly (reads from stdin if neither this
    /// nor --input is provided)
    #[arg(long, conflicts_with = "input")]
    pub text: Option<String>,

    /// Read the plainsight text from a file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Label printed with the recovered value; decoding never needs it
    #[arg(short, long)]
    pub field: Option<String>,
}

impl CommandExecutor for DecryptCommand {
    fn execute(&self, _config: &Config) -> Result<()> {
        let text = match (&self.text, &self.input) {
            (Some(text), _) => text.clone(),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
            (None, None) => {
                eprintln!("Reading plainsight text from stdin (Ctrl+D to finish):");
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .context("Failed to read from stdin")?;
                buffer
            }
        };

        let value = Session::decrypt_field(&text)?;
        let rendered = String::from_utf8_lossy(value.as_bytes());

        match &self.field {
            Some(field) => println!("{}: {}", field, rendered),
            None => println!("{}", rendered),
        }
        Ok(())
    }
}
