//! List command - show stored sessions.

use anyhow::Result;
use clap::Args;

use ghostpass::{Config, RecordStore};

use super::CommandExecutor;

/// List every session in the session directory.
#[derive(Args, Debug)]
pub struct ListCommand {}

impl CommandExecutor for ListCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let store = RecordStore::open(config)?;
        let records = store.list()?;

        if records.is_empty() {
            println!("No sessions found in {}", config.session_dir.display());
            return Ok(());
        }

        for record in records {
            match &record.name {
                Some(name) => println!("{}  {}", record.uuid, name),
                None => println!("{}", record.uuid),
            }
        }
        Ok(())
    }
}
