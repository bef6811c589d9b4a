//! Remove command - delete a secret field.

use anyhow::Result;
use clap::Args;

use ghostpass::{Config, RecordStore};

use super::{open_session, CommandExecutor};

/// Remove a secret field from a session.
#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Field name to remove
    pub field: String,

    /// Session uuid or name (defaults to the only session)
    #[arg(short, long)]
    pub session: Option<String>,
}

impl CommandExecutor for RemoveCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let store = RecordStore::open(config)?;
        let mut session = open_session(&store, self.session.as_deref())?;

        session.remove(&self.field)?;
        session.export(&store)?;

        println!("Removed field '{}'", self.field);
        Ok(())
    }
}
