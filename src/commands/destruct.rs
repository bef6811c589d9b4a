//! Destruct command - destroy a session.

use anyhow::Result;
use clap::Args;

use ghostpass::{Config, RecordStore};

use super::{open_session, CommandExecutor};

/// Destroy a session: verify the master password, wipe the in-memory
/// state, and delete the persisted record. A wrong password destroys
/// nothing.
#[derive(Args, Debug)]
pub struct DestructCommand {
    /// Session uuid or name (defaults to the only session)
    #[arg(short, long)]
    pub session: Option<String>,
}

impl CommandExecutor for DestructCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let store = RecordStore::open(config)?;
        let session = open_session(&store, self.session.as_deref())?;

        let uuid = session.uuid();
        session.destruct(&store)?;

        println!("Destroyed session {}", uuid);
        Ok(())
    }
}
