//! View command - print a secret field's value.

use anyhow::Result;
use clap::Args;

use ghostpass::{Config, RecordStore};

use super::{open_session, CommandExecutor};

/// Show a secret field's value on stdout.
#[derive(Args, Debug)]
pub struct ViewCommand {
    /// Field name to show
    pub field: String,

    /// Session uuid or name (defaults to the only session)
    #[arg(short, long)]
    pub session: Option<String>,
}

impl CommandExecutor for ViewCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let store = RecordStore::open(config)?;
        let session = open_session(&store, self.session.as_deref())?;

        let value = session.view(&self.field)?;
        println!("{}", String::from_utf8_lossy(value.as_bytes()));
        Ok(())
    }
}
