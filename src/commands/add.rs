//! Add command - store a new secret field.

use anyhow::Result;
use clap::Args;

use ghostpass::{Config, RecordStore, SecretValue};

use super::{open_session, prompt_password, CommandExecutor};

/// Add a secret field to a session.
///
/// The value is prompted (never echoed) and never passes through argv. The
/// session is reopened, mutated, and re-exported in one step.
#[derive(Args, Debug)]
pub struct AddCommand {
    /// Field name to add
    pub field: String,

    /// Session uuid or name (defaults to the only session)
    #[arg(short, long)]
    pub session: Option<String>,
}

impl CommandExecutor for AddCommand {
    fn execute(&self, config: &Config) -> Result<()> {
        let store = RecordStore::open(config)?;
        let mut session = open_session(&store, self.session.as_deref())?;

        let value = prompt_password("Enter secret value (will not be echoed): ")?;
        session.add(&self.field, SecretValue::new(value))?;
        session.export(&store)?;

        println!("Added field '{}'", self.field);
        Ok(())
    }
}
