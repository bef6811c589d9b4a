//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor`
//! trait. Commands receive the configuration explicitly, so tests can run
//! the whole tool against a disposable session directory.

mod add;
mod decrypt;
mod destruct;
mod encrypt;
mod init;
mod list;
mod remove;
mod view;

pub use add::AddCommand;
pub use decrypt::DecryptCommand;
pub use destruct::DestructCommand;
pub use encrypt::EncryptCommand;
pub use init::InitCommand;
pub use list::ListCommand;
pub use remove::RemoveCommand;
pub use view::ViewCommand;

use anyhow::{Context, Result};

use ghostpass::{Config, Password, RecordStore, Session};

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements this trait
/// to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command against the supplied configuration.
    fn execute(&self, config: &Config) -> Result<()>;
}

/// Prompt for a password or secret value (input hidden).
pub(crate) fn prompt_password(prompt: &str) -> Result<String> {
    rpassword::prompt_password(prompt).context("Failed to read password")
}

/// Resolves a session record and opens it with a prompted master password.
pub(crate) fn open_session(store: &RecordStore, selector: Option<&str>) -> Result<Session> {
    let record = store.resolve(selector)?;
    let password = prompt_password("Enter MASTER PASSWORD (will not be echoed): ")?;
    Session::open(&record, Password::new(password)).context("Failed to open session")
}
