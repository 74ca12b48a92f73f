use async_trait::async_trait;

use crate::db::Db;
use crate::help::{BoxError, HELPER_IDENTITY};
use crate::message::{CommandScope, Response, TextMessage};
use crate::module::Module;

/// Directory entry for the help engine, so "!help" lists it among the loaded modules.
/// The trigger itself is routed to the engine by the bot, never through this module.
pub struct HelpModule;

#[async_trait]
impl Module for HelpModule {
    fn name(&self) -> &str {
        HELPER_IDENTITY
    }

    fn description(&self) -> &str {
        "Help on modules and commands"
    }

    fn commands(&self) -> &[&str] {
        &[]
    }

    fn scope(&self) -> CommandScope {
        CommandScope::Both
    }

    async fn handle_command(
        &self,
        _command: &str,
        _args: &str,
        _event: &TextMessage,
        _db: &Db,
    ) -> Result<Option<Vec<Response>>, BoxError> {
        Ok(None)
    }
}
