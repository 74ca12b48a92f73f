use async_trait::async_trait;

use crate::db::Db;
use crate::help::BoxError;
use crate::message::{CommandScope, Response, TextMessage};
use crate::module::Module;

/// Repeats its arguments. Provides no help of its own.
pub struct EchoModule;

#[async_trait]
impl Module for EchoModule {
    fn name(&self) -> &str {
        "Echo"
    }

    fn description(&self) -> &str {
        "Repeat text"
    }

    fn commands(&self) -> &[&str] {
        &["echo"]
    }

    fn scope(&self) -> CommandScope {
        CommandScope::Both
    }

    async fn handle_command(
        &self,
        _command: &str,
        args: &str,
        event: &TextMessage,
        _db: &Db,
    ) -> Result<Option<Vec<Response>>, BoxError> {
        if args.is_empty() {
            return Ok(None);
        }
        Ok(Some(vec![Response::reply_to(event, args)]))
    }
}
