use std::sync::Arc;

use async_trait::async_trait;

use crate::db::Db;
use crate::help::{BoxError, HelpCallback, Words};
use crate::message::{CommandScope, MessageCapable, Response, TextMessage};
use crate::module::Module;

pub struct PingModule {
    prefix: String,
}

impl PingModule {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }
}

#[async_trait]
impl Module for PingModule {
    fn name(&self) -> &str {
        "Ping"
    }

    fn description(&self) -> &str {
        "Liveness check"
    }

    fn commands(&self) -> &[&str] {
        &["ping"]
    }

    fn scope(&self) -> CommandScope {
        CommandScope::Both
    }

    async fn handle_command(
        &self,
        _command: &str,
        _args: &str,
        event: &TextMessage,
        _db: &Db,
    ) -> Result<Option<Vec<Response>>, BoxError> {
        let text = format!("Pong, {}!", event.source());
        Ok(Some(vec![Response::reply_to(event, text)]))
    }

    fn help_callback(self: Arc<Self>) -> Option<Arc<dyn HelpCallback>> {
        Some(self as Arc<dyn HelpCallback>)
    }
}

#[async_trait]
impl HelpCallback for PingModule {
    async fn help(
        &self,
        event: &TextMessage,
        words: &Words,
    ) -> Result<Option<Vec<Response>>, BoxError> {
        let text = match (words.len(), words.get(1)) {
            (1, _) => format!(
                "Ping checks that the bot is alive. Commands: {}ping.",
                self.prefix
            ),
            (2, Some(command)) if command.eq_ignore_ascii_case("ping") => format!(
                "Usage: {}ping. Replies with \"Pong\" to whoever asked.",
                self.prefix
            ),
            _ => return Ok(None),
        };
        Ok(Some(vec![Response::reply_to(event, text)]))
    }
}
