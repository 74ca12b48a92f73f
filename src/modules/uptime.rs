use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::db::Db;
use crate::help::{BoxError, HelpCallback, Words};
use crate::message::{CommandScope, Response, TextMessage};
use crate::module::Module;

/// The two most significant units of `secs`, e.g. "2d 3h" or "5m 12s".
fn format_uptime(secs: u64) -> String {
    const UNITS: [(u64, &str); 4] = [(86400, "d"), (3600, "h"), (60, "m"), (1, "s")];

    let start = UNITS
        .iter()
        .position(|(size, _)| secs >= *size)
        .unwrap_or(UNITS.len() - 1)
        .min(UNITS.len() - 2);
    let mut rest = secs;
    let mut parts = Vec::with_capacity(2);
    for (size, suffix) in &UNITS[start..start + 2] {
        parts.push(format!("{}{}", rest / size, suffix));
        rest %= size;
    }
    if secs < 60 {
        return parts.pop().unwrap_or_default();
    }
    parts.join(" ")
}

pub struct UptimeModule {
    started: Instant,
    prefix: String,
}

impl UptimeModule {
    pub fn new(prefix: &str) -> Self {
        Self {
            started: Instant::now(),
            prefix: prefix.to_string(),
        }
    }
}

#[async_trait]
impl Module for UptimeModule {
    fn name(&self) -> &str {
        "Uptime"
    }

    fn description(&self) -> &str {
        "Bot uptime & stats"
    }

    fn commands(&self) -> &[&str] {
        &["uptime"]
    }

    fn scope(&self) -> CommandScope {
        CommandScope::Both
    }

    async fn handle_command(
        &self,
        _command: &str,
        _args: &str,
        event: &TextMessage,
        db: &Db,
    ) -> Result<Option<Vec<Response>>, BoxError> {
        let uptime = format_uptime(self.started.elapsed().as_secs());
        let msgs_in = db.message_count("in").unwrap_or(0);
        let msgs_out = db.message_count("out").unwrap_or(0);

        let text = format!(
            "Uptime: {}\nMessages: {} in / {} out",
            uptime, msgs_in, msgs_out
        );

        Ok(Some(vec![Response::reply_to(event, text)]))
    }

    fn help_callback(self: Arc<Self>) -> Option<Arc<dyn HelpCallback>> {
        Some(self as Arc<dyn HelpCallback>)
    }
}

#[async_trait]
impl HelpCallback for UptimeModule {
    async fn help(
        &self,
        event: &TextMessage,
        words: &Words,
    ) -> Result<Option<Vec<Response>>, BoxError> {
        let text = match (words.len(), words.get(1)) {
            (1, _) => format!(
                "Uptime reports how long the bot has been running. Commands: {}uptime.",
                self.prefix
            ),
            (2, Some(command)) if command.eq_ignore_ascii_case("uptime") => format!(
                "Usage: {}uptime. Shows uptime and the number of messages seen and sent.",
                self.prefix
            ),
            _ => return Ok(None),
        };
        Ok(Some(vec![Response::reply_to(event, text)]))
    }
}
