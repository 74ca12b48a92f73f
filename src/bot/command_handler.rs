use crate::message::{MessageCapable, TextMessage};

use super::*;

impl Bot {
    pub(super) async fn dispatch_command(&self, event: &TextMessage, trimmed_text: &str) {
        let body = match trimmed_text.strip_prefix(self.config.bot.command_prefix.as_str()) {
            Some(body) => body,
            None => return,
        };

        if let Err(wait) = self.rate_limiter.acquire(event.source()) {
            log::warn!("Rate limited: {} (next command in {}s)", event.source(), wait.as_secs() + 1);
            return;
        }

        if let Some(words) = self.helper.match_request(event, body) {
            self.helper.handle_help(event, words, &self.outgoing).await;
            return;
        }

        let (command, args) = match body.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (body, ""),
        };

        let module = match self.registry.find_by_command(command, &event.scope()) {
            Some(m) => m,
            None => return,
        };

        match module.handle_command(command, args, event, &self.db).await {
            Ok(Some(responses)) => self.queue_responses(responses),
            Ok(None) => {}
            Err(e) => {
                log::error!("Module {} error: {}", module.name(), e);
            }
        }
    }
}
