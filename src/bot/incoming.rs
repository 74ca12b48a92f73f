use crate::message::{MessageCapable, TextMessage};

use super::*;

impl Bot {
    /// Handles one incoming message. Replies are left in the outgoing queue.
    pub async fn handle_message(&self, event: &TextMessage) {
        let text = event.text.trim();
        if text.is_empty() {
            return;
        }

        log::info!(
            "Text from {} ({}): {}",
            event.source(),
            event.channel.as_deref().unwrap_or("private"),
            text
        );

        if let Err(e) = self.db.log_message(
            event.source(),
            event.channel.as_deref().unwrap_or(&self.config.bot.name),
            event.channel.as_deref(),
            text,
            "in",
        ) {
            log::error!("Failed to log incoming message: {}", e);
        }

        self.dispatch_command(event, text).await;
    }
}
