use tokio::io::{AsyncBufReadExt, BufReader};

use crate::message::TextMessage;

use super::*;

#[derive(Debug, PartialEq)]
pub(super) enum ConsoleInput {
    Message(TextMessage),
    Reload,
    History,
    Quit,
    Empty,
}

/// Parses `<source> [#channel] <text>`, or one of `/reload`, `/history`, `/quit`.
pub(super) fn parse_console_line(line: &str) -> ConsoleInput {
    let line = line.trim();
    match line {
        "" => return ConsoleInput::Empty,
        "/reload" => return ConsoleInput::Reload,
        "/history" => return ConsoleInput::History,
        "/quit" => return ConsoleInput::Quit,
        _ => {}
    }

    let (source, rest) = match line.split_once(char::is_whitespace) {
        Some((source, rest)) => (source, rest.trim_start()),
        None => return ConsoleInput::Empty,
    };

    if rest.starts_with('#') {
        match rest.split_once(char::is_whitespace) {
            Some((channel, text)) => {
                ConsoleInput::Message(TextMessage::in_channel(source, channel, text.trim()))
            }
            None => ConsoleInput::Empty,
        }
    } else {
        ConsoleInput::Message(TextMessage::private(source, rest))
    }
}

impl Bot {
    /// Reads messages from stdin until EOF or `/quit`, printing every reply.
    pub async fn run(mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        for module in self.registry.all() {
            log::debug!("Module {}: {}", module.name(), module.description());
        }
        log::info!(
            "{} ready (help trigger \"{}{}\"), reading \"<source> [#channel] <text>\" lines from stdin",
            self.config.bot.name,
            self.config.bot.command_prefix,
            self.helper.trigger()
        );

        while let Some(line) = lines.next_line().await? {
            match parse_console_line(&line) {
                ConsoleInput::Message(event) => self.handle_message(&event).await,
                ConsoleInput::Reload => {
                    if let Err(e) = self.reload() {
                        log::error!("Help engine disabled: {}", e);
                    }
                }
                ConsoleInput::History => self.print_history(),
                ConsoleInput::Quit => break,
                ConsoleInput::Empty => continue,
            }

            for response in self.flush_outgoing() {
                println!("-> {}: {}", response.destination, response.text);
            }
        }

        self.helper.unload(&mut self.triggers);
        log::info!("Input closed, shutting down");
        Ok(())
    }

    fn print_history(&self) {
        match self.db.recent_messages(20) {
            Ok(messages) => {
                for msg in messages.iter().rev() {
                    let when = chrono::DateTime::from_timestamp(msg.timestamp, 0)
                        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_else(|| msg.timestamp.to_string());
                    println!(
                        "[{}] {} {} -> {}{}: {}",
                        when,
                        msg.direction,
                        msg.source,
                        msg.target,
                        msg.channel
                            .as_deref()
                            .map(|c| format!(" ({})", c))
                            .unwrap_or_default(),
                        msg.text
                    );
                }
            }
            Err(e) => log::error!("Failed to read history: {}", e),
        }
    }
}
