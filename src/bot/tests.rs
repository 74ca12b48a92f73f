use super::*;
use crate::help::ReloadState;
use crate::message::{Destination, Response, TextMessage};
use std::path::Path;

const CONFIG: &str = r##"
    [bot]
    name = "TestBot"
    db_path = ":memory:"
    rate_limit_commands = 0

    [modules.helper]
    enabled = true

    [modules.ping]
    enabled = true

    [modules.uptime]
    enabled = true

    [modules.echo]
    enabled = true
"##;

fn bot_from(content: &str) -> Bot {
    let config = Arc::new(Config::parse(content).unwrap());
    let db = Arc::new(Db::open(Path::new(":memory:")).unwrap());
    let registry = modules::build_registry(&config);
    Bot::new(config, db, registry).unwrap()
}

fn test_bot() -> Bot {
    bot_from(CONFIG)
}

async fn replies(bot: &Bot, text: &str) -> Vec<String> {
    bot.handle_message(&TextMessage::private("alice", text)).await;
    bot.flush_outgoing().into_iter().map(|r| r.text).collect()
}

#[test]
fn test_new_binds_trigger() {
    let bot = test_bot();
    assert!(matches!(bot.helper.state(), ReloadState::TriggerBound(_)));
    assert!(bot.triggers.is_claimed("help"));
    assert_eq!(bot.module_count(), 4);
}

#[tokio::test]
async fn test_bare_help_lists_modules() {
    let bot = test_bot();
    let texts = replies(&bot, "!help").await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Usage: \"!help <Module> [command]\" or \"!help <command>\"."));
    assert!(texts[0].ends_with("currently loaded: Echo, Helper, Ping, Uptime."));
}

#[tokio::test]
async fn test_help_on_module() {
    let bot = test_bot();
    assert_eq!(
        replies(&bot, "!help Ping").await,
        vec!["Ping checks that the bot is alive. Commands: !ping."]
    );
}

#[tokio::test]
async fn test_help_on_command_falls_through_modules() {
    let bot = test_bot();
    assert_eq!(
        replies(&bot, "!help ping").await,
        vec!["Usage: !ping. Replies with \"Pong\" to whoever asked."]
    );
    let texts = replies(&bot, "!help uptime").await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Usage: !uptime."));
}

#[tokio::test]
async fn test_help_on_module_without_help() {
    let bot = test_bot();
    assert_eq!(
        replies(&bot, "!help Echo").await,
        vec!["No help available on module Echo."]
    );
}

#[tokio::test]
async fn test_help_on_unknown_module() {
    let bot = test_bot();
    assert_eq!(
        replies(&bot, "!help Gamma").await,
        vec!["No such module Gamma. Available modules: Echo, Helper, Ping, Uptime."]
    );
}

#[tokio::test]
async fn test_help_on_unknown_command() {
    let bot = test_bot();
    assert_eq!(
        replies(&bot, "!help frobnicate now").await,
        vec!["No help available on command frobnicate."]
    );
}

#[tokio::test]
async fn test_help_reply_goes_to_channel() {
    let bot = test_bot();
    bot.handle_message(&TextMessage::in_channel("bob", "#general", "!help Ping")).await;
    let sent = bot.flush_outgoing();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].destination, Destination::Channel("#general".to_string()));
}

#[tokio::test]
async fn test_commands_still_dispatch() {
    let bot = test_bot();
    assert_eq!(replies(&bot, "!ping").await, vec!["Pong, alice!"]);
    assert_eq!(replies(&bot, "!echo hello there").await, vec!["hello there"]);
    assert!(replies(&bot, "!unknown").await.is_empty());
}

#[tokio::test]
async fn test_plain_text_is_ignored() {
    let bot = test_bot();
    assert!(replies(&bot, "help Ping").await.is_empty());
    assert!(replies(&bot, "   ").await.is_empty());
    assert_eq!(bot.db.message_count("in").unwrap(), 1);
}

#[tokio::test]
async fn test_reload_keeps_help_working() {
    let mut bot = test_bot();
    let before = bot.helper.registry().len();
    let first = bot.helper.state().handle();

    bot.reload().unwrap();
    assert_eq!(bot.helper.registry().len(), before);
    assert_ne!(bot.helper.state().handle(), first);
    assert_eq!(replies(&bot, "!help Ping").await.len(), 1);
}

#[tokio::test]
async fn test_disabled_helper_leaves_trigger_unbound() {
    let bot = bot_from(&CONFIG.replace(
        "[modules.helper]\n    enabled = true",
        "[modules.helper]\n    enabled = false",
    ));
    assert!(!bot.triggers.is_claimed("help"));
    assert!(replies(&bot, "!help").await.is_empty());
    assert_eq!(replies(&bot, "!ping").await, vec!["Pong, alice!"]);
}

#[tokio::test]
async fn test_helper_silent_outside_its_channels() {
    let bot = bot_from(&CONFIG.replace(
        "[modules.helper]\n    enabled = true",
        "[modules.helper]\n    enabled = true\n    channels = [\"#ops\"]",
    ));

    bot.handle_message(&TextMessage::in_channel("bob", "#general", "!help")).await;
    assert!(bot.flush_outgoing().is_empty());

    bot.handle_message(&TextMessage::in_channel("bob", "#ops", "!help")).await;
    let sent = bot.flush_outgoing();
    assert_eq!(sent.len(), 1);
    assert!(sent[0].text.ends_with("currently loaded: Echo, Helper, Ping, Uptime."));

    let texts = replies(&bot, "!help").await;
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("Usage: \"!help <Module> [command]\""));
}

#[tokio::test]
async fn test_custom_trigger_and_prefix() {
    let bot = bot_from(&CONFIG.replace(
        "rate_limit_commands = 0",
        "rate_limit_commands = 0\n    command_prefix = \"?\"\n\n    [helper]\n    trigger = \"aide\"",
    ));
    assert!(replies(&bot, "?help").await.is_empty());
    let texts = replies(&bot, "?aide Ping").await;
    assert_eq!(texts, vec!["Ping checks that the bot is alive. Commands: ?ping."]);
}

#[test]
fn test_trigger_conflict_fails_startup() {
    let config = Arc::new(Config::parse(CONFIG).unwrap());
    let db = Arc::new(Db::open(Path::new(":memory:")).unwrap());
    let first = Bot::new(config.clone(), db.clone(), modules::build_registry(&config)).unwrap();
    let mut triggers = first.triggers;

    let registry = Arc::new(modules::build_registry(&config));
    let mut helper = Helper::new("help", "!", registry);
    let result = helper.reload(ReloadFlags::INIT | ReloadFlags::HANDLERS, &mut triggers);
    assert_eq!(result, Err(HelpError::TriggerRegistration("help".to_string())));
}

#[tokio::test]
async fn test_rate_limit() {
    let bot = bot_from(&CONFIG.replace("rate_limit_commands = 0", "rate_limit_commands = 2"));
    assert_eq!(replies(&bot, "!ping").await.len(), 1);
    assert_eq!(replies(&bot, "!help").await.len(), 1);
    assert!(replies(&bot, "!ping").await.is_empty());
}

#[tokio::test]
async fn test_flush_logs_outgoing() {
    let bot = test_bot();
    bot.queue_responses(vec![Response::reply_to(
        &TextMessage::private("alice", "!ping"),
        "queued",
    )]);
    assert_eq!(bot.outgoing.snapshot().len(), 1);

    let sent = bot.flush_outgoing();
    assert_eq!(sent.len(), 1);
    assert!(bot.outgoing.snapshot().is_empty());
    assert_eq!(bot.db.message_count("out").unwrap(), 1);

    let history = bot.db.recent_messages(1).unwrap();
    assert_eq!(history[0].source, "TestBot");
    assert_eq!(history[0].target, "alice");
    assert_eq!(history[0].text, "queued");
}
