mod bot;
mod config;
mod db;
mod help;
mod message;
mod module;
mod modules;
mod template;
mod trigger;

use std::path::Path;
use std::sync::Arc;

use config::Config;
use db::Db;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let path = Path::new(&config_path);
    if !path.exists() {
        eprintln!("Config file not found: {}", config_path);
        eprintln!("Copy the example and edit it:");
        eprintln!("  cp config.example.toml config.toml");
        std::process::exit(1);
    }

    let config = Config::load(path)?;
    log::info!("Loaded config from {}", config_path);

    let db = Db::open(Path::new(&config.bot.db_path))?;
    log::info!("Database opened at {}", config.bot.db_path);

    let registry = modules::build_registry(&config);
    if registry.is_empty() {
        log::warn!("No modules enabled; only the console commands will work");
    } else {
        log::info!("Registered {} module(s)", registry.len());
    }

    let bot = bot::Bot::new(Arc::new(config), Arc::new(db), registry)?;
    log::info!("{} module(s) loaded", bot.module_count());

    bot.run().await
}
