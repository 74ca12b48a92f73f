mod echo;
mod help;
mod ping;
mod uptime;

use std::sync::Arc;

use crate::config::Config;
use crate::help::{HelpError, Helper};
use crate::message::CommandScope;
use crate::module::{Module, ModuleRegistry};

fn register_if_enabled(registry: &mut ModuleRegistry, config: &Config, key: &str, module: Arc<dyn Module>) {
    let module_config = match config.module_config(key) {
        Some(c) if c.enabled => c,
        _ => return,
    };
    let scope = module_config
        .scope
        .as_deref()
        .map(CommandScope::from_str)
        .unwrap_or_else(|| module.scope());
    registry.register_scoped(module, scope, module_config.channels.clone());
}

pub fn build_registry(config: &Config) -> ModuleRegistry {
    let prefix = &config.bot.command_prefix;
    let mut registry = ModuleRegistry::new();

    register_if_enabled(&mut registry, config, "helper", Arc::new(help::HelpModule));
    register_if_enabled(&mut registry, config, "ping", Arc::new(ping::PingModule::new(prefix)));
    register_if_enabled(&mut registry, config, "uptime", Arc::new(uptime::UptimeModule::new(prefix)));
    register_if_enabled(&mut registry, config, "echo", Arc::new(echo::EchoModule));

    registry
}

/// Hands every module's help callback to the help engine. Returns how many were registered.
pub fn register_help(registry: &ModuleRegistry, helper: &mut Helper) -> Result<usize, HelpError> {
    let mut count = 0;
    for module in registry.all() {
        if let Some(callback) = Arc::clone(module).help_callback() {
            let key = helper.register_help(module.name(), callback)?;
            log::info!("Registered help for module {} as {}", module.name(), key);
            count += 1;
        }
    }
    Ok(count)
}
