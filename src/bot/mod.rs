use std::sync::Arc;

use crate::config::Config;
use crate::db::Db;
use crate::help::{HelpError, Helper, ReloadFlags};
use crate::module::ModuleRegistry;
use crate::modules;
use crate::trigger::TriggerTable;

mod command_handler;
mod incoming;
mod outgoing;
mod rate_limit;
mod runtime;

#[cfg(test)]
mod tests;

use outgoing::OutgoingQueue;
use rate_limit::RateLimiter;

pub struct Bot {
    config: Arc<Config>,
    db: Arc<Db>,
    registry: Arc<ModuleRegistry>,
    /// Help engine; owns the help callbacks of every module
    helper: Helper,
    triggers: TriggerTable,
    rate_limiter: RateLimiter,
    /// Replies waiting to be delivered after the current event
    outgoing: OutgoingQueue,
}

impl Bot {
    pub fn new(config: Arc<Config>, db: Arc<Db>, registry: ModuleRegistry) -> Result<Self, HelpError> {
        let rate_limiter = RateLimiter::new(
            config.bot.rate_limit_commands,
            config.bot.rate_limit_window_secs,
        );
        let registry = Arc::new(registry);
        let mut helper = Helper::new(
            &config.helper.trigger,
            &config.bot.command_prefix,
            registry.clone(),
        );
        let mut triggers = TriggerTable::new();

        helper.reload(ReloadFlags::INIT | Self::reload_flags(&config), &mut triggers)?;
        let count = modules::register_help(&registry, &mut helper)?;
        log::info!("{} module(s) provide help", count);

        Ok(Self {
            config,
            db,
            registry,
            helper,
            triggers,
            rate_limiter,
            outgoing: OutgoingQueue::new(),
        })
    }

    /// Help only claims its trigger when the helper module is enabled.
    fn reload_flags(config: &Config) -> ReloadFlags {
        if config.is_module_enabled("helper") {
            ReloadFlags::HANDLERS | ReloadFlags::MEMBERS
        } else {
            ReloadFlags::MEMBERS
        }
    }

    /// Re-binds the help trigger and re-registers the engine's own help.
    pub fn reload(&mut self) -> Result<(), HelpError> {
        log::info!("Reloading help engine");
        let flags = Self::reload_flags(&self.config);
        self.helper.reload(flags, &mut self.triggers)
    }

    pub fn module_count(&self) -> usize {
        self.registry.len()
    }
}
