use std::sync::Arc;

use async_trait::async_trait;

use crate::db::Db;
use crate::help::{BoxError, HelpCallback, ModuleDirectory};
use crate::message::{CommandScope, Response, Scope, TextMessage};

#[async_trait]
pub trait Module: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn commands(&self) -> &[&str];
    fn scope(&self) -> CommandScope;

    async fn handle_command(
        &self,
        command: &str,
        args: &str,
        event: &TextMessage,
        db: &Db,
    ) -> Result<Option<Vec<Response>>, BoxError>;

    /// The callback answering "!help" requests about this module, if it has one.
    fn help_callback(self: Arc<Self>) -> Option<Arc<dyn HelpCallback>> {
        None
    }
}

struct ModuleEntry {
    module: Arc<dyn Module>,
    scope: CommandScope,
    /// Channels the module is restricted to; empty means every channel
    channels: Vec<String>,
}

impl ModuleEntry {
    fn is_active(&self, scope: &Scope) -> bool {
        if !self.scope.allows(scope) {
            return false;
        }
        match scope.channel() {
            Some(channel) if !self.channels.is_empty() => self
                .channels
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(channel)),
            _ => true,
        }
    }
}

pub struct ModuleRegistry {
    modules: Vec<ModuleEntry>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
        }
    }

    pub fn register(&mut self, module: Arc<dyn Module>) {
        let scope = module.scope();
        self.register_scoped(module, scope, Vec::new());
    }

    pub fn register_scoped(&mut self, module: Arc<dyn Module>, scope: CommandScope, channels: Vec<String>) {
        log::info!("Registered module: {} ({:?})", module.name(), scope);
        self.modules.push(ModuleEntry {
            module,
            scope,
            channels,
        });
    }

    /// The first module active in `scope` that provides `command`.
    pub fn find_by_command(&self, command: &str, scope: &Scope) -> Option<&dyn Module> {
        self.modules
            .iter()
            .filter(|entry| entry.is_active(scope))
            .find(|entry| {
                entry
                    .module
                    .commands()
                    .iter()
                    .any(|c| c.eq_ignore_ascii_case(command))
            })
            .map(|entry| entry.module.as_ref())
    }

    pub fn all(&self) -> impl Iterator<Item = &Arc<dyn Module>> {
        self.modules.iter().map(|entry| &entry.module)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleDirectory for ModuleRegistry {
    fn active_modules(&self, scope: &Scope) -> Vec<String> {
        self.modules
            .iter()
            .filter(|entry| entry.is_active(scope))
            .map(|entry| entry.module.name().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(&'static str, CommandScope);

    #[async_trait]
    impl Module for Named {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> &str {
            "test module"
        }

        fn commands(&self) -> &[&str] {
            &["go"]
        }

        fn scope(&self) -> CommandScope {
            self.1.clone()
        }

        async fn handle_command(
            &self,
            _command: &str,
            _args: &str,
            _event: &TextMessage,
            _db: &Db,
        ) -> Result<Option<Vec<Response>>, BoxError> {
            Ok(None)
        }
    }

    fn channel(name: &str) -> Scope {
        Scope::Channel(name.to_string())
    }

    #[test]
    fn test_active_modules_follow_scope() {
        let mut registry = ModuleRegistry::new();
        assert!(registry.is_empty());
        registry.register(Arc::new(Named("Everywhere", CommandScope::Both)));
        registry.register(Arc::new(Named("PublicOnly", CommandScope::Public)));
        registry.register(Arc::new(Named("PrivateOnly", CommandScope::Private)));

        assert_eq!(
            registry.active_modules(&channel("#general")),
            vec!["Everywhere", "PublicOnly"]
        );
        assert_eq!(
            registry.active_modules(&Scope::Private),
            vec!["Everywhere", "PrivateOnly"]
        );
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_channel_restriction() {
        let mut registry = ModuleRegistry::new();
        registry.register_scoped(
            Arc::new(Named("Dice", CommandScope::Both)),
            CommandScope::Both,
            vec!["#Games".to_string()],
        );

        assert_eq!(registry.active_modules(&channel("#games")), vec!["Dice"]);
        assert!(registry.active_modules(&channel("#general")).is_empty());
        // Channel lists do not restrict private conversations.
        assert_eq!(registry.active_modules(&Scope::Private), vec!["Dice"]);
    }

    #[test]
    fn test_find_by_command_skips_inactive() {
        let mut registry = ModuleRegistry::new();
        registry.register(Arc::new(Named("PrivateOnly", CommandScope::Private)));
        registry.register(Arc::new(Named("Everywhere", CommandScope::Both)));

        let found = registry.find_by_command("GO", &channel("#general")).unwrap();
        assert_eq!(found.name(), "Everywhere");
        let found = registry.find_by_command("go", &Scope::Private).unwrap();
        assert_eq!(found.name(), "PrivateOnly");
        assert!(registry.find_by_command("stop", &Scope::Private).is_none());
    }
}
