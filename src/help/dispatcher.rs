use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use crate::message::{MessageCapable, Response, TextMessage};
use crate::template::{render, Bindings};

use super::normalize::{display_name, normalize, sorted_display_names, FeatureKey};
use super::registry::CapabilityRegistry;
use super::reload::{ReloadFlags, ReloadState};
use super::request::{classify, split_trigger, Words};
use super::{
    BoxError, HelpCallback, HelpError, MatchPolicy, MessageSink, ModuleDirectory,
    TriggerRegistry,
};

/// Identifier the engine registers its own help under.
pub const HELPER_IDENTITY: &str = "Helper";

const SELF_LISTING: &str = "Usage: \"{prefix}{trigger} <Module> [command]\". \
    Module names must start with an uppercase letter but are not case-sensitive otherwise. \
    The following modules are loaded: {modules}.";
const SELF_DETAIL: &str = "Usage: \"{prefix}{trigger} <Module> [command]\" or \
    \"{prefix}{trigger} <command>\". Provides help about a particular module or command. \
    Module names must start with an uppercase letter. \
    The following modules are currently loaded: {modules}.";
const UNKNOWN_MODULE: &str = "No such module {request}. Available modules: {modules}.";
const NO_HELP_MODULE: &str = "No help available on module {module}.";
const NO_HELP_COMMAND: &str = "No help available on command {command}.";

/// The help engine: owns the help callbacks and resolves requests against them.
pub struct Helper {
    trigger: String,
    prefix: String,
    directory: Arc<dyn ModuleDirectory>,
    callbacks: CapabilityRegistry,
    state: ReloadState,
}

impl Helper {
    pub fn new(trigger: &str, prefix: &str, directory: Arc<dyn ModuleDirectory>) -> Self {
        Self {
            trigger: trigger.to_string(),
            prefix: prefix.to_string(),
            directory,
            callbacks: CapabilityRegistry::new(),
            state: ReloadState::Uninitialized,
        }
    }

    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    pub fn state(&self) -> &ReloadState {
        &self.state
    }

    pub fn registry(&self) -> &CapabilityRegistry {
        &self.callbacks
    }

    /// Registers `callback` as the help provider for `feature`, replacing any previous one.
    pub fn register_help(
        &mut self,
        feature: &str,
        callback: Arc<dyn HelpCallback>,
    ) -> Result<FeatureKey, HelpError> {
        let key = normalize(feature).ok_or_else(|| HelpError::InvalidFeatureName(feature.to_string()))?;
        self.callbacks.register(key.clone(), callback);
        Ok(key)
    }

    pub fn reload(
        &mut self,
        flags: ReloadFlags,
        triggers: &mut dyn TriggerRegistry,
    ) -> Result<(), HelpError> {
        if !flags.contains(ReloadFlags::INIT) {
            self.release_trigger(triggers);
        }

        if flags.contains(ReloadFlags::HANDLERS) {
            let handle = triggers
                .register(&self.trigger, MatchPolicy::Any)
                .ok_or_else(|| HelpError::TriggerRegistration(self.trigger.clone()))?;
            log::info!("Help trigger \"{}\" bound ({:?})", self.trigger, handle);
            self.state = ReloadState::TriggerBound(handle);
        }

        if flags.contains(ReloadFlags::MEMBERS) {
            let own_help = Arc::new(SelfHelp {
                trigger: self.trigger.clone(),
                prefix: self.prefix.clone(),
                directory: Arc::clone(&self.directory),
            });
            self.register_help(HELPER_IDENTITY, own_help)?;
        }

        Ok(())
    }

    pub fn unload(&mut self, triggers: &mut dyn TriggerRegistry) {
        self.release_trigger(triggers);
    }

    fn release_trigger(&mut self, triggers: &mut dyn TriggerRegistry) {
        if let Some(handle) = self.state.handle() {
            triggers.release(handle);
            log::info!("Help trigger \"{}\" released", self.trigger);
            self.state = ReloadState::Unbound;
        }
    }

    /// The request words when `text` (command prefix already removed) is a help request.
    /// Always `None` while the trigger is not bound, or where the engine itself is not
    /// an active module for `event`.
    pub fn match_request(&self, event: &TextMessage, text: &str) -> Option<Words> {
        if !matches!(self.state, ReloadState::TriggerBound(_)) {
            return None;
        }
        let words = split_trigger(text, &self.trigger)?;
        let own_key = normalize(HELPER_IDENTITY);
        let loaded = self
            .directory
            .active_modules(&event.scope())
            .iter()
            .any(|raw| normalize(raw) == own_key);
        if !loaded {
            log::debug!("Help engine not active for {}, ignoring request", event.source());
            return None;
        }
        Some(words)
    }

    /// Resolves one help request. Exactly one handler answers, or the engine itself
    /// sends a single "no such module" / "no help available" message.
    pub async fn handle_help(&self, event: &TextMessage, words: Words, sink: &dyn MessageSink) {
        let request = classify(words, HELPER_IDENTITY, &self.trigger);
        let active = self.directory.active_modules(&event.scope());

        let candidates: Vec<FeatureKey> = match &request.module {
            Some(module) => {
                let is_active = |key: &&FeatureKey| {
                    active.iter().any(|raw| normalize(raw).as_ref() == Some(*key))
                };
                let key = match module.key.as_ref().filter(is_active) {
                    Some(key) => key.clone(),
                    None => {
                        log::debug!("Help requested on unknown module {}", module.requested);
                        let bindings = Bindings::new()
                            .text("request", module.requested.as_str())
                            .list("modules", sorted_display_names(&active));
                        sink.send(Response::reply_to(event, render(UNKNOWN_MODULE, &bindings)));
                        return;
                    }
                };
                if !self.callbacks.contains(&key) {
                    self.send_no_help_on_module(event, &module.requested, sink);
                    return;
                }
                vec![key]
            }
            None => {
                let mut seen = HashSet::new();
                active
                    .iter()
                    .filter_map(|raw| normalize(raw))
                    .filter(|key| seen.insert(key.clone()))
                    .collect()
            }
        };

        for key in &candidates {
            let callback = match self.callbacks.lookup(key) {
                Some(callback) => callback,
                None => continue,
            };
            let words = request.remaining.prepend(key.as_str());
            log::debug!("Asking {} for help on \"{}\"", key, words);
            match callback.help(event, &words).await {
                Ok(Some(responses)) => {
                    for response in responses {
                        sink.send(response);
                    }
                    return;
                }
                Ok(None) => {}
                Err(e) => {
                    log::error!("Help callback for {} failed: {}", key, e);
                }
            }
        }

        match &request.module {
            Some(module) => self.send_no_help_on_module(event, &module.requested, sink),
            None => {
                let command = request.remaining.first().unwrap_or_default();
                let bindings = Bindings::new().text("command", command);
                sink.send(Response::reply_to(event, render(NO_HELP_COMMAND, &bindings)));
            }
        }
    }

    fn send_no_help_on_module(&self, event: &TextMessage, requested: &str, sink: &dyn MessageSink) {
        let bindings = Bindings::new().text("module", display_name(requested));
        sink.send(Response::reply_to(event, render(NO_HELP_MODULE, &bindings)));
    }
}

/// The engine's answer to "!help", "!help Helper" and "!help help".
struct SelfHelp {
    trigger: String,
    prefix: String,
    directory: Arc<dyn ModuleDirectory>,
}

#[async_trait]
impl HelpCallback for SelfHelp {
    async fn help(
        &self,
        event: &TextMessage,
        words: &Words,
    ) -> Result<Option<Vec<Response>>, BoxError> {
        let about_self = words
            .first()
            .map(|first| first.eq_ignore_ascii_case(HELPER_IDENTITY))
            .unwrap_or(false);
        if !about_self {
            return Ok(None);
        }

        let template = match words.get(1) {
            None => SELF_LISTING,
            Some(command) if words.len() == 2 && command.eq_ignore_ascii_case(&self.trigger) => {
                SELF_DETAIL
            }
            Some(_) => return Ok(None),
        };

        let modules = sorted_display_names(self.directory.active_modules(&event.scope()));
        let bindings = Bindings::new()
            .text("prefix", self.prefix.as_str())
            .text("trigger", self.trigger.as_str())
            .list("modules", modules);
        Ok(Some(vec![Response::reply_to(event, render(template, &bindings))]))
    }
}
