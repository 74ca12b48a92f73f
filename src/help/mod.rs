//! Help resolution: maps "!help ..." requests to the feature able to answer them.
//!
//! Features register a [`HelpCallback`] under their identifier with
//! [`Helper::register_help`]. A request either names a module ("!help Ping") or a bare
//! command ("!help ping"); in the latter case every active module is asked in turn
//! until one claims the request.

use async_trait::async_trait;
use thiserror::Error;

use crate::message::{Response, Scope, TextMessage};

mod dispatcher;
mod normalize;
mod registry;
mod reload;
mod request;

pub use dispatcher::{Helper, HELPER_IDENTITY};
pub use normalize::{display_name, normalize, sorted_display_names, FeatureKey};
pub use registry::CapabilityRegistry;
pub use reload::{ReloadFlags, ReloadState};
pub use request::{classify, split_trigger, ModuleRequest, Request, Words};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error, PartialEq)]
pub enum HelpError {
    #[error("invalid feature name {0:?}")]
    InvalidFeatureName(String),
    #[error("could not register help trigger {0:?}")]
    TriggerRegistration(String),
}

/// Produces help for one feature.
///
/// `words` always starts with the feature's own key, so `["ping"]` asks about the
/// feature itself and `["ping", "ping"]` about its `ping` command. Return `Ok(None)` when
/// the request is not about this feature; any responses in `Some` are sent as-is.
#[async_trait]
pub trait HelpCallback: Send + Sync {
    async fn help(
        &self,
        event: &TextMessage,
        words: &Words,
    ) -> Result<Option<Vec<Response>>, BoxError>;
}

/// Lists the features active in a given scope.
pub trait ModuleDirectory: Send + Sync {
    fn active_modules(&self, scope: &Scope) -> Vec<String>;
}

pub trait MessageSink {
    fn send(&self, response: Response);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// The trigger may only be claimed once, across every channel.
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TriggerHandle(pub u64);

/// Claims trigger words on behalf of features.
pub trait TriggerRegistry {
    fn register(&mut self, trigger: &str, policy: MatchPolicy) -> Option<TriggerHandle>;
    fn release(&mut self, handle: TriggerHandle);
}
