use std::collections::HashMap;
use std::sync::Arc;

use super::normalize::FeatureKey;
use super::HelpCallback;

/// Help callbacks by feature. Re-registering a key replaces the previous callback.
pub struct CapabilityRegistry {
    callbacks: HashMap<FeatureKey, Arc<dyn HelpCallback>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self {
            callbacks: HashMap::new(),
        }
    }

    pub fn register(&mut self, key: FeatureKey, callback: Arc<dyn HelpCallback>) {
        if self.callbacks.insert(key.clone(), callback).is_some() {
            log::debug!("Replaced help callback for {}", key);
        } else {
            log::debug!("Registered help callback for {}", key);
        }
    }

    pub fn lookup(&self, key: &FeatureKey) -> Option<Arc<dyn HelpCallback>> {
        self.callbacks.get(key).cloned()
    }

    pub fn contains(&self, key: &FeatureKey) -> bool {
        self.callbacks.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
