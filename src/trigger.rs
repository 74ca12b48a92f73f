use std::collections::HashMap;

use crate::help::{MatchPolicy, TriggerHandle, TriggerRegistry};

/// Trigger words claimed by features, keyed by lower-cased word.
pub struct TriggerTable {
    claimed: HashMap<String, TriggerHandle>,
    next_handle: u64,
}

impl TriggerTable {
    pub fn new() -> Self {
        Self {
            claimed: HashMap::new(),
            next_handle: 1,
        }
    }

    pub fn is_claimed(&self, trigger: &str) -> bool {
        self.claimed.contains_key(&trigger.to_lowercase())
    }
}

impl TriggerRegistry for TriggerTable {
    fn register(&mut self, trigger: &str, policy: MatchPolicy) -> Option<TriggerHandle> {
        let word = trigger.to_lowercase();
        match policy {
            MatchPolicy::Any => {
                if word.is_empty() || self.claimed.contains_key(&word) {
                    log::warn!("Trigger \"{}\" is already claimed", trigger);
                    return None;
                }
            }
        }
        let handle = TriggerHandle(self.next_handle);
        self.next_handle += 1;
        self.claimed.insert(word, handle);
        Some(handle)
    }

    fn release(&mut self, handle: TriggerHandle) {
        self.claimed.retain(|_, claimed| *claimed != handle);
    }
}
