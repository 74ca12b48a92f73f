use std::fmt;

use super::normalize::{normalize, FeatureKey, NAMESPACE_SEPARATOR};

/// Whitespace-separated tokens of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Words(Vec<String>);

impl Words {
    pub fn parse(text: &str) -> Self {
        Self(text.split_whitespace().map(str::to_string).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn first(&self) -> Option<&str> {
        self.get(0)
    }

    /// Tokens from `start` onwards.
    pub fn tokens_from(&self, start: usize) -> Words {
        Words(self.0.iter().skip(start).cloned().collect())
    }

    pub fn prepend(&self, token: &str) -> Words {
        let mut tokens = Vec::with_capacity(self.0.len() + 1);
        tokens.push(token.to_string());
        tokens.extend(self.0.iter().cloned());
        Words(tokens)
    }
}

impl fmt::Display for Words {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// A module named explicitly in a request.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRequest {
    /// The token as the user typed it
    pub requested: String,
    /// `None` when the token is nothing but namespace separators
    pub key: Option<FeatureKey>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub module: Option<ModuleRequest>,
    pub remaining: Words,
}

/// Returns the words following `trigger` when `text` starts with it.
pub fn split_trigger(text: &str, trigger: &str) -> Option<Words> {
    let words = Words::parse(text);
    match words.first() {
        Some(first) if first.eq_ignore_ascii_case(trigger) => Some(words.tokens_from(1)),
        _ => None,
    }
}

/// Decides whether a request is about a module or a command.
///
/// An empty request asks the engine itself (`identity`) about its own `trigger`.
/// Otherwise a first token starting with an uppercase letter or the namespace separator
/// names a module and is removed from the remaining words; anything else is a command.
pub fn classify(words: Words, identity: &str, trigger: &str) -> Request {
    let first = match words.first() {
        Some(first) => first,
        None => {
            return Request {
                module: Some(ModuleRequest {
                    requested: identity.to_string(),
                    key: normalize(identity),
                }),
                remaining: Words(vec![trigger.to_string()]),
            }
        }
    };

    let names_module = first
        .chars()
        .next()
        .map(|c| c.is_uppercase() || c == NAMESPACE_SEPARATOR)
        .unwrap_or(false);
    if !names_module {
        return Request {
            module: None,
            remaining: words,
        };
    }

    Request {
        module: Some(ModuleRequest {
            requested: first.to_string(),
            key: normalize(first),
        }),
        remaining: words.tokens_from(1),
    }
}
