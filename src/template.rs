//! Fills `{name}` slots in message templates.

use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    /// Rendered as the items joined with ", "
    List(Vec<String>),
}

#[derive(Debug, Default)]
pub struct Bindings {
    values: HashMap<String, Value>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.values.insert(name.to_string(), Value::Text(value.into()));
        self
    }

    pub fn list(mut self, name: &str, items: Vec<String>) -> Self {
        self.values.insert(name.to_string(), Value::List(items));
        self
    }
}

/// Replaces every `{name}` with its binding. Unknown slots are left untouched.
pub fn render(template: &str, bindings: &Bindings) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let slot = after.find('}').map(|close| &after[..close]);
        match slot.and_then(|name| bindings.values.get(name).map(|v| (name, v))) {
            Some((name, value)) => {
                match value {
                    Value::Text(text) => out.push_str(text),
                    Value::List(items) => out.push_str(&items.join(", ")),
                }
                rest = &after[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
