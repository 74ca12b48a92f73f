use std::collections::HashSet;
use std::fmt;

pub const NAMESPACE_SEPARATOR: char = ':';
pub const NAMESPACE_PREFIX: &str = "module::";

/// Lower-cased feature name with any namespace stripped. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FeatureKey(String);

impl FeatureKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn strip_namespace(raw: &str) -> &str {
    let mut name = raw.trim().trim_start_matches(NAMESPACE_SEPARATOR);
    while let Some(head) = name.get(..NAMESPACE_PREFIX.len()) {
        if !head.eq_ignore_ascii_case(NAMESPACE_PREFIX) {
            break;
        }
        name = name[NAMESPACE_PREFIX.len()..].trim_start_matches(NAMESPACE_SEPARATOR);
    }
    name
}

/// `"module::Ping"`, `"::Ping"` and `"PING"` all map to `ping`.
pub fn normalize(raw: &str) -> Option<FeatureKey> {
    let name = strip_namespace(raw);
    if name.is_empty() {
        None
    } else {
        Some(FeatureKey(name.to_lowercase()))
    }
}

/// Like [`normalize`] but keeps the original casing, for showing names to users.
pub fn display_name(raw: &str) -> String {
    strip_namespace(raw).to_string()
}

/// Display names sorted case-insensitively, one per distinct key.
pub fn sorted_display_names<I, S>(raw_names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut names: Vec<String> = raw_names
        .into_iter()
        .filter_map(|raw| {
            let key = normalize(raw.as_ref())?;
            seen.insert(key).then(|| display_name(raw.as_ref()))
        })
        .collect();
    names.sort_by_key(|name| name.to_lowercase());
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> String {
        normalize(raw).unwrap().to_string()
    }

    #[test]
    fn test_normalize_case_insensitive() {
        assert_eq!(key("FOO"), "foo");
        assert_eq!(key("foo"), "foo");
        assert_eq!(key("Foo"), "foo");
    }

    #[test]
    fn test_normalize_strips_prefix() {
        assert_eq!(key("module::Foo"), "foo");
        assert_eq!(key("MODULE::Foo"), "foo");
        assert_eq!(key("::module::Foo"), "foo");
        assert_eq!(key("::Foo"), "foo");
    }

    #[test]
    fn test_normalize_keeps_other_namespaces() {
        assert_eq!(key("games::Dice"), "games::dice");
        assert_eq!(key("modules::Foo"), "modules::foo");
    }

    #[test]
    fn test_normalize_idempotent() {
        for raw in ["module::Helper", "::Ping", "UPTIME", "games::Dice", " Echo ", "module::module::X"] {
            let once = key(raw);
            assert_eq!(key(&once), once);
        }
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), None);
        assert_eq!(normalize("::"), None);
        assert_eq!(normalize("module::"), None);
        assert_eq!(normalize("   "), None);
    }

    #[test]
    fn test_normalize_non_ascii_prefix_boundary() {
        // Must not slice inside a multi-byte character.
        assert_eq!(key("modulé::X"), "modulé::x");
        assert_eq!(key("é"), "é");
    }

    #[test]
    fn test_display_name_keeps_case() {
        assert_eq!(display_name("module::Alpha"), "Alpha");
        assert_eq!(display_name("::Beta"), "Beta");
        assert_eq!(display_name("Helper"), "Helper");
    }

    #[test]
    fn test_sorted_display_names() {
        let names = sorted_display_names(["Helper", "module::beta", "Alpha", "::Beta"]);
        assert_eq!(names, vec!["Alpha", "beta", "Helper"]);
    }
}
