//! Counter key construction for the suppression gate.
//!
//! A counter key identifies one occurrence counter in the external store:
//! - Namespace (default `log_manager`)
//! - Entity identifier
//! - Template name
//! - Severity level
//!
//! Components are joined with `:`. Any `\` or `:` inside a component is
//! escaped as `\\` or `\:`, so distinct triples can never produce the same
//! key. Components without those characters are written verbatim.

use crate::domain::severity::Severity;
use std::fmt;

/// Default namespace prefixed to every counter key.
pub const DEFAULT_NAMESPACE: &str = "log_manager";

const DELIMITER: char = ':';
const ESCAPE: char = '\\';

/// Store key for the occurrence counter of a (template, entity, level) triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CounterKey(String);

impl CounterKey {
    /// Build the key for a triple under a namespace.
    ///
    /// # Example
    /// ```
    /// use log_manager::{CounterKey, Severity};
    ///
    /// let key = CounterKey::new("log_manager", "schedule_triggered", "S1", Severity::Error);
    /// assert_eq!(key.as_str(), "log_manager:S1:schedule_triggered:error");
    /// ```
    pub fn new(namespace: &str, template: &str, entity: &str, level: Severity) -> Self {
        let mut key = String::with_capacity(
            namespace.len() + entity.len() + template.len() + level.as_str().len() + 3,
        );
        push_escaped(&mut key, namespace);
        key.push(DELIMITER);
        push_escaped(&mut key, entity);
        key.push(DELIMITER);
        push_escaped(&mut key, template);
        key.push(DELIMITER);
        key.push_str(level.as_str());
        CounterKey(key)
    }

    /// The key as stored.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn push_escaped(out: &mut String, component: &str) {
    for c in component.chars() {
        if c == DELIMITER || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CounterKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_components_are_verbatim() {
        let key = CounterKey::new(DEFAULT_NAMESPACE, "disk_full", "host-7", Severity::Error);
        assert_eq!(key.as_str(), "log_manager:host-7:disk_full:error");
        assert_eq!(key.to_string(), key.as_str());
    }

    #[test]
    fn test_same_triple_same_key() {
        let a = CounterKey::new("ns", "t", "e", Severity::Error);
        let b = CounterKey::new("ns", "t", "e", Severity::Error);
        assert_eq!(a, b);
    }

    #[test]
    fn test_each_component_distinguishes() {
        let base = CounterKey::new("ns", "t", "e", Severity::Error);
        assert_ne!(base, CounterKey::new("ns2", "t", "e", Severity::Error));
        assert_ne!(base, CounterKey::new("ns", "t2", "e", Severity::Error));
        assert_ne!(base, CounterKey::new("ns", "t", "e2", Severity::Error));
        assert_ne!(base, CounterKey::new("ns", "t", "e", Severity::Warn));
    }

    #[test]
    fn test_delimiter_in_components_cannot_collide() {
        // Unescaped, both would read "ns:a:b:c:error"
        let a = CounterKey::new("ns", "b:c", "a", Severity::Error);
        let b = CounterKey::new("ns", "c", "a:b", Severity::Error);
        assert_ne!(a, b);
        assert_eq!(a.as_str(), r"ns:a:b\:c:error");
        assert_eq!(b.as_str(), r"ns:a\:b:c:error");
    }

    #[test]
    fn test_escape_char_in_components_cannot_collide() {
        // A trailing backslash must not swallow the delimiter that follows it
        let a = CounterKey::new("ns", "t", r"e\", Severity::Error);
        let b = CounterKey::new("ns", r":t", "e", Severity::Error);
        assert_ne!(a, b);
        assert_eq!(a.as_str(), r"ns:e\\:t:error");
    }
}
