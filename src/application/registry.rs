//! Registry of named message templates.
//!
//! Templates are registered at setup time and looked up on every trigger.
//! Lookups hand out shared handles, so a template being replaced or cleared
//! never invalidates one that is mid-render.

use crate::domain::template::Template;
use crate::infrastructure::storage::ShardedStorage;
use std::sync::Arc;

/// Registry mapping template names to templates.
///
/// Clones share the same underlying map.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Arc<ShardedStorage<String, Arc<Template>>>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template, replacing any template with the same name.
    pub fn add(&self, name: impl Into<String>, pattern: impl Into<String>) -> Arc<Template> {
        let template = Arc::new(Template::new(name, pattern));
        self.templates
            .insert(template.name().to_string(), Arc::clone(&template));
        template
    }

    /// Look up a template by name.
    pub fn find(&self, name: &str) -> Option<Arc<Template>> {
        self.templates.get_cloned(name)
    }

    /// Check whether a template is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Remove every template.
    pub fn clear(&self) {
        self.templates.clear();
    }

    /// Get the number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_registry_creation() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.len(), 0);
        assert!(registry.is_empty());
        assert!(registry.find("anything").is_none());
    }

    #[test]
    fn test_add_and_find() {
        let registry = TemplateRegistry::new();
        registry.add("schedule_triggered", "Schedule triggered at %{time}");

        let template = registry.find("schedule_triggered").unwrap();
        assert_eq!(template.name(), "schedule_triggered");
        assert_eq!(template.pattern(), "Schedule triggered at %{time}");
        assert!(registry.contains("schedule_triggered"));
    }

    #[test]
    fn test_add_same_name_overwrites() {
        let registry = TemplateRegistry::new();
        registry.add("t", "first");
        let held = registry.find("t").unwrap();

        registry.add("t", "second");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.find("t").unwrap().pattern(), "second");
        // Handles taken before the overwrite still see the old pattern
        assert_eq!(held.pattern(), "first");
    }

    #[test]
    fn test_clear() {
        let registry = TemplateRegistry::new();
        for i in 0..10 {
            registry.add(format!("t{}", i), "message");
        }
        assert_eq!(registry.len(), 10);

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.find("t0").is_none());
    }

    #[test]
    fn test_clones_share_templates() {
        let registry = TemplateRegistry::new();
        let clone = registry.clone();

        clone.add("t", "message");
        assert!(registry.contains("t"));
    }

    #[test]
    fn test_concurrent_lookups() {
        let registry = TemplateRegistry::new();
        for i in 0..100 {
            registry.add(format!("t{}", i), format!("message {}", i));
        }

        let mut handles = vec![];
        for _ in 0..8 {
            let registry = registry.clone();
            handles.push(thread::spawn(move || {
                for i in 0..100 {
                    let template = registry.find(&format!("t{}", i)).unwrap();
                    assert_eq!(template.pattern(), format!("message {}", i));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
