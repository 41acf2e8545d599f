//! Template registration and lookup.

use std::collections::HashMap;
use std::sync::OnceLock;

use super::{builtin, Template};
use crate::error::{Error, Result};

/// Registry of templates keyed by lowercase id.
///
/// Templates are validated once on registration and immutable afterwards.
#[derive(Debug, Default)]
pub struct TemplateRegistry {
    templates: Vec<Template>,
    by_id: HashMap<String, usize>,
}

impl TemplateRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in templates.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for template in builtin::templates() {
            let id = template.id.clone();
            if let Err(e) = registry.register(template) {
                log::error!("Skipping built-in template '{}': {}", id, e);
            }
        }
        registry
    }

    /// Register a template.
    ///
    /// Fails with [`Error::InvalidTemplate`] when the template breaks a
    /// structural rule or its id is already taken.
    pub fn register(&mut self, template: Template) -> Result<()> {
        template.check().map_err(|reason| Error::InvalidTemplate {
            id: template.id.clone(),
            reason,
        })?;

        let key = template.id.trim().to_lowercase();
        if self.by_id.contains_key(&key) {
            return Err(Error::InvalidTemplate {
                id: template.id,
                reason: "id already registered".into(),
            });
        }

        log::debug!("Registered template '{}'", key);
        self.by_id.insert(key, self.templates.len());
        self.templates.push(template);
        Ok(())
    }

    /// Get a template by id, ignoring case.
    pub fn get(&self, id: &str) -> Result<&Template> {
        self.by_id
            .get(&id.trim().to_lowercase())
            .map(|&i| &self.templates[i])
            .ok_or_else(|| Error::TemplateNotFound(id.to_string()))
    }

    /// Check if an id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(&id.trim().to_lowercase())
    }

    /// All templates in registration order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// The process-wide catalog of built-in templates.
pub fn builtin_registry() -> &'static TemplateRegistry {
    static REGISTRY: OnceLock<TemplateRegistry> = OnceLock::new();
    REGISTRY.get_or_init(TemplateRegistry::with_defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::{Palette, SectionKind, SectionSpec};

    fn custom(id: &str) -> Template {
        let mut template = builtin::templates().remove(0);
        template.id = id.to_string();
        template
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = TemplateRegistry::new();
        registry.register(custom("Compact")).unwrap();
        assert!(registry.contains("compact"));
        assert_eq!(registry.get("COMPACT").unwrap().id, "Compact");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_register_duplicate_id() {
        let mut registry = TemplateRegistry::with_defaults();
        let err = registry.register(custom("Modern")).unwrap_err();
        assert!(matches!(err, Error::InvalidTemplate { .. }));
    }

    #[test]
    fn test_register_rejects_dark_flag_without_palette() {
        let mut template = custom("broken");
        template.dark_palette = None;
        let err = TemplateRegistry::new().register(template).unwrap_err();
        assert!(err.to_string().contains("dark palette"));
    }

    #[test]
    fn test_register_rejects_palette_without_flag() {
        let mut template = custom("broken");
        template.capabilities.supports_dark_mode = false;
        template.prefers_dark = false;
        template.dark_palette = Some(Palette::DARK);
        assert!(TemplateRegistry::new().register(template).is_err());
    }

    #[test]
    fn test_register_rejects_missing_header() {
        let mut template = custom("headless");
        template.sections.retain(|s| s.kind != SectionKind::Header);
        assert!(TemplateRegistry::new().register(template).is_err());
    }

    #[test]
    fn test_register_rejects_duplicate_section() {
        let mut template = custom("twice");
        template
            .sections
            .push(SectionSpec::new(SectionKind::Skills, "More Skills"));
        assert!(TemplateRegistry::new().register(template).is_err());
    }

    #[test]
    fn test_get_unknown() {
        let err = builtin_registry().get("nope").unwrap_err();
        assert!(matches!(err, Error::TemplateNotFound(ref id) if id == "nope"));
    }
}
