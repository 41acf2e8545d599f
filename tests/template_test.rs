//! Integration tests for the template catalog.

use resumeforge::template::{SectionKind, SectionSpec};
use resumeforge::{get_template, list_templates, Error, TemplateRegistry};

#[test]
fn test_builtin_catalog() {
    let templates = list_templates();
    assert_eq!(templates.len(), 4);
    for template in templates {
        assert!(template.section(SectionKind::Header).is_some(), "{}", template.id);
        assert_eq!(
            template.capabilities.supports_dark_mode,
            template.dark_palette.is_some()
        );
    }
}

#[test]
fn test_lookup_ignores_case() {
    assert_eq!(get_template("Classic").unwrap().id, "classic");
    assert_eq!(get_template(" MODERN ").unwrap().id, "modern");
    assert!(matches!(
        get_template("fancy"),
        Err(Error::TemplateNotFound(id)) if id == "fancy"
    ));
}

#[test]
fn test_dark_template_prefers_dark() {
    let dark = get_template("dark").unwrap();
    assert!(dark.prefers_dark);
    assert!(dark.capabilities.supports_dark_mode);
    assert!(!get_template("classic").unwrap().capabilities.supports_dark_mode);
}

#[test]
fn test_custom_registry() {
    let mut registry = TemplateRegistry::new();
    assert!(registry.is_empty());

    let mut template = get_template("modern").unwrap().clone();
    template.id = "Compact".into();
    template.typography.body_size = 9.5;
    registry.register(template.clone()).unwrap();
    assert!(registry.contains("compact"));

    let err = registry.register(template).unwrap_err();
    assert!(matches!(err, Error::InvalidTemplate { .. }));
}

#[test]
fn test_registry_rejects_invalid_templates() {
    let mut registry = TemplateRegistry::new();

    let mut headless = get_template("classic").unwrap().clone();
    headless.id = "headless".into();
    headless.sections.retain(|s| s.kind != SectionKind::Header);
    assert!(registry.register(headless).is_err());

    let mut duplicated = get_template("classic").unwrap().clone();
    duplicated.id = "twice".into();
    duplicated
        .sections
        .push(SectionSpec::new(SectionKind::Skills, "MORE SKILLS"));
    assert!(registry.register(duplicated).is_err());

    let mut mismatched = get_template("classic").unwrap().clone();
    mismatched.id = "mismatched".into();
    mismatched.capabilities.supports_dark_mode = true;
    assert!(registry.register(mismatched).is_err());

    assert!(registry.is_empty());
}
