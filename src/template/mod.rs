//! Visual templates.
//!
//! A [`Template`] is pure data: which sections appear and in what order,
//! their display titles, typography, colors, page geometry, and capability
//! flags. Exporters read typography and flags; they never branch on a
//! template id.
//!
//! # Example
//!
//! ```
//! use resumeforge::template::{get_template, list_templates};
//!
//! let ids: Vec<&str> = list_templates().iter().map(|t| t.id.as_str()).collect();
//! assert_eq!(ids, ["modern", "classic", "minimalist", "dark"]);
//!
//! let classic = get_template("Classic").unwrap();
//! assert!(!classic.capabilities.supports_embedded_image);
//! ```

mod builtin;
mod registry;
mod style;

pub use registry::{builtin_registry, TemplateRegistry};
pub use style::{Color, FontFamily, PageSetup, PageSize, Palette, Typography};

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A resume layout and style definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Unique identifier, matched case-insensitively
    pub id: String,

    /// Name shown to users
    pub display_name: String,

    /// Sections in display order
    pub sections: Vec<SectionSpec>,

    /// Fonts and sizes
    pub typography: Typography,

    /// Light color scheme
    pub palette: Palette,

    /// Dark color scheme; present exactly when dark mode is supported
    pub dark_palette: Option<Palette>,

    /// Page geometry for paged formats
    pub page: PageSetup,

    /// What the template can render
    pub capabilities: TemplateCapabilities,

    /// Render dark even when the resume does not ask for it
    pub prefers_dark: bool,
}

impl Template {
    /// Find the spec for a section kind.
    pub fn section(&self, kind: SectionKind) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    /// Palette for the requested scheme, falling back to the light one.
    pub fn palette_for(&self, dark: bool) -> &Palette {
        match (&self.dark_palette, dark) {
            (Some(dark_palette), true) => dark_palette,
            _ => &self.palette,
        }
    }

    /// Check structural rules; returns a reason on violation.
    pub(crate) fn check(&self) -> std::result::Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("template id is empty".into());
        }
        if self.section(SectionKind::Header).is_none() {
            return Err("missing header section".into());
        }
        for (i, spec) in self.sections.iter().enumerate() {
            if self.sections[..i].iter().any(|s| s.kind == spec.kind) {
                return Err(format!("duplicate {:?} section", spec.kind));
            }
        }
        if self.capabilities.supports_dark_mode != self.dark_palette.is_some() {
            return Err("dark mode support requires exactly one dark palette".into());
        }
        if self.prefers_dark && !self.capabilities.supports_dark_mode {
            return Err("prefers dark but does not support dark mode".into());
        }
        let t = &self.typography;
        if t.body_size <= 0.0 || t.heading_sizes.iter().any(|s| *s <= 0.0) {
            return Err("font sizes must be positive".into());
        }
        if t.line_height < 1.0 {
            return Err("line height must be at least 1.0".into());
        }
        if self.page.margin < 0.0 || self.page.content_width() < 72.0 {
            return Err("page margins leave no room for text".into());
        }
        Ok(())
    }
}

/// One section of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Which content the section shows
    pub kind: SectionKind,

    /// Heading text; unused for the header
    pub title: String,
}

impl SectionSpec {
    /// Create a section spec.
    pub fn new(kind: SectionKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
        }
    }
}

/// Kinds of resume sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Name, headline and contact line
    Header,
    /// Professional summary
    Summary,
    /// Skill groups
    Skills,
    /// Work history
    Experience,
    /// Education history
    Education,
    /// Labelled contact details
    Contact,
}

/// Capability flags of a template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCapabilities {
    /// Has a dark palette
    pub supports_dark_mode: bool,

    /// Can show an embedded image (QR code)
    pub supports_embedded_image: bool,
}

/// List the built-in templates in registration order.
pub fn list_templates() -> &'static [Template] {
    builtin_registry().templates()
}

/// Look up a built-in template by id, ignoring case.
pub fn get_template(id: &str) -> Result<&'static Template> {
    builtin_registry().get(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order() {
        let ids: Vec<&str> = list_templates().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["modern", "classic", "minimalist", "dark"]);
    }

    #[test]
    fn test_get_template_case_insensitive() {
        assert_eq!(get_template("DARK").unwrap().id, "dark");
        assert!(get_template("fancy").is_err());
    }

    #[test]
    fn test_palette_for() {
        let classic = get_template("classic").unwrap();
        assert_eq!(classic.palette_for(true), &classic.palette);

        let modern = get_template("modern").unwrap();
        assert_eq!(modern.palette_for(true), &Palette::DARK);
        assert_eq!(modern.palette_for(false), &Palette::LIGHT);
    }

    #[test]
    fn test_builtins_pass_checks() {
        for template in list_templates() {
            assert!(template.check().is_ok(), "{} failed", template.id);
        }
    }
}
