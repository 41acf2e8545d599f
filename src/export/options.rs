//! Export options and configuration.

use chrono::NaiveDate;
use std::fmt;
use std::sync::Arc;

use crate::capability::{Capability, CapabilityProbe, SystemProbe};
use crate::model::PresentMarker;
use crate::render::RenderContext;

/// Options for one export call.
///
/// The date is injected rather than read from the clock so that the same
/// inputs always produce the same output.
#[derive(Clone)]
pub struct ExportOptions {
    /// Date used for "present" and document creation metadata
    pub as_of: NaiveDate,

    /// How ongoing periods are displayed
    pub present_marker: PresentMarker,

    /// Plain-text output options
    pub text: TextOptions,

    /// Capability probe consulted before exporting
    pub probe: Arc<dyn CapabilityProbe>,
}

impl ExportOptions {
    /// Create options for the given date, probing compiled-in capabilities.
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            present_marker: PresentMarker::default(),
            text: TextOptions::default(),
            probe: Arc::new(SystemProbe),
        }
    }

    /// Set the present marker.
    pub fn with_present_marker(mut self, marker: PresentMarker) -> Self {
        self.present_marker = marker;
        self
    }

    /// Set plain-text options.
    pub fn with_text_options(mut self, text: TextOptions) -> Self {
        self.text = text;
        self
    }

    /// Set the capability probe.
    pub fn with_probe(mut self, probe: impl CapabilityProbe + 'static) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    /// Render context derived from these options.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.as_of)
            .with_present_marker(self.present_marker)
            .with_image_encoding(self.probe.is_available(Capability::ImageEncoding))
    }
}

impl fmt::Debug for ExportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportOptions")
            .field("as_of", &self.as_of)
            .field("present_marker", &self.present_marker)
            .field("text", &self.text)
            .field("missing_capabilities", &self.probe.missing())
            .finish()
    }
}

/// Options for plain-text output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextOptions {
    /// Prefix for bullet lines, e.g. `"- "`
    pub bullet_prefix: String,

    /// Width for wrapping long lines (0 = no wrap)
    pub line_width: usize,
}

impl TextOptions {
    /// Create new text options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bullet prefix.
    pub fn with_bullet_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bullet_prefix = prefix.into();
        self
    }

    /// Set the wrap width.
    pub fn with_line_width(mut self, width: usize) -> Self {
        self.line_width = width;
        self
    }
}
