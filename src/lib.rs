//! # resumeforge
//!
//! Template-driven resume rendering and export library for Rust.
//!
//! A [`ResumeDocument`] is projected onto a visual [`Template`] into a
//! format-agnostic [`IntermediateDocument`], which pluggable exporters turn
//! into plain text, HTML, DOCX, or PDF.
//!
//! ## Quick Start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use resumeforge::{
//!     export_resume, ExperienceEntry, ExportFormat, ExportOptions, ResumeDocument,
//! };
//!
//! fn main() -> resumeforge::Result<()> {
//!     let resume = ResumeDocument::new("Jane Doe").with_experience(
//!         ExperienceEntry::new("Engineer", "Acme").with_bullet("Built **X**"),
//!     );
//!
//!     let options = ExportOptions::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
//!     export_resume(&resume, "minimalist", ExportFormat::Pdf, "resume.pdf", &options)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Templates as data**: section order, titles, typography, palettes
//! - **Four formats**: TXT and HTML always; DOCX, PDF behind cargo features
//! - **Capability probing**: missing backends fail fast, before any file is written
//! - **Graceful degradation**: unsupported QR codes or dark mode are reported, not fatal
//! - **Atomic writes**: the destination is replaced only on success
//! - **Parallel export**: all formats at once with Rayon

pub mod capability;
pub mod error;
pub mod export;
pub mod layout;
pub mod model;
pub mod orchestrator;
pub mod qr;
pub mod render;
pub mod template;

// Re-export commonly used types
pub use capability::{Capability, CapabilityProbe, StaticProbe, SystemProbe};
pub use error::{Error, Result};
pub use export::{
    ExportFormat, ExportOptions, ExportReport, Exporter, ExporterRegistry, RenderStats,
    TextOptions,
};
pub use model::{
    Block, Degradation, EducationEntry, ExperienceEntry, Identity, IntermediateDocument,
    Period, PeriodPoint, PresentMarker, ProfileLink, ResumeDocument, ResumeOptions,
    SkillGroup, TextRun, TextStyle,
};
pub use orchestrator::{
    available_formats, export_all, export_bytes, export_resume, ExportPipeline,
    FormatAvailability,
};
pub use render::{JsonFormat, RenderContext};
pub use template::{get_template, list_templates, Template, TemplateRegistry};

use chrono::NaiveDate;
use std::path::Path;

/// Render a resume with a built-in template.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use resumeforge::{render_resume, ResumeDocument};
///
/// let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let doc = render_resume(&ResumeDocument::new("Jane Doe"), "modern", as_of).unwrap();
/// assert_eq!(doc.title, "Jane Doe");
/// ```
pub fn render_resume(
    document: &ResumeDocument,
    template_id: &str,
    as_of: NaiveDate,
) -> Result<IntermediateDocument> {
    let template = get_template(template_id)?;
    Ok(render::render(document, template, &RenderContext::new(as_of)))
}

/// Render a resume to plain text.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use resumeforge::{to_text, ResumeDocument};
///
/// let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let text = to_text(&ResumeDocument::new("Jane Doe"), "classic", as_of).unwrap();
/// assert!(text.starts_with("Jane Doe\n"));
/// ```
pub fn to_text(document: &ResumeDocument, template_id: &str, as_of: NaiveDate) -> Result<String> {
    ResumeForge::new(as_of)
        .with_template(template_id)
        .export_string(document, ExportFormat::Txt)
}

/// Render a resume to HTML.
pub fn to_html(document: &ResumeDocument, template_id: &str, as_of: NaiveDate) -> Result<String> {
    ResumeForge::new(as_of)
        .with_template(template_id)
        .export_string(document, ExportFormat::Html)
}

/// Render a resume to the intermediate document as JSON.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use resumeforge::{to_json, JsonFormat, ResumeDocument};
///
/// let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
/// let json = to_json(&ResumeDocument::new("Jane Doe"), "modern", as_of, JsonFormat::Pretty)?;
/// std::fs::write("resume.json", json)?;
/// # Ok::<(), resumeforge::Error>(())
/// ```
pub fn to_json(
    document: &ResumeDocument,
    template_id: &str,
    as_of: NaiveDate,
    format: JsonFormat,
) -> Result<String> {
    let doc = render_resume(document, template_id, as_of)?;
    render::to_json(&doc, format)
}

/// Builder for rendering and exporting resumes.
///
/// Defaults to the template stored in the resume's own options.
///
/// # Example
///
/// ```no_run
/// use chrono::NaiveDate;
/// use resumeforge::{ExportFormat, PresentMarker, ResumeDocument, ResumeForge};
///
/// let resume = ResumeDocument::new("Jane Doe");
/// let report = ResumeForge::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
///     .with_template("classic")
///     .with_present_marker(PresentMarker::AsOfDate)
///     .export(&resume, ExportFormat::Docx, "resume.docx")?;
/// println!("{} bytes", report.bytes_written);
/// # Ok::<(), resumeforge::Error>(())
/// ```
pub struct ResumeForge {
    template_id: Option<String>,
    options: ExportOptions,
}

impl ResumeForge {
    /// Create a builder for the given date.
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            template_id: None,
            options: ExportOptions::new(as_of),
        }
    }

    /// Override the template.
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Set how ongoing periods are displayed.
    pub fn with_present_marker(mut self, marker: PresentMarker) -> Self {
        self.options = self.options.with_present_marker(marker);
        self
    }

    /// Set plain-text options.
    pub fn with_text_options(mut self, text: TextOptions) -> Self {
        self.options = self.options.with_text_options(text);
        self
    }

    /// Set the capability probe.
    pub fn with_probe(mut self, probe: impl CapabilityProbe + 'static) -> Self {
        self.options = self.options.with_probe(probe);
        self
    }

    /// Export options this builder passes to the pipeline.
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    fn template_id<'a>(&'a self, document: &'a ResumeDocument) -> &'a str {
        self.template_id
            .as_deref()
            .unwrap_or(&document.options.template_id)
    }

    /// Render to the intermediate document.
    pub fn render(&self, document: &ResumeDocument) -> Result<IntermediateDocument> {
        let template = get_template(self.template_id(document))?;
        Ok(render::render(
            document,
            template,
            &self.options.render_context(),
        ))
    }

    /// Export to bytes.
    pub fn to_bytes(
        &self,
        document: &ResumeDocument,
        format: ExportFormat,
    ) -> Result<(Vec<u8>, ExportReport)> {
        export_bytes(document, self.template_id(document), format, &self.options)
    }

    /// Export a textual format to a string.
    pub fn export_string(&self, document: &ResumeDocument, format: ExportFormat) -> Result<String> {
        let (bytes, _) = self.to_bytes(document, format)?;
        String::from_utf8(bytes)
            .map_err(|_| Error::Other(format!("{} output is not valid UTF-8", format)))
    }

    /// Export to a file.
    pub fn export<P: AsRef<Path>>(
        &self,
        document: &ResumeDocument,
        format: ExportFormat,
        destination: P,
    ) -> Result<ExportReport> {
        export_resume(
            document,
            self.template_id(document),
            format,
            destination,
            &self.options,
        )
    }

    /// Export several formats into a directory.
    pub fn export_all<P: AsRef<Path>>(
        &self,
        document: &ResumeDocument,
        formats: &[ExportFormat],
        dest_dir: P,
    ) -> Vec<(ExportFormat, Result<ExportReport>)> {
        export_all(
            document,
            self.template_id(document),
            formats,
            dest_dir,
            &self.options,
        )
    }
}
