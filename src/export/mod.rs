//! Format exporters with a plugin architecture.
//!
//! Each output format is an [`Exporter`] that turns an
//! [`IntermediateDocument`] into bytes. Exporters are registered in an
//! [`ExporterRegistry`] and looked up by [`ExportFormat`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use resumeforge::export::{ExportFormat, ExportOptions, ExporterRegistry};
//! use resumeforge::render::{render, RenderContext};
//! use resumeforge::template::get_template;
//! use resumeforge::ResumeDocument;
//!
//! fn main() -> resumeforge::Result<()> {
//!     let as_of = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
//!     let template = get_template("modern")?;
//!     let doc = render(&ResumeDocument::new("Jane Doe"), template, &RenderContext::new(as_of));
//!
//!     let registry = ExporterRegistry::with_defaults();
//!     let exporter = registry.get(ExportFormat::Txt).unwrap();
//!     let bytes = exporter.export(&doc, template, &ExportOptions::new(as_of))?;
//!     assert_eq!(bytes, b"Jane Doe\n");
//!     Ok(())
//! }
//! ```

#[cfg(feature = "docx")]
mod docx;
mod html;
mod options;
#[cfg(feature = "pdf")]
mod pdf;
mod result;
mod text;

#[cfg(feature = "docx")]
pub use docx::DocxExporter;
pub use html::HtmlExporter;
pub use options::{ExportOptions, TextOptions};
#[cfg(feature = "pdf")]
pub use pdf::PdfExporter;
pub use result::{ExportOutput, ExportReport, RenderStats};
pub use text::TextExporter;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::capability::Capability;
use crate::error::{Error, Result};
use crate::model::IntermediateDocument;
use crate::template::Template;

/// Output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Plain text
    Txt,
    /// Self-contained HTML
    Html,
    /// Office Open XML word-processor document
    Docx,
    /// Portable Document Format
    Pdf,
}

impl ExportFormat {
    /// All formats, in a stable order.
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Txt,
        ExportFormat::Html,
        ExportFormat::Docx,
        ExportFormat::Pdf,
    ];

    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Html => "html",
            ExportFormat::Docx => "docx",
            ExportFormat::Pdf => "pdf",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain",
            ExportFormat::Html => "text/html",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// Capability the format depends on, if any.
    pub fn required_capability(self) -> Option<Capability> {
        match self {
            ExportFormat::Txt | ExportFormat::Html => None,
            ExportFormat::Docx => Some(Capability::DocumentAuthoring),
            ExportFormat::Pdf => Some(Capability::PageLayout),
        }
    }

    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "txt" | "text" => Some(ExportFormat::Txt),
            "html" | "htm" => Some(ExportFormat::Html),
            "docx" => Some(ExportFormat::Docx),
            "pdf" => Some(ExportFormat::Pdf),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Txt => "TXT",
            ExportFormat::Html => "HTML",
            ExportFormat::Docx => "DOCX",
            ExportFormat::Pdf => "PDF",
        })
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ExportFormat::from_extension(s)
            .ok_or_else(|| Error::Other(format!("Unknown export format: {}", s)))
    }
}

/// Trait for format exporters.
///
/// Implement this trait to add support for a new output format. Exporters
/// read the document and template and never mutate either.
pub trait Exporter: Send + Sync {
    /// The format this exporter writes.
    fn format(&self) -> ExportFormat;

    /// Capability this exporter needs at run time.
    fn required_capability(&self) -> Option<Capability> {
        self.format().required_capability()
    }

    /// Encode a document.
    fn export(
        &self,
        doc: &IntermediateDocument,
        template: &Template,
        options: &ExportOptions,
    ) -> Result<Vec<u8>>;

    /// Encode a document and report page information when the format has pages.
    fn export_output(
        &self,
        doc: &IntermediateDocument,
        template: &Template,
        options: &ExportOptions,
    ) -> Result<ExportOutput> {
        self.export(doc, template, options).map(ExportOutput::unpaged)
    }
}

/// Registry of exporters keyed by format.
pub struct ExporterRegistry {
    exporters: HashMap<ExportFormat, Arc<dyn Exporter>>,
}

impl ExporterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            exporters: HashMap::new(),
        }
    }

    /// Create a registry with every exporter compiled into this build.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TextExporter::new()));
        registry.register(Arc::new(HtmlExporter::new()));
        #[cfg(feature = "docx")]
        registry.register(Arc::new(DocxExporter::new()));
        #[cfg(feature = "pdf")]
        registry.register(Arc::new(PdfExporter::new()));
        registry
    }

    /// Register an exporter, replacing any previous one for its format.
    pub fn register(&mut self, exporter: Arc<dyn Exporter>) {
        self.exporters.insert(exporter.format(), exporter);
    }

    /// Get the exporter for a format.
    pub fn get(&self, format: ExportFormat) -> Option<Arc<dyn Exporter>> {
        self.exporters.get(&format).cloned()
    }

    /// Check if a format has an exporter.
    pub fn supports(&self, format: ExportFormat) -> bool {
        self.exporters.contains_key(&format)
    }

    /// Registered formats in stable order.
    pub fn formats(&self) -> Vec<ExportFormat> {
        ExportFormat::ALL
            .into_iter()
            .filter(|f| self.supports(*f))
            .collect()
    }
}

impl Default for ExporterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
