//! Export orchestration.
//!
//! Ties the pipeline together: resolve the template, probe the format's
//! capability, render, encode, and write the destination atomically.
//!
//! # Example
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use resumeforge::{export_resume, ExportFormat, ExportOptions, ResumeDocument};
//!
//! fn main() -> resumeforge::Result<()> {
//!     let resume = ResumeDocument::new("Jane Doe");
//!     let options = ExportOptions::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
//!     let report = export_resume(&resume, "modern", ExportFormat::Pdf, "resume.pdf", &options)?;
//!     println!("{} pages", report.page_count.unwrap_or(0));
//!     Ok(())
//! }
//! ```

use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

use crate::capability::{Capability, CapabilityProbe};
use crate::error::{Error, Result};
use crate::export::{
    ExportFormat, ExportOptions, ExportReport, Exporter, ExporterRegistry, RenderStats,
};
use crate::model::ResumeDocument;
use crate::render;
use crate::template::{builtin_registry, Template, TemplateRegistry};

/// Base file name used by [`export_all`].
pub const DEFAULT_FILE_STEM: &str = "resume";

/// Whether a format can be exported right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FormatAvailability {
    /// The format
    pub format: ExportFormat,

    /// Whether its capability is present
    pub available: bool,

    /// The capability that is missing, if any
    pub missing: Option<Capability>,
}

/// Report which formats the probe allows.
pub fn available_formats(probe: &dyn CapabilityProbe) -> Vec<FormatAvailability> {
    ExportFormat::ALL
        .into_iter()
        .map(|format| {
            let missing = format
                .required_capability()
                .filter(|c| !probe.is_available(*c));
            FormatAvailability {
                format,
                available: missing.is_none(),
                missing,
            }
        })
        .collect()
}

/// Export a resume to a file using the built-in templates and exporters.
pub fn export_resume(
    document: &ResumeDocument,
    template_id: &str,
    format: ExportFormat,
    destination: impl AsRef<Path>,
    options: &ExportOptions,
) -> Result<ExportReport> {
    ExportPipeline::new().export_resume(document, template_id, format, destination, options)
}

/// Export a resume to every requested format in `dest_dir`, in parallel.
///
/// Files are named `resume.<ext>`. Each format succeeds or fails on its own.
pub fn export_all(
    document: &ResumeDocument,
    template_id: &str,
    formats: &[ExportFormat],
    dest_dir: impl AsRef<Path>,
    options: &ExportOptions,
) -> Vec<(ExportFormat, Result<ExportReport>)> {
    ExportPipeline::new().export_all(document, template_id, formats, dest_dir, options)
}

/// Run the export pipeline in memory.
pub fn export_bytes(
    document: &ResumeDocument,
    template_id: &str,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<(Vec<u8>, ExportReport)> {
    ExportPipeline::new().export_bytes(document, template_id, format, options)
}

/// Template and exporter registries used for one or more exports.
pub struct ExportPipeline<'a> {
    templates: &'a TemplateRegistry,
    exporters: ExporterRegistry,
}

impl ExportPipeline<'static> {
    /// Pipeline over the built-in templates and every compiled-in exporter.
    pub fn new() -> Self {
        Self::with_templates(builtin_registry())
    }
}

impl Default for ExportPipeline<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ExportPipeline<'a> {
    /// Pipeline over a custom template registry.
    pub fn with_templates(templates: &'a TemplateRegistry) -> Self {
        Self {
            templates,
            exporters: ExporterRegistry::with_defaults(),
        }
    }

    /// Register an exporter, replacing the default for its format.
    pub fn with_exporter(mut self, exporter: Arc<dyn Exporter>) -> Self {
        self.exporters.register(exporter);
        self
    }

    /// Resolve the template and exporter, checking capabilities first.
    fn prepare(
        &self,
        template_id: &str,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<(&'a Template, Arc<dyn Exporter>)> {
        let template = self.templates.get(template_id)?;
        log::debug!("Resolved template '{}'", template.id);

        let exporter = self.exporters.get(format);
        let capability = exporter
            .as_ref()
            .map_or(format.required_capability(), |e| e.required_capability());
        if let Some(capability) = capability {
            if !options.probe.is_available(capability) {
                return Err(Error::UnsupportedCapability { format, capability });
            }
        }

        let exporter = exporter
            .ok_or_else(|| Error::Other(format!("No exporter registered for {}", format)))?;
        Ok((template, exporter))
    }

    /// Render and encode without touching the filesystem.
    pub fn export_bytes(
        &self,
        document: &ResumeDocument,
        template_id: &str,
        format: ExportFormat,
        options: &ExportOptions,
    ) -> Result<(Vec<u8>, ExportReport)> {
        let (template, exporter) = self.prepare(template_id, format, options)?;

        let doc = render::render(document, template, &options.render_context());
        log::debug!("Rendered {} blocks for {}", doc.block_count(), format);

        let output = exporter.export_output(&doc, template, options)?;
        let stats = RenderStats::from_document(&doc);
        let mut degradations = doc.degradations;
        degradations.extend(output.degradations);

        let report = ExportReport {
            format,
            path: None,
            bytes_written: output.bytes.len() as u64,
            page_count: output.page_count,
            stats,
            degradations,
        };
        Ok((output.bytes, report))
    }

    /// Export to a file. The destination is replaced only on success.
    pub fn export_resume(
        &self,
        document: &ResumeDocument,
        template_id: &str,
        format: ExportFormat,
        destination: impl AsRef<Path>,
        options: &ExportOptions,
    ) -> Result<ExportReport> {
        let destination = destination.as_ref();
        let (bytes, mut report) = self.export_bytes(document, template_id, format, options)?;

        write_atomic(destination, &bytes)?;
        log::info!(
            "Wrote {} ({} bytes) to {}",
            format,
            bytes.len(),
            destination.display()
        );

        report.path = Some(destination.to_path_buf());
        Ok(report)
    }

    /// Export several formats in parallel into `dest_dir`.
    pub fn export_all(
        &self,
        document: &ResumeDocument,
        template_id: &str,
        formats: &[ExportFormat],
        dest_dir: impl AsRef<Path>,
        options: &ExportOptions,
    ) -> Vec<(ExportFormat, Result<ExportReport>)> {
        let dest_dir = dest_dir.as_ref();
        formats
            .par_iter()
            .map(|&format| {
                let path = dest_dir.join(format!("{}.{}", DEFAULT_FILE_STEM, format.extension()));
                let result = self.export_resume(document, template_id, format, &path, options);
                if let Err(e) = &result {
                    log::warn!("{} export failed: {}", format, e);
                }
                (format, result)
            })
            .collect()
    }
}

/// Write bytes next to the destination and rename over it.
///
/// The temporary file is removed on drop if anything fails before the rename.
fn write_atomic(destination: &Path, bytes: &[u8]) -> Result<()> {
    let io_err = |source| Error::ExportIo {
        path: destination.to_path_buf(),
        source,
    };

    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut file = NamedTempFile::new_in(&dir).map_err(io_err)?;
    file.write_all(bytes).map_err(io_err)?;
    file.as_file().sync_all().map_err(io_err)?;
    file.persist(destination).map_err(|e| io_err(e.error))?;
    Ok(())
}
