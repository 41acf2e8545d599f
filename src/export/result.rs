//! Export reports and statistics.

use serde::Serialize;
use std::path::PathBuf;

use super::ExportFormat;
use crate::model::{paragraph, Block, Degradation, IntermediateDocument};

/// Bytes produced by an exporter.
#[derive(Debug, Clone, Default)]
pub struct ExportOutput {
    /// Encoded document
    pub bytes: Vec<u8>,

    /// Number of pages, for paged formats
    pub page_count: Option<usize>,

    /// Content the exporter could not represent faithfully
    pub degradations: Vec<Degradation>,
}

impl ExportOutput {
    /// Output without page information.
    pub fn unpaged(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ..Default::default()
        }
    }

    /// Record an exporter-side degradation.
    pub fn with_degradation(mut self, degradation: Degradation) -> Self {
        log::warn!("Degraded export: {}", degradation.describe());
        self.degradations.push(degradation);
        self
    }
}

/// Outcome of a successful export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    /// Format written
    pub format: ExportFormat,

    /// Destination file; `None` for in-memory exports
    pub path: Option<PathBuf>,

    /// Size of the output
    pub bytes_written: u64,

    /// Page count for paged formats
    pub page_count: Option<usize>,

    /// Content statistics of the rendered document
    pub stats: RenderStats,

    /// Content the renderer omitted or the exporter replaced
    pub degradations: Vec<Degradation>,
}

impl ExportReport {
    /// Check if anything was omitted.
    pub fn is_degraded(&self) -> bool {
        !self.degradations.is_empty()
    }
}

/// Statistics collected from a rendered document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Total number of blocks
    pub block_count: u32,

    /// Number of headings
    pub heading_count: u32,

    /// Number of paragraphs
    pub paragraph_count: u32,

    /// Number of bullet items
    pub bullet_count: u32,

    /// Number of images
    pub image_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Collect statistics from a document.
    pub fn from_document(doc: &IntermediateDocument) -> Self {
        let mut stats = Self::default();
        for block in &doc.blocks {
            stats.block_count += 1;
            match block {
                Block::Heading(h) => {
                    stats.heading_count += 1;
                    stats.count_text(&h.text);
                }
                Block::Paragraph(p) => {
                    stats.paragraph_count += 1;
                    stats.count_text(&p.plain_text());
                }
                Block::BulletList(list) => {
                    for item in &list.items {
                        stats.bullet_count += 1;
                        stats.count_text(&paragraph::plain_text(item));
                    }
                }
                Block::KeyValueRow(row) => stats.count_text(&row.joined(" ")),
                Block::Image(_) => stats.image_count += 1,
            }
        }
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
