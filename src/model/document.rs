//! The intermediate document produced by the renderer.

use serde::{Deserialize, Serialize};

use super::Block;

/// Format-agnostic rendered representation of a resume.
///
/// Built fresh for every export call and consumed by exactly one exporter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntermediateDocument {
    /// Document title (the identity's name)
    pub title: String,

    /// Blocks in display order
    pub blocks: Vec<Block>,

    /// Presentation hints for exporters that support them
    pub hints: RenderHints,

    /// Content the renderer omitted on purpose
    pub degradations: Vec<Degradation>,
}

impl IntermediateDocument {
    /// Create an empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Append a block.
    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Record an explicit degradation.
    pub fn degrade(&mut self, degradation: Degradation) {
        log::warn!("Degraded render: {}", degradation.describe());
        self.degradations.push(degradation);
    }

    /// Number of blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has any image block.
    pub fn has_image(&self) -> bool {
        self.blocks.iter().any(|b| matches!(b, Block::Image(_)))
    }

    /// Get plain text content of the whole document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Hints consumed by exporters that support them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderHints {
    /// Use the template's dark palette (HTML and PDF only)
    pub dark_mode: bool,
}

/// Why an image was omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OmissionReason {
    /// The template does not support embedded images
    TemplateUnsupported,
    /// The image-encoding capability is unavailable
    CapabilityUnavailable,
    /// The payload could not be encoded (e.g. too long for a QR code)
    EncodingFailed,
}

/// Content the renderer left out instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Degradation {
    /// A requested image was not emitted
    ImageOmitted {
        /// Why
        reason: OmissionReason,
    },
    /// Dark mode was requested but the template has no dark palette
    DarkModeUnsupported,
    /// Characters the output font encoding cannot represent were replaced
    GlyphsReplaced {
        /// Number of replaced characters
        count: usize,
    },
}

impl Degradation {
    /// Human-readable description.
    pub fn describe(&self) -> &'static str {
        match self {
            Degradation::ImageOmitted {
                reason: OmissionReason::TemplateUnsupported,
            } => "QR code omitted: template does not support embedded images",
            Degradation::ImageOmitted {
                reason: OmissionReason::CapabilityUnavailable,
            } => "QR code omitted: image encoding is not available",
            Degradation::ImageOmitted {
                reason: OmissionReason::EncodingFailed,
            } => "QR code omitted: target could not be encoded",
            Degradation::DarkModeUnsupported => {
                "dark mode ignored: template has no dark palette"
            }
            Degradation::GlyphsReplaced { .. } => {
                "characters outside the PDF font encoding were replaced with '?'"
            }
        }
    }
}
