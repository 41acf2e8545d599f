//! Blocks of the intermediate document tree.

use serde::{Deserialize, Serialize};

use super::{paragraph, ImageRef, Paragraph, TextRun};

/// One renderable unit of the intermediate document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading; level 1 is the resume name, 2 a section, 3 an entry
    Heading(Heading),

    /// A paragraph with inline marks
    Paragraph(Paragraph),

    /// A bulleted list
    BulletList(BulletList),

    /// A row of labelled values (contact details, periods)
    KeyValueRow(KeyValueRow),

    /// An embedded image reference
    Image(ImageRef),
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading(Heading::new(level, text))
    }

    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading(_))
    }

    /// Get plain text content of the block. Images contribute nothing.
    pub fn plain_text(&self) -> String {
        match self {
            Block::Heading(h) => h.text.clone(),
            Block::Paragraph(p) => p.plain_text(),
            Block::BulletList(list) => list
                .items
                .iter()
                .map(|item| paragraph::plain_text(item))
                .collect::<Vec<_>>()
                .join("\n"),
            Block::KeyValueRow(row) => row.joined(" | "),
            Block::Image(_) => String::new(),
        }
    }
}

/// A heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-3)
    pub level: u8,

    /// Heading text (plain)
    pub text: String,
}

impl Heading {
    /// Create a heading; the level is clamped to 1-3.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level: level.clamp(1, 3),
            text: text.into(),
        }
    }
}

/// A bulleted list; each item is a sequence of styled runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletList {
    /// List items in display order
    pub items: Vec<Vec<TextRun>>,
}

impl BulletList {
    /// Create a list from items.
    pub fn new(items: Vec<Vec<TextRun>>) -> Self {
        Self { items }
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A row of label/value fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValueRow {
    /// Fields in display order
    pub fields: Vec<Field>,

    /// Whether exporters should show the labels
    pub show_labels: bool,
}

impl KeyValueRow {
    /// Create a row whose labels are hidden.
    pub fn values(fields: Vec<Field>) -> Self {
        Self {
            fields,
            show_labels: false,
        }
    }

    /// Create a row whose labels are shown.
    pub fn labelled(fields: Vec<Field>) -> Self {
        Self {
            fields,
            show_labels: true,
        }
    }

    /// Join the fields with a separator, honoring `show_labels`.
    pub fn joined(&self, separator: &str) -> String {
        self.fields
            .iter()
            .map(|f| {
                if self.show_labels {
                    format!("{}: {}", f.label, f.value)
                } else {
                    f.value.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(separator)
    }

    /// Check if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One labelled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Label, e.g. "Email"
    pub label: String,

    /// Display value
    pub value: String,

    /// Hyperlink target for the value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl Field {
    /// Create a field without a link.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            link: None,
        }
    }

    /// Create a field whose value links somewhere.
    pub fn linked(
        label: impl Into<String>,
        value: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            link: Some(link.into()),
        }
    }
}
