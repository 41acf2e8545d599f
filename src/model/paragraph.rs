//! Paragraph and inline text types.

use serde::{Deserialize, Serialize};

/// A paragraph of styled text runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    pub runs: Vec<TextRun>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph from runs.
    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self { runs }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            runs: vec![TextRun::new(text)],
        }
    }

    /// Add a styled text run.
    pub fn add_run(&mut self, run: TextRun) {
        self.runs.push(run);
    }

    /// Get plain text content of the paragraph (marks stripped).
    pub fn plain_text(&self) -> String {
        plain_text(&self.runs)
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

/// Concatenate the text of a run sequence, dropping all marks.
pub fn plain_text(runs: &[TextRun]) -> String {
    runs.iter().map(|r| r.text.as_str()).collect()
}

/// A run of text with consistent marks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,

    /// Inline marks
    #[serde(default, skip_serializing_if = "TextStyle::is_plain")]
    pub style: TextStyle,
}

impl TextRun {
    /// Create a new text run with default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
        }
    }

    /// Create a text run with the given style.
    pub fn styled(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Create a bold text run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::BOLD)
    }

    /// Create an italic text run.
    pub fn italic(text: impl Into<String>) -> Self {
        Self::styled(text, TextStyle::ITALIC)
    }

    /// Check if this run is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Inline marks resolved from light markup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextStyle {
    /// Bold text
    pub bold: bool,

    /// Italic text
    pub italic: bool,
}

impl TextStyle {
    /// No marks.
    pub const PLAIN: TextStyle = TextStyle {
        bold: false,
        italic: false,
    };

    /// Bold only.
    pub const BOLD: TextStyle = TextStyle {
        bold: true,
        italic: false,
    };

    /// Italic only.
    pub const ITALIC: TextStyle = TextStyle {
        bold: false,
        italic: true,
    };

    /// Bold and italic.
    pub const BOLD_ITALIC: TextStyle = TextStyle {
        bold: true,
        italic: true,
    };

    /// Check if no mark is applied.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic
    }

    /// This style with bold added.
    pub fn with_bold(self) -> Self {
        Self { bold: true, ..self }
    }

    /// This style with italic added.
    pub fn with_italic(self) -> Self {
        Self {
            italic: true,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_plain_text() {
        let mut p = Paragraph::new();
        p.add_run(TextRun::new("Built "));
        p.add_run(TextRun::bold("X"));
        p.add_run(TextRun::new("!"));

        assert_eq!(p.plain_text(), "Built X!");
        assert!(!p.is_empty());
        assert!(Paragraph::with_text("   ").is_empty());
    }

    #[test]
    fn test_text_style() {
        assert!(TextStyle::default().is_plain());
        assert!(!TextStyle::BOLD.is_plain());
        let both = TextStyle::BOLD.with_italic();
        assert!(both.bold && both.italic);
    }
}
