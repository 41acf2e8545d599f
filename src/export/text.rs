//! Plain text export.

use crate::error::Result;
use crate::model::{paragraph, Block, IntermediateDocument};
use crate::template::Template;

use super::{ExportFormat, ExportOptions, Exporter, TextOptions};

/// Plain text exporter. Always available.
///
/// Images are skipped and dark mode is ignored; every other block maps to
/// one or more lines.
#[derive(Debug, Clone, Default)]
pub struct TextExporter;

impl TextExporter {
    /// Create a new plain text exporter.
    pub fn new() -> Self {
        Self
    }

    /// Render a document to a string.
    pub fn to_text(
        &self,
        doc: &IntermediateDocument,
        template: &Template,
        options: &TextOptions,
    ) -> String {
        let mut writer = TextWriter {
            options,
            heading_rule: template.typography.heading_rule,
            out: String::new(),
        };
        for block in &doc.blocks {
            writer.block(block);
        }
        writer.out
    }
}

impl Exporter for TextExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Txt
    }

    fn export(
        &self,
        doc: &IntermediateDocument,
        template: &Template,
        options: &ExportOptions,
    ) -> Result<Vec<u8>> {
        Ok(self.to_text(doc, template, &options.text).into_bytes())
    }
}

struct TextWriter<'a> {
    options: &'a TextOptions,
    heading_rule: bool,
    out: String,
}

impl TextWriter<'_> {
    fn block(&mut self, block: &Block) {
        match block {
            Block::Heading(h) => {
                if h.level == 2 && !self.out.is_empty() {
                    self.out.push('\n');
                }
                self.line(&h.text, "");
                if self.heading_rule && h.level <= 2 {
                    let rule = if h.level == 1 { '=' } else { '-' };
                    let width = h.text.chars().count();
                    self.out.extend(std::iter::repeat(rule).take(width));
                    self.out.push('\n');
                }
            }
            Block::Paragraph(p) => self.line(&p.plain_text(), ""),
            Block::BulletList(list) => {
                let prefix = self.options.bullet_prefix.clone();
                for item in &list.items {
                    self.line(&paragraph::plain_text(item), &prefix);
                }
            }
            Block::KeyValueRow(row) => self.line(&row.joined(" | "), ""),
            Block::Image(_) => {}
        }
    }

    /// Write a logical line, wrapping when a width is set. Continuation
    /// lines are indented to align with text after the prefix.
    fn line(&mut self, text: &str, prefix: &str) {
        let width = self.options.line_width;
        if width == 0 {
            self.out.push_str(prefix);
            self.out.push_str(text);
            self.out.push('\n');
            return;
        }

        let indent = " ".repeat(prefix.chars().count());
        let lines = wrap_words(text, width.saturating_sub(indent.len()).max(1));
        for (i, line) in lines.iter().enumerate() {
            self.out.push_str(if i == 0 { prefix } else { &indent });
            self.out.push_str(line);
            self.out.push('\n');
        }
    }
}

/// Greedy word wrap by character count; overlong words get their own line.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        if current_len > 0 && current_len + 1 + len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += len;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
