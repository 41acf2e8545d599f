//! Greedy word wrap of styled runs.

use crate::model::{TextRun, TextStyle};
use crate::template::FontFamily;

use super::metrics::measure;

/// One wrapped line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    /// Styled segments, adjacent segments never share a style
    pub segments: Vec<TextRun>,

    /// Rendered width in points
    pub width: f32,
}

impl Line {
    /// Plain text of the line.
    pub fn text(&self) -> String {
        crate::model::plain_text(&self.segments)
    }

    fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn append(&mut self, text: &str, style: TextStyle, width: f32) {
        match self.segments.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.segments.push(TextRun::styled(text, style)),
        }
        self.width += width;
    }
}

/// Wraps runs at a fixed width for one font family and size.
pub struct Wrapper {
    family: FontFamily,
    size: f32,
    max_width: f32,
}

impl Wrapper {
    /// Create a wrapper.
    pub fn new(family: FontFamily, size: f32, max_width: f32) -> Self {
        Self {
            family,
            size,
            max_width: max_width.max(1.0),
        }
    }

    /// Wrap runs into lines. Whitespace runs collapse to single spaces.
    ///
    /// Words wider than the line are split between characters.
    pub fn wrap(&self, runs: &[TextRun]) -> Vec<Line> {
        let mut lines = Vec::new();
        let mut line = Line::default();

        for word in split_words(runs) {
            let width: f32 = word.iter().map(|p| self.width(&p.text, p.style)).sum();

            if !line.is_empty() {
                let space = self.width(" ", word[0].style);
                if line.width + space + width <= self.max_width {
                    line.append(" ", word[0].style, space);
                } else {
                    lines.push(std::mem::take(&mut line));
                }
            }

            if line.width + width <= self.max_width {
                for piece in &word {
                    line.append(&piece.text, piece.style, self.width(&piece.text, piece.style));
                }
            } else {
                self.split_word(&word, &mut line, &mut lines);
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
        lines
    }

    fn split_word(&self, word: &[TextRun], line: &mut Line, lines: &mut Vec<Line>) {
        let mut buf = [0u8; 4];
        for piece in word {
            for c in piece.text.chars() {
                let s: &str = c.encode_utf8(&mut buf);
                let w = self.width(s, piece.style);
                if !line.is_empty() && line.width + w > self.max_width {
                    lines.push(std::mem::take(line));
                }
                line.append(s, piece.style, w);
            }
        }
    }

    fn width(&self, text: &str, style: TextStyle) -> f32 {
        measure(self.family, style, text, self.size)
    }
}

/// Split runs into words; a word may span runs with different styles.
fn split_words(runs: &[TextRun]) -> Vec<Vec<TextRun>> {
    let mut words = Vec::new();
    let mut current: Vec<TextRun> = Vec::new();

    for run in runs {
        let mut buf = String::new();
        for c in run.text.chars() {
            if c.is_whitespace() {
                if !buf.is_empty() {
                    current.push(TextRun::styled(std::mem::take(&mut buf), run.style));
                }
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            } else {
                buf.push(c);
            }
        }
        if !buf.is_empty() {
            current.push(TextRun::styled(buf, run.style));
        }
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}
