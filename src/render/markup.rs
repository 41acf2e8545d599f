//! Light inline markup: `**bold**`, `*italic*`, and `\*` for a literal star.
//!
//! The tokenizer is tolerant. Anything that does not form a well-shaped span
//! (unclosed markers, empty spans, inner text starting or ending with
//! whitespace) stays literal, so parsing never fails.

use crate::model::{TextRun, TextStyle};

/// Parse a line of light markup into styled runs.
///
/// Italic may nest inside bold. Adjacent runs with the same style are merged
/// and empty runs dropped.
pub fn parse_inline(text: &str) -> Vec<TextRun> {
    let chars: Vec<char> = text.chars().collect();
    let mut runs = Vec::new();
    parse_span(&chars, TextStyle::PLAIN, &mut runs);
    merge_runs(runs)
}

/// Strip markup and return the plain text.
pub fn strip_markup(text: &str) -> String {
    parse_inline(text).into_iter().map(|r| r.text).collect()
}

fn parse_span(chars: &[char], style: TextStyle, out: &mut Vec<TextRun>) {
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\\' && chars.get(i + 1) == Some(&'*') {
            literal.push('*');
            i += 2;
            continue;
        }

        if c != '*' {
            literal.push(c);
            i += 1;
            continue;
        }

        let double = chars.get(i + 1) == Some(&'*');
        if double && !style.bold {
            if let Some(end) = find_closing(chars, i + 2, true) {
                let inner = &chars[i + 2..end];
                if is_well_shaped(inner) {
                    flush(&mut literal, style, out);
                    parse_span(inner, style.with_bold(), out);
                    i = end + 2;
                    continue;
                }
            }
            literal.push_str("**");
            i += 2;
            continue;
        }

        if !double && !style.italic {
            if let Some(end) = find_closing(chars, i + 1, false) {
                let inner = &chars[i + 1..end];
                if is_well_shaped(inner) {
                    flush(&mut literal, style, out);
                    parse_span(inner, style.with_italic(), out);
                    i = end + 1;
                    continue;
                }
            }
        }

        literal.push('*');
        i += 1;
    }

    flush(&mut literal, style, out);
}

/// Index of the next unescaped closing marker at or after `from`.
fn find_closing(chars: &[char], from: usize, double: bool) -> Option<usize> {
    let mut j = from;
    while j < chars.len() {
        match chars[j] {
            '\\' if chars.get(j + 1) == Some(&'*') => j += 2,
            '*' if !double => return Some(j),
            '*' if chars.get(j + 1) == Some(&'*') => return Some(j),
            _ => j += 1,
        }
    }
    None
}

fn is_well_shaped(inner: &[char]) -> bool {
    match (inner.first(), inner.last()) {
        (Some(first), Some(last)) => !first.is_whitespace() && !last.is_whitespace(),
        _ => false,
    }
}

fn flush(literal: &mut String, style: TextStyle, out: &mut Vec<TextRun>) {
    if !literal.is_empty() {
        out.push(TextRun::styled(std::mem::take(literal), style));
    }
}

fn merge_runs(runs: Vec<TextRun>) -> Vec<TextRun> {
    let mut merged: Vec<TextRun> = Vec::with_capacity(runs.len());
    for run in runs.into_iter().filter(|r| !r.is_empty()) {
        match merged.last_mut() {
            Some(last) if last.style == run.style => last.text.push_str(&run.text),
            _ => merged.push(run),
        }
    }
    merged
}
