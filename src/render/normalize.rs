//! Text normalization for user-entered fields.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Compiled normalization patterns.
struct Normalizer {
    control: Regex,
    whitespace: Regex,
    bullet_marker: Regex,
}

impl Normalizer {
    fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            control: Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F\u{200B}\u{FEFF}]")?,
            whitespace: Regex::new(r"\s+")?,
            bullet_marker: Regex::new(r"^[-*\u{2022}\u{25CF}\u{25CB}\u{25AA}\u{25A0}\u{25BA}]\s+")?,
        })
    }

    fn shared() -> Option<&'static Normalizer> {
        static SHARED: OnceLock<Option<Normalizer>> = OnceLock::new();
        SHARED
            .get_or_init(|| match Normalizer::new() {
                Ok(n) => Some(n),
                Err(e) => {
                    log::warn!("Text normalization patterns failed to compile: {}", e);
                    None
                }
            })
            .as_ref()
    }

    fn text(&self, text: &str) -> String {
        let result: String = text.nfc().collect();
        let result = self.control.replace_all(&result, "");
        self.whitespace.replace_all(&result, " ").trim().to_string()
    }
}

/// Normalize a single-line field: NFC, control characters dropped,
/// whitespace runs collapsed, ends trimmed. Other characters are kept as typed.
pub fn normalize_text(text: &str) -> String {
    match Normalizer::shared() {
        Some(n) => n.text(text),
        None => text
            .nfc()
            .filter(|c| !c.is_control())
            .collect::<String>()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Normalize a list item and drop a leading bullet marker the user typed
/// (`"- "`, `"• "`, `"* "`).
pub fn normalize_item(text: &str) -> String {
    let text = normalize_text(text);
    match Normalizer::shared() {
        Some(n) => n.bullet_marker.replace(&text, "").into_owned(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize_text("  Senior   Engineer\n\tat Acme "), "Senior Engineer at Acme");
    }

    #[test]
    fn test_control_characters_dropped() {
        assert_eq!(normalize_text("Acme\u{0007}\u{FEFF} Corp"), "Acme Corp");
    }

    #[test]
    fn test_typed_characters_kept() {
        assert_eq!(normalize_text("e\u{FB03}cient"), "e\u{FB03}cient");
        assert_eq!(normalize_text("Caf\u{FFFD}"), "Caf\u{FFFD}");
        assert_eq!(normalize_text("\u{160}koda"), "\u{160}koda");
    }

    #[test]
    fn test_nfc() {
        // "e" + combining acute accent composes to a single code point
        assert_eq!(normalize_text("Jose\u{0301}"), "Jos\u{00E9}");
    }

    #[test]
    fn test_item_marker_stripped() {
        assert_eq!(normalize_item("- Built X"), "Built X");
        assert_eq!(normalize_item("\u{2022}  Shipped Y"), "Shipped Y");
        assert_eq!(normalize_item("* Led team"), "Led team");
        assert_eq!(normalize_item("*Led* team"), "*Led* team");
        assert_eq!(normalize_item("-5% churn"), "-5% churn");
    }
}
