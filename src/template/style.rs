//! Typography, color, and page geometry for templates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard font families available in every output format.
///
/// These map to the PDF base-14 families, so PDF output needs no embedded
/// font programs. HTML and DOCX use the matching system font names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFamily {
    /// Sans-serif (Helvetica / Arial)
    Helvetica,
    /// Serif (Times / Times New Roman)
    Times,
    /// Monospace (Courier / Courier New)
    Courier,
}

impl FontFamily {
    /// CSS `font-family` stack.
    pub fn css_stack(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "'Segoe UI', Helvetica, Arial, sans-serif",
            FontFamily::Times => "'Times New Roman', Times, serif",
            FontFamily::Courier => "'Courier New', Courier, monospace",
        }
    }

    /// Font name used in word-processor documents.
    pub fn office_name(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Arial",
            FontFamily::Times => "Times New Roman",
            FontFamily::Courier => "Courier New",
        }
    }
}

/// Font sizes and text decoration rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Typography {
    /// Font family for all text
    pub family: FontFamily,

    /// Body text size in points
    pub body_size: f32,

    /// Heading sizes in points for levels 1, 2 and 3
    pub heading_sizes: [f32; 3],

    /// Line height as a multiple of the font size
    pub line_height: f32,

    /// Draw a rule under level-1 and level-2 headings
    pub heading_rule: bool,

    /// Glyph used for bullet items in paged formats
    pub bullet: char,
}

impl Typography {
    /// Font size for a heading level (clamped to 1-3).
    pub fn heading_size(&self, level: u8) -> f32 {
        let index = usize::from(level.clamp(1, 3)) - 1;
        self.heading_sizes[index]
    }

    /// Vertical advance of one line at the given font size.
    pub fn line_advance(&self, size: f32) -> f32 {
        size * self.line_height
    }
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            family: FontFamily::Helvetica,
            body_size: 10.5,
            heading_sizes: [22.0, 14.0, 11.5],
            line_height: 1.35,
            heading_rule: false,
            bullet: '\u{2022}',
        }
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Create a color from components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a 24-bit value such as `0x2c3e50`.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.trim().strip_prefix('#')?;
        match digits.len() {
            6 => u32::from_str_radix(digits, 16).ok().map(Self::hex),
            3 => {
                let expanded: String = digits.chars().flat_map(|c| [c, c]).collect();
                u32::from_str_radix(&expanded, 16).ok().map(Self::hex)
            }
            _ => None,
        }
    }

    /// Components scaled to 0.0-1.0 for PDF color operators.
    pub fn unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }

    /// Six hex digits without the `#`, as used by OOXML.
    pub fn hex_digits(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Color::parse(&s).ok_or_else(|| format!("invalid color: {}", s))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A set of colors applied to one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    /// Body text
    pub text: Color,
    /// Headings
    pub heading: Color,
    /// Links and rules under the name
    pub accent: Color,
    /// Secondary text (periods, captions) and section rules
    pub muted: Color,
    /// Page background
    pub background: Color,
}

impl Palette {
    /// Light palette shared by the built-in templates.
    pub const LIGHT: Palette = Palette {
        text: Color::hex(0x333333),
        heading: Color::hex(0x2c3e50),
        accent: Color::hex(0x3498db),
        muted: Color::hex(0x777777),
        background: Color::hex(0xffffff),
    };

    /// Dark palette shared by the built-in templates.
    pub const DARK: Palette = Palette {
        text: Color::hex(0xe0e0e0),
        heading: Color::hex(0xbb86fc),
        accent: Color::hex(0x03dac6),
        muted: Color::hex(0x9e9e9e),
        background: Color::hex(0x121212),
    };

    /// Whether the background is white, so paged formats can skip painting it.
    pub fn has_plain_background(&self) -> bool {
        self.background == Color::rgb(255, 255, 255)
    }
}

/// Paper size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// US Letter (8.5 × 11 in)
    #[default]
    Letter,
    /// ISO A4 (210 × 297 mm)
    A4,
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions(self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
        }
    }

    /// Width and height in twentieths of a point (OOXML page units).
    pub fn twips(self) -> (u32, u32) {
        match self {
            PageSize::Letter => (12240, 15840),
            PageSize::A4 => (11906, 16838),
        }
    }
}

/// Page geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Paper size
    pub size: PageSize,

    /// Margin on all four sides, in points
    pub margin: f32,
}

impl PageSetup {
    /// Width available for text.
    pub fn content_width(&self) -> f32 {
        (self.size.dimensions().0 - 2.0 * self.margin).max(1.0)
    }

    /// Height available for text.
    pub fn content_height(&self) -> f32 {
        (self.size.dimensions().1 - 2.0 * self.margin).max(1.0)
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            size: PageSize::Letter,
            margin: 54.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_and_display() {
        assert_eq!(Color::parse("#2c3e50"), Some(Color::rgb(0x2c, 0x3e, 0x50)));
        assert_eq!(Color::parse("#fff"), Some(Color::rgb(255, 255, 255)));
        assert_eq!(Color::parse("2c3e50"), None);
        assert_eq!(Color::parse("#12"), None);
        assert_eq!(Color::hex(0x03dac6).to_string(), "#03dac6");
        assert_eq!(Color::hex(0x03dac6).hex_digits(), "03DAC6");
    }

    #[test]
    fn test_color_serde() {
        let json = serde_json::to_string(&Color::hex(0xbb86fc)).unwrap();
        assert_eq!(json, "\"#bb86fc\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::hex(0xbb86fc));
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn test_heading_size_clamped() {
        let t = Typography::default();
        assert_eq!(t.heading_size(0), t.heading_sizes[0]);
        assert_eq!(t.heading_size(7), t.heading_sizes[2]);
    }

    #[test]
    fn test_page_content_area() {
        let page = PageSetup::default();
        assert_eq!(page.content_width(), 612.0 - 108.0);
        assert_eq!(page.content_height(), 792.0 - 108.0);
        assert!(Palette::LIGHT.has_plain_background());
        assert!(!Palette::DARK.has_plain_background());
    }
}
