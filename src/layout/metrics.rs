//! Static font-metric tables for the three standard font families.
//!
//! Widths are in 1/1000 em, taken from the base-14 AFM files. Tables cover
//! ASCII 0x20..=0x7E; index = (char as usize) - 32. Other characters use a
//! per-table fallback width.

use crate::model::TextStyle;
use crate::template::FontFamily;

/// Character-width table for one font face.
pub struct FontMetrics {
    /// PDF base font name
    pub base_font: &'static str,
    widths: [u16; 95],
    fallback: u16,
}

impl FontMetrics {
    /// Width of one character in 1/1000 em.
    pub fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            self.widths[code - 32]
        } else {
            // Courier (600-unit space) keeps its fixed pitch
            match c {
                '\u{2022}' if self.widths[0] != 600 => 350,
                '\u{2014}' if self.widths[0] != 600 => 1000,
                '\u{00A0}' => self.widths[0],
                _ => self.fallback,
            }
        }
    }

    /// Rendered width of a string at the given size, in points.
    pub fn measure(&self, s: &str, size: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size / 1000.0
    }
}

/// Metrics for a family and style.
pub fn metrics(family: FontFamily, style: TextStyle) -> &'static FontMetrics {
    match (family, style.bold, style.italic) {
        (FontFamily::Helvetica, false, false) => &HELVETICA,
        (FontFamily::Helvetica, true, false) => &HELVETICA_BOLD,
        (FontFamily::Helvetica, false, true) => &HELVETICA_OBLIQUE,
        (FontFamily::Helvetica, true, true) => &HELVETICA_BOLD_OBLIQUE,
        (FontFamily::Times, false, false) => &TIMES_ROMAN,
        (FontFamily::Times, true, false) => &TIMES_BOLD,
        (FontFamily::Times, false, true) => &TIMES_ITALIC,
        (FontFamily::Times, true, true) => &TIMES_BOLD_ITALIC,
        (FontFamily::Courier, false, false) => &COURIER,
        (FontFamily::Courier, true, false) => &COURIER_BOLD,
        (FontFamily::Courier, false, true) => &COURIER_OBLIQUE,
        (FontFamily::Courier, true, true) => &COURIER_BOLD_OBLIQUE,
    }
}

/// Measure a string in a family and style at a size, in points.
pub fn measure(family: FontFamily, style: TextStyle, s: &str, size: f32) -> f32 {
    metrics(family, style).measure(s, size)
}

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :    ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A-M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N-Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [    \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a-m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n-z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {    |    }    ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

#[rustfmt::skip]
const TIMES_ROMAN_WIDTHS: [u16; 95] = [
    250, 333, 408, 500, 500, 833, 778, 180, 333, 333, 500, 564, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    278, 278, 564, 564, 564, 444, 921,
    722, 667, 667, 722, 611, 556, 722, 722, 333, 389, 722, 611, 889,
    722, 722, 556, 722, 667, 556, 611, 722, 722, 944, 722, 722, 611,
    333, 278, 333, 469, 500, 333,
    444, 500, 444, 500, 444, 333, 500, 500, 278, 278, 500, 278, 778,
    500, 500, 500, 500, 333, 389, 278, 500, 500, 722, 500, 500, 444,
    480, 200, 480, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_WIDTHS: [u16; 95] = [
    250, 333, 555, 500, 500, 1000, 833, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 930,
    722, 667, 722, 722, 667, 611, 778, 778, 389, 500, 778, 667, 944,
    722, 778, 611, 778, 722, 556, 667, 722, 722, 1000, 722, 722, 667,
    333, 278, 333, 581, 500, 333,
    500, 556, 444, 556, 444, 333, 500, 556, 278, 333, 556, 278, 833,
    556, 500, 556, 556, 444, 389, 333, 556, 500, 722, 500, 500, 444,
    394, 220, 394, 520,
];

#[rustfmt::skip]
const TIMES_ITALIC_WIDTHS: [u16; 95] = [
    250, 333, 420, 500, 500, 833, 778, 214, 333, 333, 500, 675, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 675, 675, 675, 500, 920,
    611, 611, 667, 722, 611, 611, 722, 722, 333, 444, 667, 556, 833,
    667, 722, 611, 722, 611, 500, 556, 722, 611, 833, 611, 556, 556,
    389, 278, 389, 422, 500, 333,
    500, 500, 444, 500, 444, 278, 500, 500, 278, 278, 444, 278, 722,
    500, 500, 500, 500, 389, 389, 278, 500, 444, 667, 444, 444, 389,
    400, 275, 400, 541,
];

#[rustfmt::skip]
const TIMES_BOLD_ITALIC_WIDTHS: [u16; 95] = [
    250, 389, 555, 500, 500, 833, 778, 278, 333, 333, 500, 570, 250, 333, 250, 278,
    500, 500, 500, 500, 500, 500, 500, 500, 500, 500,
    333, 333, 570, 570, 570, 500, 832,
    667, 667, 667, 722, 667, 667, 722, 778, 389, 500, 667, 611, 889,
    722, 722, 611, 722, 667, 556, 611, 722, 667, 889, 667, 611, 611,
    333, 278, 333, 570, 500, 333,
    500, 500, 444, 500, 444, 333, 500, 556, 278, 278, 500, 278, 778,
    556, 500, 500, 500, 389, 389, 278, 556, 444, 667, 500, 444, 389,
    348, 220, 348, 570,
];

const COURIER_WIDTHS: [u16; 95] = [600; 95];

// Oblique faces of Helvetica and Courier share the upright widths.

static HELVETICA: FontMetrics = FontMetrics {
    base_font: "Helvetica",
    widths: HELVETICA_WIDTHS,
    fallback: 556,
};

static HELVETICA_BOLD: FontMetrics = FontMetrics {
    base_font: "Helvetica-Bold",
    widths: HELVETICA_BOLD_WIDTHS,
    fallback: 611,
};

static HELVETICA_OBLIQUE: FontMetrics = FontMetrics {
    base_font: "Helvetica-Oblique",
    widths: HELVETICA_WIDTHS,
    fallback: 556,
};

static HELVETICA_BOLD_OBLIQUE: FontMetrics = FontMetrics {
    base_font: "Helvetica-BoldOblique",
    widths: HELVETICA_BOLD_WIDTHS,
    fallback: 611,
};

static TIMES_ROMAN: FontMetrics = FontMetrics {
    base_font: "Times-Roman",
    widths: TIMES_ROMAN_WIDTHS,
    fallback: 500,
};

static TIMES_BOLD: FontMetrics = FontMetrics {
    base_font: "Times-Bold",
    widths: TIMES_BOLD_WIDTHS,
    fallback: 556,
};

static TIMES_ITALIC: FontMetrics = FontMetrics {
    base_font: "Times-Italic",
    widths: TIMES_ITALIC_WIDTHS,
    fallback: 500,
};

static TIMES_BOLD_ITALIC: FontMetrics = FontMetrics {
    base_font: "Times-BoldItalic",
    widths: TIMES_BOLD_ITALIC_WIDTHS,
    fallback: 500,
};

static COURIER: FontMetrics = FontMetrics {
    base_font: "Courier",
    widths: COURIER_WIDTHS,
    fallback: 600,
};

static COURIER_BOLD: FontMetrics = FontMetrics {
    base_font: "Courier-Bold",
    widths: COURIER_WIDTHS,
    fallback: 600,
};

static COURIER_OBLIQUE: FontMetrics = FontMetrics {
    base_font: "Courier-Oblique",
    widths: COURIER_WIDTHS,
    fallback: 600,
};

static COURIER_BOLD_OBLIQUE: FontMetrics = FontMetrics {
    base_font: "Courier-BoldOblique",
    widths: COURIER_WIDTHS,
    fallback: 600,
};
