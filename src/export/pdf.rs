//! PDF export.
//!
//! Pages come from [`crate::layout::paginate`]; this module only turns placed
//! items into content-stream operations and assembles the file with lopdf.
//! Text uses the standard Type1 fonts with WinAnsi encoding, so no font data
//! is embedded.

use chrono::NaiveDate;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use md5::{Digest, Md5};
use std::cell::Cell;
use std::io::Write;

use crate::error::{Error, Result};
use crate::layout::{
    self, ItemKind, PageLayout, PlacedContent, PlacedItem, BULLET_INDENT_EM,
};
use crate::model::{Block, Degradation, IntermediateDocument, QrMatrix, TextRun, TextStyle};
use crate::qr::QUIET_ZONE;
use crate::template::{Color, Palette, Template};

use super::{ExportFormat, ExportOptions, ExportOutput, Exporter};

/// Resource names for the four faces of the template family.
const FACES: [(&str, TextStyle); 4] = [
    ("F1", TextStyle::PLAIN),
    ("F2", TextStyle::BOLD),
    ("F3", TextStyle::ITALIC),
    ("F4", TextStyle::BOLD_ITALIC),
];

/// PDF exporter.
#[derive(Debug, Clone, Default)]
pub struct PdfExporter;

impl PdfExporter {
    /// Create a new PDF exporter.
    pub fn new() -> Self {
        Self
    }

    /// Lay out and serialize a document.
    ///
    /// The output carries the page count and a [`Degradation::GlyphsReplaced`]
    /// entry when some characters have no WinAnsi code.
    pub fn to_pdf(
        &self,
        doc: &IntermediateDocument,
        template: &Template,
        as_of: NaiveDate,
    ) -> Result<ExportOutput> {
        check_images(doc)?;
        let pages = layout::paginate(doc, template);
        let palette = template.palette_for(doc.hints.dark_mode);
        let painter = Painter {
            template,
            palette,
            paint_background: doc.hints.dark_mode,
            replaced: Cell::new(0),
        };

        let mut pdf = Document::with_version("1.5");
        let pages_id = pdf.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for (name, style) in FACES {
            let face = layout::metrics(template.typography.family, style);
            let font_id = pdf.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => face.base_font,
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(name, font_id);
        }
        let resources_id = pdf.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut hasher = Md5::new();
        let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
        for page in &pages {
            let raw = painter.page(page).encode()?;
            hasher.update(&raw);

            let content_id = pdf.add_object(Stream::new(
                dictionary! { "Filter" => "FlateDecode" },
                deflate(&raw)?,
            ));
            let page_id = pdf.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let (width, height) = template.page.size.dimensions();
        let page_count = kids.len();
        pdf.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
                "Resources" => resources_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(width),
                    Object::Real(height),
                ],
            }),
        );

        let catalog_id = pdf.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = info(&mut pdf, &doc.title, as_of);

        hasher.update(doc.title.as_bytes());
        hasher.update(as_of.to_string().as_bytes());
        let file_id = hasher.finalize().to_vec();

        pdf.trailer.set("Root", catalog_id);
        pdf.trailer.set("Info", info_id);
        pdf.trailer.set(
            "ID",
            Object::Array(vec![
                Object::String(file_id.clone(), StringFormat::Hexadecimal),
                Object::String(file_id, StringFormat::Hexadecimal),
            ]),
        );

        let mut bytes = Vec::new();
        pdf.save_to(&mut bytes)?;
        log::debug!("Wrote PDF: {} pages, {} bytes", page_count, bytes.len());

        let output = ExportOutput {
            bytes,
            page_count: Some(page_count),
            degradations: Vec::new(),
        };
        Ok(match painter.replaced.get() {
            0 => output,
            count => output.with_degradation(Degradation::GlyphsReplaced { count }),
        })
    }
}

impl Exporter for PdfExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn export(
        &self,
        doc: &IntermediateDocument,
        template: &Template,
        options: &ExportOptions,
    ) -> Result<Vec<u8>> {
        self.to_pdf(doc, template, options.as_of).map(|output| output.bytes)
    }

    fn export_output(
        &self,
        doc: &IntermediateDocument,
        template: &Template,
        options: &ExportOptions,
    ) -> Result<ExportOutput> {
        self.to_pdf(doc, template, options.as_of)
    }
}

fn info(pdf: &mut Document, title: &str, as_of: NaiveDate) -> ObjectId {
    let title = if title.is_empty() {
        "Resume".to_string()
    } else {
        format!("{} | Resume", title)
    };
    let date = format!("D:{}000000Z", as_of.format("%Y%m%d"));
    pdf.add_object(dictionary! {
        "Title" => text_string(&title),
        "Creator" => Object::string_literal("resumeforge"),
        "Producer" => Object::string_literal(concat!("resumeforge ", env!("CARGO_PKG_VERSION"))),
        "CreationDate" => Object::string_literal(date.clone()),
        "ModDate" => Object::string_literal(date),
    })
}

/// Every image must carry its full module grid before anything is drawn.
fn check_images(doc: &IntermediateDocument) -> Result<()> {
    for block in &doc.blocks {
        if let Block::Image(image) = block {
            if !image.qr.is_complete() {
                return Err(Error::Encode(format!(
                    "QR matrix for '{}' has no module data",
                    image.qr.target
                )));
            }
        }
    }
    Ok(())
}

fn deflate(raw: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(raw)?;
    Ok(encoder.finish()?)
}

/// Turns placed items into content-stream operations.
struct Painter<'a> {
    template: &'a Template,
    palette: &'a Palette,
    paint_background: bool,
    replaced: Cell<usize>,
}

impl Painter<'_> {
    fn page(&self, page: &PageLayout) -> Content {
        let mut ops = Vec::new();

        if self.paint_background {
            fill_color(&mut ops, self.palette.background);
            ops.push(Operation::new(
                "re",
                vec![real(0.0), real(0.0), real(page.width), real(page.height)],
            ));
            ops.push(Operation::new("f", vec![]));
        }

        for item in &page.items {
            match &item.content {
                PlacedContent::Text(segments) => self.text(&mut ops, page, item, segments),
                PlacedContent::Rule => self.rule(&mut ops, page, item),
                PlacedContent::Image(image) => self.qr(&mut ops, page, item, &image.qr),
            }
        }

        Content { operations: ops }
    }

    fn color_for(&self, kind: ItemKind) -> Color {
        match kind {
            ItemKind::Heading { .. } => self.palette.heading,
            ItemKind::KeyValue | ItemKind::Caption => self.palette.muted,
            ItemKind::HeadingRule => self.palette.accent,
            _ => self.palette.text,
        }
    }

    fn text(
        &self,
        ops: &mut Vec<Operation>,
        page: &PageLayout,
        item: &PlacedItem,
        segments: &[TextRun],
    ) {
        let size = item.font_size;
        let baseline = page.height - baseline_from_top(item);

        fill_color(ops, self.color_for(item.kind));
        ops.push(Operation::new("BT", vec![]));

        if matches!(item.kind, ItemKind::Bullet { first_line: true }) {
            let glyph = self.template.typography.bullet.to_string();
            let x = item.x - BULLET_INDENT_EM * size + 0.4 * size;
            ops.push(font_op(TextStyle::PLAIN, size));
            ops.push(Operation::new("Td", vec![real(x), real(baseline)]));
            ops.push(self.show(&glyph));
            // Back to the text start, relative to the glyph origin
            ops.push(Operation::new("Td", vec![real(item.x - x), real(0.0)]));
        } else {
            ops.push(Operation::new("Td", vec![real(item.x), real(baseline)]));
        }

        let mut current = None;
        for segment in segments {
            if current != Some(segment.style) {
                ops.push(font_op(segment.style, size));
                current = Some(segment.style);
            }
            ops.push(self.show(&segment.text));
        }
        ops.push(Operation::new("ET", vec![]));
    }

    fn show(&self, text: &str) -> Operation {
        let (bytes, replaced) = encode_win_ansi(text);
        self.replaced.set(self.replaced.get() + replaced);
        Operation::new("Tj", vec![Object::string_literal(bytes)])
    }

    fn rule(&self, ops: &mut Vec<Operation>, page: &PageLayout, item: &PlacedItem) {
        let y = page.height - (item.y + item.height / 2.0);
        stroke_color(ops, self.color_for(item.kind));
        ops.push(Operation::new("w", vec![real(0.75)]));
        ops.push(Operation::new("m", vec![real(item.x), real(y)]));
        ops.push(Operation::new("l", vec![real(item.x + item.width), real(y)]));
        ops.push(Operation::new("S", vec![]));
    }

    /// Draw a QR matrix as filled squares; the quiet zone is left unpainted.
    fn qr(&self, ops: &mut Vec<Operation>, page: &PageLayout, item: &PlacedItem, qr: &QrMatrix) {
        if qr.width == 0 {
            return;
        }
        let module = item.width / (qr.width + 2 * QUIET_ZONE) as f32;
        let left = item.x + module * QUIET_ZONE as f32;
        let top = page.height - item.y - module * QUIET_ZONE as f32;

        fill_color(ops, self.palette.text);
        for (x, y) in qr.dark_modules() {
            ops.push(Operation::new(
                "re",
                vec![
                    real(left + x as f32 * module),
                    real(top - (y + 1) as f32 * module),
                    real(module),
                    real(module),
                ],
            ));
        }
        ops.push(Operation::new("f", vec![]));
    }
}

/// Baseline of a text line, measured from the page top.
fn baseline_from_top(item: &PlacedItem) -> f32 {
    let half_leading = (item.height - item.font_size).max(0.0) / 2.0;
    item.y + half_leading + item.font_size * 0.8
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn fill_color(ops: &mut Vec<Operation>, color: Color) {
    let [r, g, b] = color.unit();
    ops.push(Operation::new("rg", vec![real(r), real(g), real(b)]));
}

fn stroke_color(ops: &mut Vec<Operation>, color: Color) {
    let [r, g, b] = color.unit();
    ops.push(Operation::new("RG", vec![real(r), real(g), real(b)]));
}

fn font_op(style: TextStyle, size: f32) -> Operation {
    let name = FACES
        .iter()
        .find(|(_, s)| *s == style)
        .map_or("F1", |(name, _)| name);
    Operation::new("Tf", vec![Object::Name(name.as_bytes().to_vec()), real(size)])
}

/// WinAnsi code for a character, if the code page has one.
fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        ' '..='~' | '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '\u{20ac}' => 0x80,
        '\u{201a}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201e}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02c6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8a,
        '\u{2039}' => 0x8b,
        '\u{0152}' => 0x8c,
        '\u{017d}' => 0x8e,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02dc}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9a,
        '\u{203a}' => 0x9b,
        '\u{0153}' => 0x9c,
        '\u{017e}' => 0x9e,
        '\u{0178}' => 0x9f,
        _ => return None,
    };
    Some(code)
}

/// Encode text in WinAnsi, returning the bytes and how many characters
/// had no code and became `?`.
fn encode_win_ansi(text: &str) -> (Vec<u8>, usize) {
    let mut replaced = 0;
    let bytes: Vec<u8> = text
        .chars()
        .map(|c| {
            win_ansi_code(c).unwrap_or_else(|| {
                replaced += 1;
                b'?'
            })
        })
        .collect();
    (bytes, replaced)
}

/// Encode text in WinAnsi; characters outside the code page become `?`.
pub(crate) fn win_ansi(text: &str) -> Vec<u8> {
    encode_win_ansi(text).0
}

/// PDF text string for document metadata: literal ASCII, or UTF-16BE with
/// a byte-order mark otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xfe, 0xff];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BulletList, Field, ImageRef, KeyValueRow};
    use crate::template::get_template;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    fn sample(bullets: usize) -> IntermediateDocument {
        let mut doc = IntermediateDocument::new("Jane Doe");
        doc.push(Block::heading(1, "Jane Doe"));
        doc.push(Block::KeyValueRow(KeyValueRow::values(vec![Field::new(
            "Email",
            "jane@example.com",
        )])));
        doc.push(Block::heading(2, "Experience"));
        doc.push(Block::heading(3, "Engineer, Acme"));
        let item = "Led the migration of a monolithic billing platform to independently \
                    deployable services, cutting release lead time and incident volume \
                    across four product teams";
        doc.push(Block::BulletList(BulletList::new(
            (0..bullets).map(|_| vec![TextRun::new(item)]).collect(),
        )));
        doc
    }

    #[test]
    fn test_win_ansi() {
        assert_eq!(win_ansi("Jan 2020 \u{2013} Present"), b"Jan 2020 \x96 Present");
        assert_eq!(win_ansi("caf\u{e9} \u{2022}"), b"caf\xe9 \x95");
        assert_eq!(win_ansi("\u{4e2d}"), b"?");
    }

    #[test]
    fn test_win_ansi_high_range() {
        assert_eq!(win_ansi("\u{160}imon \u{17d}\u{e1}k"), b"\x8aimon \x8e\xe1k");
        assert_eq!(win_ansi("\u{161}\u{17e}\u{152}\u{153}\u{178}"), b"\x9a\x9e\x8c\x9c\x9f");
        assert_eq!(win_ansi("\u{201a}\u{201e}\u{2020}\u{2021}\u{2030}"), b"\x82\x84\x86\x87\x89");
        assert_eq!(win_ansi("\u{2039}\u{203a}\u{2c6}\u{2dc}\u{192}"), b"\x8b\x9b\x88\x98\x83");
        assert_eq!(encode_win_ansi("\u{141}ukasz \u{4e2d}"), (b"?ukasz ?".to_vec(), 2));
    }

    #[test]
    fn test_incomplete_qr_matrix_fails() {
        let mut doc = sample(1);
        let qr = QrMatrix {
            target: "https://example.com/jane".into(),
            width: 21,
            modules: Vec::new(),
        };
        doc.push(Block::Image(ImageRef::qr_code(qr, "QR code")));

        let err = PdfExporter::new()
            .to_pdf(&doc, get_template("modern").unwrap(), date())
            .unwrap_err();
        assert!(matches!(err, Error::Encode(_)));
    }

    #[test]
    fn test_unencodable_glyphs_reported() {
        let mut doc = IntermediateDocument::new("\u{160}imon \u{17d}\u{e1}k \u{141}ukasz");
        doc.push(Block::heading(1, "\u{160}imon \u{17d}\u{e1}k \u{141}ukasz"));
        doc.push(Block::heading(3, "In\u{17e}en\u{fd}r, \u{160}koda"));

        let output = PdfExporter::new()
            .to_pdf(&doc, get_template("modern").unwrap(), date())
            .unwrap();
        assert_eq!(
            output.degradations,
            vec![Degradation::GlyphsReplaced { count: 1 }]
        );

        let loaded = lopdf::Document::load_mem(&output.bytes).unwrap();
        let page_id = *loaded.get_pages().get(&1).unwrap();
        let content = loaded.get_page_content(page_id).unwrap();
        assert!(content
            .windows(13)
            .any(|w| w == b"\x8aimon \x8e\xe1k ?u"));
        assert!(content.windows(6).any(|w| w == b"\x8akoda"));
    }

    #[test]
    fn test_output_loads() {
        let output = PdfExporter::new()
            .to_pdf(&sample(3), get_template("modern").unwrap(), date())
            .unwrap();
        let bytes = output.bytes;
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(output.page_count, Some(1));
        assert!(output.degradations.is_empty());

        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), 1);
        assert!(loaded.trailer.get(b"ID").is_ok());
    }

    #[test]
    fn test_page_content_has_text() {
        let bytes = PdfExporter::new()
            .to_pdf(&sample(1), get_template("classic").unwrap(), date())
            .unwrap()
            .bytes;
        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        let page_id = *loaded.get_pages().get(&1).unwrap();
        let content = loaded.get_page_content(page_id).unwrap();
        let content = String::from_utf8_lossy(&content);
        assert!(content.contains("(Jane Doe)"));
        assert!(content.contains("Tf"));
    }

    #[test]
    fn test_many_bullets_span_pages() {
        let output = PdfExporter::new()
            .to_pdf(&sample(30), get_template("modern").unwrap(), date())
            .unwrap();
        let (bytes, pages) = (output.bytes, output.page_count.unwrap());
        assert!(pages > 1);
        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(loaded.get_pages().len(), pages);
    }

    #[test]
    fn test_export_output_reports_pages() {
        let options = ExportOptions::new(date());
        let output = PdfExporter::new()
            .export_output(&sample(2), get_template("modern").unwrap(), &options)
            .unwrap();
        assert_eq!(output.page_count, Some(1));
    }

    #[test]
    fn test_deterministic_output() {
        let template = get_template("modern").unwrap();
        let a = PdfExporter::new().to_pdf(&sample(2), template, date()).unwrap();
        let b = PdfExporter::new().to_pdf(&sample(2), template, date()).unwrap();
        assert_eq!(a.bytes, b.bytes);
    }

    #[cfg(feature = "qr")]
    #[test]
    fn test_qr_drawn_as_rectangles() {
        let mut doc = sample(1);
        let qr = crate::qr::encode("https://example.com/jane").unwrap();
        doc.push(Block::Image(ImageRef::qr_code(qr, "QR code")));
        doc.hints.dark_mode = true;

        let bytes = PdfExporter::new()
            .to_pdf(&doc, get_template("dark").unwrap(), date())
            .unwrap()
            .bytes;
        let loaded = lopdf::Document::load_mem(&bytes).unwrap();
        let page_id = *loaded.get_pages().get(&1).unwrap();
        let content = loaded.get_page_content(page_id).unwrap();
        let content = String::from_utf8_lossy(&content);
        assert!(content.matches(" re").count() > 20);
    }
}
