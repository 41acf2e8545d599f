//! DOCX export.
//!
//! Writes a minimal Office Open XML word-processing package: styles derived
//! from the template, a bullet numbering definition, core properties and any
//! images as PNG media parts.

use chrono::NaiveDate;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::Result;
use crate::model::{Block, Field, ImageRef, IntermediateDocument, KeyValueRow, TextRun};
use crate::template::{Color, Palette, Template};

use super::{ExportFormat, ExportOptions, Exporter};

const NS_MAIN: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PKG_REL: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_WP: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";
const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_PIC: &str = "http://schemas.openxmlformats.org/drawingml/2006/picture";

const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_NUMBERING: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/numbering";
const REL_SETTINGS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/settings";
const REL_HYPERLINK: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// EMUs per point.
const EMU_PER_PT: f32 = 12_700.0;

/// Numbering instance used by the bullet style.
const BULLET_NUM_ID: &str = "1";

/// DOCX exporter.
#[derive(Debug, Clone, Default)]
pub struct DocxExporter;

impl DocxExporter {
    /// Create a new DOCX exporter.
    pub fn new() -> Self {
        Self
    }

    /// Build the package bytes.
    pub fn to_docx(
        &self,
        doc: &IntermediateDocument,
        template: &Template,
        as_of: NaiveDate,
    ) -> Result<Vec<u8>> {
        let palette = template.palette_for(doc.hints.dark_mode);

        let mut body = BodyWriter::new(palette, doc.hints.dark_mode)?;
        for block in &doc.blocks {
            body.block(block)?;
        }
        let document_xml = body.finish(template)?;
        let rels = document_rels(
            &document_xml.links,
            document_xml.media.len(),
            doc.hints.dark_mode,
        )?;

        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        let parts: Vec<(String, Vec<u8>)> = vec![
            (
                "[Content_Types].xml".into(),
                content_types(!document_xml.media.is_empty(), doc.hints.dark_mode)?,
            ),
            ("_rels/.rels".into(), package_rels()?),
            ("docProps/core.xml".into(), core_properties(&doc.title, as_of)?),
            ("docProps/app.xml".into(), app_properties()?),
            ("word/document.xml".into(), document_xml.bytes),
            ("word/_rels/document.xml.rels".into(), rels),
            ("word/styles.xml".into(), styles(template, palette)?),
            ("word/numbering.xml".into(), numbering(template.typography.bullet)?),
        ];

        for (name, bytes) in parts {
            zip.start_file(name, options)?;
            zip.write_all(&bytes)?;
        }
        if doc.hints.dark_mode {
            zip.start_file("word/settings.xml", options)?;
            zip.write_all(&settings()?)?;
        }
        for (i, png) in document_xml.media.iter().enumerate() {
            zip.start_file(format!("word/media/image{}.png", i + 1), options)?;
            zip.write_all(png)?;
        }

        let bytes = zip.finish()?.into_inner();
        log::debug!("Packaged DOCX: {} bytes", bytes.len());
        Ok(bytes)
    }
}

impl Exporter for DocxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Docx
    }

    fn export(
        &self,
        doc: &IntermediateDocument,
        template: &Template,
        options: &ExportOptions,
    ) -> Result<Vec<u8>> {
        self.to_docx(doc, template, options.as_of)
    }
}

/// Thin wrapper over the quick-xml writer for attribute-list elements.
struct Xml {
    writer: Writer<Cursor<Vec<u8>>>,
}

impl Xml {
    fn new() -> Result<Self> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(Self { writer })
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut elem = BytesStart::new(name);
        for &attr in attrs {
            elem.push_attribute(attr);
        }
        self.writer.write_event(Event::Start(elem))?;
        Ok(())
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let mut elem = BytesStart::new(name);
        for &attr in attrs {
            elem.push_attribute(attr);
        }
        self.writer.write_event(Event::Empty(elem))?;
        Ok(())
    }

    fn text(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn val(&mut self, name: &str, value: &str) -> Result<()> {
        self.empty(name, &[("w:val", value)])
    }

    fn into_bytes(self) -> Vec<u8> {
        self.writer.into_inner().into_inner()
    }
}

/// Finished `word/document.xml` plus the parts it references.
struct DocumentPart {
    bytes: Vec<u8>,
    links: Vec<String>,
    media: Vec<Vec<u8>>,
}

/// Writes body paragraphs, collecting hyperlink targets and media.
struct BodyWriter<'a> {
    xml: Xml,
    palette: &'a Palette,
    links: Vec<String>,
    media: Vec<Vec<u8>>,
    drawing_id: u32,
}

impl<'a> BodyWriter<'a> {
    fn new(palette: &'a Palette, dark: bool) -> Result<Self> {
        let mut xml = Xml::new()?;
        xml.start(
            "w:document",
            &[
                ("xmlns:w", NS_MAIN),
                ("xmlns:r", NS_REL),
                ("xmlns:wp", NS_WP),
                ("xmlns:a", NS_A),
                ("xmlns:pic", NS_PIC),
            ],
        )?;
        if dark {
            let background = palette.background.hex_digits();
            xml.empty("w:background", &[("w:color", background.as_str())])?;
        }
        xml.start("w:body", &[])?;
        Ok(Self {
            xml,
            palette,
            links: Vec::new(),
            media: Vec::new(),
            drawing_id: 0,
        })
    }

    fn block(&mut self, block: &Block) -> Result<()> {
        match block {
            Block::Heading(h) => {
                let style = match h.level {
                    1 => "Title",
                    2 => "Heading1",
                    _ => "Heading2",
                };
                self.paragraph(Some(style), &[TextRun::new(h.text.clone())], None)
            }
            Block::Paragraph(p) => self.paragraph(None, &p.runs, None),
            Block::BulletList(list) => {
                for item in &list.items {
                    self.paragraph(Some("ListBullet"), item, None)?;
                }
                Ok(())
            }
            Block::KeyValueRow(row) => self.key_value_row(row),
            Block::Image(image) => self.image(image),
        }
    }

    fn paragraph(&mut self, style: Option<&str>, runs: &[TextRun], color: Option<Color>) -> Result<()> {
        self.xml.start("w:p", &[])?;
        if let Some(style) = style {
            self.xml.start("w:pPr", &[])?;
            self.xml.val("w:pStyle", style)?;
            self.xml.end("w:pPr")?;
        }
        for run in runs {
            self.run(run, color)?;
        }
        self.xml.end("w:p")
    }

    fn run(&mut self, run: &TextRun, color: Option<Color>) -> Result<()> {
        self.xml.start("w:r", &[])?;
        if !run.style.is_plain() || color.is_some() {
            self.xml.start("w:rPr", &[])?;
            if run.style.bold {
                self.xml.empty("w:b", &[])?;
            }
            if run.style.italic {
                self.xml.empty("w:i", &[])?;
            }
            if let Some(color) = color {
                self.xml.val("w:color", &color.hex_digits())?;
            }
            self.xml.end("w:rPr")?;
        }
        self.xml.text("w:t", &[("xml:space", "preserve")], &run.text)?;
        self.xml.end("w:r")
    }

    fn key_value_row(&mut self, row: &KeyValueRow) -> Result<()> {
        let muted = Some(self.palette.muted);
        self.xml.start("w:p", &[])?;
        self.xml.start("w:pPr", &[])?;
        self.xml.val("w:pStyle", "Meta")?;
        self.xml.end("w:pPr")?;
        for (i, field) in row.fields.iter().enumerate() {
            if i > 0 {
                self.run(&TextRun::new(" | "), muted)?;
            }
            if row.show_labels {
                self.run(&TextRun::bold(format!("{}: ", field.label)), muted)?;
            }
            self.field_value(field)?;
        }
        self.xml.end("w:p")
    }

    fn field_value(&mut self, field: &Field) -> Result<()> {
        match &field.link {
            Some(target) => {
                self.links.push(target.clone());
                let rel_id = format!("rIdLink{}", self.links.len());
                self.xml.start("w:hyperlink", &[("r:id", rel_id.as_str())])?;
                self.run(&TextRun::new(field.value.clone()), Some(self.palette.accent))?;
                self.xml.end("w:hyperlink")
            }
            None => self.run(&TextRun::new(field.value.clone()), Some(self.palette.muted)),
        }
    }

    #[cfg(feature = "qr")]
    fn image(&mut self, image: &ImageRef) -> Result<()> {
        let png = crate::qr::to_png(&image.qr, self.palette.text, self.palette.background)?;
        self.media.push(png);
        self.drawing_id += 1;

        let rel_id = format!("rIdImage{}", self.media.len());
        let name = format!("image{}.png", self.media.len());
        let id = self.drawing_id.to_string();
        let emu = ((image.size_pt * EMU_PER_PT).round() as u64).to_string();
        let extent = [("cx", emu.as_str()), ("cy", emu.as_str())];

        let xml = &mut self.xml;
        xml.start("w:p", &[])?;
        xml.start("w:r", &[])?;
        xml.start("w:drawing", &[])?;
        xml.start(
            "wp:inline",
            &[("distT", "0"), ("distB", "0"), ("distL", "0"), ("distR", "0")],
        )?;
        xml.empty("wp:extent", &extent)?;
        xml.empty(
            "wp:docPr",
            &[("id", id.as_str()), ("name", "QR Code"), ("descr", image.alt_text.as_str())],
        )?;
        xml.start("a:graphic", &[])?;
        xml.start("a:graphicData", &[("uri", NS_PIC)])?;
        xml.start("pic:pic", &[])?;
        xml.start("pic:nvPicPr", &[])?;
        xml.empty("pic:cNvPr", &[("id", "0"), ("name", name.as_str())])?;
        xml.empty("pic:cNvPicPr", &[])?;
        xml.end("pic:nvPicPr")?;
        xml.start("pic:blipFill", &[])?;
        xml.empty("a:blip", &[("r:embed", rel_id.as_str())])?;
        xml.start("a:stretch", &[])?;
        xml.empty("a:fillRect", &[])?;
        xml.end("a:stretch")?;
        xml.end("pic:blipFill")?;
        xml.start("pic:spPr", &[])?;
        xml.start("a:xfrm", &[])?;
        xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
        xml.empty("a:ext", &extent)?;
        xml.end("a:xfrm")?;
        xml.start("a:prstGeom", &[("prst", "rect")])?;
        xml.empty("a:avLst", &[])?;
        xml.end("a:prstGeom")?;
        xml.end("pic:spPr")?;
        xml.end("pic:pic")?;
        xml.end("a:graphicData")?;
        xml.end("a:graphic")?;
        xml.end("wp:inline")?;
        xml.end("w:drawing")?;
        xml.end("w:r")?;
        xml.end("w:p")?;

        if let Some(caption) = &image.caption {
            self.paragraph(Some("Caption"), &[TextRun::italic(caption.clone())], None)?;
        }
        Ok(())
    }

    #[cfg(not(feature = "qr"))]
    fn image(&mut self, image: &ImageRef) -> Result<()> {
        log::warn!(
            "Skipping image '{}' in DOCX output: image encoding is not compiled in",
            image.alt_text
        );
        Ok(())
    }

    /// Close the body; section properties must be its last child.
    fn finish(mut self, template: &Template) -> Result<DocumentPart> {
        let (width, height) = template.page.size.twips();
        let (width, height) = (width.to_string(), height.to_string());
        let margin = ((template.page.margin * 20.0).round() as u32).to_string();

        self.xml.start("w:sectPr", &[])?;
        self.xml.empty(
            "w:pgSz",
            &[("w:w", width.as_str()), ("w:h", height.as_str())],
        )?;
        self.xml.empty(
            "w:pgMar",
            &[
                ("w:top", margin.as_str()),
                ("w:right", margin.as_str()),
                ("w:bottom", margin.as_str()),
                ("w:left", margin.as_str()),
                ("w:header", "720"),
                ("w:footer", "720"),
                ("w:gutter", "0"),
            ],
        )?;
        self.xml.end("w:sectPr")?;
        self.xml.end("w:body")?;
        self.xml.end("w:document")?;

        Ok(DocumentPart {
            bytes: self.xml.into_bytes(),
            links: self.links,
            media: self.media,
        })
    }
}

fn content_types(has_media: bool, dark: bool) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start(
        "Types",
        &[("xmlns", "http://schemas.openxmlformats.org/package/2006/content-types")],
    )?;
    xml.empty(
        "Default",
        &[
            ("Extension", "rels"),
            ("ContentType", "application/vnd.openxmlformats-package.relationships+xml"),
        ],
    )?;
    xml.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    if has_media {
        xml.empty(
            "Default",
            &[("Extension", "png"), ("ContentType", "image/png")],
        )?;
    }

    let mut overrides = vec![
        (
            "/word/document.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        ),
        (
            "/word/styles.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml",
        ),
        (
            "/word/numbering.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml",
        ),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml",
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml",
        ),
    ];
    if dark {
        overrides.push((
            "/word/settings.xml",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml",
        ));
    }
    for (part, content_type) in overrides {
        xml.empty(
            "Override",
            &[("PartName", part), ("ContentType", content_type)],
        )?;
    }
    xml.end("Types")?;
    Ok(xml.into_bytes())
}

fn package_rels() -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start("Relationships", &[("xmlns", NS_PKG_REL)])?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId1"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument",
            ),
            ("Target", "word/document.xml"),
        ],
    )?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId2"),
            (
                "Type",
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
            ),
            ("Target", "docProps/core.xml"),
        ],
    )?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rId3"),
            (
                "Type",
                "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties",
            ),
            ("Target", "docProps/app.xml"),
        ],
    )?;
    xml.end("Relationships")?;
    Ok(xml.into_bytes())
}

fn document_rels(links: &[String], media_count: usize, dark: bool) -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start("Relationships", &[("xmlns", NS_PKG_REL)])?;
    xml.empty(
        "Relationship",
        &[("Id", "rIdStyles"), ("Type", REL_STYLES), ("Target", "styles.xml")],
    )?;
    xml.empty(
        "Relationship",
        &[
            ("Id", "rIdNumbering"),
            ("Type", REL_NUMBERING),
            ("Target", "numbering.xml"),
        ],
    )?;
    if dark {
        xml.empty(
            "Relationship",
            &[
                ("Id", "rIdSettings"),
                ("Type", REL_SETTINGS),
                ("Target", "settings.xml"),
            ],
        )?;
    }
    for (i, target) in links.iter().enumerate() {
        let id = format!("rIdLink{}", i + 1);
        xml.empty(
            "Relationship",
            &[
                ("Id", id.as_str()),
                ("Type", REL_HYPERLINK),
                ("Target", target.as_str()),
                ("TargetMode", "External"),
            ],
        )?;
    }
    for i in 1..=media_count {
        let id = format!("rIdImage{}", i);
        let target = format!("media/image{}.png", i);
        xml.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", REL_IMAGE), ("Target", target.as_str())],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.into_bytes())
}

fn core_properties(title: &str, as_of: NaiveDate) -> Result<Vec<u8>> {
    let created = format!("{}T00:00:00Z", as_of.format("%Y-%m-%d"));
    let mut xml = Xml::new()?;
    xml.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    let title = if title.is_empty() {
        "Resume".to_string()
    } else {
        format!("{} | Resume", title)
    };
    xml.text("dc:title", &[], &title)?;
    xml.text("dc:creator", &[], "resumeforge")?;
    xml.text("dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
    xml.text("dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &created)?;
    xml.end("cp:coreProperties")?;
    Ok(xml.into_bytes())
}

fn app_properties() -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start(
        "Properties",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
        )],
    )?;
    xml.text("Application", &[], concat!("resumeforge ", env!("CARGO_PKG_VERSION")))?;
    xml.end("Properties")?;
    Ok(xml.into_bytes())
}

fn settings() -> Result<Vec<u8>> {
    let mut xml = Xml::new()?;
    xml.start("w:settings", &[("xmlns:w", NS_MAIN)])?;
    xml.empty("w:displayBackgroundShape", &[])?;
    xml.end("w:settings")?;
    Ok(xml.into_bytes())
}

/// Size in half-points.
fn half_points(size: f32) -> String {
    ((size * 2.0).round() as u32).to_string()
}

/// Style definition written into `word/styles.xml`.
struct StyleDef<'a> {
    id: &'a str,
    name: &'a str,
    size: f32,
    color: Color,
    bold: bool,
    italic: bool,
    space_before: u32,
    space_after: u32,
    border: Option<(Color, &'a str)>,
    numbered: bool,
}

impl StyleDef<'_> {
    fn write(&self, xml: &mut Xml) -> Result<()> {
        xml.start(
            "w:style",
            &[("w:type", "paragraph"), ("w:styleId", self.id)],
        )?;
        xml.val("w:name", self.name)?;
        if self.id != "Normal" {
            xml.val("w:basedOn", "Normal")?;
            xml.val("w:next", "Normal")?;
            xml.empty("w:qFormat", &[])?;
        }

        xml.start("w:pPr", &[])?;
        if self.numbered {
            xml.start("w:numPr", &[])?;
            xml.val("w:ilvl", "0")?;
            xml.val("w:numId", BULLET_NUM_ID)?;
            xml.end("w:numPr")?;
        }
        if let Some((color, size)) = self.border {
            let color = color.hex_digits();
            xml.start("w:pBdr", &[])?;
            xml.empty(
                "w:bottom",
                &[
                    ("w:val", "single"),
                    ("w:sz", size),
                    ("w:space", "1"),
                    ("w:color", color.as_str()),
                ],
            )?;
            xml.end("w:pBdr")?;
        }
        let (before, after) = (self.space_before.to_string(), self.space_after.to_string());
        xml.empty(
            "w:spacing",
            &[("w:before", before.as_str()), ("w:after", after.as_str())],
        )?;
        xml.end("w:pPr")?;

        xml.start("w:rPr", &[])?;
        if self.bold {
            xml.empty("w:b", &[])?;
        }
        if self.italic {
            xml.empty("w:i", &[])?;
        }
        xml.val("w:color", &self.color.hex_digits())?;
        xml.val("w:sz", &half_points(self.size))?;
        xml.val("w:szCs", &half_points(self.size))?;
        xml.end("w:rPr")?;

        xml.end("w:style")
    }
}

fn styles(template: &Template, palette: &Palette) -> Result<Vec<u8>> {
    let typography = &template.typography;
    let font = typography.family.office_name();
    let body = typography.body_size;
    // Twentieths of a point per body em
    let em = (body * 20.0).round() as u32;
    let heading_rule = if typography.heading_rule { "6" } else { "4" };

    let defs = [
        StyleDef {
            id: "Normal",
            name: "Normal",
            size: body,
            color: palette.text,
            bold: false,
            italic: false,
            space_before: 0,
            space_after: em * 3 / 10,
            border: None,
            numbered: false,
        },
        StyleDef {
            id: "Title",
            name: "Title",
            size: typography.heading_size(1),
            color: palette.heading,
            bold: true,
            italic: false,
            space_before: 0,
            space_after: em / 2,
            border: Some((palette.accent, "12")),
            numbered: false,
        },
        StyleDef {
            id: "Heading1",
            name: "heading 1",
            size: typography.heading_size(2),
            color: palette.heading,
            bold: true,
            italic: false,
            space_before: em * 11 / 10,
            space_after: em * 3 / 10,
            border: Some((palette.muted, heading_rule)),
            numbered: false,
        },
        StyleDef {
            id: "Heading2",
            name: "heading 2",
            size: typography.heading_size(3),
            color: palette.heading,
            bold: true,
            italic: false,
            space_before: em * 6 / 10,
            space_after: 0,
            border: None,
            numbered: false,
        },
        StyleDef {
            id: "ListBullet",
            name: "List Bullet",
            size: body,
            color: palette.text,
            bold: false,
            italic: false,
            space_before: 0,
            space_after: em * 15 / 100,
            border: None,
            numbered: true,
        },
        StyleDef {
            id: "Meta",
            name: "Meta",
            size: body * 0.95,
            color: palette.muted,
            bold: false,
            italic: false,
            space_before: 0,
            space_after: em * 15 / 100,
            border: None,
            numbered: false,
        },
        StyleDef {
            id: "Caption",
            name: "caption",
            size: body * 0.85,
            color: palette.muted,
            bold: false,
            italic: true,
            space_before: em / 5,
            space_after: 0,
            border: None,
            numbered: false,
        },
    ];

    let mut xml = Xml::new()?;
    xml.start("w:styles", &[("xmlns:w", NS_MAIN)])?;
    xml.start("w:docDefaults", &[])?;
    xml.start("w:rPrDefault", &[])?;
    xml.start("w:rPr", &[])?;
    xml.empty(
        "w:rFonts",
        &[
            ("w:ascii", font),
            ("w:hAnsi", font),
            ("w:cs", font),
            ("w:eastAsia", font),
        ],
    )?;
    xml.val("w:sz", &half_points(body))?;
    xml.val("w:szCs", &half_points(body))?;
    xml.val("w:lang", "en-US")?;
    xml.end("w:rPr")?;
    xml.end("w:rPrDefault")?;
    xml.start("w:pPrDefault", &[])?;
    xml.start("w:pPr", &[])?;
    let line = ((typography.line_height * 240.0).round() as u32).to_string();
    xml.empty("w:spacing", &[("w:line", line.as_str()), ("w:lineRule", "auto")])?;
    xml.end("w:pPr")?;
    xml.end("w:pPrDefault")?;
    xml.end("w:docDefaults")?;

    for def in &defs {
        def.write(&mut xml)?;
    }
    xml.end("w:styles")?;
    Ok(xml.into_bytes())
}

fn numbering(bullet: char) -> Result<Vec<u8>> {
    let glyph = bullet.to_string();
    let mut xml = Xml::new()?;
    xml.start("w:numbering", &[("xmlns:w", NS_MAIN)])?;
    xml.start("w:abstractNum", &[("w:abstractNumId", "0")])?;
    xml.val("w:multiLevelType", "singleLevel")?;
    xml.start("w:lvl", &[("w:ilvl", "0")])?;
    xml.val("w:start", "1")?;
    xml.val("w:numFmt", "bullet")?;
    xml.val("w:lvlText", &glyph)?;
    xml.val("w:lvlJc", "left")?;
    xml.start("w:pPr", &[])?;
    xml.empty("w:ind", &[("w:left", "360"), ("w:hanging", "360")])?;
    xml.end("w:pPr")?;
    xml.end("w:lvl")?;
    xml.end("w:abstractNum")?;
    xml.start("w:num", &[("w:numId", BULLET_NUM_ID)])?;
    xml.val("w:abstractNumId", "0")?;
    xml.end("w:num")?;
    xml.end("w:numbering")?;
    Ok(xml.into_bytes())
}
