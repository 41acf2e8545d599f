//! HTML export.
//!
//! Produces one self-contained, XHTML-compatible document: styles are
//! generated from the template and images are inlined as data URIs.

use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

use crate::error::Result;
use crate::model::{Block, Field, ImageRef, IntermediateDocument, KeyValueRow, TextRun};
use crate::template::{Palette, Template, Typography};

use super::{ExportFormat, ExportOptions, Exporter};

/// HTML exporter. Always available.
#[derive(Debug, Clone, Default)]
pub struct HtmlExporter;

impl HtmlExporter {
    /// Create a new HTML exporter.
    pub fn new() -> Self {
        Self
    }

    /// Render a document to an HTML string.
    ///
    /// Fails with [`crate::Error::Encode`] when an image cannot be rasterized.
    pub fn to_html(&self, doc: &IntermediateDocument, template: &Template) -> Result<String> {
        let dark = doc.hints.dark_mode;
        let palette = template.palette_for(dark);

        let title = if doc.title.is_empty() {
            "Resume".to_string()
        } else {
            format!("{} | Resume", doc.title)
        };

        let mut out = String::with_capacity(4096);
        out.push_str("<!DOCTYPE html>\n");
        out.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\" lang=\"en\">\n");
        out.push_str("<head>\n");
        out.push_str("<meta charset=\"UTF-8\" />\n");
        out.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n",
        );
        let _ = writeln!(out, "<title>{}</title>", encode_text(&title));
        let _ = writeln!(
            out,
            "<style>\n{}</style>",
            stylesheet(&template.typography, palette)
        );
        out.push_str("</head>\n");
        let _ = writeln!(
            out,
            "<body class=\"{} template-{}\">",
            if dark { "dark" } else { "light" },
            encode_double_quoted_attribute(&template.id.to_lowercase())
        );
        out.push_str("<main class=\"resume\">\n");

        for block in &doc.blocks {
            self.render_block(&mut out, block, palette)?;
        }

        out.push_str("</main>\n</body>\n</html>\n");
        Ok(out)
    }

    fn render_block(&self, out: &mut String, block: &Block, palette: &Palette) -> Result<()> {
        match block {
            Block::Heading(h) => {
                let _ = writeln!(out, "<h{0}>{1}</h{0}>", h.level, encode_text(&h.text));
            }
            Block::Paragraph(p) => {
                out.push_str("<p>");
                render_runs(out, &p.runs);
                out.push_str("</p>\n");
            }
            Block::BulletList(list) => {
                out.push_str("<ul>\n");
                for item in &list.items {
                    out.push_str("<li>");
                    render_runs(out, item);
                    out.push_str("</li>\n");
                }
                out.push_str("</ul>\n");
            }
            Block::KeyValueRow(row) => render_row(out, row),
            Block::Image(image) => render_image(out, image, palette)?,
        }
        Ok(())
    }
}

impl Exporter for HtmlExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Html
    }

    fn export(
        &self,
        doc: &IntermediateDocument,
        template: &Template,
        _options: &ExportOptions,
    ) -> Result<Vec<u8>> {
        self.to_html(doc, template).map(String::into_bytes)
    }
}

fn render_runs(out: &mut String, runs: &[TextRun]) {
    for run in runs {
        let text = encode_text(&run.text);
        match (run.style.bold, run.style.italic) {
            (true, true) => {
                let _ = write!(out, "<strong><em>{}</em></strong>", text);
            }
            (true, false) => {
                let _ = write!(out, "<strong>{}</strong>", text);
            }
            (false, true) => {
                let _ = write!(out, "<em>{}</em>", text);
            }
            (false, false) => out.push_str(&text),
        }
    }
}

fn render_row(out: &mut String, row: &KeyValueRow) {
    out.push_str("<p class=\"meta\">");
    for (i, field) in row.fields.iter().enumerate() {
        if i > 0 {
            out.push_str("<span class=\"sep\"> | </span>");
        }
        if row.show_labels {
            let _ = write!(
                out,
                "<span class=\"label\">{}:</span> ",
                encode_text(&field.label)
            );
        }
        render_field_value(out, field);
    }
    out.push_str("</p>\n");
}

fn render_field_value(out: &mut String, field: &Field) {
    match &field.link {
        Some(href) => {
            let _ = write!(
                out,
                "<a href=\"{}\">{}</a>",
                encode_double_quoted_attribute(href),
                encode_text(&field.value)
            );
        }
        None => out.push_str(&encode_text(&field.value)),
    }
}

#[cfg(feature = "qr")]
fn render_image(out: &mut String, image: &ImageRef, palette: &Palette) -> Result<()> {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

    let png = crate::qr::to_png(&image.qr, palette.text, palette.background)?;

    let side = image.size_pt.round() as u32;
    out.push_str("<figure class=\"qr\">\n");
    let _ = writeln!(
        out,
        "<img src=\"data:image/png;base64,{}\" alt=\"{}\" width=\"{}\" height=\"{}\" />",
        BASE64.encode(&png),
        encode_double_quoted_attribute(&image.alt_text),
        side,
        side
    );
    if let Some(caption) = &image.caption {
        let _ = writeln!(out, "<figcaption>{}</figcaption>", encode_text(caption));
    }
    out.push_str("</figure>\n");
    Ok(())
}

#[cfg(not(feature = "qr"))]
fn render_image(_out: &mut String, image: &ImageRef, _palette: &Palette) -> Result<()> {
    log::warn!(
        "Skipping image '{}' in HTML output: image encoding is not compiled in",
        image.alt_text
    );
    Ok(())
}

/// CSS generated from template typography and the active palette.
fn stylesheet(typography: &Typography, palette: &Palette) -> String {
    let mut css = String::new();
    let _ = writeln!(
        css,
        "body {{ font-family: {}; font-size: {}pt; line-height: {}; margin: 0; \
         padding: 40px; background-color: {}; color: {}; }}",
        typography.family.css_stack(),
        typography.body_size,
        typography.line_height,
        palette.background,
        palette.text
    );
    css.push_str(".resume { max-width: 800px; margin: 0 auto; }\n");
    let _ = writeln!(css, "h1, h2, h3 {{ color: {}; }}", palette.heading);
    let _ = writeln!(
        css,
        "h1 {{ font-size: {}pt; margin: 0 0 4px; padding-bottom: 10px; \
         border-bottom: 2px solid {}; }}",
        typography.heading_sizes[0], palette.accent
    );
    let _ = writeln!(
        css,
        "h2 {{ font-size: {}pt; margin: 24px 0 8px; padding-bottom: 5px; \
         border-bottom: 1px solid {}; }}",
        typography.heading_sizes[1], palette.muted
    );
    let _ = writeln!(
        css,
        "h3 {{ font-size: {}pt; margin: 14px 0 2px; }}",
        typography.heading_sizes[2]
    );
    css.push_str("p { margin: 4px 0; }\n");
    let _ = writeln!(css, "p.meta {{ color: {}; }}", palette.muted);
    css.push_str("p.meta .label { font-weight: bold; }\n");
    let _ = writeln!(
        css,
        "a {{ color: {}; text-decoration: none; }}",
        palette.accent
    );
    css.push_str("a:hover { text-decoration: underline; }\n");
    css.push_str("ul { list-style-type: square; margin: 4px 0; padding-left: 1.4em; }\n");
    css.push_str("figure.qr { margin: 24px 0 0; }\n");
    let _ = writeln!(
        css,
        "figure.qr figcaption {{ color: {}; font-size: 0.85em; font-style: italic; }}",
        palette.muted
    );
    css.push_str("@media print { body { padding: 0; } }\n");
    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BulletList, Paragraph, TextStyle};
    use crate::template::get_template;

    fn sample() -> IntermediateDocument {
        let mut doc = IntermediateDocument::new("Jane <Doe>");
        doc.push(Block::heading(1, "Jane <Doe>"));
        doc.push(Block::KeyValueRow(KeyValueRow::values(vec![
            Field::linked("Email", "jane@example.com", "mailto:jane@example.com"),
            Field::new("Location", "R&D Park"),
        ])));
        doc.push(Block::heading(2, "Experience"));
        doc.push(Block::BulletList(BulletList::new(vec![vec![
            TextRun::new("Built "),
            TextRun::bold("X"),
            TextRun::styled(" fast", TextStyle::BOLD.with_italic()),
        ]])));
        doc.push(Block::Paragraph(Paragraph::from_runs(vec![TextRun::italic("Go")])));
        doc
    }

    #[test]
    fn test_single_h1_and_escaping() {
        let html = HtmlExporter::new()
            .to_html(&sample(), get_template("modern").unwrap())
            .unwrap();
        assert_eq!(html.matches("<h1>").count(), 1);
        assert!(html.contains("<h1>Jane &lt;Doe&gt;</h1>"));
        assert!(html.contains("R&amp;D Park"));
        assert!(html.contains("<title>Jane &lt;Doe&gt; | Resume</title>"));
    }

    #[test]
    fn test_marks_and_links() {
        let html = HtmlExporter::new()
            .to_html(&sample(), get_template("modern").unwrap())
            .unwrap();
        assert!(html.contains("<li>Built <strong>X</strong><strong><em> fast</em></strong></li>"));
        assert!(html.contains("<p><em>Go</em></p>"));
        assert!(html.contains("<a href=\"mailto:jane@example.com\">jane@example.com</a>"));
        assert!(html.contains("<span class=\"sep\"> | </span>"));
    }

    #[test]
    fn test_dark_palette_applied() {
        let mut doc = sample();
        let template = get_template("modern").unwrap();

        let light = HtmlExporter::new().to_html(&doc, template).unwrap();
        assert!(light.contains("background-color: #ffffff"));
        assert!(light.contains("<body class=\"light template-modern\">"));

        doc.hints.dark_mode = true;
        let dark = HtmlExporter::new().to_html(&doc, template).unwrap();
        assert!(dark.contains("background-color: #121212"));
        assert!(dark.contains("color: #bb86fc"));
    }

    #[cfg(feature = "qr")]
    #[test]
    fn test_image_inlined() {
        let mut doc = sample();
        let qr = crate::qr::encode("https://www.linkedin.com/in/jane").unwrap();
        doc.push(Block::Image(
            ImageRef::qr_code(qr, "QR code").with_caption("Connect on LinkedIn"),
        ));
        let html = HtmlExporter::new()
            .to_html(&doc, get_template("modern").unwrap())
            .unwrap();
        assert!(html.contains("<img src=\"data:image/png;base64,iVBOR"));
        assert!(html.contains("<figcaption>Connect on LinkedIn</figcaption>"));
    }

    #[cfg(feature = "qr")]
    #[test]
    fn test_unrasterizable_image_fails() {
        let mut doc = sample();
        let qr = crate::model::QrMatrix {
            target: "https://example.com/jane".into(),
            width: 21,
            modules: Vec::new(),
        };
        doc.push(Block::Image(ImageRef::qr_code(qr, "QR code")));

        let err = HtmlExporter::new()
            .to_html(&doc, get_template("modern").unwrap())
            .unwrap_err();
        assert!(matches!(err, crate::Error::Encode(_)));
    }
}
