//! Pagination of the intermediate document.
//!
//! Blocks are broken into flow units (wrapped lines, rules, images) and
//! placed top to bottom. Heading chains are kept with the first line of the
//! block that follows them; paragraph and bullet lines may split across
//! pages; images are atomic.

use serde::Serialize;

use crate::model::{Block, Heading, ImageRef, IntermediateDocument, KeyValueRow, TextRun, TextStyle};
use crate::template::{Template, Typography};

use super::wrap::Wrapper;

/// Bullet text indent, in ems of the body size.
pub const BULLET_INDENT_EM: f32 = 1.4;

/// Tolerance for floating-point fit checks, in points.
const EPSILON: f32 = 0.01;

/// One laid-out page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageLayout {
    /// 1-based page number
    pub number: usize,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Items in placement order
    pub items: Vec<PlacedItem>,
}

impl PageLayout {
    /// Check if nothing was placed on the page.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// An item positioned on a page.
///
/// Coordinates are in points from the top-left corner of the page; `y` is the
/// top of the item's line box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedItem {
    /// Index of the source block in the intermediate document
    pub block_index: usize,

    /// What the item is
    pub kind: ItemKind,

    /// Left edge
    pub x: f32,

    /// Top edge
    pub y: f32,

    /// Available width
    pub width: f32,

    /// Line box or image height
    pub height: f32,

    /// Font size for text items
    pub font_size: f32,

    /// Payload
    pub content: PlacedContent,
}

/// Kinds of placed items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    /// A line of a heading
    Heading {
        /// Heading level
        level: u8,
    },
    /// Rule drawn under a heading
    HeadingRule,
    /// A paragraph line
    Paragraph,
    /// A line of a bullet item; only the first line carries the glyph
    Bullet {
        /// Whether this is the item's first line
        first_line: bool,
    },
    /// A line of a key-value row
    KeyValue,
    /// An image
    Image,
    /// Caption under an image
    Caption,
}

impl ItemKind {
    /// Check if the item belongs to a heading.
    pub fn is_heading(self) -> bool {
        matches!(self, ItemKind::Heading { .. } | ItemKind::HeadingRule)
    }
}

/// Payload of a placed item.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum PlacedContent {
    /// Styled text segments
    Text(Vec<TextRun>),
    /// A horizontal rule
    Rule,
    /// An image
    Image(ImageRef),
}

/// A unit waiting to be placed.
struct Unit {
    kind: ItemKind,
    indent: f32,
    width: f32,
    height: f32,
    font_size: f32,
    gap: f32,
    content: PlacedContent,
}

/// All units of one block.
struct Flow {
    block_index: usize,
    units: Vec<Unit>,
    heading: bool,
    atomic: bool,
}

impl Flow {
    fn height(&self) -> f32 {
        self.units
            .iter()
            .enumerate()
            .map(|(i, u)| if i == 0 { u.height } else { u.gap + u.height })
            .sum()
    }

    fn gap(&self) -> f32 {
        self.units.first().map_or(0.0, |u| u.gap)
    }

    /// Height that must fit for the block to start on the current page.
    fn lead_height(&self) -> f32 {
        if self.atomic {
            self.height()
        } else {
            self.units.first().map_or(0.0, |u| u.height)
        }
    }
}

/// Lay out a document on pages using the template's geometry and typography.
///
/// Always returns at least one page.
pub fn paginate(doc: &IntermediateDocument, template: &Template) -> Vec<PageLayout> {
    let builder = FlowBuilder::new(template);
    let flows: Vec<Flow> = doc
        .blocks
        .iter()
        .enumerate()
        .map(|(i, block)| builder.flow(i, block))
        .filter(|f| !f.units.is_empty())
        .collect();

    let (width, height) = template.page.size.dimensions();
    let mut paginator = Paginator::new(width, height, template.page.margin);

    for (i, flow) in flows.iter().enumerate() {
        if flow.heading {
            let mut required = paginator.gap(flow.gap()) + flow.height();
            let mut j = i + 1;
            while let Some(next) = flows.get(j).filter(|f| f.heading) {
                required += next.gap() + next.height();
                j += 1;
            }
            if let Some(next) = flows.get(j) {
                required += next.gap() + next.lead_height();
            }
            paginator.ensure(required);
        } else if flow.atomic {
            paginator.ensure(paginator.gap(flow.gap()) + flow.height());
        }

        for unit in &flow.units {
            paginator.place(flow.block_index, unit);
        }
    }

    let pages = paginator.finish();
    log::debug!("Laid out {} blocks on {} pages", doc.block_count(), pages.len());
    pages
}

struct FlowBuilder<'a> {
    typography: &'a Typography,
    content_width: f32,
}

impl<'a> FlowBuilder<'a> {
    fn new(template: &'a Template) -> Self {
        Self {
            typography: &template.typography,
            content_width: template.page.content_width(),
        }
    }

    fn body(&self) -> f32 {
        self.typography.body_size
    }

    fn flow(&self, block_index: usize, block: &Block) -> Flow {
        let (units, heading, atomic) = match block {
            Block::Heading(h) => (self.heading_units(h), true, true),
            Block::Paragraph(p) => (
                self.text_units(&p.runs, ItemKind::Paragraph, self.body(), 0.3),
                false,
                false,
            ),
            Block::BulletList(list) => (self.bullet_units(&list.items), false, false),
            Block::KeyValueRow(row) => (self.key_value_units(row), false, false),
            Block::Image(image) => (self.image_units(image), false, true),
        };
        Flow {
            block_index,
            units,
            heading,
            atomic,
        }
    }

    fn heading_units(&self, heading: &Heading) -> Vec<Unit> {
        let size = self.typography.heading_size(heading.level);
        let gap_em = match heading.level {
            1 => 0.0,
            2 => 1.1,
            _ => 0.6,
        };
        let runs = [TextRun::bold(heading.text.clone())];
        let mut units = self.text_units(
            &runs,
            ItemKind::Heading {
                level: heading.level,
            },
            size,
            gap_em,
        );

        if self.typography.heading_rule && heading.level <= 2 && !units.is_empty() {
            units.push(Unit {
                kind: ItemKind::HeadingRule,
                indent: 0.0,
                width: self.content_width,
                height: 1.0,
                font_size: size,
                gap: 2.0,
                content: PlacedContent::Rule,
            });
        }
        units
    }

    fn text_units(&self, runs: &[TextRun], kind: ItemKind, size: f32, gap_em: f32) -> Vec<Unit> {
        let advance = self.typography.line_advance(size);
        Wrapper::new(self.typography.family, size, self.content_width)
            .wrap(runs)
            .into_iter()
            .enumerate()
            .map(|(i, line)| Unit {
                kind,
                indent: 0.0,
                width: self.content_width,
                height: advance,
                font_size: size,
                gap: if i == 0 { self.body() * gap_em } else { 0.0 },
                content: PlacedContent::Text(line.segments),
            })
            .collect()
    }

    fn bullet_units(&self, items: &[Vec<TextRun>]) -> Vec<Unit> {
        let size = self.body();
        let indent = size * BULLET_INDENT_EM;
        let width = self.content_width - indent;
        let advance = self.typography.line_advance(size);
        let wrapper = Wrapper::new(self.typography.family, size, width);

        let mut units = Vec::new();
        for (item_index, item) in items.iter().enumerate() {
            for (line_index, line) in wrapper.wrap(item).into_iter().enumerate() {
                let gap = match (item_index, line_index) {
                    (0, 0) => size * 0.3,
                    (_, 0) => size * 0.15,
                    _ => 0.0,
                };
                units.push(Unit {
                    kind: ItemKind::Bullet {
                        first_line: line_index == 0,
                    },
                    indent,
                    width,
                    height: advance,
                    font_size: size,
                    gap,
                    content: PlacedContent::Text(line.segments),
                });
            }
        }
        units
    }

    fn key_value_units(&self, row: &KeyValueRow) -> Vec<Unit> {
        let mut runs = Vec::new();
        for (i, field) in row.fields.iter().enumerate() {
            if i > 0 {
                runs.push(TextRun::new("  |  "));
            }
            if row.show_labels {
                runs.push(TextRun::styled(format!("{}: ", field.label), TextStyle::BOLD));
            }
            runs.push(TextRun::new(field.value.clone()));
        }
        self.text_units(&runs, ItemKind::KeyValue, self.body() * 0.95, 0.15)
    }

    fn image_units(&self, image: &ImageRef) -> Vec<Unit> {
        let side = image.size_pt.min(self.content_width);
        let mut units = vec![Unit {
            kind: ItemKind::Image,
            indent: 0.0,
            width: side,
            height: side,
            font_size: self.body(),
            gap: self.body() * 0.8,
            content: PlacedContent::Image(image.clone()),
        }];

        if let Some(caption) = image.caption.as_deref().filter(|c| !c.trim().is_empty()) {
            let size = self.body() * 0.85;
            let runs = [TextRun::italic(caption)];
            units.extend(
                self.text_units(&runs, ItemKind::Caption, size, 0.2),
            );
        }
        units
    }
}

struct Paginator {
    width: f32,
    height: f32,
    margin: f32,
    limit: f32,
    cursor: f32,
    current: Vec<PlacedItem>,
    pages: Vec<PageLayout>,
}

impl Paginator {
    fn new(width: f32, height: f32, margin: f32) -> Self {
        Self {
            width,
            height,
            margin,
            limit: (height - 2.0 * margin).max(1.0),
            cursor: 0.0,
            current: Vec::new(),
            pages: Vec::new(),
        }
    }

    /// Gap before a unit; nothing at the top of a page.
    fn gap(&self, gap: f32) -> f32 {
        if self.current.is_empty() {
            0.0
        } else {
            gap
        }
    }

    fn fits(&self, height: f32) -> bool {
        self.cursor + height <= self.limit + EPSILON
    }

    /// Start a new page unless `height` fits or the page is still empty.
    fn ensure(&mut self, height: f32) {
        if !self.fits(height) && !self.current.is_empty() {
            self.break_page();
        }
    }

    fn place(&mut self, block_index: usize, unit: &Unit) {
        self.ensure(self.gap(unit.gap) + unit.height);
        self.cursor += self.gap(unit.gap);

        self.current.push(PlacedItem {
            block_index,
            kind: unit.kind,
            x: self.margin + unit.indent,
            y: self.margin + self.cursor,
            width: unit.width,
            height: unit.height,
            font_size: unit.font_size,
            content: unit.content.clone(),
        });
        self.cursor += unit.height;
    }

    fn break_page(&mut self) {
        let items = std::mem::take(&mut self.current);
        self.pages.push(PageLayout {
            number: self.pages.len() + 1,
            width: self.width,
            height: self.height,
            items,
        });
        self.cursor = 0.0;
    }

    fn finish(mut self) -> Vec<PageLayout> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.break_page();
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BulletList, Paragraph, QrMatrix};
    use crate::template::get_template;

    fn paragraph(words: usize) -> Block {
        Block::Paragraph(Paragraph::with_text(vec!["word"; words].join(" ")))
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let pages = paginate(&IntermediateDocument::new(""), get_template("modern").unwrap());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
        assert_eq!(pages[0].number, 1);
    }

    #[test]
    fn test_first_item_at_top_margin() {
        let mut doc = IntermediateDocument::new("Jane");
        doc.push(Block::heading(2, "Experience"));
        doc.push(paragraph(3));
        let template = get_template("modern").unwrap();
        let pages = paginate(&doc, template);
        assert_eq!(pages[0].items[0].y, template.page.margin);
    }

    #[test]
    fn test_heading_rule_follows_heading() {
        let mut doc = IntermediateDocument::new("Jane");
        doc.push(Block::heading(2, "EXPERIENCE"));
        doc.push(paragraph(3));
        let pages = paginate(&doc, get_template("classic").unwrap());
        let kinds: Vec<ItemKind> = pages[0].items.iter().map(|i| i.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ItemKind::Heading { level: 2 },
                ItemKind::HeadingRule,
                ItemKind::Paragraph
            ]
        );
    }

    #[test]
    fn test_bullet_lines_split_across_pages() {
        let item = vec![TextRun::new(vec!["accomplishment"; 40].join(" "))];
        let mut doc = IntermediateDocument::new("Jane");
        doc.push(Block::BulletList(BulletList::new(vec![item; 30])));
        let pages = paginate(&doc, get_template("modern").unwrap());

        assert!(pages.len() > 1);
        let glyphs = pages
            .iter()
            .flat_map(|p| &p.items)
            .filter(|i| i.kind == ItemKind::Bullet { first_line: true })
            .count();
        assert_eq!(glyphs, 30);
    }

    #[test]
    fn test_heading_moves_with_next_line() {
        let template = get_template("modern").unwrap();
        for filler in 0..60 {
            let mut doc = IntermediateDocument::new("Jane");
            for _ in 0..filler {
                doc.push(paragraph(12));
            }
            doc.push(Block::heading(2, "Education"));
            doc.push(Block::heading(3, "BSc, State University"));
            doc.push(paragraph(12));

            let pages = paginate(&doc, template);
            for page in &pages[..pages.len() - 1] {
                let last = page.items.last().unwrap();
                assert!(!last.kind.is_heading(), "filler {}: heading stranded", filler);
            }
        }
    }

    #[test]
    fn test_image_is_atomic() {
        let qr = QrMatrix::new("x", 1, vec![true]).unwrap();
        let template = get_template("modern").unwrap();
        for filler in 40..60 {
            let mut doc = IntermediateDocument::new("Jane");
            for _ in 0..filler {
                doc.push(paragraph(12));
            }
            doc.push(Block::Image(
                ImageRef::qr_code(qr.clone(), "QR").with_caption("Connect on LinkedIn"),
            ));
            let pages = paginate(&doc, template);
            for page in &pages {
                for item in page.items.iter().filter(|i| i.kind == ItemKind::Image) {
                    assert!(item.y + item.height <= page.height - template.page.margin + 0.01);
                }
            }
            let image_page = pages
                .iter()
                .position(|p| p.items.iter().any(|i| i.kind == ItemKind::Image))
                .unwrap();
            let caption_page = pages
                .iter()
                .position(|p| p.items.iter().any(|i| i.kind == ItemKind::Caption))
                .unwrap();
            assert_eq!(image_page, caption_page);
        }
    }
}
