//! Projection of a resume onto a template.

use crate::model::{
    Block, BulletList, Degradation, EducationEntry, ExperienceEntry, Field, Identity, ImageRef,
    IntermediateDocument, KeyValueRow, OmissionReason, Paragraph, Period, ResumeDocument,
    SkillGroup, TextRun,
};
use crate::qr;
use crate::template::{SectionKind, SectionSpec, Template};

use super::markup::parse_inline;
use super::normalize::{normalize_item, normalize_text};
use super::RenderContext;

/// Caption under a LinkedIn QR code when the resume has no name.
const LINKEDIN_CAPTION: &str = "Connect on LinkedIn";

/// Renders one resume through one template.
pub struct ResumeRenderer<'a> {
    template: &'a Template,
    ctx: &'a RenderContext,
    doc: IntermediateDocument,
}

impl<'a> ResumeRenderer<'a> {
    /// Create a renderer.
    pub fn new(template: &'a Template, ctx: &'a RenderContext) -> Self {
        Self {
            template,
            ctx,
            doc: IntermediateDocument::default(),
        }
    }

    /// Render a resume into a fresh intermediate document.
    pub fn render(mut self, resume: &ResumeDocument) -> IntermediateDocument {
        self.doc.title = normalize_text(&resume.identity.name);

        for spec in &self.template.sections {
            self.render_section(resume, spec);
        }

        self.render_qr(resume);
        self.resolve_dark_mode(resume);

        log::debug!(
            "Rendered {} blocks with template '{}'",
            self.doc.block_count(),
            self.template.id
        );
        self.doc
    }

    fn render_section(&mut self, resume: &ResumeDocument, spec: &SectionSpec) {
        match spec.kind {
            SectionKind::Header => self.render_header(&resume.identity),
            SectionKind::Summary => self.render_summary(&resume.identity, &spec.title),
            SectionKind::Skills => self.render_skills(&resume.skills, &spec.title),
            SectionKind::Experience => self.render_experience(&resume.experience, &spec.title),
            SectionKind::Education => self.render_education(&resume.education, &spec.title),
            SectionKind::Contact => self.render_contact(&resume.identity, &spec.title),
        }
    }

    fn render_header(&mut self, identity: &Identity) {
        let name = normalize_text(&identity.name);
        if !name.is_empty() {
            self.doc.push(Block::heading(1, name));
        }

        let headline = normalize_text(&identity.headline);
        if !headline.is_empty() {
            self.doc
                .push(Block::Paragraph(Paragraph::with_text(headline)));
        }

        let row = KeyValueRow::values(contact_fields(identity));
        if !row.is_empty() {
            self.doc.push(Block::KeyValueRow(row));
        }
    }

    fn render_summary(&mut self, identity: &Identity, title: &str) {
        let summary = identity
            .summary
            .as_deref()
            .map(normalize_text)
            .unwrap_or_default();
        let headline = normalize_text(&identity.headline);

        let text = if !summary.is_empty() {
            summary
        } else if !headline.is_empty() {
            format!(
                "Experienced {} with a proven track record of delivering high-quality results.",
                headline
            )
        } else {
            return;
        };

        self.section_heading(title);
        self.doc
            .push(Block::Paragraph(Paragraph::from_runs(parse_inline(&text))));
    }

    fn render_skills(&mut self, groups: &[SkillGroup], title: &str) {
        let groups: Vec<&SkillGroup> = groups.iter().filter(|g| !g.is_empty()).collect();
        if groups.is_empty() {
            return;
        }

        self.section_heading(title);
        for group in groups {
            let category = normalize_text(&group.category);
            if !category.is_empty() {
                self.doc.push(Block::heading(3, category));
            }
            let skills = group
                .skills
                .iter()
                .map(|s| normalize_text(s))
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", ");
            self.doc.push(Block::Paragraph(Paragraph::with_text(skills)));
        }
    }

    fn render_experience(&mut self, entries: &[ExperienceEntry], title: &str) {
        if entries.is_empty() {
            return;
        }

        self.section_heading(title);
        for entry in entries {
            self.entry_heading(&entry.title, &entry.organization);
            self.period_row(&entry.period);
            self.bullet_list(&entry.bullets);
        }
    }

    fn render_education(&mut self, entries: &[EducationEntry], title: &str) {
        if entries.is_empty() {
            return;
        }

        self.section_heading(title);
        for entry in entries {
            self.entry_heading(&entry.credential, &entry.institution);
            self.period_row(&entry.period);
            self.bullet_list(&entry.details);
        }
    }

    fn render_contact(&mut self, identity: &Identity, title: &str) {
        let row = KeyValueRow::labelled(contact_fields(identity));
        if row.is_empty() {
            return;
        }

        self.section_heading(title);
        self.doc.push(Block::KeyValueRow(row));
    }

    fn section_heading(&mut self, title: &str) {
        self.doc.push(Block::heading(2, normalize_text(title)));
    }

    fn entry_heading(&mut self, primary: &str, secondary: &str) {
        let parts: Vec<String> = [primary, secondary]
            .iter()
            .map(|s| normalize_text(s))
            .filter(|s| !s.is_empty())
            .collect();
        if !parts.is_empty() {
            self.doc.push(Block::heading(3, parts.join(", ")));
        }
    }

    fn period_row(&mut self, period: &Period) {
        let text = normalize_text(&period.display(self.ctx.present_marker, self.ctx.as_of));
        if !text.is_empty() {
            self.doc
                .push(Block::KeyValueRow(KeyValueRow::values(vec![Field::new(
                    "Period", text,
                )])));
        }
    }

    fn bullet_list(&mut self, lines: &[String]) {
        let items: Vec<Vec<TextRun>> = lines
            .iter()
            .map(|line| parse_inline(&normalize_item(line)))
            .filter(|runs| !runs.is_empty())
            .collect();
        if !items.is_empty() {
            self.doc.push(Block::BulletList(BulletList::new(items)));
        }
    }

    fn render_qr(&mut self, resume: &ResumeDocument) {
        let target = match resume.options.qr_code_target.as_deref().map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return,
        };

        if !self.template.capabilities.supports_embedded_image {
            self.doc.degrade(Degradation::ImageOmitted {
                reason: OmissionReason::TemplateUnsupported,
            });
            return;
        }
        if !self.ctx.image_encoding {
            self.doc.degrade(Degradation::ImageOmitted {
                reason: OmissionReason::CapabilityUnavailable,
            });
            return;
        }

        match qr::encode(target) {
            Ok(matrix) => {
                let mut image = ImageRef::qr_code(matrix, format!("QR code linking to {}", target));
                if target.to_lowercase().contains("linkedin.com") {
                    image = image.with_caption(linkedin_caption(&self.doc.title));
                }
                self.doc.push(Block::Image(image));
            }
            Err(e) => {
                log::warn!("QR encoding failed: {}", e);
                self.doc.degrade(Degradation::ImageOmitted {
                    reason: OmissionReason::EncodingFailed,
                });
            }
        }
    }

    fn resolve_dark_mode(&mut self, resume: &ResumeDocument) {
        let supported = self.template.capabilities.supports_dark_mode;
        if resume.options.dark_mode && !supported {
            self.doc.degrade(Degradation::DarkModeUnsupported);
        }
        self.doc.hints.dark_mode =
            self.template.prefers_dark || (resume.options.dark_mode && supported);
    }
}

/// Non-empty contact fields in canonical order: email, phone, location, links.
fn contact_fields(identity: &Identity) -> Vec<Field> {
    let mut fields = Vec::new();

    let email = normalize_text(&identity.email);
    if !email.is_empty() {
        fields.push(Field::linked("Email", email.clone(), format!("mailto:{}", email)));
    }
    let phone = normalize_text(&identity.phone);
    if !phone.is_empty() {
        fields.push(Field::new("Phone", phone));
    }
    let location = normalize_text(&identity.location);
    if !location.is_empty() {
        fields.push(Field::new("Location", location));
    }
    for link in &identity.links {
        let url = normalize_text(&link.url);
        if url.is_empty() {
            continue;
        }
        let label = match normalize_text(&link.label) {
            l if l.is_empty() => "Link".to_string(),
            l => l,
        };
        fields.push(Field::linked(label, url.clone(), url));
    }

    fields
}

fn linkedin_caption(name: &str) -> String {
    if name.is_empty() {
        LINKEDIN_CAPTION.to_string()
    } else {
        format!("Connect with {} on LinkedIn", name)
    }
}
