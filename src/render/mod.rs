//! Rendering of resumes into the intermediate document.
//!
//! [`render`] projects a [`ResumeDocument`] onto a [`Template`]: sections in
//! template order, inline markup resolved into marks, text normalized, and
//! optional content (QR code, dark mode) either included or recorded as a
//! degradation. The result depends only on its arguments.

mod json;
mod markup;
mod normalize;
mod resume;

pub use json::{to_json, JsonFormat};
pub use markup::{parse_inline, strip_markup};
pub use normalize::{normalize_item, normalize_text};
pub use resume::ResumeRenderer;

use chrono::NaiveDate;

use crate::capability::{Capability, CapabilityProbe, SystemProbe};
use crate::model::{IntermediateDocument, PresentMarker, ResumeDocument};
use crate::template::Template;

/// Environment inputs for a render.
///
/// Everything that would otherwise come from the clock or the build is
/// passed in here so that rendering stays deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderContext {
    /// Date used for "present" when the marker asks for it
    pub as_of: NaiveDate,

    /// How ongoing periods are displayed
    pub present_marker: PresentMarker,

    /// Whether QR codes can be encoded
    pub image_encoding: bool,
}

impl RenderContext {
    /// Create a context for the given date, with image encoding as compiled in.
    pub fn new(as_of: NaiveDate) -> Self {
        Self {
            as_of,
            present_marker: PresentMarker::default(),
            image_encoding: SystemProbe.is_available(Capability::ImageEncoding),
        }
    }

    /// Set the present marker.
    pub fn with_present_marker(mut self, marker: PresentMarker) -> Self {
        self.present_marker = marker;
        self
    }

    /// Enable or disable image encoding.
    pub fn with_image_encoding(mut self, enabled: bool) -> Self {
        self.image_encoding = enabled;
        self
    }
}

/// Render a resume through a template.
pub fn render(
    document: &ResumeDocument,
    template: &Template,
    ctx: &RenderContext,
) -> IntermediateDocument {
    ResumeRenderer::new(template, ctx).render(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Block, Degradation, EducationEntry, ExperienceEntry, Identity, OmissionReason, Period,
        ResumeOptions, SkillGroup, TextRun,
    };
    use crate::template::get_template;
    use pretty_assertions::assert_eq;

    fn ctx() -> RenderContext {
        RenderContext::new(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap())
            .with_image_encoding(true)
    }

    fn jane() -> ResumeDocument {
        let mut doc = ResumeDocument::new("Jane Doe")
            .with_experience(
                ExperienceEntry::new("Engineer", "Acme")
                    .with_period(Period::since("2020-01"))
                    .with_bullet("Built **X**"),
            )
            .with_education(EducationEntry::new("State University", "BSc Computer Science"))
            .with_skills(SkillGroup::from_comma_list("Languages", "Rust, Go"));
        doc.identity = Identity::new("Jane Doe")
            .with_headline("Software Engineer")
            .with_email("jane@example.com")
            .with_link("LinkedIn", "https://www.linkedin.com/in/jane");
        doc
    }

    fn headings(doc: &IntermediateDocument) -> Vec<(u8, String)> {
        doc.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(h) => Some((h.level, h.text.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_render_section_order() {
        let doc = render(&jane(), get_template("modern").unwrap(), &ctx());
        assert_eq!(doc.title, "Jane Doe");
        assert_eq!(
            headings(&doc),
            vec![
                (1, "Jane Doe".to_string()),
                (2, "Summary".to_string()),
                (2, "Skills".to_string()),
                (3, "Languages".to_string()),
                (2, "Experience".to_string()),
                (3, "Engineer, Acme".to_string()),
                (2, "Education".to_string()),
                (3, "BSc Computer Science, State University".to_string()),
                (2, "Contact".to_string()),
            ]
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = get_template("modern").unwrap();
        assert_eq!(render(&jane(), template, &ctx()), render(&jane(), template, &ctx()));
    }

    #[test]
    fn test_bullets_resolve_markup() {
        let doc = render(&jane(), get_template("minimalist").unwrap(), &ctx());
        let list = doc
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::BulletList(l) => Some(l),
                _ => None,
            })
            .unwrap();
        assert_eq!(
            list.items[0],
            vec![TextRun::new("Built "), TextRun::bold("X")]
        );
    }

    #[test]
    fn test_period_row() {
        let doc = render(&jane(), get_template("modern").unwrap(), &ctx());
        assert!(doc.plain_text().contains("Jan 2020 \u{2013} Present"));

        let ctx = ctx().with_present_marker(PresentMarker::AsOfDate);
        let doc = render(&jane(), get_template("modern").unwrap(), &ctx);
        assert!(doc.plain_text().contains("Jan 2020 \u{2013} Oct 2026"));
    }

    #[test]
    fn test_empty_sections_skipped() {
        let doc = render(
            &ResumeDocument::new("Solo"),
            get_template("modern").unwrap(),
            &ctx(),
        );
        assert_eq!(headings(&doc), vec![(1, "Solo".to_string())]);
        assert_eq!(doc.block_count(), 1);
    }

    #[test]
    fn test_summary_fallback_from_headline() {
        let doc = render(&jane(), get_template("modern").unwrap(), &ctx());
        assert!(doc.plain_text().contains(
            "Experienced Software Engineer with a proven track record of delivering high-quality results."
        ));
    }

    #[cfg(feature = "qr")]
    #[test]
    fn test_qr_image_appended_last() {
        let mut resume = jane();
        resume.options = ResumeOptions::new("modern").qr_from_profile(&resume.identity);
        let doc = render(&resume, get_template("modern").unwrap(), &ctx());

        match doc.blocks.last() {
            Some(Block::Image(img)) => {
                assert_eq!(img.caption.as_deref(), Some("Connect with Jane Doe on LinkedIn"));
                assert_eq!(img.qr.target, "https://www.linkedin.com/in/jane");
            }
            other => panic!("expected image block, got {:?}", other),
        }
        assert!(doc.degradations.is_empty());
    }

    #[cfg(feature = "qr")]
    #[test]
    fn test_qr_caption_without_name() {
        let mut resume = jane();
        resume.identity.name = String::new();
        resume.options = ResumeOptions::new("modern").qr_from_profile(&resume.identity);
        let doc = render(&resume, get_template("modern").unwrap(), &ctx());

        match doc.blocks.last() {
            Some(Block::Image(img)) => {
                assert_eq!(img.caption.as_deref(), Some("Connect on LinkedIn"))
            }
            other => panic!("expected image block, got {:?}", other),
        }
    }

    #[test]
    fn test_qr_template_unsupported() {
        let mut resume = jane();
        resume.options = ResumeOptions::new("classic").with_qr_target("https://jane.dev");
        let doc = render(&resume, get_template("classic").unwrap(), &ctx());

        assert!(!doc.has_image());
        assert_eq!(
            doc.degradations,
            vec![Degradation::ImageOmitted {
                reason: OmissionReason::TemplateUnsupported
            }]
        );
    }

    #[test]
    fn test_qr_capability_unavailable() {
        let mut resume = jane();
        resume.options = ResumeOptions::new("modern").with_qr_target("https://jane.dev");
        let ctx = ctx().with_image_encoding(false);
        let doc = render(&resume, get_template("modern").unwrap(), &ctx);

        assert!(!doc.has_image());
        assert_eq!(
            doc.degradations,
            vec![Degradation::ImageOmitted {
                reason: OmissionReason::CapabilityUnavailable
            }]
        );
        // Section order is untouched by the omission
        let with_qr = render(&jane(), get_template("modern").unwrap(), &ctx);
        assert_eq!(doc.blocks, with_qr.blocks);
    }

    #[test]
    fn test_dark_mode_hints() {
        let mut resume = jane();
        resume.options = ResumeOptions::new("modern").with_dark_mode(true);
        let doc = render(&resume, get_template("modern").unwrap(), &ctx());
        assert!(doc.hints.dark_mode);

        let doc = render(&resume, get_template("classic").unwrap(), &ctx());
        assert!(!doc.hints.dark_mode);
        assert_eq!(doc.degradations, vec![Degradation::DarkModeUnsupported]);

        let doc = render(&jane(), get_template("dark").unwrap(), &ctx());
        assert!(doc.hints.dark_mode);
        assert!(doc.degradations.is_empty());
    }

    #[test]
    fn test_contact_fields_order() {
        let mut resume = jane();
        resume.identity = resume
            .identity
            .with_phone("555-0100")
            .with_location("Berlin");
        let doc = render(&resume, get_template("modern").unwrap(), &ctx());
        let row = doc
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::KeyValueRow(r) if r.show_labels => Some(r),
                _ => None,
            })
            .unwrap();
        let labels: Vec<&str> = row.fields.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["Email", "Phone", "Location", "LinkedIn"]);
    }
}
