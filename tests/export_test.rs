//! Integration tests for the export pipeline.

use chrono::NaiveDate;
use resumeforge::{
    export_all, export_bytes, export_resume, Capability, Degradation, EducationEntry, Error,
    ExperienceEntry, ExportFormat, ExportOptions, Identity, Period, PeriodPoint, ResumeDocument,
    ResumeOptions, SkillGroup, StaticProbe,
};
use resumeforge::model::OmissionReason;
use tempfile::TempDir;

fn options() -> ExportOptions {
    ExportOptions::new(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
}

fn jane() -> ResumeDocument {
    ResumeDocument::new("Jane Doe")
        .with_experience(ExperienceEntry::new("Engineer", "Acme").with_bullet("Built **X**"))
}

fn full_resume() -> ResumeDocument {
    let mut resume = ResumeDocument::new("Jane Doe")
        .with_experience(
            ExperienceEntry::new("Staff Engineer", "Acme")
                .with_period(Period::since(PeriodPoint::month(2021, 3)))
                .with_bullet("Led the **billing** rewrite")
                .with_bullet("Cut p99 latency by *40%*"),
        )
        .with_education(
            EducationEntry::new("State University", "BSc Computer Science")
                .with_detail("Graduated with honors"),
        )
        .with_skills(SkillGroup::from_comma_list("Languages", "Rust, Go, SQL"));
    resume.identity = Identity::new("Jane Doe")
        .with_headline("Backend Engineer")
        .with_email("jane@example.com")
        .with_link("LinkedIn", "https://linkedin.com/in/janedoe");
    resume
}

#[test]
fn test_minimalist_text_lines() {
    let (bytes, _) = export_bytes(&jane(), "minimalist", ExportFormat::Txt, &options()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    assert_eq!(lines, vec!["Jane Doe", "Experience", "Engineer, Acme", "Built X"]);
}

#[test]
fn test_docx_without_authoring_capability() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.docx");
    let options = options().with_probe(StaticProbe::without(Capability::DocumentAuthoring));

    let err = export_resume(&jane(), "modern", ExportFormat::Docx, &path, &options).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedCapability {
            format: ExportFormat::Docx,
            capability: Capability::DocumentAuthoring,
        }
    ));
    assert!(!path.exists());
}

#[test]
fn test_html_single_title_heading() {
    for template in ["modern", "classic", "minimalist", "dark"] {
        let (bytes, _) =
            export_bytes(&full_resume(), template, ExportFormat::Html, &options()).unwrap();
        let html = String::from_utf8(bytes).unwrap();
        assert_eq!(html.matches("<h1>").count(), 1, "template {template}");
        assert!(html.contains("Jane Doe"));
    }
}

#[cfg(feature = "docx")]
#[test]
fn test_html_is_well_formed() {
    use quick_xml::events::Event;
    use quick_xml::Reader;

    let (bytes, _) = export_bytes(&full_resume(), "modern", ExportFormat::Html, &options()).unwrap();
    let html = String::from_utf8(bytes).unwrap();

    let mut reader = Reader::from_str(&html);
    let mut depth = 0i32;
    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => depth += 1,
            Ok(Event::End(_)) => depth -= 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => panic!("malformed HTML at {}: {e}", reader.buffer_position()),
        }
    }
    assert_eq!(depth, 0);
}

#[test]
fn test_classic_omits_qr_code() {
    let resume = jane()
        .with_options(ResumeOptions::new("classic").with_qr_target("https://example.com/jane"));

    let (bytes, report) = export_bytes(&resume, "classic", ExportFormat::Html, &options()).unwrap();
    let html = String::from_utf8(bytes).unwrap();
    assert!(!html.contains("<img"));
    assert_eq!(
        report.degradations,
        vec![Degradation::ImageOmitted {
            reason: OmissionReason::TemplateUnsupported
        }]
    );
}

#[test]
fn test_dark_request_on_light_only_template() {
    let resume = jane().with_options(ResumeOptions::new("classic").with_dark_mode(true));
    let (_, report) = export_bytes(&resume, "classic", ExportFormat::Txt, &options()).unwrap();
    assert_eq!(report.degradations, vec![Degradation::DarkModeUnsupported]);
}

#[test]
fn test_ongoing_period_is_present() {
    let (bytes, _) = export_bytes(&full_resume(), "modern", ExportFormat::Txt, &options()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("Present"), "{text}");
}

/// Find each expected value in order, starting after the previous match.
fn assert_in_order(text: &str, expected: &[&str]) {
    let mut from = 0;
    for value in expected {
        match text[from..].find(value) {
            Some(pos) => from += pos + value.len(),
            None => panic!("{value:?} missing or out of order in:\n{text}"),
        }
    }
}

#[test]
fn test_text_preserves_field_values() {
    let mut resume = ResumeDocument::new("Zo\u{eb} \u{160}koda-M\u{fc}ller")
        .with_experience(
            ExperienceEntry::new("Staff Engineer", "Acme & Sons")
                .with_period(Period::new(
                    PeriodPoint::month(2019, 6),
                    PeriodPoint::month(2021, 2),
                ))
                .with_bullet("Led the **billing** rewrite for the \u{fb01}nance team")
                .with_bullet("- Cut p99 latency by *40%*")
                .with_bullet("Kept 3 * 4 = 12 literal \\*stars\\*"),
        )
        .with_experience(
            ExperienceEntry::new("Intern", "Initech")
                .with_period(Period::since(PeriodPoint::month(2018, 1))),
        )
        .with_education(
            EducationEntry::new("ETH Z\u{fc}rich", "MSc Computer Science")
                .with_period(Period::new("Summer 2016", "2018"))
                .with_detail("Thesis on **CRDTs**"),
        )
        .with_skills(SkillGroup::from_comma_list("Languages", "Rust, C++, SQL"));
    resume.identity = Identity::new("Zo\u{eb} \u{160}koda-M\u{fc}ller")
        .with_headline("Backend Engineer")
        .with_email("zoe@example.com")
        .with_phone("+41 44 555 01 23")
        .with_location("Z\u{fc}rich")
        .with_link("GitHub", "https://github.com/zoe");

    let (bytes, report) = export_bytes(&resume, "modern", ExportFormat::Txt, &options()).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(report.degradations.is_empty());

    assert_in_order(
        &text,
        &[
            "Zo\u{eb} \u{160}koda-M\u{fc}ller",
            "Backend Engineer",
            "zoe@example.com",
            "+41 44 555 01 23",
            "Z\u{fc}rich",
            "https://github.com/zoe",
            "Experienced Backend Engineer with a proven track record of delivering high-quality results.",
            "Languages",
            "Rust, C++, SQL",
            "Staff Engineer, Acme & Sons",
            "Jun 2019 \u{2013} Feb 2021",
            "Led the billing rewrite for the \u{fb01}nance team",
            "Cut p99 latency by 40%",
            "Kept 3 * 4 = 12 literal *stars*",
            "Intern, Initech",
            "Jan 2018 \u{2013} Present",
            "MSc Computer Science, ETH Z\u{fc}rich",
            "Summer 2016 \u{2013} 2018",
            "Thesis on CRDTs",
            "Email: zoe@example.com",
            "GitHub: https://github.com/zoe",
        ],
    );

    for line in text.lines() {
        assert!(!line.contains("**"), "markup left in {line:?}");
        assert!(!line.starts_with("- "), "typed bullet marker left in {line:?}");
    }
}

#[cfg(feature = "pdf")]
#[test]
fn test_pdf_reports_replaced_glyphs() {
    let resume = ResumeDocument::new("\u{160}imon \u{17d}\u{e1}k \u{141}ukasz")
        .with_experience(ExperienceEntry::new("In\u{17e}en\u{fd}r", "\u{160}koda"));

    let (_, report) = export_bytes(&resume, "modern", ExportFormat::Pdf, &options()).unwrap();
    assert_eq!(report.degradations, vec![Degradation::GlyphsReplaced { count: 1 }]);

    let (_, report) = export_bytes(&resume, "modern", ExportFormat::Txt, &options()).unwrap();
    assert!(report.degradations.is_empty());
}

#[test]
fn test_export_all_writes_each_format() {
    let dir = TempDir::new().unwrap();
    let results = export_all(
        &full_resume(),
        "modern",
        &ExportFormat::ALL,
        dir.path(),
        &options(),
    );

    assert_eq!(results.len(), 4);
    for (format, result) in &results {
        let path = dir.path().join(format!("resume.{}", format.extension()));
        match result {
            Ok(report) => {
                assert_eq!(report.path.as_deref(), Some(path.as_path()));
                let len = std::fs::metadata(&path).unwrap().len();
                assert_eq!(len, report.bytes_written);
            }
            Err(e) => {
                assert!(e.is_capability_error(), "{format}: {e}");
                assert!(!path.exists());
            }
        }
    }
}

#[cfg(feature = "pdf")]
#[test]
fn test_pdf_report_counts_pages() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.pdf");
    let report = export_resume(&full_resume(), "modern", ExportFormat::Pdf, &path, &options())
        .unwrap();

    assert_eq!(report.page_count, Some(1));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
}

#[cfg(feature = "docx")]
#[test]
fn test_docx_is_zip_package() {
    let (bytes, report) =
        export_bytes(&full_resume(), "classic", ExportFormat::Docx, &options()).unwrap();
    assert_eq!(&bytes[..2], b"PK");
    assert!(report.page_count.is_none());

    let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    assert!(names.contains(&"word/document.xml"));
    assert!(names.contains(&"[Content_Types].xml"));
}

#[test]
fn test_unknown_template_lists_nothing_written() {
    let dir = TempDir::new().unwrap();
    let results = export_all(
        &jane(),
        "fancy",
        &[ExportFormat::Txt, ExportFormat::Html],
        dir.path(),
        &options(),
    );
    assert!(results
        .iter()
        .all(|(_, r)| matches!(r, Err(Error::TemplateNotFound(_)))));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
