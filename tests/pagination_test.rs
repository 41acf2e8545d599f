//! Integration tests for page layout.

use chrono::NaiveDate;
use resumeforge::layout::{paginate, ItemKind};
use resumeforge::{get_template, render_resume, ExperienceEntry, ResumeDocument};

fn long_bullet(i: usize) -> String {
    format!(
        "Item {i}: coordinated the migration of several dozen internal services onto a shared \
         deployment platform, reducing release friction and on-call load across the organization"
    )
}

fn long_resume(bullets: usize) -> ResumeDocument {
    let mut entry = ExperienceEntry::new("Engineer", "Acme");
    for i in 0..bullets {
        entry = entry.with_bullet(long_bullet(i));
    }
    ResumeDocument::new("Jane Doe")
        .with_experience(entry)
        .with_experience(ExperienceEntry::new("Intern", "Initech").with_bullet("Wrote tests"))
}

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

#[test]
fn test_long_resume_spans_pages() {
    let resume = long_resume(30);
    assert!(long_bullet(10).len() >= 150);

    for id in ["modern", "classic", "minimalist", "dark"] {
        let template = get_template(id).unwrap();
        let doc = render_resume(&resume, id, as_of()).unwrap();
        let pages = paginate(&doc, template);
        assert!(pages.len() > 1, "template {id} fit on one page");
    }
}

#[test]
fn test_no_page_ends_with_heading() {
    let resume = long_resume(45);
    for id in ["modern", "classic", "minimalist", "dark"] {
        let template = get_template(id).unwrap();
        let doc = render_resume(&resume, id, as_of()).unwrap();
        let pages = paginate(&doc, template);

        for page in &pages[..pages.len() - 1] {
            let last = page.items.last().expect("non-final page is empty");
            assert!(
                !last.kind.is_heading(),
                "template {id}: page {} ends with a heading",
                page.number
            );
        }
    }
}

#[test]
fn test_items_stay_inside_margins() {
    let template = get_template("modern").unwrap();
    let doc = render_resume(&long_resume(30), "modern", as_of()).unwrap();
    let margin = template.page.margin;

    for page in paginate(&doc, template) {
        for item in &page.items {
            assert!(item.x >= margin - 0.01);
            assert!(item.y >= margin - 0.01);
            assert!(item.y + item.height <= page.height - margin + 0.01);
        }
    }
}

#[test]
fn test_pages_numbered_and_ordered() {
    let template = get_template("classic").unwrap();
    let doc = render_resume(&long_resume(30), "classic", as_of()).unwrap();
    let pages = paginate(&doc, template);

    let numbers: Vec<usize> = pages.iter().map(|p| p.number).collect();
    let expected: Vec<usize> = (1..=pages.len()).collect();
    assert_eq!(numbers, expected);

    let indexes: Vec<usize> = pages
        .iter()
        .flat_map(|p| p.items.iter().map(|i| i.block_index))
        .collect();
    assert!(indexes.windows(2).all(|w| w[0] <= w[1]));

    let first_bullets = pages
        .iter()
        .flat_map(|p| &p.items)
        .filter(|i| i.kind == ItemKind::Bullet { first_line: true })
        .count();
    assert_eq!(first_bullets, 31);
}

#[test]
fn test_empty_resume_has_one_page() {
    let template = get_template("minimalist").unwrap();
    let doc = render_resume(&ResumeDocument::new(""), "minimalist", as_of()).unwrap();
    assert_eq!(paginate(&doc, template).len(), 1);
}
