//! Built-in template definitions.

use super::{
    Color, FontFamily, PageSetup, Palette, SectionKind, SectionSpec, Template,
    TemplateCapabilities, Typography,
};

/// The built-in templates in catalog order.
pub(crate) fn templates() -> Vec<Template> {
    vec![modern(), classic(), minimalist(), dark()]
}

fn sections(titles: [(SectionKind, &str); 6]) -> Vec<SectionSpec> {
    titles
        .into_iter()
        .map(|(kind, title)| SectionSpec::new(kind, title))
        .collect()
}

fn modern() -> Template {
    Template {
        id: "modern".into(),
        display_name: "Modern".into(),
        sections: sections([
            (SectionKind::Header, ""),
            (SectionKind::Summary, "Summary"),
            (SectionKind::Skills, "Skills"),
            (SectionKind::Experience, "Experience"),
            (SectionKind::Education, "Education"),
            (SectionKind::Contact, "Contact"),
        ]),
        typography: Typography::default(),
        palette: Palette::LIGHT,
        dark_palette: Some(Palette::DARK),
        page: PageSetup::default(),
        capabilities: TemplateCapabilities {
            supports_dark_mode: true,
            supports_embedded_image: true,
        },
        prefers_dark: false,
    }
}

fn classic() -> Template {
    Template {
        id: "classic".into(),
        display_name: "Classic".into(),
        sections: sections([
            (SectionKind::Header, ""),
            (SectionKind::Summary, "SUMMARY"),
            (SectionKind::Skills, "SKILLS"),
            (SectionKind::Experience, "EXPERIENCE"),
            (SectionKind::Education, "EDUCATION"),
            (SectionKind::Contact, "CONTACT INFORMATION"),
        ]),
        typography: Typography {
            family: FontFamily::Times,
            body_size: 11.0,
            heading_sizes: [20.0, 13.0, 11.5],
            line_height: 1.3,
            heading_rule: true,
            bullet: '\u{2022}',
        },
        palette: Palette {
            text: Color::hex(0x111111),
            heading: Color::hex(0x000000),
            accent: Color::hex(0x1f3a5f),
            muted: Color::hex(0x555555),
            background: Color::hex(0xffffff),
        },
        dark_palette: None,
        page: PageSetup {
            margin: 64.0,
            ..PageSetup::default()
        },
        capabilities: TemplateCapabilities {
            supports_dark_mode: false,
            supports_embedded_image: false,
        },
        prefers_dark: false,
    }
}

fn minimalist() -> Template {
    Template {
        id: "minimalist".into(),
        display_name: "Minimalist".into(),
        sections: sections([
            (SectionKind::Header, ""),
            (SectionKind::Summary, "About Me"),
            (SectionKind::Skills, "Skills"),
            (SectionKind::Experience, "Experience"),
            (SectionKind::Education, "Education"),
            (SectionKind::Contact, "Contact"),
        ]),
        typography: Typography {
            heading_sizes: [18.0, 12.0, 10.5],
            body_size: 10.0,
            line_height: 1.4,
            bullet: '\u{2013}',
            ..Typography::default()
        },
        palette: Palette {
            heading: Color::hex(0x222222),
            accent: Color::hex(0x222222),
            ..Palette::LIGHT
        },
        dark_palette: Some(Palette {
            heading: Color::hex(0xf5f5f5),
            accent: Color::hex(0xf5f5f5),
            ..Palette::DARK
        }),
        page: PageSetup {
            margin: 60.0,
            ..PageSetup::default()
        },
        capabilities: TemplateCapabilities {
            supports_dark_mode: true,
            supports_embedded_image: false,
        },
        prefers_dark: false,
    }
}

fn dark() -> Template {
    Template {
        id: "dark".into(),
        display_name: "Dark".into(),
        sections: sections([
            (SectionKind::Header, ""),
            (SectionKind::Summary, "Professional Summary"),
            (SectionKind::Skills, "Technical Skills"),
            (SectionKind::Experience, "Professional Experience"),
            (SectionKind::Education, "Education"),
            (SectionKind::Contact, "Contact Information"),
        ]),
        typography: Typography::default(),
        palette: Palette::LIGHT,
        dark_palette: Some(Palette::DARK),
        page: PageSetup::default(),
        capabilities: TemplateCapabilities {
            supports_dark_mode: true,
            supports_embedded_image: true,
        },
        prefers_dark: true,
    }
}
