//! The canonical resume data model.
//!
//! A [`ResumeDocument`] is built by the editing collaborator and handed to
//! the engine as a value. Sequence order is display order everywhere; nothing
//! in the engine sorts or mutates it.

use serde::{Deserialize, Serialize};

use super::Period;

/// Root aggregate of all resume content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    /// Who the resume is about
    pub identity: Identity,

    /// Work history, most relevant first
    pub experience: Vec<ExperienceEntry>,

    /// Education history
    pub education: Vec<EducationEntry>,

    /// Skill groups
    pub skills: Vec<SkillGroup>,

    /// Presentation options chosen by the user
    pub options: ResumeOptions,
}

impl ResumeDocument {
    /// Create a document for the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            identity: Identity::new(name),
            ..Default::default()
        }
    }

    /// Add an experience entry.
    pub fn with_experience(mut self, entry: ExperienceEntry) -> Self {
        self.experience.push(entry);
        self
    }

    /// Add an education entry.
    pub fn with_education(mut self, entry: EducationEntry) -> Self {
        self.education.push(entry);
        self
    }

    /// Add a skill group.
    pub fn with_skills(mut self, group: SkillGroup) -> Self {
        self.skills.push(group);
        self
    }

    /// Replace the presentation options.
    pub fn with_options(mut self, options: ResumeOptions) -> Self {
        self.options = options;
        self
    }

    /// Parse a resume from JSON.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::Error::Other(format!("Invalid resume JSON: {}", e)))
    }
}

/// Name, contact fields, and profile links.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    /// Full name
    pub name: String,

    /// Target role or job title shown under the name
    pub headline: String,

    /// Short professional summary
    pub summary: Option<String>,

    /// Email address
    pub email: String,

    /// Phone number
    pub phone: String,

    /// City, region, or country
    pub location: String,

    /// Profile links (LinkedIn, personal site, ...)
    pub links: Vec<ProfileLink>,
}

impl Identity {
    /// Create an identity with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the headline.
    pub fn with_headline(mut self, headline: impl Into<String>) -> Self {
        self.headline = headline.into();
        self
    }

    /// Set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Add a profile link.
    pub fn with_link(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.links.push(ProfileLink::new(label, url));
        self
    }

    /// The LinkedIn link if present, otherwise the first non-empty link.
    pub fn preferred_link(&self) -> Option<&ProfileLink> {
        self.links
            .iter()
            .find(|l| l.is_linkedin())
            .or_else(|| self.links.iter().find(|l| !l.url.trim().is_empty()))
    }
}

/// A labelled profile URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileLink {
    /// Display label, e.g. "LinkedIn"
    pub label: String,

    /// Target URL
    pub url: String,
}

impl ProfileLink {
    /// Create a new link.
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Check whether the link points at LinkedIn.
    pub fn is_linkedin(&self) -> bool {
        self.url.to_lowercase().contains("linkedin.com")
            || self.label.eq_ignore_ascii_case("linkedin")
    }
}

/// One job or role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    /// Job title
    pub title: String,

    /// Employer
    pub organization: String,

    /// When the role was held
    pub period: Period,

    /// Accomplishment lines; may contain `*italic*` and `**bold**` markup
    pub bullets: Vec<String>,
}

impl ExperienceEntry {
    /// Create an entry with a title and organization.
    pub fn new(title: impl Into<String>, organization: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            organization: organization.into(),
            ..Default::default()
        }
    }

    /// Set the period.
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Add a bullet line.
    pub fn with_bullet(mut self, bullet: impl Into<String>) -> Self {
        self.bullets.push(bullet.into());
        self
    }
}

/// One degree, diploma, or certificate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    /// School or university
    pub institution: String,

    /// Degree or certificate name
    pub credential: String,

    /// Attendance period
    pub period: Period,

    /// Optional detail lines (honors, thesis, coursework)
    pub details: Vec<String>,
}

impl EducationEntry {
    /// Create an entry.
    pub fn new(institution: impl Into<String>, credential: impl Into<String>) -> Self {
        Self {
            institution: institution.into(),
            credential: credential.into(),
            ..Default::default()
        }
    }

    /// Set the period.
    pub fn with_period(mut self, period: Period) -> Self {
        self.period = period;
        self
    }

    /// Add a detail line.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }
}

/// A labelled group of skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillGroup {
    /// Category label, e.g. "Languages"
    pub category: String,

    /// Skill names in display order
    pub skills: Vec<String>,
}

impl SkillGroup {
    /// Create a group from a list of skills.
    pub fn new<I, S>(category: impl Into<String>, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category: category.into(),
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a group from free text such as `"Rust, Go, SQL"`.
    ///
    /// Items are trimmed and empty items dropped; order is kept.
    pub fn from_comma_list(category: impl Into<String>, list: &str) -> Self {
        Self::new(
            category,
            list.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from),
        )
    }

    /// Check if the group has no skills.
    pub fn is_empty(&self) -> bool {
        self.skills.iter().all(|s| s.trim().is_empty())
    }
}

/// Presentation choices stored with the resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeOptions {
    /// Selected template id
    pub template_id: String,

    /// Prefer a dark color scheme where the template and format allow it
    pub dark_mode: bool,

    /// URL to encode as a QR code, if any
    pub qr_code_target: Option<String>,
}

impl ResumeOptions {
    /// Create options for a template.
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            ..Default::default()
        }
    }

    /// Enable or disable dark mode.
    pub fn with_dark_mode(mut self, dark_mode: bool) -> Self {
        self.dark_mode = dark_mode;
        self
    }

    /// Set the QR code target URL.
    pub fn with_qr_target(mut self, target: impl Into<String>) -> Self {
        self.qr_code_target = Some(target.into());
        self
    }

    /// Point the QR code at the identity's preferred profile link.
    ///
    /// LinkedIn wins over other links. Leaves the target unset when the
    /// identity has no links.
    pub fn qr_from_profile(mut self, identity: &Identity) -> Self {
        self.qr_code_target = identity.preferred_link().map(|l| l.url.trim().to_string());
        self
    }
}

impl Default for ResumeOptions {
    fn default() -> Self {
        Self {
            template_id: "modern".to_string(),
            dark_mode: false,
            qr_code_target: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_group_from_comma_list() {
        let group = SkillGroup::from_comma_list("Languages", " Rust, Go ,, SQL ");
        assert_eq!(group.skills, vec!["Rust", "Go", "SQL"]);
        assert!(!group.is_empty());
        assert!(SkillGroup::from_comma_list("x", " , ").is_empty());
    }

    #[test]
    fn test_qr_from_profile_prefers_linkedin() {
        let identity = Identity::new("Jane")
            .with_link("Website", "https://jane.dev")
            .with_link("LinkedIn", "https://www.linkedin.com/in/jane");
        let options = ResumeOptions::default().qr_from_profile(&identity);
        assert_eq!(
            options.qr_code_target.as_deref(),
            Some("https://www.linkedin.com/in/jane")
        );
    }

    #[test]
    fn test_qr_from_profile_falls_back_to_first_link() {
        let identity = Identity::new("Jane").with_link("Website", "https://jane.dev");
        let options = ResumeOptions::default().qr_from_profile(&identity);
        assert_eq!(options.qr_code_target.as_deref(), Some("https://jane.dev"));

        let options = ResumeOptions::default().qr_from_profile(&Identity::new("Jane"));
        assert!(options.qr_code_target.is_none());
    }

    #[test]
    fn test_from_json_with_defaults() {
        let json = r#"{
            "identity": { "name": "Jane Doe", "email": "jane@example.com" },
            "experience": [
                { "title": "Engineer", "organization": "Acme",
                  "period": { "start": "2020-01", "end": "present" },
                  "bullets": ["Built **X**"] }
            ]
        }"#;
        let doc = ResumeDocument::from_json(json).unwrap();
        assert_eq!(doc.identity.name, "Jane Doe");
        assert_eq!(doc.experience.len(), 1);
        assert_eq!(doc.options.template_id, "modern");
        assert!(doc.skills.is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(ResumeDocument::from_json("{ not json").is_err());
    }
}
