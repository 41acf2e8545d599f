//! Date ranges for experience and education entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format for dated period points ("Jan 2020").
const DATE_FORMAT: &str = "%b %Y";

/// Start or end of a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PeriodPoint {
    /// A calendar date; only month and year are displayed
    Date(NaiveDate),

    /// Ongoing ("present")
    Present,

    /// Free text kept verbatim, e.g. "2019" or "Summer 2018"
    Text(String),
}

impl PeriodPoint {
    /// Parse the string form.
    ///
    /// `"present"` in any case becomes [`PeriodPoint::Present`]; `YYYY-MM-DD`
    /// and `YYYY-MM` become dates; anything else is kept as text. Never fails.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("present") || s.eq_ignore_ascii_case("current") {
            return PeriodPoint::Present;
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return PeriodPoint::Date(date);
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
            return PeriodPoint::Date(date);
        }
        PeriodPoint::Text(s.to_string())
    }

    /// Month/year date point.
    pub fn month(year: i32, month: u32) -> Self {
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(PeriodPoint::Date)
            .unwrap_or_else(|| PeriodPoint::Text(format!("{}-{:02}", year, month)))
    }

    /// Check if the point carries no information.
    pub fn is_empty(&self) -> bool {
        matches!(self, PeriodPoint::Text(t) if t.trim().is_empty())
    }

    /// Human-readable form.
    ///
    /// `present` is the text used for [`PeriodPoint::Present`].
    pub fn display_with(&self, present: &str) -> String {
        match self {
            PeriodPoint::Date(d) => d.format(DATE_FORMAT).to_string(),
            PeriodPoint::Present => present.to_string(),
            PeriodPoint::Text(t) => t.trim().to_string(),
        }
    }
}

impl Default for PeriodPoint {
    fn default() -> Self {
        PeriodPoint::Text(String::new())
    }
}

impl From<String> for PeriodPoint {
    fn from(s: String) -> Self {
        PeriodPoint::parse(&s)
    }
}

impl From<&str> for PeriodPoint {
    fn from(s: &str) -> Self {
        PeriodPoint::parse(s)
    }
}

impl From<PeriodPoint> for String {
    fn from(point: PeriodPoint) -> Self {
        match point {
            PeriodPoint::Date(d) => d.format("%Y-%m-%d").to_string(),
            PeriodPoint::Present => "present".to_string(),
            PeriodPoint::Text(t) => t,
        }
    }
}

/// How an ongoing period end is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresentMarker {
    /// The literal word "Present"
    #[default]
    Literal,

    /// The injected as-of date, formatted like any other date
    AsOfDate,
}

/// A start/end range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Period {
    /// Start point
    pub start: PeriodPoint,

    /// End point
    pub end: PeriodPoint,
}

impl Period {
    /// Create a period.
    pub fn new(start: impl Into<PeriodPoint>, end: impl Into<PeriodPoint>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Period that is still ongoing.
    pub fn since(start: impl Into<PeriodPoint>) -> Self {
        Self::new(start, PeriodPoint::Present)
    }

    /// Check if neither end is set.
    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    /// Render the period for display.
    ///
    /// `as_of` replaces "Present" when the marker is [`PresentMarker::AsOfDate`].
    pub fn display(&self, marker: PresentMarker, as_of: NaiveDate) -> String {
        let present = match marker {
            PresentMarker::Literal => "Present".to_string(),
            PresentMarker::AsOfDate => as_of.format(DATE_FORMAT).to_string(),
        };
        let start = self.start.display_with(&present);
        let end = self.end.display_with(&present);

        match (start.is_empty(), end.is_empty()) {
            (true, true) => String::new(),
            (false, true) => start,
            (true, false) => end,
            (false, false) if start == end => start,
            (false, false) => format!("{} \u{2013} {}", start, end),
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = self.start.display_with("Present");
        let end = self.end.display_with("Present");
        write!(f, "{} - {}", start, end)
    }
}
