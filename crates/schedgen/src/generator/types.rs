//! Domain types for course offerings and generated schedules.

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Day of week a session meets on, with an explicit variant for
/// asynchronous/online offerings that have no fixed meeting time.
///
/// Serialized with the registry's two-letter abbreviations (`"Mo"`, `"Tu"`,
/// ...) and `"N/A"` for asynchronous sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MeetingDay {
    #[serde(rename = "Mo")]
    Monday,
    #[serde(rename = "Tu")]
    Tuesday,
    #[serde(rename = "We")]
    Wednesday,
    #[serde(rename = "Th")]
    Thursday,
    #[serde(rename = "Fr")]
    Friday,
    #[serde(rename = "Sa")]
    Saturday,
    #[serde(rename = "Su")]
    Sunday,
    #[serde(rename = "N/A")]
    Asynchronous,
}

impl MeetingDay {
    /// Returns true for sessions with no fixed meeting time.
    pub fn is_asynchronous(&self) -> bool {
        matches!(self, MeetingDay::Asynchronous)
    }

    /// Converts to a calendar weekday, or `None` for asynchronous sessions.
    pub fn to_weekday(self) -> Option<Weekday> {
        match self {
            MeetingDay::Monday => Some(Weekday::Mon),
            MeetingDay::Tuesday => Some(Weekday::Tue),
            MeetingDay::Wednesday => Some(Weekday::Wed),
            MeetingDay::Thursday => Some(Weekday::Thu),
            MeetingDay::Friday => Some(Weekday::Fri),
            MeetingDay::Saturday => Some(Weekday::Sat),
            MeetingDay::Sunday => Some(Weekday::Sun),
            MeetingDay::Asynchronous => None,
        }
    }
}

/// Kind of class meeting a subsection is (lecture, lab, tutorial, ...).
///
/// The registry occasionally carries codes outside the common set, so
/// unknown codes round-trip through `Other` instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComponentType {
    Lecture,
    Lab,
    Tutorial,
    DiscussionGroup,
    Seminar,
    Workshop,
    Other(String),
}

impl ComponentType {
    /// The registry code for this component type.
    pub fn code(&self) -> &str {
        match self {
            ComponentType::Lecture => "LEC",
            ComponentType::Lab => "LAB",
            ComponentType::Tutorial => "TUT",
            ComponentType::DiscussionGroup => "DGD",
            ComponentType::Seminar => "SEM",
            ComponentType::Workshop => "WRK",
            ComponentType::Other(code) => code,
        }
    }
}

impl From<String> for ComponentType {
    fn from(code: String) -> Self {
        match code.to_uppercase().as_str() {
            "LEC" => ComponentType::Lecture,
            "LAB" => ComponentType::Lab,
            "TUT" => ComponentType::Tutorial,
            "DGD" => ComponentType::DiscussionGroup,
            "SEM" => ComponentType::Seminar,
            "WRK" => ComponentType::Workshop,
            _ => ComponentType::Other(code),
        }
    }
}

impl From<ComponentType> for String {
    fn from(component: ComponentType) -> Self {
        component.code().to_string()
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One recurring weekly meeting time belonging to a subsection.
///
/// A subsection meeting Tuesday and Thursday is two sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(rename = "dayOfWeek")]
    pub day: MeetingDay,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// First day of the recurrence's active date range.
    pub start_date: NaiveDate,
    /// Last day of the recurrence's active date range.
    pub end_date: NaiveDate,
    #[serde(default)]
    pub instructor: String,
}

impl Session {
    /// The tuple that determines schedule equivalence between sessions.
    ///
    /// Instructor is deliberately excluded: two subsections meeting at the
    /// same times are interchangeable regardless of who teaches them.
    pub fn schedule_key(&self) -> (MeetingDay, NaiveTime, NaiveTime, NaiveDate, NaiveDate) {
        (
            self.day,
            self.start_time,
            self.end_time,
            self.start_date,
            self.end_date,
        )
    }
}

/// The atomic bookable unit: one specific instance of a component within a
/// section (e.g. lab slot "Z01" of section "A00").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubSection {
    pub sub_section: String,
    #[serde(rename = "type")]
    pub component: ComponentType,
    /// Enrollment availability. Informational only, never a hard constraint.
    #[serde(default = "default_is_open")]
    pub is_open: bool,
    /// Label of the parent section grouping this subsection with its siblings.
    pub section: String,
    pub sessions: Vec<Session>,
    /// Labels of schedule-equivalent subsections this one stands in for.
    /// Empty on raw input; populated by the alternative-grouping pass.
    #[serde(default)]
    pub alternatives: Vec<String>,
}

fn default_is_open() -> bool {
    true
}

/// A named bundle of subsections (e.g. "A00") that must be taken together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub section: String,
    pub sub_sections: Vec<SubSection>,
}

/// A subject offering for a term, composed of sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub course_code: String,
    #[serde(default)]
    pub course_title: String,
    #[serde(default)]
    pub term: String,
    pub sections: Vec<Section>,
}

impl Course {
    /// Total number of sessions across every subsection of every section.
    ///
    /// Used by the caller-side ordering heuristic: courses with fewer
    /// combinatorial options are fixed first, shrinking the search tree.
    pub fn total_session_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.sub_sections)
            .map(|ss| ss.sessions.len())
            .sum()
    }
}

/// One chosen subsection inside a generated schedule, carrying everything
/// the UI needs to render it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSection {
    pub course_code: String,
    pub section: String,
    pub sub_section: String,
    #[serde(rename = "type")]
    pub component: ComponentType,
    pub is_open: bool,
    pub alternatives: Vec<String>,
    pub sessions: Vec<Session>,
}

/// One complete, valid combination of subsection choices across all
/// requested courses. Serializes as a plain list of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    pub sections: Vec<ScheduledSection>,
}

impl Schedule {
    /// Order-independent identity key: the sorted, concatenated
    /// `(courseCode, subSection)` pairs. Two schedules with the same
    /// signature are the same combination regardless of discovery path.
    pub fn signature(&self) -> String {
        let mut pairs: Vec<String> = self
            .sections
            .iter()
            .map(|s| format!("{}/{}", s.course_code, s.sub_section))
            .collect();
        pairs.sort();
        pairs.join(";")
    }
}
