//! Alternative-grouping preprocessor.
//!
//! Collapses subsections that are schedule-equivalent (same component type,
//! identical meeting-time multiset) into one representative candidate that
//! carries the interchangeable labels, shrinking the search's branching
//! factor without changing conflict semantics.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};

use super::types::{ComponentType, Course, MeetingDay, Section, SubSection};

type SessionKey = (MeetingDay, NaiveTime, NaiveTime, NaiveDate, NaiveDate);

/// Returns a copy of the course with schedule-equivalent subsections
/// collapsed into representatives.
///
/// Two subsections are alternatives of each other iff they live in the same
/// section, have the same component type, and their sessions match as a
/// multiset on `(day, startTime, endTime, startDate, endDate)` - index
/// order is irrelevant. The first subsection of each equivalence class (in
/// input order) is kept as the representative; the labels of the absorbed
/// ones are appended to its `alternatives` list for display purposes only.
///
/// Pure transform; the input course is never mutated.
pub fn group_alternatives(course: &Course) -> Course {
    Course {
        course_code: course.course_code.clone(),
        course_title: course.course_title.clone(),
        term: course.term.clone(),
        sections: course.sections.iter().map(group_section).collect(),
    }
}

fn group_section(section: &Section) -> Section {
    let mut representatives: Vec<SubSection> = Vec::new();
    let mut by_key: HashMap<(ComponentType, Vec<SessionKey>), usize> = HashMap::new();

    for sub in &section.sub_sections {
        let key = (sub.component.clone(), session_multiset_key(sub));
        match by_key.get(&key) {
            Some(&idx) => {
                representatives[idx]
                    .alternatives
                    .push(sub.sub_section.clone());
            }
            None => {
                by_key.insert(key, representatives.len());
                representatives.push(sub.clone());
            }
        }
    }

    Section {
        section: section.section.clone(),
        sub_sections: representatives,
    }
}

/// Sorted session keys; equal vectors mean equal meeting-time multisets.
fn session_multiset_key(sub: &SubSection) -> Vec<SessionKey> {
    let mut keys: Vec<SessionKey> = sub.sessions.iter().map(|s| s.schedule_key()).collect();
    keys.sort();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::types::Session;

    fn session(day: MeetingDay, start_h: u32, end_h: u32) -> Session {
        Session {
            day,
            start_time: NaiveTime::from_hms_opt(start_h, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end_h, 0, 0).unwrap(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 2).unwrap(),
            instructor: String::new(),
        }
    }

    fn sub(label: &str, component: ComponentType, sessions: Vec<Session>) -> SubSection {
        SubSection {
            sub_section: label.to_string(),
            component,
            is_open: true,
            section: "A00".to_string(),
            sessions,
            alternatives: vec![],
        }
    }

    fn course_with(sub_sections: Vec<SubSection>) -> Course {
        Course {
            course_code: "CSI3105".to_string(),
            course_title: String::new(),
            term: "2025 Fall".to_string(),
            sections: vec![Section {
                section: "A00".to_string(),
                sub_sections,
            }],
        }
    }

    #[test]
    fn test_identical_labs_collapse_to_one_representative() {
        let course = course_with(vec![
            sub("Z01", ComponentType::Lab, vec![session(MeetingDay::Monday, 10, 12)]),
            sub("Z02", ComponentType::Lab, vec![session(MeetingDay::Monday, 10, 12)]),
        ]);

        let grouped = group_alternatives(&course);
        let subs = &grouped.sections[0].sub_sections;
        assert_eq!(subs.len(), 1);
        assert_eq!(subs[0].sub_section, "Z01");
        assert_eq!(subs[0].alternatives, vec!["Z02".to_string()]);
    }

    #[test]
    fn test_session_order_does_not_matter() {
        let course = course_with(vec![
            sub(
                "A01",
                ComponentType::Lecture,
                vec![
                    session(MeetingDay::Tuesday, 8, 10),
                    session(MeetingDay::Thursday, 8, 10),
                ],
            ),
            sub(
                "A02",
                ComponentType::Lecture,
                vec![
                    session(MeetingDay::Thursday, 8, 10),
                    session(MeetingDay::Tuesday, 8, 10),
                ],
            ),
        ]);

        let grouped = group_alternatives(&course);
        assert_eq!(grouped.sections[0].sub_sections.len(), 1);
        assert_eq!(
            grouped.sections[0].sub_sections[0].alternatives,
            vec!["A02".to_string()]
        );
    }

    #[test]
    fn test_different_times_are_not_collapsed() {
        let course = course_with(vec![
            sub("Z01", ComponentType::Lab, vec![session(MeetingDay::Monday, 10, 12)]),
            sub("Z02", ComponentType::Lab, vec![session(MeetingDay::Monday, 13, 15)]),
        ]);

        let grouped = group_alternatives(&course);
        assert_eq!(grouped.sections[0].sub_sections.len(), 2);
    }

    #[test]
    fn test_different_component_types_are_not_collapsed() {
        let times = vec![session(MeetingDay::Monday, 10, 12)];
        let course = course_with(vec![
            sub("A00", ComponentType::Lecture, times.clone()),
            sub("T01", ComponentType::Tutorial, times),
        ]);

        let grouped = group_alternatives(&course);
        assert_eq!(grouped.sections[0].sub_sections.len(), 2);
    }

    #[test]
    fn test_different_session_counts_are_not_collapsed() {
        let course = course_with(vec![
            sub(
                "A01",
                ComponentType::Lecture,
                vec![
                    session(MeetingDay::Tuesday, 8, 10),
                    session(MeetingDay::Thursday, 8, 10),
                ],
            ),
            sub(
                "A02",
                ComponentType::Lecture,
                vec![session(MeetingDay::Tuesday, 8, 10)],
            ),
        ]);

        let grouped = group_alternatives(&course);
        assert_eq!(grouped.sections[0].sub_sections.len(), 2);
    }

    #[test]
    fn test_grouping_stays_within_a_section() {
        let mut course = course_with(vec![sub(
            "Z01",
            ComponentType::Lab,
            vec![session(MeetingDay::Monday, 10, 12)],
        )]);
        let mut other = sub("Z02", ComponentType::Lab, vec![session(MeetingDay::Monday, 10, 12)]);
        other.section = "B00".to_string();
        course.sections.push(Section {
            section: "B00".to_string(),
            sub_sections: vec![other],
        });

        let grouped = group_alternatives(&course);
        assert_eq!(grouped.sections[0].sub_sections.len(), 1);
        assert_eq!(grouped.sections[1].sub_sections.len(), 1);
        assert!(grouped.sections[0].sub_sections[0].alternatives.is_empty());
        assert!(grouped.sections[1].sub_sections[0].alternatives.is_empty());
    }
}
