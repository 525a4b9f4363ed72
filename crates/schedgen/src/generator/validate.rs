//! Structural validation of course input, run before the search.
//!
//! Malformed records are rejected here with a pointer to the offending
//! field. Well-typed-but-empty collections (a course with no sections, a
//! section with no subsections) are deliberately *not* errors: the search
//! treats them as slots with no candidates and produces zero schedules.

use super::error::GeneratorError;
use super::types::Course;

/// Validates a course list for structural soundness.
///
/// # Returns
/// * `Ok(())` - input is safe to hand to the generator.
/// * `Err(GeneratorError::MalformedInput)` - the first offending field,
///   with a path-like location (e.g. `courses[1].sections[0].subSections[2]`).
pub fn validate_courses(courses: &[Course]) -> Result<(), GeneratorError> {
    for (ci, course) in courses.iter().enumerate() {
        let course_loc = format!("courses[{ci}]");
        if course.course_code.trim().is_empty() {
            return Err(malformed(&course_loc, "courseCode must not be blank"));
        }

        for (si, section) in course.sections.iter().enumerate() {
            let section_loc = format!("{course_loc}.sections[{si}]");
            if section.section.trim().is_empty() {
                return Err(malformed(&section_loc, "section label must not be blank"));
            }

            for (bi, sub) in section.sub_sections.iter().enumerate() {
                let sub_loc = format!("{section_loc}.subSections[{bi}]");
                if sub.sub_section.trim().is_empty() {
                    return Err(malformed(&sub_loc, "subSection label must not be blank"));
                }
                if sub.sessions.is_empty() {
                    return Err(malformed(&sub_loc, "subsection has no sessions"));
                }

                for (mi, session) in sub.sessions.iter().enumerate() {
                    let session_loc = format!("{sub_loc}.sessions[{mi}]");
                    if session.start_time >= session.end_time {
                        return Err(malformed(
                            &session_loc,
                            "startTime must be strictly before endTime",
                        ));
                    }
                    if session.start_date > session.end_date {
                        return Err(malformed(
                            &session_loc,
                            "startDate must not be after endDate",
                        ));
                    }
                }
            }
        }
    }

    Ok(())
}

fn malformed(location: &str, message: &str) -> GeneratorError {
    GeneratorError::MalformedInput {
        location: location.to_string(),
        message: message.to_string(),
    }
}
