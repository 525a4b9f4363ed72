//! Schedule generation subsystem.
//!
//! The pipeline is: validate the course tree, collapse schedule-equivalent
//! subsections into representatives, flatten the tree into a globally
//! ordered candidate list, then run the worklist search. The whole
//! subsystem is pure compute - no I/O, no shared state, deterministic for
//! identical input.

pub mod cache;

mod error;
mod grouping;
mod overlap;
mod search;
mod types;
mod validate;

pub use error::GeneratorError;
pub use grouping::group_alternatives;
pub use overlap::{sessions_overlap, sub_sections_conflict};
pub use search::{Candidate, SearchLimits, SearchStats};
pub use types::*;
pub use validate::validate_courses;

use serde::{Deserialize, Serialize};
use tracing::info;

/// The complete result of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub schedules: Vec<Schedule>,
    pub stats: SearchStats,
}

/// Sorts courses by ascending total session count, in place.
///
/// A performance heuristic, not a correctness requirement: fixing the
/// courses with fewer combinatorial options first shrinks the search tree
/// early. The generator does not enforce this ordering; callers apply it.
pub fn sort_courses_for_search(courses: &mut [Course]) {
    courses.sort_by_key(|c| c.total_session_count());
}

/// Runs the alternative-grouping pass over every course and flattens the
/// result into the candidate list consumed by the search.
///
/// Candidates are ordered course by course, section by section, preserving
/// input order throughout - the search's determinism rests on this.
pub fn prepare_courses(courses: &[Course]) -> (Vec<Course>, Vec<Candidate>) {
    let grouped: Vec<Course> = courses.iter().map(group_alternatives).collect();

    let mut candidates = Vec::new();
    for (course_index, course) in grouped.iter().enumerate() {
        for section in &course.sections {
            for sub in &section.sub_sections {
                candidates.push(Candidate {
                    course_index,
                    course_code: course.course_code.clone(),
                    sub: sub.clone(),
                });
            }
        }
    }

    (grouped, candidates)
}

/// Generates every valid schedule for the given courses.
///
/// # Returns
/// * `Ok(Generation)` - schedules in discovery order; an empty list means
///   no conflict-free combination exists.
/// * `Err(GeneratorError::MalformedInput)` - input failed validation.
/// * `Err(GeneratorError::Aborted)` - the search exceeded its limits.
pub fn generate(courses: &[Course], limits: &SearchLimits) -> Result<Generation, GeneratorError> {
    validate_courses(courses)?;

    let (grouped, candidates) = prepare_courses(courses);
    info!(
        courses = grouped.len(),
        candidates = candidates.len(),
        "starting schedule search"
    );

    let (schedules, stats) = search::run_search(&grouped, &candidates, limits)?;
    info!(schedules = schedules.len(), expanded = stats.expanded, "schedule search done");

    Ok(Generation { schedules, stats })
}
