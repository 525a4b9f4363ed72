//! Worklist search engine: enumerates every internally-consistent,
//! non-overlapping schedule across the requested courses.
//!
//! The search walks a flattened, globally ordered list of candidate
//! subsections with a FIFO queue of `(next_index, selections)` work items -
//! iterative breadth-first expansion rather than recursion, so conflict
//! points can split into branches without deep call stacks.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::GeneratorError;
use super::overlap::sub_sections_conflict;
use super::types::{ComponentType, Course, Schedule, ScheduledSection, SubSection};

/// One entry of the flattened candidate list consumed by the search.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Index of the owning course in the input course list.
    pub course_index: usize,
    pub course_code: String,
    pub sub: SubSection,
}

/// Ceilings guarding against combinatorial explosion.
///
/// A pathological input (many mutually-exclusive alternatives) can make the
/// product space astronomically large; exceeding either ceiling aborts the
/// run with [`GeneratorError::Aborted`] instead of hanging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchLimits {
    /// Maximum number of work items queued at any point.
    pub max_queue: usize,
    /// Maximum number of distinct schedules collected.
    pub max_schedules: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            max_queue: 100_000,
            max_schedules: 2_000,
        }
    }
}

/// Counters describing a completed run, for logging and the API response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Size of the flattened candidate list.
    pub candidates: usize,
    /// Work items dequeued and processed.
    pub expanded: u64,
    /// Terminal work items reached.
    pub completed: u64,
    /// Terminal items discarded for not covering every course.
    pub discarded_incomplete: u64,
    /// Completed schedules collapsed into an already-known combination.
    pub deduplicated: u64,
}

/// A work item: position in the candidate list plus the candidates chosen
/// so far (as indices, cheap to clone at conflict branches).
#[derive(Debug, Clone)]
struct WorkItem {
    next: usize,
    selected: Vec<u32>,
}

/// Runs the exhaustive search over `candidates` and returns every valid
/// schedule in discovery order, deduplicated by combination signature.
///
/// `courses` must be the same (grouped) course list the candidates were
/// flattened from; it supplies the per-section component-type sets used by
/// the completeness check. The search itself never mutates its input.
///
/// # Returns
/// * `Ok((schedules, stats))` - zero schedules means no valid combination
///   exists, which is an expected outcome, not an error.
/// * `Err(GeneratorError::Aborted)` - a search limit was exceeded.
pub fn run_search(
    courses: &[Course],
    candidates: &[Candidate],
    limits: &SearchLimits,
) -> Result<(Vec<Schedule>, SearchStats), GeneratorError> {
    let mut stats = SearchStats {
        candidates: candidates.len(),
        ..SearchStats::default()
    };

    if courses.is_empty() {
        return Ok((Vec::new(), stats));
    }

    let section_types = section_type_sets(courses);

    let mut queue: VecDeque<WorkItem> = VecDeque::new();
    queue.push_back(WorkItem {
        next: 0,
        selected: Vec::new(),
    });

    let mut schedules: Vec<Schedule> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    while let Some(item) = queue.pop_front() {
        stats.expanded += 1;

        if item.next == candidates.len() {
            stats.completed += 1;
            if !is_complete(courses, candidates, &item.selected, &section_types) {
                stats.discarded_incomplete += 1;
                continue;
            }

            let schedule = build_schedule(candidates, &item.selected);
            if !seen.insert(schedule.signature()) {
                stats.deduplicated += 1;
                continue;
            }
            if schedules.len() >= limits.max_schedules {
                return Err(abort(&stats, &queue, &schedules));
            }
            schedules.push(schedule);
            continue;
        }

        let cand = &candidates[item.next];
        let cand_idx = item.next as u32;

        // Same-course relations of the candidate to the current selections.
        // Section consistency is maintained by construction, so if any
        // same-course selection has a different section label, they all do.
        let mut other_section = false;
        let mut same_type: Option<u32> = None;
        for &sel in &item.selected {
            let chosen = &candidates[sel as usize];
            if chosen.course_index != cand.course_index {
                continue;
            }
            if chosen.sub.section != cand.sub.section {
                other_section = true;
            } else if chosen.sub.component == cand.sub.component {
                same_type = Some(sel);
            }
        }

        if other_section {
            // The course is already committed to another section. Branch A
            // keeps that commitment and skips the course's remaining
            // candidates; branch B switches the whole course to the
            // candidate's section by evicting the old picks.
            enqueue(
                &mut queue,
                WorkItem {
                    next: skip_past_course(candidates, item.next),
                    selected: item.selected.clone(),
                },
                limits,
                &stats,
                &schedules,
            )?;

            let mut switched: Vec<u32> = item
                .selected
                .iter()
                .copied()
                .filter(|&sel| candidates[sel as usize].course_index != cand.course_index)
                .collect();
            if !conflicts_with_any(candidates, &switched, cand) {
                switched.push(cand_idx);
            }
            enqueue(
                &mut queue,
                WorkItem {
                    next: item.next + 1,
                    selected: switched,
                },
                limits,
                &stats,
                &schedules,
            )?;
        } else if let Some(existing) = same_type {
            // Two candidate subsections for the same component slot.
            // Branch A keeps the existing choice; branch B swaps in the
            // candidate when it is time-clean against the rest.
            enqueue(
                &mut queue,
                WorkItem {
                    next: item.next + 1,
                    selected: item.selected.clone(),
                },
                limits,
                &stats,
                &schedules,
            )?;

            let mut swapped: Vec<u32> = item
                .selected
                .iter()
                .copied()
                .filter(|&sel| sel != existing)
                .collect();
            if !conflicts_with_any(candidates, &swapped, cand) {
                swapped.push(cand_idx);
                enqueue(
                    &mut queue,
                    WorkItem {
                        next: item.next + 1,
                        selected: swapped,
                    },
                    limits,
                    &stats,
                    &schedules,
                )?;
            }
        } else if conflicts_with_any(candidates, &item.selected, cand) {
            // Hard time-conflict rejection: no branch, keep prior choices.
            enqueue(
                &mut queue,
                WorkItem {
                    next: item.next + 1,
                    selected: item.selected,
                },
                limits,
                &stats,
                &schedules,
            )?;
        } else {
            let mut selected = item.selected;
            selected.push(cand_idx);
            enqueue(
                &mut queue,
                WorkItem {
                    next: item.next + 1,
                    selected,
                },
                limits,
                &stats,
                &schedules,
            )?;
        }
    }

    debug!(
        expanded = stats.expanded,
        completed = stats.completed,
        discarded = stats.discarded_incomplete,
        deduplicated = stats.deduplicated,
        schedules = schedules.len(),
        "search finished"
    );

    Ok((schedules, stats))
}

/// Pushes a work item, enforcing the queue ceiling.
fn enqueue(
    queue: &mut VecDeque<WorkItem>,
    item: WorkItem,
    limits: &SearchLimits,
    stats: &SearchStats,
    schedules: &[Schedule],
) -> Result<(), GeneratorError> {
    if queue.len() >= limits.max_queue {
        return Err(abort(stats, queue, schedules));
    }
    queue.push_back(item);
    Ok(())
}

fn abort(stats: &SearchStats, queue: &VecDeque<WorkItem>, schedules: &[Schedule]) -> GeneratorError {
    GeneratorError::Aborted {
        expanded: stats.expanded,
        queued: queue.len(),
        schedules: schedules.len(),
    }
}

/// First index at or after `from` that belongs to a different course.
fn skip_past_course(candidates: &[Candidate], from: usize) -> usize {
    let course = candidates[from].course_index;
    let mut idx = from;
    while idx < candidates.len() && candidates[idx].course_index == course {
        idx += 1;
    }
    idx
}

fn conflicts_with_any(candidates: &[Candidate], selected: &[u32], cand: &Candidate) -> bool {
    selected
        .iter()
        .any(|&sel| sub_sections_conflict(&candidates[sel as usize].sub, &cand.sub))
}

/// Component types offered by each section of each course. A terminal
/// selection must cover exactly these for the section it committed to.
fn section_type_sets(courses: &[Course]) -> Vec<HashMap<String, HashSet<ComponentType>>> {
    courses
        .iter()
        .map(|course| {
            course
                .sections
                .iter()
                .map(|section| {
                    let types: HashSet<ComponentType> = section
                        .sub_sections
                        .iter()
                        .map(|sub| sub.component.clone())
                        .collect();
                    (section.section.clone(), types)
                })
                .collect()
        })
        .collect()
}

/// True iff every input course is fully represented: one subsection per
/// component type of the section the course committed to, nothing missing,
/// nothing doubled.
fn is_complete(
    courses: &[Course],
    candidates: &[Candidate],
    selected: &[u32],
    section_types: &[HashMap<String, HashSet<ComponentType>>],
) -> bool {
    let mut per_course: Vec<Vec<&Candidate>> = vec![Vec::new(); courses.len()];
    for &sel in selected {
        let cand = &candidates[sel as usize];
        per_course[cand.course_index].push(cand);
    }

    for (course_index, picks) in per_course.iter().enumerate() {
        let Some(first) = picks.first() else {
            return false;
        };
        let section = &first.sub.section;
        let Some(required) = section_types[course_index].get(section) else {
            return false;
        };

        let have: HashSet<&ComponentType> = picks.iter().map(|p| &p.sub.component).collect();
        if have.len() != picks.len() {
            return false;
        }
        if have.len() != required.len() || !required.iter().all(|t| have.contains(t)) {
            return false;
        }
    }

    true
}

/// Materializes the output records for a completed selection, ordered by
/// candidate position for stable presentation.
fn build_schedule(candidates: &[Candidate], selected: &[u32]) -> Schedule {
    let mut indices: Vec<u32> = selected.to_vec();
    indices.sort_unstable();

    let sections = indices
        .into_iter()
        .map(|sel| {
            let cand = &candidates[sel as usize];
            ScheduledSection {
                course_code: cand.course_code.clone(),
                section: cand.sub.section.clone(),
                sub_section: cand.sub.sub_section.clone(),
                component: cand.sub.component.clone(),
                is_open: cand.sub.is_open,
                alternatives: cand.sub.alternatives.clone(),
                sessions: cand.sub.sessions.clone(),
            }
        })
        .collect();

    Schedule { sections }
}
