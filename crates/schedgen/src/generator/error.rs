//! Error types for the schedule generator subsystem.

use thiserror::Error;

/// Errors that can occur while generating schedules.
///
/// An unsatisfiable input is *not* an error: a run that finds no valid
/// combination completes with an empty schedule list.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// Input failed structural validation before the search started.
    #[error("Malformed input at {location}: {message}")]
    MalformedInput { location: String, message: String },

    /// The search exceeded its configured limits and was aborted.
    ///
    /// Distinct from zero results: the input had too many possibilities to
    /// enumerate within budget, so the result set would be incomplete.
    #[error(
        "Search aborted after expanding {expanded} work items \
         (queue {queued}, schedules {schedules}): too many possibilities"
    )]
    Aborted {
        expanded: u64,
        queued: usize,
        schedules: usize,
    },
}

impl GeneratorError {
    /// Returns true if this error was caused by the caller's input data.
    pub fn is_input_error(&self) -> bool {
        matches!(self, GeneratorError::MalformedInput { .. })
    }

    /// Returns true if the search was cut short by its resource limits.
    pub fn is_abort(&self) -> bool {
        matches!(self, GeneratorError::Aborted { .. })
    }
}
