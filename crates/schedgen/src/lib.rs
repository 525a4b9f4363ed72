//! Conflict-free timetable generation for university course offerings.
//!
//! The heart of the crate is [`generator`]: a pure, deterministic search
//! over component-subsection choices that returns every valid schedule for
//! a set of courses. [`server`] wraps it in a small HTTP API for the
//! schedule-builder UI.

pub mod config;
pub mod generator;
pub mod server;
pub mod types;
