//! # munbank
//!
//! The curriculum taxonomy and exam-assembly engine behind a math
//! problem-bank service: models the problem-type taxonomy, drives the AI
//! classifier's deterministic contract, and assembles exams against a target
//! difficulty distribution.
//!
//! The surrounding service's CRUD, auth, rendering, and transport glue are
//! external collaborators; this crate only depends on them through narrow
//! seams ([`exam::ExamStore`], [`config::ModelEnv`]).

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// The classification pipeline: prompt construction, the model-response
/// contract, and validation/repair.
pub mod classify;
/// Environment-sourced configuration for the external model endpoint.
pub mod config;
/// A module defining a bunch of constant values to be used throughout.
pub mod constants;
/// Exam assembly: buckets, distribution requests, selection, persistence.
pub mod exam;
/// The six-axis difficulty rubric and its grade thresholds.
pub mod rubric;
/// Curriculum taxonomy: records, snapshot reads, and the 4-level tree.
pub mod taxonomy;
/// Utility functions for convenience.
pub mod util;
