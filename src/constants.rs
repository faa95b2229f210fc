#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Hard cap on `limit` for taxonomy list queries.
pub const MAX_PAGE_LIMIT: usize = 500;

/// Prompt truncation length for the embedded candidate table.
pub const PROMPT_TRUNCATE: usize = 15000;

/// Default point value assigned to every problem of a freshly assembled exam.
/// Callers may override per problem through the exam edit surface.
pub const DEFAULT_PROBLEM_POINTS: u32 = 5;
