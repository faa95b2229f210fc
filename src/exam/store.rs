#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use super::{Exam, ExamProblem};

/// An enum to represent possible errors from the exam persistence seam.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// `problem_count` disagreed with the number of link rows.
    #[error("Exam declares {problem_count} problems but carries {links} link rows.")]
    CountMismatch {
        /// The denormalized count on the exam row.
        problem_count: u32,
        /// The number of link rows supplied.
        links:         usize,
    },
    /// An exam with zero links was submitted for persistence.
    #[error("Refusing to persist an exam with zero problem links.")]
    EmptyExam,
    /// Two link rows referenced the same problem.
    #[error("Exam `{exam_id}` links problem `{problem_id}` more than once.")]
    DuplicateProblemLink {
        /// The owning exam.
        exam_id:    String,
        /// The doubly linked problem.
        problem_id: String,
    },
    /// The backing store rejected the write.
    #[error("Exam write failed: {0}")]
    WriteFailed(String),
}

/// The atomic persistence seam for assembled exams.
///
/// Implementations MUST write the exam row and all of its link rows as one
/// all-or-nothing unit: a concurrent reader may never observe an exam with
/// `problem_count > 0` and zero links. The real implementation lives in the
/// surrounding service's data layer; the engine only depends on this trait.
pub trait ExamStore {
    /// Persists `exam` and `links` atomically, or nothing at all.
    fn create_exam(&self, exam: &Exam, links: &[ExamProblem]) -> Result<(), StoreError>;
}

/// Checks the count, non-emptiness, and link-uniqueness invariants shared by
/// every implementation.
pub fn check_invariants(exam: &Exam, links: &[ExamProblem]) -> Result<(), StoreError> {
    if links.is_empty() {
        return Err(StoreError::EmptyExam);
    }
    if exam.problem_count as usize != links.len() {
        return Err(StoreError::CountMismatch {
            problem_count: exam.problem_count,
            links:         links.len(),
        });
    }
    let mut seen = std::collections::HashSet::with_capacity(links.len());
    for link in links {
        if !seen.insert(link.problem_id.as_str()) {
            return Err(StoreError::DuplicateProblemLink {
                exam_id:    exam.id.clone(),
                problem_id: link.problem_id.clone(),
            });
        }
    }
    Ok(())
}

/// An in-memory [`ExamStore`] used by tests and local tooling.
///
/// Supports injecting a one-shot write failure to exercise the all-or-nothing
/// guarantee: a failed write leaves no trace of the exam behind.
#[derive(Default)]
pub struct InMemoryExamStore {
    /// Persisted exams keyed by exam id.
    exams:     Mutex<HashMap<String, (Exam, Vec<ExamProblem>)>>,
    /// When set, the next write fails after validation.
    fail_next: AtomicBool,
}

impl InMemoryExamStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `create_exam` call fail, simulating a storage fault
    /// mid-transaction.
    pub fn fail_next_write(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Returns a stored exam with its links, if present.
    pub fn exam(&self, exam_id: &str) -> Option<(Exam, Vec<ExamProblem>)> {
        self.exams.lock().unwrap().get(exam_id).cloned()
    }

    /// Number of persisted exams.
    pub fn count(&self) -> usize {
        self.exams.lock().unwrap().len()
    }
}

impl ExamStore for InMemoryExamStore {
    fn create_exam(&self, exam: &Exam, links: &[ExamProblem]) -> Result<(), StoreError> {
        check_invariants(exam, links)?;

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(StoreError::WriteFailed("injected failure".to_string()));
        }

        // Row and links land under one lock; readers see both or neither.
        self.exams
            .lock()
            .unwrap()
            .insert(exam.id.clone(), (exam.clone(), links.to_vec()));
        Ok(())
    }
}
