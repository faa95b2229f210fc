#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use rand::{Rng, seq::SliceRandom};
use serde::Serialize;
use typed_builder::TypedBuilder;
use uuid::Uuid;

use super::{
    CandidateProblem, DistributionRequest, Exam, ExamProblem, ExamStatus,
    store::{ExamStore, StoreError},
};
use crate::constants::DEFAULT_PROBLEM_POINTS;

/// An enum to represent possible errors when assembling an exam.
#[derive(thiserror::Error, Debug)]
pub enum AssembleError {
    /// The candidate pool was empty before any bucket was considered.
    #[error("Candidate pool is empty; nothing to assemble an exam from.")]
    EmptyPool,
    /// No candidate matched any requested difficulty bucket. An exam is never
    /// created with zero problems.
    #[error("No candidate problems match the requested difficulty distribution.")]
    NoMatchingProblems,
    /// The atomic Exam + links write failed; nothing was persisted.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// A bucket the pool could not fully satisfy.
///
/// Under-supply reduces the selected total instead of backfilling from other
/// buckets; the assembler never substitutes a wrong-difficulty problem to
/// hit a raw total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortfall {
    /// Canonical integer difficulty of the under-supplied bucket.
    pub difficulty: u8,
    /// Count the caller requested.
    pub requested:  usize,
    /// Count actually selected.
    pub selected:   usize,
}

/// The result of a successful assembly: the persisted exam, its ordered
/// links, and any per-bucket shortfalls worth surfacing to the caller.
#[derive(Debug, Clone)]
pub struct AssemblyOutcome {
    /// The persisted exam row.
    pub exam:       Exam,
    /// The persisted link rows, `order_index` 1..N in selection order.
    pub problems:   Vec<ExamProblem>,
    /// Buckets the pool could not fully satisfy.
    pub shortfalls: Vec<Shortfall>,
}

/// Assembles one exam from a pre-filtered candidate pool against a target
/// difficulty distribution.
///
/// The pool is expected to be pre-filtered to active problems matching the
/// caller's subject and chapter constraints; the assembler only looks at
/// difficulties. Selection shuffles the pool uniformly per call, so two calls
/// with an identical pool and request may return different concrete sets;
/// order within a bucket carries no meaning beyond "arbitrary distinct pick".
#[derive(TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct ExamAssembler {
    /// Caller-supplied exam title.
    title:      String,
    /// Identifier of the creating user.
    created_by: String,
    /// Subject the exam draws from.
    subject:    String,
    /// Pre-filtered candidate pool.
    pool:       Vec<CandidateProblem>,
    /// Target difficulty distribution, buckets in supply order.
    request:    DistributionRequest,
}

impl ExamAssembler {
    /// Runs selection and persists the result through `store` as one atomic
    /// unit, drawing randomness from `rng`.
    pub fn assemble<S, R>(self, store: &S, rng: &mut R) -> Result<AssemblyOutcome, AssembleError>
    where
        S: ExamStore,
        R: Rng + ?Sized,
    {
        let (selected, shortfalls) = self.select(rng)?;

        let exam = Exam {
            id:            Uuid::new_v4().to_string(),
            title:         self.title,
            created_by:    self.created_by,
            status:        ExamStatus::Draft,
            problem_count: selected.len() as u32,
            subject:       self.subject,
        };
        let problems: Vec<ExamProblem> = selected
            .iter()
            .enumerate()
            .map(|(idx, candidate)| ExamProblem {
                exam_id:     exam.id.clone(),
                problem_id:  candidate.problem_id.clone(),
                order_index: idx as u32 + 1,
                points:      DEFAULT_PROBLEM_POINTS,
            })
            .collect();

        store.create_exam(&exam, &problems)?;
        tracing::info!(
            exam_id = %exam.id,
            selected = problems.len(),
            shortfalls = shortfalls.len(),
            "Exam assembled and persisted"
        );

        Ok(AssemblyOutcome {
            exam,
            problems,
            shortfalls,
        })
    }

    /// The selection algorithm: uniform Fisher–Yates shuffle of the pool,
    /// then a greedy per-bucket take in the order buckets were supplied.
    ///
    /// A bucket the pool cannot fully satisfy is under-filled and reported as
    /// a [`Shortfall`]; no backfilling from other buckets ever happens. An
    /// empty final selection is an error, see [`AssembleError`].
    fn select<R>(
        &self,
        rng: &mut R,
    ) -> Result<(Vec<CandidateProblem>, Vec<Shortfall>), AssembleError>
    where
        R: Rng + ?Sized,
    {
        if self.pool.is_empty() {
            return Err(AssembleError::EmptyPool);
        }

        let mut shuffled = self.pool.clone();
        shuffled.shuffle(rng);

        let mut selected: Vec<CandidateProblem> = Vec::new();
        let mut shortfalls = Vec::new();
        for (bucket, requested) in self.request.entries() {
            let difficulty = bucket.value();
            let picked = shuffled
                .iter()
                .filter(|candidate| {
                    candidate.difficulty == difficulty
                        && !selected.iter().any(|s| s.problem_id == candidate.problem_id)
                })
                .take(*requested)
                .cloned()
                .collect::<Vec<_>>();

            if picked.len() < *requested {
                tracing::warn!(
                    bucket = bucket.label(),
                    requested,
                    available = picked.len(),
                    "Difficulty bucket under-supplied; selecting what is available"
                );
                shortfalls.push(Shortfall {
                    difficulty,
                    requested: *requested,
                    selected:  picked.len(),
                });
            }
            selected.extend(picked);
        }

        if selected.is_empty() {
            return Err(AssembleError::NoMatchingProblems);
        }

        Ok((selected, shortfalls))
    }
}
