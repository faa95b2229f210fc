//! Exam assembly: difficulty buckets, distribution requests, the randomized
//! selection algorithm, and the atomic persistence seam.

/// The constrained random selection algorithm.
pub mod assemble;
/// The atomic Exam + links persistence seam.
pub mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use assemble::{AssembleError, AssemblyOutcome, ExamAssembler, Shortfall};
pub use store::{ExamStore, InMemoryExamStore, StoreError};

/// Lifecycle status of a persisted exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamStatus {
    /// Freshly assembled, editable.
    Draft,
    /// Visible to exam takers.
    Published,
    /// Retired from use.
    Archived,
}

/// One of the five ordered difficulty labels of a distribution request,
/// mapped to the canonical 5-point scale: 최상↔5, 상↔4, 중↔3, 하↔2, 최하↔1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DifficultyBucket {
    /// 최상, difficulty 5.
    #[serde(rename = "최상")]
    Choesang,
    /// 상, difficulty 4.
    #[serde(rename = "상")]
    Sang,
    /// 중, difficulty 3.
    #[serde(rename = "중")]
    Jung,
    /// 하, difficulty 2.
    #[serde(rename = "하")]
    Ha,
    /// 최하, difficulty 1.
    #[serde(rename = "최하")]
    Choeha,
}

impl DifficultyBucket {
    /// Returns the canonical integer difficulty of this bucket.
    pub fn value(&self) -> u8 {
        match self {
            DifficultyBucket::Choesang => 5,
            DifficultyBucket::Sang => 4,
            DifficultyBucket::Jung => 3,
            DifficultyBucket::Ha => 2,
            DifficultyBucket::Choeha => 1,
        }
    }

    /// Maps a canonical integer difficulty back to its bucket.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            5 => Some(DifficultyBucket::Choesang),
            4 => Some(DifficultyBucket::Sang),
            3 => Some(DifficultyBucket::Jung),
            2 => Some(DifficultyBucket::Ha),
            1 => Some(DifficultyBucket::Choeha),
            _ => None,
        }
    }

    /// Parses a request-supplied bucket label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "최상" => Some(DifficultyBucket::Choesang),
            "상" => Some(DifficultyBucket::Sang),
            "중" => Some(DifficultyBucket::Jung),
            "하" => Some(DifficultyBucket::Ha),
            "최하" => Some(DifficultyBucket::Choeha),
            _ => None,
        }
    }

    /// Returns the Korean display label.
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyBucket::Choesang => "최상",
            DifficultyBucket::Sang => "상",
            DifficultyBucket::Jung => "중",
            DifficultyBucket::Ha => "하",
            DifficultyBucket::Choeha => "최하",
        }
    }
}

impl fmt::Display for DifficultyBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A caller-supplied difficulty distribution: bucket → requested count, in
/// the order the buckets were supplied. Ephemeral; never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DistributionRequest {
    /// Requested `(bucket, count)` pairs in supply order.
    entries: Vec<(DifficultyBucket, usize)>,
}

impl DistributionRequest {
    /// Builds a request from ordered `(bucket, count)` pairs.
    pub fn new(entries: Vec<(DifficultyBucket, usize)>) -> Self {
        Self { entries }
    }

    /// The requested pairs, in supply order.
    pub fn entries(&self) -> &[(DifficultyBucket, usize)] {
        &self.entries
    }

    /// Sum of requested counts across all buckets.
    pub fn total_requested(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// One problem of the pre-filtered candidate pool the assembler draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProblem {
    /// Identifier of the problem.
    pub problem_id: String,
    /// Scored difficulty on the 5-point scale.
    pub difficulty: u8,
}

/// A persisted exam row. `problem_count` is denormalized and always written
/// atomically with the link rows; an exam with a mismatched count or zero
/// links is an invariant violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    /// Identifier of the exam.
    pub id:            String,
    /// Caller-supplied title.
    pub title:         String,
    /// Identifier of the creating user.
    pub created_by:    String,
    /// Lifecycle status.
    pub status:        ExamStatus,
    /// Denormalized count of linked problems.
    pub problem_count: u32,
    /// Subject the exam draws from.
    pub subject:       String,
}

/// One ordered problem link of a persisted exam. `(exam_id, problem_id)` is
/// unique per exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamProblem {
    /// The owning exam.
    pub exam_id:     String,
    /// The linked problem.
    pub problem_id:  String,
    /// 1-based position within the exam.
    pub order_index: u32,
    /// Point value of the problem within this exam.
    pub points:      u32,
}
