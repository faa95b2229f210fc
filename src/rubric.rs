#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// The six raw sub-scores of the difficulty rubric.
///
/// Four axes score 1–3 (`concept_count`, `step_count`, `interpretation`,
/// `strategy`) and two score 0–2 (`calc_complexity`, `trap`). The axis
/// domains are enforced by [`RubricScores::score`]; a value outside its axis
/// domain is a validation error surfaced to the caller, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricScores {
    /// Number of distinct concepts involved (1, 2, 3+).
    pub concept_count:   u8,
    /// Number of solution steps (1–3).
    pub step_count:      u8,
    /// Demand of reading and interpreting the given conditions (1–3).
    pub interpretation:  u8,
    /// Demand of choosing a solution strategy (1–3).
    pub strategy:        u8,
    /// Computational load (0–2).
    pub calc_complexity: u8,
    /// Presence and severity of deliberate traps (0–2).
    pub trap:            u8,
}

/// Axis domains as `(name, min, max)` rows, in declaration order.
const AXES: [(&str, u8, u8); 6] = [
    ("conceptCount", 1, 3),
    ("stepCount", 1, 3),
    ("interpretation", 1, 3),
    ("strategy", 1, 3),
    ("calcComplexity", 0, 2),
    ("trap", 0, 2),
];

impl RubricScores {
    /// Returns axis values in the fixed declaration order of [`AXES`].
    fn values(&self) -> [u8; 6] {
        [
            self.concept_count,
            self.step_count,
            self.interpretation,
            self.strategy,
            self.calc_complexity,
            self.trap,
        ]
    }

    /// Validates every axis against its declared domain, then computes the
    /// total and grade. Pure and repeatable: rescoring the same inputs never
    /// changes the answer.
    pub fn score(&self) -> Result<RubricOutcome, RubricError> {
        for ((axis, min, max), value) in AXES.iter().zip(self.values()) {
            if !(*min..=*max).contains(&value) {
                return Err(RubricError::AxisOutOfDomain {
                    axis: axis.to_string(),
                    value,
                    min: *min,
                    max: *max,
                });
            }
        }

        let total = self.values().iter().sum();
        Ok(RubricOutcome {
            scores: *self,
            total,
            grade: DifficultyGrade::from_total(total),
        })
    }
}

/// A validated rubric evaluation: the raw sub-scores with their derived total
/// and grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricOutcome {
    /// The raw sub-scores the outcome was derived from.
    pub scores: RubricScores,
    /// Sum of all six axes.
    pub total:  u8,
    /// Grade bucket derived from the total.
    pub grade:  DifficultyGrade,
}

/// The discrete grade label derived from a rubric total.
///
/// Thresholds are fixed: totals of 5 and below grade 하, 6–7 중하, 8–9 중,
/// 10–11 중상, 12 and above 상. Boundary totals belong to the lower bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyGrade {
    /// Totals in `[3, 5]`.
    #[serde(rename = "하")]
    Ha,
    /// Totals in `[6, 7]`.
    #[serde(rename = "중하")]
    JungHa,
    /// Totals in `[8, 9]`.
    #[serde(rename = "중")]
    Jung,
    /// Totals in `[10, 11]`.
    #[serde(rename = "중상")]
    JungSang,
    /// Totals of 12 and above.
    #[serde(rename = "상")]
    Sang,
}

impl DifficultyGrade {
    /// Maps a rubric total to its grade bucket. Total over all integers.
    pub fn from_total(total: u8) -> Self {
        match total {
            0..=5 => DifficultyGrade::Ha,
            6..=7 => DifficultyGrade::JungHa,
            8..=9 => DifficultyGrade::Jung,
            10..=11 => DifficultyGrade::JungSang,
            _ => DifficultyGrade::Sang,
        }
    }

    /// Parses a grade label as the model reports it.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "하" => Some(DifficultyGrade::Ha),
            "중하" => Some(DifficultyGrade::JungHa),
            "중" => Some(DifficultyGrade::Jung),
            "중상" => Some(DifficultyGrade::JungSang),
            "상" => Some(DifficultyGrade::Sang),
            _ => None,
        }
    }

    /// Returns the Korean display label.
    pub fn label(&self) -> &'static str {
        match self {
            DifficultyGrade::Ha => "하",
            DifficultyGrade::JungHa => "중하",
            DifficultyGrade::Jung => "중",
            DifficultyGrade::JungSang => "중상",
            DifficultyGrade::Sang => "상",
        }
    }
}

impl fmt::Display for DifficultyGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An enum to represent possible errors when evaluating the rubric.
#[derive(thiserror::Error, Debug)]
pub enum RubricError {
    /// An axis value fell outside its declared domain.
    #[error("Rubric axis `{axis}` scored {value}, outside its domain {min}..={max}.")]
    AxisOutOfDomain {
        /// Name of the offending axis.
        axis:  String,
        /// The rejected value.
        value: u8,
        /// Inclusive lower bound of the axis domain.
        min:   u8,
        /// Inclusive upper bound of the axis domain.
        max:   u8,
    },
}
