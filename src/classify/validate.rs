#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use serde::Serialize;
use uuid::Uuid;

use super::{Classification, ClassificationResponse, PromptMode};
use crate::{rubric::RubricError, taxonomy::TaxonomySnapshot};

/// An enum to represent contract violations that cannot be repaired into a
/// stored classification at all.
#[derive(thiserror::Error, Debug)]
pub enum ValidateError {
    /// The response was not the JSON object the schema demands.
    #[error("Model response violates the output schema: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

/// A non-fatal repair applied to the model's response.
///
/// Warnings accompany a stored classification; they never cause the result to
/// be dropped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ValidationWarning {
    /// Claimed difficulty fell outside the selected type's band and was
    /// clamped to the nearest bound.
    DifficultyClamped {
        /// The model's claimed difficulty.
        claimed:    u8,
        /// The difficulty actually stored.
        clamped_to: u8,
        /// Inclusive lower bound of the accepted band.
        min:        u8,
        /// Inclusive upper bound of the accepted band.
        max:        u8,
    },
    /// Claimed confidence fell outside `[0, 1]` and was clamped.
    ConfidenceClamped {
        /// The model's claimed confidence.
        claimed:    f32,
        /// The confidence actually stored.
        clamped_to: f32,
    },
    /// The model's claimed total or grade disagreed with the rubric; the
    /// rubric's arithmetic was stored and the claim discarded.
    RubricArithmeticRepaired {
        /// The model's claimed total.
        claimed_total:    u8,
        /// Total recomputed from the raw sub-scores.
        recomputed_total: u8,
        /// The model's claimed grade label.
        claimed_grade:    String,
        /// Grade recomputed from the raw sub-scores.
        recomputed_grade: String,
    },
}

/// A defect with no authoritative repair; the classification is still stored
/// but marked unverifiable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ValidationFlag {
    /// The selected code matches no active taxonomy leaf. Confidence is
    /// forced to zero; the free-form code is stored as claimed.
    UnknownTypeCode {
        /// The code the model selected.
        claimed: String,
    },
    /// Full mode demanded a scoring breakdown and none was returned.
    MissingRubricBreakdown,
    /// A sub-score fell outside its axis domain; the breakdown was discarded.
    InvalidRubricScores {
        /// Name of the offending axis.
        axis:  String,
        /// The rejected value.
        value: u8,
    },
}

/// The validator's verdict: the classification to persist plus everything
/// that was repaired or could not be.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// The classification to persist.
    pub classification: Classification,
    /// Repairs applied on the way.
    pub warnings:       Vec<ValidationWarning>,
    /// Unrepairable defects; non-empty means the row needs human review.
    pub flags:          Vec<ValidationFlag>,
}

impl ValidationReport {
    /// True when the classification carries an unrepairable defect.
    pub fn is_degraded(&self) -> bool {
        !self.flags.is_empty()
    }
}

/// Parses the raw response text against the structured-output contract.
pub fn parse_response(raw: &str) -> Result<ClassificationResponse, ValidateError> {
    Ok(serde_json::from_str(raw)?)
}

/// Validates and repairs a parsed model response against the active taxonomy.
///
/// The result is always a storable classification: unknown codes are flagged
/// and stored unverified with confidence forced to zero, never silently
/// dropped; out-of-band difficulty is clamped to the nearest bound; in full
/// mode the rubric recomputes total and grade from the raw sub-scores and the
/// model's claimed arithmetic is discarded wherever they disagree.
pub fn validate_response(
    response: ClassificationResponse,
    snapshot: &TaxonomySnapshot,
    problem_id: &str,
    mode: PromptMode,
) -> ValidationReport {
    let mut warnings = Vec::new();
    let mut flags = Vec::new();

    let record = snapshot.get(&response.expanded_type_code);
    let (min, max) = match record {
        Some(r) => (r.difficulty_min, r.difficulty_max),
        None => {
            tracing::warn!(
                problem_id,
                claimed = %response.expanded_type_code,
                "Classification selected a code no active type carries"
            );
            flags.push(ValidationFlag::UnknownTypeCode {
                claimed: response.expanded_type_code.clone(),
            });
            (1, 5)
        }
    };

    let difficulty = response.difficulty.clamp(min, max);
    if difficulty != response.difficulty {
        warnings.push(ValidationWarning::DifficultyClamped {
            claimed: response.difficulty,
            clamped_to: difficulty,
            min,
            max,
        });
    }

    let confidence = if record.is_none() {
        0.0
    } else {
        let clamped = response.confidence.clamp(0.0, 1.0);
        if clamped != response.confidence {
            warnings.push(ValidationWarning::ConfidenceClamped {
                claimed:    response.confidence,
                clamped_to: clamped,
            });
        }
        clamped
    };

    let difficulty_scoring = match (mode, response.difficulty_scoring) {
        (PromptMode::Light, scoring) => {
            if scoring.is_some() {
                tracing::debug!(problem_id, "Dropping unsolicited scoring breakdown in light mode");
            }
            None
        }
        (PromptMode::Full, None) => {
            flags.push(ValidationFlag::MissingRubricBreakdown);
            None
        }
        (PromptMode::Full, Some(breakdown)) => match breakdown.scores.score() {
            Err(RubricError::AxisOutOfDomain { axis, value, .. }) => {
                flags.push(ValidationFlag::InvalidRubricScores { axis, value });
                None
            }
            Ok(outcome) => {
                let claimed_grade_matches = crate::rubric::DifficultyGrade::from_label(
                    &breakdown.grade,
                )
                .is_some_and(|g| g == outcome.grade);
                if breakdown.total != outcome.total || !claimed_grade_matches {
                    warnings.push(ValidationWarning::RubricArithmeticRepaired {
                        claimed_total:    breakdown.total,
                        recomputed_total: outcome.total,
                        claimed_grade:    breakdown.grade.clone(),
                        recomputed_grade: outcome.grade.label().to_string(),
                    });
                }
                Some(outcome)
            }
        },
    };

    if !warnings.is_empty() {
        tracing::info!(
            problem_id,
            repairs = warnings.len(),
            "Classification stored with deterministic repairs"
        );
    }

    ValidationReport {
        classification: Classification {
            id: Uuid::new_v4().to_string(),
            problem_id: problem_id.to_string(),
            type_code: response.expanded_type_code,
            difficulty,
            difficulty_scoring,
            cognitive_domain: response.cognitive_domain,
            confidence,
            is_verified: false,
        },
        warnings,
        flags,
    }
}
