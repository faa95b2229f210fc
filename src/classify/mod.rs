//! The classification pipeline: deterministic prompt construction for the
//! external model, the structured-response contract, and validation/repair of
//! whatever comes back.

/// The async seam to the OpenAI-compatible classification endpoint.
pub mod client;
/// Deterministic prompt construction for the external model.
pub mod prompt;
/// Validation and deterministic repair of model responses.
pub mod validate;

use serde::{Deserialize, Serialize};

use crate::{
    rubric::{RubricOutcome, RubricScores},
    taxonomy::CognitiveDomain,
};

/// Verbosity mode of the classification prompt.
///
/// `Light` trades rubric detail for prompt size; `Full` demands the complete
/// six-axis scoring breakdown in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// Compact prompt; output schema carries type, difficulty, cognitive
    /// domain, and confidence only.
    Light,
    /// Full rubric included; output schema additionally demands the six raw
    /// sub-scores with their claimed total and grade.
    Full,
}

/// The recorded assignment of a problem to a taxonomy leaf.
///
/// Created by the classification pipeline; mutated only by human review
/// (`is_verified`) or by a full re-classification replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Identifier of this classification row.
    pub id:                 String,
    /// The classified problem.
    pub problem_id:         String,
    /// Selected taxonomy leaf code, or the model's free-form code when no
    /// active leaf matched.
    pub type_code:          String,
    /// Scored difficulty on the 5-point scale.
    pub difficulty:         u8,
    /// Six-axis scoring breakdown; populated in full mode only.
    pub difficulty_scoring: Option<RubricOutcome>,
    /// Primary reasoning-skill category.
    pub cognitive_domain:   CognitiveDomain,
    /// Model-reported confidence in `[0, 1]`.
    pub confidence:         f32,
    /// Human review flag; never set by the pipeline itself.
    pub is_verified:        bool,
}

/// The raw structured response the external model returns.
///
/// Field names mirror the JSON keys the output schema demands. Anything the
/// model sends here is untrusted until it passes
/// [`validate::validate_response`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResponse {
    /// The selected type code.
    pub expanded_type_code: String,
    /// Claimed difficulty on the 5-point scale.
    pub difficulty:         u8,
    /// Claimed cognitive domain.
    pub cognitive_domain:   CognitiveDomain,
    /// Model confidence in `[0, 1]`.
    pub confidence:         f32,
    /// Six-axis breakdown with the model's own arithmetic; demanded in full
    /// mode, absent in light mode.
    #[serde(default)]
    pub difficulty_scoring: Option<RubricBreakdown>,
}

/// The model's claimed six-axis breakdown.
///
/// The raw sub-scores are the only part that survives validation; the claimed
/// total and grade are recomputed by the rubric and discarded on mismatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricBreakdown {
    /// The six raw sub-scores.
    #[serde(flatten)]
    pub scores: RubricScores,
    /// The model's claimed total.
    pub total:  u8,
    /// The model's claimed grade label.
    pub grade:  String,
}
