#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use anyhow::Result;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};
use tabled::{Table, Tabled, settings::Style};
use typed_builder::TypedBuilder;

use super::PromptMode;
use crate::{
    constants::PROMPT_TRUNCATE,
    taxonomy::{TaxonomySnapshot, TypeRecord},
    util::truncate_with_marker,
};

/// Role framing and classification rules.
const SYSTEM_MESSAGE_INTRO: &str = include_str!("prompts/system_message_intro.md");
/// Output schema demanded in light mode.
const OUTPUT_SCHEMA_LIGHT: &str = include_str!("prompts/output_schema_light.md");
/// Rubric description plus the full-mode output schema.
const RUBRIC_FULL: &str = include_str!("prompts/rubric_full.md");
/// Degraded-mode description of the code grammar, used when the taxonomy
/// yields zero candidate rows.
const CODE_GRAMMAR_FALLBACK: &str = include_str!("prompts/code_grammar_fallback.md");

/// One row of the candidate table embedded in the prompt.
#[derive(Tabled)]
struct CandidateRow {
    /// The selectable type code.
    #[tabled(rename = "typeCode")]
    code:      String,
    /// Display name of the type.
    #[tabled(rename = "typeName")]
    name:      String,
    /// Achievement standard the type belongs to.
    #[tabled(rename = "standardCode")]
    standard:  String,
    /// Cognitive domain identifier.
    #[tabled(rename = "cognitiveDomain")]
    cognitive: String,
    /// Inclusive difficulty band, `min-max`.
    #[tabled(rename = "difficulty")]
    band:      String,
}

impl From<&TypeRecord> for CandidateRow {
    fn from(record: &TypeRecord) -> Self {
        Self {
            code:      record.type_code.as_str().to_string(),
            name:      record.type_name.clone(),
            standard:  record.standard_code.clone(),
            cognitive: record.cognitive.as_str().to_string(),
            band:      format!("{}-{}", record.difficulty_min, record.difficulty_max),
        }
    }
}

/// A fully assembled classification instruction payload.
///
/// The payload text is deterministic for a given snapshot, mode, and filter,
/// which is what makes the builder snapshot-testable against a fixed fixture.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationPrompt {
    /// The complete instruction text sent as the system message.
    pub system:          String,
    /// Mode the prompt was built for.
    pub mode:            PromptMode,
    /// Number of candidate rows embedded; zero means the grammar fallback
    /// was used.
    pub candidate_count: usize,
}

impl ClassificationPrompt {
    /// Pairs the instruction payload with one problem text as the chat
    /// messages the external model receives.
    pub fn messages(&self, problem_text: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.system.clone())
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(problem_text.to_string())
                .build()?
                .into(),
        ])
    }
}

/// Composes the deterministic instruction payload for an external structured
/// classification call.
///
/// The builder performs no I/O: it reads only the taxonomy snapshot it is
/// given. Its output is never empty: when the filter yields zero candidate
/// rows it falls back to a hard-coded description of the code grammar so
/// classification can proceed in degraded free-form mode.
#[derive(TypedBuilder)]
pub struct PromptBuilder<'a> {
    /// The taxonomy snapshot candidates are drawn from.
    snapshot:   &'a TaxonomySnapshot,
    /// Verbosity mode; `Light` by default.
    #[builder(default = PromptMode::Light)]
    mode:       PromptMode,
    /// Optional restriction to one school-level grouping code.
    #[builder(default, setter(strip_option, into))]
    level_code: Option<String>,
}

impl PromptBuilder<'_> {
    /// Assembles the instruction payload.
    pub fn render(self) -> ClassificationPrompt {
        let candidates: Vec<CandidateRow> = self
            .snapshot
            .active()
            .filter(|r| {
                self.level_code
                    .as_ref()
                    .is_none_or(|level| r.level_code == *level)
            })
            .map(CandidateRow::from)
            .collect();
        let candidate_count = candidates.len();

        let candidate_section = if candidates.is_empty() {
            tracing::warn!(
                level_code = self.level_code.as_deref().unwrap_or("<none>"),
                "No candidate types for classification prompt; using code-grammar fallback"
            );
            CODE_GRAMMAR_FALLBACK.to_string()
        } else {
            let table = Table::new(&candidates).with(Style::markdown()).to_string();
            format!(
                "# Candidate types\n\nSelect `expandedTypeCode` from this table only.\n\n{}",
                truncate_with_marker(table, PROMPT_TRUNCATE)
            )
        };

        let schema_section = match self.mode {
            PromptMode::Light => OUTPUT_SCHEMA_LIGHT,
            PromptMode::Full => RUBRIC_FULL,
        };

        let system = format!(
            "{}\n\n{}\n\n{}",
            SYSTEM_MESSAGE_INTRO.trim_end(),
            candidate_section.trim_end(),
            schema_section.trim_end()
        );

        ClassificationPrompt {
            system,
            mode: self.mode,
            candidate_count,
        }
    }
}
