#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{collections::HashSet, fmt, str::FromStr};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::code::{TypeCode, TypeCodeError};
use crate::{classify::Classification, constants::MAX_PAGE_LIMIT};

/// The reasoning-skill category a problem type primarily exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CognitiveDomain {
    /// Mechanical computation and procedure execution.
    Calculation,
    /// Recall and comprehension of concepts and definitions.
    Understanding,
    /// Multi-step reasoning and deduction.
    Inference,
    /// Modelling and solving unfamiliar problems.
    ProblemSolving,
}

impl CognitiveDomain {
    /// Returns the canonical storage identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            CognitiveDomain::Calculation => "CALCULATION",
            CognitiveDomain::Understanding => "UNDERSTANDING",
            CognitiveDomain::Inference => "INFERENCE",
            CognitiveDomain::ProblemSolving => "PROBLEM_SOLVING",
        }
    }

    /// Returns the human label shown in tables and reports.
    pub fn label(&self) -> &'static str {
        match self {
            CognitiveDomain::Calculation => "계산",
            CognitiveDomain::Understanding => "이해",
            CognitiveDomain::Inference => "추론",
            CognitiveDomain::ProblemSolving => "문제해결",
        }
    }
}

impl fmt::Display for CognitiveDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CognitiveDomain {
    type Err = TaxonomyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CALCULATION" => Ok(CognitiveDomain::Calculation),
            "UNDERSTANDING" => Ok(CognitiveDomain::Understanding),
            "INFERENCE" => Ok(CognitiveDomain::Inference),
            "PROBLEM_SOLVING" => Ok(CognitiveDomain::ProblemSolving),
            other => Err(TaxonomyError::UnknownCognitiveDomain(other.to_string())),
        }
    }
}

/// A taxonomy leaf: one fine-grained problem pattern of the curriculum.
///
/// Created by curriculum-data import, updated by re-import keyed on
/// `type_code`, never hard-deleted; retired rows carry `is_active = false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    /// Immutable, globally unique identity of this leaf.
    pub type_code:        TypeCode,
    /// Short display name of the problem pattern.
    pub type_name:        String,
    /// Free-text description of what the pattern asks for.
    pub description:      String,
    /// Free-text outline of the expected solution method.
    pub solution_method:  String,
    /// Subject the leaf belongs to (e.g. `수학`).
    pub subject:          String,
    /// Coarse subject area label.
    pub area:             String,
    /// Curriculum achievement-standard code this leaf belongs to.
    pub standard_code:    String,
    /// Full text of the achievement standard.
    pub standard_content: String,
    /// Primary reasoning-skill category.
    pub cognitive:        CognitiveDomain,
    /// Lower difficulty bound on the 5-point scale.
    pub difficulty_min:   u8,
    /// Upper difficulty bound on the 5-point scale.
    pub difficulty_max:   u8,
    /// Ordered search keywords.
    pub keywords:         Vec<String>,
    /// Human school-level label (e.g. `고등 공통`).
    pub school_level:     String,
    /// School-level grouping code.
    pub level_code:       String,
    /// Subject-domain grouping code.
    pub domain_code:      String,
    /// Soft-delete flag; inactive rows are invisible to every read path.
    pub is_active:        bool,
}

/// An enum to represent possible errors from taxonomy reads and imports.
#[derive(thiserror::Error, Debug)]
pub enum TaxonomyError {
    /// Two records in one import batch shared a type code.
    #[error("Duplicate type code in import batch: `{0}`.")]
    DuplicateTypeCode(String),
    /// A record violated `1 <= difficulty_min <= difficulty_max <= 5`.
    #[error(
        "Type `{code}` has invalid difficulty band {min}..={max}; expected 1 <= min <= max <= 5."
    )]
    InvalidDifficultyBand {
        /// The offending type code.
        code: String,
        /// Declared lower bound.
        min:  u8,
        /// Declared upper bound.
        max:  u8,
    },
    /// A record carried a code that does not satisfy the code grammar.
    #[error(transparent)]
    MalformedTypeCode(#[from] TypeCodeError),
    /// A lookup referenced a code no active record carries.
    #[error("No active type record with code `{0}`.")]
    UnknownTypeCode(String),
    /// The caller supplied a cognitive-domain label outside the enum.
    #[error("Unknown cognitive domain `{0}`.")]
    UnknownCognitiveDomain(String),
    /// Pagination parameters were outside the accepted range.
    #[error("Invalid pagination: limit {limit} (accepted 1..={max}).")]
    InvalidPagination {
        /// The rejected limit.
        limit: usize,
        /// The hard cap on page size.
        max:   usize,
    },
}

/// Filter criteria for taxonomy listing; all fields optional and conjunctive.
#[derive(Debug, Clone, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct TypeFilter {
    /// Restrict to one school-level grouping code.
    pub level:     Option<String>,
    /// Restrict to one subject-domain grouping code.
    pub domain:    Option<String>,
    /// Restrict to one cognitive domain.
    pub cognitive: Option<CognitiveDomain>,
    /// Restrict to one human school-level label.
    pub school:    Option<String>,
    /// Case-insensitive substring search over name, description, keywords.
    pub search:    Option<String>,
}

impl TypeFilter {
    /// Returns true when `record` satisfies every populated criterion.
    fn matches(&self, record: &TypeRecord) -> bool {
        if let Some(level) = &self.level
            && record.level_code != *level
        {
            return false;
        }
        if let Some(domain) = &self.domain
            && record.domain_code != *domain
        {
            return false;
        }
        if let Some(cognitive) = self.cognitive
            && record.cognitive != cognitive
        {
            return false;
        }
        if let Some(school) = &self.school
            && record.school_level != *school
        {
            return false;
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let hit = record.type_name.to_lowercase().contains(&needle)
                || record.description.to_lowercase().contains(&needle)
                || record
                    .keywords
                    .iter()
                    .any(|k| k.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }
        true
    }
}

/// One page of a taxonomy listing.
#[derive(Debug)]
pub struct TypeListing<'a> {
    /// Rows on this page, ordered by type code.
    pub rows:        Vec<&'a TypeRecord>,
    /// Total matching rows across all pages.
    pub total_count: usize,
}

/// Full detail for one taxonomy leaf.
#[derive(Debug)]
pub struct TypeDetail<'a> {
    /// The leaf itself.
    pub record:     &'a TypeRecord,
    /// Stored classifications that reference this leaf.
    pub references: Vec<&'a Classification>,
    /// Other active leaves under the same achievement standard.
    pub related:    Vec<&'a TypeRecord>,
}

/// Aggregate counts over the active taxonomy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyStats {
    /// Number of active type records.
    pub total:           usize,
    /// Number of distinct achievement standards among active records.
    pub total_standards: usize,
    /// Active record count per level code.
    pub by_level:        Vec<(String, usize)>,
    /// Active record count per domain code.
    pub by_domain:       Vec<(String, usize)>,
    /// Active record count per cognitive domain.
    pub by_cognitive:    Vec<(String, usize)>,
    /// Active record count per school label.
    pub by_school:       Vec<(String, usize)>,
}

/// An immutable, validated view over one import of the taxonomy table.
///
/// Every consumer (tree builder, prompt builder, result validator) receives
/// the snapshot as an explicit argument; there is no ambient taxonomy state,
/// so a request's read and its use cannot drift apart.
#[derive(Debug, Clone)]
pub struct TaxonomySnapshot {
    /// All records of the import, active and inactive, ordered by type code.
    records: Vec<TypeRecord>,
}

impl TaxonomySnapshot {
    /// Builds a snapshot from raw import rows, enforcing code uniqueness,
    /// code grammar, and difficulty-band invariants across the whole batch.
    pub fn from_records(mut records: Vec<TypeRecord>) -> Result<Self, TaxonomyError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());
        for record in &records {
            TypeCode::parse(record.type_code.as_str())?;
            if !(1..=5).contains(&record.difficulty_min)
                || record.difficulty_min > record.difficulty_max
                || record.difficulty_max > 5
            {
                return Err(TaxonomyError::InvalidDifficultyBand {
                    code: record.type_code.as_str().to_string(),
                    min:  record.difficulty_min,
                    max:  record.difficulty_max,
                });
            }
            if !seen.insert(record.type_code.as_str()) {
                return Err(TaxonomyError::DuplicateTypeCode(
                    record.type_code.as_str().to_string(),
                ));
            }
        }

        records.sort_by(|a, b| a.type_code.cmp(&b.type_code));
        let active = records.iter().filter(|r| r.is_active).count();
        tracing::info!(
            total = records.len(),
            active,
            inactive = records.len() - active,
            "Taxonomy snapshot constructed"
        );

        Ok(Self { records })
    }

    /// Iterates active records in type-code order.
    pub fn active(&self) -> impl Iterator<Item = &TypeRecord> {
        self.records.iter().filter(|r| r.is_active)
    }

    /// Number of active records.
    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Looks up one active record by its code.
    pub fn get(&self, type_code: &str) -> Option<&TypeRecord> {
        self.records
            .iter()
            .find(|r| r.is_active && r.type_code.as_str() == type_code)
    }

    /// Lists active records matching `filter`, ordered by type code, with
    /// `limit`/`offset` pagination and the total match count.
    pub fn list(
        &self,
        filter: &TypeFilter,
        limit: usize,
        offset: usize,
    ) -> Result<TypeListing<'_>, TaxonomyError> {
        if limit == 0 || limit > MAX_PAGE_LIMIT {
            return Err(TaxonomyError::InvalidPagination {
                limit,
                max: MAX_PAGE_LIMIT,
            });
        }

        let matching: Vec<&TypeRecord> = self.active().filter(|r| filter.matches(r)).collect();
        let total_count = matching.len();
        let rows = matching.into_iter().skip(offset).take(limit).collect();

        Ok(TypeListing { rows, total_count })
    }

    /// Returns the record for `type_code` with its same-standard siblings and
    /// the classifications referencing it. A missing code is an error, not an
    /// empty success.
    pub fn detail<'a>(
        &'a self,
        type_code: &str,
        classifications: &'a [Classification],
    ) -> Result<TypeDetail<'a>, TaxonomyError> {
        let record = self
            .get(type_code)
            .ok_or_else(|| TaxonomyError::UnknownTypeCode(type_code.to_string()))?;

        let related = self
            .active()
            .filter(|r| r.standard_code == record.standard_code && r.type_code != record.type_code)
            .collect();
        let references = classifications
            .iter()
            .filter(|c| c.type_code == record.type_code.as_str())
            .collect();

        Ok(TypeDetail {
            record,
            references,
            related,
        })
    }

    /// Computes the four independent group-by counts over active records.
    pub fn stats(&self) -> TaxonomyStats {
        /// Counts active records keyed by `key`, sorted by key for stable
        /// output.
        fn group_count<'a>(
            records: impl Iterator<Item = &'a TypeRecord>,
            key: impl Fn(&TypeRecord) -> String,
        ) -> Vec<(String, usize)> {
            records
                .map(|r| key(r))
                .counts()
                .into_iter()
                .sorted()
                .collect()
        }

        TaxonomyStats {
            total:           self.active_count(),
            total_standards: self.active().map(|r| r.standard_code.as_str()).unique().count(),
            by_level:        group_count(self.active(), |r| r.level_code.clone()),
            by_domain:       group_count(self.active(), |r| r.domain_code.clone()),
            by_cognitive:    group_count(self.active(), |r| r.cognitive.as_str().to_string()),
            by_school:       group_count(self.active(), |r| r.school_level.clone()),
        }
    }
}
