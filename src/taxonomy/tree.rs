#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::collections::HashMap;

use serde::Serialize;
use typed_builder::TypedBuilder;

use super::snapshot::{TaxonomySnapshot, TypeRecord};

/// Root of the derived 4-level curriculum view.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyTree {
    /// School-level nodes in first-occurrence order of the input.
    pub levels: Vec<LevelNode>,
}

/// A school-level grouping (e.g. elementary grades 5–6, high-school common).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelNode {
    /// School-level grouping code.
    pub level_code: String,
    /// Subject-domain children, first-occurrence order.
    pub children:   Vec<DomainNode>,
}

/// A subject-area grouping (e.g. polynomials, functions).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainNode {
    /// Subject-domain grouping code.
    pub domain_code: String,
    /// Achievement-standard children, first-occurrence order.
    pub children:    Vec<StandardNode>,
}

/// A curriculum achievement standard grouping its problem types.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardNode {
    /// Achievement-standard code.
    pub standard_code:    String,
    /// Full text of the achievement standard.
    pub standard_content: String,
    /// Leaf types under this standard, sorted by type code.
    pub children:         Vec<TypeRecord>,
}

impl TaxonomyTree {
    /// Flattens the tree back into its leaf records, in tree order.
    ///
    /// For any input set, the flattened output is the same set of records the
    /// tree was built from, ordering aside: the tree is loss-less.
    pub fn flatten(&self) -> Vec<&TypeRecord> {
        self.levels
            .iter()
            .flat_map(|l| &l.children)
            .flat_map(|d| &d.children)
            .flat_map(|s| &s.children)
            .collect()
    }

    /// Total number of leaf types in the tree.
    pub fn total_types(&self) -> usize {
        self.levels
            .iter()
            .flat_map(|l| &l.children)
            .flat_map(|d| &d.children)
            .map(|s| s.children.len())
            .sum()
    }

    /// Total number of standard nodes in the tree.
    pub fn total_standards(&self) -> usize {
        self.levels
            .iter()
            .flat_map(|l| &l.children)
            .map(|d| d.children.len())
            .sum()
    }
}

/// Builds the 4-level tree from a flat record sequence in a single pass.
///
/// Grouping nests by `(level_code, domain_code, standard_code)`. Node order at
/// every grouping level is fixed by the first occurrence of the group in the
/// input, not by sorting; within a standard, leaves are sorted by type code
/// for stable display. Each node owns its children exclusively; there are no
/// parent back-references. Pure and idempotent: the same input always produces
/// the same tree.
pub fn build_tree<'a, I>(records: I) -> TaxonomyTree
where
    I: IntoIterator<Item = &'a TypeRecord>,
{
    let mut tree = TaxonomyTree::default();
    let mut level_index: HashMap<String, usize> = HashMap::new();
    let mut domain_index: HashMap<(String, String), usize> = HashMap::new();
    let mut standard_index: HashMap<(String, String, String), usize> = HashMap::new();

    for record in records {
        let level_pos = *level_index
            .entry(record.level_code.clone())
            .or_insert_with(|| {
                tree.levels.push(LevelNode {
                    level_code: record.level_code.clone(),
                    children:   Vec::new(),
                });
                tree.levels.len() - 1
            });

        let level = &mut tree.levels[level_pos];
        let domain_key = (record.level_code.clone(), record.domain_code.clone());
        let domain_pos = *domain_index.entry(domain_key).or_insert_with(|| {
            level.children.push(DomainNode {
                domain_code: record.domain_code.clone(),
                children:    Vec::new(),
            });
            level.children.len() - 1
        });

        let domain = &mut level.children[domain_pos];
        let standard_key = (
            record.level_code.clone(),
            record.domain_code.clone(),
            record.standard_code.clone(),
        );
        let standard_pos = *standard_index.entry(standard_key).or_insert_with(|| {
            domain.children.push(StandardNode {
                standard_code:    record.standard_code.clone(),
                standard_content: record.standard_content.clone(),
                children:         Vec::new(),
            });
            domain.children.len() - 1
        });

        domain.children[standard_pos].children.push(record.clone());
    }

    for level in &mut tree.levels {
        for domain in &mut level.children {
            for standard in &mut domain.children {
                standard.children.sort_by(|a, b| a.type_code.cmp(&b.type_code));
            }
        }
    }

    tree
}

/// Filter criteria for the tree read path.
#[derive(Debug, Clone, Default, TypedBuilder)]
#[builder(field_defaults(default, setter(strip_option, into)))]
pub struct TreeFilter {
    /// Restrict to one human school-level label.
    pub school: Option<String>,
    /// Restrict to one school-level grouping code.
    pub level:  Option<String>,
}

/// A built tree plus the totals the UI displays next to it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeView {
    /// The filtered 4-level tree.
    pub tree:            TaxonomyTree,
    /// Leaf count across the tree.
    pub total_types:     usize,
    /// Distinct standard count across the tree.
    pub total_standards: usize,
}

/// Builds the tree over the active records matching `filter`.
pub fn tree_view(snapshot: &TaxonomySnapshot, filter: &TreeFilter) -> TreeView {
    let records = snapshot.active().filter(|r| {
        filter.school.as_ref().is_none_or(|s| r.school_level == *s)
            && filter.level.as_ref().is_none_or(|l| r.level_code == *l)
    });

    let tree = build_tree(records);
    let total_types = tree.total_types();
    let total_standards = tree.total_standards();

    TreeView {
        tree,
        total_types,
        total_standards,
    }
}
