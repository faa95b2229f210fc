//! Curriculum taxonomy: the flat type table, its validated snapshot view, and
//! the derived 4-level tree.

/// Type-code grammar parsing and validation.
pub mod code;
/// Immutable snapshot over the type table with lookup, listing, and stats.
pub mod snapshot;
/// The derived Level → Domain → Standard → Type tree.
pub mod tree;

pub use code::{TypeCode, TypeCodeError};
pub use snapshot::{
    CognitiveDomain, TaxonomyError, TaxonomySnapshot, TaxonomyStats, TypeDetail, TypeFilter,
    TypeListing, TypeRecord,
};
pub use tree::{TaxonomyTree, TreeFilter, TreeView, build_tree, tree_view};
