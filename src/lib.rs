//! structdiff - Structural diff for YAML-like document trees
//!
//! ## Core Concepts
//!
//! **Hashed trees**: every subtree gets a blake3 content hash and a key
//! (`"[i]"` in sequences, the key text in mappings), so identical content
//! is recognised wherever it sits and every node has a stable dotted path.
//!
//! **Kind-directed diff**: mappings compare by key, sequences run a
//! linear-space Myers diff and reconcile add/delete pairs into moves and
//! in-place changes.
//!
//! ## Modules
//! - `node`: `GenericNode` input model and the `HashedTree` arena
//! - `hash`: `ContentHash` and `StableHasher`
//! - `algo`: Myers, mapping diff, reconciliation passes, tree diff
//! - `change`: `ChangeLog` and its entries
//! - `convert`: YAML parser (feature `yaml`)
//! - `report`: YAML change report (feature `yaml`)
//!
//! ## Usage
//!
//! ```ignore
//! use structdiff::{diff_documents, from_yaml_str, render_changes};
//!
//! let old = from_yaml_str("tags: [abc, def, ghi, jkl]", "old.yaml")?;
//! let new = from_yaml_str("tags: [def, ghi, jkl, abc]", "new.yaml")?;
//!
//! let log = diff_documents(&old, &new);
//! print!("{}", render_changes(&log)?);
//! // - path: doc.tags.[0]
//! //   type: moved
//! //   from-index: 0
//! //   to-index: 3
//! ```

#[macro_use]
mod macros;

// =============================================================================
// Core modules
// =============================================================================

/// Node types: GenericNode, HashedTree
pub mod node;

/// Content hashing
pub mod hash;

/// Algorithms: myers, mapping diff, reconciliation, tree diff
pub mod algo;

/// Change log model
pub mod change;

/// Error types
pub mod error;

/// Prelude for common imports
pub mod prelude;

/// Source format converters
pub mod convert;

/// YAML change reports
#[cfg(feature = "yaml")]
pub mod report;

// =============================================================================
// Re-exports
// =============================================================================

// Node types
pub use node::{GenericNode, HashedNode, HashedTree, MappingOrder, NodeId, NodeKind, Position};

// Change log
pub use change::{ChangeCounts, ChangeLog, ChangeLogEntry, ChangeType};

// Algorithms
#[cfg(feature = "parallel")]
pub use algo::diff_batch;
pub use algo::{
    DiffConfig, DiffOutcome, DiffStats, MovePairing, diff, diff_documents, diff_documents_with_config, diff_trees,
    diff_with_config, diff_with_stats,
};

// Hashing
pub use hash::{ContentHash, StableHasher};

// Error types
pub use error::{DiffError, DiffResult};

// YAML
#[cfg(feature = "yaml")]
pub use convert::{from_yaml_file, from_yaml_str};

#[cfg(feature = "yaml")]
pub use report::{ReportEntry, prepare, render_changes, write_changes};

// =============================================================================
// Tests
// =============================================================================
