//! Prelude module for common imports.
//!
//! ```ignore
//! use structdiff::prelude::*;
//! ```

// Node types
pub use crate::node::{GenericNode, HashedNode, HashedTree, MappingOrder, NodeId, NodeKind, Position};

// Change log
pub use crate::change::{ChangeCounts, ChangeLog, ChangeLogEntry, ChangeType};

// Algorithms
pub use crate::algo::{
    DiffConfig, DiffOutcome, DiffStats, MovePairing, diff, diff_documents, diff_documents_with_config,
    diff_trees, diff_with_config, diff_with_stats,
};

#[cfg(feature = "parallel")]
pub use crate::algo::diff_batch;

// Hashing
pub use crate::hash::{ContentHash, StableHasher};

// Error
pub use crate::error::{DiffError, DiffResult};

// YAML
#[cfg(feature = "yaml")]
pub use crate::convert::{from_yaml_file, from_yaml_str};

#[cfg(feature = "yaml")]
pub use crate::report::{ReportEntry, render_changes, write_changes};
