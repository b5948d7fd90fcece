//! Algorithm implementations for structural diffing.
//!
//! - `myers`: linear-space Myers diff over token sequences
//! - `mapping`: key-based set difference over two maps
//! - `reconcile`: passes turning add/delete pairs into moves and changes
//! - `diff`: the tree diff orchestrator tying them together

mod diff;
mod mapping;
mod myers;
mod reconcile;

#[cfg(feature = "parallel")]
pub use diff::diff_batch;
pub use diff::{
    DiffConfig, DiffOutcome, DiffStats, diff, diff_documents, diff_documents_with_config, diff_trees,
    diff_with_config, diff_with_stats,
};
pub use mapping::{MapDiff, diff_maps};
pub use myers::{Edit, EditScript, EditStats, diff_sequences};
pub use reconcile::{MovePairing, SeqChange, merge_moves, merge_updates, pair_scalar_moves, same_identity};
