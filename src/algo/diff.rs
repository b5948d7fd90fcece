//! Tree Diff Algorithm
//!
//! Computes a structural change log between two parsed documents.
//! This is a **pure algorithm module**: no I/O, no formatting.
//!
//! # Architecture
//!
//! ```text
//! GenericNode ──build──> HashedTree ─┐
//!                                    ├─ diff_trees ─> ChangeLog
//! GenericNode ──build──> HashedTree ─┘
//! ```
//!
//! # Dispatch
//!
//! | Kind | Strategy |
//! |------|----------|
//! | Scalar | hash comparison, one `Changed` entry |
//! | Mapping | by key via [`diff_maps`], never positional |
//! | Document / Sequence | sibling reconciliation, see below |
//! | Alias | skipped |
//!
//! Sibling lists pick one of three paths from their leading elements:
//!
//! 1. **Scalars**: Myers over raw values, then value-based move pairing
//! 2. **Mappings**: by positional key (`"[i]"`), so reorders read as replacements
//! 3. **Anything else**: Myers over content hashes, then update and move merges
//!
//! # Complexity
//!
//! - Time: O((n+m) * d) per sibling list, d being its edit distance
//! - Stack: proportional to document nesting depth

use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::change::{ChangeLog, ChangeLogEntry};
use crate::hash::ContentHash;
use crate::node::{GenericNode, HashedNode, HashedTree, MappingOrder, NodeId, NodeKind};

use super::mapping::diff_maps;
use super::myers::{Edit, diff_sequences};
use super::reconcile::{MovePairing, SeqChange, merge_moves, merge_updates, pair_scalar_moves};

// =============================================================================
// Public Types
// =============================================================================

/// Configuration for the tree diff.
///
/// The default reproduces the established output exactly; `canonical()`
/// trades that for order-insensitive mappings and stable move pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffConfig {
    /// Tie-break for scalar move detection.
    /// Default: `FirstMatch`
    pub move_pairing: MovePairing,
    /// Whether mapping key order feeds the content hash.
    /// Default: `Ordered`
    pub mapping_order: MappingOrder,
}

impl DiffConfig {
    /// Create config with explicit settings.
    pub fn new(move_pairing: MovePairing, mapping_order: MappingOrder) -> Self {
        Self {
            move_pairing,
            mapping_order,
        }
    }

    /// Output-compatible defaults.
    pub fn compatible() -> Self {
        Self::default()
    }

    /// Nearest-index move pairing, key-order-insensitive mapping hashes.
    pub fn canonical() -> Self {
        Self {
            move_pairing: MovePairing::Nearest,
            mapping_order: MappingOrder::Unordered,
        }
    }
}

/// Statistics from diff operation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct DiffStats {
    /// Node pairs visited by the dispatcher
    pub nodes_compared: usize,
    /// Mapping pairs compared by key
    pub mappings_compared: usize,
    /// Sibling lists taking the scalar path
    pub scalar_sequences: usize,
    /// Sibling lists taking the mapping path
    pub mapping_sequences: usize,
    /// Sibling lists taking the hash path
    pub hash_sequences: usize,
    /// Pairs skipped because one side is an alias
    pub aliases_skipped: usize,
    /// Pairs whose kinds differ
    pub kind_mismatches: usize,
}

/// Change log plus the statistics gathered while producing it
#[derive(Debug, Clone)]
#[must_use]
pub struct DiffOutcome<'a> {
    pub changes: ChangeLog<'a>,
    pub stats: DiffStats,
}

impl DiffOutcome<'_> {
    /// Check if any changes were detected
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Diff two parsed documents with the default configuration
///
/// Entries come out in discovery order; see [`diff_documents`] for the
/// path-sorted form.
///
/// # Example
///
/// ```
/// use structdiff::{diff, ChangeType, GenericNode};
///
/// let old = GenericNode::document(Some(GenericNode::scalars(["abc", "def", "ghi", "jkl"])));
/// let new = GenericNode::document(Some(GenericNode::scalars(["def", "ghi", "jkl", "abc"])));
/// let log = diff(&old, &new);
/// assert_eq!(log.len(), 1);
/// assert_eq!(log.iter().next().map(|e| e.change_type), Some(ChangeType::Moved));
/// ```
pub fn diff<'a>(old: &'a GenericNode, new: &'a GenericNode) -> ChangeLog<'a> {
    diff_with_config(old, new, DiffConfig::default())
}

/// Diff two parsed documents with custom configuration.
pub fn diff_with_config<'a>(old: &'a GenericNode, new: &'a GenericNode, config: DiffConfig) -> ChangeLog<'a> {
    diff_with_stats(old, new, config).changes
}

/// Diff two parsed documents, keeping the traversal statistics.
pub fn diff_with_stats<'a>(old: &'a GenericNode, new: &'a GenericNode, config: DiffConfig) -> DiffOutcome<'a> {
    let old_tree = HashedTree::build_with(old, config.mapping_order);
    let new_tree = HashedTree::build_with(new, config.mapping_order);
    diff_trees(&old_tree, &new_tree, config)
}

/// Diff two parsed documents and sort the result by path
pub fn diff_documents<'a>(old: &'a GenericNode, new: &'a GenericNode) -> ChangeLog<'a> {
    diff_documents_with_config(old, new, DiffConfig::default())
}

/// Path-sorted diff with custom configuration.
pub fn diff_documents_with_config<'a>(old: &'a GenericNode, new: &'a GenericNode, config: DiffConfig) -> ChangeLog<'a> {
    diff_with_config(old, new, config).sorted()
}

/// Diff two already built hashed trees from their roots.
///
/// Only `config.move_pairing` applies here; the trees carry their own
/// mapping order from when they were built.
pub fn diff_trees<'a>(old: &HashedTree<'a>, new: &HashedTree<'a>, config: DiffConfig) -> DiffOutcome<'a> {
    let mut ctx = DiffContext::new(old, new, config);
    ctx.diff_node(old.root(), new.root());
    let outcome = ctx.into_outcome();

    debug!(
        old_nodes = old.len(),
        new_nodes = new.len(),
        entries = outcome.changes.len(),
        compared = outcome.stats.nodes_compared,
        "diff complete"
    );
    outcome
}

/// Diff many independent document pairs concurrently.
///
/// Each pair is still diffed sequentially; results keep the input order.
#[cfg(feature = "parallel")]
pub fn diff_batch<'a>(pairs: &'a [(GenericNode, GenericNode)], config: DiffConfig) -> Vec<ChangeLog<'a>> {
    use rayon::prelude::*;

    pairs
        .par_iter()
        .map(|(old, new)| diff_with_config(old, new, config))
        .collect()
}

// =============================================================================
// Tokens
// =============================================================================

/// What the sequence engine compares for one sibling
///
/// Scalars compare by raw text, everything else by content hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'n> {
    Value(&'n str),
    Hash(Option<ContentHash>),
}

impl<'n> Token<'n> {
    #[inline]
    fn of(node: &'n HashedNode<'_>) -> Self {
        match node.value() {
            Some(value) => Self::Value(value),
            None => Self::Hash(node.hash),
        }
    }
}

#[inline]
fn hash_token(node: &HashedNode<'_>) -> Token<'static> {
    Token::Hash(node.hash)
}

// =============================================================================
// Internal Context
// =============================================================================

struct DiffContext<'t, 'a> {
    old: &'t HashedTree<'a>,
    new: &'t HashedTree<'a>,
    entries: Vec<ChangeLogEntry<'a>>,
    stats: DiffStats,
    config: DiffConfig,
}

impl<'t, 'a> DiffContext<'t, 'a> {
    fn new(old: &'t HashedTree<'a>, new: &'t HashedTree<'a>, config: DiffConfig) -> Self {
        Self {
            old,
            new,
            entries: Vec::new(),
            stats: DiffStats::default(),
            config,
        }
    }

    fn into_outcome(self) -> DiffOutcome<'a> {
        let mut changes = ChangeLog::from(self.entries);
        changes.prune();
        DiffOutcome {
            changes,
            stats: self.stats,
        }
    }

    /// Compare one node pair, dispatching on kind
    fn diff_node(&mut self, a: NodeId, b: NodeId) {
        self.stats.nodes_compared += 1;
        let (old, new) = (self.old, self.new);
        let (x, y) = (old.node(a), new.node(b));

        if x.kind.is_alias() || y.kind.is_alias() {
            self.stats.aliases_skipped += 1;
            return;
        }

        if x.kind != y.kind {
            self.stats.kind_mismatches += 1;
            trace!(path = %new.path(b), old = %x.kind, new = %y.kind, "kind mismatch");
            self.push_changed(a, b);
            return;
        }

        match x.kind {
            NodeKind::Scalar => {
                if x.hash != y.hash {
                    self.push_changed(a, b);
                }
            }
            NodeKind::Document | NodeKind::Sequence => self.diff_sequence_children(a, b),
            NodeKind::Mapping => self.diff_mapping_children(a, b),
            NodeKind::Alias => {}
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mappings
    // ─────────────────────────────────────────────────────────────────────────

    /// Compare mapping entries by key
    ///
    /// Emits deletions and recursions in old source order, then additions
    /// in new source order.
    fn diff_mapping_children(&mut self, a: NodeId, b: NodeId) {
        self.stats.mappings_compared += 1;
        let result = diff_maps(keyed(self.old, a), keyed(self.new, b));

        let mut deleted: Vec<NodeId> = result.deleted.into_values().collect();
        deleted.sort_unstable();
        let mut common: Vec<(NodeId, NodeId)> = result.common.into_values().collect();
        common.sort_unstable();
        let mut added: Vec<NodeId> = result.added.into_values().collect();
        added.sort_unstable();

        trace!(
            path = %self.old.path(a),
            deleted = deleted.len(),
            added = added.len(),
            common = common.len(),
            "mapping"
        );

        let mut deleted = deleted.into_iter().peekable();
        for (from, to) in common {
            while let Some(gone) = deleted.next_if(|gone| *gone < from) {
                self.push_deleted(gone, None);
            }
            if self.old.hash(from) != self.new.hash(to) {
                self.diff_node(from, to);
            }
        }
        for gone in deleted {
            self.push_deleted(gone, None);
        }
        for new_id in added {
            self.push_added(new_id, None);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sequences
    // ─────────────────────────────────────────────────────────────────────────

    /// Reconcile the child lists of two Document or Sequence nodes
    fn diff_sequence_children(&mut self, a: NodeId, b: NodeId) {
        let (old, new) = (self.old, self.new);
        let (xs, ys) = (old.children(a), new.children(b));

        if xs.is_empty() && ys.is_empty() {
            return;
        }
        if xs.len() == 1 && ys.len() == 1 {
            self.diff_node(xs[0], ys[0]);
            return;
        }

        // An empty side never vetoes a path
        let old_first = xs.first().map(|id| old.node(*id).kind);
        let new_first = ys.first().map(|id| new.node(*id).kind);
        let leads_with = |kind: NodeKind| old_first.is_none_or(|k| k == kind) && new_first.is_none_or(|k| k == kind);

        if leads_with(NodeKind::Scalar) {
            self.stats.scalar_sequences += 1;
            trace!(path = %old.path(a), from = xs.len(), to = ys.len(), "scalar sequence");
            self.diff_scalar_sequence(xs, ys);
        } else if leads_with(NodeKind::Mapping) {
            self.stats.mapping_sequences += 1;
            trace!(path = %old.path(a), from = xs.len(), to = ys.len(), "mapping sequence");
            self.diff_mapping_sequence(a, b);
        } else {
            self.stats.hash_sequences += 1;
            trace!(path = %old.path(a), from = xs.len(), to = ys.len(), "hash sequence");
            self.diff_hash_sequence(xs, ys);
        }
    }

    /// Myers over raw scalar values, then value-based move pairing
    fn diff_scalar_sequence(&mut self, xs: &[NodeId], ys: &[NodeId]) {
        let (old, new) = (self.old, self.new);
        let from: Vec<Token<'_>> = xs.iter().map(|id| Token::of(old.node(*id))).collect();
        let to: Vec<Token<'_>> = ys.iter().map(|id| Token::of(new.node(*id))).collect();

        let provisional = provisional_changes(xs, ys, &diff_sequences(&from, &to).edits);
        let same_value = |f: NodeId, t: NodeId| Token::of(old.node(f)) == Token::of(new.node(t));
        let changes = pair_scalar_moves(&provisional, same_value, self.config.move_pairing);

        for change in changes {
            match change {
                SeqChange::Deleted { from, from_idx } => self.push_deleted(from, Some(from_idx)),
                SeqChange::Added { to, to_idx } => self.push_added(to, Some(to_idx)),
                SeqChange::Moved { from, from_idx, to_idx, .. } => {
                    self.entries
                        .push(ChangeLogEntry::moved(old.path(from), from_idx, to_idx));
                }
                SeqChange::Changed { .. } => {}
            }
        }
    }

    /// Elements paired by positional key; never detects moves
    fn diff_mapping_sequence(&mut self, a: NodeId, b: NodeId) {
        let result = diff_maps(keyed(self.old, a), keyed(self.new, b));

        let mut added: Vec<NodeId> = result.added.into_values().collect();
        added.sort_unstable();
        let mut deleted: Vec<NodeId> = result.deleted.into_values().collect();
        deleted.sort_unstable();
        let mut common: Vec<(NodeId, NodeId)> = result.common.into_values().collect();
        common.sort_unstable();

        for to in added {
            let index = position(self.new, b, to);
            self.push_added(to, index);
        }
        for from in deleted {
            let index = position(self.old, a, from);
            self.push_deleted(from, index);
        }
        for (from, to) in common {
            if self.old.hash(from) != self.new.hash(to) {
                self.diff_node(from, to);
            }
        }
    }

    /// Myers over content hashes, then update merge and move merge
    fn diff_hash_sequence(&mut self, xs: &[NodeId], ys: &[NodeId]) {
        let (old, new) = (self.old, self.new);
        let from: Vec<Token<'_>> = xs.iter().map(|id| hash_token(old.node(*id))).collect();
        let to: Vec<Token<'_>> = ys.iter().map(|id| hash_token(new.node(*id))).collect();

        let provisional = provisional_changes(xs, ys, &diff_sequences(&from, &to).edits);
        let updated = merge_updates(&provisional, old, new);
        let changes = merge_moves(&updated, old, new);

        for change in changes {
            match change {
                SeqChange::Changed { from, to } => {
                    if old.node(from).is_scalar() {
                        self.push_changed(from, to);
                    } else {
                        self.diff_node(from, to);
                    }
                }
                SeqChange::Moved {
                    from,
                    to,
                    from_idx,
                    to_idx,
                } => {
                    if old.hash(from) != new.hash(to) {
                        self.diff_node(from, to);
                    } else {
                        let entry = ChangeLogEntry::moved(old.path(from), from_idx, to_idx)
                            .with_nodes(old.node(from).source, new.node(to).source);
                        self.entries.push(entry);
                    }
                }
                SeqChange::Deleted { from, from_idx } => self.push_deleted(from, Some(from_idx)),
                SeqChange::Added { to, to_idx } => self.push_added(to, Some(to_idx)),
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Entry Builders
    // ─────────────────────────────────────────────────────────────────────────

    fn push_changed(&mut self, from: NodeId, to: NodeId) {
        let entry = ChangeLogEntry::changed(self.new.path(to), self.old.node(from).source, self.new.node(to).source);
        self.entries.push(entry);
    }

    fn push_deleted(&mut self, from: NodeId, index: Option<usize>) {
        let entry = ChangeLogEntry::deleted(self.old.path(from), self.old.node(from).source, index);
        self.entries.push(entry);
    }

    fn push_added(&mut self, to: NodeId, index: Option<usize>) {
        let entry = ChangeLogEntry::added(self.new.path(to), self.new.node(to).source, index);
        self.entries.push(entry);
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Children of `parent` keyed by their builder key; a repeated key keeps the last
fn keyed<'t>(tree: &'t HashedTree<'_>, parent: NodeId) -> FxHashMap<&'t str, NodeId> {
    tree.children(parent)
        .iter()
        .map(|&id| (tree.node(id).key.as_str(), id))
        .collect()
}

/// Index of `child` among the children of `parent`
fn position(tree: &HashedTree<'_>, parent: NodeId, child: NodeId) -> Option<usize> {
    tree.children(parent).iter().position(|&id| id == child)
}

/// Lift raw edits to provisional changes referencing the sibling nodes
fn provisional_changes(xs: &[NodeId], ys: &[NodeId], edits: &[Edit]) -> Vec<SeqChange> {
    edits
        .iter()
        .map(|edit| match *edit {
            Edit::Delete { from_idx } => SeqChange::Deleted {
                from: xs[from_idx],
                from_idx,
            },
            Edit::Add { to_idx } => SeqChange::Added { to: ys[to_idx], to_idx },
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeType;

    const LIST_A: [&str; 4] = ["abc", "def", "ghi", "jkl"];

    fn doc(content: GenericNode) -> GenericNode {
        GenericNode::document(Some(content))
    }

    fn scalars(values: &[&str]) -> GenericNode {
        doc(GenericNode::scalars(values.iter().copied()))
    }

    /// `(type, path, from_index, to_index)` of every entry, in order
    fn summary(log: &ChangeLog<'_>) -> Vec<(ChangeType, String, Option<usize>, Option<usize>)> {
        log.iter()
            .map(|e| (e.change_type, e.path.clone(), e.from_index, e.to_index))
            .collect()
    }

    fn dep(name: &str, version: &str) -> GenericNode {
        GenericNode::mapping([("name", GenericNode::scalar(name)), ("version", GenericNode::scalar(version))])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scalar sequences
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_identical_documents() {
        let a = scalars(&LIST_A);
        assert!(diff(&a, &a).is_empty());
    }

    #[test]
    fn test_one_deleted() {
        let (a, b) = (scalars(&LIST_A), scalars(&["abc", "ghi", "jkl"]));
        let log = diff(&a, &b);
        assert_eq!(summary(&log), [(ChangeType::Deleted, "doc.[1]".into(), Some(1), None)]);
        let entry = log.iter().next().unwrap();
        assert_eq!(entry.from.map(|n| n.value.as_str()), Some("def"));
        assert!(entry.to.is_none());
    }

    #[test]
    fn test_one_added() {
        let (a, b) = (scalars(&LIST_A), scalars(&["abc", "def", "xyz", "ghi", "jkl"]));
        let log = diff(&a, &b);
        assert_eq!(summary(&log), [(ChangeType::Added, "doc.[2]".into(), None, Some(2))]);
        assert_eq!(log.iter().next().unwrap().to.map(|n| n.value.as_str()), Some("xyz"));
    }

    #[test]
    fn test_moved_first_to_last() {
        let (a, b) = (scalars(&LIST_A), scalars(&["def", "ghi", "jkl", "abc"]));
        let log = diff(&a, &b);
        assert_eq!(summary(&log), [(ChangeType::Moved, "doc.[0]".into(), Some(0), Some(3))]);
        let entry = log.iter().next().unwrap();
        assert!(entry.from.is_none() && entry.to.is_none());
    }

    #[test]
    fn test_scalar_replacement_is_not_changed() {
        let (a, b) = (scalars(&LIST_A), scalars(&["abc", "xyz", "ghi", "jkl"]));
        let log = diff(&a, &b);
        assert_eq!(
            summary(&log),
            [
                (ChangeType::Deleted, "doc.[1]".into(), Some(1), None),
                (ChangeType::Added, "doc.[1]".into(), None, Some(1)),
            ]
        );
    }

    #[test]
    fn test_deleted_and_moved() {
        let (a, b) = (scalars(&LIST_A), scalars(&["ghi", "abc", "jkl"]));
        let log = diff(&a, &b);
        // edits: add ghi@0, del def@1, del ghi@2; ghi pairs into a move
        assert_eq!(
            summary(&log),
            [
                (ChangeType::Moved, "doc.[2]".into(), Some(2), Some(0)),
                (ChangeType::Deleted, "doc.[1]".into(), Some(1), None),
            ]
        );
    }

    #[test]
    fn test_pure_deletion_and_addition() {
        let (a, b) = (scalars(&LIST_A), doc(GenericNode::sequence([])));
        let log = diff(&a, &b);
        assert_eq!(log.counts().deleted, 4);
        assert_eq!(log.len(), 4);

        let log = diff(&b, &a);
        assert_eq!(log.counts().added, 4);
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn test_canonical_config_keeps_simple_moves() {
        let (a, b) = (scalars(&LIST_A), scalars(&["def", "ghi", "jkl", "abc"]));
        let log = diff_with_config(&a, &b, DiffConfig::canonical());
        assert_eq!(summary(&log), [(ChangeType::Moved, "doc.[0]".into(), Some(0), Some(3))]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mappings
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_mapping_by_key() {
        let a = doc(GenericNode::mapping([
            ("city", GenericNode::scalar("Denver")),
            ("zip", GenericNode::scalar("80202")),
            ("state", GenericNode::scalar("CO")),
        ]));
        let b = doc(GenericNode::mapping([
            ("state", GenericNode::scalar("CO")),
            ("city", GenericNode::scalar("Boulder")),
            ("country", GenericNode::scalar("US")),
        ]));
        let log = diff(&a, &b);
        assert_eq!(
            summary(&log),
            [
                (ChangeType::Changed, "doc.city".into(), None, None),
                (ChangeType::Deleted, "doc.zip".into(), None, None),
                (ChangeType::Added, "doc.country".into(), None, None),
            ]
        );
        let changed = log.iter().next().unwrap();
        assert_eq!(changed.from.map(|n| n.value.as_str()), Some("Denver"));
        assert_eq!(changed.to.map(|n| n.value.as_str()), Some("Boulder"));
    }

    #[test]
    fn test_nested_mapping_paths() {
        let a = doc(GenericNode::mapping([(
            "server",
            GenericNode::mapping([("port", GenericNode::scalar("80"))]),
        )]));
        let b = doc(GenericNode::mapping([(
            "server",
            GenericNode::mapping([("port", GenericNode::scalar("8080"))]),
        )]));
        let log = diff(&a, &b);
        assert_eq!(summary(&log), [(ChangeType::Changed, "doc.server.port".into(), None, None)]);
    }

    #[test]
    fn test_key_reorder_is_silent_in_both_modes() {
        let a = doc(GenericNode::mapping([("x", GenericNode::scalar("1")), ("y", GenericNode::scalar("2"))]));
        let b = doc(GenericNode::mapping([("y", GenericNode::scalar("2")), ("x", GenericNode::scalar("1"))]));
        assert!(diff(&a, &b).is_empty());
        assert!(diff_with_config(&a, &b, DiffConfig::canonical()).is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mapping sequences
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_mapping_sequence_is_positional() {
        let a = doc(GenericNode::sequence([dep("serde", "1.0"), dep("tokio", "1.0")]));
        let b = doc(GenericNode::sequence([dep("tokio", "1.0"), dep("serde", "1.0")]));
        let log = diff(&a, &b);
        // A swap is two in-place value changes, never a move
        assert_eq!(log.counts().moved, 0);
        assert_eq!(log.counts().changed, 2);
        assert!(log.iter().all(|e| e.path.ends_with(".name")));
    }

    #[test]
    fn test_mapping_sequence_growth() {
        let a = doc(GenericNode::sequence([dep("serde", "1.0")]));
        let b = doc(GenericNode::sequence([
            dep("serde", "1.0"),
            dep("tokio", "1.0"),
            dep("rayon", "1.10"),
        ]));
        let log = diff(&a, &b);
        assert_eq!(
            summary(&log),
            [
                (ChangeType::Added, "doc.[1]".into(), None, Some(1)),
                (ChangeType::Added, "doc.[2]".into(), None, Some(2)),
            ]
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Hash sequences
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_nested_sequence_moved() {
        let a = doc(GenericNode::sequence([
            GenericNode::scalars(["a", "b"]),
            GenericNode::scalars(["c"]),
            GenericNode::scalars(["d"]),
        ]));
        let b = doc(GenericNode::sequence([
            GenericNode::scalars(["c"]),
            GenericNode::scalars(["d"]),
            GenericNode::scalars(["a", "b"]),
        ]));
        let log = diff(&a, &b);
        assert_eq!(summary(&log), [(ChangeType::Moved, "doc.[0]".into(), Some(0), Some(2))]);
        let entry = log.iter().next().unwrap();
        assert!(entry.from.is_some() && entry.to.is_some());
    }

    #[test]
    fn test_nested_sequence_replaced() {
        let a = doc(GenericNode::sequence([
            GenericNode::scalars(["a"]),
            GenericNode::scalars(["b"]),
        ]));
        let b = doc(GenericNode::sequence([
            GenericNode::scalars(["a"]),
            GenericNode::scalars(["z"]),
        ]));
        let log = diff(&a, &b);
        // Sequences only share identity on equal hashes: delete + add
        assert_eq!(
            summary(&log),
            [
                (ChangeType::Deleted, "doc.[1]".into(), Some(1), None),
                (ChangeType::Added, "doc.[1]".into(), None, Some(1)),
            ]
        );
    }

    #[test]
    fn test_mixed_sequence_update_merge_recurses() {
        let a = doc(GenericNode::sequence([
            GenericNode::scalars(["x"]),
            dep("serde", "1.0"),
        ]));
        let b = doc(GenericNode::sequence([
            GenericNode::scalars(["x"]),
            dep("serde", "2.0"),
        ]));
        let log = diff(&a, &b);
        assert_eq!(summary(&log), [(ChangeType::Changed, "doc.[1].version".into(), None, None)]);
    }

    #[test]
    fn test_single_element_pair_recurses() {
        let (a, b) = (scalars(&["abc"]), scalars(&["xyz"]));
        let log = diff(&a, &b);
        assert_eq!(summary(&log), [(ChangeType::Changed, "doc.[0]".into(), None, None)]);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edge cases
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_kind_mismatch_is_single_change() {
        let a = doc(GenericNode::mapping([("value", GenericNode::scalar("1"))]));
        let b = doc(GenericNode::mapping([("value", GenericNode::scalars(["1", "2"]))]));
        let outcome = diff_with_stats(&a, &b, DiffConfig::default());
        assert_eq!(summary(&outcome.changes), [(ChangeType::Changed, "doc.value".into(), None, None)]);
        assert_eq!(outcome.stats.kind_mismatches, 1);
    }

    #[test]
    fn test_empty_kind_mismatch_is_changed() {
        let cases = [
            (GenericNode::mapping::<String>([]), GenericNode::sequence([])),
            (GenericNode::scalar(""), GenericNode::sequence([])),
            (GenericNode::scalar(""), GenericNode::mapping::<String>([])),
        ];
        for (old, new) in cases {
            let a = doc(GenericNode::mapping([("x", old)]));
            let b = doc(GenericNode::mapping([("x", new)]));
            assert_eq!(summary(&diff(&a, &b)), [(ChangeType::Changed, "doc.x".into(), None, None)]);
        }
    }

    #[test]
    fn test_empty_collections_differ_inside_sequence() {
        let a = doc(GenericNode::mapping([(
            "items",
            GenericNode::sequence([GenericNode::scalars(["a"]), GenericNode::mapping::<String>([])]),
        )]));
        let b = doc(GenericNode::mapping([(
            "items",
            GenericNode::sequence([GenericNode::scalars(["a"]), GenericNode::sequence([])]),
        )]));
        assert_eq!(
            summary(&diff(&a, &b)),
            [
                (ChangeType::Deleted, "doc.items.[1]".into(), Some(1), None),
                (ChangeType::Added, "doc.items.[1]".into(), None, Some(1)),
            ]
        );
    }

    #[test]
    fn test_aliases_are_skipped() {
        let a = doc(GenericNode::mapping([("ref", GenericNode::alias())]));
        let b = doc(GenericNode::mapping([("ref", GenericNode::scalar("x"))]));
        let outcome = diff_with_stats(&a, &b, DiffConfig::default());
        assert!(!outcome.has_changes());
        assert_eq!(outcome.stats.aliases_skipped, 1);
    }

    #[test]
    fn test_one_side_empty_document() {
        let a = GenericNode::document(None);
        let b = scalars(&["abc"]);
        let log = diff(&a, &b);
        assert_eq!(summary(&log), [(ChangeType::Added, "doc".into(), None, Some(0))]);
    }

    #[test]
    fn test_diff_documents_sorted() {
        let a = doc(GenericNode::mapping([
            ("b", GenericNode::scalar("1")),
            ("a", GenericNode::scalar("1")),
        ]));
        let b = doc(GenericNode::mapping([
            ("b", GenericNode::scalar("2")),
            ("a", GenericNode::scalar("2")),
        ]));
        let paths: Vec<String> = diff_documents(&a, &b).into_iter().map(|e| e.path).collect();
        assert_eq!(paths, ["doc.a", "doc.b"]);
    }

    #[test]
    fn test_stats_paths() {
        let a = doc(GenericNode::mapping([
            ("tags", GenericNode::scalars(["a", "b"])),
            ("deps", GenericNode::sequence([dep("serde", "1.0"), dep("rayon", "1.0")])),
        ]));
        let b = doc(GenericNode::mapping([
            ("tags", GenericNode::scalars(["b", "a"])),
            ("deps", GenericNode::sequence([dep("serde", "1.1"), dep("rayon", "1.0")])),
        ]));
        let outcome = diff_with_stats(&a, &b, DiffConfig::default());
        assert_eq!(outcome.stats.scalar_sequences, 1);
        assert_eq!(outcome.stats.mapping_sequences, 1);
        assert_eq!(outcome.stats.hash_sequences, 0);
        assert!(outcome.stats.mappings_compared >= 2);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_diff_batch_keeps_order() {
        let pairs = vec![
            (scalars(&LIST_A), scalars(&LIST_A)),
            (scalars(&LIST_A), scalars(&["abc", "ghi", "jkl"])),
        ];
        let logs = diff_batch(&pairs, DiffConfig::default());
        assert_eq!(logs.len(), 2);
        assert!(logs[0].is_empty());
        assert_eq!(logs[1].len(), 1);
    }
}
