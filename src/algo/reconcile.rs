//! Reconciliation passes over provisional sequence edits
//!
//! The sequence engine only knows about additions and deletions. These
//! passes reclassify matched add/delete pairs:
//!
//! | Pass | Pairs | Result |
//! |------|-------|--------|
//! | [`merge_updates`] | latest pending add + delete, same identity, different hash | `Changed` |
//! | [`merge_moves`] | delete + add with equal hash | `Moved` |
//! | [`pair_scalar_moves`] | delete + add with equal scalar value | `Moved` |
//!
//! Every pass is two-phase: a scan collects candidates and a removal set,
//! then a filter emits the survivors. Inputs are never mutated.

use tracing::trace;

use crate::node::{HashedTree, NodeId, NodeKind};

// =============================================================================
// Types
// =============================================================================

/// Provisional change between two sibling lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqChange {
    /// Old child at `from_idx` has no counterpart
    Deleted { from: NodeId, from_idx: usize },
    /// New child at `to_idx` has no counterpart
    Added { to: NodeId, to_idx: usize },
    /// Same logical item, different content
    Changed { from: NodeId, to: NodeId },
    /// Same content, different position
    Moved {
        from: NodeId,
        to: NodeId,
        from_idx: usize,
        to_idx: usize,
    },
}

impl SeqChange {
    #[inline]
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    #[inline]
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added { .. })
    }
}

/// How added scalars find their deleted counterpart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MovePairing {
    /// First unconsumed deletion in edit order
    #[default]
    FirstMatch,
    /// Unconsumed deletion with the closest index; ties go to the lower index
    Nearest,
}

// =============================================================================
// Identity
// =============================================================================

/// Whether two nodes look like the same logical item
///
/// - different kinds: never
/// - scalars: always (a scalar in the same slot is the same item)
/// - mappings: both empty, or equal first-entry hash
/// - anything else: full hash equality
pub fn same_identity(old: &HashedTree<'_>, from: NodeId, new: &HashedTree<'_>, to: NodeId) -> bool {
    let (a, b) = (old.node(from), new.node(to));
    if a.kind != b.kind {
        return false;
    }
    if a.kind == NodeKind::Scalar {
        return true;
    }
    if a.kind == NodeKind::Mapping {
        match (a.children.is_empty(), b.children.is_empty()) {
            (true, true) => return true,
            (false, false) => return old.first_child_hash(from) == new.first_child_hash(to),
            _ => {}
        }
    }
    a.hash == b.hash
}

// =============================================================================
// Update Merge
// =============================================================================

/// Merge adjacent add/delete pairs of the same item into `Changed`
///
/// Scans in order tracking the latest pending `Added` and `Deleted`. When
/// both are pending and they share identity but not content, the pair
/// becomes `Changed` and both slots reset. Output: `Changed` entries in
/// discovery order, then every unconsumed input entry in input order.
pub fn merge_updates(changes: &[SeqChange], old: &HashedTree<'_>, new: &HashedTree<'_>) -> Vec<SeqChange> {
    let mut merged = Vec::new();
    let mut removed = vec![false; changes.len()];
    let mut pending_add: Option<usize> = None;
    let mut pending_del: Option<usize> = None;

    for (i, change) in changes.iter().enumerate() {
        match change {
            SeqChange::Added { .. } => pending_add = Some(i),
            SeqChange::Deleted { .. } => pending_del = Some(i),
            _ => continue,
        }
        let (Some(add_i), Some(del_i)) = (pending_add, pending_del) else {
            continue;
        };
        let (SeqChange::Added { to, .. }, SeqChange::Deleted { from, .. }) = (changes[add_i], changes[del_i]) else {
            continue;
        };
        if same_identity(old, from, new, to) && old.hash(from) != new.hash(to) {
            merged.push(SeqChange::Changed { from, to });
            removed[add_i] = true;
            removed[del_i] = true;
            pending_add = None;
            pending_del = None;
        }
    }

    trace!(changed = merged.len(), survivors = changes.len() - 2 * merged.len(), "update merge");
    merged.extend(survivors(changes, &removed));
    merged
}

// =============================================================================
// Move Merge
// =============================================================================

/// Pair deletions and additions with equal content hashes into `Moved`
///
/// Each deletion, in order, takes the first unconsumed addition whose hash
/// matches. Nodes without a hash never pair. Output: `Moved` entries first,
/// then every unconsumed input entry in input order.
pub fn merge_moves(changes: &[SeqChange], old: &HashedTree<'_>, new: &HashedTree<'_>) -> Vec<SeqChange> {
    let mut merged = Vec::new();
    let mut removed = vec![false; changes.len()];

    for (del_i, change) in changes.iter().enumerate() {
        let SeqChange::Deleted { from, from_idx } = *change else {
            continue;
        };
        let Some(hash) = old.hash(from) else {
            continue;
        };
        let found = changes.iter().enumerate().find_map(|(add_i, candidate)| match *candidate {
            SeqChange::Added { to, to_idx } if !removed[add_i] && new.hash(to) == Some(hash) => {
                Some((add_i, to, to_idx))
            }
            _ => None,
        });
        if let Some((add_i, to, to_idx)) = found {
            merged.push(SeqChange::Moved {
                from,
                to,
                from_idx,
                to_idx,
            });
            removed[add_i] = true;
            removed[del_i] = true;
        }
    }

    trace!(moved = merged.len(), survivors = changes.len() - 2 * merged.len(), "move merge");
    merged.extend(survivors(changes, &removed));
    merged
}

// =============================================================================
// Scalar Move Pairing
// =============================================================================

/// Pair each addition with a deletion of equal value into `Moved`
///
/// Additions are visited in order; each deletion is consumed at most once.
/// The `Moved` entry takes the addition's slot and the deletion is dropped,
/// so unrelated entries keep their relative order.
pub fn pair_scalar_moves<F>(changes: &[SeqChange], same_value: F, pairing: MovePairing) -> Vec<SeqChange>
where
    F: Fn(NodeId, NodeId) -> bool,
{
    let mut out: Vec<Option<SeqChange>> = changes.iter().copied().map(Some).collect();

    for (add_i, change) in changes.iter().enumerate() {
        let SeqChange::Added { to, to_idx } = *change else {
            continue;
        };
        let candidates = out.iter().enumerate().filter_map(|(del_i, slot)| match *slot {
            Some(SeqChange::Deleted { from, from_idx }) if same_value(from, to) => Some((del_i, from, from_idx)),
            _ => None,
        });
        let chosen = match pairing {
            MovePairing::FirstMatch => candidates.min_by_key(|c| c.0),
            MovePairing::Nearest => candidates.min_by_key(|&(_, _, from_idx)| (from_idx.abs_diff(to_idx), from_idx)),
        };
        if let Some((del_i, from, from_idx)) = chosen {
            out[del_i] = None;
            out[add_i] = Some(SeqChange::Moved {
                from,
                to,
                from_idx,
                to_idx,
            });
        }
    }

    let paired: Vec<SeqChange> = out.into_iter().flatten().collect();
    trace!(moved = changes.len() - paired.len(), survivors = paired.len(), "scalar move pairing");
    paired
}

#[inline]
fn survivors<'c>(changes: &'c [SeqChange], removed: &'c [bool]) -> impl Iterator<Item = SeqChange> + 'c {
    changes
        .iter()
        .zip(removed)
        .filter(|(_, gone)| !**gone)
        .map(|(change, _)| *change)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::GenericNode;

    fn seq_doc(items: Vec<GenericNode>) -> GenericNode {
        GenericNode::document(Some(GenericNode::sequence(items)))
    }

    /// Ids of the sequence items of a `seq_doc`
    fn items(tree: &HashedTree<'_>) -> Vec<NodeId> {
        let seq = tree.children(tree.root())[0];
        tree.children(seq).to_vec()
    }

    fn item(name: &str, version: &str) -> GenericNode {
        GenericNode::mapping([("name", GenericNode::scalar(name)), ("version", GenericNode::scalar(version))])
    }

    #[test]
    fn test_same_identity_rules() {
        let a = seq_doc(vec![
            item("serde", "1.0"),
            GenericNode::scalar("x"),
            GenericNode::mapping::<&str>([]),
            GenericNode::scalars(["a"]),
        ]);
        let b = seq_doc(vec![
            item("serde", "2.0"),
            GenericNode::scalar("y"),
            GenericNode::mapping::<&str>([]),
            GenericNode::scalars(["b"]),
        ]);
        let (ta, tb) = (HashedTree::build(&a), HashedTree::build(&b));
        let (ia, ib) = (items(&ta), items(&tb));

        // First entry hash matches
        assert!(same_identity(&ta, ia[0], &tb, ib[0]));
        // Scalars always match
        assert!(same_identity(&ta, ia[1], &tb, ib[1]));
        // Empty mappings
        assert!(same_identity(&ta, ia[2], &tb, ib[2]));
        // Sequences need equal hashes
        assert!(!same_identity(&ta, ia[3], &tb, ib[3]));
        // Kind mismatch
        assert!(!same_identity(&ta, ia[0], &tb, ib[1]));
    }

    #[test]
    fn test_merge_updates_pairs_same_identity() {
        let a = seq_doc(vec![item("serde", "1.0"), item("tokio", "1.0")]);
        let b = seq_doc(vec![item("serde", "2.0"), item("tokio", "1.0")]);
        let (ta, tb) = (HashedTree::build(&a), HashedTree::build(&b));
        let (ia, ib) = (items(&ta), items(&tb));

        let changes = [
            SeqChange::Deleted { from: ia[0], from_idx: 0 },
            SeqChange::Added { to: ib[0], to_idx: 0 },
        ];
        let merged = merge_updates(&changes, &ta, &tb);
        assert_eq!(merged, [SeqChange::Changed { from: ia[0], to: ib[0] }]);
    }

    #[test]
    fn test_merge_updates_keeps_unrelated_pairs() {
        let a = seq_doc(vec![item("serde", "1.0"), item("tokio", "1.0")]);
        let b = seq_doc(vec![item("rayon", "1.0"), item("tokio", "1.0")]);
        let (ta, tb) = (HashedTree::build(&a), HashedTree::build(&b));
        let (ia, ib) = (items(&ta), items(&tb));

        let changes = [
            SeqChange::Deleted { from: ia[0], from_idx: 0 },
            SeqChange::Added { to: ib[0], to_idx: 0 },
        ];
        assert_eq!(merge_updates(&changes, &ta, &tb), changes);
    }

    #[test]
    fn test_merge_moves_pairs_equal_hashes_once() {
        let a = seq_doc(vec![GenericNode::scalars(["a"]), GenericNode::scalars(["b"])]);
        let b = seq_doc(vec![
            GenericNode::scalars(["b"]),
            GenericNode::scalars(["a"]),
            GenericNode::scalars(["a"]),
        ]);
        let (ta, tb) = (HashedTree::build(&a), HashedTree::build(&b));
        let (ia, ib) = (items(&ta), items(&tb));

        let changes = [
            SeqChange::Deleted { from: ia[0], from_idx: 0 },
            SeqChange::Added { to: ib[1], to_idx: 1 },
            SeqChange::Added { to: ib[2], to_idx: 2 },
        ];
        let merged = merge_moves(&changes, &ta, &tb);
        assert_eq!(
            merged,
            [
                SeqChange::Moved {
                    from: ia[0],
                    to: ib[1],
                    from_idx: 0,
                    to_idx: 1
                },
                SeqChange::Added { to: ib[2], to_idx: 2 },
            ]
        );
    }

    #[test]
    fn test_merge_moves_skips_unhashed() {
        let a = seq_doc(vec![GenericNode::alias(), GenericNode::scalars(["x"])]);
        let b = seq_doc(vec![GenericNode::scalars(["x"]), GenericNode::alias()]);
        let (ta, tb) = (HashedTree::build(&a), HashedTree::build(&b));
        let (ia, ib) = (items(&ta), items(&tb));

        let changes = [
            SeqChange::Deleted { from: ia[0], from_idx: 0 },
            SeqChange::Added { to: ib[1], to_idx: 1 },
        ];
        assert_eq!(merge_moves(&changes, &ta, &tb), changes);
    }

    /// Distinct ids for pairing tests, which never look at node content
    fn ids(n: usize) -> Vec<NodeId> {
        let doc = GenericNode::scalars((0..n).map(|i| i.to_string()));
        let tree = HashedTree::build(&doc);
        tree.children(tree.root()).to_vec()
    }

    #[test]
    fn test_pair_scalar_moves_tie_breaks() {
        // old: [x, a, x]  new: [a, b, x]
        let id = ids(3);
        let changes = [
            SeqChange::Deleted { from: id[0], from_idx: 0 },
            SeqChange::Deleted { from: id[1], from_idx: 2 },
            SeqChange::Added { to: id[2], to_idx: 2 },
        ];
        let same = |_: NodeId, _: NodeId| true;

        let merged = pair_scalar_moves(&changes, same, MovePairing::FirstMatch);
        assert_eq!(
            merged,
            [
                SeqChange::Deleted { from: id[1], from_idx: 2 },
                SeqChange::Moved {
                    from: id[0],
                    to: id[2],
                    from_idx: 0,
                    to_idx: 2
                },
            ]
        );

        let merged = pair_scalar_moves(&changes, same, MovePairing::Nearest);
        assert_eq!(
            merged,
            [
                SeqChange::Deleted { from: id[0], from_idx: 0 },
                SeqChange::Moved {
                    from: id[1],
                    to: id[2],
                    from_idx: 2,
                    to_idx: 2
                },
            ]
        );
    }

    #[test]
    fn test_pair_scalar_moves_respects_value() {
        let id = ids(2);
        let changes = [
            SeqChange::Deleted { from: id[0], from_idx: 0 },
            SeqChange::Added { to: id[1], to_idx: 1 },
        ];
        assert_eq!(pair_scalar_moves(&changes, |_, _| false, MovePairing::Nearest), changes);
    }

    #[test]
    fn test_pair_scalar_moves_consumes_each_deletion_once() {
        let id = ids(3);
        let changes = [
            SeqChange::Deleted { from: id[0], from_idx: 0 },
            SeqChange::Added { to: id[1], to_idx: 3 },
            SeqChange::Added { to: id[2], to_idx: 4 },
        ];
        let merged = pair_scalar_moves(&changes, |_, _| true, MovePairing::FirstMatch);
        assert_eq!(
            merged,
            [
                SeqChange::Moved {
                    from: id[0],
                    to: id[1],
                    from_idx: 0,
                    to_idx: 3
                },
                SeqChange::Added { to: id[2], to_idx: 4 },
            ]
        );
    }
}
