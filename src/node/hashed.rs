//! Hashed tree: content fingerprints plus positional keys
//!
//! Wraps a `GenericNode` tree into an arena of `HashedNode`s. Every node
//! carries a content hash, the key identifying it inside its parent and the
//! id of its parent, so structural paths can be rebuilt in O(depth).
//!
//! # Ownership
//!
//! ```text
//! HashedTree
//!   └── nodes: Vec<HashedNode>   (arena, sole owner)
//!         ├── children: [NodeId]  (downward, owned through the arena)
//!         └── parent: NodeId      (upward, plain index)
//! ```
//!
//! Parent links are indices, never a second owner, so there are no cycles.
//!
//! # Keys
//!
//! - Document/Sequence children: `"[i]"`
//! - Mapping values: the key node's text (key nodes themselves are dropped)
//! - Root: empty

use compact_str::{CompactString, format_compact};
use smallvec::SmallVec;

use crate::hash::{ContentHash, StableHasher};

use super::{GenericNode, NodeKind};

// =============================================================================
// MappingOrder
// =============================================================================

/// How mapping hashes treat entry order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingOrder {
    /// Entries are hashed in document order: reordering keys changes the hash
    #[default]
    Ordered,
    /// Entries are hashed sorted by key: reordering keys alone is not a change
    Unordered,
}

// =============================================================================
// NodeId
// =============================================================================

/// Index of a node inside its `HashedTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// HashedNode
// =============================================================================

/// Annotated node
#[derive(Debug, Clone)]
pub struct HashedNode<'a> {
    /// Mirrors the source node kind
    pub kind: NodeKind,
    /// Identity within the parent (`"[i]"`, mapping key, or empty)
    pub key: CompactString,
    /// Content fingerprint; `None` for aliases
    pub hash: Option<ContentHash>,
    /// Child ids, in source order
    pub children: SmallVec<[NodeId; 8]>,
    /// Parent id, `None` for the root
    pub parent: Option<NodeId>,
    /// The parsed node this wraps
    pub source: &'a GenericNode,
}

impl HashedNode<'_> {
    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.kind.is_scalar()
    }

    /// Raw scalar text, `None` for other kinds
    #[inline]
    pub fn value(&self) -> Option<&str> {
        self.kind.is_scalar().then_some(self.source.value.as_str())
    }
}

// =============================================================================
// HashedTree
// =============================================================================

/// Arena of hashed nodes built from one parsed document
#[derive(Debug, Clone)]
pub struct HashedTree<'a> {
    nodes: Vec<HashedNode<'a>>,
    /// Depth of the first node that appears in paths (2 under a Document)
    path_depth: usize,
}

impl<'a> HashedTree<'a> {
    /// Build with document-order mapping hashes
    pub fn build(root: &'a GenericNode) -> Self {
        Self::build_with(root, MappingOrder::default())
    }

    /// Build with an explicit mapping hash order
    pub fn build_with(root: &'a GenericNode, order: MappingOrder) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(root.node_count()),
            // Neither the Document nor its top-level content appear in paths
            path_depth: if root.kind.is_document() { 2 } else { 1 },
        };
        tree.insert(root, CompactString::default(), None, order);
        tree
    }

    fn insert(
        &mut self,
        source: &'a GenericNode,
        key: CompactString,
        parent: Option<NodeId>,
        order: MappingOrder,
    ) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(HashedNode {
            kind: source.kind,
            key,
            hash: None,
            children: SmallVec::new(),
            parent,
            source,
        });

        let hash = match source.kind {
            NodeKind::Scalar => Some(ContentHash::of_scalar(&source.value)),
            // Not supported: no hash, no children
            NodeKind::Alias => None,
            NodeKind::Document | NodeKind::Sequence => {
                let mut children: SmallVec<[NodeId; 8]> = SmallVec::with_capacity(source.children.len());
                for (i, child) in source.children.iter().enumerate() {
                    children.push(self.insert(child, format_compact!("[{i}]"), Some(id), order));
                }
                let hash = ContentHash::of_children(source.kind, children.iter().filter_map(|c| self.hash(*c)));
                self.nodes[id.index()].children = children;
                Some(hash)
            }
            NodeKind::Mapping => {
                let mut children: SmallVec<[NodeId; 8]> = SmallVec::with_capacity(source.children.len() / 2);
                for (key, value) in source.entries() {
                    children.push(self.insert(value, CompactString::from(key), Some(id), order));
                }
                let hash = self.mapping_hash(&children, order);
                self.nodes[id.index()].children = children;
                Some(hash)
            }
        };
        self.nodes[id.index()].hash = hash;
        id
    }

    /// Mapping entries hash as `hash(key) ‖ hash(value)` so renamed keys differ
    fn mapping_hash(&self, children: &[NodeId], order: MappingOrder) -> ContentHash {
        let mut entries: Vec<(&str, ContentHash)> = children
            .iter()
            .filter_map(|&c| self.hash(c).map(|h| (self.node(c).key.as_str(), h)))
            .collect();
        if order == MappingOrder::Unordered {
            entries.sort_by(|a, b| a.0.cmp(b.0).then(a.1.cmp(&b.1)));
        }
        entries
            .into_iter()
            .fold(StableHasher::for_kind(NodeKind::Mapping), |h, (key, value)| {
                h.update(ContentHash::of_scalar(key).as_bytes())
                    .update(value.as_bytes())
            })
            .finish_hash()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Root node id
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Get a node by id
    #[inline]
    pub fn node(&self, id: NodeId) -> &HashedNode<'a> {
        &self.nodes[id.index()]
    }

    /// Content hash of a node
    #[inline]
    pub fn hash(&self, id: NodeId) -> Option<ContentHash> {
        self.nodes[id.index()].hash
    }

    /// Child ids of a node
    #[inline]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    /// Hash of the first child, if any
    pub fn first_child_hash(&self, id: NodeId) -> Option<ContentHash> {
        self.children(id).first().and_then(|c| self.hash(*c))
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Root content hash
    pub fn root_hash(&self) -> Option<ContentHash> {
        self.hash(self.root())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Paths
    // ─────────────────────────────────────────────────────────────────────────

    /// Number of ancestors of `id`
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.node(id).parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.node(parent).parent;
        }
        depth
    }

    /// Structural path of a node: `doc` followed by the keys from the
    /// top-level content down to `id`, joined with `.`
    pub fn path(&self, id: NodeId) -> String {
        let mut keys: SmallVec<[&str; 16]> = SmallVec::new();
        let mut current = Some(id);
        let mut depth = self.depth(id);
        while let Some(node_id) = current {
            if depth < self.path_depth {
                break;
            }
            let node = self.node(node_id);
            keys.push(node.key.as_str());
            current = node.parent;
            depth -= 1;
        }

        let mut path = String::from("doc");
        for key in keys.iter().rev() {
            path.push('.');
            path.push_str(key);
        }
        path
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// Depth-first pre-order walk. Returns `false` if the visitor stopped it.
    pub fn walk<F>(&self, mut visitor: F) -> bool
    where
        F: FnMut(NodeId, &HashedNode<'a>) -> bool,
    {
        self.walk_from(self.root(), &mut visitor)
    }

    fn walk_from<F>(&self, id: NodeId, visitor: &mut F) -> bool
    where
        F: FnMut(NodeId, &HashedNode<'a>) -> bool,
    {
        if !visitor(id, self.node(id)) {
            return false;
        }
        self.children(id).iter().all(|&child| self.walk_from(child, visitor))
    }

    /// Paths of all childless nodes, in document order
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        self.walk(|id, node| {
            if node.children.is_empty() {
                paths.push(self.path(id));
            }
            true
        });
        paths
    }
}
