//! Node types for structural diffing.
//!
//! This module provides the input read model, `GenericNode`, produced by a
//! parser collaborator, and the annotated `HashedTree` the diff engine
//! works on.
//!
//! # Key Features
//!
//! - Five node kinds: Document, Sequence, Mapping, Scalar, Alias
//! - Mappings store children as alternating key/value nodes in source order
//! - Immutable once built; the engine only ever borrows it

mod hashed;

pub use hashed::{HashedNode, HashedTree, MappingOrder, NodeId};

use compact_str::CompactString;

// =============================================================================
// NodeKind
// =============================================================================

/// Node kind, shared by `GenericNode` and `HashedNode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Document root, holding the top-level content
    Document,
    /// Ordered list of values
    Sequence,
    /// Key/value collection
    Mapping,
    /// Leaf value with raw text
    Scalar,
    /// Reference to a shared subtree (never compared)
    Alias,
}

impl NodeKind {
    // Generates is_document(), is_sequence(), is_mapping(), is_scalar(), is_alias()
    impl_kind_predicates!(Document, Sequence, Mapping, Scalar, Alias);

    impl_kind_labels!(
        Document => "document",
        Sequence => "sequence",
        Mapping => "mapping",
        Scalar => "scalar",
        Alias => "alias",
    );

    /// Whether nodes of this kind own children.
    #[inline]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Document | Self::Sequence | Self::Mapping)
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Position
// =============================================================================

/// Source location of a node (1-based line and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

// =============================================================================
// GenericNode
// =============================================================================

/// Parsed document node
///
/// A tagged variant over [`NodeKind`]:
/// - `Document`/`Sequence`: `children` holds the elements in order
/// - `Mapping`: `children` alternates key node, value node, in source order
/// - `Scalar`: `value` holds the raw text, `tag` an optional type hint
/// - `Alias`: no value, no children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenericNode {
    /// Node kind
    pub kind: NodeKind,
    /// Raw scalar text (empty for non-scalars)
    pub value: String,
    /// Scalar type hint from the parser (e.g. `!!int`), not part of the hash
    pub tag: Option<CompactString>,
    /// Ordered children
    pub children: Vec<GenericNode>,
    /// Source position, when the parser knows it
    pub position: Option<Position>,
}

impl GenericNode {
    fn with_kind(kind: NodeKind) -> Self {
        Self {
            kind,
            value: String::new(),
            tag: None,
            children: Vec::new(),
            position: None,
        }
    }

    /// Create a scalar node
    pub fn scalar(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Self::with_kind(NodeKind::Scalar)
        }
    }

    /// Create a sequence node
    pub fn sequence(items: impl IntoIterator<Item = GenericNode>) -> Self {
        Self {
            children: items.into_iter().collect(),
            ..Self::with_kind(NodeKind::Sequence)
        }
    }

    /// Create a sequence of scalars
    pub fn scalars<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::sequence(values.into_iter().map(Self::scalar))
    }

    /// Create a mapping node from `(key, value)` pairs.
    ///
    /// Keys become scalar key nodes interleaved with the values.
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, GenericNode)>) -> Self {
        let mut children = Vec::new();
        for (key, value) in entries {
            children.push(Self::scalar(key));
            children.push(value);
        }
        Self {
            children,
            ..Self::with_kind(NodeKind::Mapping)
        }
    }

    /// Create a document node wrapping optional top-level content
    pub fn document(content: Option<GenericNode>) -> Self {
        Self {
            children: content.into_iter().collect(),
            ..Self::with_kind(NodeKind::Document)
        }
    }

    /// Create an alias node
    pub fn alias() -> Self {
        Self::with_kind(NodeKind::Alias)
    }

    /// Attach a source position
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.position = Some(Position::new(line, column));
        self
    }

    /// Attach a scalar type hint
    pub fn tagged(mut self, tag: impl Into<CompactString>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.kind.is_scalar()
    }

    /// Iterate `(key, value)` pairs of a mapping.
    ///
    /// Yields nothing for other kinds. A trailing key without value is skipped.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &GenericNode)> {
        let pairs = if self.kind.is_mapping() { self.children.as_slice() } else { &[] };
        pairs
            .chunks_exact(2)
            .map(|pair| (pair[0].value.as_str(), &pair[1]))
    }

    /// Look up a mapping value by key (first occurrence)
    pub fn get(&self, key: &str) -> Option<&GenericNode> {
        self.entries().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Count nodes in this subtree, including self
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}
