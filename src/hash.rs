//! Deterministic content hashing for hashed trees
//!
//! Provides cross-process deterministic fingerprints using blake3.
//!
//! - **Scalars**: `blake3(kind tag ‖ raw value bytes)`
//! - **Composites**: `blake3(kind tag ‖ child_hash_0 ‖ child_hash_1 ‖ …)` in child order
//!
//! The leading kind tag keeps `''`, `[]` and `{}` apart. Equal digests mean
//! structurally identical subtrees, wherever they sit.

use std::fmt;

use crate::node::NodeKind;

// =============================================================================
// ContentHash
// =============================================================================

/// Structural fingerprint of a subtree
///
/// # Memory Layout
///
/// - 32 bytes (full blake3 digest)
/// - Copy, no heap allocation
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[must_use]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    /// Get the raw digest bytes
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hash a scalar's raw value.
    #[inline]
    pub fn of_scalar(value: &str) -> Self {
        StableHasher::for_kind(NodeKind::Scalar).update_str(value).finish_hash()
    }

    /// Hash an ordered list of child digests under a composite kind.
    pub fn of_children(kind: NodeKind, children: impl IntoIterator<Item = ContentHash>) -> Self {
        children
            .into_iter()
            .fold(StableHasher::for_kind(kind), |h, child| h.update(child.as_bytes()))
            .finish_hash()
    }

    /// Lowercase hex of the first 8 bytes, for logs.
    pub fn short(&self) -> String {
        self.0[..8].iter().map(|b| format!("{b:02x}")).collect()
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.short())
    }
}

// =============================================================================
// StableHasher - Builder Pattern
// =============================================================================

/// A deterministic hasher using blake3
///
/// Unlike `std::hash::Hasher`, this produces the same output across
/// process restarts for the same input.
pub struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    /// Create a new StableHasher
    #[inline]
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    /// Create a hasher seeded with the tag of `kind`
    #[inline]
    pub fn for_kind(kind: NodeKind) -> Self {
        Self::new().update(&[kind_tag(kind)])
    }

    /// Update with raw bytes
    #[inline]
    pub fn update(mut self, data: &[u8]) -> Self {
        self.inner.update(data);
        self
    }

    /// Update with a string
    #[inline]
    pub fn update_str(self, s: &str) -> Self {
        self.update(s.as_bytes())
    }

    /// Finish and return the full digest
    #[inline]
    pub fn finish_hash(self) -> ContentHash {
        ContentHash(*self.inner.finalize().as_bytes())
    }
}

impl Default for StableHasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Domain separator byte per kind, fixed across releases
const fn kind_tag(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::Document => 1,
        NodeKind::Sequence => 2,
        NodeKind::Mapping => 3,
        NodeKind::Scalar => 4,
        NodeKind::Alias => 5,
    }
}
