//! Change log: the records produced by a structural diff.
//!
//! Entries borrow the parsed nodes they describe, so a `ChangeLog` lives as
//! long as the two input documents and no longer.

use std::fmt;

use crate::node::GenericNode;

// =============================================================================
// ChangeType
// =============================================================================

/// What happened to the node at an entry's path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "yaml", derive(serde::Serialize), serde(rename_all = "kebab-case"))]
pub enum ChangeType {
    /// Placeholder; never leaves the diff engine
    #[default]
    NoChange,
    /// Key or item added
    Added,
    /// Key or item deleted
    Deleted,
    /// Item moved within a sequence
    Moved,
    /// Value modified in place
    Changed,
}

impl ChangeType {
    impl_kind_labels!(
        NoChange => "no-change",
        Added => "added",
        Deleted => "deleted",
        Moved => "moved",
        Changed => "changed",
    );
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// ChangeLogEntry
// =============================================================================

/// One change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeLogEntry<'a> {
    /// Structural path, e.g. `doc.paths.[2].name`
    pub path: String,
    pub change_type: ChangeType,
    /// Node on the old side, when the change has one
    pub from: Option<&'a GenericNode>,
    /// Node on the new side, when the change has one
    pub to: Option<&'a GenericNode>,
    /// Position in the old sequence
    pub from_index: Option<usize>,
    /// Position in the new sequence
    pub to_index: Option<usize>,
}

impl<'a> ChangeLogEntry<'a> {
    fn new(path: String, change_type: ChangeType) -> Self {
        Self {
            path,
            change_type,
            from: None,
            to: None,
            from_index: None,
            to_index: None,
        }
    }

    /// A node that exists only on the new side
    pub fn added(path: String, to: &'a GenericNode, to_index: Option<usize>) -> Self {
        Self {
            to: Some(to),
            to_index,
            ..Self::new(path, ChangeType::Added)
        }
    }

    /// A node that exists only on the old side
    pub fn deleted(path: String, from: &'a GenericNode, from_index: Option<usize>) -> Self {
        Self {
            from: Some(from),
            from_index,
            ..Self::new(path, ChangeType::Deleted)
        }
    }

    /// A node whose content differs between the two sides
    pub fn changed(path: String, from: &'a GenericNode, to: &'a GenericNode) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::new(path, ChangeType::Changed)
        }
    }

    /// A sequence element that changed position only
    pub fn moved(path: String, from_index: usize, to_index: usize) -> Self {
        Self {
            from_index: Some(from_index),
            to_index: Some(to_index),
            ..Self::new(path, ChangeType::Moved)
        }
    }

    /// Attach both nodes to a move record
    pub fn with_nodes(mut self, from: &'a GenericNode, to: &'a GenericNode) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }
}

impl fmt::Display for ChangeLogEntry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.change_type, self.path)?;
        if let (Some(from), Some(to)) = (self.from_index, self.to_index) {
            write!(f, " [{from} -> {to}]")?;
        }
        Ok(())
    }
}

// =============================================================================
// ChangeLog
// =============================================================================

/// Per-type entry counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChangeCounts {
    pub added: usize,
    pub deleted: usize,
    pub moved: usize,
    pub changed: usize,
}

impl ChangeCounts {
    pub fn total(&self) -> usize {
        self.added + self.deleted + self.moved + self.changed
    }
}

/// Ordered collection of change records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct ChangeLog<'a> {
    entries: Vec<ChangeLogEntry<'a>>,
}

impl<'a> ChangeLog<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: ChangeLogEntry<'a>) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeLogEntry<'a>> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[ChangeLogEntry<'a>] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ChangeLogEntry<'a>> {
        self.entries
    }

    /// Drop `NoChange` placeholders
    pub fn prune(&mut self) {
        self.entries.retain(|e| e.change_type != ChangeType::NoChange);
    }

    /// Stable sort by structural path (lexicographic)
    pub fn sort_by_path(&mut self) {
        self.entries.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Consume and return sorted by path
    pub fn sorted(mut self) -> Self {
        self.sort_by_path();
        self
    }

    /// Entries of one change type
    pub fn of_type(&self, change_type: ChangeType) -> impl Iterator<Item = &ChangeLogEntry<'a>> {
        self.entries.iter().filter(move |e| e.change_type == change_type)
    }

    /// Count entries per change type
    pub fn counts(&self) -> ChangeCounts {
        let mut counts = ChangeCounts::default();
        for entry in &self.entries {
            match entry.change_type {
                ChangeType::Added => counts.added += 1,
                ChangeType::Deleted => counts.deleted += 1,
                ChangeType::Moved => counts.moved += 1,
                ChangeType::Changed => counts.changed += 1,
                ChangeType::NoChange => {}
            }
        }
        counts
    }
}

impl<'a> From<Vec<ChangeLogEntry<'a>>> for ChangeLog<'a> {
    fn from(entries: Vec<ChangeLogEntry<'a>>) -> Self {
        Self { entries }
    }
}

impl<'a> FromIterator<ChangeLogEntry<'a>> for ChangeLog<'a> {
    fn from_iter<I: IntoIterator<Item = ChangeLogEntry<'a>>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> Extend<ChangeLogEntry<'a>> for ChangeLog<'a> {
    fn extend<I: IntoIterator<Item = ChangeLogEntry<'a>>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for ChangeLog<'a> {
    type Item = ChangeLogEntry<'a>;
    type IntoIter = std::vec::IntoIter<ChangeLogEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'s, 'a> IntoIterator for &'s ChangeLog<'a> {
    type Item = &'s ChangeLogEntry<'a>;
    type IntoIter = std::slice::Iter<'s, ChangeLogEntry<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
