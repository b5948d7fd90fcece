//! Change report serialization
//!
//! Turns a raw change log into the YAML report the CLI prints.
//!
//! # Flow
//!
//! ```text
//! ChangeLog (engine order, full nodes)
//!     │
//!     ▼ prepare()    drop no-change, trim node payloads, sort by path
//! Vec<ReportEntry>
//!     │
//!     ▼ write_changes() / render_changes()
//! YAML sequence
//! ```
//!
//! # Payload Rules
//!
//! | Type | `from` | `to` |
//! |------|--------|------|
//! | deleted | kept for scalars only | - |
//! | added | - | kept for scalars only |
//! | moved | dropped | dropped |
//! | changed | kept | kept |

use std::io::Write;

use serde::Serialize;
use serde_yaml::Value;

use crate::change::{ChangeLogEntry, ChangeType};
use crate::convert::to_yaml_value;
use crate::error::{DiffError, DiffResult};
use crate::node::{GenericNode, Position};

/// One serialized report row
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReportEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
}

impl ReportEntry {
    fn from_entry(entry: &ChangeLogEntry<'_>) -> Self {
        let (from, to) = match entry.change_type {
            ChangeType::Deleted => (scalar_only(entry.from), None),
            ChangeType::Added => (None, scalar_only(entry.to)),
            ChangeType::Moved | ChangeType::NoChange => (None, None),
            ChangeType::Changed => (entry.from.map(to_yaml_value), entry.to.map(to_yaml_value)),
        };
        // Report where the surviving side of the change sits
        let position: Option<Position> = match entry.change_type {
            ChangeType::Deleted => entry.from.and_then(|n| n.position),
            _ => entry.to.or(entry.from).and_then(|n| n.position),
        };

        Self {
            path: entry.path.clone(),
            change_type: entry.change_type,
            from,
            to,
            from_index: entry.from_index,
            to_index: entry.to_index,
            line: position.map(|p| p.line),
            column: position.map(|p| p.column),
        }
    }
}

fn scalar_only(node: Option<&GenericNode>) -> Option<Value> {
    node.filter(|n| n.is_scalar()).map(to_yaml_value)
}

/// Filter and sort entries for reporting
///
/// Drops `NoChange`, trims node payloads per change type and sorts by path
/// (stable, so equal paths keep engine order).
pub fn prepare<'e, 'a: 'e>(entries: impl IntoIterator<Item = &'e ChangeLogEntry<'a>>) -> Vec<ReportEntry> {
    let mut report: Vec<ReportEntry> = entries
        .into_iter()
        .filter(|e| e.change_type != ChangeType::NoChange)
        .map(ReportEntry::from_entry)
        .collect();
    report.sort_by(|a, b| a.path.cmp(&b.path));
    report
}

/// Write the report for `entries` as a YAML sequence
pub fn write_changes<'e, 'a: 'e, W: Write>(
    entries: impl IntoIterator<Item = &'e ChangeLogEntry<'a>>,
    writer: W,
) -> DiffResult<()> {
    let report = prepare(entries);
    serde_yaml::to_writer(writer, &report).map_err(DiffError::serialize)
}

/// Render the report for `entries` to a string
pub fn render_changes<'e, 'a: 'e>(entries: impl IntoIterator<Item = &'e ChangeLogEntry<'a>>) -> DiffResult<String> {
    let report = prepare(entries);
    serde_yaml::to_string(&report).map_err(DiffError::serialize)
}
