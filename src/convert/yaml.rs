//! Conversion between YAML and `GenericNode`
//!
//! Parsing is event driven (`yaml-rust2`), so every scalar keeps the text it
//! was written with (`1.10` stays `1.10`, `0x1F` stays `0x1F`) and every node
//! carries its source position. Anchors are resolved on the fly, so the
//! `Alias` kind never comes out of here.
//!
//! # Flow
//!
//! ```text
//! YAML text
//!     │
//!     ▼ Parser (first document of the stream)
//! Event + Marker
//!     │
//!     ▼ Converter
//! GenericNode::Document
//! ```
//!
//! Scalars also get a core-schema tag (`!!str`, `!!int`, `!!float`,
//! `!!bool`, `!!null`) so [`to_yaml_value`] can give a report its types back.
//! The tag never takes part in hashing.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde_yaml::{Mapping, Value};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::error::{DiffError, DiffResult};
use crate::node::{GenericNode, NodeKind};

pub const TAG_STR: &str = "!!str";
pub const TAG_INT: &str = "!!int";
pub const TAG_FLOAT: &str = "!!float";
pub const TAG_BOOL: &str = "!!bool";
pub const TAG_NULL: &str = "!!null";

/// Anchor id the parser uses for nodes without an anchor
const NO_ANCHOR: usize = 0;

// =============================================================================
// Public API
// =============================================================================

/// Parse YAML text into a Document node
///
/// `origin` labels the input in error messages. Only the first document of
/// a multi-document stream is kept; empty input yields an empty Document.
pub fn from_yaml_str(text: &str, origin: &str) -> DiffResult<GenericNode> {
    let mut converter = Converter::default();
    Parser::new(text.chars())
        .load(&mut converter, false)
        .map_err(|e| DiffError::parse(origin, e))?;
    Ok(GenericNode::document(converter.content))
}

/// Read and parse a YAML file into a Document node
pub fn from_yaml_file(path: impl AsRef<Path>) -> DiffResult<GenericNode> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| DiffError::io(path, e))?;
    from_yaml_str(&text, &path.display().to_string())
}

/// Convert a node back into a typed YAML value
///
/// Scalars are typed by their tag when the typed value prints back as the
/// same text, otherwise they stay strings. Documents unwrap to their
/// content, aliases become `null`.
pub fn to_yaml_value(node: &GenericNode) -> Value {
    match node.kind {
        NodeKind::Scalar => typed_scalar(node),
        NodeKind::Sequence => Value::Sequence(node.children.iter().map(to_yaml_value).collect()),
        NodeKind::Mapping => {
            let mut mapping = Mapping::with_capacity(node.children.len() / 2);
            for pair in node.children.chunks_exact(2) {
                mapping.insert(to_yaml_value(&pair[0]), to_yaml_value(&pair[1]));
            }
            Value::Mapping(mapping)
        }
        NodeKind::Document => node.children.first().map(to_yaml_value).unwrap_or(Value::Null),
        NodeKind::Alias => Value::Null,
    }
}

// =============================================================================
// Converter
// =============================================================================

/// Builds the node tree from parser events
#[derive(Default)]
struct Converter {
    /// Open collections with their anchor ids
    open: Vec<(GenericNode, usize)>,
    /// Finished anchored nodes, cloned on every alias
    anchors: FxHashMap<usize, GenericNode>,
    /// Top-level content of the first document
    content: Option<GenericNode>,
}

impl MarkedEventReceiver for Converter {
    fn on_event(&mut self, event: Event, mark: Marker) {
        match event {
            Event::Scalar(value, style, anchor, tag) => {
                let core = tag.as_ref().and_then(|t| core_tag(&t.handle, &t.suffix));
                let tag = core.unwrap_or_else(|| resolve_tag(&value, style));
                let node = GenericNode::scalar(value).tagged(tag);
                self.close(at(node, mark), anchor);
            }
            Event::SequenceStart(anchor, ..) => self.open.push((at(GenericNode::sequence([]), mark), anchor)),
            Event::MappingStart(anchor, ..) => {
                self.open.push((at(GenericNode::mapping::<String>([]), mark), anchor));
            }
            Event::SequenceEnd | Event::MappingEnd => {
                if let Some((node, anchor)) = self.open.pop() {
                    self.close(node, anchor);
                }
            }
            Event::Alias(anchor) => {
                let node = self.anchors.get(&anchor).cloned().unwrap_or_else(GenericNode::alias);
                self.close(node, NO_ANCHOR);
            }
            _ => {}
        }
    }
}

impl Converter {
    /// Attach a finished node to the innermost open collection
    fn close(&mut self, node: GenericNode, anchor: usize) {
        if anchor != NO_ANCHOR {
            self.anchors.insert(anchor, node.clone());
        }
        match self.open.last_mut() {
            Some((parent, _)) => {
                let is_key = parent.kind == NodeKind::Mapping && parent.children.len() % 2 == 0;
                let node = if is_key { flatten_key(node) } else { node };
                parent.children.push(node);
            }
            None => {
                if self.content.is_none() {
                    self.content = Some(node);
                }
            }
        }
    }
}

fn at(node: GenericNode, mark: Marker) -> GenericNode {
    // Marker lines are 1-based, columns 0-based
    node.at(mark.line() as u32, mark.col() as u32 + 1)
}

/// Mapping keys must be scalars; complex keys are flattened to YAML text
fn flatten_key(key: GenericNode) -> GenericNode {
    if key.is_scalar() {
        return key;
    }
    let text = serde_yaml::to_string(&to_yaml_value(&key)).unwrap_or_default();
    let flat = GenericNode::scalar(text.trim_end()).tagged(TAG_STR);
    match key.position {
        Some(p) => flat.at(p.line, p.column),
        None => flat,
    }
}

/// Explicit `!!str`, `!!int`, ... tags; custom tags carry no meaning here
fn core_tag(handle: &str, suffix: &str) -> Option<&'static str> {
    if handle != "!!" && handle != "tag:yaml.org,2002:" {
        return None;
    }
    match suffix {
        "str" => Some(TAG_STR),
        "int" => Some(TAG_INT),
        "float" => Some(TAG_FLOAT),
        "bool" => Some(TAG_BOOL),
        "null" => Some(TAG_NULL),
        _ => None,
    }
}

/// Core-schema type of an untagged scalar
fn resolve_tag(value: &str, style: TScalarStyle) -> &'static str {
    if !matches!(style, TScalarStyle::Plain) {
        return TAG_STR;
    }
    match serde_yaml::from_str::<Value>(value) {
        Ok(Value::Null) => TAG_NULL,
        Ok(Value::Bool(_)) => TAG_BOOL,
        Ok(Value::Number(n)) if n.is_f64() => TAG_FLOAT,
        Ok(Value::Number(_)) => TAG_INT,
        _ => TAG_STR,
    }
}

/// Rebuild a typed YAML scalar from node text and tag
fn typed_scalar(node: &GenericNode) -> Value {
    let text = node.value.as_str();
    let typed = match node.tag.as_deref() {
        Some(TAG_NULL) => return Value::Null,
        Some(TAG_BOOL) | Some(TAG_INT) | Some(TAG_FLOAT) => serde_yaml::from_str::<Value>(text).ok(),
        _ => None,
    };
    match typed {
        Some(value @ Value::Bool(_)) if text.parse::<bool>().is_ok() => value,
        Some(Value::Number(n)) if n.to_string() == text => Value::Number(n),
        _ => Value::String(text.into()),
    }
}
