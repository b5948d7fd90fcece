//! Source format converters to `GenericNode`
//!
//! This module provides parsers from document formats to the generic tree
//! the diff engine reads. Each converter is feature-gated and lives in its
//! own submodule.
//!
//! # Supported Formats
//!
//! | Format | Feature | Module | Function |
//! |--------|---------|--------|----------|
//! | YAML | `yaml` | [`yaml`] | [`from_yaml_str()`], [`from_yaml_file()`] |
//!
//! A converter only needs to produce a `Document` node whose mappings
//! interleave key and value children, with scalars holding their source
//! text; hashing and diffing handle the rest.

// =============================================================================
// YAML converter
// =============================================================================

#[cfg(feature = "yaml")]
pub mod yaml;

#[cfg(feature = "yaml")]
pub use self::yaml::{from_yaml_file, from_yaml_str, to_yaml_value};
