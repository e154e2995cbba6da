//! Plugin reference parsing: README text -> structured field schema.
//!
//! Feeds the generic settings form; the compiler never reads these schemas,
//! only the settings mappings the form produces.

pub mod fields;
pub mod parse;

pub use fields::{FieldSpec, FieldType, PluginFieldSchema};
pub use parse::{extract_config_block, parse};
