//! Structured field schema extracted from a plugin's reference docs.

use crate::model::NodeRole;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Array,
    Number,
    Boolean,
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Active (uncommented) declaration in the reference config.
    pub required: bool,
    /// Name suggests a credential; the form masks these.
    pub sensitive: bool,
    pub default: Value,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginFieldSchema {
    pub plugin: String,
    pub role: NodeRole,
    pub description: String,
    pub fields: Vec<FieldSpec>,
}
