//! Pipeline aggregate: nodes, edges, agent settings, secret store.
//!
//! Wire shape (the persisted JSON blob):
//! {
//!   "id": "...", "name": "...",
//!   "agent": { "interval": "10s", ... },
//!   "nodes": [
//!     { "id": "cpu1", "type": "input", "plugin": "cpu",
//!       "position": { "x": 100, "y": 100 },
//!       "data": { "percpu": true, ... } }
//!   ],
//!   "connections": [
//!     { "id": "cpu1-conv1", "source": "cpu1", "target": "conv1",
//!       "filters": { "namepass": ["cpu"] } }
//!   ],
//!   "secretStore": { "plugin": "os", "config": {}, "secrets": {} }
//! }
//!
//! Older blobs carry a plural `secretStores` array of `{id, type, data}`
//! entries instead of the singular `secretStore`; [`Pipeline::from_json`]
//! upgrades that form once at load so the rest of the crate never sees it.

use crate::error::StructuralError;
use crate::model::agent::AgentSettings;
use crate::model::secret::{LegacySecretStore, SecretStore};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Ordered field-name → value mapping for plugin settings. Values are the
/// tagged union string | number | boolean | array | object; insertion order
/// is preserved (serde_json with `preserve_order`) so the compiler emits
/// fields in the order the editor stored them.
pub type Settings = serde_json::Map<String, serde_json::Value>;

/// Reserved settings key holding a namepass-style filter list, either
/// user-supplied or synthesized by filter inheritance.
pub const NAMEPASS_KEY: &str = "namepass";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    Input,
    Processor,
    Aggregator,
    Serializer,
    Output,
}

impl NodeRole {
    /// Section grouping order in the compiled document.
    pub const SECTION_ORDER: [NodeRole; 5] = [
        NodeRole::Input,
        NodeRole::Processor,
        NodeRole::Aggregator,
        NodeRole::Serializer,
        NodeRole::Output,
    ];

    /// Plural section prefix, e.g. `input` -> `inputs` in `[[inputs.cpu]]`.
    pub fn section(&self) -> &'static str {
        match self {
            NodeRole::Input => "inputs",
            NodeRole::Processor => "processors",
            NodeRole::Aggregator => "aggregators",
            NodeRole::Serializer => "serializers",
            NodeRole::Output => "outputs",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeRole::Input => "input",
            NodeRole::Processor => "processor",
            NodeRole::Aggregator => "aggregator",
            NodeRole::Serializer => "serializer",
            NodeRole::Output => "output",
        }
    }
}

/// The six recognized allow/deny filter kinds on a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Namepass,
    Namedrop,
    Fieldpass,
    Fielddrop,
    Tagpass,
    Tagdrop,
}

/// Canvas coordinate. UI-only; the compiler never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One plugin instance placed in the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineNode {
    pub id: String,
    #[serde(rename = "type")]
    pub role: NodeRole,
    pub plugin: String,
    #[serde(default)]
    pub position: Position,
    #[serde(rename = "data", default)]
    pub settings: Settings,
}

impl PipelineNode {
    /// True when the user entered a namepass filter by hand; filter
    /// inheritance never overrides these.
    pub fn has_explicit_namepass(&self) -> bool {
        self.settings.contains_key(NAMEPASS_KEY)
    }
}

/// A directed connection: metrics flow from `source` to `target`.
/// Parallel edges between the same pair are tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<FilterKind, Vec<String>>,
}

/// Aggregate root. A save persists the whole value; all core computations
/// take `&Pipeline` and never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub agent: AgentSettings,
    #[serde(default)]
    pub nodes: Vec<PipelineNode>,
    #[serde(rename = "connections", default)]
    pub edges: Vec<Edge>,
    #[serde(
        rename = "secretStore",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub secret_store: Option<SecretStore>,
}

/// Raw blob shape accepted at load time: the canonical fields plus the
/// legacy plural secret-store array.
#[derive(Debug, Deserialize)]
struct RawPipeline {
    id: String,
    name: String,
    #[serde(default)]
    agent: AgentSettings,
    #[serde(default)]
    nodes: Vec<PipelineNode>,
    #[serde(rename = "connections", default)]
    edges: Vec<Edge>,
    #[serde(rename = "secretStore", default)]
    secret_store: Option<SecretStore>,
    #[serde(rename = "secretStores", default)]
    legacy_secret_stores: Vec<LegacySecretStore>,
}

impl Pipeline {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            agent: AgentSettings::default(),
            nodes: Vec::new(),
            edges: Vec::new(),
            secret_store: None,
        }
    }

    /// Parse a persisted blob, upgrading the legacy `secretStores` array to
    /// the canonical singular form. Singular wins when both are present;
    /// otherwise the first array entry is taken.
    pub fn from_json(text: &str) -> crate::Result<Self> {
        let raw: RawPipeline =
            serde_json::from_str(text).context("parse pipeline JSON")?;

        let secret_store = raw
            .secret_store
            .or_else(|| raw.legacy_secret_stores.into_iter().next().map(SecretStore::from));

        Ok(Self {
            id: raw.id,
            name: raw.name,
            agent: raw.agent,
            nodes: raw.nodes,
            edges: raw.edges,
            secret_store,
        })
    }

    pub fn to_json(&self) -> crate::Result<String> {
        serde_json::to_string_pretty(self).context("serialize pipeline JSON")
    }

    pub fn node(&self, id: &str) -> Option<&PipelineNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut PipelineNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn add_node(&mut self, node: PipelineNode) -> Result<(), StructuralError> {
        if self.node(&node.id).is_some() {
            return Err(StructuralError::DuplicateNodeId { node_id: node.id });
        }
        if node.plugin.is_empty() {
            return Err(StructuralError::MissingPlugin { node_id: node.id });
        }
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) {
        self.nodes.retain(|n| n.id != id);
        self.edges.retain(|e| e.source != id && e.target != id);
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<(), StructuralError> {
        for endpoint in [&edge.source, &edge.target] {
            if self.node(endpoint).is_none() {
                return Err(StructuralError::UnknownNode {
                    edge_id: edge.id.clone(),
                    node_id: endpoint.clone(),
                });
            }
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn remove_edge(&mut self, id: &str) {
        self.edges.retain(|e| e.id != id);
    }

    /// Structural integrity: unique node ids, non-empty plugin names, edge
    /// endpoints that exist. The compiler calls this before emitting any
    /// output.
    pub fn validate(&self) -> Result<(), StructuralError> {
        let mut seen = HashSet::new();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(StructuralError::DuplicateNodeId {
                    node_id: node.id.clone(),
                });
            }
            if node.plugin.is_empty() {
                return Err(StructuralError::MissingPlugin {
                    node_id: node.id.clone(),
                });
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !seen.contains(endpoint.as_str()) {
                    return Err(StructuralError::UnknownNode {
                        edge_id: edge.id.clone(),
                        node_id: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
