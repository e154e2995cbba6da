//! Canonical in-memory pipeline representation.
//!
//! This module owns the aggregate every other component reads:
//! - Pipeline (nodes + edges + agent settings + secret store)
//! - the node/edge/filter vocabulary
//! - the plugin catalog shipped with the editor
//!
//! The serde shape matches the persisted JSON blob, including a one-time
//! upgrade of the legacy plural `secretStores` form at load.

pub mod agent;
pub mod catalog;
pub mod pipeline;
pub mod secret;

pub use agent::AgentSettings;
pub use catalog::{PluginDescriptor, catalog, default_settings, example_pipeline};
pub use pipeline::{Edge, FilterKind, NodeRole, Pipeline, PipelineNode, Position, Settings};
pub use secret::{SecretStore, SecretStoreKind};
