//! Pipeline graph model and Telegraf config compiler.
//!
//! The crate is organized around one aggregate, [`model::Pipeline`]: a
//! directed graph of plugin nodes (inputs, processors, aggregators,
//! serializers, outputs) plus agent-wide settings and an optional secret
//! store. Everything else is a pure function over a pipeline snapshot:
//!
//! - [`graph`] answers reachability queries over the edge set,
//! - [`filter`] derives the implicit namepass filters outputs inherit from
//!   the inputs actually wired to them,
//! - [`render`] compiles the whole model into a deterministic TOML document,
//! - [`schema`] extracts structured field lists from plugin reference docs,
//! - [`store`] persists named configurations as whole records.

pub mod error;
pub mod filter;
pub mod graph;
pub mod model;
pub mod render;
pub mod schema;
pub mod store;

pub type Result<T> = anyhow::Result<T>;
