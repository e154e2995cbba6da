//! Built-in plugin catalog and the example pipeline seeded into new stores.
//!
//! The catalog is the MVP plugin set: descriptors drive the palette UI and
//! `default_settings` gives each plugin its documented starting values.

use crate::model::pipeline::{
    Edge, FilterKind, NodeRole, Pipeline, PipelineNode, Position, Settings,
};
use crate::model::secret::{SecretStore, SecretStoreKind};
use serde_json::json;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub role: NodeRole,
    pub description: &'static str,
}

pub fn catalog() -> &'static [PluginDescriptor] {
    &[
        PluginDescriptor {
            name: "cpu",
            role: NodeRole::Input,
            description: "Collects CPU metrics",
        },
        PluginDescriptor {
            name: "mem",
            role: NodeRole::Input,
            description: "Collects memory metrics",
        },
        PluginDescriptor {
            name: "converter",
            role: NodeRole::Processor,
            description: "Converts data types",
        },
        PluginDescriptor {
            name: "influxdb_v2",
            role: NodeRole::Output,
            description: "InfluxDB v2 output",
        },
        PluginDescriptor {
            name: "file",
            role: NodeRole::Output,
            description: "Write to file",
        },
    ]
}

/// Default settings a freshly placed plugin starts with. Unknown plugins get
/// an empty mapping.
pub fn default_settings(plugin: &str) -> Settings {
    let value = match plugin {
        "cpu" => json!({
            "percpu": true,
            "totalcpu": true,
            "collect_cpu_time": false,
            "report_active": false,
        }),
        "converter" => json!({
            "fields": { "integer": ["usage_*"] },
        }),
        "influxdb_v2" => json!({
            "urls": ["http://localhost:8086"],
            "token": "@{mystore:influx_token}",
            "organization": "my-org",
            "bucket": "telegraf",
        }),
        "file" => json!({
            "files": ["stdout", "/tmp/metrics.out"],
            "rotation_interval": "1d",
            "data_format": "influx",
        }),
        _ => json!({}),
    };
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!("default settings are always objects"),
    }
}

/// The canonical cpu/mem demo graph: cpu -> converter -> influxdb_v2, and
/// mem -> file, with an OS secret store backing the influx token.
pub fn example_pipeline() -> Pipeline {
    let node = |id: &str, role: NodeRole, plugin: &str, x: f64, y: f64| PipelineNode {
        id: id.to_string(),
        role,
        plugin: plugin.to_string(),
        position: Position { x, y },
        settings: default_settings(plugin),
    };

    let edge = |id: &str, source: &str, target: &str, namepass: Option<&str>| Edge {
        id: id.to_string(),
        source: source.to_string(),
        target: target.to_string(),
        filters: namepass
            .map(|n| BTreeMap::from([(FilterKind::Namepass, vec![n.to_string()])]))
            .unwrap_or_default(),
    };

    Pipeline {
        id: "default".to_string(),
        name: "cpu_mem_collection".to_string(),
        agent: Default::default(),
        nodes: vec![
            node("cpu1", NodeRole::Input, "cpu", 100.0, 100.0),
            node("conv1", NodeRole::Processor, "converter", 350.0, 100.0),
            node("influxdb1", NodeRole::Output, "influxdb_v2", 600.0, 100.0),
            node("mem1", NodeRole::Input, "mem", 100.0, 250.0),
            node("file1", NodeRole::Output, "file", 600.0, 250.0),
        ],
        edges: vec![
            edge("cpu1-conv1", "cpu1", "conv1", Some("cpu")),
            edge("conv1-influxdb1", "conv1", "influxdb1", None),
            edge("mem1-file1", "mem1", "file1", Some("mem")),
        ],
        secret_store: Some(SecretStore {
            kind: SecretStoreKind::Os,
            config: Settings::new(),
            secrets: BTreeMap::new(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_pipeline_is_structurally_valid() {
        example_pipeline().validate().unwrap();
    }

    #[test]
    fn catalog_defaults_match_descriptor_roles() {
        for desc in catalog() {
            // Every catalog plugin has a settings template (possibly empty).
            let _ = default_settings(desc.name);
        }
        assert!(default_settings("cpu").contains_key("percpu"));
        assert!(default_settings("mem").is_empty());
    }
}
