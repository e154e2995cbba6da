//! Config compiler: pipeline snapshot -> Telegraf TOML document.
//!
//! Deterministic by construction: agent fields in declared order, sections
//! grouped input -> processor -> aggregator -> serializer -> output, nodes in
//! `pipeline.nodes` order within a role, settings in stored insertion order.
//! Same snapshot, byte-identical output.
//!
//! Rendering is read-only: the implicit namepass from filter inheritance is
//! merged into the emitted text only, never written back into the pipeline.

use crate::error::StructuralError;
use crate::filter::compute_implicit_namepass;
use crate::model::{AgentSettings, NodeRole, Pipeline, PipelineNode, SecretStore};
use serde_json::Value;
use std::fmt::Write;
use tracing::warn;

/// Compile the whole pipeline into its textual configuration. Fails fast on
/// structural errors; nothing is emitted for an invalid graph.
pub fn render(pipeline: &Pipeline) -> Result<String, StructuralError> {
    pipeline.validate()?;

    let implicit = compute_implicit_namepass(pipeline);

    let mut sections: Vec<String> = Vec::new();
    sections.push(render_agent(&pipeline.agent));

    if let Some(store) = &pipeline.secret_store {
        sections.push(render_secret_store(store));
    }

    for role in NodeRole::SECTION_ORDER {
        for node in pipeline.nodes.iter().filter(|n| n.role == role) {
            sections.push(render_node(node, implicit.get(&node.id)));
        }
    }

    Ok(sections.join("\n"))
}

fn render_agent(agent: &AgentSettings) -> String {
    let mut out = String::from("[agent]\n");
    push_kv(&mut out, "interval", &Value::from(agent.interval.clone()));
    push_kv(&mut out, "round_interval", &Value::from(agent.round_interval));
    push_kv(&mut out, "metric_batch_size", &Value::from(agent.metric_batch_size));
    push_kv(&mut out, "metric_buffer_limit", &Value::from(agent.metric_buffer_limit));
    push_kv(&mut out, "collection_jitter", &Value::from(agent.collection_jitter.clone()));
    push_kv(&mut out, "flush_interval", &Value::from(agent.flush_interval.clone()));
    push_kv(&mut out, "flush_jitter", &Value::from(agent.flush_jitter.clone()));
    push_kv(&mut out, "precision", &Value::from(agent.precision.clone()));
    push_kv(&mut out, "debug", &Value::from(agent.debug));
    push_kv(&mut out, "quiet", &Value::from(agent.quiet));
    push_kv(&mut out, "logtarget", &Value::from(agent.logtarget.clone()));
    push_kv(&mut out, "logfile", &Value::from(agent.logfile.clone()));
    push_kv(
        &mut out,
        "logfile_rotation_interval",
        &Value::from(agent.logfile_rotation_interval.clone()),
    );
    push_kv(
        &mut out,
        "logfile_rotation_max_size",
        &Value::from(agent.logfile_rotation_max_size.clone()),
    );
    push_kv(
        &mut out,
        "logfile_rotation_max_archives",
        &Value::from(agent.logfile_rotation_max_archives),
    );
    out
}

fn render_secret_store(store: &SecretStore) -> String {
    let mut out = format!("[[secretstores.{}]]\n", store.kind.as_str());
    for (key, value) in &store.config {
        push_kv(&mut out, key, value);
    }
    out
}

fn render_node(node: &PipelineNode, implicit_namepass: Option<&Vec<String>>) -> String {
    let mut out = format!("[[{}.{}]]\n", node.role.section(), node.plugin);

    // Inherited filter first, and only when the user has not set one. The
    // merge happens on the emitted text; stored settings stay untouched.
    if let Some(names) = implicit_namepass {
        if !node.has_explicit_namepass() {
            let list = Value::from(names.clone());
            push_kv(&mut out, "namepass", &list);
        }
    }

    for (key, value) in &node.settings {
        push_kv(&mut out, key, value);
    }
    out
}

fn push_kv(out: &mut String, key: &str, value: &Value) {
    match literal(value) {
        Some(lit) => {
            let _ = writeln!(out, "  {key} = {lit}");
        }
        None => warn!(key, "skipping setting with unsupported null value"),
    }
}

/// TOML literal for a settings value. Strings are double-quoted (secret
/// references like `@{store:key}` are plain strings and pass through
/// verbatim), booleans and numbers bare, arrays bracketed with comma-space
/// separation, nested mappings inline. Null has no literal.
fn literal(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(quote(s)),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().filter_map(literal).collect();
            Some(format!("[{}]", rendered.join(", ")))
        }
        Value::Object(map) => {
            let rendered: Vec<String> = map
                .iter()
                .filter_map(|(k, v)| literal(v).map(|lit| format!("{k} = {lit}")))
                .collect();
            Some(format!("{{{}}}", rendered.join(", ")))
        }
    }
}

fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
