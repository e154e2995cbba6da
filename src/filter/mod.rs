//! Filter inheritance: derive the namepass list each output should carry
//! when the graph is not fully connected.
//!
//! The heuristic equates an input's plugin name with the metric name it
//! emits. That holds for the MVP plugin set (cpu, mem) but not in general —
//! some plugins emit several measurement names. Fixing that needs a
//! per-plugin metric-name registry; until then the approximation is the
//! documented behavior.

use crate::graph::connected_inputs;
use crate::model::{NodeRole, Pipeline};
use std::collections::BTreeMap;

/// Compute the implicit namepass list per output node id.
///
/// An output gets an entry only when *some but not all* inputs reach it and
/// it has no user-entered namepass of its own:
/// - every input connected -> nothing to filter, no entry;
/// - no input connected -> disconnected output, no entry (an empty list
///   would block everything);
/// - explicit namepass present -> the user's value stands, no entry.
///
/// Pure and idempotent; callers rerun it on every structural graph change.
pub fn compute_implicit_namepass(pipeline: &Pipeline) -> BTreeMap<String, Vec<String>> {
    let input_count = pipeline
        .nodes
        .iter()
        .filter(|n| n.role == NodeRole::Input)
        .count();

    let mut implicit = BTreeMap::new();
    for output in pipeline.nodes.iter().filter(|n| n.role == NodeRole::Output) {
        if output.has_explicit_namepass() {
            continue;
        }

        let connected = connected_inputs(pipeline, &output.id);
        if connected.is_empty() || connected.len() == input_count {
            continue;
        }

        implicit.insert(
            output.id.clone(),
            connected.iter().map(|n| n.plugin.clone()).collect(),
        );
    }
    implicit
}
