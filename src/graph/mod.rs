//! Reachability over the pipeline's directed edge set.
//!
//! Pure functions of a pipeline snapshot. Each traversal carries its own
//! visited set, so cyclic graphs terminate: a node seen again within the same
//! traversal is skipped rather than re-expanded. O(V+E) per query, which is
//! fine at editor scale (tens of nodes).

use crate::model::{NodeRole, Pipeline, PipelineNode};
use std::collections::{HashMap, HashSet};

/// True when a directed path exists from `from_id` to `to_id`, directly or
/// through intermediate nodes.
pub fn path_exists(pipeline: &Pipeline, from_id: &str, to_id: &str) -> bool {
    let mut forward: HashMap<&str, Vec<&str>> = HashMap::new();
    for edge in &pipeline.edges {
        forward
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack = vec![from_id];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        if let Some(next) = forward.get(current) {
            for &target in next {
                if target == to_id {
                    return true;
                }
                stack.push(target);
            }
        }
    }
    false
}

/// Input nodes with a path to `output_id`, in `pipeline.nodes` order.
pub fn connected_inputs<'a>(pipeline: &'a Pipeline, output_id: &str) -> Vec<&'a PipelineNode> {
    pipeline
        .nodes
        .iter()
        .filter(|n| n.role == NodeRole::Input)
        .filter(|n| path_exists(pipeline, &n.id, output_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Edge, NodeRole, Pipeline, PipelineNode, Position, Settings};
    use std::collections::BTreeMap;

    fn pipeline(nodes: &[(&str, NodeRole)], edges: &[(&str, &str)]) -> Pipeline {
        let mut p = Pipeline::new("t");
        for (id, role) in nodes {
            p.nodes.push(PipelineNode {
                id: id.to_string(),
                role: *role,
                plugin: id.to_string(),
                position: Position::default(),
                settings: Settings::new(),
            });
        }
        for (source, target) in edges {
            p.edges.push(Edge {
                id: format!("{source}-{target}"),
                source: source.to_string(),
                target: target.to_string(),
                filters: BTreeMap::new(),
            });
        }
        p
    }

    #[test]
    fn transitive_path_through_processor() {
        let p = pipeline(
            &[
                ("a", NodeRole::Input),
                ("p", NodeRole::Processor),
                ("o", NodeRole::Output),
            ],
            &[("a", "p"), ("p", "o")],
        );
        assert!(path_exists(&p, "a", "o"));
        assert!(!path_exists(&p, "o", "a"));
    }

    #[test]
    fn cycle_terminates() {
        let p = pipeline(
            &[("a", NodeRole::Processor), ("b", NodeRole::Processor)],
            &[("a", "b"), ("b", "a")],
        );
        assert!(path_exists(&p, "a", "b"));
        assert!(!path_exists(&p, "a", "missing"));
    }

    #[test]
    fn parallel_edges_are_harmless() {
        let p = pipeline(
            &[("a", NodeRole::Input), ("o", NodeRole::Output)],
            &[("a", "o"), ("a", "o")],
        );
        assert!(path_exists(&p, "a", "o"));
    }

    #[test]
    fn connected_inputs_follow_node_order() {
        let p = pipeline(
            &[
                ("mem", NodeRole::Input),
                ("cpu", NodeRole::Input),
                ("o", NodeRole::Output),
            ],
            &[("cpu", "o"), ("mem", "o")],
        );
        let ids: Vec<&str> = connected_inputs(&p, "o").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["mem", "cpu"]);
    }

    #[test]
    fn node_does_not_reach_itself_without_a_cycle() {
        let p = pipeline(&[("a", NodeRole::Input)], &[]);
        assert!(!path_exists(&p, "a", "a"));
    }
}
