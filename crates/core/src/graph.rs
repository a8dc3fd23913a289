//! Whole-pipeline dependency graph
//!
//! Builds a petgraph view of every registered task for inspection (the
//! `graph` CLI command) and for reporting every cycle in the pipeline at
//! once, independent of which root task a plan is resolved from.

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;
use std::collections::HashMap;

use crate::registry::TaskRegistry;
use crate::types::{ConveyorError, ConveyorResult};

/// Graph of every registered task. Edge direction is task -> prerequisite.
#[derive(Debug)]
pub struct DependencyGraph {
    pub graph: DiGraph<String, ()>,
    /// Every dependency cycle in the pipeline, each sorted by task name,
    /// the list itself sorted for stable output.
    pub cycles: Vec<Vec<String>>,
}

/// Build the dependency graph from the registered tasks.
pub fn build_dependency_graph(registry: &TaskRegistry) -> ConveyorResult<DependencyGraph> {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_indices = HashMap::new();

    for task in registry.tasks() {
        let node_index = graph.add_node(task.name.clone());
        node_indices.insert(task.name.clone(), node_index);
    }

    for task in registry.tasks() {
        let from_node = node_indices[&task.name];
        for prerequisite in &task.prerequisites {
            if let Some(&to_node) = node_indices.get(prerequisite) {
                graph.add_edge(from_node, to_node, ());
            } else {
                return Err(ConveyorError::UnknownTask {
                    name: prerequisite.clone(),
                    required_by: Some(task.name.clone()),
                });
            }
        }
    }

    // Detect cycles using strongly connected components
    let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
        .into_iter()
        .filter_map(|component| {
            if component.len() > 1 {
                let mut cycle = component
                    .iter()
                    .map(|node| graph[*node].clone())
                    .collect::<Vec<_>>();
                cycle.sort();
                Some(cycle)
            } else {
                let node = component[0];
                if graph.contains_edge(node, node) {
                    Some(vec![graph[node].clone()])
                } else {
                    None
                }
            }
        })
        .collect();

    cycles.sort();

    Ok(DependencyGraph { graph, cycles })
}

impl DependencyGraph {
    /// Prerequisite names of `node`, for display.
    pub fn prerequisites_of(&self, node: NodeIndex) -> Vec<String> {
        self.graph
            .neighbors(node)
            .filter_map(|neighbor| self.graph.node_weight(neighbor).cloned())
            .collect()
    }
}
