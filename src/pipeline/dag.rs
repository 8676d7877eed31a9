// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 pipgen contributors

//! Dependency graph of resolved jobs
//!
//! Nodes are stored in discovery order, one per job name. Forward edges (the
//! jobs a node depends on) live on the node itself; the petgraph edges are the
//! reverse direction, pointing from a dependency to the jobs that depend on it,
//! and are only present after [`DependencyGraph::assign_dependents`].

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::errors::{PipgenError, PipgenResult};
use crate::pipeline::JobDefinition;

/// One resolved job and the names of the jobs it depends on
#[derive(Debug, Clone)]
pub struct GraphNode {
    job: JobDefinition,
    depends_on: Vec<String>,
}

impl GraphNode {
    pub fn new(job: JobDefinition, depends_on: Vec<String>) -> Self {
        Self { job, depends_on }
    }

    pub fn name(&self) -> &str {
        self.job.name()
    }

    pub fn job(&self) -> &JobDefinition {
        &self.job
    }

    /// Forward edges, in the order they were resolved
    pub fn depends_on(&self) -> &[String] {
        &self.depends_on
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Finished,
}

/// Directed graph of jobs keyed by name
#[derive(Debug, Default)]
pub struct DependencyGraph {
    graph: DiGraph<GraphNode, ()>,
    name_to_index: HashMap<String, NodeIndex>,
}

impl DependencyGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node unless one with the same name exists (first wins)
    pub fn insert(&mut self, node: GraphNode) -> bool {
        if self.name_to_index.contains_key(node.name()) {
            return false;
        }
        let name = node.name().to_string();
        let idx = self.graph.add_node(node);
        self.name_to_index.insert(name, idx);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&GraphNode> {
        self.name_to_index.get(name).map(|&idx| &self.graph[idx])
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Nodes in discovery order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Node names in discovery order
    pub fn names(&self) -> Vec<&str> {
        self.nodes().map(GraphNode::name).collect()
    }

    /// Add a reverse edge from every dependency back to its dependent
    ///
    /// Must run once the forward graph is complete and before cycle detection
    /// or sorting.
    pub fn assign_dependents(&mut self) -> PipgenResult<()> {
        let mut edges = Vec::new();
        for idx in self.graph.node_indices() {
            for dep_name in &self.graph[idx].depends_on {
                let dep = self
                    .name_to_index
                    .get(dep_name)
                    .ok_or_else(|| PipgenError::DanglingEdge {
                        name: dep_name.clone(),
                    })?;
                edges.push((*dep, idx));
            }
        }

        for (dep, dependent) in edges {
            if !self.graph.contains_edge(dep, dependent) {
                self.graph.add_edge(dep, dependent, ());
            }
        }

        Ok(())
    }

    /// Names of the jobs depending directly on `name`, in discovery order
    pub fn dependents(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.name_to_index.get(name)?;
        Some(
            self.dependent_indices(*idx)
                .into_iter()
                .map(|n| self.graph[n].name())
                .collect(),
        )
    }

    fn dependent_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<_> = self
            .graph
            .neighbors_directed(idx, Direction::Outgoing)
            .collect();
        out.sort();
        out
    }

    /// Whether any cycle exists among the reverse edges
    pub fn has_cycle(&self) -> bool {
        self.find_cycle().is_some()
    }

    /// Find a cycle, returned as a path whose first job is repeated at the end
    ///
    /// Three-colour depth-first search started from every node in discovery
    /// order, so cycles in components unreachable from the first node are
    /// found too.
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut state = vec![Visit::Unvisited; self.graph.node_count()];

        self.graph.node_indices().find_map(|idx| {
            if state[idx.index()] == Visit::Unvisited {
                self.visit(idx, &mut state)
            } else {
                None
            }
        })
    }

    /// Iterative depth-first search from `root` over dependent edges
    fn visit(&self, root: NodeIndex, state: &mut [Visit]) -> Option<Vec<String>> {
        // Frames of (node, its dependents, cursor into those dependents)
        let mut frames: Vec<(NodeIndex, Vec<NodeIndex>, usize)> = Vec::new();
        state[root.index()] = Visit::InProgress;
        frames.push((root, self.dependent_indices(root), 0));

        while let Some((idx, dependents, cursor)) = frames.last_mut() {
            let Some(&next) = dependents.get(*cursor) else {
                state[idx.index()] = Visit::Finished;
                frames.pop();
                continue;
            };
            *cursor += 1;

            match state[next.index()] {
                Visit::InProgress => {
                    let start = frames.iter().position(|f| f.0 == next).unwrap_or(0);
                    let mut cycle: Vec<String> = frames[start..]
                        .iter()
                        .map(|f| self.graph[f.0].name().to_string())
                        .collect();
                    cycle.push(self.graph[next].name().to_string());
                    return Some(cycle);
                }
                Visit::Unvisited => {
                    state[next.index()] = Visit::InProgress;
                    frames.push((next, self.dependent_indices(next), 0));
                }
                Visit::Finished => {}
            }
        }

        None
    }

    /// Order nodes so every job follows all the jobs it depends on
    ///
    /// Kahn's algorithm; among jobs that are ready at the same time the one
    /// discovered first goes first, so the result is reproducible.
    pub fn topological_order(&self) -> PipgenResult<Vec<&GraphNode>> {
        let mut in_degree: Vec<usize> = self
            .graph
            .node_indices()
            .map(|idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .count()
            })
            .collect();

        let mut ready: BinaryHeap<Reverse<NodeIndex>> = self
            .graph
            .node_indices()
            .filter(|idx| in_degree[idx.index()] == 0)
            .map(Reverse)
            .collect();

        let mut order = Vec::with_capacity(self.graph.node_count());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(&self.graph[idx]);
            for next in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                let degree = &mut in_degree[next.index()];
                *degree -= 1;
                if *degree == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() != self.graph.node_count() {
            return Err(PipgenError::CircularDependency {
                jobs: self.find_cycle().unwrap_or_default(),
            });
        }

        Ok(order)
    }

    /// Text listing of dependency edges, `'dependency' --> 'dependent'`
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for idx in self.graph.node_indices() {
            for next in self.dependent_indices(idx) {
                out.push_str(&format!(
                    "'{}' --> '{}'\n",
                    self.graph[idx].name(),
                    self.graph[next].name()
                ));
            }
        }
        out
    }

    /// Generate Mermaid diagram of the graph
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");

        for node in self.nodes() {
            out.push_str(&format!("    {}[{}]\n", node.name(), node.name()));
        }

        for idx in self.graph.node_indices() {
            for next in self.dependent_indices(idx) {
                out.push_str(&format!(
                    "    {} --> {}\n",
                    self.graph[idx].name(),
                    self.graph[next].name()
                ));
            }
        }

        out
    }

    /// Generate DOT diagram of the graph
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph pipeline {\n");
        out.push_str("    rankdir=LR;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for idx in self.graph.node_indices() {
            for next in self.dependent_indices(idx) {
                out.push_str(&format!(
                    "    \"{}\" -> \"{}\";\n",
                    self.graph[idx].name(),
                    self.graph[next].name()
                ));
            }
        }

        // Isolated nodes
        for idx in self.graph.node_indices() {
            if self.graph.neighbors_undirected(idx).count() == 0 {
                out.push_str(&format!("    \"{}\";\n", self.graph[idx].name()));
            }
        }

        out.push_str("}\n");
        out
    }
}
