//! Dependency graph over agent definitions and cycle detection.
//!
//! Each `agents/*.json` file is a node identified by its root-relative path
//! (`agents/reviewer.json`). Its `agents` list supplies the outgoing edges,
//! normalized the same way the loader resolves agent names.
//!
//! # Example
//!
//! ```
//! use versa_core::validation::AgentGraph;
//!
//! let mut graph = AgentGraph::new();
//! graph.add_node("agents/a.json");
//! graph.add_node("agents/b.json");
//! graph.add_edge("agents/a.json", "agents/b.json");
//! graph.add_edge("agents/b.json", "agents/a.json");
//!
//! assert_eq!(graph.find_cycle(), vec!["agents/a.json", "agents/b.json"]);
//! ```

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;
use versa_fs::{AiPath, NormalizedPath, io};

use crate::Result;
use crate::loader::normalize_agent_ref;

/// Directed graph of agent dependencies.
///
/// Edges point from dependent to dependency. Edges naming an agent that is
/// not a node are kept but never followed.
#[derive(Debug, Clone, Default)]
pub struct AgentGraph {
    /// Adjacency list keyed by node id; iteration order is sorted
    edges: BTreeMap<String, Vec<String>>,
}

impl AgentGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with no dependencies. Existing nodes are left unchanged.
    pub fn add_node(&mut self, id: impl Into<String>) {
        self.edges.entry(id.into()).or_default();
    }

    /// Declare that `from` depends on `to`. `from` is added if missing.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.edges
            .entry(from.to_string())
            .or_default()
            .push(to.to_string());
    }

    pub fn contains(&self, id: &str) -> bool {
        self.edges.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Direct dependencies of a node, in declaration order.
    pub fn dependencies_of(&self, id: &str) -> &[String] {
        self.edges.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Build the graph from every `*.json` file in an `agents/` directory.
    ///
    /// Files that are not valid JSON, or whose `agents` field is not an
    /// array, become nodes without edges.
    pub fn from_dir(agents_dir: &NormalizedPath) -> Result<Self> {
        let mut graph = Self::new();

        for file in io::list_files(agents_dir, "json")? {
            let id = format!("{}/{}", AiPath::AgentsDir, file);
            graph.add_node(id.clone());

            let dependencies = io::read_text(&agents_dir.join(&file))
                .ok()
                .and_then(|content| serde_json::from_str::<Value>(&content).ok())
                .and_then(|data| data.get("agents").and_then(Value::as_array).cloned())
                .unwrap_or_default();

            for dependency in dependencies.iter().filter_map(Value::as_str) {
                graph.add_edge(&id, &normalize_agent_ref(dependency));
            }
        }

        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built agent graph"
        );
        Ok(graph)
    }

    /// Find the first cycle reachable by depth-first search from the nodes
    /// in sorted order.
    ///
    /// Returns the distinct cycle members in traversal order, starting at
    /// the node the back edge returns to. The repeated node is not appended
    /// at the end; [`cycle_message`] closes the loop when rendering. A
    /// self-dependency yields a single node. An acyclic graph yields an
    /// empty vector.
    pub fn find_cycle(&self) -> Vec<String> {
        let mut visited: HashSet<&str> = HashSet::new();

        for start in self.edges.keys() {
            if visited.contains(start.as_str()) {
                continue;
            }

            // (node, index of the next dependency to follow)
            let mut stack: Vec<(&str, usize)> = vec![(start.as_str(), 0)];
            let mut on_stack: HashSet<&str> = HashSet::from([start.as_str()]);

            while let Some(frame) = stack.last_mut() {
                let (node, next) = *frame;
                let Some(dependency) = self.dependencies_of(node).get(next) else {
                    stack.pop();
                    on_stack.remove(node);
                    visited.insert(node);
                    continue;
                };
                frame.1 += 1;

                let dependency = dependency.as_str();
                if !self.contains(dependency) {
                    continue;
                }
                if on_stack.contains(dependency) {
                    let from = stack
                        .iter()
                        .position(|(id, _)| *id == dependency)
                        .unwrap_or(0);
                    return stack[from..].iter().map(|(id, _)| id.to_string()).collect();
                }
                if !visited.contains(dependency) {
                    on_stack.insert(dependency);
                    stack.push((dependency, 0));
                }
            }
        }

        Vec::new()
    }
}

/// Find a cycle among the agent definitions of the root at `root`.
///
/// Returns an empty vector when there is no `agents/` directory or it
/// cannot be read.
pub fn find_cycle(root: &NormalizedPath) -> Vec<String> {
    let agents_dir = root.join(AiPath::AgentsDir.as_str());
    if !agents_dir.is_dir() {
        return Vec::new();
    }
    match AgentGraph::from_dir(&agents_dir) {
        Ok(graph) => graph.find_cycle(),
        Err(e) => {
            tracing::warn!(dir = %agents_dir, error = %e, "could not read agents directory");
            Vec::new()
        }
    }
}

/// Issue message for a detected cycle, closing the loop back to its start.
pub fn cycle_message(cycle: &[String]) -> String {
    let mut chain: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        chain.push(first);
    }
    format!("Circular dependencies detected: {}", chain.join(" -> "))
}
