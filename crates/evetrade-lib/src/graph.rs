use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::db::{Starmap, SystemId};

/// Cost of traversing a single stargate. Routing minimizes jump count.
const GATE_WEIGHT: f64 = 1.0;

/// Options controlling which systems enter the routing graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphOptions {
    /// Exclude systems below [`crate::db::HIGH_SEC_THRESHOLD`] (and systems
    /// whose security status is unknown).
    pub avoid_low_sec: bool,
}

/// Directed edge within the routing graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: SystemId,
    pub weight: f64,
}

/// Immutable graph structure used by the router.
///
/// Cloning is cheap; the adjacency is shared behind an [`Arc`], so one graph
/// can be built once and handed to any number of concurrent callers.
#[derive(Debug, Clone)]
pub struct Graph {
    options: GraphOptions,
    adjacency: Arc<HashMap<SystemId, Vec<Edge>>>,
}

impl Graph {
    /// Options the graph was built with.
    pub fn options(&self) -> GraphOptions {
        self.options
    }

    /// Whether the system is a node of this graph.
    pub fn contains(&self, system: SystemId) -> bool {
        self.adjacency.contains_key(&system)
    }

    /// Number of systems in the graph.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Return the neighbours for a given system identifier.
    pub fn neighbours(&self, system: SystemId) -> &[Edge] {
        self.adjacency
            .get(&system)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self {
            options: GraphOptions::default(),
            adjacency: Arc::new(HashMap::new()),
        }
    }
}

/// Build the stargate routing graph.
///
/// Every system that passes the security filter becomes a node; each
/// stargate record becomes a directed edge when both endpoints are nodes.
pub fn build_graph(starmap: &Starmap, options: &GraphOptions) -> Graph {
    let allowed = |system_id: &SystemId| -> bool {
        if !options.avoid_low_sec {
            return true;
        }
        starmap
            .systems
            .get(system_id)
            .map(|system| system.is_high_sec())
            .unwrap_or(false)
    };

    let mut adjacency: HashMap<SystemId, Vec<Edge>> = HashMap::new();
    for system_id in starmap.systems.keys().filter(|id| allowed(*id)) {
        let edges = starmap
            .adjacency
            .get(system_id)
            .map(|targets| {
                targets
                    .iter()
                    .copied()
                    .filter(|target| allowed(target))
                    .map(|target| Edge {
                        target,
                        weight: GATE_WEIGHT,
                    })
                    .collect()
            })
            .unwrap_or_default();
        adjacency.insert(*system_id, edges);
    }

    debug!(
        nodes = adjacency.len(),
        avoid_low_sec = options.avoid_low_sec,
        "built routing graph"
    );

    Graph {
        options: *options,
        adjacency: Arc::new(adjacency),
    }
}
