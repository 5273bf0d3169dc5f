use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::debug;

use crate::db::{Starmap, SystemId};
use crate::error::{Error, Result};
use crate::graph::{build_graph, Graph, GraphOptions};

/// Shortest route between two systems.
///
/// `route` always starts at the origin and ends at the destination, and
/// `jumps == route.len() - 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathResult {
    pub route: Vec<SystemId>,
    pub jumps: usize,
}

impl PathResult {
    fn from_route(route: Vec<SystemId>) -> Self {
        let jumps = route.len().saturating_sub(1);
        Self { route, jumps }
    }
}

/// Find the route with the fewest jumps through a prebuilt graph.
///
/// Fails with [`Error::NoRouteFound`] when either endpoint is not a node of
/// the graph (for example because the security filter excluded it) or when
/// the two systems lie in disconnected components.
pub fn shortest_path(graph: &Graph, start: SystemId, goal: SystemId) -> Result<PathResult> {
    if !graph.contains(start) || !graph.contains(goal) {
        return Err(Error::NoRouteFound { start, goal });
    }

    let route =
        find_route_dijkstra(graph, start, goal).ok_or(Error::NoRouteFound { start, goal })?;
    debug!(start, goal, jumps = route.len().saturating_sub(1), "route found");
    Ok(PathResult::from_route(route))
}

/// Build a graph for the requested security filter and route through it.
pub fn find_shortest_path(
    starmap: &Starmap,
    start: SystemId,
    goal: SystemId,
    avoid_low_sec: bool,
) -> Result<PathResult> {
    for id in [start, goal] {
        if !starmap.systems.contains_key(&id) {
            return Err(Error::UnknownSystemId { id });
        }
    }

    let graph = build_graph(starmap, &GraphOptions { avoid_low_sec });
    shortest_path(&graph, start, goal)
}

/// Run Dijkstra's algorithm over the graph's edge weights.
pub fn find_route_dijkstra(
    graph: &Graph,
    start: SystemId,
    goal: SystemId,
) -> Option<Vec<SystemId>> {
    if start == goal {
        return Some(vec![start]);
    }

    let mut distances: HashMap<SystemId, f64> = HashMap::new();
    let mut parents: HashMap<SystemId, Option<SystemId>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0.0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = match distances.get(&entry.node) {
            Some(distance) if *distance < entry.cost.0 => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if entry.node == goal {
            return Some(reconstruct_path(&parents, start, goal));
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target;
            let next_cost = current_distance + edge.weight;
            if next_cost < *distances.get(&next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    None
}

fn reconstruct_path(
    parents: &HashMap<SystemId, Option<SystemId>>,
    start: SystemId,
    goal: SystemId,
) -> Vec<SystemId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: SystemId,
    cost: FloatOrd,
}

impl QueueEntry {
    fn new(node: SystemId, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
