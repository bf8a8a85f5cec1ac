// Least-cost search over the progression lattice.
//
// A* with a `BinaryHeap` open set (min-heap via reversed ordering). Per-node
// search state lives in a `Vec` indexed by `LatticeNodeId`, separate from
// the lattice, so a search never mutates the graph it reads. The heuristic
// is each node's `heuristic` field; with the all-zero heuristic the
// progression lattice uses, this is Dijkstra's algorithm.
//
// Each node is Unvisited, Open, or Closed. Relaxing an edge:
//   - Unvisited: record g, f and the back-pointer, mark Open, push.
//   - Open: if the new g is lower, overwrite and push again. The older heap
//     entry goes stale and is skipped when popped.
//   - Closed: if the new f is lower, overwrite and reopen. Never happens
//     with a consistent heuristic, but keeps inconsistent ones correct.
// The goal test happens when a node is popped, not when it is reached.
//
// See also: `lattice.rs` for the graph being searched, `progression.rs`
// which builds the lattice and turns the path into an interpretation.
//
// **Critical constraint: determinism.** Ties on f are broken by push order
// (first pushed, first popped), so equal-cost paths resolve the same way
// on every run.

use crate::lattice::Lattice;
use crate::types::LatticeNodeId;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::debug;

/// The result of a successful search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    /// Sequence of node IDs from start to goal (inclusive).
    pub nodes: Vec<LatticeNodeId>,
    /// Indices into `Lattice.edges` for each step (len = nodes.len() - 1).
    pub edge_indices: Vec<usize>,
    /// Total traversal cost.
    pub total_cost: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
enum NodeState {
    #[default]
    Unvisited,
    Open,
    Closed,
}

#[derive(Clone, Copy, Debug, Default)]
struct SearchRecord {
    g: u32,
    f: u32,
    /// (previous node, edge index used to get here).
    came_from: Option<(LatticeNodeId, usize)>,
    state: NodeState,
}

/// Entry in the open set (min-heap via reversed ordering).
#[derive(PartialEq, Eq)]
struct OpenEntry {
    node: LatticeNodeId,
    f_score: u32,
    seq: u64,
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest f_score, then earliest push, is "greatest".
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Find the least-cost path from `start` to `goal`.
///
/// Returns `None` if no path exists or if the lattice is empty.
pub fn astar(lattice: &Lattice, start: LatticeNodeId, goal: LatticeNodeId) -> Option<PathResult> {
    let n = lattice.node_count();
    if n == 0 {
        return None;
    }
    if start == goal {
        return Some(PathResult {
            nodes: vec![start],
            edge_indices: Vec::new(),
            total_cost: 0,
        });
    }

    let mut records = vec![SearchRecord::default(); n];
    let mut open = BinaryHeap::new();
    let mut seq = 0u64;
    let mut expanded = 0usize;

    let h_start = lattice.node(start).heuristic;
    records[start.index()] = SearchRecord {
        g: 0,
        f: h_start,
        came_from: None,
        state: NodeState::Open,
    };
    open.push(OpenEntry {
        node: start,
        f_score: h_start,
        seq,
    });
    seq += 1;

    while let Some(current) = open.pop() {
        let current_id = current.node;
        let ci = current_id.index();

        let record = records[ci];
        if record.state != NodeState::Open || record.f != current.f_score {
            continue;
        }

        if current_id == goal {
            debug!(expanded, cost = record.g, "lattice search reached goal");
            return Some(reconstruct_path(&records, start, goal));
        }

        records[ci].state = NodeState::Closed;
        expanded += 1;

        for &edge_idx in lattice.neighbors(current_id) {
            let edge = lattice.edge(edge_idx);
            let neighbor = edge.to;
            let tentative_g = record.g.saturating_add(edge.cost);
            let f = tentative_g.saturating_add(lattice.node(neighbor).heuristic);

            let child = &mut records[neighbor.index()];
            let improves = match child.state {
                NodeState::Unvisited => true,
                NodeState::Open => tentative_g < child.g,
                NodeState::Closed => f < child.f,
            };
            if !improves {
                continue;
            }

            *child = SearchRecord {
                g: tentative_g,
                f,
                came_from: Some((current_id, edge_idx)),
                state: NodeState::Open,
            };
            open.push(OpenEntry {
                node: neighbor,
                f_score: f,
                seq,
            });
            seq += 1;
        }
    }

    debug!(expanded, "lattice search exhausted without reaching goal");
    None
}

/// Reconstruct the path from the back-pointers.
fn reconstruct_path(
    records: &[SearchRecord],
    start: LatticeNodeId,
    goal: LatticeNodeId,
) -> PathResult {
    let mut nodes = Vec::new();
    let mut edge_indices = Vec::new();
    let mut current = goal;

    loop {
        nodes.push(current);
        if current == start {
            break;
        }
        if let Some((prev, edge_idx)) = records[current.index()].came_from {
            edge_indices.push(edge_idx);
            current = prev;
        } else {
            break;
        }
    }

    nodes.reverse();
    edge_indices.reverse();

    PathResult {
        nodes,
        edge_indices,
        total_cost: records[goal.index()].g,
    }
}
