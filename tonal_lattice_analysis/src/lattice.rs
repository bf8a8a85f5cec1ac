// Progression lattice: a directed, layered graph of chord interpretations.
//
// The lattice is a set of `LatticeNode`s (START, END, or one chord heard in
// one key at one position of the progression) connected by directed,
// weighted `LatticeEdge`s. It is filled in by `progression.rs` and searched
// by `pathfinding.rs`.
//
// All storage uses `Vec` indexed by `LatticeNodeId`/`LatticeEdgeId`. Nodes
// refer to their outgoing edges by index, edges refer to their endpoints by
// id, and neither owns the other. The search keeps its own per-node state
// (see `pathfinding.rs`), so the lattice itself is never mutated by a search
// and can be searched any number of times.
//
// **Critical constraint: determinism.** Node and edge ids are sequential
// integers assigned in insertion order, and `neighbors` returns edges in the
// order they were added.

use crate::types::{LatticeEdgeId, LatticeNodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use tonal_lattice_tps::Chord;

/// What a lattice node stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeLabel {
    Start,
    End,
    /// The chord at `position` of the progression, heard in a key.
    Candidate { position: usize, chord: Chord },
}

impl NodeLabel {
    pub fn chord(&self) -> Option<&Chord> {
        match self {
            NodeLabel::Candidate { chord, .. } => Some(chord),
            NodeLabel::Start | NodeLabel::End => None,
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeLabel::Start => write!(f, "START"),
            NodeLabel::End => write!(f, "END"),
            NodeLabel::Candidate { chord, .. } => write!(f, "{chord}"),
        }
    }
}

/// A node in the lattice.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LatticeNode {
    pub id: LatticeNodeId,
    pub label: NodeLabel,
    /// Estimated remaining cost to the goal. Must not overestimate.
    pub heuristic: u32,
    /// Indices into `Lattice.edges` for edges that originate from this node.
    pub edge_indices: Vec<usize>,
}

/// A directed edge in the lattice.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LatticeEdge {
    pub id: LatticeEdgeId,
    pub from: LatticeNodeId,
    pub to: LatticeNodeId,
    pub cost: u32,
}

/// The lattice container.
#[derive(Clone, Debug, Default)]
pub struct Lattice {
    pub nodes: Vec<LatticeNode>,
    pub edges: Vec<LatticeEdge>,
}

impl Lattice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns its ID.
    pub fn add_node(&mut self, label: NodeLabel, heuristic: u32) -> LatticeNodeId {
        let id = LatticeNodeId(self.nodes.len() as u32);
        self.nodes.push(LatticeNode {
            id,
            label,
            heuristic,
            edge_indices: Vec::new(),
        });
        id
    }

    /// Add a directed edge `from -> to`. Returns its ID.
    pub fn add_edge(&mut self, from: LatticeNodeId, to: LatticeNodeId, cost: u32) -> LatticeEdgeId {
        let id = LatticeEdgeId(self.edges.len() as u32);
        let idx = self.edges.len();
        self.edges.push(LatticeEdge { id, from, to, cost });
        self.nodes[from.index()].edge_indices.push(idx);
        id
    }

    /// Get all edges originating from a node.
    pub fn neighbors(&self, node: LatticeNodeId) -> &[usize] {
        &self.nodes[node.index()].edge_indices
    }

    /// Get a node by ID.
    pub fn node(&self, id: LatticeNodeId) -> &LatticeNode {
        &self.nodes[id.index()]
    }

    /// Get an edge by index.
    pub fn edge(&self, idx: usize) -> &LatticeEdge {
        &self.edges[idx]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
