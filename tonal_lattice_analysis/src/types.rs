// Compact identifiers for the progression lattice.
//
// Lattice nodes live in a flat `Vec` and refer to each other by index,
// never by reference, so back-pointers written by the search cannot form
// ownership cycles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a lattice node: its index in `Lattice.nodes`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LatticeNodeId(pub u32);

impl LatticeNodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LatticeNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a lattice edge: its index in `Lattice.edges`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LatticeEdgeId(pub u32);

impl LatticeEdgeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}
