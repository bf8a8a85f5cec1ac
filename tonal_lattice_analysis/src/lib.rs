// tonal_lattice_analysis: least-cost tonal reading of chord progressions.
//
// Given a progression of chord descriptors, hears every chord in all 24
// keys, weighs each transition with the TPS chord delta, and searches the
// resulting lattice for the cheapest path. The path names one key per
// chord: the most tonally coherent reading of the progression.
//
// Module overview:
// - `types.rs`:       LatticeNodeId / LatticeEdgeId index newtypes.
// - `lattice.rs`:     Lattice arena of labelled nodes and directed weighted edges.
// - `pathfinding.rs`: A* (zero heuristic, so Dijkstra) with explicit node states.
// - `progression.rs`: ProgressionAnalyzer: lattice construction and analysis.
// - `error.rs`:       AnalysisError.
//
// Everything is single-threaded and in memory. A lattice is built fresh for
// each analysis call and dropped once the winning path has been read.

pub mod error;
pub mod lattice;
pub mod pathfinding;
pub mod progression;
pub mod types;

pub use error::AnalysisError;
pub use lattice::{Lattice, LatticeEdge, LatticeNode, NodeLabel};
pub use pathfinding::{PathResult, astar};
pub use progression::{Interpretation, InterpretedChord, ProgressionAnalyzer, ProgressionLattice};
pub use types::{LatticeEdgeId, LatticeNodeId};
