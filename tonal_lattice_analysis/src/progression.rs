// Progression analysis: the most tonally coherent key reading of a chord
// progression.
//
// Every chord of the progression is heard in each of the 24 keys (12 roots
// x major/minor), giving one lattice layer of 24 candidates per position.
// Layers are wired together:
//
//   START -> every candidate at position 0            (cost 0)
//   every candidate at i -> every candidate at i + 1  (cost = chord delta)
//   every candidate at the last position -> END       (cost 0)
//
// The least-cost START -> END path picks one key per chord; its cost is the
// summed TPS distance along the progression. A progression of n chords
// needs n * 24 * 24 chord deltas (less the first layer), which dominates
// the run time.
//
// Candidates are added layer by layer in `Key::all()` order, then START and
// END. Edges go in layer order as well, so the search's push-order
// tie-breaking resolves equal-cost readings the same way every time.
//
// See also: `lattice.rs`, `pathfinding.rs`, and the TPS crate's `delta.rs`
// for the edge weights.

use crate::error::AnalysisError;
use crate::lattice::{Lattice, NodeLabel};
use crate::pathfinding::astar;
use crate::types::LatticeNodeId;
use serde::{Deserialize, Serialize};
use std::fmt;
use tonal_lattice_pitch::Key;
use tonal_lattice_tps::{Chord, ChordDeltaCalculator, ChordSymbol, TpsConfig, TpsError};
use tracing::{debug, trace};

/// The progression lattice never uses an estimate: every node's heuristic
/// is zero, which makes the search Dijkstra's algorithm.
const ZERO_HEURISTIC: u32 = 0;

/// A lattice built for one progression, plus the handles needed to search
/// and inspect it.
#[derive(Clone, Debug)]
pub struct ProgressionLattice {
    pub lattice: Lattice,
    pub start: LatticeNodeId,
    pub end: LatticeNodeId,
    /// Candidate node ids per progression position, in `Key::all()` order.
    pub layers: Vec<Vec<LatticeNodeId>>,
}

/// One chord of the winning reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretedChord {
    pub position: usize,
    pub chord: Chord,
    /// Cost of the edge into this chord (0 for the first chord).
    pub step_cost: u32,
}

/// The least-cost key reading of a progression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interpretation {
    pub total_cost: u32,
    pub chords: Vec<InterpretedChord>,
}

impl Interpretation {
    /// The key chosen for each chord, in progression order.
    pub fn keys(&self) -> Vec<Key> {
        self.chords
            .iter()
            .filter_map(|step| step.chord.key())
            .collect()
    }
}

impl fmt::Display for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "START")?;
        for step in &self.chords {
            write!(f, " -> {}", step.chord)?;
        }
        write!(f, " -> END (cost {})", self.total_cost)
    }
}

/// Finds the least-cost key reading of chord progressions.
#[derive(Clone, Debug)]
pub struct ProgressionAnalyzer {
    calculator: ChordDeltaCalculator,
}

impl ProgressionAnalyzer {
    pub fn new(config: &TpsConfig) -> Result<Self, AnalysisError> {
        Ok(Self {
            calculator: ChordDeltaCalculator::new(config)?,
        })
    }

    pub fn from_calculator(calculator: ChordDeltaCalculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &ChordDeltaCalculator {
        &self.calculator
    }

    /// Build the candidate lattice for a progression without searching it.
    pub fn build_lattice(
        &self,
        progression: &[ChordSymbol],
    ) -> Result<ProgressionLattice, AnalysisError> {
        let mut lattice = Lattice::new();

        let layers: Vec<Vec<LatticeNodeId>> = progression
            .iter()
            .enumerate()
            .map(|(position, &symbol)| {
                Key::all()
                    .map(|key| {
                        let chord = Chord::in_key(symbol, key);
                        lattice.add_node(NodeLabel::Candidate { position, chord }, ZERO_HEURISTIC)
                    })
                    .collect()
            })
            .collect();

        let start = lattice.add_node(NodeLabel::Start, ZERO_HEURISTIC);
        let end = lattice.add_node(NodeLabel::End, ZERO_HEURISTIC);

        if let (Some(first), Some(last)) = (layers.first(), layers.last()) {
            for &node in first {
                lattice.add_edge(start, node, 0);
            }
            for &node in last {
                lattice.add_edge(node, end, 0);
            }
        }

        for pair in layers.windows(2) {
            for &from in &pair[0] {
                for &to in &pair[1] {
                    let cost = self.edge_cost(&lattice, from, to)?;
                    lattice.add_edge(from, to, cost);
                }
            }
        }

        debug!(
            chords = progression.len(),
            nodes = lattice.node_count(),
            edges = lattice.edge_count(),
            "built progression lattice"
        );

        Ok(ProgressionLattice {
            lattice,
            start,
            end,
            layers,
        })
    }

    fn edge_cost(
        &self,
        lattice: &Lattice,
        from: LatticeNodeId,
        to: LatticeNodeId,
    ) -> Result<u32, TpsError> {
        let (Some(a), Some(b)) = (lattice.node(from).label.chord(), lattice.node(to).label.chord())
        else {
            return Ok(0);
        };
        let delta = self.calculator.calc_detailed(a, b)?;
        trace!(
            from = %a,
            to = %b,
            basic_space = delta.basic_space,
            region = delta.region,
            chord_circle = delta.chord_circle,
            total = delta.total(),
            "lattice edge"
        );
        Ok(delta.total())
    }

    /// Find the least-cost key reading of a progression.
    pub fn analyze(&self, progression: &[ChordSymbol]) -> Result<Interpretation, AnalysisError> {
        let built = self.build_lattice(progression)?;
        let path = astar(&built.lattice, built.start, built.end)
            .ok_or(AnalysisError::NoInterpretation)?;

        // Each edge on the path enters one node; the candidates it enters
        // are the chosen readings, START and END are not.
        let chords: Vec<InterpretedChord> = path
            .edge_indices
            .iter()
            .map(|&idx| built.lattice.edge(idx))
            .filter_map(|edge| match built.lattice.node(edge.to).label {
                NodeLabel::Candidate { position, chord } => Some(InterpretedChord {
                    position,
                    chord,
                    step_cost: edge.cost,
                }),
                NodeLabel::Start | NodeLabel::End => None,
            })
            .collect();

        debug!(cost = path.total_cost, chords = chords.len(), "progression interpreted");

        Ok(Interpretation {
            total_cost: path.total_cost,
            chords,
        })
    }

    /// Parse chord names and analyze them.
    pub fn analyze_names<S: AsRef<str>>(&self, names: &[S]) -> Result<Interpretation, AnalysisError> {
        let progression = names
            .iter()
            .map(|name| name.as_ref().parse::<ChordSymbol>())
            .collect::<Result<Vec<_>, _>>()?;
        self.analyze(&progression)
    }

    /// Analyze a comma-separated chord sheet such as `"A m 7,D m 7,G 7"`.
    /// A blank sheet is an empty progression.
    pub fn analyze_sheet(&self, sheet: &str) -> Result<Interpretation, AnalysisError> {
        if sheet.trim().is_empty() {
            return self.analyze(&[]);
        }
        let names: Vec<&str> = sheet.split(',').map(str::trim).collect();
        self.analyze_names(&names)
    }

    /// Cost of hearing every chord of the progression in one fixed key.
    pub fn fixed_key_cost(
        &self,
        progression: &[ChordSymbol],
        key: Key,
    ) -> Result<u32, AnalysisError> {
        let chords: Vec<Chord> = progression
            .iter()
            .map(|&symbol| Chord::in_key(symbol, key))
            .collect();
        let mut total = 0u32;
        for pair in chords.windows(2) {
            total += self.calculator.calc(&pair[0], &pair[1])?;
        }
        Ok(total)
    }
}
