// Error type for progression analysis.

use thiserror::Error;
use tonal_lattice_tps::TpsError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Tps(#[from] TpsError),

    /// The lattice has no START -> END path. Only an empty progression
    /// produces this.
    #[error("no interpretation found")]
    NoInterpretation,
}
