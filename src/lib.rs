//! Earliest step at which several scripted three-rod disk automata all win.
//!
//! Each automaton replays a move script forever. [`period::PeriodDetector`]
//! reduces its winning steps to a few arithmetic progressions, and
//! [`sync::SyncSolver`] intersects the progressions of all automata with
//! [`combine::combine`].

pub mod combine;
pub mod error;
pub mod hanoi;
pub mod logging;
pub mod period;
pub mod sync;

pub use combine::{combine, GeneralWin};
pub use error::{ConfigError, SimulationError, SyncError};
pub use hanoi::{AutomatonConfig, Hanoi, Move, MoveScript, Snapshot};
pub use period::{PeriodDetector, WinDescription, WinningSteps};
pub use sync::{SyncOutcome, SyncSolver};
