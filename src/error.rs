//! Error types for building, simulating and synchronizing automata.

use thiserror::Error;

use crate::hanoi::Rank;

/// Rejected automaton configuration. Raised before any simulation starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	#[error("an automaton needs at least one disk")]
	NoDisks,

	#[error("{disk_count} disks do not fit below the rod sentinel")]
	TooManyDisks { disk_count: Rank },

	#[error("move script is empty")]
	EmptyScript,

	#[error("unknown move {symbol:?} at position {position} of the script")]
	UnknownMove { symbol: char, position: usize },

	#[error("expected `<disk_count> <script>`, got {0:?}")]
	MalformedLine(String),

	#[error("invalid disk count {0:?}")]
	BadDiskCount(String),

	#[error("invalid automaton count {0:?}")]
	BadAutomatonCount(String),

	#[error("expected {expected} automata, found {found}")]
	MissingAutomata { expected: usize, found: usize },
}

/// A broken rod invariant found while applying a move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
	#[error("two rods expose the same disk rank {rank}")]
	EqualTops { rank: Rank },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
	#[error(transparent)]
	Config(#[from] ConfigError),

	#[error(transparent)]
	Simulation(#[from] SimulationError),

	/// The step ceiling ran out before a full winning cycle was seen.
	/// This says nothing about whether the automaton ever wins.
	#[error("no winning cycle within {budget} steps, result undetermined")]
	Undetermined { budget: u64 },

	#[error("combined period of {a} and {b} does not fit in 64 bits")]
	PeriodOverflow { a: u64, b: u64 },

	#[error("candidate set grew past {limit} progressions")]
	CandidateLimit { limit: usize },
}
