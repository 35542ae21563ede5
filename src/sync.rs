//! Minimal step at which every automaton wins at once.

use std::fmt::{Display, Formatter};
use std::thread;

use itertools::Itertools;
use tracing::{debug, info};

use crate::combine::{combine, GeneralWin};
use crate::error::SyncError;
use crate::hanoi::AutomatonConfig;
use crate::period::{PeriodDetector, WinDescription};

const DEFAULT_CANDIDATE_LIMIT: usize = 1 << 20;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SyncOutcome {
	Synchronized(u64),
	NoSolution,
}

/// Prints the winning step, or `-1` when the automata never win together.
impl Display for SyncOutcome {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Synchronized(step) => write!(f, "{step}"),
			Self::NoSolution => write!(f, "-1"),
		}
	}
}

#[derive(Debug, Clone)]
pub struct SyncSolver {
	step_budget: Option<u64>,
	candidate_limit: usize,
	parallel: bool,
}

impl Default for SyncSolver {
	fn default() -> Self {
		Self {
			step_budget: None,
			candidate_limit: DEFAULT_CANDIDATE_LIMIT,
			parallel: false,
		}
	}
}

impl SyncSolver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Caps period detection per automaton; running out yields
	/// [`SyncError::Undetermined`].
	pub fn with_step_budget(self, step_budget: u64) -> Self {
		Self {
			step_budget: Some(step_budget),
			..self
		}
	}

	pub fn with_candidate_limit(self, candidate_limit: usize) -> Self {
		Self {
			candidate_limit,
			..self
		}
	}

	/// Detect each automaton's period on its own thread.
	pub fn parallel(self, parallel: bool) -> Self {
		Self { parallel, ..self }
	}

	pub fn solve(&self, configs: &[AutomatonConfig]) -> Result<SyncOutcome, SyncError> {
		let descriptions = self.describe_all(configs)?;
		self.solve_descriptions(&descriptions)
	}

	pub fn describe(&self, config: &AutomatonConfig) -> Result<WinDescription, SyncError> {
		let detector = PeriodDetector::new(config.clone());
		match self.step_budget {
			Some(budget) => detector.analyze_within(budget),
			None => detector.analyze(),
		}
	}

	fn describe_all(&self, configs: &[AutomatonConfig]) -> Result<Vec<WinDescription>, SyncError> {
		if !self.parallel {
			return configs.iter().map(|config| self.describe(config)).try_collect();
		}

		thread::scope(|scope| {
			let handles = configs
				.iter()
				.map(|config| scope.spawn(move || self.describe(config)))
				.collect_vec();

			handles
				.into_iter()
				.map(|handle| {
					handle
						.join()
						.unwrap_or_else(|panic| std::panic::resume_unwind(panic))
				})
				.try_collect()
		})
	}

	/// Folds already detected descriptions into the earliest common win.
	pub fn solve_descriptions(&self, descriptions: &[WinDescription]) -> Result<SyncOutcome, SyncError> {
		let mut candidates = vec![GeneralWin::NEUTRAL];

		for (idx, description) in descriptions.iter().enumerate() {
			candidates = self.fold(&candidates, &description.general_wins())?;
			debug!(automaton = idx, candidates = candidates.len(), "folded");

			if candidates.is_empty() {
				break;
			}
		}

		let outcome = candidates
			.iter()
			.map(GeneralWin::phase)
			.min()
			.map_or(SyncOutcome::NoSolution, SyncOutcome::Synchronized);
		info!(%outcome, "synchronization finished");

		Ok(outcome)
	}

	fn fold(&self, candidates: &[GeneralWin], wins: &[GeneralWin]) -> Result<Vec<GeneralWin>, SyncError> {
		let mut merged = Vec::new();

		for (&candidate, &win) in candidates.iter().cartesian_product(wins) {
			if let Some(combined) = combine(candidate, win)? {
				merged.push(combined);
			}
			if merged.len() > self.candidate_limit {
				return Err(SyncError::CandidateLimit {
					limit: self.candidate_limit,
				});
			}
		}

		Ok(merged)
	}
}
