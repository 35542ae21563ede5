//! Detection of the periodic structure of an automaton's winning steps.

use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::num::NonZeroU64;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::combine::GeneralWin;
use crate::error::{SimulationError, SyncError};
use crate::hanoi::{AutomatonConfig, Hanoi, Move};

/// Winning steps of one automaton: every `phase + period * k`, `k >= 0`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct WinDescription {
	period: NonZeroU64,
	phases: Vec<u64>,
}

impl WinDescription {
	#[cfg(test)]
	pub(crate) fn from_parts(period: u64, phases: Vec<u64>) -> Self {
		let period = NonZeroU64::new(period).unwrap();
		Self { period, phases }
	}

	pub fn period(&self) -> u64 {
		self.period.get()
	}

	/// Absolute winning steps of the first cycle, increasing.
	pub fn phases(&self) -> &[u64] {
		&self.phases
	}

	pub fn general_wins(&self) -> Vec<GeneralWin> {
		self.phases
			.iter()
			.map(|&phase| GeneralWin::from_nonzero(self.period, phase))
			.collect_vec()
	}

	pub fn contains(&self, step: u64) -> bool {
		self.general_wins().iter().any(|win| win.contains(step))
	}
}

impl Display for WinDescription {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "period {}, phases [{}]", self.period, self.phases.iter().join(", "))
	}
}

/// Replays a script on a fresh simulator until the winning steps repeat.
///
/// `analyze` consumes the detector; keep the returned description instead of
/// running it twice.
pub struct PeriodDetector {
	config: AutomatonConfig,
	hanoi: Hanoi,
}

impl PeriodDetector {
	pub fn new(config: AutomatonConfig) -> Self {
		let hanoi = Hanoi::new(&config);
		Self { config, hanoi }
	}

	/// Runs until the first repeated winning residue. Never returns if the
	/// automaton never wins.
	pub fn analyze(self) -> Result<WinDescription, SyncError> {
		self.run(None)
	}

	/// Like [`PeriodDetector::analyze`], giving up with
	/// [`SyncError::Undetermined`] after `max_steps` steps.
	pub fn analyze_within(self, max_steps: u64) -> Result<WinDescription, SyncError> {
		self.run(Some(max_steps))
	}

	fn run(mut self, budget: Option<u64>) -> Result<WinDescription, SyncError> {
		let moves = self.config.script().moves();
		let script_len = moves.len() as u64;
		let mut winning_residues: HashSet<u64> = HashSet::new();
		let mut wins: Vec<u64> = Vec::new();
		let mut step = 0u64;

		loop {
			if let Some(budget) = budget.filter(|&budget| step >= budget) {
				return Err(SyncError::Undetermined { budget });
			}

			let residue = step % script_len;

			if self.hanoi.is_winning() {
				let repeated = !winning_residues.insert(residue);
				// A repeated residue implies an earlier recorded win, so the gap is positive.
				let period = wins.first().and_then(|&first| NonZeroU64::new(step - first));

				if let (true, Some(period)) = (repeated, period) {
					debug!(
						disks = self.config.disk_count(),
						period = period.get(),
						phases = wins.len(),
						"winning cycle closed"
					);
					return Ok(WinDescription { period, phases: wins });
				}

				trace!(step, residue, "win");
				wins.push(step);
			}

			self.hanoi.apply(moves[residue as usize])?;
			step += 1;
		}
	}
}

/// Every winning step of one automaton, by plain simulation.
///
/// Stops after yielding the first simulation error. Like the detector, it
/// spins forever looking for the next win of an automaton that never wins.
pub struct WinningSteps<'a> {
	hanoi: Hanoi,
	moves: &'a [Move],
	step: u64,
	failed: bool,
}

impl<'a> WinningSteps<'a> {
	pub fn new(config: &'a AutomatonConfig) -> Self {
		Self {
			hanoi: Hanoi::new(config),
			moves: config.script().moves(),
			step: 0,
			failed: false,
		}
	}
}

impl Iterator for WinningSteps<'_> {
	type Item = Result<u64, SimulationError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		loop {
			let step = self.step;
			let won = self.hanoi.is_winning();
			let mv = self.moves[(step % self.moves.len() as u64) as usize];
			self.step += 1;

			if let Err(err) = self.hanoi.apply(mv) {
				self.failed = true;
				return Some(Err(err));
			}
			if won {
				return Some(Ok(step));
			}
		}
	}
}
