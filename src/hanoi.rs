//! Three-rod disk automaton driven by a cyclic move script.
//!
//! The smallest disk (rank 1) never lives in a stack: its rod is tracked as a
//! scalar, so the stacks only ever hold ranks `2..=disk_count` above a
//! sentinel that is larger than any real disk.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;

use crate::error::{ConfigError, SimulationError};

pub type Rank = u32;

const SENTINEL: Rank = Rank::MAX;
const ROD_COUNT: usize = 3;
const TARGET_ROD: usize = 1;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Move {
	/// Symbol `0`: the smallest disk goes one rod forward.
	SmallForward,
	/// Symbol `1`: the smallest disk goes two rods forward.
	SmallBackward,
	/// Symbol `2`: the only legal move not touching the smallest disk.
	Other,
}

impl Move {
	pub fn symbol(self) -> char {
		match self {
			Self::SmallForward => '0',
			Self::SmallBackward => '1',
			Self::Other => '2',
		}
	}
}

impl TryFrom<char> for Move {
	type Error = char;

	fn try_from(symbol: char) -> Result<Self, Self::Error> {
		match symbol {
			'0' => Ok(Self::SmallForward),
			'1' => Ok(Self::SmallBackward),
			'2' => Ok(Self::Other),
			_ => Err(symbol),
		}
	}
}

#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct MoveScript {
	moves: Vec<Move>,
}

impl MoveScript {
	pub fn new(moves: Vec<Move>) -> Result<Self, ConfigError> {
		if moves.is_empty() {
			return Err(ConfigError::EmptyScript);
		}
		Ok(Self { moves })
	}

	pub fn len(&self) -> usize {
		self.moves.len()
	}

	pub fn is_empty(&self) -> bool {
		self.moves.is_empty()
	}

	pub fn moves(&self) -> &[Move] {
		&self.moves
	}

	pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
		self.moves.iter().copied()
	}
}

impl FromStr for MoveScript {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let moves: Vec<Move> = s
			.chars()
			.enumerate()
			.map(|(position, symbol)| {
				Move::try_from(symbol).map_err(|symbol| ConfigError::UnknownMove { symbol, position })
			})
			.try_collect()?;

		Self::new(moves)
	}
}

impl Display for MoveScript {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		self.moves.iter().try_for_each(|mv| write!(f, "{}", mv.symbol()))
	}
}

/// One automaton: how many disks it has and the script it replays forever.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct AutomatonConfig {
	disk_count: Rank,
	script: MoveScript,
}

impl AutomatonConfig {
	pub fn new(disk_count: Rank, script: MoveScript) -> Result<Self, ConfigError> {
		match disk_count {
			0 => Err(ConfigError::NoDisks),
			SENTINEL => Err(ConfigError::TooManyDisks { disk_count }),
			_ => Ok(Self { disk_count, script }),
		}
	}

	pub fn disk_count(&self) -> Rank {
		self.disk_count
	}

	pub fn script(&self) -> &MoveScript {
		&self.script
	}
}

/// Parses `"<disk_count> <script>"`, e.g. `"7 12021121120020211202121"`.
impl FromStr for AutomatonConfig {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.split_whitespace().collect_vec().as_slice() {
			[disk_count, script] => {
				let disk_count = Rank::from_str(disk_count)
					.map_err(|_err| ConfigError::BadDiskCount(disk_count.to_string()))?;
				let script = MoveScript::from_str(script)?;
				Self::new(disk_count, script)
			}
			_ => Err(ConfigError::MalformedLine(s.to_owned())),
		}
	}
}

impl Display for AutomatonConfig {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} {}", self.disk_count, self.script)
	}
}

#[derive(Debug, Clone, Eq, PartialEq)]
struct Rod {
	disks: Vec<Rank>,
}

impl Rod {
	fn bare() -> Self {
		Self { disks: vec![SENTINEL] }
	}

	fn with_disks(disks: impl IntoIterator<Item = Rank>) -> Self {
		let mut rod = Self::bare();
		rod.disks.extend(disks);
		rod
	}

	fn top(&self) -> Rank {
		self.disks.last().copied().unwrap_or(SENTINEL)
	}

	fn is_bare(&self) -> bool {
		self.disks.len() <= 1
	}

	/// Real disks on the rod, sentinel excluded.
	fn len(&self) -> usize {
		self.disks.len().saturating_sub(1)
	}

	fn pop(&mut self) -> Option<Rank> {
		if self.is_bare() {
			None
		} else {
			self.disks.pop()
		}
	}

	fn push(&mut self, disk: Rank) {
		self.disks.push(disk);
	}

	fn real_disks(&self) -> &[Rank] {
		self.disks.get(1..).unwrap_or_default()
	}
}

/// Simulator state for a single automaton.
#[derive(Debug, Clone)]
pub struct Hanoi {
	disk_count: Rank,
	rods: [Rod; ROD_COUNT],
	special_rod: usize,
}

impl Hanoi {
	pub fn new(config: &AutomatonConfig) -> Self {
		let disk_count = config.disk_count();
		Self {
			disk_count,
			rods: [Rod::with_disks((2..=disk_count).rev()), Rod::bare(), Rod::bare()],
			special_rod: 0,
		}
	}

	/// Arbitrary rods above the sentinels, bottom first, no checks.
	#[cfg(test)]
	pub(crate) fn from_rods(config: &AutomatonConfig, rods: [Vec<Rank>; ROD_COUNT], special_rod: usize) -> Self {
		Self {
			disk_count: config.disk_count(),
			rods: rods.map(Rod::with_disks),
			special_rod,
		}
	}

	pub fn special_rod(&self) -> usize {
		self.special_rod
	}

	pub fn apply(&mut self, mv: Move) -> Result<(), SimulationError> {
		match mv {
			Move::SmallForward => self.shift_special(1),
			Move::SmallBackward => self.shift_special(2),
			Move::Other => self.move_other_disk()?,
		}
		Ok(())
	}

	pub fn is_winning(&self) -> bool {
		self.special_rod == TARGET_ROD
			&& self.rods[TARGET_ROD].len() + 1 == self.disk_count as usize
	}

	pub fn snapshot(&self) -> Snapshot {
		let mut rods = self.rods.clone().map(|rod| rod.real_disks().to_vec());
		rods[self.special_rod].push(1);
		Snapshot { rods }
	}

	fn shift_special(&mut self, offset: usize) {
		self.special_rod = (self.special_rod + offset) % ROD_COUNT;
	}

	fn move_other_disk(&mut self) -> Result<(), SimulationError> {
		let left = (self.special_rod + 1) % ROD_COUNT;
		let right = (self.special_rod + 2) % ROD_COUNT;

		let (from, to) = match self.rods[left].top().cmp(&self.rods[right].top()) {
			Ordering::Less => (left, right),
			Ordering::Greater => (right, left),
			// Only a single-disk automaton has two bare rods here.
			Ordering::Equal if self.rods[left].is_bare() => return Ok(()),
			Ordering::Equal => {
				return Err(SimulationError::EqualTops {
					rank: self.rods[left].top(),
				})
			}
		};

		if let Some(disk) = self.rods[from].pop() {
			self.rods[to].push(disk);
		}
		Ok(())
	}
}

/// Frozen copy of the rods, smallest disk included, for display only.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snapshot {
	rods: [Vec<Rank>; ROD_COUNT],
}

impl Snapshot {
	/// Disks on `rod`, bottom first.
	pub fn rod(&self, rod: usize) -> &[Rank] {
		self.rods.get(rod).map(Vec::as_slice).unwrap_or_default()
	}
}

impl Display for Snapshot {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let height = self.rods.iter().map(Vec::len).max().unwrap_or(0);

		for level in (0..height).rev() {
			let row = self
				.rods
				.iter()
				.map(|rod| rod.get(level).map_or_else(|| " ".to_owned(), Rank::to_string))
				.join("  ");
			writeln!(f, "{row}")?;
		}

		write!(f, "_  _  _")
	}
}
