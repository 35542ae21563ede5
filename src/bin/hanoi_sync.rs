// IBM Ponder This, April 2024: synchronized Hanoi automata.
//
// Input: a line with the number of automata, then one `<disk_count> <script>`
// line per automaton. Prints the earliest common winning step, or -1.

use std::io::{self, BufRead};
use std::process::ExitCode;
use std::str::FromStr;

use hanoi_sync::logging::init_logging;
use hanoi_sync::{AutomatonConfig, ConfigError, Hanoi, SyncSolver};
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, error, trace};

#[derive(Debug, Error)]
enum InputError {
	#[error("failed to read input: {0}")]
	Io(#[from] io::Error),

	#[error(transparent)]
	Config(#[from] ConfigError),
}

fn read_configs(input: impl BufRead) -> Result<Vec<AutomatonConfig>, InputError> {
	let mut lines = input.lines();

	let header = lines.next().transpose()?.unwrap_or_default();
	let expected = usize::from_str(header.trim())
		.map_err(|_err| ConfigError::BadAutomatonCount(header.clone()))?;

	let configs: Vec<AutomatonConfig> = lines
		.take(expected)
		.map(|line| -> Result<AutomatonConfig, InputError> { Ok(AutomatonConfig::from_str(&line?)?) })
		.try_collect()?;

	if configs.len() != expected {
		return Err(ConfigError::MissingAutomata {
			expected,
			found: configs.len(),
		}
		.into());
	}

	Ok(configs)
}

fn main() -> ExitCode {
	init_logging();

	let configs = match read_configs(io::stdin().lock()) {
		Ok(configs) => configs,
		Err(err) => {
			error!(%err, "bad input");
			return ExitCode::FAILURE;
		}
	};

	for config in &configs {
		debug!(%config, "loaded automaton");
		trace!("initial rods\n{}", Hanoi::new(config).snapshot());
	}

	match SyncSolver::new().parallel(true).solve(&configs) {
		Ok(outcome) => {
			println!("{outcome}");
			ExitCode::SUCCESS
		}
		Err(err) => {
			error!(%err, "synchronization failed");
			ExitCode::FAILURE
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn reads_demo_input() {
		let input = "\
2
7 12021121120020211202121
10 0211202112002
";
		let configs = read_configs(input.as_bytes()).unwrap();

		assert_eq!(configs.len(), 2);
		assert_eq!(configs[1].disk_count(), 10);
		assert_eq!(configs[1].script().to_string(), "0211202112002");
	}

	#[test]
	fn short_input_is_rejected() {
		let input = "\
3
7 12021121120020211202121
";
		assert!(matches!(
			read_configs(input.as_bytes()),
			Err(InputError::Config(ConfigError::MissingAutomata { expected: 3, found: 1 }))
		));
	}

	#[test]
	fn bad_header_is_rejected() {
		assert!(matches!(
			read_configs("three\n".as_bytes()),
			Err(InputError::Config(ConfigError::BadAutomatonCount(header))) if header == "three"
		));
	}

	#[test]
	fn unreadable_line_is_an_io_error() {
		let input: &[u8] = b"2\n7 12021121120020211202121\n\xff\xfe\n";

		assert!(matches!(read_configs(input), Err(InputError::Io(_))));
	}
}
