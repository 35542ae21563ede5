//! Tracing setup for the binary.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `hanoi_sync=debug`.
pub const LOG_ENV: &str = "HANOI_SYNC_LOG";

const DEFAULT_DIRECTIVE: &str = "warn";

/// Installs a stderr subscriber. Safe to call more than once.
pub fn init_logging() {
	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init();
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn init_twice_is_harmless() {
		init_logging();
		init_logging();
		tracing::info!("still logging");
	}
}
