use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Install the stderr fmt subscriber. `RUST_LOG` wins over `directive` when set.
pub fn init(directive: &str) -> Result<(), CliError> {
	let filter = match EnvFilter::try_from_default_env() {
		Ok(filter) => filter,
		Err(_) => EnvFilter::try_new(directive).map_err(|source| CliError::LogFilter {
			directive: directive.to_owned(),
			source,
		})?,
	};

	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.try_init();
	Ok(())
}
