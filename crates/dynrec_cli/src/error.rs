use dynrec::record::RecordError;

/// Failures surfaced by CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
	#[error(transparent)]
	Record(#[from] RecordError),
	#[error("failed to encode json output: {0}")]
	Json(#[from] serde_json::Error),
	#[error("invalid log level {directive:?}: {source}")]
	LogFilter {
		directive: String,
		#[source]
		source: tracing_subscriber::filter::ParseError,
	},
}
