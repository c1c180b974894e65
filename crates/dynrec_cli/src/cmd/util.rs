use serde::Serialize;

use crate::error::CliError;

/// Pretty-print a JSON payload on stdout.
pub(crate) fn emit_json<T: Serialize + ?Sized>(payload: &T) -> Result<(), CliError> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}
