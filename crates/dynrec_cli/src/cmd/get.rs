use std::path::PathBuf;

use dynrec::record::{Accessor, Value};

use crate::cmd::input::InferArgs;
use crate::cmd::util::emit_json;
use crate::error::CliError;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub infer: InferArgs,
	/// Field name; dots descend into nested records (`Address.City`).
	#[arg(long)]
	pub field: String,
	/// Record index for array documents.
	#[arg(long, default_value_t = 0)]
	pub index: usize,
}

/// Print one field of a decoded record as JSON; absent fields print `null`.
pub fn run(args: Args) -> Result<(), CliError> {
	let Args { path, infer, field, index } = args;

	let decoded = infer.open(&path)?.decode()?;
	let segments: Vec<&str> = field.split('.').collect();
	let value = match decoded.instances().get(index) {
		Some(instance) => lookup(&mut Accessor::new(instance), &segments),
		None => {
			tracing::debug!(index, records = decoded.instances().len(), "record index out of range");
			None
		}
	};

	emit_json(&value.unwrap_or(serde_json::Value::Null))
}

fn lookup(accessor: &mut Accessor<'_>, path: &[&str]) -> Option<serde_json::Value> {
	match path {
		[] => None,
		[last] => accessor.get(last).map(Value::to_json),
		[head, rest @ ..] => {
			let mut nested = accessor.record(head).ok()?;
			lookup(&mut nested, rest)
		}
	}
}
