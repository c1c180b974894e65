use std::path::PathBuf;

use dynrec::record::{FieldDescriptor, RecordType};

use crate::cmd::input::InferArgs;
use crate::cmd::util::emit_json;
use crate::error::CliError;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[command(flatten)]
	pub infer: InferArgs,
	/// Print fields as a JSON array instead of the declaration text.
	#[arg(long)]
	pub json: bool,
}

/// Print the record type inferred from a document.
pub fn run(args: Args) -> Result<(), CliError> {
	let Args { path, infer, json } = args;

	let record_type = infer.open(&path)?.record_type()?;
	if json {
		emit_json(&field_rows(&record_type))?;
	} else {
		print!("{}", record_type.definition());
	}
	Ok(())
}

fn field_rows(record_type: &RecordType) -> Vec<FieldJson> {
	record_type.fields().map(FieldJson::from).collect()
}

#[derive(Debug, serde::Serialize)]
struct FieldJson {
	name: String,
	kind: &'static str,
	pointer: bool,
	tag: Option<String>,
}

impl From<&FieldDescriptor> for FieldJson {
	fn from(field: &FieldDescriptor) -> Self {
		Self {
			name: field.name.to_string(),
			kind: field.kind().as_str(),
			pointer: field.is_pointer(),
			tag: field.tag.as_deref().map(str::to_owned),
		}
	}
}
