use std::path::{Path, PathBuf};

use dynrec::record::{Format, InferOptions, NestPolicy, RecordError, SchemaDecoder};

use crate::error::CliError;

/// Input encoding selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
	Json,
	Yaml,
}

impl From<FormatArg> for Format {
	fn from(value: FormatArg) -> Self {
		match value {
			FormatArg::Json => Format::Json,
			FormatArg::Yaml => Format::Yaml,
		}
	}
}

/// Inference flags shared by every command.
#[derive(Debug, Default, clap::Args)]
pub struct InferArgs {
	/// Input encoding; guessed from the file extension when omitted.
	#[arg(long, value_enum)]
	pub format: Option<FormatArg>,
	/// Keep nested objects as untyped maps.
	#[arg(long)]
	pub flatten: bool,
	/// Omit the original-key tags from inferred fields.
	#[arg(long)]
	pub no_tags: bool,
	/// Display name of the root record type.
	#[arg(long)]
	pub name: Option<String>,
	/// YAML or JSON file holding inference options; flags override its values.
	#[arg(long)]
	pub options: Option<PathBuf>,
}

impl InferArgs {
	/// Resolve the effective inference options.
	pub fn resolve(&self) -> Result<InferOptions, CliError> {
		let mut options = match &self.options {
			Some(path) => InferOptions::load(path)?,
			None => InferOptions::default(),
		};
		if self.flatten {
			options.nest = NestPolicy::Flatten;
		}
		if self.no_tags {
			options.use_tags = false;
		}
		if let Some(name) = &self.name {
			options.display_name = name.clone();
		}
		Ok(options)
	}

	/// Effective input format for `path`.
	pub fn format_for(&self, path: &Path) -> Format {
		self.format.map_or_else(|| Format::from_path(path), Format::from)
	}

	/// Read and parse the input document.
	pub fn open(&self, path: &Path) -> Result<SchemaDecoder, CliError> {
		let options = self.resolve()?;
		let format = self.format_for(path);
		let bytes = std::fs::read(path).map_err(RecordError::from)?;
		tracing::debug!(path = %path.display(), format = format.name(), bytes = bytes.len(), "loaded input");
		Ok(SchemaDecoder::from_bytes(&bytes, format, options)?)
	}
}
