#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;
mod error;

use error::CliError;

#[derive(Parser)]
#[command(name = "dynrec", about = "Inspect JSON and YAML documents through inferred record types")]
struct Cli {
	/// Log filter directive for diagnostics on stderr; `RUST_LOG` takes precedence.
	#[arg(long, global = true, default_value = "warn")]
	log_level: String,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Schema(cmd::schema::Args),
	Get(cmd::get::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), CliError> {
	let cli = Cli::parse();
	cmd::logging::init(&cli.log_level)?;

	match cli.command {
		Commands::Schema(args) => cmd::schema::run(args),
		Commands::Get(args) => cmd::get::run(args),
	}
}
