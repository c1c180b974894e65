/// Field value lookup command.
pub mod get;
/// Shared input loading and inference flags.
pub mod input;
/// Diagnostics subscriber setup.
pub mod logging;
/// Inferred schema printing command.
pub mod schema;

mod util;
