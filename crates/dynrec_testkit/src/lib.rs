//! Shared fixture helpers for workspace crates.

use std::path::{Path, PathBuf};

/// Directory under the workspace root holding JSON/YAML fixtures.
pub const FIXTURE_DIR: &str = "fixtures";

/// Workspace root, two levels above this crate's manifest.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir.ancestors().nth(2).unwrap_or(manifest_dir).to_path_buf()
}

/// Path of a named fixture document.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join(FIXTURE_DIR).join(name)
}

/// Fixture bytes; panics naming the path when unreadable.
pub fn read_fixture(name: &str) -> Vec<u8> {
	let path = fixture_path(name);
	std::fs::read(&path).unwrap_or_else(|err| panic!("fixture {} readable: {err}", path.display()))
}

/// Fixture parsed as a JSON tree.
pub fn fixture_json(name: &str) -> serde_json::Value {
	serde_json::from_slice(&read_fixture(name)).unwrap_or_else(|err| panic!("fixture {name} is valid json: {err}"))
}

#[cfg(test)]
mod tests {
	use super::{FIXTURE_DIR, fixture_json, fixture_path, workspace_root};

	#[test]
	fn fixtures_resolve_under_workspace_root() {
		assert!(workspace_root().join("Cargo.toml").is_file());
		let path = fixture_path("person.json");
		assert!(path.starts_with(workspace_root().join(FIXTURE_DIR)));
		assert!(path.is_file(), "missing {}", path.display());
		assert_eq!(fixture_json("person.json")["name"], "Ann");
	}
}
