use std::{fs, path::Path};

use crate::{Error, Result};
use bridgit_domain::Demo;

/// Reads a JSON array of demo records.
pub fn load_demos(path: &Path) -> Result<Vec<Demo>> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::Io { path: path.to_path_buf(), source: err })?;
	let demos: Vec<Demo> = serde_json::from_str(&raw)
		.map_err(|err| Error::Json { path: path.to_path_buf(), source: err })?;

	tracing::info!(path = %path.display(), demos = demos.len(), "Loaded demo bank.");

	Ok(demos)
}
