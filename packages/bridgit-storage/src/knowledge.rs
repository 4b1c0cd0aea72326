use std::{fs, path::Path};

use crate::{Error, Result};

const KNOWLEDGE_EXTENSION: &str = "md";

/// A knowledge document and the file name it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceDocument {
	pub source: String,
	pub text: String,
}

/// Reads every markdown file directly under `dir`, ordered by file name.
pub fn load_knowledge_dir(dir: &Path) -> Result<Vec<SourceDocument>> {
	let io_err = |err: std::io::Error| Error::Io { path: dir.to_path_buf(), source: err };
	let mut paths = Vec::new();

	for entry in fs::read_dir(dir).map_err(io_err)? {
		let path = entry.map_err(io_err)?.path();

		if !path.is_file()
			|| path.extension().and_then(|ext| ext.to_str()) != Some(KNOWLEDGE_EXTENSION)
		{
			tracing::debug!(path = %path.display(), "Skipping non-markdown knowledge entry.");

			continue;
		}

		paths.push(path);
	}

	paths.sort();

	let mut documents = Vec::with_capacity(paths.len());

	for path in paths {
		let text = fs::read_to_string(&path)
			.map_err(|err| Error::Io { path: path.clone(), source: err })?;
		let source = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();

		documents.push(SourceDocument { source, text });
	}

	tracing::info!(dir = %dir.display(), documents = documents.len(), "Loaded knowledge documents.");

	Ok(documents)
}
