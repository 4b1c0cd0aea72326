use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read {path:?}.")]
	Io { path: PathBuf, source: std::io::Error },
	#[error("Malformed profile table at {path:?}.")]
	Csv { path: PathBuf, source: csv::Error },
	#[error("Malformed demo bank at {path:?}.")]
	Json { path: PathBuf, source: serde_json::Error },
}
