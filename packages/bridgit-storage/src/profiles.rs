use std::{collections::HashMap, fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord};

use crate::{Error, Result};
use bridgit_domain::{Profile, ProfileNormalizer, RawProfile};

pub const COLUMNS: [&str; 12] = [
	"birthday",
	"currentCompany",
	"gender",
	"homeLocation",
	"industry",
	"interests",
	"occupation",
	"pitches",
	"realTimeAvailability",
	"searchDistanceType",
	"visibility",
	"visibilityGender",
];

/// Loads a tab-delimited profile table with a header row.
pub fn load_profiles(path: &Path, normalizer: &ProfileNormalizer) -> Result<Vec<Profile>> {
	let file = File::open(path).map_err(|err| Error::Io { path: path.to_path_buf(), source: err })?;
	let profiles = read_profiles(file, normalizer)
		.map_err(|err| Error::Csv { path: path.to_path_buf(), source: err })?;

	tracing::info!(path = %path.display(), profiles = profiles.len(), "Loaded profile table.");

	Ok(profiles)
}

pub fn read_profiles<R>(reader: R, normalizer: &ProfileNormalizer) -> csv::Result<Vec<Profile>>
where
	R: Read,
{
	let mut reader = ReaderBuilder::new().delimiter(b'\t').flexible(true).from_reader(reader);
	let headers = reader.headers()?.clone();
	let positions: HashMap<&str, usize> =
		headers.iter().enumerate().map(|(idx, header)| (header.trim(), idx)).collect();
	let missing: Vec<&str> =
		COLUMNS.iter().copied().filter(|column| !positions.contains_key(column)).collect();

	if !missing.is_empty() {
		tracing::warn!(?missing, "Profile table lacks columns; defaults apply.");
	}

	let mut profiles = Vec::new();

	for record in reader.records() {
		let raw = raw_profile(&record?, &positions);

		profiles.push(normalizer.normalize(&raw));
	}

	Ok(profiles)
}

fn raw_profile(record: &StringRecord, positions: &HashMap<&str, usize>) -> RawProfile {
	let cell = |column: &str| {
		positions.get(column).and_then(|idx| record.get(*idx)).map(str::to_string)
	};

	RawProfile {
		birthday: cell("birthday"),
		current_company: cell("currentCompany"),
		gender: cell("gender"),
		home_location: cell("homeLocation"),
		industry: cell("industry"),
		interests: cell("interests"),
		occupation: cell("occupation"),
		pitches: cell("pitches"),
		real_time_availability: cell("realTimeAvailability"),
		search_distance_type: cell("searchDistanceType"),
		visibility: cell("visibility"),
		visibility_gender: cell("visibilityGender"),
	}
}
