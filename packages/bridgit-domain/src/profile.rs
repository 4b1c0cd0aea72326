use std::collections::BTreeSet;

use time::{Date, OffsetDateTime};

use crate::{
	lists::ParsedList,
	normalize::{self, Location, NormalizerTables},
	text::{Bag, StopwordTokenizer, Tokenizer},
};

/// One row of the profile table, exactly as read. Every column is optional.
#[derive(Clone, Debug, Default)]
pub struct RawProfile {
	pub birthday: Option<String>,
	pub current_company: Option<String>,
	pub gender: Option<String>,
	pub home_location: Option<String>,
	pub industry: Option<String>,
	pub interests: Option<String>,
	pub occupation: Option<String>,
	pub pitches: Option<String>,
	pub real_time_availability: Option<String>,
	pub search_distance_type: Option<String>,
	pub visibility: Option<String>,
	pub visibility_gender: Option<String>,
}

/// A normalized profile. Never mutated after construction.
#[derive(Clone, Debug)]
pub struct Profile {
	pub birthday: Option<Date>,
	pub current_company: String,
	pub gender: String,
	pub home_location: String,
	pub location: Location,
	pub industry_raw: String,
	pub industry_tokens: BTreeSet<String>,
	pub interests: Vec<String>,
	pub occupation: String,
	pub occupation_bag: Bag,
	pub pitches: Vec<String>,
	pub pitches_text: String,
	pub pitches_bag: Bag,
	pub real_time_availability: bool,
	pub search_distance_type: String,
	pub visible: bool,
	pub gender_visible: bool,
	/// `None` exactly when `birthday` is absent.
	pub age: Option<i32>,
}

/// Turns raw rows into [`Profile`]s against a fixed reference date.
#[derive(Clone, Debug)]
pub struct ProfileNormalizer {
	pub tables: NormalizerTables,
	pub tokenizer: StopwordTokenizer,
	pub today: Date,
}
impl ProfileNormalizer {
	pub fn new(today: Date) -> Self {
		Self { tables: NormalizerTables::default(), tokenizer: StopwordTokenizer::default(), today }
	}

	pub fn today() -> Self {
		Self::new(OffsetDateTime::now_utc().date())
	}

	pub fn normalize(&self, raw: &RawProfile) -> Profile {
		let birthday = raw.birthday.as_deref().and_then(normalize::parse_date);
		let home_location = trimmed(raw.home_location.as_deref());
		let industry_raw = raw.industry.clone().unwrap_or_default();
		let occupation = raw.occupation.clone().unwrap_or_default();
		let interests = ParsedList::parse(Some(raw.interests.as_deref().unwrap_or("[]"))).into_items();
		let pitches = ParsedList::parse(Some(raw.pitches.as_deref().unwrap_or("[]"))).into_items();
		let pitches_text = pitches.join(" ");

		Profile {
			birthday,
			current_company: trimmed(raw.current_company.as_deref()),
			gender: trimmed(raw.gender.as_deref()).to_lowercase(),
			location: self.tables.location(&home_location),
			home_location,
			industry_tokens: self.tables.industry_tokens(&industry_raw),
			industry_raw,
			interests,
			occupation_bag: self.tokenizer.bag(&occupation),
			occupation,
			pitches_bag: self.tokenizer.bag(&pitches_text),
			pitches,
			pitches_text,
			real_time_availability: normalize::parse_bool(
				raw.real_time_availability.as_deref().unwrap_or("FALSE"),
			),
			search_distance_type: trimmed(raw.search_distance_type.as_deref()).to_lowercase(),
			visible: normalize::parse_bool(raw.visibility.as_deref().unwrap_or("TRUE")),
			gender_visible: normalize::parse_bool(raw.visibility_gender.as_deref().unwrap_or("TRUE")),
			age: birthday.map(|birthday| normalize::age_on(birthday, self.today)),
		}
	}
}

fn trimmed(raw: Option<&str>) -> String {
	raw.unwrap_or_default().trim().to_string()
}
