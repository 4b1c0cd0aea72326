use std::collections::BTreeSet;

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Alias, exonym and synonym tables used while canonicalizing profile fields.
///
/// Location aliases are matched on folded text (NFKD, combining marks removed, lowercased) in a
/// single left-to-right pass. At each position the longest alias wins, and an alias only matches
/// when it is not glued to a neighbouring letter or digit. Replacement text is never rescanned, so
/// "usa" is not rewritten again by the "us" alias and "houston" keeps its "us".
#[derive(Clone, Debug)]
pub struct NormalizerTables {
	location_aliases: Vec<(String, String)>,
	industry_synonyms: Vec<(String, String)>,
	industry_vocabulary: Vec<String>,
}
impl NormalizerTables {
	pub fn new<'a>(
		location_aliases: impl IntoIterator<Item = (&'a str, &'a str)>,
		industry_synonyms: impl IntoIterator<Item = (&'a str, &'a str)>,
		industry_vocabulary: impl IntoIterator<Item = &'a str>,
	) -> Self {
		let mut location_aliases: Vec<(String, String)> = location_aliases
			.into_iter()
			.map(|(alias, canonical)| (fold(alias), canonical.to_string()))
			.filter(|(alias, _)| !alias.is_empty())
			.collect();

		// Longest first; ties keep declaration order.
		location_aliases.sort_by(|lhs, rhs| rhs.0.chars().count().cmp(&lhs.0.chars().count()));

		Self {
			location_aliases,
			industry_synonyms: industry_synonyms
				.into_iter()
				.map(|(needle, canonical)| (needle.to_lowercase(), canonical.to_string()))
				.collect(),
			industry_vocabulary: industry_vocabulary.into_iter().map(str::to_string).collect(),
		}
	}

	pub fn location(&self, raw: &str) -> Location {
		let canonical = self.apply_location_aliases(&fold(raw));
		let parts: Vec<&str> = canonical.split(',').map(str::trim).collect();
		let city = parts.first().copied().unwrap_or_default();
		let region = if parts.len() > 1 { parts[1] } else { "" };
		let country = parts.last().copied().unwrap_or_default();

		Location {
			city: city.to_string(),
			region: region.to_string(),
			country: country.to_string(),
		}
	}

	/// Canonical industry labels found in `raw` by substring containment.
	pub fn industry_tokens(&self, raw: &str) -> BTreeSet<String> {
		let lowered = raw.to_lowercase();
		let mut tokens = BTreeSet::new();

		for (needle, canonical) in &self.industry_synonyms {
			if lowered.contains(needle.as_str()) {
				tokens.insert(canonical.clone());
			}
		}
		for word in &self.industry_vocabulary {
			if lowered.contains(word.as_str()) {
				tokens.insert(word.clone());
			}
		}

		tokens
	}

	fn apply_location_aliases(&self, folded: &str) -> String {
		let mut out = String::with_capacity(folded.len());
		let mut pos = 0_usize;

		'scan: while pos < folded.len() {
			let rest = &folded[pos..];
			let boundary_before =
				folded[..pos].chars().next_back().is_none_or(|ch| !ch.is_alphanumeric());

			if boundary_before {
				for (alias, canonical) in &self.location_aliases {
					if !rest.starts_with(alias.as_str()) {
						continue;
					}

					let boundary_after =
						rest[alias.len()..].chars().next().is_none_or(|ch| !ch.is_alphanumeric());

					if boundary_after {
						out.push_str(canonical);
						pos += alias.len();

						continue 'scan;
					}
				}
			}

			let Some(ch) = rest.chars().next() else { break };

			out.push(ch);
			pos += ch.len_utf8();
		}

		out
	}
}
impl Default for NormalizerTables {
	fn default() -> Self {
		Self::new(
			[
				("nyc", "new york"),
				("new york city", "new york"),
				("united states of america", "usa"),
				("united states", "usa"),
				("u.s.a.", "usa"),
				("u.s.", "usa"),
				("us", "usa"),
				("швейцарія", "switzerland"),
				("schweiz", "switzerland"),
			],
			[
				("tech", "technology"),
				("technik", "technology"),
				("technolog", "technology"),
				("finance", "finance"),
				("finanzen", "finance"),
				("verkauf", "sales"),
				("gesundhei", "health"),
				("health", "health"),
				("sales", "sales"),
			],
			["technology", "finance", "health", "sales"],
		)
	}
}

/// A home location split into comma-separated components.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
	pub city: String,
	pub region: String,
	pub country: String,
}

/// Tiered proximity: same city 1.0, same region 0.8, same country 0.5, otherwise 0.0.
pub fn location_score(lhs: &Location, rhs: &Location) -> f64 {
	if !lhs.city.is_empty() && lhs.city == rhs.city {
		return 1.0;
	}
	if !lhs.region.is_empty() && lhs.region == rhs.region {
		return 0.8;
	}
	if !lhs.country.is_empty() && lhs.country == rhs.country {
		return 0.5;
	}

	0.0
}

/// `true` only for a case-insensitive `TRUE`.
pub fn parse_bool(raw: &str) -> bool {
	raw.trim().eq_ignore_ascii_case("TRUE")
}

/// ISO-8601 calendar date. `0`, `null` and blank cells are absent, as is anything unparsable.
pub fn parse_date(raw: &str) -> Option<Date> {
	let trimmed = raw.trim();

	if trimmed.is_empty() || trimmed == "0" || trimmed.eq_ignore_ascii_case("null") {
		return None;
	}

	Date::parse(trimmed, ISO_DATE).ok()
}

/// Completed years between `birth` and `today`.
pub fn age_on(birth: Date, today: Date) -> i32 {
	let before_birthday =
		(u8::from(today.month()), today.day()) < (u8::from(birth.month()), birth.day());

	today.year() - birth.year() - i32::from(before_birthday)
}

/// Step function of the absolute age gap. Unknown ages score 0.5.
pub fn age_compatibility(lhs: Option<i32>, rhs: Option<i32>) -> f64 {
	let (Some(lhs), Some(rhs)) = (lhs, rhs) else { return 0.5 };

	match lhs.abs_diff(rhs) {
		0..=5 => 1.0,
		6..=10 => 0.8,
		11..=15 => 0.6,
		16..=20 => 0.4,
		_ => 0.2,
	}
}

fn fold(raw: &str) -> String {
	raw.nfkd().filter(|ch| !is_combining_mark(*ch)).collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
	use time::macros::date;

	use super::*;

	#[test]
	fn city_aliases_collapse_to_new_york() {
		let tables = NormalizerTables::default();
		let lhs = tables.location("New York, NY, USA");
		let rhs = tables.location("New York City, NY, USA");

		assert_eq!(lhs.city, "new york");
		assert_eq!(rhs.city, "new york");
		assert_eq!(location_score(&lhs, &rhs), 1.0);
	}

	#[test]
	fn country_aliases_do_not_double_substitute() {
		let tables = NormalizerTables::default();
		let location = tables.location("Houston, TX, United States");

		assert_eq!(location.city, "houston");
		assert_eq!(location.country, "usa");
		assert_eq!(tables.location("Austin, TX, USA").country, "usa");
		assert_eq!(tables.location("Austin, TX, US").country, "usa");
		assert_eq!(tables.location("Austin, TX, U.S.").country, "usa");
	}

	#[test]
	fn aliases_only_match_whole_words() {
		let tables = NormalizerTables::default();

		assert_eq!(tables.location("NYCity, NY").city, "nycity");
		assert_eq!(tables.location("NYC, NY").city, "new york");
	}

	#[test]
	fn diacritics_and_exonyms_fold() {
		let tables = NormalizerTables::default();

		assert_eq!(tables.location("İstanbul, Beşiktaş, Türkiye").region, "besiktas");
		assert_eq!(tables.location("Київ, Швейцарія").country, "switzerland");
	}

	#[test]
	fn single_component_is_city_and_country() {
		let location = NormalizerTables::default().location("Berlin");

		assert_eq!(location.city, "berlin");
		assert_eq!(location.region, "");
		assert_eq!(location.country, "berlin");
	}

	#[test]
	fn location_tiers_are_exclusive() {
		let tables = NormalizerTables::default();
		let brooklyn = tables.location("Brooklyn, NY, USA");
		let albany = tables.location("Albany, NY, USA");
		let austin = tables.location("Austin, TX, USA");
		let paris = tables.location("Paris, IDF, France");

		assert_eq!(location_score(&brooklyn, &albany), 0.8);
		assert_eq!(location_score(&brooklyn, &austin), 0.5);
		assert_eq!(location_score(&brooklyn, &paris), 0.0);
		assert_eq!(location_score(&Location::default(), &Location::default()), 0.0);
	}

	#[test]
	fn industry_synonyms_map_to_vocabulary() {
		let tables = NormalizerTables::default();
		let tokens = tables.industry_tokens("Finanzen & Technik");

		assert_eq!(tokens.into_iter().collect::<Vec<_>>(), vec!["finance", "technology"]);
		assert!(tables.industry_tokens("Hospitality").is_empty());
	}

	#[test]
	fn booleans_only_accept_true() {
		assert!(parse_bool(" true "));
		assert!(parse_bool("TRUE"));
		assert!(!parse_bool("yes"));
		assert!(!parse_bool(""));
	}

	#[test]
	fn dates_treat_sentinels_as_absent() {
		assert_eq!(parse_date("1990-04-12"), Some(date!(1990 - 04 - 12)));
		assert_eq!(parse_date("0"), None);
		assert_eq!(parse_date("NULL"), None);
		assert_eq!(parse_date(""), None);
		assert_eq!(parse_date("12/04/1990"), None);
	}

	#[test]
	fn age_counts_completed_years() {
		let birth = date!(1990 - 06 - 15);

		assert_eq!(age_on(birth, date!(2026 - 06 - 14)), 35);
		assert_eq!(age_on(birth, date!(2026 - 06 - 15)), 36);
		assert_eq!(age_on(birth, date!(2026 - 12 - 01)), 36);
	}

	#[test]
	fn age_compatibility_steps_down_with_the_gap() {
		assert_eq!(age_compatibility(Some(30), Some(35)), 1.0);
		assert_eq!(age_compatibility(Some(30), Some(40)), 0.8);
		assert_eq!(age_compatibility(Some(45), Some(30)), 0.6);
		assert_eq!(age_compatibility(Some(30), Some(50)), 0.4);
		assert_eq!(age_compatibility(Some(20), Some(60)), 0.2);
		assert_eq!(age_compatibility(None, Some(60)), 0.5);
	}
}
