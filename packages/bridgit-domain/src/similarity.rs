use std::collections::{BTreeSet, HashSet};

use crate::text::Bag;

const EMPTY_LIST_PLACEHOLDER: &str = "[]";
const COMPANY_SENTINEL: &str = "0";

/// Cosine similarity of two count vectors. Zero when either bag is empty.
pub fn cosine(lhs: &Bag, rhs: &Bag) -> f64 {
	if lhs.is_empty() || rhs.is_empty() {
		return 0.0;
	}

	let (small, large) = if lhs.len() <= rhs.len() { (lhs, rhs) } else { (rhs, lhs) };
	let dot: u64 =
		small.iter().map(|(token, count)| u64::from(count) * u64::from(large.get(token))).sum();
	let denominator = lhs.norm() * rhs.norm();

	if denominator == 0.0 {
		return 0.0;
	}

	dot as f64 / denominator
}

/// Intersection over union of two string lists after trimming and lowercasing. Blank entries and
/// the `[]` placeholder are ignored.
pub fn jaccard(lhs: &[String], rhs: &[String]) -> f64 {
	let lhs = normalized_set(lhs);
	let rhs = normalized_set(rhs);

	if lhs.is_empty() && rhs.is_empty() {
		return 0.0;
	}

	let intersection = lhs.intersection(&rhs).count();
	let union = lhs.union(&rhs).count();

	intersection as f64 / union as f64
}

pub fn token_set_similarity(lhs: &BTreeSet<String>, rhs: &BTreeSet<String>) -> f64 {
	let union = lhs.union(rhs).count();

	if union == 0 {
		return 0.0;
	}

	lhs.intersection(rhs).count() as f64 / union as f64
}

/// Case-insensitive company equality. Blank names and the `0` sentinel never match.
pub fn same_company(lhs: &str, rhs: &str) -> bool {
	let lhs = lhs.trim();
	let rhs = rhs.trim();

	if lhs.is_empty() || lhs == COMPANY_SENTINEL {
		return false;
	}

	lhs.to_lowercase() == rhs.to_lowercase()
}

fn normalized_set(items: &[String]) -> HashSet<String> {
	items
		.iter()
		.map(|item| item.trim().to_lowercase())
		.filter(|item| !item.is_empty() && item != EMPTY_LIST_PLACEHOLDER)
		.collect()
}
