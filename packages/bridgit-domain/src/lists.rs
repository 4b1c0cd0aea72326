use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

const EMPTY_LIST_PLACEHOLDER: &str = "[]";

static QUOTED_ITEM: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r#"'((?:[^'\\]|\\.)*)'|"((?:[^"\\]|\\.)*)""#).ok());

/// Outcome of parsing a serialized list cell. The variant records which strategy succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParsedList {
	/// A bracketed literal, JSON or single-quoted.
	Structured(Vec<String>),
	/// Comma splitting of quoted tokens, or the whole cell as one item.
	HeuristicSplit(Vec<String>),
	Empty,
}
impl ParsedList {
	pub fn parse(raw: Option<&str>) -> Self {
		let Some(raw) = raw else { return Self::Empty };
		let trimmed = raw.trim();

		if trimmed.is_empty() {
			return Self::Empty;
		}

		let parsed = match parse_literal(trimmed) {
			Some(items) => non_empty(items, Self::Structured),
			None => non_empty(split_heuristic(trimmed), Self::HeuristicSplit),
		};

		tracing::debug!(kind = parsed.kind(), items = parsed.len(), "Parsed list cell.");

		parsed
	}

	pub fn kind(&self) -> &'static str {
		match self {
			Self::Structured(_) => "structured",
			Self::HeuristicSplit(_) => "heuristic_split",
			Self::Empty => "empty",
		}
	}

	pub fn len(&self) -> usize {
		self.items().len()
	}

	pub fn is_empty(&self) -> bool {
		self.items().is_empty()
	}

	pub fn items(&self) -> &[String] {
		match self {
			Self::Structured(items) | Self::HeuristicSplit(items) => items,
			Self::Empty => &[],
		}
	}

	pub fn into_items(self) -> Vec<String> {
		match self {
			Self::Structured(items) | Self::HeuristicSplit(items) => items,
			Self::Empty => Vec::new(),
		}
	}
}

fn non_empty(items: Vec<String>, wrap: fn(Vec<String>) -> ParsedList) -> ParsedList {
	if items.is_empty() { ParsedList::Empty } else { wrap(items) }
}

fn parse_literal(raw: &str) -> Option<Vec<String>> {
	if let Ok(values) = serde_json::from_str::<Vec<Value>>(raw) {
		let items = values
			.into_iter()
			.map(|value| match value {
				Value::String(text) => text,
				other => other.to_string(),
			})
			.filter(|item| !item.trim().is_empty())
			.collect();

		return Some(items);
	}

	parse_quoted_literal(raw)
}

// Single-quoted literals such as `['data', 'ml']`.
fn parse_quoted_literal(raw: &str) -> Option<Vec<String>> {
	let inner = raw.strip_prefix('[')?.strip_suffix(']')?;
	let pattern = QUOTED_ITEM.as_ref()?;
	let mut items = Vec::new();
	let mut rest = String::with_capacity(inner.len());
	let mut last = 0_usize;

	for captures in pattern.captures_iter(inner) {
		let whole = captures.get(0)?;
		let item = captures.get(1).or_else(|| captures.get(2))?;

		rest.push_str(&inner[last..whole.start()]);
		last = whole.end();

		if !item.as_str().trim().is_empty() {
			items.push(item.as_str().to_string());
		}
	}

	rest.push_str(&inner[last..]);

	if rest.chars().all(|ch| ch == ',' || ch.is_whitespace()) { Some(items) } else { None }
}

fn split_heuristic(raw: &str) -> Vec<String> {
	if !raw.contains('"') {
		return vec![raw.to_string()];
	}

	raw.split(',')
		.map(|item| item.trim().trim_matches('"'))
		.filter(|item| !item.is_empty() && *item != EMPTY_LIST_PLACEHOLDER)
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn strings(items: &[&str]) -> Vec<String> {
		items.iter().map(|item| item.to_string()).collect()
	}

	#[test]
	fn json_lists_are_structured() {
		assert_eq!(
			ParsedList::parse(Some(r#"["data", "startups", " "]"#)),
			ParsedList::Structured(strings(&["data", "startups"]))
		);
	}

	#[test]
	fn single_quoted_lists_are_structured() {
		assert_eq!(
			ParsedList::parse(Some("['data', 'ml']")),
			ParsedList::Structured(strings(&["data", "ml"]))
		);
	}

	#[test]
	fn broken_quoted_lists_fall_back_to_splitting() {
		let parsed = ParsedList::parse(Some(r#""data", "ml"#));

		assert_eq!(parsed, ParsedList::HeuristicSplit(strings(&["data", "ml"])));
		assert_eq!(parsed.kind(), "heuristic_split");
	}

	#[test]
	fn bare_text_becomes_a_single_item() {
		assert_eq!(
			ParsedList::parse(Some("hiking")),
			ParsedList::HeuristicSplit(strings(&["hiking"]))
		);
	}

	#[test]
	fn empty_inputs_are_empty() {
		assert_eq!(ParsedList::parse(None), ParsedList::Empty);
		assert_eq!(ParsedList::parse(Some("  ")), ParsedList::Empty);
		assert_eq!(ParsedList::parse(Some("[]")), ParsedList::Empty);
		assert!(ParsedList::parse(Some("[]")).into_items().is_empty());
	}

	#[test]
	fn non_string_json_items_are_stringified() {
		assert_eq!(ParsedList::parse(Some("[1, true]")).items(), strings(&["1", "true"]).as_slice());
	}
}
