use std::{
	collections::{HashMap, HashSet},
	sync::LazyLock,
};

use regex::Regex;

pub const STOPWORDS: &[&str] = &[
	"the", "and", "of", "in", "to", "for", "a", "an", "on", "with", "at", "by", "from", "about",
	"into", "as", "is", "are", "be", "this", "that", "it", "i", "im", "you", "we", "they", "their",
	"our", "your",
];

static DEFAULT_TOKENIZER: LazyLock<StopwordTokenizer> = LazyLock::new(StopwordTokenizer::default);
static WORD_PATTERN: LazyLock<Option<Regex>> =
	LazyLock::new(|| Regex::new(r"[a-zA-Z0-9']+").ok());

/// Turns free text into an ordered token sequence.
pub trait Tokenizer
where
	Self: Send + Sync,
{
	fn tokenize(&self, text: &str) -> Vec<String>;

	fn bag(&self, text: &str) -> Bag {
		Bag::from_tokens(self.tokenize(text))
	}
}

/// Token occurrence counts. Order is irrelevant.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bag {
	counts: HashMap<String, u32>,
}
impl Bag {
	pub fn from_tokens<I, S>(tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let mut counts = HashMap::new();

		for token in tokens {
			*counts.entry(token.into()).or_insert(0) += 1;
		}

		Self { counts }
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	pub fn len(&self) -> usize {
		self.counts.len()
	}

	pub fn get(&self, token: &str) -> u32 {
		self.counts.get(token).copied().unwrap_or(0)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
		self.counts.iter().map(|(token, count)| (token.as_str(), *count))
	}

	pub fn norm(&self) -> f64 {
		let squares: u64 = self.counts.values().map(|count| u64::from(*count).pow(2)).sum();

		(squares as f64).sqrt()
	}
}

/// Lowercases, treats every run of characters outside `[a-z0-9]` as a separator, and drops
/// stopwords.
#[derive(Clone, Debug)]
pub struct StopwordTokenizer {
	stopwords: HashSet<String>,
}
impl StopwordTokenizer {
	pub fn new<I, S>(stopwords: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { stopwords: stopwords.into_iter().map(Into::into).collect() }
	}
}
impl Default for StopwordTokenizer {
	fn default() -> Self {
		Self::new(STOPWORDS.iter().copied())
	}
}
impl Tokenizer for StopwordTokenizer {
	fn tokenize(&self, text: &str) -> Vec<String> {
		let lowered = text.to_lowercase();
		let mut normalized = String::with_capacity(lowered.len());

		for ch in lowered.chars() {
			if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
				normalized.push(ch);
			} else {
				normalized.push(' ');
			}
		}

		normalized
			.split_whitespace()
			.filter(|token| !self.stopwords.contains(*token))
			.map(str::to_string)
			.collect()
	}
}

/// ASCII words with inner apostrophes, lowercased. Keeps stopwords.
#[derive(Clone, Copy, Debug, Default)]
pub struct WordTokenizer;
impl Tokenizer for WordTokenizer {
	fn tokenize(&self, text: &str) -> Vec<String> {
		let Some(pattern) = WORD_PATTERN.as_ref() else { return Vec::new() };

		pattern.find_iter(text).map(|word| word.as_str().to_lowercase()).collect()
	}
}

pub fn tokenize(text: Option<&str>) -> Vec<String> {
	text.map(|text| DEFAULT_TOKENIZER.tokenize(text)).unwrap_or_default()
}

pub fn bag_of_words(text: &str) -> Bag {
	DEFAULT_TOKENIZER.bag(text)
}
