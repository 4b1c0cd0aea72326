use std::{cmp::Ordering, collections::HashMap};

use serde::Serialize;

use bridgit_chunking::ChunkingConfig;
use bridgit_domain::{Bag, Tokenizer, WordTokenizer};

/// Where an indexed entry came from. `chunk` is absent for whole records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentMetadata {
	pub source: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub chunk: Option<usize>,
}

#[derive(Clone, Debug)]
pub struct IndexedDocument {
	pub id: String,
	pub text: String,
	pub metadata: DocumentMetadata,
	bag: Bag,
}
impl IndexedDocument {
	pub fn bag(&self) -> &Bag {
		&self.bag
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SearchHit {
	/// Insertion position in the index.
	pub index: usize,
	pub id: String,
	pub text: String,
	pub metadata: DocumentMetadata,
	pub score: f64,
}

/// Accumulates documents. Only [`IndexBuilder::finalize`] yields something searchable.
#[derive(Debug)]
pub struct IndexBuilder<T = WordTokenizer> {
	tokenizer: T,
	chunking: ChunkingConfig,
	documents: Vec<IndexedDocument>,
}
impl<T> IndexBuilder<T>
where
	T: Tokenizer,
{
	pub fn new(tokenizer: T, chunking: ChunkingConfig) -> Self {
		Self { tokenizer, chunking, documents: Vec::new() }
	}

	/// Splits `text` into windows and indexes each one. Returns the number of chunks added.
	pub fn add_document(&mut self, source: &str, text: &str) -> usize {
		let chunks = bridgit_chunking::split_text(text, &self.chunking);
		let added = chunks.len();

		for chunk in chunks {
			self.push(
				format!("{source}::chunk{}", chunk.chunk_index),
				chunk.text,
				DocumentMetadata { source: source.to_string(), chunk: Some(chunk.chunk_index) },
			);
		}

		added
	}

	/// Indexes `text` as a single entry without chunking.
	pub fn add_record(&mut self, id: impl Into<String>, text: impl Into<String>, source: &str) {
		let metadata = DocumentMetadata { source: source.to_string(), chunk: None };

		self.push(id.into(), text.into(), metadata);
	}

	pub fn len(&self) -> usize {
		self.documents.len()
	}

	pub fn is_empty(&self) -> bool {
		self.documents.is_empty()
	}

	pub fn finalize(self) -> DocumentIndex<T> {
		let mut document_frequency: HashMap<String, usize> = HashMap::new();

		for document in &self.documents {
			for (token, _) in document.bag.iter() {
				*document_frequency.entry(token.to_string()).or_insert(0) += 1;
			}
		}

		tracing::info!(
			documents = self.documents.len(),
			vocabulary = document_frequency.len(),
			"Finalized document index."
		);

		DocumentIndex { tokenizer: self.tokenizer, documents: self.documents, document_frequency }
	}

	fn push(&mut self, id: String, text: String, metadata: DocumentMetadata) {
		let bag = self.tokenizer.bag(&text);

		self.documents.push(IndexedDocument { id, text, metadata, bag });
	}
}

/// Immutable TF-IDF index. Safe to query from many threads.
#[derive(Debug)]
pub struct DocumentIndex<T = WordTokenizer> {
	tokenizer: T,
	documents: Vec<IndexedDocument>,
	document_frequency: HashMap<String, usize>,
}
impl<T> DocumentIndex<T>
where
	T: Tokenizer,
{
	pub fn len(&self) -> usize {
		self.documents.len()
	}

	pub fn is_empty(&self) -> bool {
		self.documents.is_empty()
	}

	pub fn documents(&self) -> &[IndexedDocument] {
		&self.documents
	}

	pub fn document_frequency(&self, token: &str) -> usize {
		self.document_frequency.get(token).copied().unwrap_or(0)
	}

	/// Smoothed inverse document frequency, always positive.
	pub fn idf(&self, token: &str) -> f64 {
		let total = self.documents.len() as f64;
		let df = self.document_frequency(token) as f64;

		((total + 1.0) / (1.0 + df)).ln() + 1.0
	}

	/// Top `top_k` entries by cosine of L2-normalized TF-IDF vectors. Ties keep insertion order.
	pub fn search(&self, query: &str, top_k: usize) -> Vec<SearchHit> {
		if top_k == 0 || self.documents.is_empty() {
			return Vec::new();
		}

		let query_vector = self.vectorize(&self.tokenizer.bag(query));
		let mut scored: Vec<(usize, f64)> = self
			.documents
			.iter()
			.enumerate()
			.map(|(idx, document)| (idx, dot(&query_vector, &self.vectorize(&document.bag))))
			.collect();

		scored.sort_by(|lhs, rhs| rhs.1.partial_cmp(&lhs.1).unwrap_or(Ordering::Equal));
		scored.truncate(top_k);

		scored
			.into_iter()
			.map(|(index, score)| {
				let document = &self.documents[index];

				SearchHit {
					index,
					id: document.id.clone(),
					text: document.text.clone(),
					metadata: document.metadata.clone(),
					score,
				}
			})
			.collect()
	}

	fn vectorize(&self, bag: &Bag) -> HashMap<String, f64> {
		let mut vector: HashMap<String, f64> = bag
			.iter()
			.map(|(token, count)| (token.to_string(), f64::from(count) * self.idf(token)))
			.collect();
		let norm = vector.values().map(|weight| weight * weight).sum::<f64>().sqrt();

		if norm > 0.0 {
			for weight in vector.values_mut() {
				*weight /= norm;
			}
		}

		vector
	}
}

fn dot(lhs: &HashMap<String, f64>, rhs: &HashMap<String, f64>) -> f64 {
	let (small, large) = if lhs.len() <= rhs.len() { (lhs, rhs) } else { (rhs, lhs) };

	small.iter().filter_map(|(token, weight)| large.get(token).map(|other| weight * other)).sum()
}
