pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
	#[error("Chunk window must be greater than zero characters.")]
	EmptyWindow,
	#[error("Chunk overlap ({overlap}) must be less than the window size ({window}).")]
	OverlapTooLarge { window: usize, overlap: usize },
}

/// Fixed-size character windows with a shared overlap between neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkingConfig {
	window_chars: usize,
	overlap_chars: usize,
}
impl ChunkingConfig {
	pub fn new(window_chars: usize, overlap_chars: usize) -> Result<Self> {
		if window_chars == 0 {
			return Err(Error::EmptyWindow);
		}
		if overlap_chars >= window_chars {
			return Err(Error::OverlapTooLarge { window: window_chars, overlap: overlap_chars });
		}

		Ok(Self { window_chars, overlap_chars })
	}

	pub fn window_chars(&self) -> usize {
		self.window_chars
	}

	pub fn overlap_chars(&self) -> usize {
		self.overlap_chars
	}

	fn stride(&self) -> usize {
		self.window_chars - self.overlap_chars
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk {
	pub chunk_index: usize,
	/// Byte offset of the first character in the source text.
	pub start_offset: usize,
	/// Byte offset one past the last character in the source text.
	pub end_offset: usize,
	pub text: String,
}

/// Splits `text` into windows of `window_chars` characters, each starting `window - overlap`
/// characters after the previous one. The final window may be shorter.
pub fn split_text(text: &str, cfg: &ChunkingConfig) -> Vec<Chunk> {
	let boundaries: Vec<usize> =
		text.char_indices().map(|(idx, _)| idx).chain(std::iter::once(text.len())).collect();
	let char_count = boundaries.len() - 1;
	let mut chunks = Vec::new();
	let mut start_char = 0_usize;

	while start_char < char_count {
		let end_char = (start_char + cfg.window_chars).min(char_count);
		let start_offset = boundaries[start_char];
		let end_offset = boundaries[end_char];

		chunks.push(Chunk {
			chunk_index: chunks.len(),
			start_offset,
			end_offset,
			text: text[start_offset..end_offset].to_string(),
		});

		start_char += cfg.stride();
	}

	tracing::trace!(chars = char_count, chunks = chunks.len(), "Split text into windows.");

	chunks
}
