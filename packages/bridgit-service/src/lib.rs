pub mod assist;
pub mod diversity;
pub mod experiment;
pub mod matching;
pub mod ranking;
pub mod retrieval;

mod error;

pub use assist::{AssistContext, AssistRequest};
pub use diversity::{MmrPick, MmrPolicy, SelectedDemo};
pub use error::{Error, Result};
pub use matching::{MatchScorer, PairScore, Suggestion, SuggestionRole};
pub use ranking::RankedResult;
pub use retrieval::{DocumentIndex, IndexBuilder, SearchHit};

use bridgit_chunking::ChunkingConfig;
use bridgit_config::Config;
use bridgit_domain::{Demo, Profile, WordTokenizer};

/// Entry point that wires validated configuration into the scoring and retrieval components.
pub struct MatchService {
	pub cfg: Config,
	scorer: MatchScorer,
}
impl MatchService {
	pub fn new(cfg: Config) -> Self {
		let scorer = MatchScorer::from_config(&cfg.matching);

		Self { cfg, scorer }
	}

	pub fn score(&self, initiator: &Profile, recipient: &Profile) -> Option<PairScore> {
		self.scorer.score(initiator, recipient)
	}

	pub fn rank(&self, profiles: &[Profile]) -> Vec<RankedResult> {
		ranking::rank_top_k(profiles, &self.scorer, self.cfg.matching.top_k as usize)
	}

	/// Chunks and indexes `(source, text)` pairs with the configured window.
	pub fn build_knowledge_index<'a, I>(&self, documents: I) -> Result<DocumentIndex>
	where
		I: IntoIterator<Item = (&'a str, &'a str)>,
	{
		let chunking = ChunkingConfig::new(
			self.cfg.retrieval.chunk_size as usize,
			self.cfg.retrieval.chunk_overlap as usize,
		)?;
		let mut builder = IndexBuilder::new(WordTokenizer, chunking);

		for (source, text) in documents {
			let chunks = builder.add_document(source, text);

			tracing::debug!(source, chunks, "Indexed knowledge document.");
		}

		Ok(builder.finalize())
	}

	/// Indexes each demo's feature text whole, keyed by demo id.
	pub fn build_demo_index(&self, demos: &[Demo]) -> Result<DocumentIndex> {
		let chunking = ChunkingConfig::new(
			self.cfg.retrieval.chunk_size as usize,
			self.cfg.retrieval.chunk_overlap as usize,
		)?;
		let mut builder = IndexBuilder::new(WordTokenizer, chunking);

		for demo in demos {
			builder.add_record(demo.id.clone(), demo.feature_text(), "demos");
		}

		Ok(builder.finalize())
	}

	/// Prompt version for `user_key`, when an experiment is configured or an override is given.
	pub fn choose_version(&self, user_key: &str, override_version: Option<&str>) -> Option<String> {
		match &self.cfg.experiment {
			Some(experiment) => {
				let version = experiment::choose_version(experiment, user_key, override_version);

				Some(version.to_string())
			},
			None => override_version
				.map(str::trim)
				.filter(|version| !version.is_empty())
				.map(str::to_string),
		}
	}

	pub fn assist(
		&self,
		request: &AssistRequest,
		knowledge: &DocumentIndex,
		demos: &[Demo],
		version: Option<String>,
	) -> Result<AssistContext> {
		let policy = MmrPolicy::new(self.cfg.demos.mmr_lambda, self.cfg.demos.top_k as usize)?;

		Ok(assist::gather(
			request,
			knowledge,
			demos,
			self.cfg.retrieval.top_k_docs as usize,
			&policy,
			version,
		))
	}
}
