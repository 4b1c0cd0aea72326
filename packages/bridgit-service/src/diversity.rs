use std::collections::HashSet;

use serde::Serialize;

use crate::{Error, Result};
use bridgit_domain::{Demo, Tokenizer, similarity::cosine};

/// Relevance/diversity trade-off and pick count for one MMR pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MmrPolicy {
	lambda: f64,
	top_k: usize,
}
impl MmrPolicy {
	pub fn new(lambda: f64, top_k: usize) -> Result<Self> {
		if !lambda.is_finite() || !(0.0..=1.0).contains(&lambda) {
			return Err(Error::InvalidRequest {
				message: format!("MMR lambda must be in the range 0.0-1.0, got {lambda}."),
			});
		}

		Ok(Self { lambda, top_k })
	}

	pub fn lambda(&self) -> f64 {
		self.lambda
	}

	pub fn top_k(&self) -> usize {
		self.top_k
	}
}

/// One selection step. `max_similarity` is `None` for the first pick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MmrPick {
	pub index: usize,
	pub relevance: f64,
	pub max_similarity: Option<f64>,
	pub mmr_score: f64,
}
impl MmrPick {
	fn better_than(&self, other: Option<&Self>) -> bool {
		other.is_none_or(|other| self.mmr_score > other.mmr_score)
	}
}

/// Greedy maximal marginal relevance over `candidate_count` candidates addressed by index.
///
/// Ties go to the earliest remaining candidate. Returns fewer than `top_k` picks when the pool runs
/// out.
pub fn select_mmr<R, S>(
	candidate_count: usize,
	policy: &MmrPolicy,
	relevance: R,
	similarity: S,
) -> Vec<MmrPick>
where
	R: Fn(usize) -> f64,
	S: Fn(usize, usize) -> f64,
{
	let relevance: Vec<f64> = (0..candidate_count).map(relevance).collect();
	let mut remaining: Vec<usize> = (0..candidate_count).collect();
	let mut selected: Vec<MmrPick> = Vec::with_capacity(policy.top_k.min(candidate_count));

	while selected.len() < policy.top_k && !remaining.is_empty() {
		let mut best: Option<(usize, MmrPick)> = None;

		for (remaining_pos, &candidate) in remaining.iter().enumerate() {
			let max_similarity =
				selected.iter().map(|pick| similarity(candidate, pick.index)).reduce(f64::max);
			let mmr_score = match max_similarity {
				None => relevance[candidate],
				Some(max_similarity) =>
					policy.lambda * relevance[candidate] - (1.0 - policy.lambda) * max_similarity,
			};
			let pick = MmrPick {
				index: candidate,
				relevance: relevance[candidate],
				max_similarity,
				mmr_score,
			};

			if pick.better_than(best.as_ref().map(|(_, best)| best)) {
				best = Some((remaining_pos, pick));
			}
		}

		let Some((remaining_pos, pick)) = best else { break };

		remaining.remove(remaining_pos);
		selected.push(pick);
	}

	selected
}

/// A demo chosen for the prompt, with the step that chose it.
#[derive(Clone, Debug, Serialize)]
pub struct SelectedDemo {
	pub demo: Demo,
	pub pick: MmrPick,
}

/// MMR over a demo bank using bag-of-words cosine on each demo's feature text. Demos repeating an
/// earlier id are skipped. Pick indices refer to positions in `demos`.
pub fn select_demos<T>(
	query: &str,
	demos: &[Demo],
	tokenizer: &T,
	policy: &MmrPolicy,
) -> Vec<SelectedDemo>
where
	T: Tokenizer,
{
	let mut seen = HashSet::new();
	let pool: Vec<usize> =
		(0..demos.len()).filter(|idx| seen.insert(demos[*idx].id.as_str())).collect();

	if pool.len() < demos.len() {
		tracing::debug!(duplicates = demos.len() - pool.len(), "Skipped demos with repeated ids.");
	}

	let query_bag = tokenizer.bag(query);
	let bags: Vec<_> = pool.iter().map(|idx| tokenizer.bag(&demos[*idx].feature_text())).collect();
	let picks = select_mmr(
		pool.len(),
		policy,
		|candidate| cosine(&query_bag, &bags[candidate]),
		|candidate, chosen| cosine(&bags[candidate], &bags[chosen]),
	);

	picks
		.into_iter()
		.map(|pick| {
			let index = pool[pick.index];

			SelectedDemo { demo: demos[index].clone(), pick: MmrPick { index, ..pick } }
		})
		.collect()
}
