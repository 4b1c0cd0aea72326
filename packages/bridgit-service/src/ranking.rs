use std::cmp::Ordering;

use rayon::prelude::*;
use serde::Serialize;

use crate::matching::{MatchScorer, PairScore};
use bridgit_domain::Profile;

pub const SUMMARY_INTERESTS: usize = 5;

/// The ranked user's own profile, with at most [`SUMMARY_INTERESTS`] interests.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
	pub home_location: String,
	pub occupation: String,
	pub interests: Vec<String>,
}
impl From<&Profile> for ProfileSummary {
	fn from(profile: &Profile) -> Self {
		Self {
			home_location: profile.home_location.clone(),
			occupation: profile.occupation.clone(),
			interests: profile.interests.iter().take(SUMMARY_INTERESTS).cloned().collect(),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedMatch {
	pub other_index: usize,
	pub score: f64,
	pub summary: PairScore,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedResult {
	pub user_index: usize,
	pub me: ProfileSummary,
	pub matches: Vec<RankedMatch>,
}

/// Best `top_k` counterparts for every visible profile, in load order.
///
/// Profiles without a single visible counterpart are left out.
pub fn rank_top_k(profiles: &[Profile], scorer: &MatchScorer, top_k: usize) -> Vec<RankedResult> {
	let results: Vec<RankedResult> = (0..profiles.len())
		.into_par_iter()
		.filter_map(|user_index| rank_one(profiles, scorer, user_index, top_k))
		.collect();

	tracing::info!(profiles = profiles.len(), results = results.len(), top_k, "Ranked profiles.");

	results
}

fn rank_one(
	profiles: &[Profile],
	scorer: &MatchScorer,
	user_index: usize,
	top_k: usize,
) -> Option<RankedResult> {
	let me = &profiles[user_index];

	if !me.visible {
		return None;
	}

	let mut matches: Vec<RankedMatch> = profiles
		.iter()
		.enumerate()
		.filter(|(other_index, _)| *other_index != user_index)
		.filter_map(|(other_index, other)| {
			scorer.score(me, other).map(|summary| RankedMatch {
				other_index,
				score: summary.score,
				summary,
			})
		})
		.collect();

	if matches.is_empty() {
		return None;
	}

	matches.sort_by(|lhs, rhs| rhs.score.partial_cmp(&lhs.score).unwrap_or(Ordering::Equal));
	matches.truncate(top_k);

	Some(RankedResult { user_index, me: ProfileSummary::from(me), matches })
}
