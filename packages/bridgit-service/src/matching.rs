use serde::Serialize;

use bridgit_config::{MatchWeights, Matching};
use bridgit_domain::{
	Profile,
	normalize::{age_compatibility, location_score},
	similarity::{cosine, jaccard, same_company, token_set_similarity},
};

pub const MAX_FACTORS: usize = 4;
pub const MAX_RISKS: usize = 3;

const FALLBACK_TOPIC: &str = "projects";
const FALLBACK_WORK: &str = "my work";

/// Cut-offs that turn dimension scores into factor and risk annotations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MatchThresholds {
	pub near_location: f64,
	pub aligned_pitches: f64,
	pub similar_industry: f64,
	pub similar_occupation: f64,
	pub shared_interests: f64,
	pub large_age_gap: u32,
	pub unclear_pitches: f64,
	pub different_occupation: f64,
}
impl Default for MatchThresholds {
	fn default() -> Self {
		Self {
			near_location: 0.8,
			aligned_pitches: 0.6,
			similar_industry: 0.5,
			similar_occupation: 0.5,
			shared_interests: 0.3,
			large_age_gap: 15,
			unclear_pitches: 0.3,
			different_occupation: 0.2,
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DimensionScores {
	pub location: f64,
	pub pitches: f64,
	pub industry: f64,
	pub occupation: f64,
	pub interests: f64,
	pub availability: f64,
	pub age: f64,
}
impl DimensionScores {
	pub fn between(lhs: &Profile, rhs: &Profile) -> Self {
		let both_available = lhs.real_time_availability && rhs.real_time_availability;

		Self {
			location: location_score(&lhs.location, &rhs.location),
			pitches: cosine(&lhs.pitches_bag, &rhs.pitches_bag),
			industry: token_set_similarity(&lhs.industry_tokens, &rhs.industry_tokens),
			occupation: cosine(&lhs.occupation_bag, &rhs.occupation_bag),
			interests: jaccard(&lhs.interests, &rhs.interests),
			availability: if both_available { 1.0 } else { 0.0 },
			age: age_compatibility(lhs.age, rhs.age),
		}
	}

	pub fn weighted(&self, weights: &MatchWeights) -> f64 {
		weights.location * self.location
			+ weights.pitches * self.pitches
			+ weights.industry * self.industry
			+ weights.occupation * self.occupation
			+ weights.interests * self.interests
			+ weights.availability * self.availability
			+ weights.age * self.age
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionRole {
	Initiator,
	Recipient,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Suggestion {
	#[serde(rename = "for")]
	pub role: SuggestionRole,
	pub text: String,
}

/// Score and annotations for an ordered pair of profiles.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PairScore {
	/// In 0.0-1.0, rounded to four decimals.
	pub score: f64,
	pub factors: Vec<String>,
	pub risks: Vec<String>,
	pub suggestions: [Suggestion; 2],
}

#[derive(Clone, Debug)]
pub struct MatchScorer {
	weights: MatchWeights,
	company_bonus: f64,
	thresholds: MatchThresholds,
}
impl MatchScorer {
	pub fn new(weights: MatchWeights, company_bonus: f64) -> Self {
		Self { weights, company_bonus, thresholds: MatchThresholds::default() }
	}

	pub fn from_config(cfg: &Matching) -> Self {
		Self::new(cfg.weights, cfg.company_bonus)
	}

	pub fn with_thresholds(mut self, thresholds: MatchThresholds) -> Self {
		self.thresholds = thresholds;

		self
	}

	/// `None` unless both profiles are visible.
	pub fn score(&self, initiator: &Profile, recipient: &Profile) -> Option<PairScore> {
		if !(initiator.visible && recipient.visible) {
			return None;
		}

		let dims = DimensionScores::between(initiator, recipient);
		let mut score = dims.weighted(&self.weights);

		if same_company(&initiator.current_company, &recipient.current_company) {
			score += self.company_bonus;
		}

		Some(PairScore {
			score: round4(score.clamp(0.0, 1.0)),
			factors: self.factors(&dims),
			risks: self.risks(&dims, initiator.age, recipient.age),
			suggestions: suggestions(initiator, recipient),
		})
	}

	// Evaluation order is the priority order; anything past the cap is dropped.
	fn factors(&self, dims: &DimensionScores) -> Vec<String> {
		let t = &self.thresholds;
		let mut factors = Vec::new();

		if dims.location >= t.near_location {
			factors.push("Near each other (same city/region)".to_string());
		}
		if dims.pitches >= t.aligned_pitches {
			factors.push("Aligned goals in pitches".to_string());
		}
		if dims.industry >= t.similar_industry {
			factors.push("Similar or related industries".to_string());
		}
		if dims.occupation >= t.similar_occupation {
			factors.push("Similar roles".to_string());
		}
		if dims.interests >= t.shared_interests {
			let percent = (dims.interests * 100.0).trunc() as u32;

			factors.push(format!("Shared interests ({percent}% overlap)"));
		}
		if dims.availability >= 1.0 {
			factors.push("Both available now".to_string());
		}

		factors.truncate(MAX_FACTORS);

		factors
	}

	fn risks(
		&self,
		dims: &DimensionScores,
		lhs_age: Option<i32>,
		rhs_age: Option<i32>,
	) -> Vec<String> {
		let t = &self.thresholds;
		let mut risks = Vec::new();

		if let (Some(lhs), Some(rhs)) = (lhs_age, rhs_age)
			&& lhs.abs_diff(rhs) >= t.large_age_gap
		{
			risks.push("Large age gap".to_string());
		}
		if dims.pitches < t.unclear_pitches {
			risks.push("Unclear or different goals".to_string());
		}
		if dims.occupation < t.different_occupation {
			risks.push("Different roles or seniority".to_string());
		}

		risks.truncate(MAX_RISKS);

		risks
	}
}

/// First of the initiator's interests the recipient shares, else the recipient's occupation.
pub fn opener_topic<'a>(initiator: &'a Profile, recipient: &'a Profile) -> &'a str {
	let recipient_interests: Vec<String> =
		recipient.interests.iter().map(|interest| interest.to_lowercase()).collect();
	let shared = initiator
		.interests
		.iter()
		.find(|interest| recipient_interests.contains(&interest.to_lowercase()));

	match shared {
		Some(interest) => interest,
		None if !recipient.occupation.trim().is_empty() => &recipient.occupation,
		None => FALLBACK_TOPIC,
	}
}

fn suggestions(initiator: &Profile, recipient: &Profile) -> [Suggestion; 2] {
	let topic = opener_topic(initiator, recipient);
	let work = if recipient.occupation.trim().is_empty() {
		FALLBACK_WORK
	} else {
		recipient.occupation.as_str()
	};

	[
		Suggestion {
			role: SuggestionRole::Initiator,
			text: format!("Noticed we both like {topic}. Up for a quick chat?"),
		},
		Suggestion {
			role: SuggestionRole::Recipient,
			text: format!("Happy to connect if helpful. I can share about {work}."),
		},
	]
}

fn round4(value: f64) -> f64 {
	(value * 10_000.0).round() / 10_000.0
}
