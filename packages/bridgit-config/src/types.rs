use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
	pub service: Service,
	pub matching: Matching,
	pub retrieval: Retrieval,
	pub demos: Demos,
	pub experiment: Option<Experiment>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Service {
	#[serde(default = "default_log_level")]
	pub log_level: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Matching {
	pub top_k: u32,
	/// Added to the weighted score when both profiles name the same company. The sum is capped
	/// at 1.0.
	#[serde(default = "default_company_bonus")]
	pub company_bonus: f64,
	#[serde(default)]
	pub weights: MatchWeights,
}

/// Per-dimension weights of the pairwise match score.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct MatchWeights {
	pub location: f64,
	pub pitches: f64,
	pub industry: f64,
	pub occupation: f64,
	pub interests: f64,
	pub availability: f64,
	pub age: f64,
}
impl MatchWeights {
	pub fn total(&self) -> f64 {
		self.entries().iter().map(|(_, weight)| weight).sum()
	}

	pub fn entries(&self) -> [(&'static str, f64); 7] {
		[
			("location", self.location),
			("pitches", self.pitches),
			("industry", self.industry),
			("occupation", self.occupation),
			("interests", self.interests),
			("availability", self.availability),
			("age", self.age),
		]
	}
}
impl Default for MatchWeights {
	fn default() -> Self {
		Self {
			location: 0.25,
			pitches: 0.25,
			industry: 0.10,
			occupation: 0.05,
			interests: 0.10,
			availability: 0.15,
			age: 0.10,
		}
	}
}

#[derive(Clone, Debug, Deserialize)]
pub struct Retrieval {
	/// Window size in characters.
	pub chunk_size: u32,
	/// Characters shared by consecutive windows. Must stay below `chunk_size`.
	pub chunk_overlap: u32,
	pub top_k_docs: u32,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Demos {
	pub top_k: u32,
	/// Relevance weight of the MMR trade-off, in the range 0.0-1.0.
	pub mmr_lambda: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Experiment {
	pub default_version: String,
	pub canary_version: String,
	pub canary_ratio: f64,
}

impl Default for Service {
	fn default() -> Self {
		Self { log_level: default_log_level() }
	}
}

impl Default for Matching {
	fn default() -> Self {
		Self { top_k: 3, company_bonus: default_company_bonus(), weights: MatchWeights::default() }
	}
}

impl Default for Retrieval {
	fn default() -> Self {
		Self { chunk_size: 800, chunk_overlap: 120, top_k_docs: 4 }
	}
}

impl Default for Demos {
	fn default() -> Self {
		Self { top_k: 2, mmr_lambda: 0.7 }
	}
}

fn default_log_level() -> String {
	"info".to_string()
}

fn default_company_bonus() -> f64 {
	0.03
}
