use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
	diversity::{self, MmrPolicy, SelectedDemo},
	retrieval::{DocumentIndex, SearchHit},
};
use bridgit_domain::{Demo, StopwordTokenizer, Tokenizer};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AssistProfile {
	#[serde(default)]
	pub goals: Vec<String>,
	#[serde(default)]
	pub interests: Vec<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AssistSituation {
	#[serde(default)]
	pub location_type: String,
	#[serde(default)]
	pub venue: String,
	#[serde(default)]
	pub noise_level: String,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

/// Two people about to meet and where they are.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct AssistRequest {
	#[serde(default)]
	pub initiator_profile: AssistProfile,
	#[serde(default)]
	pub recipient_profile: AssistProfile,
	#[serde(default)]
	pub context: AssistSituation,
}
impl AssistRequest {
	pub fn query_text(&self) -> String {
		let initiator = &self.initiator_profile;
		let recipient = &self.recipient_profile;
		let context = &self.context;

		[
			format!("goals:{}", initiator.goals.join(",")),
			format!("interests:{}", initiator.interests.join(",")),
			format!("goals2:{}", recipient.goals.join(",")),
			format!("interests2:{}", recipient.interests.join(",")),
			format!("location_type:{}", context.location_type),
			format!("venue:{}", context.venue),
			format!("noise:{}", context.noise_level),
		]
		.join(" ")
	}
}

/// Evidence and demos gathered for one assist request, ready for prompt building.
#[derive(Clone, Debug, Serialize)]
pub struct AssistContext {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub version: Option<String>,
	pub query_text: String,
	pub evidence: Vec<SearchHit>,
	pub demos: Vec<SelectedDemo>,
}

/// Retrieval and demo selection for a request. `version` is attached as given.
pub fn gather<T>(
	request: &AssistRequest,
	knowledge: &DocumentIndex<T>,
	demos: &[Demo],
	top_k_docs: usize,
	policy: &MmrPolicy,
	version: Option<String>,
) -> AssistContext
where
	T: Tokenizer,
{
	let query_text = request.query_text();
	let evidence = knowledge.search(&query_text, top_k_docs);
	let demos = diversity::select_demos(&query_text, demos, &StopwordTokenizer::default(), policy);

	tracing::info!(
		evidence = evidence.len(),
		demos = demos.len(),
		version = version.as_deref().unwrap_or("none"),
		"Gathered assist context."
	);

	AssistContext { version, query_text, evidence, demos }
}
