use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use serde_json::{Map, Value};

/// A worked example from the demo bank. Opaque to selection apart from `id` and its feature text.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Demo {
	#[serde(deserialize_with = "scalar_id")]
	pub id: String,
	#[serde(default)]
	pub situation: String,
	#[serde(default)]
	pub query_features: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub suggestion: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub response: Option<String>,
	#[serde(default)]
	pub factors: Vec<String>,
	#[serde(default)]
	pub risks: Vec<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl Demo {
	/// Query features followed by the situation, space separated.
	pub fn feature_text(&self) -> String {
		let mut text = self.query_features.join(" ");

		text.push(' ');
		text.push_str(&self.situation);

		text
	}
}

fn scalar_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(id) => Ok(id),
		Value::Number(id) => Ok(id.to_string()),
		other => Err(D::Error::custom(format!("demo id must be a string or number, got {other}"))),
	}
}
