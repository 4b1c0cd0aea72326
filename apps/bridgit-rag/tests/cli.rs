use std::{
	env, fs,
	path::{Path, PathBuf},
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use serde_json::Value;

use bridgit_rag::Args;

const CONFIG: &str = r#"
[service]
log_level = "warn"

[matching]
top_k = 3

[retrieval]
chunk_size    = 200
chunk_overlap = 20
top_k_docs    = 2

[demos]
top_k      = 2
mmr_lambda = 0.7

[experiment]
default_version = "v1"
canary_version  = "v2"
canary_ratio    = 0.0
"#;

const DEMOS: &str = r#"[
	{"id": "d1", "situation": "crowded conference hall", "query_features": ["conference", "loud"], "suggestion": "Want to step outside?"},
	{"id": "d2", "situation": "morning coffee line", "query_features": ["cafe", "quiet"], "suggestion": "Good pick on the roast."},
	{"id": 3, "situation": "conference expo booth", "query_features": ["conference", "booth"]}
]"#;

const REQUEST: &str = r#"{
	"initiator_profile": {"goals": ["hire"], "interests": ["ml", "robotics"]},
	"recipient_profile": {"goals": ["learn"], "interests": ["ml"]},
	"context": {"location_type": "conference", "venue": "expo hall", "noise_level": "loud"}
}"#;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir() -> PathBuf {
	let seq = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
	let nanos = SystemTime::now().duration_since(UNIX_EPOCH).expect("System time is before epoch.");
	let dir = env::temp_dir().join(format!(
		"bridgit_rag_{}_{}_{seq}",
		std::process::id(),
		nanos.as_nanos()
	));

	fs::create_dir_all(dir.join("knowledge")).expect("Failed to create temp dir.");

	dir
}

fn write_inputs(dir: &Path) {
	fs::write(dir.join("bridgit.toml"), CONFIG).expect("write config");
	fs::write(dir.join("demos.json"), DEMOS).expect("write demos");
	fs::write(dir.join("request.json"), REQUEST).expect("write request");
	fs::write(
		dir.join("knowledge").join("conference.md"),
		"At a loud conference keep openers short and offer to continue somewhere quieter.",
	)
	.expect("write knowledge");
	fs::write(dir.join("knowledge").join("cafe.md"), "Coffee lines allow brief, friendly remarks.")
		.expect("write knowledge");
}

fn args(dir: &Path, prompt_version: Option<&str>) -> Args {
	Args {
		config: dir.join("bridgit.toml"),
		knowledge: dir.join("knowledge"),
		demos: dir.join("demos.json"),
		input: dir.join("request.json"),
		user_key: "user-7".to_string(),
		prompt_version: prompt_version.map(str::to_string),
		output: Some(dir.join("context.json")),
	}
}

fn run(dir: &Path, prompt_version: Option<&str>) -> color_eyre::Result<()> {
	let config = bridgit_config::load(&dir.join("bridgit.toml")).expect("Config fixture must load.");

	bridgit_rag::run(args(dir, prompt_version), config)
}

#[test]
fn writes_evidence_and_demos() {
	let dir = temp_dir();

	write_inputs(&dir);

	run(&dir, None).expect("Run must succeed.");

	let context: Value = serde_json::from_str(
		&fs::read_to_string(dir.join("context.json")).expect("read output"),
	)
	.expect("parse output");

	fs::remove_dir_all(&dir).expect("Failed to clean temp dir.");

	assert_eq!(context["version"], "v1");
	assert_eq!(context["evidence"].as_array().map(Vec::len), Some(2));
	assert_eq!(context["evidence"][0]["metadata"]["source"], "conference.md");
	assert_eq!(context["evidence"][0]["id"], "conference.md::chunk0");
	assert_eq!(context["demos"].as_array().map(Vec::len), Some(2));
	assert_eq!(context["demos"][0]["demo"]["id"], "d1");
}

#[test]
fn prompt_version_override_wins() {
	let dir = temp_dir();

	write_inputs(&dir);

	run(&dir, Some("v7")).expect("Run must succeed.");

	let context: Value = serde_json::from_str(
		&fs::read_to_string(dir.join("context.json")).expect("read output"),
	)
	.expect("parse output");

	fs::remove_dir_all(&dir).expect("Failed to clean temp dir.");

	assert_eq!(context["version"], "v7");
}

#[test]
fn missing_knowledge_dir_fails() {
	let dir = temp_dir();

	write_inputs(&dir);
	fs::remove_dir_all(dir.join("knowledge")).expect("remove knowledge");

	let result = run(&dir, None);

	fs::remove_dir_all(&dir).expect("Failed to clean temp dir.");

	assert!(result.is_err());
}
