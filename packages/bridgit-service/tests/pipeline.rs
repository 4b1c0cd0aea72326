use proptest::prelude::*;
use time::macros::date;

use bridgit_config::{Config, Experiment, MatchWeights};
use bridgit_domain::{Demo, Profile, ProfileNormalizer, RawProfile};
use bridgit_service::{
	AssistRequest, MatchScorer, MatchService, MmrPolicy, diversity::select_mmr,
	ranking::rank_top_k,
};

const CITIES: &[&str] =
	&["New York, NY, USA", "NYC", "Austin, TX, USA", "Berlin, BE, Germany", "Munich, BY, Germany"];
const INTERESTS: &[&str] = &[r#"["data","startups"]"#, r#"["startups","ml"]"#, "[]", "chess, go"];

fn profile(city: usize, interests: usize, available: bool, visible: bool) -> Profile {
	ProfileNormalizer::new(date!(2026 - 10 - 17)).normalize(&RawProfile {
		home_location: Some(CITIES[city].to_string()),
		interests: Some(INTERESTS[interests].to_string()),
		occupation: Some("Engineer".to_string()),
		real_time_availability: Some(if available { "TRUE" } else { "FALSE" }.to_string()),
		visibility: Some(if visible { "TRUE" } else { "FALSE" }.to_string()),
		..Default::default()
	})
}

fn demo(id: &str, features: &[&str], situation: &str) -> Demo {
	serde_json::from_value(serde_json::json!({
		"id": id,
		"situation": situation,
		"query_features": features,
	}))
	.expect("Demo fixture must deserialize.")
}

fn profile_strategy() -> impl Strategy<Value = Profile> {
	(0..CITIES.len(), 0..INTERESTS.len(), any::<bool>(), any::<bool>())
		.prop_map(|(city, interests, available, visible)| profile(city, interests, available, visible))
}

proptest! {
	#[test]
	fn ranked_matches_are_bounded_and_non_increasing(
		profiles in proptest::collection::vec(profile_strategy(), 0..8),
		top_k in 1_usize..4,
	) {
		let scorer = MatchScorer::new(MatchWeights::default(), 0.03);

		for result in rank_top_k(&profiles, &scorer, top_k) {
			prop_assert!(profiles[result.user_index].visible);
			prop_assert!(!result.matches.is_empty());
			prop_assert!(result.matches.len() <= top_k);
			prop_assert!(result.matches.windows(2).all(|pair| pair[0].score >= pair[1].score));
		}
	}

	#[test]
	fn pair_score_is_symmetric_and_in_range(lhs in profile_strategy(), rhs in profile_strategy()) {
		let scorer = MatchScorer::new(MatchWeights::default(), 0.03);
		let forward = scorer.score(&lhs, &rhs);
		let backward = scorer.score(&rhs, &lhs);

		prop_assert_eq!(forward.is_none(), !(lhs.visible && rhs.visible));
		prop_assert_eq!(forward.as_ref().map(|s| s.score), backward.as_ref().map(|s| s.score));

		if let Some(scored) = forward {
			prop_assert!((0.0..=1.0).contains(&scored.score));
			prop_assert!(scored.factors.len() <= 4);
			prop_assert!(scored.risks.len() <= 3);
		}
	}

	#[test]
	fn mmr_with_lambda_one_is_top_k_by_relevance(
		relevance in proptest::collection::vec(0.0_f64..1.0, 0..10),
		top_k in 0_usize..6,
	) {
		let policy = MmrPolicy::new(1.0, top_k).expect("Lambda 1.0 is valid.");
		let picks = select_mmr(relevance.len(), &policy, |idx| relevance[idx], |_, _| 0.5);
		let mut expected: Vec<usize> = (0..relevance.len()).collect();

		expected.sort_by(|lhs, rhs| relevance[*rhs].total_cmp(&relevance[*lhs]));
		expected.truncate(top_k);

		prop_assert_eq!(picks.iter().map(|pick| pick.index).collect::<Vec<_>>(), expected);
	}
}

#[test]
fn assist_gathers_evidence_and_diverse_demos() {
	let service = MatchService::new(Config::default());
	let knowledge = service
		.build_knowledge_index([
			("consent.md", "Always ask before joining a group conversation at a conference."),
			("venues.md", "Quiet cafes suit short introductions over coffee."),
			("noise.md", "In loud venues keep the opener short and suggest stepping outside."),
		])
		.expect("Default chunking is valid.");
	let demos = vec![
		demo("d1", &["conference", "loud"], "crowded conference hall"),
		demo("d1", &["conference", "loud"], "crowded conference hall"),
		demo("d2", &["conference", "loud"], "crowded conference expo hall"),
		demo("d3", &["cafe", "quiet"], "morning coffee line"),
	];
	let request: AssistRequest = serde_json::from_value(serde_json::json!({
		"initiator_profile": {"goals": ["hire"], "interests": ["ml"]},
		"recipient_profile": {"goals": ["learn"], "interests": ["ml"]},
		"context": {"location_type": "conference", "venue": "expo hall", "noise_level": "loud"}
	}))
	.expect("Request fixture must deserialize.");
	let context = service
		.assist(&request, &knowledge, &demos, Some("v1".to_string()))
		.expect("Default demo policy is valid.");
	let demo_ids: Vec<&str> = context.demos.iter().map(|pick| pick.demo.id.as_str()).collect();

	assert_eq!(context.version.as_deref(), Some("v1"));
	assert_eq!(context.evidence.len(), 3);
	assert!(context.evidence.windows(2).all(|pair| pair[0].score >= pair[1].score));
	assert_eq!(demo_ids.len(), 2);
	assert!(demo_ids.iter().filter(|id| **id == "d1").count() <= 1);
	assert!(context.query_text.starts_with("goals:hire interests:ml goals2:learn"));
}

#[test]
fn demo_index_finds_nearest_record() {
	let service = MatchService::new(Config::default());
	let demos = vec![
		demo("d1", &["cafe", "quiet"], "morning coffee line"),
		demo("d2", &["conference", "loud"], "crowded expo hall"),
	];
	let index = service.build_demo_index(&demos).expect("Default chunking is valid.");
	let hits = index.search("loud conference", 1);

	assert_eq!(hits[0].index, 1);
	assert_eq!(hits[0].id, "d2");
	assert_eq!(hits[0].metadata.chunk, None);
}

#[test]
fn version_choice_honours_experiment_and_override() {
	let mut cfg = Config::default();
	let plain = MatchService::new(cfg.clone());

	assert_eq!(plain.choose_version("user-1", None), None);
	assert_eq!(plain.choose_version("user-1", Some("v3")).as_deref(), Some("v3"));

	cfg.experiment = Some(Experiment {
		default_version: "v1".to_string(),
		canary_version: "v2".to_string(),
		canary_ratio: 1.0,
	});

	let canary = MatchService::new(cfg);

	assert_eq!(canary.choose_version("user-1", None).as_deref(), Some("v2"));
}

#[test]
fn invalid_lambda_is_an_invalid_request() {
	let mut cfg = Config::default();

	cfg.demos.mmr_lambda = 2.0;

	let service = MatchService::new(cfg);
	let knowledge = service
		.build_knowledge_index(Vec::<(&str, &str)>::new())
		.expect("Default chunking is valid.");
	let err = service
		.assist(&AssistRequest::default(), &knowledge, &[], None)
		.expect_err("Lambda above 1.0 must be rejected.");

	assert!(matches!(err, bridgit_service::Error::InvalidRequest { .. }));
}
