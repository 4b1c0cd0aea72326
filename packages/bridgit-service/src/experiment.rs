use bridgit_config::Experiment;

const BUCKET_SPAN: f64 = 4_294_967_296.0;

/// Stable position of `user_key` in [0, 1).
pub fn bucket(user_key: &str) -> f64 {
	let hash = blake3::hash(user_key.as_bytes());
	let bytes = hash.as_bytes();
	let prefix = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

	f64::from(prefix) / BUCKET_SPAN
}

/// Prompt version for a user. A non-blank override always wins.
pub fn choose_version<'a>(
	experiment: &'a Experiment,
	user_key: &str,
	override_version: Option<&'a str>,
) -> &'a str {
	if let Some(version) = override_version.map(str::trim).filter(|version| !version.is_empty()) {
		return version;
	}

	if bucket(user_key) < experiment.canary_ratio {
		&experiment.canary_version
	} else {
		&experiment.default_version
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn experiment(ratio: f64) -> Experiment {
		Experiment {
			default_version: "v1".to_string(),
			canary_version: "v2".to_string(),
			canary_ratio: ratio,
		}
	}

	#[test]
	fn override_wins() {
		assert_eq!(choose_version(&experiment(1.0), "user-1", Some("v9")), "v9");
		assert_eq!(choose_version(&experiment(1.0), "user-1", Some("  ")), "v2");
	}

	#[test]
	fn ratio_bounds_pin_the_choice() {
		for key in ["alice", "bob", "carol", ""] {
			assert_eq!(choose_version(&experiment(0.0), key, None), "v1");
			assert_eq!(choose_version(&experiment(1.0), key, None), "v2");
		}
	}

	#[test]
	fn bucket_is_stable_and_in_range() {
		let first = bucket("user-42");

		assert_eq!(first, bucket("user-42"));
		assert!((0.0..1.0).contains(&first));
	}
}
