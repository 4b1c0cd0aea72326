mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Demos, Experiment, MatchWeights, Matching, Retrieval, Service};

use std::{fs, path::Path};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::Read { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::Parse { source, .. } => Error::Parse { path: path.to_path_buf(), source },
		other => other,
	})
}

pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config =
		toml::from_str(raw).map_err(|err| Error::Parse { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::validation("service.log_level must be non-empty."));
	}
	if cfg.matching.top_k == 0 {
		return Err(Error::validation("matching.top_k must be greater than zero."));
	}
	if !cfg.matching.company_bonus.is_finite() {
		return Err(Error::validation("matching.company_bonus must be a finite number."));
	}
	if !(0.0..=1.0).contains(&cfg.matching.company_bonus) {
		return Err(Error::validation("matching.company_bonus must be in the range 0.0-1.0."));
	}

	for (label, weight) in cfg.matching.weights.entries() {
		if !weight.is_finite() {
			return Err(Error::validation(format!(
				"matching.weights.{label} must be a finite number."
			)));
		}
		if weight < 0.0 {
			return Err(Error::validation(format!("matching.weights.{label} must be zero or greater.")));
		}
	}

	if (cfg.matching.weights.total() - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
		return Err(Error::validation("matching.weights must sum to 1.0."));
	}
	if cfg.retrieval.chunk_size == 0 {
		return Err(Error::validation("retrieval.chunk_size must be greater than zero."));
	}
	if cfg.retrieval.chunk_overlap >= cfg.retrieval.chunk_size {
		return Err(Error::validation(
			"retrieval.chunk_overlap must be less than retrieval.chunk_size.",
		));
	}
	if cfg.retrieval.top_k_docs == 0 {
		return Err(Error::validation("retrieval.top_k_docs must be greater than zero."));
	}
	if cfg.demos.top_k == 0 {
		return Err(Error::validation("demos.top_k must be greater than zero."));
	}
	if !cfg.demos.mmr_lambda.is_finite() {
		return Err(Error::validation("demos.mmr_lambda must be a finite number."));
	}
	if !(0.0..=1.0).contains(&cfg.demos.mmr_lambda) {
		return Err(Error::validation("demos.mmr_lambda must be in the range 0.0-1.0."));
	}

	if let Some(experiment) = cfg.experiment.as_ref() {
		for (label, value) in [
			("experiment.default_version", &experiment.default_version),
			("experiment.canary_version", &experiment.canary_version),
		] {
			if value.trim().is_empty() {
				return Err(Error::validation(format!("{label} must be non-empty.")));
			}
		}

		if !experiment.canary_ratio.is_finite() || !(0.0..=1.0).contains(&experiment.canary_ratio)
		{
			return Err(Error::validation("experiment.canary_ratio must be in the range 0.0-1.0."));
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.service.log_level.trim().is_empty() {
		cfg.service.log_level = "info".to_string();
	}

	if let Some(experiment) = cfg.experiment.as_mut() {
		experiment.default_version = experiment.default_version.trim().to_string();
		experiment.canary_version = experiment.canary_version.trim().to_string();
	}
}
