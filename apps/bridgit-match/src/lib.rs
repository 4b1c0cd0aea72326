use std::{fs, io, path::PathBuf};

use clap::Parser;
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use bridgit_config::Config;
use bridgit_domain::{ProfileNormalizer, normalize};
use bridgit_service::MatchService;

#[derive(Debug, Parser)]
#[command(
	version = bridgit_cli::VERSION,
	rename_all = "kebab",
	styles = bridgit_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Tab-delimited profile table with a header row.
	#[arg(long, short = 'p', value_name = "FILE")]
	pub profiles: PathBuf,
	/// Write results here instead of stdout.
	#[arg(long, short = 'o', value_name = "FILE")]
	pub output: Option<PathBuf>,
	#[arg(long, value_name = "N")]
	pub top_k: Option<u32>,
	/// Reference date for ages, as YYYY-MM-DD. Defaults to today (UTC).
	#[arg(long, value_name = "DATE")]
	pub today: Option<String>,
}

/// Ranks the profile table under an already loaded `config`.
pub fn run(args: Args, mut config: Config) -> color_eyre::Result<()> {
	if let Some(top_k) = args.top_k {
		if top_k == 0 {
			return Err(eyre::eyre!("--top-k must be greater than zero."));
		}

		config.matching.top_k = top_k;
	}

	let normalizer = match args.today.as_deref() {
		Some(raw) => ProfileNormalizer::new(
			normalize::parse_date(raw)
				.ok_or_else(|| eyre::eyre!("--today must be a YYYY-MM-DD date, got {raw:?}."))?,
		),
		None => ProfileNormalizer::today(),
	};
	let profiles = bridgit_storage::profiles::load_profiles(&args.profiles, &normalizer)?;
	let service = MatchService::new(config);
	let results = service.rank(&profiles);
	let json = serde_json::to_string_pretty(&results)?;

	match args.output {
		Some(path) => {
			fs::write(&path, json)?;

			tracing::info!(path = %path.display(), results = results.len(), "Wrote match results.");
		},
		None => println!("{json}"),
	}

	Ok(())
}

pub fn init_tracing(config: &Config) {
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
