use std::{fs, io, path::PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use bridgit_config::Config;
use bridgit_service::{AssistRequest, MatchService};
use bridgit_storage::{demos, knowledge};

#[derive(Debug, Parser)]
#[command(
	version = bridgit_cli::VERSION,
	rename_all = "kebab",
	styles = bridgit_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Directory of markdown knowledge documents.
	#[arg(long, short = 'k', value_name = "DIR")]
	pub knowledge: PathBuf,
	/// JSON array of demo records.
	#[arg(long, short = 'd', value_name = "FILE")]
	pub demos: PathBuf,
	/// Assist request JSON with initiator, recipient and context.
	#[arg(long, short = 'i', value_name = "FILE")]
	pub input: PathBuf,
	#[arg(long, value_name = "KEY", default_value = "anonymous")]
	pub user_key: String,
	/// Force a prompt version instead of bucketing the user key.
	#[arg(long, value_name = "VERSION")]
	pub prompt_version: Option<String>,
	#[arg(long, short = 'o', value_name = "FILE")]
	pub output: Option<PathBuf>,
}

pub fn run(args: Args, config: Config) -> color_eyre::Result<()> {
	let documents = knowledge::load_knowledge_dir(&args.knowledge)?;
	let demos = demos::load_demos(&args.demos)?;
	let request: AssistRequest = serde_json::from_str(&fs::read_to_string(&args.input)?)?;
	let service = MatchService::new(config);
	let sources = documents.iter().map(|doc| (doc.source.as_str(), doc.text.as_str()));
	let index = service.build_knowledge_index(sources)?;
	let version = service.choose_version(&args.user_key, args.prompt_version.as_deref());
	let context = service.assist(&request, &index, &demos, version)?;
	let json = serde_json::to_string_pretty(&context)?;

	match args.output {
		Some(path) => {
			fs::write(&path, json)?;

			tracing::info!(path = %path.display(), "Wrote assist context.");
		},
		None => println!("{json}"),
	}

	Ok(())
}

pub fn init_tracing(config: &Config) {
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}
