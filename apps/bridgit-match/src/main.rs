// crates.io
use clap::Parser;
// self
use bridgit_match::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	let config = bridgit_config::load(&args.config)?;
	bridgit_match::init_tracing(&config);
	bridgit_match::run(args, config)
}
