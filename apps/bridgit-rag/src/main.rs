// crates.io
use clap::Parser;
// self
use bridgit_rag::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = Args::parse();
	let config = bridgit_config::load(&args.config)?;
	bridgit_rag::init_tracing(&config);
	bridgit_rag::run(args, config)
}
