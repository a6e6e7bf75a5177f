//! CLI entry point for the atom mosaic hill climber

use atomosaic::io::cli::{Cli, Runner};
use clap::Parser;

fn main() -> atomosaic::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();

    let runner = Runner::new(cli);
    runner.process()?;
    Ok(())
}
