//! adblock-lint: flags CSS ids and classes that ad blockers hide.

mod cli;
mod config;
mod orchestrator;
mod output;

use clap::Parser;
use cli::Args;
use miette::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if args.list_rules {
        let rules = adblock_rules::all_rules(Default::default());
        print!("{}", output::format_rule_list(&rules));
        return Ok(());
    }

    let summary = orchestrator::run(&args)?;

    if summary.failed() {
        std::process::exit(1);
    }
    Ok(())
}
