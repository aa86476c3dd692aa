//! easylist-gen: rebuilds the selector list from EasyList.

mod cli;

use clap::Parser;
use cli::Args;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let buckets = easylist_gen::generate(&args.url, &args.output)
        .await
        .into_diagnostic()?;

    if args.print {
        println!("ids: {:?}", buckets.ids);
        println!("classes: {:?}", buckets.classes);
    }
    println!(
        "Wrote {} ids and {} classes to {}",
        buckets.ids.len(),
        buckets.classes.len(),
        args.output
    );
    Ok(())
}
