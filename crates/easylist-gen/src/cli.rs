//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::Parser;
use easylist_gen::{DEFAULT_OUTPUT, DEFAULT_URL};

/// Regenerates the ad-blocker selector list from EasyList.
#[derive(Debug, Parser)]
#[command(name = "easylist-gen")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Filter list to download
    #[arg(long, default_value = DEFAULT_URL)]
    pub url: String,

    /// Where to write the selector list
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    pub output: Utf8PathBuf,

    /// Print the generated ids and classes
    #[arg(long)]
    pub print: bool,
}
