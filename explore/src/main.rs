mod generate;
mod hops;
mod lookup;
mod stats;

use clap::Parser;
use thiserror::Error;

use crate::{generate::GenError, hops::HopsError, lookup::LookupError, stats::StatsError};

#[derive(Parser, Debug)]
#[clap(name = "explore", version)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Report aggregate statistics over a link-index file.
    Stats(stats::Args),

    /// Expand hop-by-hop link frontiers from seed articles.
    Hops(hops::Args),

    /// Resolve an article title to an offset, or an offset to a title.
    Lookup(lookup::Args),

    /// Generate a synthetic link-index file.
    Gen(generate::Args),
}

#[derive(Debug, Error)]
pub enum ExploreError {
    #[error(transparent)]
    StatsError(#[from] StatsError),
    #[error(transparent)]
    HopsError(#[from] HopsError),
    #[error(transparent)]
    LookupError(#[from] LookupError),
    #[error(transparent)]
    GenError(#[from] GenError),
}

fn main() -> Result<(), ExploreError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Stats(args) => Ok(stats::run(args)?),
        Command::Hops(args) => Ok(hops::run(args)?),
        Command::Lookup(args) => Ok(lookup::run(args)?),
        Command::Gen(args) => Ok(generate::run(args)?),
    }
}
