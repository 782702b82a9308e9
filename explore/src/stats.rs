use std::path::PathBuf;

use clap::Parser;
use linkindex::Index;
use linkindex::errors::LinkIndexError;

#[derive(Parser, Debug)]
#[clap(
    name = "stats",
    about = "A program to report aggregate statistics over a link-index file."
)]
pub struct Args {
    /// Link-index file (indexbi.bin).
    #[clap(short = 'i', long)]
    index_in: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Index decoding failed: {0}")]
    LinkIndex(#[from] LinkIndexError),
}

pub fn run(args: Args) -> Result<(), StatsError> {
    let index = Index::from_path(&args.index_in)?;
    let stats = index.stats()?;
    println!(
        "version = {}, article_count = {}",
        stats.version, stats.article_count
    );
    println!("records scanned: {}", stats.scanned_records);
    println!("total links: {}", stats.total_links);
    println!("total bidirectional links: {}", stats.total_bidirectional_links);
    println!(
        "Average links per article: {}",
        stats.average_links_per_article()?
    );
    Ok(())
}
