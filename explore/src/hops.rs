use std::path::PathBuf;

use clap::Parser;
use hashbrown::HashSet;
use linkindex::errors::LinkIndexError;
use linkindex::{ArticleResolver, Index, TitleTable};

#[derive(Parser, Debug)]
#[clap(
    name = "hops",
    about = "A program to expand hop-by-hop link frontiers from seed articles."
)]
pub struct Args {
    /// Link-index file (indexbi.bin).
    #[clap(short = 'i', long)]
    index_in: PathBuf,

    /// Title table file (offset<TAB>title rows).
    #[clap(short = 't', long)]
    titles_in: PathBuf,

    /// Number of hops to expand from the seed articles.
    #[clap(short = 'n', long, default_value_t = 3)]
    hops: usize,

    /// Example titles printed per hop.
    #[clap(long, default_value_t = 3)]
    samples: usize,

    /// Seed article titles (case-insensitive).
    #[clap(required = true)]
    seeds: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum HopsError {
    #[error("Index decoding failed: {0}")]
    LinkIndex(#[from] LinkIndexError),

    #[error("none of the seed titles could be resolved")]
    NoSeeds,
}

pub fn run(args: Args) -> Result<(), HopsError> {
    let table = TitleTable::from_path(&args.titles_in)?;
    let index = Index::from_path(&args.index_in)?;

    let mut seeds = HashSet::new();
    for title in &args.seeds {
        match table.resolve_offset(title) {
            Some(offset) => {
                seeds.insert(offset);
            }
            None => eprintln!("skipping unresolvable seed {title:?}"),
        }
    }
    if seeds.is_empty() {
        return Err(HopsError::NoSeeds);
    }

    let frontiers = index.expand_hops(&seeds, args.hops)?;
    for (hop, frontier) in frontiers.iter().enumerate() {
        println!("#{hop} = {}", frontier.len());
        if args.samples == 0 {
            continue;
        }
        let mut offsets: Vec<u32> = frontier.iter().copied().collect();
        offsets.sort_unstable();
        for offset in offsets.iter().take(args.samples) {
            match table.resolve_title(*offset) {
                Some(title) => println!("    {title}"),
                None => println!("    <untitled offset {offset}>"),
            }
        }
    }
    Ok(())
}
