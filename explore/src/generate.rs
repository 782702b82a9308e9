use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::Parser;
use linkindex::errors::LinkIndexError;
use linkindex::{IndexBuilder, LinkTarget, Metadata, Namespace};

#[derive(Parser, Debug)]
#[clap(
    name = "gen",
    about = "A program to generate a synthetic ring-linked index file."
)]
pub struct Args {
    /// File to which the index is written.
    #[clap(short = 'o', long)]
    index_out: PathBuf,

    /// Number of articles.
    #[clap(long, default_value_t = 1000)]
    articles: u32,

    /// Outbound links per article; each article links to the next
    /// `links-per-article` articles cyclically.
    #[clap(long, default_value_t = 8)]
    links_per_article: u32,

    /// Version marker written to the global header.
    #[clap(long, default_value_t = 1)]
    version: i32,
}

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Index building failed: {0}")]
    LinkIndex(#[from] LinkIndexError),
}

pub fn run(args: Args) -> Result<(), GenError> {
    let mut builder = IndexBuilder::new(args.version);
    for i in 0..args.articles {
        let links: Vec<LinkTarget> = (1..=args.links_per_article.min(args.articles.saturating_sub(1)))
            .map(|d| LinkTarget::Article(((i + d) % args.articles) as usize))
            .collect();
        let metadata = Metadata {
            namespace: Namespace::Normal,
            word_count_in_title: 1 + (i % 3) as u8,
            log10_article_length: (i % 8) as u8,
            ..Metadata::default()
        };
        builder.push(metadata, links.len() as u32 / 2, links)?;
    }

    let mut wtr = BufWriter::new(File::create(&args.index_out)?);
    builder.write(&mut wtr)?;
    wtr.flush()?;
    println!(
        "wrote {} articles with {} links each to {}",
        args.articles,
        args.links_per_article,
        args.index_out.display()
    );
    Ok(())
}
