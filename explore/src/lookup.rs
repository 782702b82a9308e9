use std::path::PathBuf;

use clap::Parser;
use linkindex::errors::LinkIndexError;
use linkindex::{ArticleResolver, TitleTable};

#[derive(Parser, Debug)]
#[clap(
    name = "lookup",
    about = "A program to resolve between article titles and index offsets."
)]
pub struct Args {
    /// Title table file (offset<TAB>title rows).
    #[clap(short = 't', long)]
    titles_in: PathBuf,

    /// Look up the title of this offset instead of resolving a title.
    #[clap(long, conflicts_with = "title")]
    offset: Option<u32>,

    /// Article title to resolve (case-insensitive).
    #[clap(required_unless_present = "offset")]
    title: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Title table loading failed: {0}")]
    LinkIndex(#[from] LinkIndexError),

    #[error("no entry for offset {0}")]
    UnknownOffset(u32),

    #[error("no entry for title {0:?}")]
    UnknownTitle(String),
}

pub fn run(args: Args) -> Result<(), LookupError> {
    let table = TitleTable::from_path(&args.titles_in)?;
    if let Some(offset) = args.offset {
        let title = table
            .resolve_title(offset)
            .ok_or(LookupError::UnknownOffset(offset))?;
        println!("{title}");
    } else if let Some(title) = args.title {
        let offset = table
            .resolve_offset(&title)
            .ok_or_else(|| LookupError::UnknownTitle(title.clone()))?;
        println!("{offset}");
    }
    Ok(())
}
