//! # linkindex
//!
//! linkindex decodes a compact binary "link index": for every article in a
//! corpus, the file stores a bit-packed classification word and the byte
//! offsets of the articles it links to. On top of the decoder sit a
//! single-pass aggregate scanner and a hop-by-hop frontier expansion used
//! for reachability analysis ("all articles N hops from a seed").
//!
//! ## Examples
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use linkindex::{Index, IndexBuilder, LinkTarget, Metadata};
//!
//! // Two articles: the first links to the second.
//! let mut builder = IndexBuilder::new(1);
//! let a = builder.push(Metadata::default(), 0, vec![LinkTarget::Article(1)])?;
//! let b = builder.push(Metadata::default(), 0, vec![])?;
//!
//! let index = Index::from_vec(builder.to_vec()?)?;
//!
//! let record = index.record(a)?;
//! assert_eq!(record.linked_offsets, vec![b]);
//!
//! let hop = index.expand(&[a].into_iter().collect())?;
//! assert!(hop.contains(&b));
//!
//! let stats = index.stats()?;
//! assert_eq!(stats.article_count, 2);
//! assert_eq!(stats.total_links, 1);
//! # Ok(())
//! # }
//! ```
#![deny(missing_docs)]

pub mod errors;
pub mod index;
pub mod resolver;

pub use index::builder::{IndexBuilder, LinkTarget};
pub use index::{AggregateStats, ArticleRecord, Index, Metadata, Namespace};
pub use resolver::{ArticleResolver, TitleTable};

/// Version number of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
