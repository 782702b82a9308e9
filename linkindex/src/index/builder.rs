//! Construction of index images.

use std::io::Write;

use crate::errors::{LinkIndexError, Result};
use crate::index::metadata::Metadata;
use crate::index::{GLOBAL_HEADER_LEN, RECORD_HEADER_LEN};

/// A link target of an article being built.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LinkTarget {
    /// An absolute byte offset, taken as-is.
    Offset(u32),
    /// The article pushed `n`-th onto the builder (0-indexed); resolved to
    /// that article's byte offset when the index is written.
    Article(usize),
}

struct PendingArticle {
    metadata: Metadata,
    bidirectional_link_count: u32,
    links: Vec<LinkTarget>,
}

/// Builds a complete index image record by record.
///
/// Offsets are assigned in push order directly after the global header, so
/// articles can link forward to articles that have not been pushed yet via
/// [`LinkTarget::Article`].
pub struct IndexBuilder {
    version: i32,
    articles: Vec<PendingArticle>,
    offsets: Vec<u32>,
    cursor: u64,
}

impl IndexBuilder {
    /// Creates an empty builder whose global header will carry `version`.
    pub fn new(version: i32) -> Self {
        Self {
            version,
            articles: Vec::new(),
            offsets: Vec::new(),
            cursor: GLOBAL_HEADER_LEN as u64,
        }
    }

    /// Appends an article and returns the byte offset its record will
    /// occupy in the written index.
    ///
    /// # Errors
    ///
    /// Returns an error if the article would push the index past the
    /// maximum addressable offset.
    pub fn push(
        &mut self,
        metadata: Metadata,
        bidirectional_link_count: u32,
        links: Vec<LinkTarget>,
    ) -> Result<u32> {
        let record_len = RECORD_HEADER_LEN as u64 + links.len() as u64 * 4;
        let end = self.cursor + record_len;
        if end > i32::MAX as u64 {
            return Err(LinkIndexError::invalid_argument(
                "links",
                format!("index would grow to {end} bytes, past the maximum addressable offset"),
            ));
        }
        let offset = self.cursor as u32;
        self.articles.push(PendingArticle {
            metadata,
            bidirectional_link_count,
            links,
        });
        self.offsets.push(offset);
        self.cursor = end;
        Ok(offset)
    }

    /// Returns the assigned offset of the `ordinal`-th pushed article.
    pub fn offset_of(&self, ordinal: usize) -> Option<u32> {
        self.offsets.get(ordinal).copied()
    }

    /// Number of articles pushed so far.
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Whether no article has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Writes the global header and all records.
    ///
    /// # Errors
    ///
    /// Returns an error if a [`LinkTarget::Article`] ordinal refers to an
    /// article that was never pushed, or if writing fails.
    pub fn write<W>(&self, mut wtr: W) -> Result<()>
    where
        W: Write,
    {
        for field in [self.version, self.articles.len() as i32, 0, 0] {
            wtr.write_all(&field.to_le_bytes())?;
        }
        for article in &self.articles {
            for field in [
                0,
                article.links.len() as i32,
                article.bidirectional_link_count as i32,
                article.metadata.to_bits() as i32,
            ] {
                wtr.write_all(&field.to_le_bytes())?;
            }
            for &link in &article.links {
                let target = match link {
                    LinkTarget::Offset(offset) => offset,
                    LinkTarget::Article(ordinal) => {
                        self.offset_of(ordinal).ok_or_else(|| {
                            LinkIndexError::invalid_argument(
                                "links",
                                format!("link target refers to article {ordinal}, but only {} were pushed", self.articles.len()),
                            )
                        })?
                    }
                };
                wtr.write_all(&target.to_le_bytes())?;
            }
        }
        Ok(())
    }

    /// Writes the index into a fresh byte vector.
    ///
    /// # Errors
    ///
    /// See [`IndexBuilder::write`].
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(self.cursor as usize);
        self.write(&mut buf)?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use crate::index::record::ArticleRecord;
    use crate::index::scanner::AggregateStats;

    #[test]
    fn test_offsets_follow_push_order() {
        let mut builder = IndexBuilder::new(1);
        let a = builder
            .push(Metadata::default(), 0, vec![LinkTarget::Article(1); 3])
            .unwrap();
        let b = builder.push(Metadata::default(), 0, vec![]).unwrap();
        assert_eq!(a, 16);
        assert_eq!(b, 16 + 16 + 3 * 4);
        assert_eq!(builder.offset_of(0), Some(a));
        assert_eq!(builder.offset_of(1), Some(b));
        assert_eq!(builder.offset_of(2), None);
    }

    #[test]
    fn test_written_image_decodes() {
        let metadata = Metadata {
            is_featured: true,
            word_count_in_title: 2,
            log10_article_length: 4,
            ..Metadata::default()
        };
        let mut builder = IndexBuilder::new(7);
        let a = builder
            .push(metadata, 1, vec![LinkTarget::Article(1), LinkTarget::Offset(999)])
            .unwrap();
        let b = builder.push(Metadata::default(), 0, vec![]).unwrap();
        let bytes = builder.to_vec().unwrap();

        let stats = AggregateStats::scan(&mut Cursor::new(&bytes[..])).unwrap();
        assert_eq!(stats.version, 7);
        assert_eq!(stats.article_count, 2);
        assert_eq!(stats.total_links, 2);
        assert_eq!(stats.total_bidirectional_links, 1);

        let record = ArticleRecord::read_from(&mut Cursor::new(&bytes[..]), a).unwrap();
        assert_eq!(record.metadata, metadata);
        assert_eq!(record.linked_offsets, vec![b, 999]);
    }

    #[test]
    fn test_unresolved_link_target_fails() {
        let mut builder = IndexBuilder::new(1);
        builder
            .push(Metadata::default(), 0, vec![LinkTarget::Article(5)])
            .unwrap();
        let e = builder.to_vec().unwrap_err();
        assert!(matches!(e, LinkIndexError::InvalidArgument(_)), "{e}");
    }

    #[test]
    fn test_empty_builder_writes_header_only() {
        let bytes = IndexBuilder::new(3).to_vec().unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..4], &3i32.to_le_bytes());
        assert_eq!(&bytes[4..8], &0i32.to_le_bytes());
    }
}
