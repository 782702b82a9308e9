//! The link-index file and its decoding operations.

pub mod builder;
pub mod frontier;
pub mod metadata;
pub mod record;
pub mod scanner;

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use hashbrown::HashSet;
use memmap2::Mmap;

use crate::errors::{LinkIndexError, Result};

pub use crate::index::metadata::{Metadata, Namespace};
pub use crate::index::record::ArticleRecord;
pub use crate::index::scanner::AggregateStats;

/// Length in bytes of the global header at the start of the file.
pub const GLOBAL_HEADER_LEN: usize = 16;

/// Length in bytes of a per-article record header.
pub const RECORD_HEADER_LEN: usize = 16;

#[derive(Debug)]
enum IndexData {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

/// An opened, immutable link-index file.
///
/// The index is never modified; all operations are reads. Every logical
/// traversal gets its own cursor from [`Index::reader`], so traversals
/// never interleave reads on a shared cursor.
#[derive(Debug)]
pub struct Index {
    data: IndexData,
}

impl Index {
    /// Opens an index file through a read-only memory map.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or mapped, or is
    /// shorter than the global header.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            LinkIndexError::invalid_argument("path", format!("failed to open index file: {e}"))
        })?;
        let mmap = unsafe { Mmap::map(&file)? };
        Self::check_len(mmap.len())?;
        log::debug!("mapped {} bytes from {}", mmap.len(), path.display());
        Ok(Self {
            data: IndexData::Mmap(mmap),
        })
    }

    /// Wraps an in-memory index image.
    ///
    /// # Errors
    ///
    /// Returns an error if the image is shorter than the global header.
    pub fn from_vec(bytes: Vec<u8>) -> Result<Self> {
        Self::check_len(bytes.len())?;
        Ok(Self {
            data: IndexData::Owned(bytes),
        })
    }

    fn check_len(len: usize) -> Result<()> {
        if len < GLOBAL_HEADER_LEN {
            return Err(LinkIndexError::invalid_format(
                "index",
                format!("file of {len} bytes is shorter than the {GLOBAL_HEADER_LEN}-byte global header"),
            ));
        }
        Ok(())
    }

    /// Raw bytes of the index.
    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            IndexData::Mmap(mmap) => &mmap[..],
            IndexData::Owned(bytes) => bytes.as_slice(),
        }
    }

    /// Returns a fresh cursor over the index for one logical traversal.
    pub fn reader(&self) -> Cursor<&[u8]> {
        Cursor::new(self.as_bytes())
    }

    /// Decodes the record at `offset`. See [`ArticleRecord::read_from`].
    ///
    /// # Errors
    ///
    /// See [`ArticleRecord::read_from`].
    pub fn record(&self, offset: u32) -> Result<ArticleRecord> {
        ArticleRecord::read_from(&mut self.reader(), offset)
    }

    /// Scans the whole index for aggregate statistics.
    ///
    /// # Errors
    ///
    /// See [`AggregateStats::scan`].
    pub fn stats(&self) -> Result<AggregateStats> {
        AggregateStats::scan(&mut self.reader())
    }

    /// Article count claimed by the global header, without a full scan.
    ///
    /// # Errors
    ///
    /// See [`scanner::article_count`].
    pub fn article_count(&self) -> Result<u32> {
        scanner::article_count(&mut self.reader())
    }

    /// Expands `seeds` by one hop. See [`frontier::expand`].
    ///
    /// # Errors
    ///
    /// See [`frontier::expand`].
    pub fn expand(&self, seeds: &HashSet<u32>) -> Result<HashSet<u32>> {
        frontier::expand(&mut self.reader(), seeds)
    }

    /// Expands `seeds` for `hops` hops. See [`frontier::expand_hops`].
    ///
    /// # Errors
    ///
    /// See [`frontier::expand_hops`].
    pub fn expand_hops(&self, seeds: &HashSet<u32>, hops: usize) -> Result<Vec<HashSet<u32>>> {
        frontier::expand_hops(&mut self.reader(), seeds, hops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use crate::index::builder::{IndexBuilder, LinkTarget};

    fn two_article_image() -> (Vec<u8>, u32, u32) {
        let mut builder = IndexBuilder::new(1);
        let a = builder
            .push(Metadata::default(), 0, vec![LinkTarget::Article(1)])
            .unwrap();
        let b = builder.push(Metadata::default(), 0, vec![]).unwrap();
        (builder.to_vec().unwrap(), a, b)
    }

    #[test]
    fn test_from_vec_too_short() {
        let e = Index::from_vec(vec![0u8; 15]).unwrap_err();
        assert!(matches!(e, LinkIndexError::InvalidFormat(_)), "{e}");
    }

    #[test]
    fn test_in_memory_round() {
        let (bytes, a, b) = two_article_image();
        let index = Index::from_vec(bytes).unwrap();
        assert_eq!(index.article_count().unwrap(), 2);
        assert_eq!(index.record(a).unwrap().linked_offsets, vec![b]);
        let hop = index.expand(&[a].into_iter().collect()).unwrap();
        assert_eq!(hop, [b].into_iter().collect());
    }

    #[test]
    fn test_from_path_matches_in_memory() {
        let (bytes, a, b) = two_article_image();
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(&bytes).unwrap();
        tmp.flush().unwrap();

        let index = Index::from_path(tmp.path()).unwrap();
        assert_eq!(index.as_bytes(), &bytes[..]);
        let stats = index.stats().unwrap();
        assert_eq!(stats.article_count, 2);
        assert_eq!(stats.total_links, 1);
        let frontiers = index.expand_hops(&[a].into_iter().collect(), 2).unwrap();
        assert_eq!(frontiers[1], [b].into_iter().collect());
        assert!(frontiers[2].is_empty());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let e = Index::from_path(dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(e, LinkIndexError::InvalidArgument(_)), "{e}");
    }
}
