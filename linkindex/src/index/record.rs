//! Decoding of single article records.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::errors::{LinkIndexError, Result};
use crate::index::RECORD_HEADER_LEN;
use crate::index::metadata::Metadata;

/// One decoded article record: header fields plus the adjacency list.
///
/// Records are ephemeral. A record is decoded on demand at a given offset
/// and dropped once its fields are consumed; nothing is cached.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ArticleRecord {
    /// Byte position of this record in the index file. Doubles as the
    /// article's stable identifier.
    pub offset: u32,
    /// Number of outbound links.
    pub link_count: u32,
    /// Number of outbound links that are mutual.
    pub bidirectional_link_count: u32,
    /// Raw packed metadata word as stored on disk.
    pub metadata_bits: u32,
    /// Decoded classification metadata.
    pub metadata: Metadata,
    /// Offsets of the linked articles, in file order. Values are not
    /// validated against the file bounds; dereferencing an out-of-range
    /// offset fails at that later read.
    pub linked_offsets: Vec<u32>,
}

impl ArticleRecord {
    /// Decodes the record starting at `offset`.
    ///
    /// Reads the 16-byte header `[sentinel, link_count,
    /// bidirectional_link_count, metadata]` followed by `link_count`
    /// little-endian 32-bit link offsets. The only side effect is moving
    /// the reader's cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the header or adjacency list extends past the end of the file,
    /// - the sentinel is nonzero (`offset` does not address a record),
    /// - a link count is negative.
    pub fn read_from<R>(rdr: &mut R, offset: u32) -> Result<Self>
    where
        R: Read + Seek,
    {
        rdr.seek(SeekFrom::Start(u64::from(offset)))?;

        let mut header = [0u8; RECORD_HEADER_LEN];
        rdr.read_exact(&mut header).map_err(|e| {
            truncation(e, "header", offset, "index truncated inside a record header")
        })?;
        let sentinel = le_i32(&header, 0);
        if sentinel != 0 {
            return Err(LinkIndexError::invalid_format(
                "sentinel",
                format!("nonzero sentinel {sentinel:#010x} at offset {offset}; not a record boundary"),
            ));
        }
        let link_count = non_negative(le_i32(&header, 4), "link_count", offset)?;
        let bidirectional_link_count =
            non_negative(le_i32(&header, 8), "bidirectional_link_count", offset)?;
        let metadata_bits = le_i32(&header, 12) as u32;

        let mut adjacency = vec![0u8; link_count as usize * 4];
        rdr.read_exact(&mut adjacency).map_err(|e| {
            truncation(e, "linked_offsets", offset, "index truncated inside an adjacency list")
        })?;
        let linked_offsets = adjacency
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();

        Ok(Self {
            offset,
            link_count,
            bidirectional_link_count,
            metadata_bits,
            metadata: Metadata::from_bits(metadata_bits),
            linked_offsets,
        })
    }
}

pub(crate) fn le_i32(buf: &[u8], pos: usize) -> i32 {
    i32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

fn non_negative(value: i32, field: &'static str, offset: u32) -> Result<u32> {
    u32::try_from(value).map_err(|_| {
        LinkIndexError::invalid_format(
            field,
            format!("negative count {value} in the record header at offset {offset}"),
        )
    })
}

fn truncation(
    e: std::io::Error,
    arg: &'static str,
    offset: u32,
    msg: &str,
) -> LinkIndexError {
    if e.kind() == ErrorKind::UnexpectedEof {
        LinkIndexError::invalid_format(arg, format!("{msg} (record at offset {offset})"))
    } else {
        LinkIndexError::from(e)
    }
}
