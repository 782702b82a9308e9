//! Sequential aggregate scan over a whole index file.

use std::io::{ErrorKind, Read, Seek, SeekFrom};

use crate::errors::{LinkIndexError, Result};
use crate::index::RECORD_HEADER_LEN;
use crate::index::record::le_i32;

/// Aggregate statistics gathered by a single sequential pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AggregateStats {
    /// Version marker from the global header. Recorded, not validated.
    pub version: i32,
    /// Article count claimed by the global header.
    pub article_count: u32,
    /// Number of record headers actually visited by the scan.
    pub scanned_records: u64,
    /// Sum of all outbound link counts.
    pub total_links: u64,
    /// Sum of all bidirectional link counts.
    pub total_bidirectional_links: u64,
}

impl AggregateStats {
    /// Scans the whole file, accumulating link totals.
    ///
    /// The 16-byte global header `[version, article_count, reserved,
    /// reserved]` is read once; it shares the physical shape of a record
    /// header but its first field is a version marker, not a sentinel, and
    /// is not validated. Each subsequent record header is read and its
    /// adjacency list skipped with a relative seek, so the scan touches
    /// 16 bytes per article regardless of link counts. Reading zero bytes
    /// where a header would start is the clean end of file.
    ///
    /// # Errors
    ///
    /// Returns an error if the global header is missing or claims a
    /// negative article count, if a record header is cut short by the end
    /// of the file, or if a record header carries a nonzero sentinel or a
    /// negative count (the cursor is no longer at a record boundary).
    pub fn scan<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read + Seek,
    {
        let (version, article_count) = read_global_header(rdr)?;

        let mut header = [0u8; RECORD_HEADER_LEN];
        let mut stats = Self {
            version,
            article_count,
            ..Self::default()
        };
        loop {
            let offset = rdr.stream_position()?;
            if !read_header(rdr, &mut header, offset)? {
                break;
            }
            let sentinel = le_i32(&header, 0);
            if sentinel != 0 {
                return Err(LinkIndexError::invalid_format(
                    "sentinel",
                    format!("nonzero sentinel {sentinel:#010x} at offset {offset}; scan desynchronized"),
                ));
            }
            let link_count = le_i32(&header, 4);
            let bidirectional = le_i32(&header, 8);
            if link_count < 0 || bidirectional < 0 {
                return Err(LinkIndexError::invalid_format(
                    "link_count",
                    format!("negative count in the record header at offset {offset}"),
                ));
            }
            stats.scanned_records += 1;
            stats.total_links += link_count as u64;
            stats.total_bidirectional_links += bidirectional as u64;
            // The adjacency list itself is irrelevant for totals.
            rdr.seek(SeekFrom::Current(i64::from(link_count) * 4))?;
        }

        log::debug!(
            "scanned {} records: {} links, {} bidirectional",
            stats.scanned_records,
            stats.total_links,
            stats.total_bidirectional_links
        );
        Ok(stats)
    }

    /// Mean number of outbound links per article, using the article count
    /// claimed by the global header.
    ///
    /// # Errors
    ///
    /// Returns an error if the global header claimed zero articles.
    pub fn average_links_per_article(&self) -> Result<f64> {
        if self.article_count == 0 {
            return Err(LinkIndexError::zero_division(
                "cannot average links over zero articles",
            ));
        }
        Ok(self.total_links as f64 / f64::from(self.article_count))
    }
}

/// Reads only the global header and returns the claimed article count.
///
/// # Errors
///
/// Returns an error if the global header is missing or claims a negative
/// article count.
pub fn article_count<R>(rdr: &mut R) -> Result<u32>
where
    R: Read + Seek,
{
    let (_, article_count) = read_global_header(rdr)?;
    Ok(article_count)
}

// Seeks to the start of the file and parses `[version, article_count]`
// from the global header.
fn read_global_header<R>(rdr: &mut R) -> Result<(i32, u32)>
where
    R: Read + Seek,
{
    rdr.seek(SeekFrom::Start(0))?;
    let mut header = [0u8; RECORD_HEADER_LEN];
    rdr.read_exact(&mut header).map_err(|e| {
        if e.kind() == ErrorKind::UnexpectedEof {
            LinkIndexError::invalid_format(
                "global_header",
                "index shorter than the 16-byte global header",
            )
        } else {
            LinkIndexError::from(e)
        }
    })?;
    let version = le_i32(&header, 0);
    let raw_count = le_i32(&header, 4);
    let article_count = u32::try_from(raw_count).map_err(|_| {
        LinkIndexError::invalid_format(
            "article_count",
            format!("global header claims a negative article count {raw_count}"),
        )
    })?;
    Ok((version, article_count))
}

// Fills `buf` from `rdr`. Ok(false) on a clean end of file (zero bytes
// read), Ok(true) on a full header, an error on a short read.
fn read_header<R>(rdr: &mut R, buf: &mut [u8; RECORD_HEADER_LEN], offset: u64) -> Result<bool>
where
    R: Read,
{
    let mut filled = 0;
    while filled < buf.len() {
        match rdr.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(LinkIndexError::from(e)),
        }
    }
    match filled {
        0 => Ok(false),
        n if n == buf.len() => Ok(true),
        n => Err(LinkIndexError::invalid_format(
            "header",
            format!("truncated record header at offset {offset}: {n} of {RECORD_HEADER_LEN} bytes"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    fn index_bytes(version: i32, article_count: i32, records: &[&[u32]]) -> Vec<u8> {
        let mut buf = Vec::new();
        for field in [version, article_count, 0, 0] {
            buf.extend_from_slice(&field.to_le_bytes());
        }
        for links in records {
            for field in [0, links.len() as i32, links.len() as i32 / 2, 0] {
                buf.extend_from_slice(&field.to_le_bytes());
            }
            for &link in *links {
                buf.extend_from_slice(&link.to_le_bytes());
            }
        }
        buf
    }

    #[test]
    fn test_scan_totals() {
        let bytes = index_bytes(1, 3, &[&[16, 32, 48], &[0], &[]]);
        let stats = AggregateStats::scan(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(stats.version, 1);
        assert_eq!(stats.article_count, 3);
        assert_eq!(stats.scanned_records, 3);
        assert_eq!(stats.total_links, 4);
        assert_eq!(stats.total_bidirectional_links, 1);
        let avg = stats.average_links_per_article().unwrap();
        assert!((avg - 4.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_scan_two_article_file() {
        let bytes = index_bytes(1, 2, &[&[36], &[]]);
        let stats = AggregateStats::scan(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(stats.article_count, 2);
        assert_eq!(stats.total_links, 1);
        assert!((stats.average_links_per_article().unwrap() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_scan_empty_index() {
        let bytes = index_bytes(1, 0, &[]);
        let stats = AggregateStats::scan(&mut Cursor::new(bytes)).unwrap();
        assert_eq!(stats.scanned_records, 0);
        assert_eq!(stats.total_links, 0);
        let e = stats.average_links_per_article().unwrap_err();
        assert!(matches!(e, LinkIndexError::ZeroDivision(_)), "{e}");
    }

    #[test]
    fn test_scan_missing_global_header() {
        let e = AggregateStats::scan(&mut Cursor::new(vec![0u8; 8])).unwrap_err();
        assert!(matches!(e, LinkIndexError::InvalidFormat(_)), "{e}");
    }

    #[test]
    fn test_scan_short_record_header() {
        let mut bytes = index_bytes(1, 2, &[&[32]]);
        bytes.extend_from_slice(&[0u8; 7]);
        let e = AggregateStats::scan(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(e, LinkIndexError::InvalidFormat(_)), "{e}");
    }

    #[test]
    fn test_scan_desynchronized_sentinel() {
        let mut bytes = index_bytes(1, 1, &[&[]]);
        bytes[16..20].copy_from_slice(&5i32.to_le_bytes());
        let e = AggregateStats::scan(&mut Cursor::new(bytes)).unwrap_err();
        assert!(matches!(e, LinkIndexError::InvalidFormat(_)), "{e}");
    }

    #[test]
    fn test_article_count_fast_path() {
        let bytes = index_bytes(1, 42, &[]);
        assert_eq!(article_count(&mut Cursor::new(bytes)).unwrap(), 42);
    }
}
