//! Resolution between article titles and index offsets.

use std::path::Path;

use csv_core::{ReadFieldResult, ReaderBuilder};
use hashbrown::HashMap;

use crate::errors::{LinkIndexError, Result};

/// Maps article titles to index offsets and back.
///
/// Lookups are case-insensitive on titles and return the first match; a
/// miss is an absence, never an error.
pub trait ArticleResolver {
    /// Title of the article at `offset`, if known.
    fn resolve_title(&self, offset: u32) -> Option<&str>;

    /// Offset of the article titled `title` (case-insensitive), if known.
    fn resolve_offset(&self, title: &str) -> Option<u32>;

    /// Titles for a batch of offsets; unresolvable offsets are skipped.
    fn resolve_many_titles(&self, offsets: &[u32]) -> Vec<String> {
        offsets
            .iter()
            .filter_map(|&offset| self.resolve_title(offset).map(str::to_owned))
            .collect()
    }
}

/// An in-memory title table loaded from a tab-separated `offset<TAB>title`
/// file.
///
/// When the same offset or the same lowercased title appears more than
/// once, the first row wins in that direction.
#[derive(Debug)]
pub struct TitleTable {
    titles: HashMap<u32, String>,
    offsets: HashMap<String, u32>,
}

impl TitleTable {
    /// Loads a title table from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// two-column table (see [`TitleTable::from_bytes`]).
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|e| {
            LinkIndexError::invalid_argument("path", format!("failed to read title table: {e}"))
        })?;
        let table = Self::from_bytes(&data)?;
        log::debug!("loaded {} titles from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parses a title table from raw bytes.
    ///
    /// Each row holds an offset and a title separated by a tab. Titles are
    /// taken verbatim; double quotes carry no special meaning. Blank rows
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a row does not have exactly two fields, the
    /// offset is not a non-negative integer, or the title is not UTF-8.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        // Titles may legitimately start with a double quote.
        let mut rdr = ReaderBuilder::new().delimiter(b'\t').quoting(false).build();
        let mut table = Self {
            titles: HashMap::new(),
            offsets: HashMap::new(),
        };

        let mut pos = 0;
        let mut out = [0u8; 1024];
        let mut field = Vec::new();
        let mut row: Vec<Vec<u8>> = Vec::new();
        loop {
            let (result, nin, nout) = rdr.read_field(&data[pos..], &mut out);
            pos += nin;
            field.extend_from_slice(&out[..nout]);
            match result {
                ReadFieldResult::InputEmpty | ReadFieldResult::OutputFull => {}
                ReadFieldResult::Field { record_end } => {
                    row.push(std::mem::take(&mut field));
                    if record_end {
                        table.insert_row(&row)?;
                        row.clear();
                    }
                }
                ReadFieldResult::End => break,
            }
        }
        Ok(table)
    }

    fn insert_row(&mut self, row: &[Vec<u8>]) -> Result<()> {
        if let [single] = row
            && single.is_empty()
        {
            return Ok(());
        }
        let [offset, title] = row else {
            return Err(LinkIndexError::invalid_format(
                "titles",
                format!("expected 2 fields per row, got {}", row.len()),
            ));
        };
        let offset = std::str::from_utf8(offset)?.trim().parse::<u32>()?;
        let title = std::str::from_utf8(title)?;
        self.offsets
            .entry(title.to_lowercase())
            .or_insert(offset);
        self.titles
            .entry(offset)
            .or_insert_with(|| title.to_owned());
        Ok(())
    }

    /// Number of distinct offsets in the table.
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl ArticleResolver for TitleTable {
    fn resolve_title(&self, offset: u32) -> Option<&str> {
        self.titles.get(&offset).map(String::as_str)
    }

    fn resolve_offset(&self, title: &str) -> Option<u32> {
        self.offsets.get(&title.to_lowercase()).copied()
    }
}
