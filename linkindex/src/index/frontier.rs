//! Hop-by-hop expansion of link frontiers.

use std::io::{Read, Seek};

use hashbrown::HashSet;

use crate::errors::Result;
use crate::index::record::ArticleRecord;

/// Expands a set of seed offsets by one hop.
///
/// Decodes the record at every seed offset and unions all linked offsets
/// into one de-duplicated set. Seeds themselves appear in the result only
/// if some seed links to them. An empty seed set yields an empty result.
///
/// Each record is decoded, merged, and dropped; nothing is cached across
/// seeds or hops.
///
/// # Errors
///
/// Returns an error if any seed offset does not address a valid record.
pub fn expand<R>(rdr: &mut R, seeds: &HashSet<u32>) -> Result<HashSet<u32>>
where
    R: Read + Seek,
{
    let mut linked = HashSet::new();
    for &offset in seeds {
        let record = ArticleRecord::read_from(rdr, offset)?;
        linked.extend(record.linked_offsets);
    }
    Ok(linked)
}

/// Applies [`expand`] repeatedly, returning every frontier.
///
/// The result holds `hops + 1` sets: element 0 is the seed set and element
/// `k + 1` is `expand` applied to element `k`. Frontiers are pure one-hop
/// expansions, not shortest-distance layers: an offset reached at hop `k`
/// can reappear at any later hop, since no de-duplication is performed
/// across hops.
///
/// # Errors
///
/// Returns an error if any visited offset does not address a valid record.
pub fn expand_hops<R>(rdr: &mut R, seeds: &HashSet<u32>, hops: usize) -> Result<Vec<HashSet<u32>>>
where
    R: Read + Seek,
{
    let mut frontiers = Vec::with_capacity(hops + 1);
    frontiers.push(seeds.clone());
    for hop in 1..=hops {
        let next = expand(rdr, &frontiers[hop - 1])?;
        log::debug!("hop {hop}: {} offsets", next.len());
        frontiers.push(next);
    }
    Ok(frontiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use crate::index::Metadata;
    use crate::index::builder::{IndexBuilder, LinkTarget};

    // Chain a -> b -> c plus a 2-cycle d <-> e.
    fn fixture() -> (Vec<u8>, Vec<u32>) {
        let mut builder = IndexBuilder::new(1);
        let mut offsets = Vec::new();
        let links = [
            vec![LinkTarget::Article(1)],
            vec![LinkTarget::Article(2)],
            vec![],
            vec![LinkTarget::Article(4)],
            vec![LinkTarget::Article(3)],
        ];
        for article_links in links {
            offsets.push(builder.push(Metadata::default(), 0, article_links).unwrap());
        }
        (builder.to_vec().unwrap(), offsets)
    }

    fn set(offsets: &[u32]) -> HashSet<u32> {
        offsets.iter().copied().collect()
    }

    #[test]
    fn test_expand_empty_seeds() {
        let (bytes, _) = fixture();
        let result = expand(&mut Cursor::new(bytes), &HashSet::new()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_expand_single_hop() {
        let (bytes, o) = fixture();
        let mut rdr = Cursor::new(bytes);
        assert_eq!(expand(&mut rdr, &set(&[o[0]])).unwrap(), set(&[o[1]]));
        assert_eq!(expand(&mut rdr, &set(&[o[2]])).unwrap(), HashSet::new());
    }

    #[test]
    fn test_expand_unions_seeds() {
        let (bytes, o) = fixture();
        let mut rdr = Cursor::new(bytes);
        let result = expand(&mut rdr, &set(&[o[0], o[1], o[3]])).unwrap();
        assert_eq!(result, set(&[o[1], o[2], o[4]]));
    }

    #[test]
    fn test_expand_hops_chain() {
        let (bytes, o) = fixture();
        let mut rdr = Cursor::new(bytes);
        let frontiers = expand_hops(&mut rdr, &set(&[o[0]]), 3).unwrap();
        assert_eq!(frontiers.len(), 4);
        assert_eq!(frontiers[0], set(&[o[0]]));
        assert_eq!(frontiers[1], set(&[o[1]]));
        assert_eq!(frontiers[2], set(&[o[2]]));
        assert_eq!(frontiers[3], HashSet::new());
    }

    #[test]
    fn test_expand_hops_cycle_reappears() {
        // No de-duplication across hops: the 2-cycle alternates forever.
        let (bytes, o) = fixture();
        let mut rdr = Cursor::new(bytes);
        let frontiers = expand_hops(&mut rdr, &set(&[o[3]]), 4).unwrap();
        assert_eq!(frontiers[1], set(&[o[4]]));
        assert_eq!(frontiers[2], set(&[o[3]]));
        assert_eq!(frontiers[3], set(&[o[4]]));
        assert_eq!(frontiers[4], set(&[o[3]]));
    }

    #[test]
    fn test_two_article_scenario() {
        // Article A links to B; B links nowhere.
        let mut builder = IndexBuilder::new(1);
        let a = builder
            .push(Metadata::default(), 0, vec![LinkTarget::Article(1)])
            .unwrap();
        let b = builder.push(Metadata::default(), 0, vec![]).unwrap();
        let bytes = builder.to_vec().unwrap();
        let mut rdr = Cursor::new(bytes);

        let hop1 = expand(&mut rdr, &set(&[a])).unwrap();
        assert_eq!(hop1, set(&[b]));
        let hop2 = expand(&mut rdr, &hop1).unwrap();
        assert_eq!(hop2, HashSet::new());
    }
}
