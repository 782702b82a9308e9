//! Bit-packed classification metadata stored in every record header.

// Field positions within the 32-bit metadata word, expressed as shifts from
// the least-significant bit. The format documentation numbers bits from the
// most-significant bit; bit `i` in that numbering sits at shift `31 - i`.
const GOOD_SHIFT: u32 = 14;
const FEATURED_SHIFT: u32 = 13;
const YEAR_SHIFT: u32 = 12;
const LIST_SHIFT: u32 = 11;
const NAMESPACE_SHIFT: u32 = 8;
const NAMESPACE_MASK: u32 = 0b11;
const DISAMBIGUATION_SHIFT: u32 = 6;
const TITLE_WORDS_SHIFT: u32 = 3;
const TITLE_WORDS_MASK: u32 = 0b111;
const ARTICLE_LENGTH_SHIFT: u32 = 0;
const ARTICLE_LENGTH_MASK: u32 = 0b111;

/// Namespace of an article.
///
/// The on-disk encoding enumerates values 0 through 6. Raw values outside
/// the enumeration decode to [`Namespace::Other`] so that metadata decoding
/// stays a total function over arbitrary 32-bit words.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Namespace {
    /// A regular article.
    #[default]
    Normal = 0,
    /// A category page.
    Category = 1,
    /// A project-internal page.
    Wikipedia = 2,
    /// A portal page.
    Portal = 3,
    /// A book page.
    Book = 4,
    /// Reserved by the format.
    Reserved = 5,
    /// Any other namespace.
    Other = 6,
}

impl Namespace {
    /// Decodes a raw namespace field value, falling back to
    /// [`Namespace::Other`] for values the format does not enumerate.
    pub const fn from_bits(bits: u32) -> Self {
        match bits {
            0 => Self::Normal,
            1 => Self::Category,
            2 => Self::Wikipedia,
            3 => Self::Portal,
            4 => Self::Book,
            5 => Self::Reserved,
            _ => Self::Other,
        }
    }

    /// Returns the raw field value of this namespace.
    pub const fn to_bits(self) -> u32 {
        self as u32
    }
}

/// Classification metadata decoded from the packed 32-bit header field.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Metadata {
    /// Whether the article is flagged as a good article.
    pub is_good: bool,
    /// Whether the article is flagged as a featured article.
    pub is_featured: bool,
    /// Whether the article covers a calendar year.
    pub is_year_article: bool,
    /// Whether the article is a list.
    pub is_list: bool,
    /// Namespace of the article.
    pub namespace: Namespace,
    /// Whether the article is a disambiguation page.
    pub is_disambiguation: bool,
    /// Number of words in the article title, capped at 7 by the 3-bit field.
    pub word_count_in_title: u8,
    /// Base-10 logarithm of the article length, capped at 7 by the 3-bit field.
    pub log10_article_length: u8,
}

impl Metadata {
    /// Decodes a packed metadata word.
    ///
    /// This is a pure function: any 32-bit input is well-formed, reserved
    /// bits are ignored, and identical inputs always yield identical output.
    pub const fn from_bits(bits: u32) -> Self {
        Self {
            is_good: bits >> GOOD_SHIFT & 1 != 0,
            is_featured: bits >> FEATURED_SHIFT & 1 != 0,
            is_year_article: bits >> YEAR_SHIFT & 1 != 0,
            is_list: bits >> LIST_SHIFT & 1 != 0,
            namespace: Namespace::from_bits(bits >> NAMESPACE_SHIFT & NAMESPACE_MASK),
            is_disambiguation: bits >> DISAMBIGUATION_SHIFT & 1 != 0,
            word_count_in_title: (bits >> TITLE_WORDS_SHIFT & TITLE_WORDS_MASK) as u8,
            log10_article_length: (bits >> ARTICLE_LENGTH_SHIFT & ARTICLE_LENGTH_MASK) as u8,
        }
    }

    /// Packs this metadata into its on-disk 32-bit representation.
    ///
    /// Multi-bit fields wider than their on-disk width are truncated to it.
    pub const fn to_bits(&self) -> u32 {
        (self.is_good as u32) << GOOD_SHIFT
            | (self.is_featured as u32) << FEATURED_SHIFT
            | (self.is_year_article as u32) << YEAR_SHIFT
            | (self.is_list as u32) << LIST_SHIFT
            | (self.namespace.to_bits() & NAMESPACE_MASK) << NAMESPACE_SHIFT
            | (self.is_disambiguation as u32) << DISAMBIGUATION_SHIFT
            | (self.word_count_in_title as u32 & TITLE_WORDS_MASK) << TITLE_WORDS_SHIFT
            | (self.log10_article_length as u32 & ARTICLE_LENGTH_MASK) << ARTICLE_LENGTH_SHIFT
    }
}
