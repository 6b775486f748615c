use std::fmt;

use thiserror::Error;

/// Longest excerpt of the input kept in a [`Fragment`].
const EXCERPT_LEN: usize = 32;

/// The part of the input a [`BencodeError`] refers to.
///
/// Holds the byte offset of the rejected token and a short, lossily decoded
/// excerpt of the input starting there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    offset: usize,
    excerpt: String,
}

impl Fragment {
    pub(crate) fn new(data: &[u8], offset: usize) -> Self {
        let start = offset.min(data.len());
        let end = data.len().min(start + EXCERPT_LEN);
        let mut excerpt = String::from_utf8_lossy(&data[start..end]).into_owned();
        if end < data.len() {
            excerpt.push_str("...");
        }
        Self { offset, excerpt }
    }

    /// Byte offset of the offending token in the decoded buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Input text starting at [`offset`](Self::offset), truncated.
    pub fn excerpt(&self) -> &str {
        &self.excerpt
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at offset {}", self.excerpt, self.offset)
    }
}

/// Reasons a buffer is rejected as malformed bencode.
///
/// Any of these aborts the whole decode; no partial value is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BencodeError {
    /// There was nothing to decode.
    #[error("missing or empty input")]
    MissingOrEmptyInput,

    /// A byte string has no length digits or no `:` after them.
    #[error("byte string is missing its length or colon: {0}")]
    MissingLengthOrColon(Fragment),

    /// A byte string length contains something other than digits.
    #[error("byte string length is not numeric: {0}")]
    NonNumericLength(Fragment),

    /// Fewer bytes follow the `:` than the length prefix declares.
    #[error("byte string is shorter than its declared length: {0}")]
    DeclaredLengthMismatch(Fragment),

    /// An integer does not start with `i` or is not terminated by `e`.
    #[error("integer is missing its delimiters: {0}")]
    MissingIntegerDelimiters(Fragment),

    /// An integer other than zero is written with a leading `0`.
    #[error("integer has a leading zero: {0}")]
    LeadingZero(Fragment),

    /// A zero magnitude carries a `-` sign.
    #[error("integer is negative zero: {0}")]
    NegativeZero(Fragment),

    /// An integer magnitude is empty or contains a non-digit.
    #[error("integer magnitude is not numeric: {0}")]
    NonNumericMagnitude(Fragment),

    /// An integer does not fit in an `i64`.
    #[error("integer out of range: {0}")]
    IntegerOutOfRange(Fragment),

    /// Expected a list but the token does not start with `l`.
    #[error("list is missing its delimiters: {0}")]
    MissingListDelimiters(Fragment),

    /// The input ended before the list's closing `e`.
    #[error("unterminated list: {0}")]
    UnterminatedList(Fragment),

    /// A list element does not start with a recognised tag.
    #[error("incomplete list element: {0}")]
    IncompleteElement(Fragment),

    /// Expected a dictionary but the token does not start with `d`.
    #[error("dictionary is missing its delimiters: {0}")]
    MissingDictionaryDelimiters(Fragment),

    /// The input ended before the dictionary's closing `e`.
    #[error("unterminated dictionary: {0}")]
    UnterminatedDictionary(Fragment),

    /// A dictionary key is not a byte string.
    #[error("dictionary key is not a byte string: {0}")]
    NonStringKey(Fragment),

    /// A dictionary key is not followed by a value.
    #[error("missing value for dictionary key: {0}")]
    MissingValueForKey(Fragment),

    /// The leading byte does not start any bencode value.
    #[error("unrecognised value tag {tag:?}: {fragment}")]
    InvalidTag {
        /// The offending byte, as a character.
        tag: char,
        /// Where it was found.
        fragment: Fragment,
    },

    /// Bytes remain after a complete top-level value.
    #[error("trailing garbage after value: {0}")]
    TrailingGarbage(Fragment),

    /// Containers are nested deeper than the decoder allows.
    #[error("nesting deeper than {limit} levels: {fragment}")]
    ExcessiveNestingDepth {
        /// The configured maximum depth.
        limit: usize,
        /// The container that crossed the limit.
        fragment: Fragment,
    },
}

impl BencodeError {
    /// Returns the input location this error refers to, if any.
    pub fn fragment(&self) -> Option<&Fragment> {
        match self {
            BencodeError::MissingOrEmptyInput => None,
            BencodeError::MissingLengthOrColon(f)
            | BencodeError::NonNumericLength(f)
            | BencodeError::DeclaredLengthMismatch(f)
            | BencodeError::MissingIntegerDelimiters(f)
            | BencodeError::LeadingZero(f)
            | BencodeError::NegativeZero(f)
            | BencodeError::NonNumericMagnitude(f)
            | BencodeError::IntegerOutOfRange(f)
            | BencodeError::MissingListDelimiters(f)
            | BencodeError::UnterminatedList(f)
            | BencodeError::IncompleteElement(f)
            | BencodeError::MissingDictionaryDelimiters(f)
            | BencodeError::UnterminatedDictionary(f)
            | BencodeError::NonStringKey(f)
            | BencodeError::MissingValueForKey(f)
            | BencodeError::TrailingGarbage(f) => Some(f),
            BencodeError::InvalidTag { fragment, .. }
            | BencodeError::ExcessiveNestingDepth { fragment, .. } => Some(fragment),
        }
    }
}
