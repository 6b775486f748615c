use bytes::Bytes;
use tracing::{debug, trace};

use super::dictionary::Dictionary;
use super::error::{BencodeError, Fragment};
use super::value::Value;

/// Default limit on how deeply lists and dictionaries may nest.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decodes a complete buffer holding a single bencode value of any kind.
///
/// Uses [`Decoder::default`]; see [`Decoder::decode`].
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    Decoder::default().decode(data)
}

/// Decodes a complete buffer holding a single byte string.
pub fn decode_string(data: &[u8]) -> Result<Bytes, BencodeError> {
    Decoder::default().decode_string(data)
}

/// Decodes a complete buffer holding a single integer.
pub fn decode_integer(data: &[u8]) -> Result<i64, BencodeError> {
    Decoder::default().decode_integer(data)
}

/// Decodes a complete buffer holding a single list.
pub fn decode_list(data: &[u8]) -> Result<Vec<Value>, BencodeError> {
    Decoder::default().decode_list(data)
}

/// Decodes a complete buffer holding a single dictionary.
pub fn decode_dictionary(data: &[u8]) -> Result<Dictionary, BencodeError> {
    Decoder::default().decode_dictionary(data)
}

/// A configured bencode decoder.
///
/// Decoding walks the input once, left to right. Lists and dictionaries are
/// parsed recursively, so the nesting depth is capped to keep hostile input
/// from exhausting the stack; anything deeper than
/// [`max_depth`](Self::max_depth) is rejected with
/// [`BencodeError::ExcessiveNestingDepth`].
///
/// Every `decode_*` method expects the buffer to hold exactly one value of
/// the requested kind. Bytes left over after it are reported as
/// [`BencodeError::TrailingGarbage`]; use [`decode_prefix`](Self::decode_prefix)
/// when the value is followed by other data.
///
/// # Examples
///
/// ```
/// use benco::{BencodeError, Decoder};
///
/// let decoder = Decoder::new().max_depth(2);
/// assert!(decoder.decode(b"llli1eeee").is_err());
/// assert!(decoder.decode(b"lli1ee4:spame").is_ok());
///
/// let err = Decoder::new().decode_integer(b"i-0e").unwrap_err();
/// assert!(matches!(err, BencodeError::NegativeZero(_)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many lists and dictionaries may be nested inside each other.
    ///
    /// A top-level container counts as depth 1. A limit of 0 rejects every
    /// container.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Decodes a buffer holding one value of any kind.
    ///
    /// The leading byte picks the kind: a digit starts a byte string, `i` an
    /// integer, `l` a list and `d` a dictionary.
    ///
    /// ```
    /// use benco::{decode, Value};
    ///
    /// let value = decode(b"l4:spami42ee").unwrap();
    /// assert_eq!(value.as_list().map(|l| l.len()), Some(2));
    /// assert!(decode(b"x").is_err());
    /// ```
    pub fn decode(&self, data: &[u8]) -> Result<Value, BencodeError> {
        self.run(data, true, Cursor::any).map(|(value, _)| value)
    }

    /// Decodes the value at the start of `data` and returns it together with
    /// the number of bytes it occupied. Anything after it is left alone.
    ///
    /// ```
    /// use benco::{Decoder, Value};
    ///
    /// let (value, used) = Decoder::new().decode_prefix(b"i42etail").unwrap();
    /// assert_eq!(value, Value::Integer(42));
    /// assert_eq!(used, 4);
    /// ```
    pub fn decode_prefix(&self, data: &[u8]) -> Result<(Value, usize), BencodeError> {
        self.run(data, false, Cursor::any)
    }

    pub fn decode_string(&self, data: &[u8]) -> Result<Bytes, BencodeError> {
        self.run(data, true, Cursor::bytes).map(|(value, _)| value)
    }

    pub fn decode_integer(&self, data: &[u8]) -> Result<i64, BencodeError> {
        self.run(data, true, Cursor::integer).map(|(value, _)| value)
    }

    pub fn decode_list(&self, data: &[u8]) -> Result<Vec<Value>, BencodeError> {
        self.run(data, true, Cursor::list).map(|(value, _)| value)
    }

    pub fn decode_dictionary(&self, data: &[u8]) -> Result<Dictionary, BencodeError> {
        self.run(data, true, Cursor::dict).map(|(value, _)| value)
    }

    fn run<'d, T>(
        &self,
        data: &'d [u8],
        whole: bool,
        parse: impl FnOnce(&mut Cursor<'d>) -> Result<T, BencodeError>,
    ) -> Result<(T, usize), BencodeError> {
        let result = self.parse_top_level(data, whole, parse);
        if let Err(err) = &result {
            trace!("rejected {} byte buffer: {}", data.len(), err);
        }
        result
    }

    fn parse_top_level<'d, T>(
        &self,
        data: &'d [u8],
        whole: bool,
        parse: impl FnOnce(&mut Cursor<'d>) -> Result<T, BencodeError>,
    ) -> Result<(T, usize), BencodeError> {
        if data.is_empty() {
            return Err(BencodeError::MissingOrEmptyInput);
        }

        let mut cursor = Cursor::new(data, self.max_depth);
        let value = parse(&mut cursor)?;

        if whole && cursor.pos != data.len() {
            return Err(BencodeError::TrailingGarbage(cursor.fragment(cursor.pos)));
        }

        Ok((value, cursor.pos))
    }
}

/// Position of a single decode within its input.
///
/// Each routine starts at `pos`, leaves it just past the token it consumed,
/// and never looks at a byte twice.
struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8], max_depth: usize) -> Self {
        Self {
            data,
            pos: 0,
            depth: 0,
            max_depth,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn fragment(&self, at: usize) -> Fragment {
        Fragment::new(self.data, at)
    }

    fn take_digits(&mut self) -> &'a [u8] {
        let data = self.data;
        let start = self.pos;
        while self.pos < data.len() && data[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        &data[start..self.pos]
    }

    /// Parses whatever value starts at the cursor. Returns `None` without
    /// consuming anything if the next byte cannot start a value.
    fn next_value(&mut self) -> Option<Result<Value, BencodeError>> {
        let value = match self.peek()? {
            b'0'..=b'9' => self.bytes().map(Value::Bytes),
            b'i' => self.integer().map(Value::Integer),
            b'l' => self.list().map(Value::List),
            b'd' => self.dict().map(Value::Dict),
            _ => return None,
        };
        Some(value)
    }

    fn any(&mut self) -> Result<Value, BencodeError> {
        let start = self.pos;
        match self.next_value() {
            Some(value) => value,
            None => match self.data.get(start) {
                Some(&tag) => Err(BencodeError::InvalidTag {
                    tag: tag as char,
                    fragment: self.fragment(start),
                }),
                None => Err(BencodeError::MissingOrEmptyInput),
            },
        }
    }

    fn bytes(&mut self) -> Result<Bytes, BencodeError> {
        let start = self.pos;
        let digits = self.take_digits();

        match self.peek() {
            Some(b':') if !digits.is_empty() => {}
            Some(_) if !digits.is_empty() => {
                return Err(BencodeError::NonNumericLength(self.fragment(start)));
            }
            _ => return Err(BencodeError::MissingLengthOrColon(self.fragment(start))),
        }
        self.pos += 1;

        let remaining = self.data.len() - self.pos;
        let len = match parse_length(digits) {
            Some(len) if len <= remaining => len,
            _ => return Err(BencodeError::DeclaredLengthMismatch(self.fragment(start))),
        };

        let bytes = Bytes::copy_from_slice(&self.data[self.pos..self.pos + len]);
        self.pos += len;
        Ok(bytes)
    }

    fn integer(&mut self) -> Result<i64, BencodeError> {
        let start = self.pos;
        if self.peek() != Some(b'i') {
            return Err(BencodeError::MissingIntegerDelimiters(self.fragment(start)));
        }
        self.pos += 1;

        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }
        let digits = self.take_digits();

        match self.peek() {
            Some(b'e') => {}
            Some(_) => return Err(BencodeError::NonNumericMagnitude(self.fragment(start))),
            None => return Err(BencodeError::MissingIntegerDelimiters(self.fragment(start))),
        }

        if digits.is_empty() {
            return Err(BencodeError::NonNumericMagnitude(self.fragment(start)));
        }
        if negative && digits.iter().all(|&d| d == b'0') {
            return Err(BencodeError::NegativeZero(self.fragment(start)));
        }
        if digits.len() > 1 && digits[0] == b'0' {
            return Err(BencodeError::LeadingZero(self.fragment(start)));
        }

        // Sign and digits only, so parsing fails solely on overflow.
        let value = std::str::from_utf8(&self.data[start + 1..self.pos])
            .ok()
            .and_then(|text| text.parse::<i64>().ok())
            .ok_or_else(|| BencodeError::IntegerOutOfRange(self.fragment(start)))?;

        self.pos += 1;
        Ok(value)
    }

    fn list(&mut self) -> Result<Vec<Value>, BencodeError> {
        let start = self.pos;
        if self.peek() != Some(b'l') {
            return Err(BencodeError::MissingListDelimiters(self.fragment(start)));
        }
        self.enter(start)?;
        self.pos += 1;

        let mut list = Vec::new();
        loop {
            match self.peek() {
                None => return Err(BencodeError::UnterminatedList(self.fragment(start))),
                Some(b'e') => break,
                Some(_) => {
                    let at = self.pos;
                    match self.next_value() {
                        Some(item) => list.push(item?),
                        None => return Err(BencodeError::IncompleteElement(self.fragment(at))),
                    }
                }
            }
        }

        self.pos += 1;
        self.depth -= 1;
        Ok(list)
    }

    fn dict(&mut self) -> Result<Dictionary, BencodeError> {
        let start = self.pos;
        if self.peek() != Some(b'd') {
            return Err(BencodeError::MissingDictionaryDelimiters(self.fragment(start)));
        }
        self.enter(start)?;
        self.pos += 1;

        let mut dict = Dictionary::new();
        loop {
            match self.peek() {
                None => return Err(BencodeError::UnterminatedDictionary(self.fragment(start))),
                Some(b'e') => break,
                Some(b'0'..=b'9') => {
                    let key_start = self.pos;
                    let key = self.bytes()?;
                    match self.next_value() {
                        Some(value) => {
                            dict.put(key, value?);
                        }
                        None => {
                            return Err(BencodeError::MissingValueForKey(
                                self.fragment(key_start),
                            ));
                        }
                    }
                }
                Some(_) => return Err(BencodeError::NonStringKey(self.fragment(self.pos))),
            }
        }

        self.pos += 1;
        self.depth -= 1;
        Ok(dict)
    }

    fn enter(&mut self, start: usize) -> Result<(), BencodeError> {
        if self.depth >= self.max_depth {
            debug!(
                "nesting limit of {} reached at offset {}",
                self.max_depth, start
            );
            return Err(BencodeError::ExcessiveNestingDepth {
                limit: self.max_depth,
                fragment: self.fragment(start),
            });
        }
        self.depth += 1;
        Ok(())
    }
}

fn parse_length(digits: &[u8]) -> Option<usize> {
    digits.iter().try_fold(0usize, |len, &d| {
        len.checked_mul(10)?.checked_add(usize::from(d - b'0'))
    })
}
