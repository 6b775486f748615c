use bytes::Bytes;

use super::dictionary::Dictionary;
use super::encode::encode;

/// A bencode value.
///
/// Bencode has four data types: byte strings, integers, lists, and
/// dictionaries. A `Value` is a tree of them; every child is owned by exactly
/// one parent, so a tree is dropped as a unit.
///
/// There are two ways to get at the payload:
///
/// - `as_*` methods return `None` when the variant does not match. Use these
///   on data whose shape you have not checked.
/// - `expect_*` methods panic when the variant does not match. Asking a value
///   for the wrong variant is a bug in the caller, not bad input, so it is
///   never reported as a [`BencodeError`](super::BencodeError).
///
/// # Examples
///
/// ```
/// use benco::Value;
///
/// let int = Value::Integer(42);
/// let string = Value::string("hello");
/// let list = Value::List(vec![Value::Integer(1), Value::Integer(2)]);
///
/// let int2: Value = 42i64.into();
/// let string2: Value = "hello".into();
///
/// assert_eq!(int, int2);
/// assert_eq!(string, string2);
/// assert_eq!(int.as_integer(), Some(42));
/// assert_eq!(string.as_str(), Some("hello"));
/// assert!(list.is_list());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A byte string (may or may not be valid UTF-8).
    Bytes(Bytes),
    /// A signed 64-bit integer.
    Integer(i64),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A dictionary with byte string keys, in insertion order.
    Dict(Dictionary),
}

impl Value {
    /// Creates a byte string value from a UTF-8 string.
    ///
    /// ```
    /// use benco::Value;
    ///
    /// let value = Value::string("hello");
    /// assert_eq!(value.as_str(), Some("hello"));
    /// ```
    pub fn string(s: &str) -> Self {
        Value::Bytes(Bytes::copy_from_slice(s.as_bytes()))
    }

    /// Creates an empty list.
    pub fn list() -> Self {
        Value::List(Vec::new())
    }

    /// Creates an empty dictionary.
    pub fn dictionary() -> Self {
        Value::Dict(Dictionary::new())
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Bytes(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    pub fn is_dictionary(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    /// Returns the value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a byte string, if it is one.
    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the value as a UTF-8 string, if it is a valid UTF-8 byte string.
    ///
    /// Returns `None` if the value is not a byte string or if the bytes are not valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Consumes the value and returns the list, if it is one.
    pub fn into_list(self) -> Option<Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Consumes the value and returns the dictionary, if it is one.
    ///
    /// This avoids cloning the dictionary when you need ownership.
    pub fn into_dict(self) -> Option<Dictionary> {
        match self {
            Value::Dict(d) => Some(d),
            _ => None,
        }
    }

    /// Looks up a key in this value if it is a dictionary.
    ///
    /// Returns `None` if the value is not a dictionary or if the key is not present.
    ///
    /// ```
    /// use benco::decode;
    ///
    /// let value = decode(b"d3:foo3:bare").unwrap();
    /// assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
    /// assert_eq!(value.get(b"missing"), None);
    /// ```
    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        self.as_dict()?.get(key)
    }

    /// Returns the byte string payload.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a byte string.
    pub fn expect_string(&self) -> &Bytes {
        match self {
            Value::Bytes(b) => b,
            other => other.mismatch("expect_string"),
        }
    }

    /// Returns the byte string payload for replacement.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a byte string.
    pub fn expect_string_mut(&mut self) -> &mut Bytes {
        match self {
            Value::Bytes(b) => b,
            other => other.mismatch("expect_string_mut"),
        }
    }

    /// Returns the integer payload.
    ///
    /// # Panics
    ///
    /// Panics if the value is not an integer.
    pub fn expect_integer(&self) -> i64 {
        match self {
            Value::Integer(i) => *i,
            other => other.mismatch("expect_integer"),
        }
    }

    /// Returns the integer payload for replacement.
    ///
    /// # Panics
    ///
    /// Panics if the value is not an integer.
    pub fn expect_integer_mut(&mut self) -> &mut i64 {
        match self {
            Value::Integer(i) => i,
            other => other.mismatch("expect_integer_mut"),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not a list.
    pub fn expect_list(&self) -> &[Value] {
        match self {
            Value::List(l) => l,
            other => other.mismatch("expect_list"),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not a list.
    pub fn expect_list_mut(&mut self) -> &mut Vec<Value> {
        match self {
            Value::List(l) => l,
            other => other.mismatch("expect_list_mut"),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not a dictionary.
    pub fn expect_dictionary(&self) -> &Dictionary {
        match self {
            Value::Dict(d) => d,
            other => other.mismatch("expect_dictionary"),
        }
    }

    /// # Panics
    ///
    /// Panics if the value is not a dictionary.
    pub fn expect_dictionary_mut(&mut self) -> &mut Dictionary {
        match self {
            Value::Dict(d) => d,
            other => other.mismatch("expect_dictionary_mut"),
        }
    }

    /// Appends `item` to the end of this list.
    ///
    /// ```
    /// use benco::Value;
    ///
    /// let mut list = Value::list();
    /// list.append("spam");
    /// list.append(42i64);
    /// assert_eq!(list.encode(), b"l4:spami42ee");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the value is not a list.
    pub fn append(&mut self, item: impl Into<Value>) {
        self.expect_list_mut().push(item.into());
    }

    /// Inserts `value` under `key` in this dictionary, returning the value it
    /// replaced. See [`Dictionary::put`].
    ///
    /// # Panics
    ///
    /// Panics if the value is not a dictionary.
    pub fn put(&mut self, key: impl Into<Bytes>, value: impl Into<Value>) -> Option<Value> {
        self.expect_dictionary_mut().put(key, value)
    }

    /// Returns the canonical encoding of this value.
    pub fn encode(&self) -> Vec<u8> {
        encode(self)
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Bytes(_) => "byte string",
            Value::Integer(_) => "integer",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }

    #[track_caller]
    fn mismatch(&self, method: &str) -> ! {
        panic!("called `Value::{}` on a {} value", method, self.kind())
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Bytes(Bytes::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(Bytes::copy_from_slice(b))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(l: Vec<Value>) -> Self {
        Value::List(l)
    }
}

impl From<Dictionary> for Value {
    fn from(d: Dictionary) -> Self {
        Value::Dict(d)
    }
}
