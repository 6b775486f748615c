//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is a self-delimiting, length-prefixed format with no external
//! schema. A buffer holds exactly one value, which may nest others.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:cow3:mooe` → {"cow": "moo"} |
//!
//! Integers are signed 64-bit. They are written without leading zeros, and
//! `-0` is never valid. Dictionary keys are byte strings; their order in the
//! input is kept and reproduced on encoding rather than sorted.
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use benco::bencode::{decode, decode_dictionary, decode_integer, decode_string};
//!
//! assert_eq!(decode_integer(b"i42e").unwrap(), 42);
//! assert_eq!(decode_string(b"4:spam").unwrap(), "spam");
//!
//! let value = decode(b"l4:spami42ee").unwrap();
//! assert_eq!(value.as_list().unwrap().len(), 2);
//!
//! let dict = decode_dictionary(b"d3:Onei1e3:Twoi2ee").unwrap();
//! let keys: Vec<_> = dict.keys().collect();
//! assert_eq!(keys, ["One", "Two"]);
//! ```
//!
//! ## Encoding bencode data
//!
//! ```
//! use benco::bencode::{encode, encode_integer, encode_string, Value};
//!
//! assert_eq!(encode_integer(42), b"i42e");
//! assert_eq!(encode_string("hello"), b"5:hello");
//!
//! let mut info = Value::dictionary();
//! info.put("name", "example.txt");
//! info.put("length", 1024i64);
//!
//! let mut files = Value::list();
//! files.append(info);
//! assert_eq!(encode(&files), b"ld4:name11:example.txt6:lengthi1024eee");
//! ```
//!
//! # Error Handling
//!
//! Decoding fails as a whole on the first problem found, returning a
//! [`BencodeError`] that names the rule broken and carries a [`Fragment`] of
//! the input where it happened. Some common ones:
//!
//! - [`BencodeError::DeclaredLengthMismatch`] - Byte string shorter than its prefix says
//! - [`BencodeError::LeadingZero`] / [`BencodeError::NegativeZero`] - Non-canonical integer
//! - [`BencodeError::IntegerOutOfRange`] - Integer does not fit in an `i64`
//! - [`BencodeError::UnterminatedList`] - Input ended inside a list
//! - [`BencodeError::NonStringKey`] - Dictionary key that is not a byte string
//! - [`BencodeError::ExcessiveNestingDepth`] - Recursion limit exceeded (64 levels by default)
//! - [`BencodeError::TrailingGarbage`] - Extra data after the value
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod dictionary;
mod encode;
mod error;
mod value;

pub use decode::{
    decode, decode_dictionary, decode_integer, decode_list, decode_string, Decoder,
    DEFAULT_MAX_DEPTH,
};
pub use dictionary::Dictionary;
pub use encode::{
    encode, encode_dictionary, encode_integer, encode_list, encode_string, encode_to,
};
pub use error::{BencodeError, Fragment};
pub use value::Value;

#[cfg(test)]
mod tests;
