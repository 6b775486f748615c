use std::io::{self, Write};

use super::dictionary::Dictionary;
use super::value::Value;

/// Encodes a bencode value to a byte vector.
///
/// The output follows the canonical bencode format:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys in insertion order)
///
/// Encoding cannot fail: every `Value` has exactly one canonical form.
///
/// # Examples
///
/// ```
/// use benco::{encode, Dictionary, Value};
///
/// assert_eq!(encode(&Value::Integer(42)), b"i42e");
/// assert_eq!(encode(&Value::string("hello")), b"5:hello");
///
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list), b"li1e3:twoe");
///
/// let mut dict = Dictionary::new();
/// dict.put("b", 2i64);
/// dict.put("a", 1i64);
/// assert_eq!(encode(&Value::Dict(dict)), b"d1:bi2e1:ai1ee");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    encode_value(value, &mut buf);
    buf
}

/// Writes the canonical encoding of `value` to `writer`.
///
/// # Errors
///
/// Returns any error reported by the writer.
pub fn encode_to<W: Write>(value: &Value, mut writer: W) -> io::Result<()> {
    writer.write_all(&encode(value))
}

/// Encodes raw bytes as a bencode byte string.
///
/// An absent string is encoded by passing an empty slice, giving `0:`.
///
/// ```
/// use benco::encode_string;
///
/// assert_eq!(encode_string("Hello world!"), b"12:Hello world!");
/// assert_eq!(encode_string(""), b"0:");
/// ```
pub fn encode_string(s: impl AsRef<[u8]>) -> Vec<u8> {
    let mut buf = Vec::new();
    write_bytes(s.as_ref(), &mut buf);
    buf
}

/// Encodes an integer in its minimal decimal form.
///
/// ```
/// use benco::encode_integer;
///
/// assert_eq!(encode_integer(-12), b"i-12e");
/// assert_eq!(encode_integer(0), b"i0e");
/// ```
pub fn encode_integer(n: i64) -> Vec<u8> {
    let mut buf = Vec::new();
    write_integer(n, &mut buf);
    buf
}

pub fn encode_list(items: &[Value]) -> Vec<u8> {
    let mut buf = Vec::new();
    write_list(items, &mut buf);
    buf
}

pub fn encode_dictionary(dict: &Dictionary) -> Vec<u8> {
    let mut buf = Vec::new();
    write_dict(dict, &mut buf);
    buf
}

fn encode_value(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Bytes(b) => write_bytes(b, buf),
        Value::Integer(i) => write_integer(*i, buf),
        Value::List(l) => write_list(l, buf),
        Value::Dict(d) => write_dict(d, buf),
    }
}

fn write_bytes(b: &[u8], buf: &mut Vec<u8>) {
    buf.extend_from_slice(b.len().to_string().as_bytes());
    buf.push(b':');
    buf.extend_from_slice(b);
}

fn write_integer(n: i64, buf: &mut Vec<u8>) {
    buf.push(b'i');
    buf.extend_from_slice(n.to_string().as_bytes());
    buf.push(b'e');
}

fn write_list(items: &[Value], buf: &mut Vec<u8>) {
    buf.push(b'l');
    for item in items {
        encode_value(item, buf);
    }
    buf.push(b'e');
}

fn write_dict(dict: &Dictionary, buf: &mut Vec<u8>) {
    buf.push(b'd');
    for (key, val) in dict {
        write_bytes(key, buf);
        encode_value(val, buf);
    }
    buf.push(b'e');
}
