use std::collections::HashMap;

use bytes::Bytes;

use super::value::Value;

/// A bencode dictionary that remembers insertion order.
///
/// Entries are kept in a vector in the order keys were first inserted, with a
/// hash index on the side for constant-time lookup. Encoding walks the
/// entries in that order, so a decoded dictionary re-encodes with its keys
/// exactly where the input had them.
///
/// Keys are unique. Putting an existing key replaces its value but keeps the
/// key's original position.
///
/// # Examples
///
/// ```
/// use benco::{Dictionary, Value};
///
/// let mut dict = Dictionary::new();
/// dict.put("zebra", 1i64);
/// dict.put("apple", 2i64);
///
/// let keys: Vec<&[u8]> = dict.keys().map(|k| k.as_ref()).collect();
/// assert_eq!(keys, [b"zebra".as_slice(), b"apple".as_slice()]);
/// assert_eq!(dict.get(b"apple"), Some(&Value::Integer(2)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: Vec<(Bytes, Value)>,
    index: HashMap<Bytes, usize>,
}

impl Dictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty dictionary with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts `value` under `key`, returning the value it replaced.
    ///
    /// A new key is appended after all existing ones. An existing key keeps
    /// its position and only its value changes.
    pub fn put(&mut self, key: impl Into<Bytes>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();

        if let Some(&slot) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[slot].1, value));
        }

        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    pub fn get(&self, key: &[u8]) -> Option<&Value> {
        let slot = *self.index.get(key)?;
        Some(&self.entries[slot].1)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut Value> {
        let slot = *self.index.get(key)?;
        Some(&mut self.entries[slot].1)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.index.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Bytes> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates over values in key insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, &Value)> {
        self.entries.iter().map(entry_ref)
    }

    /// Reorders the entries so keys are sorted as raw byte strings.
    ///
    /// BEP-3 producers emit dictionaries with sorted keys. Decoding never
    /// sorts on its own; call this before encoding when the output has to
    /// match such a producer byte for byte.
    pub fn sort_keys(&mut self) {
        self.entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        for (slot, (key, _)) in self.entries.iter().enumerate() {
            if let Some(entry) = self.index.get_mut(key) {
                *entry = slot;
            }
        }
    }
}

impl PartialEq for Dictionary {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for Dictionary {}

impl<K: Into<Bytes>, V: Into<Value>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = Dictionary::new();
        dict.extend(iter);
        dict
    }
}

impl<K: Into<Bytes>, V: Into<Value>> Extend<(K, V)> for Dictionary {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl IntoIterator for Dictionary {
    type Item = (Bytes, Value);
    type IntoIter = std::vec::IntoIter<(Bytes, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = (&'a Bytes, &'a Value);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (Bytes, Value)>,
        fn(&'a (Bytes, Value)) -> (&'a Bytes, &'a Value),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(entry_ref as fn(_) -> _)
    }
}

fn entry_ref((key, value): &(Bytes, Value)) -> (&Bytes, &Value) {
    (key, value)
}
