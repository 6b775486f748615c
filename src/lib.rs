//! benco - A bencode codec
//!
//! This library decodes untrusted bencode buffers into an owned value tree
//! and encodes value trees back into their canonical form.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 value model, decoder, encoder and format errors
//!
//! The common entry points are re-exported here.

pub mod bencode;

pub use bencode::{
    decode, decode_dictionary, decode_integer, decode_list, decode_string, encode,
    encode_dictionary, encode_integer, encode_list, encode_string, encode_to, BencodeError,
    Decoder, Dictionary, Fragment, Value, DEFAULT_MAX_DEPTH,
};
