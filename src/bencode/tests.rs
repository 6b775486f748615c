use bytes::Bytes;

use super::*;

#[test]
fn test_decode_integer() {
    assert_eq!(decode_integer(b"i42e").unwrap(), 42);
    assert_eq!(decode_integer(b"i-42e").unwrap(), -42);
    assert_eq!(decode_integer(b"i0e").unwrap(), 0);
}

#[test]
fn test_decode_integer_bounds() {
    assert_eq!(decode_integer(b"i9223372036854775807e").unwrap(), i64::MAX);
    assert_eq!(decode_integer(b"i-9223372036854775808e").unwrap(), i64::MIN);
    assert!(matches!(
        decode_integer(b"i9223372036854775808e"),
        Err(BencodeError::IntegerOutOfRange(_))
    ));
    assert!(matches!(
        decode_integer(b"i-9223372036854775809e"),
        Err(BencodeError::IntegerOutOfRange(_))
    ));
}

#[test]
fn test_decode_integer_invalid() {
    assert!(matches!(
        decode_integer(b"i00e"),
        Err(BencodeError::LeadingZero(_))
    ));
    assert!(matches!(
        decode_integer(b"i03e"),
        Err(BencodeError::LeadingZero(_))
    ));
    assert!(matches!(
        decode_integer(b"i-0e"),
        Err(BencodeError::NegativeZero(_))
    ));
    assert!(matches!(
        decode_integer(b"i-00e"),
        Err(BencodeError::NegativeZero(_))
    ));
    assert!(matches!(
        decode_integer(b"i0.1e"),
        Err(BencodeError::NonNumericMagnitude(_))
    ));
    assert!(matches!(
        decode_integer(b"ie"),
        Err(BencodeError::NonNumericMagnitude(_))
    ));
    assert!(matches!(
        decode_integer(b"i-e"),
        Err(BencodeError::NonNumericMagnitude(_))
    ));
    assert!(matches!(
        decode_integer(b"i42"),
        Err(BencodeError::MissingIntegerDelimiters(_))
    ));
    assert!(matches!(
        decode_integer(b"42e"),
        Err(BencodeError::MissingIntegerDelimiters(_))
    ));
    assert!(matches!(
        decode_integer(b""),
        Err(BencodeError::MissingOrEmptyInput)
    ));
}

#[test]
fn test_decode_string() {
    assert_eq!(decode_string(b"0:").unwrap(), "");
    assert_eq!(decode_string(b"1:V").unwrap(), "V");
    assert_eq!(decode_string(b"4:Four").unwrap(), "Four");
    assert_eq!(decode_string(b"12:Hello world!").unwrap(), "Hello world!");
}

#[test]
fn test_decode_string_binary() {
    let decoded = decode_string(b"3:\x00\xff:").unwrap();
    assert_eq!(decoded.as_ref(), b"\x00\xff:");
}

#[test]
fn test_decode_string_invalid() {
    assert!(matches!(
        decode_string(b""),
        Err(BencodeError::MissingOrEmptyInput)
    ));
    assert!(matches!(
        decode_string(b":"),
        Err(BencodeError::MissingLengthOrColon(_))
    ));
    assert!(matches!(
        decode_string(b":Word"),
        Err(BencodeError::MissingLengthOrColon(_))
    ));
    assert!(matches!(
        decode_string(b"Another"),
        Err(BencodeError::MissingLengthOrColon(_))
    ));
    assert!(matches!(
        decode_string(b"0"),
        Err(BencodeError::MissingLengthOrColon(_))
    ));
    assert!(matches!(
        decode_string(b"1a:x"),
        Err(BencodeError::NonNumericLength(_))
    ));
    assert!(matches!(
        decode_string(b"1:"),
        Err(BencodeError::DeclaredLengthMismatch(_))
    ));
    assert!(matches!(
        decode_string(b"5:Four"),
        Err(BencodeError::DeclaredLengthMismatch(_))
    ));
    assert!(matches!(
        decode_string(b"99999999999999999999999:x"),
        Err(BencodeError::DeclaredLengthMismatch(_))
    ));
    assert!(matches!(
        decode_string(b"3:Four"),
        Err(BencodeError::TrailingGarbage(_))
    ));
}

#[test]
fn test_decode_list() {
    let list = decode_list(b"l3:Onei2e5:Threei4e4:Fivee").unwrap();
    assert_eq!(
        list,
        vec![
            Value::string("One"),
            Value::Integer(2),
            Value::string("Three"),
            Value::Integer(4),
            Value::string("Five"),
        ]
    );
}

#[test]
fn test_decode_empty_containers() {
    assert!(decode_list(b"le").unwrap().is_empty());
    assert!(decode_dictionary(b"de").unwrap().is_empty());
}

#[test]
fn test_decode_list_invalid() {
    assert!(matches!(
        decode_list(b"l3:One"),
        Err(BencodeError::UnterminatedList(_))
    ));
    assert!(matches!(
        decode_list(b"l3:Oneei1e"),
        Err(BencodeError::TrailingGarbage(_))
    ));
    assert!(matches!(
        decode_list(b"lxe"),
        Err(BencodeError::IncompleteElement(_))
    ));
    assert!(matches!(
        decode_list(b"i1e"),
        Err(BencodeError::MissingListDelimiters(_))
    ));
    assert!(matches!(
        decode_list(b"l5:Onee"),
        Err(BencodeError::DeclaredLengthMismatch(_))
    ));
}

#[test]
fn test_decode_dictionary() {
    let dict = decode_dictionary(b"d3:Onei1e3:Twoi2ee").unwrap();
    let keys: Vec<&[u8]> = dict.keys().map(|k| k.as_ref()).collect();
    assert_eq!(keys, [b"One".as_slice(), b"Two".as_slice()]);
    let values: Vec<i64> = dict.values().filter_map(Value::as_integer).collect();
    assert_eq!(values, [1, 2]);
}

#[test]
fn test_decode_dictionary_keeps_unsorted_keys() {
    let data = b"d4:spaml1:a1:be3:cow3:mooe";
    let dict = decode_dictionary(data).unwrap();
    assert_eq!(dict.keys().next().map(|k| k.as_ref()), Some(b"spam".as_slice()));
    assert_eq!(encode_dictionary(&dict), data);
}

#[test]
fn test_decode_dictionary_invalid() {
    assert!(matches!(
        decode_dictionary(b"di3e3:fooe"),
        Err(BencodeError::NonStringKey(_))
    ));
    assert!(matches!(
        decode_dictionary(b"d3:foo"),
        Err(BencodeError::MissingValueForKey(_))
    ));
    assert!(matches!(
        decode_dictionary(b"d3:fooe"),
        Err(BencodeError::MissingValueForKey(_))
    ));
    assert!(matches!(
        decode_dictionary(b"d3:fooi1e"),
        Err(BencodeError::UnterminatedDictionary(_))
    ));
    assert!(matches!(
        decode_dictionary(b"le"),
        Err(BencodeError::MissingDictionaryDelimiters(_))
    ));
    assert!(matches!(
        decode_dictionary(b"dee"),
        Err(BencodeError::TrailingGarbage(_))
    ));
}

#[test]
fn test_decode_dictionary_duplicate_key() {
    let dict = decode_dictionary(b"d1:ai1e1:bi2e1:ai3ee").unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get(b"a"), Some(&Value::Integer(3)));
    assert_eq!(dict.keys().next().map(|k| k.as_ref()), Some(b"a".as_slice()));
}

#[test]
fn test_decode_dispatch() {
    assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
    assert_eq!(decode(b"4:spam").unwrap(), Value::string("spam"));
    assert!(decode(b"le").unwrap().is_list());
    assert!(decode(b"de").unwrap().is_dictionary());
    assert!(matches!(
        decode(b"x"),
        Err(BencodeError::InvalidTag { tag: 'x', .. })
    ));
    assert!(matches!(decode(b""), Err(BencodeError::MissingOrEmptyInput)));
}

#[test]
fn test_trailing_data_error() {
    assert!(matches!(
        decode(b"i42eextra"),
        Err(BencodeError::TrailingGarbage(_))
    ));
}

#[test]
fn test_decode_prefix() {
    let (value, used) = Decoder::new().decode_prefix(b"l4:spamei1e").unwrap();
    assert_eq!(value, Value::List(vec![Value::string("spam")]));
    assert_eq!(used, 8);
}

#[test]
fn test_nesting_limit() {
    let nested = b"lllllllllleeeeeeeeee";
    assert!(Decoder::new().max_depth(10).decode(nested).is_ok());

    let err = Decoder::new().max_depth(9).decode(nested).unwrap_err();
    match err {
        BencodeError::ExcessiveNestingDepth { limit, fragment } => {
            assert_eq!(limit, 9);
            assert_eq!(fragment.offset(), 9);
        }
        other => panic!("expected nesting error, got {other:?}"),
    }
}

#[test]
fn test_default_nesting_limit() {
    let nested = |depth: usize| {
        let mut data = vec![b'l'; depth];
        data.extend(std::iter::repeat(b'e').take(depth));
        data
    };

    assert!(decode(&nested(DEFAULT_MAX_DEPTH)).is_ok());
    assert!(matches!(
        decode(&nested(DEFAULT_MAX_DEPTH + 1)),
        Err(BencodeError::ExcessiveNestingDepth { .. })
    ));
}

#[test]
fn test_error_fragment() {
    let err = decode(b"l4:spami01ee").unwrap_err();
    let fragment = err.fragment().unwrap();
    assert_eq!(fragment.offset(), 7);
    assert_eq!(fragment.excerpt(), "i01ee");
    assert!(err.to_string().contains("leading zero"));
}

#[test]
fn test_error_fragment_truncated() {
    let mut data = b"l".to_vec();
    data.extend(std::iter::repeat(b'x').take(100));
    let err = decode(&data).unwrap_err();
    let fragment = err.fragment().unwrap();
    assert_eq!(fragment.offset(), 1);
    assert!(fragment.excerpt().ends_with("..."));
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode_integer(1), b"i1e");
    assert_eq!(encode_integer(-12), b"i-12e");
    assert_eq!(encode_integer(0), b"i0e");
    assert_eq!(encode_integer(i64::MAX), b"i9223372036854775807e");
    assert_eq!(encode_integer(i64::MIN), b"i-9223372036854775808e");
}

#[test]
fn test_encode_string() {
    assert_eq!(encode_string("Hello world!"), b"12:Hello world!");
    assert_eq!(encode_string(""), b"0:");
    assert_eq!(encode_string(" "), b"1: ");
    assert_eq!(encode_string(Option::<&str>::None.unwrap_or_default()), b"0:");
    assert_eq!(encode(&Value::Bytes(Bytes::from_static(b"spam"))), b"4:spam");
}

#[test]
fn test_encode_list() {
    let list = vec![Value::string("spam"), Value::Integer(42)];
    assert_eq!(encode_list(&list), b"l4:spami42ee");
}

#[test]
fn test_encode_nested_empty_lists() {
    let mut value = Value::list();
    for _ in 0..4 {
        value = Value::List(vec![value]);
    }
    assert_eq!(encode(&value), b"llllleeeee");
    assert_eq!(decode(b"llllleeeee").unwrap(), value);
}

#[test]
fn test_encode_dict() {
    let mut dict = Dictionary::new();
    dict.put("cow", "moo");
    assert_eq!(encode_dictionary(&dict), b"d3:cow3:mooe");
}

#[test]
fn test_encode_to_writer() {
    let mut out = Vec::new();
    encode_to(&Value::Integer(7), &mut out).unwrap();
    assert_eq!(out, b"i7e");
}

#[test]
fn test_roundtrip() {
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    assert_eq!(encode(&decoded), original);
}

#[test]
fn test_nested_structures() {
    let data = b"d4:listl4:spami42eee";
    let decoded = decode(data).unwrap();
    assert_eq!(encode(&decoded), data);
}

#[test]
fn test_builder_matches_decoded() {
    let mut inner = Value::list();
    inner.append("spam");
    inner.append(42i64);

    let mut built = Value::dictionary();
    built.put("list", inner);

    assert_eq!(decode(b"d4:listl4:spami42eee").unwrap(), built);
}

#[test]
fn test_put_replaces_in_place() {
    let mut dict = Dictionary::new();
    assert_eq!(dict.put("a", 1i64), None);
    dict.put("b", 2i64);
    assert_eq!(dict.put("a", 3i64), Some(Value::Integer(1)));
    assert_eq!(encode_dictionary(&dict), b"d1:ai3e1:bi2ee");
}

#[test]
fn test_sort_keys() {
    let mut dict: Dictionary = [("zeta", 1i64), ("alpha", 2i64), ("mid", 3i64)]
        .into_iter()
        .collect();
    dict.sort_keys();
    assert_eq!(encode_dictionary(&dict), b"d5:alphai2e3:midi3e4:zetai1ee");
    assert_eq!(dict.get(b"zeta"), Some(&Value::Integer(1)));
    assert_eq!(dict.get(b"alpha"), Some(&Value::Integer(2)));
}

#[test]
fn test_dictionary_order_is_identity() {
    let a = decode(b"d1:ai1e1:bi2ee").unwrap();
    let b = decode(b"d1:bi2e1:ai1ee").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());
    assert!(value.is_integer());

    let value = Value::Bytes(Bytes::from_static(b"test"));
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());
    assert!(value.is_string());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
    assert!(!value.is_dictionary());
}

#[test]
fn test_leaf_mutators() {
    let mut value = Value::Integer(1);
    *value.expect_integer_mut() = 5;
    assert_eq!(value.expect_integer(), 5);

    let mut value = Value::string("old");
    *value.expect_string_mut() = Bytes::from_static(b"new");
    assert_eq!(value.expect_string(), "new");
}

#[test]
#[should_panic(expected = "called `Value::expect_list` on a integer value")]
fn test_projection_mismatch_panics() {
    Value::Integer(1).expect_list();
}

#[test]
#[should_panic(expected = "expect_dictionary_mut")]
fn test_put_on_list_panics() {
    Value::list().put("key", 1i64);
}
