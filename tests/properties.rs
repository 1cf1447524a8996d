extern crate env_logger;
extern crate proptest;
extern crate wstrutil;

macro_rules! here { () => { &format!(concat!(file!(), ":{:?}"), line!()) } }

use proptest::prelude::*;
use wstrutil::encoding::encode_wide;
use wstrutil::{
    concat_into, concat_n_into, copy_into, ends_with, is_empty, narrow_from_wide, units_len, wformat,
    wformat_into, wide_from_narrow, BoundedError, Codepage, WChar, WideDisplay,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn buffer(content: &str, capacity: usize) -> Vec<WChar> {
    let mut v = encode_wide(content);
    v.resize(capacity, 0);
    v
}

proptest! {
    #[test]
    fn concat_length_is_bounded(
        prefix in "[a-z]{0,8}",
        suffix in "[a-z]{0,16}",
        extra in 1usize..16,
    ) {
        let capacity = prefix.len() + extra;
        let mut dst = buffer(&prefix, capacity);
        let src = encode_wide(&suffix);
        let ok = concat_into(&mut dst, Some(&src[..])).is_ok();

        let expected = std::cmp::min(prefix.len() + suffix.len(), capacity - 1);
        prop_assert_eq!(units_len(&dst), expected);
        prop_assert_eq!(dst[expected], 0);
        prop_assert!(WideDisplay(&dst).to_string().starts_with(&prefix));
        prop_assert_eq!(ok, prefix.len() + suffix.len() < capacity);
    }

    #[test]
    fn concat_n_length_is_bounded(
        prefix in "[a-z]{0,8}",
        suffix in "[a-z]{0,16}",
        n in 0usize..20,
        extra in 1usize..16,
    ) {
        let n = n.min(suffix.len());
        let capacity = prefix.len() + extra;
        let mut dst = buffer(&prefix, capacity);
        let src = encode_wide(&suffix);
        let ok = concat_n_into(&mut dst, &src, n).is_ok();

        let expected = std::cmp::min(prefix.len() + n, capacity - 1);
        prop_assert_eq!(units_len(&dst), expected);
        prop_assert_eq!(dst[expected], 0);
        prop_assert_eq!(&dst[prefix.len()..expected], &src[..expected - prefix.len()]);
        prop_assert_eq!(ok, prefix.len() + n < capacity);
    }

    #[test]
    fn copy_succeeds_iff_it_fits(src in "[a-zA-Z0-9]{0,24}", capacity in 1usize..24) {
        let mut dst = vec![0x55; capacity];
        let wide = encode_wide(&src);
        let ok = copy_into(&mut dst, &wide);

        prop_assert_eq!(ok, src.len() < capacity);
        let len = units_len(&dst);
        prop_assert_eq!(len, std::cmp::min(src.len(), capacity - 1));
        prop_assert_eq!(&dst[..len], &wide[..len]);
    }

    #[test]
    fn ends_with_matches_str(text in "[ab]{0,8}", suffix in "[ab]{0,4}") {
        let t = encode_wide(&text);
        let s = encode_wide(&suffix);
        prop_assert_eq!(ends_with(Some(&t[..]), Some(&s[..])), text.ends_with(&suffix));
    }

    #[test]
    fn ascii_round_trips(text in "[ -~]{0,64}") {
        let wide = wide_from_narrow(text.as_bytes(), Codepage::UTF8).expect(here!());
        prop_assert_eq!(wide.to_string_lossy(), text.clone());
        let narrow = narrow_from_wide(&wide, Codepage::UTF8).expect(here!());
        prop_assert_eq!(&narrow[..], text.as_bytes());
    }
}

#[test]
fn test_concat_into_full_destination() {
    init_logging();
    let mut dst = buffer("abcd", 4);
    let src = encode_wide("x");
    assert_eq!(
        concat_into(&mut dst, Some(&src[..])).err(),
        Some(BoundedError::Full { len: 4, capacity: 4 })
    );
    assert_eq!(dst, encode_wide("abcd"));
}

#[test]
fn test_is_empty() {
    assert!(is_empty(None));
    assert!(is_empty(Some(&[0][..])));
    assert!(!is_empty(Some(&encode_wide("a")[..])));
}

#[test]
fn test_format_small() {
    init_logging();
    let s = wformat!("{}-{}", "ab", 7).expect(here!());
    assert_eq!(s.to_string_lossy(), "ab-7");
}

#[test]
fn test_format_long() {
    init_logging();
    let long = "q".repeat(500);
    let s = wformat!("{}", long).expect(here!());
    assert_eq!(s.len(), 500);
    assert_eq!(s.to_string_lossy(), long);
}

#[test]
fn test_format_into_truncates() {
    let mut buf = [0; 5];
    assert_eq!(wformat_into!(&mut buf, "{}", "hello world"), Ok(11));
    assert_eq!(WideDisplay(&buf).to_string(), "hell");
    assert_eq!(buf[4], 0);
}
